use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use tracing::warn;

use crate::application::{MetricsBackend, StatisticsRequest, StatisticsResponse};
use crate::domain::PublishRequest;
use crate::error::{AppError, AppResult, BackendError};

const THROTTLING_CODES: [&str; 4] = [
    "Throttling",
    "ThrottlingException",
    "RequestLimitExceeded",
    "TooManyRequestsException",
];

/// Retries each backend call a bounded number of times with a fixed delay.
///
/// Only transport failures, 5xx responses and throttling are retried. Only
/// installed when `retry_attempts > 0`; the default pipeline makes a single
/// attempt per call.
pub struct RetryingBackend<TBackend> {
    inner: TBackend,
    retries: u32,
    backoff: Duration,
}

impl<TBackend> RetryingBackend<TBackend> {
    #[must_use]
    pub const fn new(inner: TBackend, retries: u32, backoff: Duration) -> Self {
        Self {
            inner,
            retries,
            backoff,
        }
    }

    async fn retry<TOutput, TCall, TFuture>(
        &self,
        operation: &'static str,
        mut call: TCall,
    ) -> AppResult<TOutput>
    where
        TCall: FnMut() -> TFuture + Send,
        TFuture: Future<Output = AppResult<TOutput>> + Send,
        TOutput: Send,
    {
        let mut attempt: u32 = 0;
        loop {
            match call().await {
                Ok(output) => return Ok(output),
                Err(err) if attempt < self.retries && is_retryable(&err) => {
                    attempt = attempt.saturating_add(1);
                    warn!(
                        operation,
                        attempt,
                        retries = self.retries,
                        error = %err,
                        "Backend call failed; retrying"
                    );
                    tokio::time::sleep(self.backoff).await;
                }
                Err(err) => return Err(err),
            }
        }
    }
}

fn is_retryable(err: &AppError) -> bool {
    match err {
        AppError::Backend(BackendError::RequestFailed { .. }) => true,
        AppError::Backend(BackendError::Service { status, code, .. }) => {
            *status >= 500 || *status == 429 || THROTTLING_CODES.contains(&code.as_str())
        }
        _ => false,
    }
}

#[async_trait]
impl<TBackend> MetricsBackend for RetryingBackend<TBackend>
where
    TBackend: MetricsBackend,
{
    async fn get_statistics(&self, request: &StatisticsRequest) -> AppResult<StatisticsResponse> {
        self.retry("GetMetricStatistics", || self.inner.get_statistics(request))
            .await
    }

    async fn put_metric(&self, request: &PublishRequest) -> AppResult<()> {
        self.retry("PutMetricData", || self.inner.put_metric(request))
            .await
    }
}
