use std::sync::Arc;

use tracing::info;

use crate::domain::{PublishRequest, Ratio};
use crate::error::AppResult;

use super::ports::MetricsBackend;

/// Whether [`Publisher`] writes to the backend or only logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishMode {
    Live,
    Mock,
}

impl PublishMode {
    #[must_use]
    pub const fn from_mock_flag(mock: bool) -> Self {
        if mock { Self::Mock } else { Self::Live }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            PublishMode::Live => "live",
            PublishMode::Mock => "mock",
        }
    }
}

/// What was written (or would have been, in mock mode).
#[derive(Debug, Clone, PartialEq)]
pub struct PublishReport {
    pub request: PublishRequest,
    pub mode: PublishMode,
}

pub struct Publisher {
    backend: Arc<dyn MetricsBackend>,
    mode: PublishMode,
}

impl Publisher {
    #[must_use]
    pub fn new(backend: Arc<dyn MetricsBackend>, mode: PublishMode) -> Self {
        Self { backend, mode }
    }

    /// Writes `ratio` as a single unitless datapoint, unless in mock mode.
    ///
    /// # Errors
    ///
    /// Returns an error when the backend write fails.
    pub async fn publish(
        &self,
        ratio: Ratio,
        metric_name: &str,
        namespace: &str,
    ) -> AppResult<PublishReport> {
        let request = PublishRequest {
            namespace: namespace.to_owned(),
            metric_name: metric_name.to_owned(),
            value: ratio.value(),
        };

        match self.mode {
            PublishMode::Mock => info!("Mock detected; will not publish to the metrics backend"),
            PublishMode::Live => {
                info!("Publishing to the metrics backend");
                self.backend.put_metric(&request).await?;
            }
        }

        info!(
            mode = self.mode.as_str(),
            "Put {}:{} metric value: {}",
            request.namespace,
            request.metric_name,
            request.value
        );
        Ok(PublishReport {
            request,
            mode: self.mode,
        })
    }
}
