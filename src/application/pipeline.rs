use std::sync::Arc;

use tracing::info;

use crate::config::RunConfig;
use crate::domain::{CounterQuery, CounterTotal, compute_ratio};
use crate::error::AppResult;

use super::fetcher::MetricFetcher;
use super::ports::{Clock, MetricsBackend};
use super::publisher::{PublishMode, PublishReport, Publisher};

/// Terminal state of one invocation.
#[derive(Debug, Clone, PartialEq)]
pub enum RunOutcome {
    Published(PublishReport),
    InsufficientData {
        success: CounterTotal,
        error: CounterTotal,
    },
}

/// Fetches both counters, derives the success ratio and publishes it.
pub struct HealthRatioJob {
    fetcher: MetricFetcher,
    publisher: Publisher,
    clock: Arc<dyn Clock>,
    config: RunConfig,
}

impl HealthRatioJob {
    #[must_use]
    pub fn new(
        backend: Arc<dyn MetricsBackend>,
        clock: Arc<dyn Clock>,
        config: &RunConfig,
        mode: PublishMode,
    ) -> Self {
        Self {
            fetcher: MetricFetcher::new(Arc::clone(&backend), &config.source),
            publisher: Publisher::new(backend, mode),
            clock,
            config: config.clone(),
        }
    }

    /// Runs the pipeline once. Both windows share a single "now".
    ///
    /// # Errors
    ///
    /// Returns the first fetch or publish error; nothing is retried here.
    pub async fn run(&self) -> AppResult<RunOutcome> {
        let config = &self.config;
        let window_end = self.clock.now();

        let success_query = CounterQuery::new(
            &config.source.success_metric,
            &config.resource_id,
            config.window_seconds,
        );
        let success = self.fetcher.fetch(&success_query, window_end).await?;

        let error_query = CounterQuery::new(
            &config.source.error_metric,
            &config.resource_id,
            config.window_seconds,
        );
        let error = self.fetcher.fetch(&error_query, window_end).await?;

        let Some(ratio) = compute_ratio(success, error) else {
            info!(
                success = success.value(),
                error = error.value(),
                "Insufficient data for a new metric; will not publish."
            );
            return Ok(RunOutcome::InsufficientData { success, error });
        };

        let report = self
            .publisher
            .publish(ratio, &config.output_metric_name, &config.output_namespace)
            .await?;
        Ok(RunOutcome::Published(report))
    }
}
