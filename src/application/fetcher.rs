use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::config::CounterSource;
use crate::domain::{CounterQuery, CounterTotal, TimeWindow};
use crate::error::{AppError, AppResult, BackendError};

use super::ports::{Datapoint, Dimension, MetricsBackend, StatisticsRequest};

/// Reads one counter, summed over a trailing window.
pub struct MetricFetcher {
    backend: Arc<dyn MetricsBackend>,
    namespace: String,
    dimension_name: String,
}

impl MetricFetcher {
    #[must_use]
    pub fn new(backend: Arc<dyn MetricsBackend>, source: &CounterSource) -> Self {
        Self {
            backend,
            namespace: source.namespace.clone(),
            dimension_name: source.dimension_name.clone(),
        }
    }

    /// Sums every datapoint the backend reports for `query` in the window
    /// ending at `window_end`. No datapoints yields zero.
    ///
    /// # Errors
    ///
    /// Returns an error when the window is out of range, the backend call
    /// fails, or a datapoint is negative or non-finite.
    pub async fn fetch(
        &self,
        query: &CounterQuery,
        window_end: DateTime<Utc>,
    ) -> AppResult<CounterTotal> {
        let window =
            TimeWindow::trailing(window_end, query.window_seconds).map_err(AppError::validation)?;
        let request = StatisticsRequest {
            namespace: self.namespace.clone(),
            metric_name: query.metric_name.clone(),
            dimension: Dimension {
                name: self.dimension_name.clone(),
                value: query.resource_id.clone(),
            },
            window,
            period_seconds: query.window_seconds,
        };

        let response = self.backend.get_statistics(&request).await?;
        debug!(metric = %query.metric_name, ?response, "Backend statistics response");

        let total = sum_datapoints(&query.metric_name, &response.datapoints)?;
        info!(
            "Returning {} for metric {}",
            total.value(),
            query.metric_name
        );
        Ok(total)
    }
}

fn sum_datapoints(metric: &str, datapoints: &[Datapoint]) -> AppResult<CounterTotal> {
    if let Some(bad) = datapoints
        .iter()
        .find(|point| CounterTotal::new(point.sum).is_none())
    {
        return Err(AppError::backend(BackendError::InvalidDatapoint {
            metric: metric.to_owned(),
            value: bad.sum,
        }));
    }
    let sum: f64 = datapoints.iter().map(|point| point.sum).sum();
    CounterTotal::new(sum).ok_or_else(|| {
        AppError::backend(BackendError::InvalidDatapoint {
            metric: metric.to_owned(),
            value: sum,
        })
    })
}
