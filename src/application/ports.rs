use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{PublishRequest, TimeWindow};
use crate::error::AppResult;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dimension {
    pub name: String,
    pub value: String,
}

/// Sum-statistic query over a single metric and dimension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatisticsRequest {
    pub namespace: String,
    pub metric_name: String,
    pub dimension: Dimension,
    pub window: TimeWindow,
    pub period_seconds: u64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Datapoint {
    pub sum: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatisticsResponse {
    pub label: Option<String>,
    pub datapoints: Vec<Datapoint>,
}

/// Read and write access to the metrics backend.
///
/// Implementations are shared read-only for the whole process.
#[async_trait]
pub trait MetricsBackend: Send + Sync {
    /// Returns the `Sum` datapoints for the requested window.
    ///
    /// # Errors
    ///
    /// Returns an error when the backend cannot be reached or rejects the query.
    async fn get_statistics(&self, request: &StatisticsRequest) -> AppResult<StatisticsResponse>;

    /// Records one datapoint at the backend's current time.
    ///
    /// # Errors
    ///
    /// Returns an error when the backend cannot be reached or rejects the write.
    async fn put_metric(&self, request: &PublishRequest) -> AppResult<()>;
}

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
