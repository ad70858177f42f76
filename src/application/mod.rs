//! The fetch → compute → publish pipeline and the ports it runs against.
pub mod fetcher;
pub mod pipeline;
pub mod ports;
pub mod publisher;


pub use fetcher::MetricFetcher;
pub use pipeline::{HealthRatioJob, RunOutcome};
pub use ports::{
    Clock, Datapoint, Dimension, MetricsBackend, StatisticsRequest, StatisticsResponse,
    SystemClock,
};
pub use publisher::{PublishMode, PublishReport, Publisher};
