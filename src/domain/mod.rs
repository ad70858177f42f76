//! Value types shared by the fetch/compute/publish pipeline.
pub mod metric;
pub mod ratio;
pub mod window;

pub use metric::{CounterQuery, CounterTotal, PublishRequest};
pub use ratio::{MIN_SAMPLE_COUNT, Ratio, compute_ratio};
pub use window::TimeWindow;
