//! Backend adapters behind the [`crate::application::MetricsBackend`] port.
pub mod cloudwatch;
pub mod retry;

pub use cloudwatch::{AwsCredentials, CloudWatchClient, CloudWatchSettings};
pub use retry::RetryingBackend;
