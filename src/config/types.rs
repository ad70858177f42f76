use std::time::Duration;

use serde::Deserialize;
use url::Url;

/// Raw configuration document as read from TOML or JSON.
///
/// Every field is optional here; [`super::resolve_config`] enforces the
/// required ones and fills in defaults.
#[derive(Debug, Default, Deserialize)]
pub struct ConfigFile {
    pub load_balancer_name: Option<String>,
    pub interval_seconds: Option<u64>,
    pub metric_name: Option<String>,
    pub custom_namespace: Option<String>,
    pub mock: Option<bool>,
    pub region: Option<String>,
    pub endpoint: Option<String>,
    pub source_namespace: Option<String>,
    pub dimension_name: Option<String>,
    pub success_metric: Option<String>,
    pub error_metric: Option<String>,
    pub request_timeout: Option<DurationValue>,
    pub retry_attempts: Option<u32>,
    pub retry_backoff: Option<DurationValue>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum DurationValue {
    Seconds(u64),
    Text(String),
}

impl DurationValue {
    pub(crate) fn to_duration(&self) -> Result<Duration, crate::error::ValidationError> {
        match self {
            DurationValue::Seconds(secs) => {
                if *secs == 0 {
                    Err(crate::error::ValidationError::DurationZero)
                } else {
                    Ok(Duration::from_secs(*secs))
                }
            }
            DurationValue::Text(text) => super::parse_duration_value(text),
        }
    }
}

/// Where the two raw counters live in the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CounterSource {
    pub namespace: String,
    pub dimension_name: String,
    pub success_metric: String,
    pub error_metric: String,
}

/// Validated, immutable parameters for a single invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub resource_id: String,
    pub window_seconds: u64,
    pub output_metric_name: String,
    pub output_namespace: String,
    pub source: CounterSource,
    pub mock: bool,
    pub region: Option<String>,
    pub endpoint: Option<Url>,
    pub request_timeout: Duration,
    pub retry_attempts: u32,
    pub retry_backoff: Duration,
}
