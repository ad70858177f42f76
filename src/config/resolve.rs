use std::time::Duration;

use url::Url;

use crate::error::{AppError, AppResult, ConfigError};

use super::types::{ConfigFile, CounterSource, DurationValue, RunConfig};

pub(crate) const DEFAULT_SOURCE_NAMESPACE: &str = "AWS/ELB";
pub(crate) const DEFAULT_DIMENSION_NAME: &str = "LoadBalancerName";
pub(crate) const DEFAULT_SUCCESS_METRIC: &str = "HTTPCode_Backend_2XX";
pub(crate) const DEFAULT_ERROR_METRIC: &str = "HTTPCode_Backend_5XX";
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const DEFAULT_RETRY_BACKOFF: Duration = Duration::from_millis(500);
const MAX_RETRY_ATTEMPTS: u32 = 10;

/// Validates a raw config document into a [`RunConfig`].
///
/// # Errors
///
/// Returns an error when a required field is missing or any field is invalid.
pub fn resolve_config(file: ConfigFile) -> AppResult<RunConfig> {
    let resource_id = required_text("load_balancer_name", file.load_balancer_name)?;
    let window_seconds = file
        .interval_seconds
        .ok_or(ConfigError::MissingField {
            field: "interval_seconds",
        })
        .map_err(AppError::config)?;
    if window_seconds == 0 {
        return Err(AppError::config(ConfigError::FieldMustBePositive {
            field: "interval_seconds",
        }));
    }
    let output_metric_name = required_text("metric_name", file.metric_name)?;
    let output_namespace = required_text("custom_namespace", file.custom_namespace)?;

    let source = CounterSource {
        namespace: optional_text("source_namespace", file.source_namespace)?
            .unwrap_or_else(|| DEFAULT_SOURCE_NAMESPACE.to_owned()),
        dimension_name: optional_text("dimension_name", file.dimension_name)?
            .unwrap_or_else(|| DEFAULT_DIMENSION_NAME.to_owned()),
        success_metric: optional_text("success_metric", file.success_metric)?
            .unwrap_or_else(|| DEFAULT_SUCCESS_METRIC.to_owned()),
        error_metric: optional_text("error_metric", file.error_metric)?
            .unwrap_or_else(|| DEFAULT_ERROR_METRIC.to_owned()),
    };

    let endpoint = optional_text("endpoint", file.endpoint)?
        .map(|value| {
            Url::parse(&value)
                .map_err(|err| ConfigError::InvalidEndpoint { value, source: err })
        })
        .transpose()
        .map_err(AppError::config)?;

    let retry_attempts = file.retry_attempts.unwrap_or(0);
    if retry_attempts > MAX_RETRY_ATTEMPTS {
        return Err(AppError::config(ConfigError::FieldOutOfRange {
            field: "retry_attempts",
            value: u64::from(retry_attempts),
        }));
    }

    Ok(RunConfig {
        resource_id,
        window_seconds,
        output_metric_name,
        output_namespace,
        source,
        mock: file.mock.unwrap_or(false),
        region: optional_text("region", file.region)?,
        endpoint,
        request_timeout: duration_or(
            "request_timeout",
            file.request_timeout,
            DEFAULT_REQUEST_TIMEOUT,
        )?,
        retry_attempts,
        retry_backoff: duration_or("retry_backoff", file.retry_backoff, DEFAULT_RETRY_BACKOFF)?,
    })
}

fn required_text(field: &'static str, value: Option<String>) -> AppResult<String> {
    optional_text(field, value)?
        .ok_or_else(|| AppError::config(ConfigError::MissingField { field }))
}

fn optional_text(field: &'static str, value: Option<String>) -> AppResult<Option<String>> {
    match value {
        Some(text) if text.trim().is_empty() => {
            Err(AppError::config(ConfigError::EmptyField { field }))
        }
        Some(text) => Ok(Some(text.trim().to_owned())),
        None => Ok(None),
    }
}

fn duration_or(
    field: &'static str,
    value: Option<DurationValue>,
    default: Duration,
) -> AppResult<Duration> {
    value.map_or(Ok(default), |value| {
        value
            .to_duration()
            .map_err(|err| AppError::config(ConfigError::InvalidDuration { field, source: err }))
    })
}
