use std::time::Duration;

use super::resolve::{
    DEFAULT_DIMENSION_NAME, DEFAULT_ERROR_METRIC, DEFAULT_SOURCE_NAMESPACE,
    DEFAULT_SUCCESS_METRIC,
};
use super::types::{CounterSource, RunConfig};

pub(crate) fn sample_run_config() -> RunConfig {
    RunConfig {
        resource_id: "web-elb".to_owned(),
        window_seconds: 300,
        output_metric_name: "BackendSuccessRatio".to_owned(),
        output_namespace: "Custom".to_owned(),
        source: CounterSource {
            namespace: DEFAULT_SOURCE_NAMESPACE.to_owned(),
            dimension_name: DEFAULT_DIMENSION_NAME.to_owned(),
            success_metric: DEFAULT_SUCCESS_METRIC.to_owned(),
            error_metric: DEFAULT_ERROR_METRIC.to_owned(),
        },
        mock: false,
        region: None,
        endpoint: None,
        request_timeout: Duration::from_secs(30),
        retry_attempts: 0,
        retry_backoff: Duration::from_millis(500),
    }
}
