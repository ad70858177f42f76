use serde::{Deserialize, Serialize};

use crate::application::StatisticsRequest;
use crate::domain::PublishRequest;

const SUM_STATISTIC: &str = "Sum";
const COUNT_UNIT: &str = "Count";

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub(super) struct WireDimension<'a> {
    pub name: &'a str,
    pub value: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub(super) struct GetMetricStatisticsInput<'a> {
    pub namespace: &'a str,
    pub metric_name: &'a str,
    pub dimensions: [WireDimension<'a>; 1],
    pub start_time: i64,
    pub end_time: i64,
    pub period: u64,
    pub statistics: [&'static str; 1],
    pub unit: &'static str,
}

impl<'a> GetMetricStatisticsInput<'a> {
    pub(super) fn from_request(request: &'a StatisticsRequest) -> Self {
        Self {
            namespace: &request.namespace,
            metric_name: &request.metric_name,
            dimensions: [WireDimension {
                name: &request.dimension.name,
                value: &request.dimension.value,
            }],
            start_time: request.window.start.timestamp(),
            end_time: request.window.end.timestamp(),
            period: request.period_seconds,
            statistics: [SUM_STATISTIC],
            unit: COUNT_UNIT,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(super) struct GetMetricStatisticsOutput {
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub datapoints: Vec<WireDatapoint>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(super) struct WireDatapoint {
    #[serde(default)]
    pub sum: Option<f64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub(super) struct MetricDatum<'a> {
    pub metric_name: &'a str,
    pub value: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub(super) struct PutMetricDataInput<'a> {
    pub namespace: &'a str,
    pub metric_data: [MetricDatum<'a>; 1],
}

impl<'a> PutMetricDataInput<'a> {
    pub(super) fn from_request(request: &'a PublishRequest) -> Self {
        Self {
            namespace: &request.namespace,
            metric_data: [MetricDatum {
                metric_name: &request.metric_name,
                value: request.value,
            }],
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct PutMetricDataOutput {}

/// Error document returned with non-2xx responses.
#[derive(Debug, Default, Deserialize)]
pub(super) struct ErrorBody {
    #[serde(rename = "__type", default)]
    kind: Option<String>,
    #[serde(alias = "Message", default)]
    message: Option<String>,
}

impl ErrorBody {
    pub(super) fn parse(body: &[u8]) -> Self {
        serde_json::from_slice(body).unwrap_or_else(|_| Self {
            kind: None,
            message: Some(String::from_utf8_lossy(body).trim().to_owned()),
        })
    }

    /// Short error code, without the shape namespace prefix.
    pub(super) fn code(&self) -> String {
        self.kind
            .as_deref()
            .and_then(|kind| kind.rsplit('#').next())
            .filter(|code| !code.is_empty())
            .unwrap_or("Unknown")
            .to_owned()
    }

    pub(super) fn message(&self) -> String {
        self.message
            .as_deref()
            .filter(|message| !message.is_empty())
            .unwrap_or("no error message")
            .to_owned()
    }
}
