//! CloudWatch client speaking the AWS JSON 1.0 protocol over signed HTTP.
mod signing;
mod wire;

#[cfg(test)]
mod tests;

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Url;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::application::{Datapoint, MetricsBackend, StatisticsRequest, StatisticsResponse};
use crate::domain::PublishRequest;
use crate::error::{AppError, AppResult, BackendError};

use self::signing::sign_request;
use self::wire::{
    ErrorBody, GetMetricStatisticsInput, GetMetricStatisticsOutput, PutMetricDataInput,
    PutMetricDataOutput,
};

pub(crate) const SIGNING_SERVICE: &str = "monitoring";
const JSON_CONTENT_TYPE: &str = "application/x-amz-json-1.0";
const TARGET_PREFIX: &str = "GraniteServiceVersion20100801";
const GET_METRIC_STATISTICS: &str = "GetMetricStatistics";
const PUT_METRIC_DATA: &str = "PutMetricData";

#[derive(Clone)]
pub struct AwsCredentials {
    pub access_key_id: String,
    pub secret_access_key: String,
    pub session_token: Option<String>,
}

impl fmt::Debug for AwsCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AwsCredentials")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"<redacted>")
            .field(
                "session_token",
                &self.session_token.as_ref().map(|_| "<redacted>"),
            )
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct CloudWatchSettings {
    pub region: String,
    pub endpoint: Option<Url>,
    pub credentials: AwsCredentials,
    pub request_timeout: Duration,
}

pub struct CloudWatchClient {
    http: reqwest::Client,
    endpoint: Url,
    region: String,
    credentials: AwsCredentials,
}

impl CloudWatchClient {
    /// Builds the client once per process.
    ///
    /// # Errors
    ///
    /// Returns an error when the regional endpoint is invalid or the HTTP
    /// client cannot be constructed.
    pub fn new(settings: CloudWatchSettings) -> AppResult<Self> {
        let endpoint = match settings.endpoint {
            Some(endpoint) => endpoint,
            None => regional_endpoint(&settings.region)?,
        };
        let http = reqwest::Client::builder()
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| AppError::backend(BackendError::BuildClientFailed { source: err }))?;
        debug!(%endpoint, region = %settings.region, "CloudWatch client ready");
        Ok(Self {
            http,
            endpoint,
            region: settings.region,
            credentials: settings.credentials,
        })
    }

    #[must_use]
    pub const fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    async fn call<TInput, TOutput>(
        &self,
        operation: &'static str,
        input: &TInput,
    ) -> AppResult<TOutput>
    where
        TInput: Serialize + Sync,
        TOutput: DeserializeOwned + Default,
    {
        let payload = serde_json::to_string(input).map_err(|err| {
            AppError::backend(BackendError::EncodeRequest {
                operation,
                source: err,
            })
        })?;
        let headers = [
            ("content-type".to_owned(), JSON_CONTENT_TYPE.to_owned()),
            (
                "x-amz-target".to_owned(),
                format!("{}.{}", TARGET_PREFIX, operation),
            ),
        ];

        let mut builder = self.http.post(self.endpoint.clone());
        for (name, value) in &headers {
            builder = builder.header(name, value);
        }
        let builder = sign_request(
            builder,
            &self.endpoint,
            &headers,
            &payload,
            &self.credentials,
            &self.region,
        )?;

        let response = builder.body(payload).send().await.map_err(|err| {
            AppError::backend(BackendError::RequestFailed {
                operation,
                source: err,
            })
        })?;
        let status = response.status();
        let body = response.bytes().await.map_err(|err| {
            AppError::backend(BackendError::RequestFailed {
                operation,
                source: err,
            })
        })?;

        if !status.is_success() {
            let error = ErrorBody::parse(&body);
            return Err(AppError::backend(BackendError::Service {
                operation,
                status: status.as_u16(),
                code: error.code(),
                message: error.message(),
            }));
        }

        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(TOutput::default());
        }
        serde_json::from_slice(&body).map_err(|err| {
            AppError::backend(BackendError::DecodeResponse {
                operation,
                source: err,
            })
        })
    }
}

#[async_trait]
impl MetricsBackend for CloudWatchClient {
    async fn get_statistics(&self, request: &StatisticsRequest) -> AppResult<StatisticsResponse> {
        let input = GetMetricStatisticsInput::from_request(request);
        let output: GetMetricStatisticsOutput = self.call(GET_METRIC_STATISTICS, &input).await?;
        Ok(StatisticsResponse {
            label: output.label,
            datapoints: output
                .datapoints
                .into_iter()
                .map(|point| Datapoint {
                    sum: point.sum.unwrap_or(0.0),
                })
                .collect(),
        })
    }

    async fn put_metric(&self, request: &PublishRequest) -> AppResult<()> {
        let input = PutMetricDataInput::from_request(request);
        let _output: PutMetricDataOutput = self.call(PUT_METRIC_DATA, &input).await?;
        Ok(())
    }
}

fn regional_endpoint(region: &str) -> AppResult<Url> {
    let value = format!("https://{}.{}.amazonaws.com/", SIGNING_SERVICE, region);
    Url::parse(&value).map_err(|err| {
        AppError::config(crate::error::ConfigError::InvalidEndpoint { value, source: err })
    })
}
