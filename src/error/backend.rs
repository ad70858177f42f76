use thiserror::Error;

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("Failed to build HTTP client: {source}")]
    BuildClientFailed {
        #[source]
        source: reqwest::Error,
    },
    #[error("Request to {operation} failed: {source}")]
    RequestFailed {
        operation: &'static str,
        #[source]
        source: reqwest::Error,
    },
    #[error("{operation} returned HTTP {status} ({code}): {message}")]
    Service {
        operation: &'static str,
        status: u16,
        code: String,
        message: String,
    },
    #[error("Failed to decode {operation} response: {source}")]
    DecodeResponse {
        operation: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("Failed to encode {operation} request: {source}")]
    EncodeRequest {
        operation: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("Invalid datapoint for {metric}: {value}")]
    InvalidDatapoint { metric: String, value: f64 },
    #[error("No AWS credentials available: {source}")]
    Credentials {
        #[source]
        source: aws_credential_types::provider::error::CredentialsError,
    },
    #[error("Failed to build sigv4 params: {source}")]
    SigV4Params {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    #[error("Failed to build sigv4 request: {source}")]
    SigV4Request {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    #[error("Failed to sign request: {source}")]
    SigV4Sign {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    #[error("Failed to build sign request: {source}")]
    SigV4BuildSign {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}
