use aws_credential_types::Credentials;
use aws_sigv4::http_request::{SignableBody, SignableRequest, SigningSettings, sign};
use aws_sigv4::sign::v4;
use aws_smithy_runtime_api::client::identity::Identity;
use reqwest::{RequestBuilder, Url};

use crate::error::{AppError, AppResult, BackendError};

use super::{AwsCredentials, SIGNING_SERVICE};

const SIGNED_METHOD: &str = "POST";

/// Adds SigV4 headers (`authorization`, `x-amz-date`, and the session token
/// when present) for a POST of `body` to `url`.
pub(super) fn sign_request(
    mut builder: RequestBuilder,
    url: &Url,
    headers: &[(String, String)],
    body: &str,
    credentials: &AwsCredentials,
    region: &str,
) -> AppResult<RequestBuilder> {
    let identity: Identity = Credentials::new(
        &credentials.access_key_id,
        &credentials.secret_access_key,
        credentials.session_token.clone(),
        None,
        "healthratio",
    )
    .into();
    let signing_params = v4::SigningParams::builder()
        .identity(&identity)
        .region(region)
        .name(SIGNING_SERVICE)
        .time(std::time::SystemTime::now())
        .settings(SigningSettings::default())
        .build()
        .map_err(|err| {
            AppError::backend(BackendError::SigV4Params {
                source: Box::new(err),
            })
        })?
        .into();

    let signable = SignableRequest::new(
        SIGNED_METHOD,
        url.as_str(),
        headers.iter().map(|(k, v)| (k.as_str(), v.as_str())),
        SignableBody::Bytes(body.as_bytes()),
    )
    .map_err(|err| {
        AppError::backend(BackendError::SigV4Request {
            source: Box::new(err),
        })
    })?;

    let (instructions, _signature) = sign(signable, &signing_params)
        .map_err(|err| {
            AppError::backend(BackendError::SigV4Sign {
                source: Box::new(err),
            })
        })?
        .into_parts();

    let mut http_req = http::Request::builder()
        .method(SIGNED_METHOD)
        .uri(url.as_str());
    for (key, value) in headers {
        http_req = http_req.header(key, value);
    }
    let mut http_req = http_req.body(()).map_err(|err| {
        AppError::backend(BackendError::SigV4BuildSign {
            source: Box::new(err),
        })
    })?;
    instructions.apply_to_request_http1x(&mut http_req);

    for (name, value) in http_req.headers() {
        if headers.iter().any(|(key, _)| key.as_str() == name.as_str()) {
            continue;
        }
        builder = builder.header(name, value);
    }
    Ok(builder)
}
