use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use chrono::{DateTime, Utc};
use reqwest::Url;

use super::wire::{ErrorBody, GetMetricStatisticsInput, PutMetricDataInput};
use super::{AwsCredentials, CloudWatchClient, CloudWatchSettings};
use crate::application::{Dimension, MetricsBackend, StatisticsRequest};
use crate::domain::{PublishRequest, TimeWindow};
use crate::error::{AppError, AppResult, BackendError};

struct CapturedRequest {
    head: String,
    body: String,
}

fn credentials() -> AwsCredentials {
    AwsCredentials {
        access_key_id: "AKIDEXAMPLE".to_owned(),
        secret_access_key: "wJalrXUtnFEMI/K7MDENG+bPxRfiCYEXAMPLEKEY".to_owned(),
        session_token: Some("session".to_owned()),
    }
}

fn statistics_request() -> AppResult<StatisticsRequest> {
    let end = DateTime::<Utc>::from_timestamp(1_700_000_300, 0)
        .ok_or_else(|| AppError::validation("invalid timestamp"))?;
    Ok(StatisticsRequest {
        namespace: "AWS/ELB".to_owned(),
        metric_name: "HTTPCode_Backend_2XX".to_owned(),
        dimension: Dimension {
            name: "LoadBalancerName".to_owned(),
            value: "web-elb".to_owned(),
        },
        window: TimeWindow::trailing(end, 300)?,
        period_seconds: 300,
    })
}

fn read_request(stream: &mut TcpStream) -> Option<CapturedRequest> {
    let mut data = Vec::new();
    let mut chunk = [0u8; 1024];
    let header_end = loop {
        let read = stream.read(&mut chunk).ok()?;
        if read == 0 {
            return None;
        }
        data.extend_from_slice(chunk.get(..read)?);
        if let Some(pos) = data.windows(4).position(|window| window == b"\r\n\r\n") {
            break pos.checked_add(4)?;
        }
    };
    let head = String::from_utf8_lossy(data.get(..header_end)?).into_owned();
    let content_length = head
        .lines()
        .find_map(|line| {
            let (name, value) = line.split_once(':')?;
            name.eq_ignore_ascii_case("content-length")
                .then(|| value.trim().parse::<usize>().ok())
                .flatten()
        })
        .unwrap_or(0);
    while data.len() < header_end.checked_add(content_length)? {
        let read = stream.read(&mut chunk).ok()?;
        if read == 0 {
            break;
        }
        data.extend_from_slice(chunk.get(..read)?);
    }
    let body = String::from_utf8_lossy(data.get(header_end..)?).into_owned();
    Some(CapturedRequest { head, body })
}

/// Serves one canned response per accepted connection, in order.
fn spawn_backend(
    responses: Vec<(u16, &'static str)>,
) -> AppResult<(Url, mpsc::Receiver<CapturedRequest>)> {
    let listener = TcpListener::bind("127.0.0.1:0")?;
    let addr = listener.local_addr()?;
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        for (status, body) in responses {
            let Ok((mut stream, _)) = listener.accept() else {
                return;
            };
            if let Some(request) = read_request(&mut stream) {
                drop(tx.send(request));
            }
            let response = format!(
                "HTTP/1.1 {} X\r\nContent-Type: application/x-amz-json-1.0\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            drop(stream.write_all(response.as_bytes()));
            drop(stream.flush());
        }
    });
    let url = Url::parse(&format!("http://{}/", addr))
        .map_err(|err| AppError::validation(err.to_string()))?;
    Ok((url, rx))
}

fn client_for(endpoint: Url) -> AppResult<CloudWatchClient> {
    CloudWatchClient::new(CloudWatchSettings {
        region: "us-east-1".to_owned(),
        endpoint: Some(endpoint),
        credentials: credentials(),
        request_timeout: Duration::from_secs(5),
    })
}

fn captured(rx: &mpsc::Receiver<CapturedRequest>) -> AppResult<CapturedRequest> {
    rx.recv_timeout(Duration::from_secs(5))
        .map_err(|err| AppError::validation(format!("no request captured: {}", err)))
}

#[test]
fn statistics_input_uses_sum_over_window() -> AppResult<()> {
    let request = statistics_request()?;
    let value = serde_json::to_value(GetMetricStatisticsInput::from_request(&request))?;
    let expected = serde_json::json!({
        "Namespace": "AWS/ELB",
        "MetricName": "HTTPCode_Backend_2XX",
        "Dimensions": [{ "Name": "LoadBalancerName", "Value": "web-elb" }],
        "StartTime": 1_700_000_000_i64,
        "EndTime": 1_700_000_300_i64,
        "Period": 300,
        "Statistics": ["Sum"],
        "Unit": "Count"
    });
    if value != expected {
        return Err(AppError::validation(format!("Unexpected input: {}", value)));
    }
    Ok(())
}

#[test]
fn put_input_has_no_unit_dimensions_or_timestamp() -> AppResult<()> {
    let request = PublishRequest {
        namespace: "Custom".to_owned(),
        metric_name: "BackendSuccessRatio".to_owned(),
        value: 0.5,
    };
    let value = serde_json::to_value(PutMetricDataInput::from_request(&request))?;
    let expected = serde_json::json!({
        "Namespace": "Custom",
        "MetricData": [{ "MetricName": "BackendSuccessRatio", "Value": 0.5 }]
    });
    if value != expected {
        return Err(AppError::validation(format!("Unexpected input: {}", value)));
    }
    Ok(())
}

#[test]
fn error_body_strips_shape_prefix() -> AppResult<()> {
    let body = ErrorBody::parse(
        br#"{"__type":"com.amazonaws.cloudwatch#InvalidParameterValue","message":"bad period"}"#,
    );
    if body.code() != "InvalidParameterValue" || body.message() != "bad period" {
        return Err(AppError::validation(format!("Unexpected error body: {:?}", body)));
    }
    let plain = ErrorBody::parse(b"Service Unavailable");
    if plain.code() != "Unknown" || plain.message() != "Service Unavailable" {
        return Err(AppError::validation(format!("Unexpected error body: {:?}", plain)));
    }
    Ok(())
}

#[test]
fn credentials_debug_redacts_secrets() -> AppResult<()> {
    let rendered = format!("{:?}", credentials());
    if rendered.contains("wJalrXUtnFEMI") || rendered.contains("session\"") {
        return Err(AppError::validation(format!("Secret leaked: {}", rendered)));
    }
    Ok(())
}

#[test]
fn default_endpoint_is_regional() -> AppResult<()> {
    let client = CloudWatchClient::new(CloudWatchSettings {
        region: "eu-west-1".to_owned(),
        endpoint: None,
        credentials: credentials(),
        request_timeout: Duration::from_secs(5),
    })?;
    if client.endpoint().as_str() != "https://monitoring.eu-west-1.amazonaws.com/" {
        return Err(AppError::validation(format!(
            "Unexpected endpoint: {}",
            client.endpoint()
        )));
    }
    Ok(())
}

#[tokio::test(flavor = "current_thread")]
async fn get_statistics_signs_and_decodes_datapoints() -> AppResult<()> {
    let (url, rx) = spawn_backend(vec![(
        200,
        r#"{"Label":"HTTPCode_Backend_2XX","Datapoints":[{"Timestamp":1700000000,"Sum":12.0,"Unit":"Count"},{"Timestamp":1700000060,"Sum":30.0,"Unit":"Count"}]}"#,
    )])?;
    let client = client_for(url)?;

    let response = client.get_statistics(&statistics_request()?).await?;
    let sums: Vec<f64> = response.datapoints.iter().map(|point| point.sum).collect();
    if sums.len() != 2 || response.label.as_deref() != Some("HTTPCode_Backend_2XX") {
        return Err(AppError::validation(format!(
            "Unexpected response: {:?}",
            response
        )));
    }

    let request = captured(&rx)?;
    let head = request.head.to_ascii_lowercase();
    for needle in [
        "x-amz-target: graniteserviceversion20100801.getmetricstatistics",
        "content-type: application/x-amz-json-1.0",
        "authorization: aws4-hmac-sha256 credential=akidexample/",
        "/us-east-1/monitoring/aws4_request",
        "x-amz-date:",
        "x-amz-security-token: session",
    ] {
        if !head.contains(needle) {
            return Err(AppError::validation(format!(
                "Missing '{}' in request head:\n{}",
                needle, request.head
            )));
        }
    }
    let body: serde_json::Value = serde_json::from_str(&request.body)?;
    if body.get("MetricName").and_then(serde_json::Value::as_str) != Some("HTTPCode_Backend_2XX")
    {
        return Err(AppError::validation(format!("Unexpected body: {}", body)));
    }
    Ok(())
}

#[tokio::test(flavor = "current_thread")]
async fn get_statistics_without_datapoints_is_empty() -> AppResult<()> {
    let (url, _rx) = spawn_backend(vec![(200, r#"{"Label":"HTTPCode_Backend_5XX"}"#)])?;
    let client = client_for(url)?;

    let response = client.get_statistics(&statistics_request()?).await?;
    if !response.datapoints.is_empty() {
        return Err(AppError::validation("Expected no datapoints"));
    }
    Ok(())
}

#[tokio::test(flavor = "current_thread")]
async fn put_metric_accepts_empty_body() -> AppResult<()> {
    let (url, rx) = spawn_backend(vec![(200, "")])?;
    let client = client_for(url)?;

    client
        .put_metric(&PublishRequest {
            namespace: "Custom".to_owned(),
            metric_name: "BackendSuccessRatio".to_owned(),
            value: 0.75,
        })
        .await?;

    let request = captured(&rx)?;
    if !request
        .head
        .to_ascii_lowercase()
        .contains("x-amz-target: graniteserviceversion20100801.putmetricdata")
    {
        return Err(AppError::validation(format!(
            "Unexpected target:\n{}",
            request.head
        )));
    }
    Ok(())
}

#[tokio::test(flavor = "current_thread")]
async fn service_errors_carry_status_and_code() -> AppResult<()> {
    let (url, _rx) = spawn_backend(vec![(
        403,
        r#"{"__type":"com.amazon.coral.service#AccessDeniedException","message":"denied"}"#,
    )])?;
    let client = client_for(url)?;

    match client.get_statistics(&statistics_request()?).await {
        Err(AppError::Backend(BackendError::Service {
            status: 403,
            code,
            message,
            ..
        })) if code == "AccessDeniedException" && message == "denied" => Ok(()),
        other => Err(AppError::validation(format!(
            "Expected service error, got {:?}",
            other
        ))),
    }
}
