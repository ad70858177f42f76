use std::path::Path;
use std::sync::Arc;

use aws_config::Region;
use aws_config::default_provider::credentials::DefaultCredentialsChain;
use aws_credential_types::provider::ProvideCredentials;
use clap::Parser;
use tracing::{Instrument, debug, error, info, info_span};

use crate::adapters::{AwsCredentials, CloudWatchClient, CloudWatchSettings, RetryingBackend};
use crate::application::{
    Clock, HealthRatioJob, MetricsBackend, PublishMode, RunOutcome, SystemClock,
};
use crate::args::{Command, JobArgs};
use crate::config::{RunConfig, load_config, resolve_config};
use crate::error::{AppError, AppResult, BackendError, ValidationError};

const DEFAULT_REGION: &str = "us-east-1";

/// Per-invocation metadata supplied by whatever triggered the run.
#[derive(Debug, Clone)]
pub struct InvocationContext {
    pub request_id: String,
}

impl InvocationContext {
    #[must_use]
    pub fn local(request_id: Option<String>) -> Self {
        let request_id = request_id
            .unwrap_or_else(|| format!("local-{}", chrono::Utc::now().timestamp_millis()));
        Self { request_id }
    }
}

/// Process-wide collaborators, built once and shared by every invocation.
pub struct JobDependencies {
    pub backend: Arc<dyn MetricsBackend>,
    pub clock: Arc<dyn Clock>,
    pub mode: PublishMode,
}

/// Runs one invocation of the health-ratio job.
///
/// The event payload is opaque and only logged.
///
/// # Errors
///
/// Returns the first backend or validation error; insufficient data is not
/// an error.
pub async fn handle(
    event: &serde_json::Value,
    context: &InvocationContext,
    config: &RunConfig,
    deps: &JobDependencies,
) -> AppResult<RunOutcome> {
    let span = info_span!("invocation", request_id = %context.request_id);
    async {
        debug!(%event, "Invocation event");
        info!(
            resource = %config.resource_id,
            window_seconds = config.window_seconds,
            mode = deps.mode.as_str(),
            "Starting health ratio run"
        );
        let job = HealthRatioJob::new(
            Arc::clone(&deps.backend),
            Arc::clone(&deps.clock),
            config,
            deps.mode,
        );
        job.run().await
    }
    .instrument(span)
    .await
}

/// Parses the command line and performs one invocation (or `check-config`).
///
/// # Errors
///
/// Returns configuration, validation, and backend errors unchanged.
pub fn run() -> AppResult<()> {
    let args = JobArgs::parse();
    crate::logger::init_logging(args.verbose);

    let result = match args.command {
        Some(Command::CheckConfig) => check_config(args.config.as_deref()),
        None => run_invocation(&args),
    };
    if let Err(err) = result.as_ref() {
        error!("Invocation failed: {}", err);
    }
    result
}

fn run_invocation(args: &JobArgs) -> AppResult<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    let event = read_event(args.event.as_deref())?;
    let context = InvocationContext::local(args.request_id.clone());
    let config = load_run_config(args.config.as_deref())?;

    runtime.block_on(invoke(args, &event, &context, &config))
}

async fn invoke(
    args: &JobArgs,
    event: &serde_json::Value,
    context: &InvocationContext,
    config: &RunConfig,
) -> AppResult<()> {
    let deps = build_dependencies(args, config).await?;
    handle(event, context, config, &deps).await?;
    Ok(())
}

fn load_run_config(path: Option<&Path>) -> AppResult<RunConfig> {
    let (_path, file) = load_config(path)?;
    resolve_config(file)
}

fn check_config(path: Option<&Path>) -> AppResult<()> {
    let (path, file) = load_config(path)?;
    let config = resolve_config(file)?;
    println!("config: {}", path.display());
    println!("load_balancer_name: {}", config.resource_id);
    println!("interval_seconds: {}", config.window_seconds);
    println!("metric_name: {}", config.output_metric_name);
    println!("custom_namespace: {}", config.output_namespace);
    println!(
        "source: {} {}={} ({} / {})",
        config.source.namespace,
        config.source.dimension_name,
        config.resource_id,
        config.source.success_metric,
        config.source.error_metric
    );
    println!("mock: {}", config.mock);
    println!("retry_attempts: {}", config.retry_attempts);
    Ok(())
}

fn read_event(path: Option<&Path>) -> AppResult<serde_json::Value> {
    let Some(path) = path else {
        return Ok(serde_json::Value::Null);
    };
    let content = std::fs::read_to_string(path).map_err(|err| {
        AppError::validation(ValidationError::ReadEvent {
            path: path.display().to_string(),
            source: err,
        })
    })?;
    Ok(serde_json::from_str(&content)?)
}

async fn build_dependencies(args: &JobArgs, config: &RunConfig) -> AppResult<JobDependencies> {
    let region = resolve_region(args.region.as_deref(), config.region.as_deref());
    let credentials = resolve_credentials(args, &region).await?;
    let settings = CloudWatchSettings {
        region,
        endpoint: args.endpoint.clone().or_else(|| config.endpoint.clone()),
        credentials,
        request_timeout: config.request_timeout,
    };
    let client = CloudWatchClient::new(settings)?;
    let backend: Arc<dyn MetricsBackend> = if config.retry_attempts > 0 {
        Arc::new(RetryingBackend::new(
            client,
            config.retry_attempts,
            config.retry_backoff,
        ))
    } else {
        Arc::new(client)
    };

    Ok(JobDependencies {
        backend,
        clock: Arc::new(SystemClock),
        mode: PublishMode::from_mock_flag(args.mock || config.mock),
    })
}

fn resolve_region(cli: Option<&str>, config: Option<&str>) -> String {
    cli.or(config)
        .map(str::to_owned)
        .or_else(|| std::env::var("AWS_DEFAULT_REGION").ok())
        .filter(|region| !region.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_REGION.to_owned())
}

/// Explicit keys win; otherwise the standard AWS provider chain (profile,
/// web identity, container and instance roles) is consulted.
async fn resolve_credentials(args: &JobArgs, region: &str) -> AppResult<AwsCredentials> {
    if let Some(credentials) = explicit_credentials(args)? {
        debug!("Using explicit AWS credentials");
        return Ok(credentials);
    }
    let chain = DefaultCredentialsChain::builder()
        .region(Region::new(region.to_owned()))
        .build()
        .await;
    provided_credentials(&chain).await
}

fn explicit_credentials(args: &JobArgs) -> AppResult<Option<AwsCredentials>> {
    let (access_key_id, secret_access_key) =
        match (args.access_key_id.clone(), args.secret_access_key.clone()) {
            (None, None) => return Ok(None),
            (Some(access_key_id), Some(secret_access_key)) => (access_key_id, secret_access_key),
            (None, Some(_)) => {
                return Err(AppError::validation(ValidationError::MissingCredential {
                    name: "AWS_ACCESS_KEY_ID",
                }));
            }
            (Some(_), None) => {
                return Err(AppError::validation(ValidationError::MissingCredential {
                    name: "AWS_SECRET_ACCESS_KEY",
                }));
            }
        };
    Ok(Some(AwsCredentials {
        access_key_id,
        secret_access_key,
        session_token: args.session_token.clone().filter(|token| !token.is_empty()),
    }))
}

async fn provided_credentials(provider: &impl ProvideCredentials) -> AppResult<AwsCredentials> {
    let credentials = provider
        .provide_credentials()
        .await
        .map_err(|err| AppError::backend(BackendError::Credentials { source: err }))?;
    Ok(AwsCredentials {
        access_key_id: credentials.access_key_id().to_owned(),
        secret_access_key: credentials.secret_access_key().to_owned(),
        session_token: credentials.session_token().map(str::to_owned),
    })
}
