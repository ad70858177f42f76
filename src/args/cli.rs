use std::path::PathBuf;

use clap::{Parser, Subcommand};
use reqwest::Url;

use super::parsers::parse_truthy_env;

#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Load and validate the config, print the resolved settings, and exit
    CheckConfig,
}

#[derive(Debug, Parser, Clone)]
#[clap(
    version,
    about = "Publishes a load balancer's backend success ratio (2XX / (2XX + 5XX)) over a trailing window as a custom CloudWatch metric."
)]
pub struct JobArgs {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Config file (.toml, .json or .yaml); defaults to healthratio.{toml,json,yaml} or config.yaml
    #[arg(long, short = 'c', global = true)]
    pub config: Option<PathBuf>,

    /// JSON event payload passed to the invocation
    #[arg(long = "event")]
    pub event: Option<PathBuf>,

    /// Invocation id used in logs (generated when omitted)
    #[arg(long = "request-id")]
    pub request_id: Option<String>,

    /// Compute and log the ratio without publishing it
    #[arg(long = "mock", env = "MOCK", value_parser = parse_truthy_env)]
    pub mock: bool,

    /// Enable debug logging
    #[arg(long, short)]
    pub verbose: bool,

    /// Backend region (overrides the config file)
    #[arg(long, env = "AWS_REGION")]
    pub region: Option<String>,

    /// Backend endpoint URL (overrides the config file)
    #[arg(long)]
    pub endpoint: Option<Url>,

    /// AWS access key id used for request signing
    #[arg(long = "aws-access-key-id", env = "AWS_ACCESS_KEY_ID", hide_env_values = true)]
    pub access_key_id: Option<String>,

    /// AWS secret access key used for request signing
    #[arg(
        long = "aws-secret-access-key",
        env = "AWS_SECRET_ACCESS_KEY",
        hide_env_values = true
    )]
    pub secret_access_key: Option<String>,

    /// AWS session token for temporary credentials
    #[arg(long = "aws-session-token", env = "AWS_SESSION_TOKEN", hide_env_values = true)]
    pub session_token: Option<String>,
}
