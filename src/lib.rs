//! Core library for the `healthratio` job.
//!
//! One invocation reads two load balancer counters (backend 2XX and 5XX
//! responses) summed over a trailing window, derives the success ratio
//! `2XX / (2XX + 5XX)`, and republishes it as a custom metric. Windows with
//! fewer than one response are skipped rather than published.
//!
//! The pipeline lives in [`application`] and talks to the metrics backend
//! only through [`application::MetricsBackend`]; [`adapters`] provides the
//! CloudWatch implementation.
pub mod adapters;
pub mod application;
pub mod args;
pub mod config;
pub mod domain;
pub mod entry;
pub mod error;
pub mod logger;
