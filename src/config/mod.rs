//! Configuration loading and validation.
mod loader;
mod parse;
mod resolve;
pub mod types;

#[cfg(test)]
pub(crate) mod test_support;

pub use loader::{DEFAULT_CONFIG_FILES, load_config};
pub use resolve::resolve_config;
pub use types::{ConfigFile, CounterSource, RunConfig};

#[cfg(test)]
pub(crate) use loader::load_config_file;
pub(crate) use parse::parse_duration_value;
