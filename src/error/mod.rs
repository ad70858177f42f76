mod app;
mod backend;
mod config;
mod validation;

#[cfg(test)]
mod test_support;

pub use app::{AppError, AppResult};
pub use backend::BackendError;
pub use config::ConfigError;
pub use validation::ValidationError;
