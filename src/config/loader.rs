use std::path::{Path, PathBuf};

use crate::error::{AppError, AppResult, ConfigError};

use super::types::ConfigFile;

/// Config filenames checked in the working directory when no path is given.
///
/// `config.yaml` keeps existing deployments of the job loadable unchanged.
pub const DEFAULT_CONFIG_FILES: [&str; 4] = [
    "healthratio.toml",
    "healthratio.json",
    "healthratio.yaml",
    "config.yaml",
];

/// Loads the configuration file from the provided path or the default locations.
///
/// Returns the path that was read alongside the parsed file.
///
/// # Errors
///
/// Returns an error when no config file exists or it cannot be read or parsed.
pub fn load_config(path: Option<&Path>) -> AppResult<(PathBuf, ConfigFile)> {
    if let Some(path) = path {
        return Ok((path.to_path_buf(), load_config_file(path)?));
    }

    for candidate in DEFAULT_CONFIG_FILES {
        let candidate = PathBuf::from(candidate);
        if candidate.exists() {
            let config = load_config_file(&candidate)?;
            return Ok((candidate, config));
        }
    }

    Err(AppError::config(ConfigError::NotFound {
        candidates: DEFAULT_CONFIG_FILES.join(", "),
    }))
}

pub(crate) fn load_config_file(path: &Path) -> AppResult<ConfigFile> {
    let content = std::fs::read_to_string(path).map_err(|err| {
        AppError::config(ConfigError::ReadConfig {
            path: path.to_path_buf(),
            source: err,
        })
    })?;
    let config: ConfigFile = match path.extension().and_then(|ext| ext.to_str()) {
        Some("toml") => toml::from_str(&content).map_err(|err| {
            AppError::config(ConfigError::ParseToml {
                path: path.to_path_buf(),
                source: err,
            })
        })?,
        Some("json") => serde_json::from_str(&content).map_err(|err| {
            AppError::config(ConfigError::ParseJson {
                path: path.to_path_buf(),
                source: err,
            })
        })?,
        Some("yaml" | "yml") => serde_yaml::from_str(&content).map_err(|err| {
            AppError::config(ConfigError::ParseYaml {
                path: path.to_path_buf(),
                source: err,
            })
        })?,
        Some(ext) => {
            return Err(AppError::config(ConfigError::UnsupportedExtension {
                ext: ext.to_owned(),
            }));
        }
        None => return Err(AppError::config(ConfigError::MissingExtension)),
    };
    tracing::info!("Loaded config from {}: {:?}", path.display(), config);
    Ok(config)
}
