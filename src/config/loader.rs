//! Configuration loading from disk and environment.

use std::fs;
use std::path::Path;

use crate::config::schema::FunderConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Overrides `network.rpc_url`.
pub const RPC_URL_ENV_VAR: &str = "FUNDER_RPC_URL";
/// Overrides `network.commitment`.
pub const COMMITMENT_ENV_VAR: &str = "FUNDER_COMMITMENT";
/// Overrides `observability.log_level`.
pub const LOG_LEVEL_ENV_VAR: &str = "FUNDER_LOG_LEVEL";

/// Error type for configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Validation(Vec<ValidationError>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "Parse error: {}", e),
            ConfigError::Validation(errors) => {
                write!(f, "Validation failed: ")?;
                for (i, err) in errors.iter().enumerate() {
                    if i > 0 { write!(f, ", ")?; }
                    write!(f, "{}", err)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Parse a TOML file without semantic validation.
pub fn parse_config(path: &Path) -> Result<FunderConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(ConfigError::Io)?;
    toml::from_str(&content).map_err(ConfigError::Parse)
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<FunderConfig, ConfigError> {
    let config = parse_config(path)?;
    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Load the file if one is given (defaults otherwise), apply process
/// environment overrides, then validate.
pub fn load_with_env(path: Option<&Path>) -> Result<FunderConfig, ConfigError> {
    load_with_lookup(path, |name| std::env::var(name).ok())
}

/// Like [`load_with_env`], reading overrides through `lookup`.
///
/// Overrides are applied before validation, so a file value replaced by the
/// environment is never checked on its own.
pub fn load_with_lookup<F>(path: Option<&Path>, lookup: F) -> Result<FunderConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = match path {
        Some(path) => parse_config(path)?,
        None => FunderConfig::default(),
    };

    apply_overrides(&mut config, lookup)?;
    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Apply `FUNDER_*` overrides read through `lookup`.
pub fn apply_overrides<F>(config: &mut FunderConfig, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(url) = lookup(RPC_URL_ENV_VAR) {
        config.network.rpc_url = url;
    }

    if let Some(level) = lookup(COMMITMENT_ENV_VAR) {
        config.network.commitment = level.parse().map_err(|message| {
            ConfigError::Validation(vec![ValidationError {
                field: "network.commitment",
                message,
            }])
        })?;
    }

    if let Some(level) = lookup(LOG_LEVEL_ENV_VAR) {
        config.observability.log_level = level;
    }

    Ok(())
}
