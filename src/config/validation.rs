//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (amounts > 0, timeouts > 0)
//! - Check the endpoint URL and mint address parse
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: FunderConfig → Result<(), Vec<ValidationError>>

use solana_sdk::pubkey::Pubkey;
use std::str::FromStr;

use crate::config::schema::FunderConfig;

/// A single semantic problem with a configuration value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path of the offending field, e.g. `network.rpc_url`.
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}

/// Check a parsed configuration for semantic errors.
pub fn validate_config(config: &FunderConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    match url::Url::parse(&config.network.rpc_url) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => {}
        Ok(url) => errors.push(ValidationError::new(
            "network.rpc_url",
            format!("unsupported scheme '{}'", url.scheme()),
        )),
        Err(e) => errors.push(ValidationError::new(
            "network.rpc_url",
            format!("invalid URL '{}': {}", config.network.rpc_url, e),
        )),
    }

    if config.network.rpc_timeout_secs == 0 {
        errors.push(ValidationError::new("network.rpc_timeout_secs", "must be greater than 0"));
    }
    if config.network.confirm_timeout_secs == 0 {
        errors.push(ValidationError::new(
            "network.confirm_timeout_secs",
            "must be greater than 0",
        ));
    }
    if config.network.poll_interval_ms == 0 {
        errors.push(ValidationError::new("network.poll_interval_ms", "must be greater than 0"));
    }

    let airdrop = &config.airdrop;
    if !airdrop.threshold_sol.is_finite() || airdrop.threshold_sol < 0.0 {
        errors.push(ValidationError::new(
            "airdrop.threshold_sol",
            "must be a non-negative number",
        ));
    }
    if !airdrop.amount_sol.is_finite() || airdrop.amount_sol <= 0.0 {
        errors.push(ValidationError::new("airdrop.amount_sol", "must be a positive number"));
    }

    if config.keypairs.authority_secret_env.trim().is_empty() {
        errors.push(ValidationError::new("keypairs.authority_secret_env", "must not be empty"));
    }

    if let Err(e) = Pubkey::from_str(&config.token.mint_address) {
        errors.push(ValidationError::new(
            "token.mint_address",
            format!("invalid address '{}': {}", config.token.mint_address, e),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
