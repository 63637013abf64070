//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize, FUNDER_* env overrides)
//!     → validation.rs (semantic checks)
//!     → FunderConfig (validated, immutable)
//!     → passed by reference to FundingHelper / SolanaRpc
//! ```
//!
//! # Design Decisions
//! - All fields have defaults; an absent file means public devnet settings
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, load_with_env, load_with_lookup, parse_config, ConfigError};
pub use schema::{
    AirdropConfig, FunderConfig, KeypairConfig, NetworkConfig, ObservabilityConfig, TokenConfig,
};
