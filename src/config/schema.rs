//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the funder.
//! All types derive Serde traits for deserialization from config files, and
//! every field has a default so an empty file is a valid devnet setup.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::blockchain::types::{AirdropPolicy, Commitment};
use crate::blockchain::wallet::AUTHORITY_SECRET_ENV_VAR;

/// Public devnet RPC endpoint.
pub const DEVNET_RPC_URL: &str = "https://api.devnet.solana.com";

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct FunderConfig {
    /// RPC endpoint and finality settings.
    pub network: NetworkConfig,

    /// Keypair file locations and the authority secret variable.
    pub keypairs: KeypairConfig,

    /// Conditional airdrop settings.
    pub airdrop: AirdropConfig,

    /// Token metadata surfaced for reuse.
    pub token: TokenConfig,

    /// Logging settings.
    pub observability: ObservabilityConfig,
}

/// Network endpoint configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct NetworkConfig {
    /// JSON-RPC endpoint URL.
    pub rpc_url: String,

    /// Commitment used for queries and airdrop confirmation.
    pub commitment: Commitment,

    /// RPC request timeout in seconds.
    pub rpc_timeout_secs: u64,

    /// Maximum time to wait for an airdrop to be confirmed.
    pub confirm_timeout_secs: u64,

    /// Interval between signature status polls.
    pub poll_interval_ms: u64,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            rpc_url: DEVNET_RPC_URL.to_string(),
            commitment: Commitment::Confirmed,
            rpc_timeout_secs: 30,
            confirm_timeout_secs: 60,
            poll_interval_ms: 500,
        }
    }
}

/// Keypair locations.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct KeypairConfig {
    /// JSON keypair file of the mint authority.
    pub mint_authority_path: PathBuf,

    /// JSON keypair file of the user account.
    pub user_path: PathBuf,

    /// Environment variable holding a base58 authority secret.
    pub authority_secret_env: String,
}

impl Default for KeypairConfig {
    fn default() -> Self {
        Self {
            mint_authority_path: PathBuf::from("./mint_authority.json"),
            user_path: PathBuf::from("./user_keypair.json"),
            authority_secret_env: AUTHORITY_SECRET_ENV_VAR.to_string(),
        }
    }
}

/// Conditional airdrop configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AirdropConfig {
    /// Request an airdrop when the balance is below this many SOL.
    pub threshold_sol: f64,

    /// Amount to request, in SOL.
    pub amount_sol: f64,

    /// Whether airdrop failures are swallowed or propagated.
    pub policy: AirdropPolicy,
}

impl Default for AirdropConfig {
    fn default() -> Self {
        Self {
            threshold_sol: 1.0,
            amount_sol: 1.0,
            policy: AirdropPolicy::BestEffort,
        }
    }
}

/// Token metadata record and mint address.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct TokenConfig {
    pub name: String,
    pub symbol: String,
    /// Content-addressed metadata location.
    pub uri: String,
    /// Base58 address of the token mint.
    pub mint_address: String,
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            name: "Nova".to_string(),
            symbol: "NVA".to_string(),
            uri: "https://red-rainy-koi-23.mypinata.cloud/ipfs/bafkreiat3atebtv7budwci77eul3hjjikptqxrh7z3tzqjzllrfhdiyvai".to_string(),
            mint_address: "AYcQZZoTx9rPMNeRDJwhUF7aK7ZMCRhpbZoLcjW4bTtH".to_string(),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Default filter directive when `RUST_LOG` is unset.
    pub log_level: String,

    /// Emit JSON log lines instead of human-readable ones.
    pub json_logs: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json_logs: false,
        }
    }
}
