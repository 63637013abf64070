//! Chain-specific types and error definitions.

use serde::{Deserialize, Serialize};
use solana_sdk::commitment_config::CommitmentConfig;
use solana_sdk::native_token::LAMPORTS_PER_SOL;
use solana_sdk::signature::Signature;
use std::path::PathBuf;
use thiserror::Error;

pub use solana_sdk::native_token::lamports_to_sol;

/// Errors that can occur during funding operations.
#[derive(Debug, Error)]
pub enum FundingError {
    /// Keypair file missing or unreadable.
    #[error("Failed to read keypair file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Keypair file is not a JSON array of byte values.
    #[error("Malformed keypair file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Secret bytes do not describe a valid ed25519 keypair.
    #[error("Invalid keypair: {0}")]
    InvalidKeypair(String),

    /// RPC connection or request failed.
    #[error("RPC error: {0}")]
    Rpc(String),

    /// Airdrop signature did not reach the requested commitment in time (milliseconds).
    #[error("Airdrop not confirmed after {0} ms")]
    ConfirmationTimeout(u64),

    /// The network reported the airdrop transaction as failed.
    #[error("Airdrop rejected: {0}")]
    AirdropRejected(String),

    /// Airdrop failed under the strict policy.
    #[error("Airdrop failed: {0}")]
    AirdropFailed(String),
}

/// Result type for funding operations.
pub type FundingResult<T> = Result<T, FundingError>;

/// Finality level requested for queries and confirmations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Commitment {
    Processed,
    #[default]
    Confirmed,
    Finalized,
}

impl Commitment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Commitment::Processed => "processed",
            Commitment::Confirmed => "confirmed",
            Commitment::Finalized => "finalized",
        }
    }
}

impl std::fmt::Display for Commitment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Commitment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "processed" => Ok(Commitment::Processed),
            "confirmed" => Ok(Commitment::Confirmed),
            "finalized" => Ok(Commitment::Finalized),
            other => Err(format!("unknown commitment level '{}'", other)),
        }
    }
}

impl From<Commitment> for CommitmentConfig {
    fn from(commitment: Commitment) -> Self {
        match commitment {
            Commitment::Processed => CommitmentConfig::processed(),
            Commitment::Confirmed => CommitmentConfig::confirmed(),
            Commitment::Finalized => CommitmentConfig::finalized(),
        }
    }
}

/// Result of a single signature status poll.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmationStatus {
    /// Not yet visible at the requested commitment.
    Pending,
    /// Reached the requested commitment without error.
    Confirmed,
    /// Landed with a transaction error.
    Failed(String),
}

/// How airdrop failures are reported to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AirdropPolicy {
    /// Failures are logged and returned as [`AirdropOutcome::Failed`].
    #[default]
    BestEffort,
    /// Failures propagate as [`FundingError::AirdropFailed`].
    Strict,
}

/// What `request_airdrop_if_needed` did.
#[derive(Debug, Clone, PartialEq)]
pub enum AirdropOutcome {
    /// Balance already at or above the threshold.
    NotNeeded { balance: f64 },
    /// Airdrop requested and confirmed.
    Funded {
        signature: Signature,
        balance_before: f64,
    },
    /// Airdrop was attempted and failed (best-effort policy only).
    Failed { balance_before: f64, reason: String },
}

impl AirdropOutcome {
    pub fn is_failed(&self) -> bool {
        matches!(self, AirdropOutcome::Failed { .. })
    }
}

/// Convert a SOL amount into lamports, rounding to the nearest lamport.
///
/// Decimal amounts such as 1.001 are not exact in binary, so truncation
/// would land one lamport short.
pub fn sol_to_lamports(sol: f64) -> u64 {
    (sol * LAMPORTS_PER_SOL as f64).round() as u64
}
