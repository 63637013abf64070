//! Keypair acquisition.
//!
//! # Sources
//! - Base58 secret from an environment variable (falls back to generation)
//! - JSON byte-array file, as written by `solana-keygen`
//! - Fresh random generation
//!
//! # Security
//! - Secret material is never logged or written to disk
//! - Generated keypairs are handed to the caller, who decides whether to keep them

use solana_sdk::signature::{keypair_from_seed, Keypair, Signer};
use std::fs;
use std::path::Path;

use crate::blockchain::types::{FundingError, FundingResult};

/// Environment variable holding the base58-encoded authority secret.
pub const AUTHORITY_SECRET_ENV_VAR: &str = "MINT_AUTHORITY_SECRET";

/// Length of a raw keypair: 32-byte secret followed by the 32-byte public key.
pub const KEYPAIR_LENGTH: usize = 64;

const SECRET_LENGTH: usize = 32;

/// Why a keypair was generated instead of decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FallbackReason {
    /// No secret was supplied, or it was blank.
    SecretMissing,
    /// A secret was supplied but could not be turned into a keypair.
    SecretInvalid(String),
}

/// Where an authority keypair came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeypairSource {
    Environment,
    Generated(FallbackReason),
}

impl KeypairSource {
    pub fn is_fallback(&self) -> bool {
        matches!(self, KeypairSource::Generated(_))
    }
}

/// A keypair together with the path taken to obtain it.
#[derive(Debug)]
pub struct KeypairAcquisition {
    pub keypair: Keypair,
    pub source: KeypairSource,
}

/// Build a keypair from raw secret bytes.
///
/// Exactly [`KEYPAIR_LENGTH`] bytes are accepted, and the public half must
/// match the one derived from the secret half.
pub fn keypair_from_bytes(bytes: &[u8]) -> FundingResult<Keypair> {
    if bytes.len() != KEYPAIR_LENGTH {
        return Err(FundingError::InvalidKeypair(format!(
            "expected {} bytes, got {}",
            KEYPAIR_LENGTH,
            bytes.len()
        )));
    }

    let (secret, public) = bytes.split_at(SECRET_LENGTH);
    let keypair =
        keypair_from_seed(secret).map_err(|e| FundingError::InvalidKeypair(e.to_string()))?;
    if keypair.pubkey().to_bytes().as_slice() != public {
        return Err(FundingError::InvalidKeypair(
            "public key does not match secret key".to_string(),
        ));
    }

    Ok(keypair)
}

/// Decode a base58 secret string into a keypair.
pub fn keypair_from_base58(secret: &str) -> FundingResult<Keypair> {
    let bytes = bs58::decode(secret.trim())
        .into_vec()
        .map_err(|e| FundingError::InvalidKeypair(format!("invalid base58 secret: {}", e)))?;
    keypair_from_bytes(&bytes)
}

/// Acquire the authority keypair from an optional encoded secret.
///
/// Never fails: a missing, blank or undecodable secret results in a freshly
/// generated keypair, and the returned [`KeypairSource`] says which happened.
pub fn get_authority_keypair(secret: Option<&str>) -> KeypairAcquisition {
    let secret = secret.map(str::trim).filter(|s| !s.is_empty());

    let reason = match secret {
        Some(secret) => match keypair_from_base58(secret) {
            Ok(keypair) => {
                tracing::info!(pubkey = %keypair.pubkey(), "Loaded authority keypair from environment");
                return KeypairAcquisition {
                    keypair,
                    source: KeypairSource::Environment,
                };
            }
            Err(e) => {
                tracing::warn!(error = %e, "Invalid authority secret, generating new keypair");
                FallbackReason::SecretInvalid(e.to_string())
            }
        },
        None => FallbackReason::SecretMissing,
    };

    let keypair = Keypair::new();
    tracing::info!(
        pubkey = %keypair.pubkey(),
        reason = ?reason,
        "Generated new authority keypair"
    );

    KeypairAcquisition {
        keypair,
        source: KeypairSource::Generated(reason),
    }
}

/// Acquire the authority keypair from the named environment variable.
pub fn authority_keypair_from_env(var_name: &str) -> KeypairAcquisition {
    let secret = std::env::var(var_name).ok();
    get_authority_keypair(secret.as_deref())
}

/// Load a keypair from a JSON file containing the raw secret as a byte array.
pub fn load_keypair_from_file(path: impl AsRef<Path>) -> FundingResult<Keypair> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| FundingError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let bytes: Vec<u8> = serde_json::from_str(&content).map_err(|source| FundingError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    let keypair = keypair_from_bytes(&bytes)?;
    tracing::debug!(path = %path.display(), pubkey = %keypair.pubkey(), "Loaded keypair from file");
    Ok(keypair)
}
