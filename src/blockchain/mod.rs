//! Blockchain integration subsystem.
//!
//! # Data Flow
//! ```text
//! Environment variable / keypair file
//!     → wallet.rs (keypair acquisition, fallback to generation)
//!     → client.rs (RpcConnection over the Solana RPC client)
//!     → funding.rs (balance check, conditional airdrop, confirmation wait)
//! ```
//!
//! # Security Constraints
//! - Secrets are never logged; only public keys are
//! - Generated keypairs are never written to disk

pub mod client;
pub mod funding;
pub mod types;
pub mod wallet;

pub use client::{RpcConnection, SolanaRpc};
pub use funding::{FundingHelper, FundingSettings};
pub use types::{
    AirdropOutcome, AirdropPolicy, Commitment, ConfirmationStatus, FundingError, FundingResult,
};
pub use wallet::{
    authority_keypair_from_env, get_authority_keypair, load_keypair_from_file, FallbackReason,
    KeypairAcquisition, KeypairSource,
};
