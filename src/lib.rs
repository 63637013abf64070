//! Solana test-network funding helper.
//!
//! Loads or generates a signing keypair, checks an account's balance, and
//! requests faucet funds when the balance is below a threshold.

pub mod blockchain;
pub mod config;
pub mod observability;

pub use blockchain::{FundingError, FundingHelper, RpcConnection, SolanaRpc};
pub use config::FunderConfig;
