//! Solana RPC connection.
//!
//! # Responsibilities
//! - Define the `RpcConnection` seam the funding helper is written against
//! - Implement it over the SDK's nonblocking `RpcClient`
//! - Map SDK errors into `FundingError::Rpc`

use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::commitment_config::CommitmentConfig;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::Signature;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use crate::blockchain::types::{Commitment, ConfirmationStatus, FundingError, FundingResult};
use crate::config::NetworkConfig;

/// The network operations the funding helper needs.
///
/// Implemented by [`SolanaRpc`] for real endpoints and by in-memory mocks in tests.
pub trait RpcConnection: Send + Sync {
    /// Raw balance of `pubkey` in lamports.
    fn get_balance(&self, pubkey: &Pubkey) -> impl Future<Output = FundingResult<u64>> + Send;

    /// Ask the faucet to credit `pubkey` with `lamports`.
    fn request_airdrop(
        &self,
        pubkey: &Pubkey,
        lamports: u64,
    ) -> impl Future<Output = FundingResult<Signature>> + Send;

    /// Poll the status of `signature` once at the given commitment.
    fn signature_status(
        &self,
        signature: &Signature,
        commitment: Commitment,
    ) -> impl Future<Output = FundingResult<ConfirmationStatus>> + Send;
}

/// RPC connection backed by `solana_client`.
#[derive(Clone)]
pub struct SolanaRpc {
    client: Arc<RpcClient>,
    rpc_url: String,
    commitment: Commitment,
}

impl SolanaRpc {
    /// Create a client for the configured endpoint.
    ///
    /// No request is made until the first call.
    pub fn new(config: &NetworkConfig) -> Self {
        let client = RpcClient::new_with_timeout_and_commitment(
            config.rpc_url.clone(),
            Duration::from_secs(config.rpc_timeout_secs),
            config.commitment.into(),
        );

        tracing::debug!(
            rpc_url = %config.rpc_url,
            commitment = %config.commitment,
            "Solana RPC client created"
        );

        Self {
            client: Arc::new(client),
            rpc_url: config.rpc_url.clone(),
            commitment: config.commitment,
        }
    }

    /// The endpoint this client talks to.
    pub fn url(&self) -> &str {
        &self.rpc_url
    }

    /// Commitment used for balance queries.
    pub fn commitment(&self) -> Commitment {
        self.commitment
    }
}

impl RpcConnection for SolanaRpc {
    async fn get_balance(&self, pubkey: &Pubkey) -> FundingResult<u64> {
        self.client
            .get_balance_with_commitment(pubkey, self.commitment.into())
            .await
            .map(|response| response.value)
            .map_err(|e| FundingError::Rpc(format!("getBalance for {} failed: {}", pubkey, e)))
    }

    async fn request_airdrop(&self, pubkey: &Pubkey, lamports: u64) -> FundingResult<Signature> {
        self.client
            .request_airdrop(pubkey, lamports)
            .await
            .map_err(|e| FundingError::Rpc(format!("requestAirdrop for {} failed: {}", pubkey, e)))
    }

    async fn signature_status(
        &self,
        signature: &Signature,
        commitment: Commitment,
    ) -> FundingResult<ConfirmationStatus> {
        let status = self
            .client
            .get_signature_status_with_commitment(signature, CommitmentConfig::from(commitment))
            .await
            .map_err(|e| FundingError::Rpc(format!("getSignatureStatuses failed: {}", e)))?;

        Ok(match status {
            None => ConfirmationStatus::Pending,
            Some(Ok(())) => ConfirmationStatus::Confirmed,
            Some(Err(e)) => ConfirmationStatus::Failed(e.to_string()),
        })
    }
}

impl std::fmt::Debug for SolanaRpc {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SolanaRpc")
            .field("rpc_url", &self.rpc_url)
            .field("commitment", &self.commitment)
            .finish()
    }
}
