//! Balance checks and conditional faucet airdrops.
//!
//! # Flow
//! ```text
//! request_airdrop_if_needed
//!     → check_balance (errors propagate)
//!     → balance >= threshold ? NotNeeded
//!     → request_airdrop (one attempt)
//!     → wait_for_confirmation (poll until confirmed / failed / deadline)
//!     → AirdropPolicy decides whether a failure is returned or propagated
//! ```

use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::{Keypair, Signature, Signer};
use std::time::Duration;
use tokio::time::{interval, timeout};

use crate::blockchain::client::RpcConnection;
use crate::blockchain::types::{
    lamports_to_sol, sol_to_lamports, AirdropOutcome, AirdropPolicy, Commitment,
    ConfirmationStatus, FundingError, FundingResult,
};
use crate::config::FunderConfig;
use crate::observability::metrics;

/// Parameters of the conditional airdrop.
#[derive(Debug, Clone, PartialEq)]
pub struct FundingSettings {
    /// Airdrop when the balance is strictly below this many SOL.
    pub threshold_sol: f64,
    /// Amount requested from the faucet.
    pub airdrop_lamports: u64,
    pub policy: AirdropPolicy,
    /// Commitment the airdrop must reach.
    pub commitment: Commitment,
    pub confirm_timeout: Duration,
    pub poll_interval: Duration,
}

impl Default for FundingSettings {
    fn default() -> Self {
        Self::from(&FunderConfig::default())
    }
}

impl From<&FunderConfig> for FundingSettings {
    fn from(config: &FunderConfig) -> Self {
        Self {
            threshold_sol: config.airdrop.threshold_sol,
            airdrop_lamports: sol_to_lamports(config.airdrop.amount_sol),
            policy: config.airdrop.policy,
            commitment: config.network.commitment,
            confirm_timeout: Duration::from_secs(config.network.confirm_timeout_secs),
            poll_interval: Duration::from_millis(config.network.poll_interval_ms),
        }
    }
}

/// Balance and airdrop operations over an injected connection.
#[derive(Debug, Clone)]
pub struct FundingHelper<C> {
    connection: C,
    settings: FundingSettings,
}

impl<C: RpcConnection> FundingHelper<C> {
    pub fn new(connection: C, settings: FundingSettings) -> Self {
        Self {
            connection,
            settings,
        }
    }

    /// Build a helper from a validated configuration.
    pub fn from_config(connection: C, config: &FunderConfig) -> Self {
        Self::new(connection, FundingSettings::from(config))
    }

    /// Override how airdrop failures are reported.
    pub fn with_policy(mut self, policy: AirdropPolicy) -> Self {
        self.settings.policy = policy;
        self
    }

    pub fn settings(&self) -> &FundingSettings {
        &self.settings
    }

    pub fn connection(&self) -> &C {
        &self.connection
    }

    /// Balance of the keypair's account in SOL.
    pub async fn check_balance(&self, keypair: &Keypair) -> FundingResult<f64> {
        let pubkey = keypair.pubkey();
        let lamports = self.connection.get_balance(&pubkey).await?;
        let balance = lamports_to_sol(lamports);

        tracing::info!(pubkey = %pubkey, lamports, balance_sol = balance, "Balance checked");
        metrics::record_balance(balance);

        Ok(balance)
    }

    /// Request an airdrop if the balance is below the threshold.
    ///
    /// Balance query failures always propagate. Airdrop failures propagate
    /// only under [`AirdropPolicy::Strict`]; otherwise they are returned as
    /// [`AirdropOutcome::Failed`].
    pub async fn request_airdrop_if_needed(&self, keypair: &Keypair) -> FundingResult<AirdropOutcome> {
        let balance = self.check_balance(keypair).await?;

        if balance >= self.settings.threshold_sol {
            tracing::info!(
                balance_sol = balance,
                threshold_sol = self.settings.threshold_sol,
                "Enough funds, skipping airdrop"
            );
            metrics::record_airdrop(metrics::OUTCOME_NOT_NEEDED);
            return Ok(AirdropOutcome::NotNeeded { balance });
        }

        let pubkey = keypair.pubkey();
        tracing::info!(
            pubkey = %pubkey,
            balance_sol = balance,
            lamports = self.settings.airdrop_lamports,
            "Insufficient funds, requesting airdrop"
        );

        match self.airdrop(&pubkey).await {
            Ok(signature) => {
                tracing::info!(pubkey = %pubkey, signature = %signature, "Airdrop confirmed");
                metrics::record_airdrop(metrics::OUTCOME_FUNDED);
                Ok(AirdropOutcome::Funded {
                    signature,
                    balance_before: balance,
                })
            }
            Err(e) => {
                metrics::record_airdrop(metrics::OUTCOME_FAILED);
                match self.settings.policy {
                    AirdropPolicy::BestEffort => {
                        tracing::warn!(pubkey = %pubkey, error = %e, "Airdrop request failed");
                        Ok(AirdropOutcome::Failed {
                            balance_before: balance,
                            reason: e.to_string(),
                        })
                    }
                    AirdropPolicy::Strict => Err(FundingError::AirdropFailed(e.to_string())),
                }
            }
        }
    }

    async fn airdrop(&self, pubkey: &Pubkey) -> FundingResult<Signature> {
        let signature = self
            .connection
            .request_airdrop(pubkey, self.settings.airdrop_lamports)
            .await?;
        tracing::debug!(signature = %signature, "Airdrop submitted");

        self.wait_for_confirmation(&signature).await?;
        Ok(signature)
    }

    /// Wait for a signature to reach the configured commitment.
    pub async fn wait_for_confirmation(&self, signature: &Signature) -> FundingResult<()> {
        let commitment = self.settings.commitment;

        let result = timeout(self.settings.confirm_timeout, async {
            let mut ticker = interval(self.settings.poll_interval);

            loop {
                ticker.tick().await;

                match self.connection.signature_status(signature, commitment).await? {
                    ConfirmationStatus::Pending => {
                        tracing::debug!(signature = %signature, commitment = %commitment, "Airdrop pending");
                    }
                    ConfirmationStatus::Confirmed => return Ok(()),
                    ConfirmationStatus::Failed(reason) => {
                        return Err(FundingError::AirdropRejected(reason));
                    }
                }
            }
        })
        .await;

        match result {
            Ok(status) => status,
            Err(_) => Err(FundingError::ConfirmationTimeout(
                self.settings.confirm_timeout.as_millis() as u64,
            )),
        }
    }
}
