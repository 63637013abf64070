//! `devnet-funder` command line.
//!
//! ```text
//! devnet-funder [--config funder.toml] authority
//! devnet-funder balance [--keypair user_keypair.json | --authority]
//! devnet-funder airdrop [--keypair user_keypair.json | --authority] [--strict]
//! devnet-funder token
//! ```

use clap::{Parser, Subcommand};
use solana_sdk::signature::Signer;
use std::path::PathBuf;

use devnet_funder::blockchain::{
    authority_keypair_from_env, load_keypair_from_file, AirdropOutcome, AirdropPolicy,
    FundingHelper, KeypairSource, SolanaRpc,
};
use devnet_funder::config::{load_with_env, FunderConfig};
use devnet_funder::observability::init_logging;

#[derive(Parser)]
#[command(name = "devnet-funder")]
#[command(about = "Keypair, balance and airdrop helper for the Solana test network", long_about = None)]
struct Cli {
    /// TOML configuration file (defaults to public devnet settings)
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Acquire the authority keypair from the environment and show where it came from
    Authority,
    /// Show the SOL balance of a keypair
    Balance {
        /// Keypair file (defaults to the configured user keypair)
        #[arg(short, long)]
        keypair: Option<PathBuf>,
        /// Use the configured mint authority keypair file
        #[arg(long, conflicts_with = "keypair")]
        authority: bool,
    },
    /// Request an airdrop if the balance is below the threshold
    Airdrop {
        /// Keypair file (defaults to the configured user keypair)
        #[arg(short, long)]
        keypair: Option<PathBuf>,
        /// Use the configured mint authority keypair file
        #[arg(long, conflicts_with = "keypair")]
        authority: bool,
        /// Fail with a non-zero exit status if the airdrop fails
        #[arg(long)]
        strict: bool,
    },
    /// Show the configured token metadata
    Token,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = load_with_env(cli.config.as_deref())?;
    init_logging(&config.observability)?;

    tracing::debug!(
        rpc_url = %config.network.rpc_url,
        commitment = %config.network.commitment,
        "Configuration loaded"
    );

    match cli.command {
        Commands::Authority => {
            let acquired = authority_keypair_from_env(&config.keypairs.authority_secret_env);
            let source = match &acquired.source {
                KeypairSource::Environment => "environment".to_string(),
                KeypairSource::Generated(reason) => format!("generated ({:?})", reason),
            };
            println!("{} [{}]", acquired.keypair.pubkey(), source);
        }
        Commands::Balance { keypair, authority } => {
            let keypair = load_keypair_from_file(keypair_path(&config, keypair, authority))?;
            let helper = FundingHelper::from_config(SolanaRpc::new(&config.network), &config);
            let balance = helper.check_balance(&keypair).await?;
            println!("{} SOL", balance);
        }
        Commands::Airdrop { keypair, authority, strict } => {
            let keypair = load_keypair_from_file(keypair_path(&config, keypair, authority))?;
            let mut helper = FundingHelper::from_config(SolanaRpc::new(&config.network), &config);
            if strict {
                helper = helper.with_policy(AirdropPolicy::Strict);
            }

            match helper.request_airdrop_if_needed(&keypair).await? {
                AirdropOutcome::NotNeeded { balance } => {
                    println!("Balance {} SOL is enough, no airdrop needed", balance);
                }
                AirdropOutcome::Funded { signature, balance_before } => {
                    println!(
                        "Airdrop to {} confirmed (balance before: {} SOL): {}",
                        keypair.pubkey(),
                        balance_before,
                        signature
                    );
                }
                AirdropOutcome::Failed { balance_before, reason } => {
                    eprintln!(
                        "Airdrop to {} failed (balance: {} SOL): {}",
                        keypair.pubkey(),
                        balance_before,
                        reason
                    );
                }
            }
        }
        Commands::Token => {
            println!("{}", serde_json::to_string_pretty(&config.token)?);
        }
    }

    Ok(())
}

fn keypair_path(config: &FunderConfig, explicit: Option<PathBuf>, authority: bool) -> PathBuf {
    match explicit {
        Some(path) => path,
        None if authority => config.keypairs.mint_authority_path.clone(),
        None => config.keypairs.user_path.clone(),
    }
}
