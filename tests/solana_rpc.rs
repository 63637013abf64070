//! `SolanaRpc` against a scripted JSON-RPC endpoint.

use serde_json::{json, Value};
use solana_sdk::signature::{Keypair, Signature, Signer};

use devnet_funder::blockchain::{
    AirdropOutcome, AirdropPolicy, FundingError, FundingHelper, SolanaRpc,
};
use devnet_funder::config::{FunderConfig, NetworkConfig};

mod common;

const AIRDROP_SIGNATURE: [u8; 64] = [9u8; 64];

fn config_for(addr: std::net::SocketAddr) -> FunderConfig {
    let mut config = FunderConfig::default();
    config.network = NetworkConfig {
        rpc_url: format!("http://{}", addr),
        rpc_timeout_secs: 5,
        confirm_timeout_secs: 5,
        poll_interval_ms: 20,
        ..NetworkConfig::default()
    };
    config
}

fn balance_result(lamports: u64) -> Value {
    json!({ "context": { "slot": 1 }, "value": lamports })
}

fn confirmed_status() -> Value {
    json!({
        "context": { "slot": 2 },
        "value": [{
            "slot": 2,
            "confirmations": null,
            "status": { "Ok": null },
            "err": null,
            "confirmationStatus": "confirmed"
        }]
    })
}

fn common_method(method: &str) -> Option<Value> {
    match method {
        "getVersion" => Some(json!({ "solana-core": "2.2.0", "feature-set": 1 })),
        _ => None,
    }
}

#[tokio::test]
async fn test_check_balance_over_http() {
    let (addr, log) = common::start_rpc_responder(|method, _params| match method {
        "getBalance" => Ok(balance_result(1_500_000_000)),
        other => common_method(other).ok_or((-32601, format!("unexpected {}", other))),
    })
    .await;

    let config = config_for(addr);
    let helper = FundingHelper::from_config(SolanaRpc::new(&config.network), &config);

    let balance = helper.check_balance(&Keypair::new()).await.unwrap();
    assert_eq!(balance, 1.5);
    assert!(log.lock().unwrap().contains(&"getBalance".to_string()));
}

#[tokio::test]
async fn test_airdrop_confirmed_over_http() {
    let keypair = Keypair::new();
    let expected_pubkey = keypair.pubkey().to_string();
    let signature = Signature::from(AIRDROP_SIGNATURE);
    let signature_str = signature.to_string();

    let (addr, log) = common::start_rpc_responder(move |method, params| match method {
        "getBalance" => Ok(balance_result(0)),
        "requestAirdrop" => {
            assert_eq!(params[0], json!(expected_pubkey));
            assert_eq!(params[1], json!(1_000_000_000u64));
            Ok(json!(signature_str))
        }
        "getSignatureStatuses" => Ok(confirmed_status()),
        other => common_method(other).ok_or((-32601, format!("unexpected {}", other))),
    })
    .await;

    let config = config_for(addr);
    let helper = FundingHelper::from_config(SolanaRpc::new(&config.network), &config);

    let outcome = helper.request_airdrop_if_needed(&keypair).await.unwrap();
    assert_eq!(
        outcome,
        AirdropOutcome::Funded {
            signature,
            balance_before: 0.0
        }
    );

    let methods = log.lock().unwrap().clone();
    assert_eq!(methods.iter().filter(|m| *m == "requestAirdrop").count(), 1);
    assert!(methods.contains(&"getSignatureStatuses".to_string()));
}

#[tokio::test]
async fn test_faucet_error_over_http() {
    let (addr, log) = common::start_rpc_responder(|method, _params| match method {
        "getBalance" => Ok(balance_result(100)),
        "requestAirdrop" => Err((429, "airdrop limit reached".to_string())),
        other => common_method(other).ok_or((-32601, format!("unexpected {}", other))),
    })
    .await;

    let config = config_for(addr);
    let helper = FundingHelper::from_config(SolanaRpc::new(&config.network), &config);

    let outcome = helper.request_airdrop_if_needed(&Keypair::new()).await.unwrap();
    match outcome {
        AirdropOutcome::Failed { balance_before, reason } => {
            assert_eq!(balance_before, 1e-7);
            assert!(reason.contains("requestAirdrop"));
        }
        other => panic!("expected failed outcome, got {:?}", other),
    }

    let strict = helper.with_policy(AirdropPolicy::Strict);
    let err = strict.request_airdrop_if_needed(&Keypair::new()).await.unwrap_err();
    assert!(matches!(err, FundingError::AirdropFailed(_)));

    let methods = log.lock().unwrap().clone();
    assert!(!methods.contains(&"getSignatureStatuses".to_string()));
}

#[tokio::test]
async fn test_balance_error_over_http() {
    let (addr, _log) = common::start_rpc_responder(|method, _params| match method {
        "getBalance" => Err((-32005, "node is behind".to_string())),
        other => common_method(other).ok_or((-32601, format!("unexpected {}", other))),
    })
    .await;

    let config = config_for(addr);
    let helper = FundingHelper::from_config(SolanaRpc::new(&config.network), &config);

    let err = helper.request_airdrop_if_needed(&Keypair::new()).await.unwrap_err();
    assert!(matches!(err, FundingError::Rpc(_)));
}
