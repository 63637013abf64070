//! Shared utilities for integration testing.

#![allow(dead_code)]

use serde_json::{json, Value};
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::Signature;
use std::collections::VecDeque;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

use devnet_funder::blockchain::{
    AirdropPolicy, Commitment, ConfirmationStatus, FundingError, FundingResult, FundingSettings,
    RpcConnection,
};

/// Settings with short confirmation timings for tests.
pub fn fast_settings(policy: AirdropPolicy) -> FundingSettings {
    FundingSettings {
        threshold_sol: 1.0,
        airdrop_lamports: 1_000_000_000,
        policy,
        commitment: Commitment::Confirmed,
        confirm_timeout: Duration::from_millis(300),
        poll_interval: Duration::from_millis(10),
    }
}

/// In-memory connection with scripted responses.
pub struct MockRpc {
    balance: Result<u64, String>,
    airdrop_error: Option<String>,
    statuses: Mutex<VecDeque<ConfirmationStatus>>,
    pub airdrop_calls: Mutex<Vec<(Pubkey, u64)>>,
    pub status_polls: AtomicU32,
}

impl MockRpc {
    /// A connection reporting `lamports` and confirming airdrops on first poll.
    pub fn with_balance(lamports: u64) -> Self {
        Self {
            balance: Ok(lamports),
            airdrop_error: None,
            statuses: Mutex::new(VecDeque::new()),
            airdrop_calls: Mutex::new(Vec::new()),
            status_polls: AtomicU32::new(0),
        }
    }

    pub fn failing_balance(message: &str) -> Self {
        Self {
            balance: Err(message.to_string()),
            ..Self::with_balance(0)
        }
    }

    pub fn failing_airdrop(mut self, message: &str) -> Self {
        self.airdrop_error = Some(message.to_string());
        self
    }

    /// Statuses returned by successive polls; once drained, polls report `Confirmed`.
    pub fn with_statuses(self, statuses: Vec<ConfirmationStatus>) -> Self {
        *self.statuses.lock().unwrap() = statuses.into();
        self
    }

    pub fn airdrop_count(&self) -> usize {
        self.airdrop_calls.lock().unwrap().len()
    }

    pub fn polls(&self) -> u32 {
        self.status_polls.load(Ordering::SeqCst)
    }
}

impl RpcConnection for MockRpc {
    async fn get_balance(&self, _pubkey: &Pubkey) -> FundingResult<u64> {
        self.balance.clone().map_err(FundingError::Rpc)
    }

    async fn request_airdrop(&self, pubkey: &Pubkey, lamports: u64) -> FundingResult<Signature> {
        self.airdrop_calls.lock().unwrap().push((*pubkey, lamports));
        match &self.airdrop_error {
            Some(message) => Err(FundingError::Rpc(message.clone())),
            None => Ok(Signature::from([7u8; 64])),
        }
    }

    async fn signature_status(
        &self,
        _signature: &Signature,
        _commitment: Commitment,
    ) -> FundingResult<ConfirmationStatus> {
        self.status_polls.fetch_add(1, Ordering::SeqCst);
        let next = self.statuses.lock().unwrap().pop_front();
        Ok(next.unwrap_or(ConfirmationStatus::Confirmed))
    }
}

/// A JSON-RPC handler: method name and params in, `result` or `(code, message)` out.
pub type RpcHandler = dyn Fn(&str, &Value) -> Result<Value, (i64, String)> + Send + Sync;

/// Start a minimal HTTP JSON-RPC endpoint on an ephemeral port.
///
/// Every request's method name is appended to the returned log.
pub async fn start_rpc_responder<F>(handler: F) -> (SocketAddr, Arc<Mutex<Vec<String>>>)
where
    F: Fn(&str, &Value) -> Result<Value, (i64, String)> + Send + Sync + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let handler: Arc<RpcHandler> = Arc::new(handler);
    let log = Arc::new(Mutex::new(Vec::new()));
    let log_clone = log.clone();

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((socket, _)) => {
                    let handler = handler.clone();
                    let log = log_clone.clone();
                    tokio::spawn(async move {
                        let _ = serve_connection(socket, handler, log).await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    (addr, log)
}

async fn serve_connection(
    mut socket: TcpStream,
    handler: Arc<RpcHandler>,
    log: Arc<Mutex<Vec<String>>>,
) -> std::io::Result<()> {
    let body = read_request_body(&mut socket).await?;
    let request: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
    let method = request["method"].as_str().unwrap_or_default().to_string();
    let id = request["id"].clone();
    log.lock().unwrap().push(method.clone());

    let response = match handler(&method, &request["params"]) {
        Ok(result) => json!({ "jsonrpc": "2.0", "result": result, "id": id }),
        Err((code, message)) => json!({
            "jsonrpc": "2.0",
            "error": { "code": code, "message": message },
            "id": id,
        }),
    };

    let payload = response.to_string();
    let response_str = format!(
        "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        payload.len(),
        payload
    );
    socket.write_all(response_str.as_bytes()).await?;
    socket.shutdown().await
}

async fn read_request_body(socket: &mut TcpStream) -> std::io::Result<Vec<u8>> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    loop {
        if let Some(header_end) = find(&buf, b"\r\n\r\n") {
            let headers = String::from_utf8_lossy(&buf[..header_end]).to_ascii_lowercase();
            let content_length = headers
                .lines()
                .find_map(|line| line.strip_prefix("content-length:"))
                .and_then(|v| v.trim().parse::<usize>().ok())
                .unwrap_or(0);
            let body_start = header_end + 4;
            if buf.len() >= body_start + content_length {
                return Ok(buf[body_start..body_start + content_length].to_vec());
            }
        }

        let n = socket.read(&mut chunk).await?;
        if n == 0 {
            return Ok(Vec::new());
        }
        buf.extend_from_slice(&chunk[..n]);
    }
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}
