//! root publisher
//!
//! pushes a freshly computed accumulator root to the on-chain mirror
//! contract: a single-calldata `set_root` invoke through the relay
//! account's JSON-RPC endpoint. fire and forget - the only response is a
//! transaction hash acknowledgment. failures are surfaced, never
//! swallowed: the caller decides whether to retry (and blind retries are
//! safe here, unlike accumulator inserts).

use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, info};
use veilpool_field::FieldElement;

use crate::error::{normalize_upstream, RelayError, Result};

/// numerator/denominator for the fee safety margin (+20%)
const FEE_MARGIN: (u128, u128) = (12, 10);

/// transaction acknowledgment returned by the node
#[derive(Debug, Clone, Deserialize)]
pub struct TxAck {
    pub transaction_hash: String,
}

#[derive(Debug, Deserialize)]
struct RpcResponse {
    result: Option<Value>,
    error: Option<RpcError>,
}

#[derive(Debug, Deserialize)]
struct RpcError {
    code: i32,
    message: String,
}

#[derive(Debug, Deserialize)]
struct FeeEstimate {
    overall_fee: String,
}

/// JSON-RPC client for the relay account endpoint
#[derive(Clone)]
pub struct RootPublisher {
    client: Client,
    url: String,
    contract_address: String,
}

impl RootPublisher {
    pub fn new(url: &str, contract_address: &str) -> Self {
        Self {
            client: Client::new(),
            url: url.to_string(),
            contract_address: contract_address.to_string(),
        }
    }

    /// estimate, pad and submit the `set_root` invoke; returns the tx
    /// hash acknowledgment
    pub async fn publish_root(&self, root: &FieldElement) -> Result<TxAck> {
        let call = set_root_call(&self.contract_address, root);

        let max_fee = self.estimate_padded_fee(&call).await?;
        debug!(max_fee, root = %root, "fee estimated");

        let params = vec![call, json!({ "max_fee": format!("0x{max_fee:x}") })];
        let result = self.call("account_execute", params).await?;
        let ack: TxAck = serde_json::from_value(result)
            .map_err(|e| RelayError::Payload(e.to_string()))?;

        info!(tx = %ack.transaction_hash, root = %root, "root published");
        Ok(ack)
    }

    /// fee estimate with the safety margin applied
    async fn estimate_padded_fee(&self, call: &Value) -> Result<u128> {
        let result = self.call("account_estimateFee", vec![call.clone()]).await?;
        let estimate: FeeEstimate = serde_json::from_value(result)
            .map_err(|e| RelayError::Payload(e.to_string()))?;
        let fee = parse_fee(&estimate.overall_fee)?;
        Ok(apply_fee_margin(fee))
    }

    async fn call(&self, method: &str, params: Vec<Value>) -> Result<Value> {
        let payload = json!({
            "jsonrpc": "2.0",
            "id": "veilpool-relay",
            "method": method,
            "params": params,
        });

        let response = self
            .client
            .post(&self.url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| RelayError::Transport(e.to_string()))?;

        let body: RpcResponse = response
            .json()
            .await
            .map_err(|e| RelayError::Transport(e.to_string()))?;

        if let Some(error) = body.error {
            debug!(code = error.code, message = %error.message, "rpc error");
            return Err(RelayError::Upstream(normalize_upstream(&error.message)));
        }

        body.result
            .ok_or_else(|| RelayError::Payload("no result in response".into()))
    }
}

/// the invoke body: one calldata element, the root in wire form
fn set_root_call(contract_address: &str, root: &FieldElement) -> Value {
    json!({
        "contract_address": contract_address,
        "entry_point": "set_root",
        "calldata": [root.to_hex()],
    })
}

fn apply_fee_margin(fee: u128) -> u128 {
    fee.saturating_mul(FEE_MARGIN.0) / FEE_MARGIN.1
}

fn parse_fee(s: &str) -> Result<u128> {
    let parsed = if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        u128::from_str_radix(hex, 16)
    } else {
        s.parse()
    };
    parsed.map_err(|e| RelayError::Payload(format!("bad fee {s:?}: {e}")))
}
