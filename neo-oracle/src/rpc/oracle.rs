use super::{RpcError, RpcModule, RpcParams, RpcResult};
use crate::service::{OracleService, SubmitOracleResponse};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use neo_core::ECPoint;
use serde_json::{json, Value};
use std::sync::Arc;

pub const SUBMIT_ORACLE_RESPONSE: &str = "submitoracleresponse";

/// Installs the oracle RPC methods into `module`.
pub fn register_oracle_methods(module: &RpcModule, service: Arc<OracleService>) {
    module.register(SUBMIT_ORACLE_RESPONSE, move |params: RpcParams| {
        let service = Arc::clone(&service);
        async move { submit_oracle_response(&service, &params) }
    });
}

fn submit_oracle_response(service: &OracleService, params: &RpcParams) -> RpcResult {
    if !service.is_running() {
        return Err(RpcError::oracle_disabled());
    }

    let oracle_pub = decode_base64(params.get(0))
        .and_then(|bytes| ECPoint::from_bytes(&bytes).ok())
        .ok_or_else(|| invalid_param("oraclePubkey", params.get(0)))?;
    let request_id = params
        .get(1)
        .and_then(parse_request_id)
        .ok_or_else(|| invalid_param("requestId", params.get(1)))?;
    let tx_sign = decode_base64(params.get(2)).ok_or_else(|| invalid_param("txSign", params.get(2)))?;
    let msg_sign =
        decode_base64(params.get(3)).ok_or_else(|| invalid_param("msgSign", params.get(3)))?;

    service.submit_oracle_response(SubmitOracleResponse {
        oracle_pub,
        request_id,
        tx_sign,
        msg_sign,
    })?;
    Ok(json!({}))
}

fn decode_base64(value: Option<&Value>) -> Option<Vec<u8>> {
    STANDARD.decode(value?.as_str()?).ok()
}

fn parse_request_id(value: &Value) -> Option<u64> {
    match value {
        Value::Number(number) => number.as_u64(),
        Value::String(text) => text.parse().ok(),
        _ => None,
    }
}

fn invalid_param(name: &str, value: Option<&Value>) -> RpcError {
    let shown = value.map_or_else(|| "null".to_string(), Value::to_string);
    RpcError::invalid_params().with_data(format!("Invalid {name}: {shown}"))
}
