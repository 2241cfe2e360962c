use super::super::utils::response_message;
use super::super::{OracleServiceError, OracleStatus, SubmitOracleResponse};
use super::*;
use crate::time_provider::TimeSource;
use crate::rpc::{handle_single_request, register_oracle_methods, RpcModule};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde_json::json;

const ONE_GAS: i64 = 100_000_000;

fn running(n: usize) -> (Harness, Vec<KeyPair>, Transaction) {
    let keys = keys(n);
    let chain = TestChain::new(public_keys(&keys));
    chain.add_request(1, request(1, "https://example.com", None, ONE_GAS), 1);
    let (tx, _) = build_pair(&chain, 1, OracleResponseCode::Success, b"[1]");
    let harness = harness(chain);
    harness.service.set_status(OracleStatus::Running);
    (harness, keys, tx)
}

fn submission(key: &KeyPair, request_id: u64, tx_sign: Vec<u8>) -> SubmitOracleResponse {
    let msg_sign = key
        .sign(&response_message(key.public_key(), request_id, &tx_sign))
        .unwrap();
    SubmitOracleResponse {
        oracle_pub: key.public_key().clone(),
        request_id,
        tx_sign,
        msg_sign,
    }
}

#[test]
fn rejected_unless_running() {
    let (harness, keys, tx) = running(4);
    harness.service.set_status(OracleStatus::Stopped);
    let err = harness
        .service
        .submit_oracle_response(submission(&keys[1], 1, sign(&tx, &keys[1])))
        .unwrap_err();
    assert_eq!(err, OracleServiceError::Disabled);
}

#[test]
fn finished_requests_are_rejected_first() {
    let (harness, _, _) = running(4);
    harness
        .service
        .finished_cache
        .insert(1, harness.clock.utc_now());
    let outsider = KeyPair::generate();
    let err = harness
        .service
        .submit_oracle_response(submission(&outsider, 1, vec![0; 64]))
        .unwrap_err();
    assert_eq!(err, OracleServiceError::RequestFinished);
}

#[test]
fn outsiders_are_rejected_before_request_lookup() {
    let (harness, _, _) = running(4);
    let outsider = KeyPair::generate();
    let err = harness
        .service
        .submit_oracle_response(submission(&outsider, 77, vec![0; 64]))
        .unwrap_err();
    assert_eq!(
        err,
        OracleServiceError::NotDesignated(outsider.public_key().to_string())
    );
}

#[test]
fn unknown_request_is_rejected() {
    let (harness, keys, _) = running(4);
    let err = harness
        .service
        .submit_oracle_response(submission(&keys[1], 77, vec![0; 64]))
        .unwrap_err();
    assert_eq!(err, OracleServiceError::RequestNotFound);
}

#[test]
fn forged_message_signature_is_rejected() {
    let (harness, keys, tx) = running(4);
    let mut forged = submission(&keys[1], 1, sign(&tx, &keys[1]));
    forged.msg_sign = submission(&keys[2], 1, sign(&tx, &keys[1])).msg_sign;
    let err = harness.service.submit_oracle_response(forged).unwrap_err();
    assert!(matches!(err, OracleServiceError::InvalidSignature(_)));
    assert!(!harness.service.is_pending(1));
}

#[test]
fn valid_submission_is_buffered() {
    let (harness, keys, tx) = running(4);
    harness
        .service
        .submit_oracle_response(submission(&keys[1], 1, sign(&tx, &keys[1])))
        .unwrap();
    assert!(harness.service.is_pending(1));
    assert!(harness.chain.relayed().is_empty());
}

fn rpc_call(key: &KeyPair, request_id: Value, tx_sign: &[u8], msg_sign: &[u8]) -> Value {
    json!({
        "jsonrpc": "2.0",
        "id": 1,
        "method": "submitoracleresponse",
        "params": [
            STANDARD.encode(key.public_key().as_bytes()),
            request_id,
            STANDARD.encode(tx_sign),
            STANDARD.encode(msg_sign),
        ],
    })
}

#[tokio::test]
async fn rpc_method_round_trip() {
    let (harness, keys, tx) = running(4);
    let module = RpcModule::new();
    register_oracle_methods(&module, Arc::clone(&harness.service));

    let SubmitOracleResponse { tx_sign, msg_sign, .. } =
        submission(&keys[1], 1, sign(&tx, &keys[1]));
    let response =
        handle_single_request(&module, rpc_call(&keys[1], json!(1), &tx_sign, &msg_sign)).await;
    assert!(response.error.is_none());
    assert_eq!(response.result, Some(json!({})));
    assert!(harness.service.is_pending(1));

    let response =
        handle_single_request(&module, rpc_call(&keys[1], json!("x"), &tx_sign, &msg_sign)).await;
    assert_eq!(response.error.map(|e| e.code()), Some(-32602));

    let response =
        handle_single_request(&module, rpc_call(&keys[1], json!(9), &tx_sign, &msg_sign)).await;
    assert_eq!(response.error.map(|e| e.code()), Some(-604));
}

#[tokio::test]
async fn rpc_reports_disabled_service() {
    let (harness, keys, _) = running(4);
    harness.service.set_status(OracleStatus::Unstarted);
    let module = RpcModule::new();
    register_oracle_methods(&module, Arc::clone(&harness.service));

    let response =
        handle_single_request(&module, rpc_call(&keys[1], json!(1), &[0; 64], &[0; 64])).await;
    let error = response.error.unwrap();
    assert_eq!(error.code(), -602);
    assert_eq!(error.message(), "Oracle service disabled");
}
