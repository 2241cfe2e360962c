use super::*;
use neo_core::io::{get_var_size_bytes, Serializable};
use neo_core::payloads::MAX_RESULT_SIZE;
use neo_core::{bft_threshold, Contract, OracleContract};

const ONE_GAS: i64 = 100_000_000;

fn single_node_chain(gas: i64) -> (Arc<TestChain>, Vec<ECPoint>) {
    let oracles = public_keys(&keys(1));
    let chain = TestChain::new(oracles.clone());
    chain.add_request(1, request(1, "https://example.com", None, gas), 1);
    (chain, oracles)
}

#[test]
fn fees_match_reference_vector() {
    let (chain, oracles) = single_node_chain(ONE_GAS);
    let snapshot = chain.snapshot();
    let request = snapshot.get_request(1).unwrap();
    let mut response = OracleResponse::new(1, OracleResponseCode::Success, vec![0x00]);

    let tx =
        OracleService::create_response_tx(snapshot.as_ref(), &request, &mut response, &oracles, false)
            .unwrap();

    assert_eq!(response.code, OracleResponseCode::Success);
    assert_eq!(tx.size(), 166);
    assert_eq!(tx.network_fee(), 2_198_650);
    assert_eq!(tx.system_fee(), 97_801_350);
    assert_eq!(tx.system_fee() + tx.network_fee(), request.gas_for_response);
}

#[test]
fn underfunded_request_degrades_to_insufficient_funds() {
    let (chain, oracles) = single_node_chain(10_000_000);
    let snapshot = chain.snapshot();
    let request = snapshot.get_request(1).unwrap();
    let mut response = OracleResponse::new(1, OracleResponseCode::Success, vec![0; 10_250]);

    let tx =
        OracleService::create_response_tx(snapshot.as_ref(), &request, &mut response, &oracles, false)
            .unwrap();

    assert_eq!(response.code, OracleResponseCode::InsufficientFunds);
    assert!(response.result.is_empty());
    let embedded = tx.oracle_response().unwrap();
    assert_eq!(embedded.code, OracleResponseCode::InsufficientFunds);
    assert!(embedded.result.is_empty());
    assert_eq!(tx.size(), 165);
    assert_eq!(tx.network_fee(), 2_197_650);
    assert_eq!(tx.system_fee(), 7_802_350);
}

#[test]
fn oversized_result_degrades_to_response_too_large() {
    let (chain, oracles) = single_node_chain(ONE_GAS * 100);
    let snapshot = chain.snapshot();
    let request = snapshot.get_request(1).unwrap();
    let mut response =
        OracleResponse::new(1, OracleResponseCode::Success, vec![1; MAX_RESULT_SIZE + 1]);

    let tx =
        OracleService::create_response_tx(snapshot.as_ref(), &request, &mut response, &oracles, false)
            .unwrap();

    assert_eq!(response.code, OracleResponseCode::ResponseTooLarge);
    assert_eq!(tx.oracle_response().unwrap().code, OracleResponseCode::ResponseTooLarge);
    assert!(tx.oracle_response().unwrap().result.is_empty());

    // The fee is recomputed for the emptied attribute, so it undercuts the
    // largest payload that is still accepted.
    let mut largest = OracleResponse::new(1, OracleResponseCode::Success, vec![1; MAX_RESULT_SIZE]);
    let full_tx =
        OracleService::create_response_tx(snapshot.as_ref(), &request, &mut largest, &oracles, false)
            .unwrap();
    assert_eq!(largest.code, OracleResponseCode::Success);
    assert!(tx.network_fee() < full_tx.network_fee());
    let extra_bytes = (get_var_size_bytes(&largest.result) - get_var_size_bytes(&[])) as i64;
    assert_eq!(full_tx.network_fee() - tx.network_fee(), extra_bytes * 1000);
    assert_eq!(tx.system_fee() + tx.network_fee(), request.gas_for_response);
}

#[test]
fn layout_follows_signer_order() {
    let keys = keys(4);
    let oracles = public_keys(&keys);
    let chain = TestChain::new(oracles.clone());
    chain.add_request(9, request(9, "https://example.com", None, ONE_GAS), 1);
    let (tx, backup) = build_pair(&chain, 9, OracleResponseCode::Success, b"[1]");

    let multisig = Contract::create_multi_sig_contract(bft_threshold(4), &oracles).unwrap();
    assert_eq!(tx.signers().len(), 2);
    assert_eq!(tx.signers()[0].account, OracleContract::HASH);
    assert_eq!(tx.signers()[1].account, multisig.script_hash());
    assert!(tx.witnesses()[0].verification_script.is_empty());
    assert_eq!(tx.witnesses()[1].verification_script, multisig.script);
    assert!(tx.witnesses()[1].invocation_script.is_empty());
    assert_eq!(tx.nonce(), 9);
    assert_eq!(tx.script(), OracleResponse::fixed_script().as_slice());
    assert_eq!(tx.valid_until_block(), 1 + 5760);

    assert_eq!(
        backup.oracle_response().unwrap().code,
        OracleResponseCode::ConsensusUnreachable
    );
    assert_ne!(tx.hash(), backup.hash());
}

#[test]
fn backup_validity_is_moved_past_current_height() {
    let oracles = public_keys(&keys(1));
    let chain = TestChain::new(oracles);
    chain.update(|state| {
        state.height = 12_000;
        state.max_vub = 100;
    });
    chain.add_request(1, request(1, "https://example.com", None, ONE_GAS), 50);

    let (tx, backup) = build_pair(&chain, 1, OracleResponseCode::Success, b"[]");
    assert_eq!(tx.valid_until_block(), 150);
    assert!(backup.valid_until_block() > 12_000);
    assert_eq!((backup.valid_until_block() - 50) % 100, 0);
}

#[test]
fn building_is_deterministic() {
    let keys = keys(7);
    let chain = TestChain::new(public_keys(&keys));
    chain.add_request(3, request(3, "https://example.com", Some("$.a"), ONE_GAS), 2);

    let first = build_pair(&chain, 3, OracleResponseCode::Success, b"[42]");
    let second = build_pair(&chain, 3, OracleResponseCode::Success, b"[42]");
    assert_eq!(first, second);
    assert_eq!(first.0.hash(), second.0.hash());
}

#[test]
fn missing_request_transaction_is_an_error() {
    let oracles = public_keys(&keys(1));
    let chain = TestChain::new(oracles.clone());
    let snapshot = chain.snapshot();
    let request = request(5, "https://example.com", None, ONE_GAS);
    let mut response = OracleResponse::new(5, OracleResponseCode::Success, Vec::new());

    let err =
        OracleService::create_response_tx(snapshot.as_ref(), &request, &mut response, &oracles, false)
            .unwrap_err();
    assert_eq!(err, super::super::OracleServiceError::RequestTransactionNotFound);
}

#[test]
fn empty_oracle_set_is_an_error() {
    let (chain, _) = single_node_chain(ONE_GAS);
    let snapshot = chain.snapshot();
    let request = snapshot.get_request(1).unwrap();
    let mut response = OracleResponse::new(1, OracleResponseCode::Success, Vec::new());

    let err = OracleService::create_response_tx(snapshot.as_ref(), &request, &mut response, &[], false)
        .unwrap_err();
    assert_eq!(err, super::super::OracleServiceError::NoOracleDesignated);
}
