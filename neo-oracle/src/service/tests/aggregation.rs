use super::super::OracleServiceError;
use super::*;
use neo_core::script::{OpCode, ScriptBuilder};
use neo_core::{bft_threshold, Contract};

const ONE_GAS: i64 = 100_000_000;

struct Setup {
    harness: Harness,
    keys: Vec<KeyPair>,
    tx: Transaction,
    backup: Transaction,
}

fn setup(n: usize) -> Setup {
    let keys = keys(n);
    let chain = TestChain::new(public_keys(&keys));
    chain.add_request(1, request(1, "https://example.com", None, ONE_GAS), 1);
    let (tx, backup) = build_pair(&chain, 1, OracleResponseCode::Success, b"[1]");
    Setup {
        harness: harness(chain),
        keys,
        tx,
        backup,
    }
}

impl Setup {
    fn add_local(&self, key: &KeyPair) -> Result<(), OracleServiceError> {
        let snapshot = self.harness.chain.snapshot();
        self.harness.service.add_response_tx_sign(
            snapshot.as_ref(),
            1,
            key.public_key().clone(),
            sign(&self.tx, key),
            Some(self.tx.clone()),
            Some(self.backup.clone()),
            Some(sign(&self.backup, key)),
        )
    }

    fn add_peer(&self, key: &KeyPair, signature: Vec<u8>) -> Result<(), OracleServiceError> {
        let snapshot = self.harness.chain.snapshot();
        self.harness.service.add_response_tx_sign(
            snapshot.as_ref(),
            1,
            key.public_key().clone(),
            signature,
            None,
            None,
            None,
        )
    }
}

#[test]
fn quorum_relays_exactly_once() {
    let setup = setup(7);
    let needed = bft_threshold(7);
    assert_eq!(needed, 5);

    setup.add_local(&setup.keys[0]).unwrap();
    for key in &setup.keys[1..needed - 1] {
        setup.add_peer(key, sign(&setup.tx, key)).unwrap();
    }
    assert!(setup.harness.chain.relayed().is_empty());
    assert!(setup.harness.service.is_pending(1));

    let fifth = &setup.keys[needed - 1];
    setup.add_peer(fifth, sign(&setup.tx, fifth)).unwrap();
    assert_eq!(setup.harness.chain.relayed().len(), 1);
    assert!(!setup.harness.service.is_pending(1));
    assert!(setup.harness.service.is_request_finished(1));

    let late = &setup.keys[needed];
    assert_eq!(
        setup.add_peer(late, sign(&setup.tx, late)),
        Err(OracleServiceError::RequestFinished)
    );
    assert_eq!(setup.harness.chain.relayed().len(), 1);
}

#[test]
fn relayed_tx_carries_first_m_signatures_in_key_order() {
    let setup = setup(4);
    let needed = bft_threshold(4);
    setup.add_local(&setup.keys[3]).unwrap();
    for key in &setup.keys[..needed - 1] {
        setup.add_peer(key, sign(&setup.tx, key)).unwrap();
    }

    let relayed = setup.harness.chain.relayed();
    assert_eq!(relayed.len(), 1);
    let relayed = &relayed[0];
    assert_eq!(relayed.hash(), setup.tx.hash());

    let oracles = public_keys(&setup.keys);
    let multisig = Contract::create_multi_sig_contract(needed, &oracles).unwrap();
    let index = relayed
        .get_script_hashes_for_verifying()
        .iter()
        .position(|hash| *hash == multisig.script_hash())
        .unwrap();

    let mut signers = vec![&setup.keys[0], &setup.keys[1], &setup.keys[3]];
    signers.sort_by(|a, b| a.public_key().cmp(b.public_key()));
    let mut expected = ScriptBuilder::new();
    for key in signers {
        expected.emit_push(&sign(&setup.tx, key));
    }
    assert_eq!(relayed.witnesses()[index].invocation_script, expected.to_array());
    assert_eq!(relayed.witnesses()[index].invocation_script[0], OpCode::PUSHDATA1 as u8);
    assert!(relayed.witnesses()[1 - index].invocation_script.is_empty());
}

#[test]
fn backup_quorum_relays_backup_tx() {
    let setup = setup(4);
    setup.add_local(&setup.keys[0]).unwrap();
    for key in &setup.keys[1..3] {
        setup.add_peer(key, sign(&setup.backup, key)).unwrap();
    }

    let relayed = setup.harness.chain.relayed();
    assert_eq!(relayed.len(), 1);
    assert_eq!(relayed[0].hash(), setup.backup.hash());
    assert_eq!(
        relayed[0].oracle_response().unwrap().code,
        OracleResponseCode::ConsensusUnreachable
    );
}

#[test]
fn early_peer_signatures_are_buffered_until_local_build() {
    let setup = setup(4);
    for key in &setup.keys[1..3] {
        setup.add_peer(key, sign(&setup.tx, key)).unwrap();
    }
    assert!(setup.harness.service.is_pending(1));
    assert!(setup.harness.chain.relayed().is_empty());

    setup.add_local(&setup.keys[0]).unwrap();
    let relayed = setup.harness.chain.relayed();
    assert_eq!(relayed.len(), 1);
    assert_eq!(relayed[0].hash(), setup.tx.hash());
}

#[test]
fn buffered_garbage_is_dropped_when_tx_arrives() {
    let setup = setup(4);
    setup.add_peer(&setup.keys[1], vec![7; 64]).unwrap();
    setup.add_local(&setup.keys[0]).unwrap();

    let task = setup.harness.service.pending_queue.get(&1).map(|e| Arc::clone(e.value())).unwrap();
    let state = task.state.lock();
    assert_eq!(state.signs.len(), 1);
    assert!(state.signs.contains_key(setup.keys[0].public_key()));
    assert_eq!(state.backup_signs.len(), 1);
}

#[test]
fn signature_over_neither_tx_is_rejected() {
    let setup = setup(4);
    setup.add_local(&setup.keys[0]).unwrap();
    let err = setup.add_peer(&setup.keys[1], vec![1; 64]).unwrap_err();
    assert!(matches!(err, OracleServiceError::InvalidSignature(_)));

    let other_key = &setup.keys[2];
    let err = setup
        .add_peer(&setup.keys[1], sign(&setup.tx, other_key))
        .unwrap_err();
    assert!(matches!(err, OracleServiceError::InvalidSignature(_)));
}

#[test]
fn first_recorded_signature_for_a_key_is_kept() {
    let setup = setup(4);
    let key = &setup.keys[0];
    setup.add_local(key).unwrap();

    let snapshot = setup.harness.chain.snapshot();
    setup
        .harness
        .service
        .add_response_tx_sign(
            snapshot.as_ref(),
            1,
            key.public_key().clone(),
            sign(&setup.tx, key),
            Some(setup.tx.clone()),
            Some(setup.backup.clone()),
            Some(vec![9; 64]),
        )
        .unwrap();

    let task = setup.harness.service.pending_queue.get(&1).map(|e| Arc::clone(e.value())).unwrap();
    let state = task.state.lock();
    assert_eq!(state.backup_signs.get(key.public_key()), Some(&sign(&setup.backup, key)));
    assert_eq!(state.signs.len(), 1);
}

#[test]
fn replacing_tx_reverifies_signatures() {
    let setup = setup(7);
    setup.add_local(&setup.keys[0]).unwrap();
    setup.add_peer(&setup.keys[1], sign(&setup.tx, &setup.keys[1])).unwrap();

    let (other_tx, other_backup) =
        build_pair(&setup.harness.chain, 1, OracleResponseCode::Success, b"[2]");
    assert_ne!(other_tx.hash(), setup.tx.hash());

    let snapshot = setup.harness.chain.snapshot();
    let key = &setup.keys[2];
    setup
        .harness
        .service
        .add_response_tx_sign(
            snapshot.as_ref(),
            1,
            key.public_key().clone(),
            sign(&other_tx, key),
            Some(other_tx.clone()),
            Some(other_backup.clone()),
            Some(sign(&other_backup, key)),
        )
        .unwrap();

    let task = setup.harness.service.pending_queue.get(&1).map(|e| Arc::clone(e.value())).unwrap();
    let state = task.state.lock();
    assert_eq!(state.tx.as_ref().map(Transaction::hash), Some(other_tx.hash()));
    assert_eq!(state.signs.len(), 1);
    assert!(state.signs.contains_key(key.public_key()));
    // Both backups are identical, so earlier backup signatures survive.
    assert_eq!(state.backup_signs.len(), 2);
}

#[test]
fn expired_tx_is_never_relayed() {
    let setup = setup(1);
    setup.harness.chain.update(|state| state.height = 6000);
    setup.add_local(&setup.keys[0]).unwrap();
    assert!(setup.harness.chain.relayed().is_empty());
    assert!(setup.harness.service.is_pending(1));
}

#[test]
fn unknown_request_is_not_tracked() {
    let setup = setup(4);
    let snapshot = setup.harness.chain.snapshot();
    let key = &setup.keys[1];
    let err = setup
        .harness
        .service
        .add_response_tx_sign(
            snapshot.as_ref(),
            99,
            key.public_key().clone(),
            vec![0; 64],
            None,
            None,
            None,
        )
        .unwrap_err();
    assert_eq!(err, OracleServiceError::RequestNotFound);
    assert!(!setup.harness.service.is_pending(99));
}

#[test]
fn concurrent_signers_finalize_once() {
    let setup = Arc::new(setup(7));
    setup.add_local(&setup.keys[0]).unwrap();

    let handles: Vec<_> = (1..7)
        .map(|i| {
            let setup = Arc::clone(&setup);
            std::thread::spawn(move || {
                let key = &setup.keys[i];
                let _ = setup.add_peer(key, sign(&setup.tx, key));
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(setup.harness.chain.relayed().len(), 1);
    assert!(setup.harness.service.is_request_finished(1));
}
