use super::super::utils::{ledger_height, verify_oracle_signature};
use super::super::{OracleService, OracleServiceError, OracleTask};
use crate::ledger::LedgerSnapshot;
use neo_core::script::ScriptBuilder;
use neo_core::{bft_threshold, Contract, ECPoint, Role, Transaction};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

impl OracleService {
    /// Records a signature for `request_id` and relays the response once a
    /// quorum of oracles has signed either candidate transaction.
    ///
    /// Local builds pass the freshly built `response_tx` / `backup_tx` along
    /// with this node's backup signature; peer signatures arrive without
    /// transactions. Peer signatures received before the local build are
    /// buffered against both candidates and sorted out once the transactions
    /// are known.
    #[allow(clippy::too_many_arguments)]
    pub(in super::super) fn add_response_tx_sign(
        &self,
        snapshot: &dyn LedgerSnapshot,
        request_id: u64,
        oracle_pub: ECPoint,
        sign: Vec<u8>,
        response_tx: Option<Transaction>,
        backup_tx: Option<Transaction>,
        backup_sign: Option<Vec<u8>>,
    ) -> Result<(), OracleServiceError> {
        if self.finished_cache.contains_key(&request_id) {
            return Err(OracleServiceError::RequestFinished);
        }
        let task = self.get_or_create_task(snapshot, request_id)?;
        let network = self.settings.network;

        let mut guard = task.state.lock();
        let state = &mut *guard;

        if let Some(tx) = response_tx {
            if state.tx.as_ref() != Some(&tx) {
                let data = tx.get_sign_data(network);
                state
                    .signs
                    .retain(|key, value| verify_oracle_signature(key, &data, value));
                state.tx = Some(tx);
            }
        }

        if let Some(tx) = backup_tx {
            if state.backup_tx.as_ref() != Some(&tx) {
                let data = tx.get_sign_data(network);
                state
                    .backup_signs
                    .retain(|key, value| verify_oracle_signature(key, &data, value));
                state.backup_tx = Some(tx);
            }
            if let Some(backup_sign) = backup_sign {
                state.backup_signs.entry(oracle_pub.clone()).or_insert(backup_sign);
            }
        }

        let Some(tx) = state.tx.as_ref() else {
            state.signs.entry(oracle_pub.clone()).or_insert_with(|| sign.clone());
            state.backup_signs.entry(oracle_pub).or_insert(sign);
            return Ok(());
        };

        if verify_oracle_signature(&oracle_pub, &tx.get_sign_data(network), &sign) {
            state.signs.entry(oracle_pub).or_insert(sign);
        } else if state.backup_tx.as_ref().is_some_and(|backup| {
            verify_oracle_signature(&oracle_pub, &backup.get_sign_data(network), &sign)
        }) {
            state.backup_signs.entry(oracle_pub).or_insert(sign);
        } else {
            return Err(OracleServiceError::InvalidSignature(format!(
                "Invalid oracle response transaction signature from '{oracle_pub}'."
            )));
        }

        let signed = state
            .tx
            .as_ref()
            .and_then(|tx| self.check_tx_sign(snapshot, tx, &state.signs))
            .or_else(|| {
                state
                    .backup_tx
                    .as_ref()
                    .and_then(|tx| self.check_tx_sign(snapshot, tx, &state.backup_signs))
            });
        if let Some(signed) = signed {
            self.finalize(&task, signed);
        }
        Ok(())
    }

    fn get_or_create_task(
        &self,
        snapshot: &dyn LedgerSnapshot,
        request_id: u64,
    ) -> Result<Arc<OracleTask>, OracleServiceError> {
        if let Some(task) = self.pending_queue.get(&request_id) {
            return Ok(Arc::clone(task.value()));
        }
        let request = snapshot
            .get_request(request_id)
            .ok_or(OracleServiceError::RequestNotFound)?;
        let now = self.time.utc_now();
        let task = Arc::clone(
            self.pending_queue
                .entry(request_id)
                .or_insert_with(|| Arc::new(OracleTask::new(request_id, request, now)))
                .value(),
        );
        Ok(task)
    }

    /// Returns `tx` with the multisig invocation script filled in when `signs`
    /// reaches the quorum of the oracle set at the next height.
    pub(in super::super) fn check_tx_sign(
        &self,
        snapshot: &dyn LedgerSnapshot,
        tx: &Transaction,
        signs: &BTreeMap<ECPoint, Vec<u8>>,
    ) -> Option<Transaction> {
        let height = ledger_height(snapshot);
        if tx.valid_until_block() <= height {
            return None;
        }

        let oracle_nodes = snapshot.get_designated_by_role(Role::Oracle, height);
        if oracle_nodes.is_empty() {
            return None;
        }
        let needed = bft_threshold(oracle_nodes.len());
        if signs.len() < needed {
            return None;
        }

        let contract = match Contract::create_multi_sig_contract(needed, &oracle_nodes) {
            Ok(contract) => contract,
            Err(err) => {
                warn!(target: "neo::oracle", %err, "cannot build oracle multisig contract");
                return None;
            }
        };

        let mut builder = ScriptBuilder::new();
        for sign in signs.values().take(needed) {
            builder.emit_push(sign);
        }

        let mut signed = tx.clone();
        let index = signed
            .get_script_hashes_for_verifying()
            .iter()
            .position(|hash| *hash == contract.script_hash());
        let Some(witness) = index.and_then(|index| signed.witnesses_mut().get_mut(index)) else {
            warn!(
                target: "neo::oracle",
                tx = %tx.hash(),
                "oracle multisig is not a signer of the response tx"
            );
            return None;
        };
        witness.invocation_script = builder.to_array();
        Some(signed)
    }

    /// Moves the task to the finished cache and relays `tx`. Only the caller
    /// that removes the task from the pending queue relays.
    fn finalize(&self, task: &Arc<OracleTask>, tx: Transaction) -> bool {
        let removed = self
            .pending_queue
            .remove_if(&task.id, |_, current| Arc::ptr_eq(current, task))
            .is_some();
        if !removed {
            debug!(target: "neo::oracle", request_id = task.id, "oracle task already settled");
            return false;
        }

        self.finished_cache.insert(task.id, self.time.utc_now());
        let hash = tx.hash();
        match self.ledger.relay(tx) {
            Ok(()) => info!(
                target: "neo::oracle",
                request_id = task.id,
                tx = %hash,
                "oracle response tx relayed"
            ),
            Err(err) => warn!(
                target: "neo::oracle",
                request_id = task.id,
                tx = %hash,
                %err,
                "ledger rejected oracle response tx"
            ),
        }
        true
    }
}
