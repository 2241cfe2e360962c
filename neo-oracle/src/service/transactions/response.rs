use super::super::{OracleService, OracleServiceError};
use crate::ledger::LedgerSnapshot;
use neo_core::contract::multi_signature_contract_cost;
use neo_core::io::{get_var_size, get_var_size_bytes, get_var_size_serializable_slice, Serializable};
use neo_core::payloads::MAX_RESULT_SIZE;
use neo_core::{
    bft_threshold, Contract, ECPoint, OracleContract, OracleRequest, OracleResponse,
    OracleResponseCode, Signer, Transaction, TransactionAttribute, UInt160, Witness,
    WitnessScope, HEADER_SIZE,
};

/// Bytes one signature push adds to an invocation script (`PUSHDATA1 64 <sig>`).
const SIGNATURE_PUSH_SIZE: usize = 66;

impl OracleService {
    /// Builds the response transaction for `request`.
    ///
    /// `response.code` and `response.result` are downgraded in place when the
    /// result is too large or the request's GAS cannot pay for it. The backup
    /// transaction is built with `use_current_height` so that it stays valid
    /// even when the request transaction is old.
    pub fn create_response_tx(
        snapshot: &dyn LedgerSnapshot,
        request: &OracleRequest,
        response: &mut OracleResponse,
        oracle_nodes: &[ECPoint],
        use_current_height: bool,
    ) -> Result<Transaction, OracleServiceError> {
        let request_block = snapshot
            .get_transaction_block_index(&request.original_tx_id)
            .ok_or(OracleServiceError::RequestTransactionNotFound)?;

        let n = oracle_nodes.len();
        if n == 0 {
            return Err(OracleServiceError::NoOracleDesignated);
        }
        let m = bft_threshold(n);
        let oracle_sign_contract = Contract::create_multi_sig_contract(m, oracle_nodes)
            .map_err(|err| OracleServiceError::BuildFailed(err.to_string()))?;

        let height = snapshot.current_index();
        let max_vub = snapshot.max_valid_until_block_increment();
        let mut valid_until_block = request_block.saturating_add(max_vub);
        while use_current_height && max_vub > 0 && valid_until_block <= height {
            valid_until_block = valid_until_block.saturating_add(max_vub);
        }

        let mut tx = Transaction::new();
        tx.set_version(0);
        tx.set_nonce(response.id as u32);
        tx.set_valid_until_block(valid_until_block);
        tx.set_signers(vec![
            Signer::new(OracleContract::HASH, WitnessScope::NONE),
            Signer::new(oracle_sign_contract.script_hash(), WitnessScope::NONE),
        ]);
        tx.set_attributes(vec![TransactionAttribute::OracleResponse(response.clone())]);
        tx.set_script(OracleResponse::fixed_script());

        let oracle_witness = Witness::empty();
        let witness_for = |hash: &UInt160| {
            if *hash == oracle_sign_contract.script_hash() {
                Witness::new_with_scripts(Vec::new(), oracle_sign_contract.script.clone())
            } else {
                Witness::empty()
            }
        };
        let hashes = tx.get_script_hashes_for_verifying();
        tx.set_witnesses(hashes.iter().map(witness_for).collect());

        let verify_fee = snapshot
            .verify_oracle_response(&tx)
            .map_err(|err| OracleServiceError::BuildFailed(err.to_string()))?;
        let multisig_fee = snapshot.exec_fee_factor() * multi_signature_contract_cost(m, n);
        tx.set_network_fee(verify_fee + multisig_fee);

        let size_inv = SIGNATURE_PUSH_SIZE * m;
        let mut size = HEADER_SIZE
            + get_var_size_serializable_slice(tx.signers())
            + get_var_size_bytes(tx.script())
            + get_var_size(hashes.len() as u64)
            + oracle_witness.size()
            + get_var_size(size_inv as u64)
            + size_inv
            + get_var_size_bytes(&oracle_sign_contract.script);

        let fee_per_byte = snapshot.fee_per_byte();
        if response.result.len() > MAX_RESULT_SIZE {
            response.code = OracleResponseCode::ResponseTooLarge;
            response.result.clear();
        } else if tx.network_fee()
            + (size + get_var_size_serializable_slice(tx.attributes())) as i64 * fee_per_byte
            > request.gas_for_response
        {
            response.code = OracleResponseCode::InsufficientFunds;
            response.result.clear();
        }
        tx.set_attributes(vec![TransactionAttribute::OracleResponse(response.clone())]);

        size += get_var_size_serializable_slice(tx.attributes());
        let network_fee = tx.network_fee() + size as i64 * fee_per_byte;
        tx.set_network_fee(network_fee);
        tx.set_system_fee(request.gas_for_response - network_fee);

        Ok(tx)
    }
}
