use crate::ledger::LedgerSnapshot;
use crate::wallet::Wallet;
use neo_core::{ECPoint, KeyPair, Role};

/// Height at which the next block is validated; oracle designations are
/// read at this index.
pub(super) fn ledger_height(snapshot: &dyn LedgerSnapshot) -> u32 {
    snapshot.current_index().saturating_add(1)
}

pub(super) fn designated_oracles(snapshot: &dyn LedgerSnapshot) -> Vec<ECPoint> {
    snapshot.get_designated_by_role(Role::Oracle, ledger_height(snapshot))
}

pub(super) fn verify_oracle_signature(pubkey: &ECPoint, data: &[u8], signature: &[u8]) -> bool {
    pubkey.verify_signature(data, signature)
}

/// Bytes a node signs when relaying its transaction signature:
/// `pubkey || request_id (LE) || tx_sign`.
pub(super) fn response_message(pubkey: &ECPoint, request_id: u64, tx_sign: &[u8]) -> Vec<u8> {
    let mut message = Vec::with_capacity(33 + 8 + tx_sign.len());
    message.extend_from_slice(pubkey.as_bytes());
    message.extend_from_slice(&request_id.to_le_bytes());
    message.extend_from_slice(tx_sign);
    message
}

/// Unlocked wallet keys that belong to the given oracle set.
pub(super) fn oracle_keys(wallet: &dyn Wallet, oracles: &[ECPoint]) -> Vec<KeyPair> {
    wallet
        .get_accounts()
        .iter()
        .filter(|account| oracles.contains(account.public_key()))
        .filter_map(|account| account.get_key().cloned())
        .collect()
}

pub(super) fn wallet_has_oracle_account(wallet: &dyn Wallet, oracles: &[ECPoint]) -> bool {
    !oracle_keys(wallet, oracles).is_empty()
}
