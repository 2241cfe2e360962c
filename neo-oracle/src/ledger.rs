//! Ledger collaborator interfaces.
//!
//! The oracle service never touches storage or the VM directly. The host
//! node implements these traits over its blockchain state.

use neo_core::{ECPoint, OracleRequest, PolicyContract, Role, Transaction, UInt256};
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LedgerError {
    #[error("oracle contract verification failed: {0}")]
    VerificationFailed(String),

    #[error("transaction rejected: {0}")]
    Rejected(String),
}

/// A consistent read view of the chain at one height.
pub trait LedgerSnapshot: Send + Sync {
    /// Index of the latest persisted block.
    fn current_index(&self) -> u32;

    /// All outstanding oracle requests.
    fn get_requests(&self) -> Vec<(u64, OracleRequest)>;

    /// Outstanding requests that ask for `url`.
    fn get_requests_by_url(&self, url: &str) -> Vec<(u64, OracleRequest)>;

    fn get_request(&self, id: u64) -> Option<OracleRequest>;

    /// Keys designated for `role` as of block `index`.
    fn get_designated_by_role(&self, role: Role, index: u32) -> Vec<ECPoint>;

    /// Block index of a persisted transaction.
    fn get_transaction_block_index(&self, hash: &UInt256) -> Option<u32>;

    fn max_valid_until_block_increment(&self) -> u32 {
        PolicyContract::DEFAULT_MAX_VALID_UNTIL_BLOCK_INCREMENT
    }

    fn fee_per_byte(&self) -> i64 {
        PolicyContract::DEFAULT_FEE_PER_BYTE
    }

    fn exec_fee_factor(&self) -> i64 {
        PolicyContract::DEFAULT_EXEC_FEE_FACTOR
    }

    /// Runs the Oracle contract's `verify` method for `tx` under the
    /// Verification trigger on a throwaway copy of this snapshot and returns
    /// the GAS it consumed. Fails unless the VM halts.
    fn verify_oracle_response(&self, tx: &Transaction) -> Result<i64, LedgerError>;
}

/// Access to the live chain.
pub trait Ledger: Send + Sync {
    fn snapshot(&self) -> Arc<dyn LedgerSnapshot>;

    /// Hands a fully witnessed transaction to the mempool for relay.
    fn relay(&self, tx: Transaction) -> Result<(), LedgerError>;
}
