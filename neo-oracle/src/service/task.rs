use chrono::{DateTime, Utc};
use neo_core::{ECPoint, OracleRequest, Transaction};
use parking_lot::Mutex;
use std::collections::BTreeMap;

/// One in-flight request and the signatures gathered for it.
pub(crate) struct OracleTask {
    pub(crate) id: u64,
    pub(crate) request: OracleRequest,
    pub(crate) timestamp: DateTime<Utc>,
    pub(crate) state: Mutex<TaskState>,
}

#[derive(Default)]
pub(crate) struct TaskState {
    pub(crate) tx: Option<Transaction>,
    pub(crate) backup_tx: Option<Transaction>,
    /// Verified signatures over `tx`, ordered by public key.
    pub(crate) signs: BTreeMap<ECPoint, Vec<u8>>,
    pub(crate) backup_signs: BTreeMap<ECPoint, Vec<u8>>,
}

impl OracleTask {
    pub(crate) fn new(id: u64, request: OracleRequest, timestamp: DateTime<Utc>) -> Self {
        Self {
            id,
            request,
            timestamp,
            state: Mutex::new(TaskState::default()),
        }
    }

    pub(crate) fn has_tx(&self) -> bool {
        self.state.lock().tx.is_some()
    }
}
