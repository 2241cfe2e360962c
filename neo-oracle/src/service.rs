//! Oracle service runtime.

mod broadcast;
mod handlers;
mod lifecycle;
mod processing;
mod task;
mod transactions;
mod utils;


pub use handlers::SubmitOracleResponse;

use crate::ledger::Ledger;
use crate::protocols::ProtocolRegistry;
use crate::settings::OracleServiceSettings;
use crate::time_provider::TimeSource;
use crate::transport::PeerTransport;
use crate::wallet::{Wallet, WalletProvider};
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use parking_lot::{Mutex, RwLock};
use std::sync::atomic::{AtomicU64, AtomicU8};
use std::sync::Arc;
use std::time::Duration;
use task::OracleTask;
use thiserror::Error;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use url::Url;

/// Period of the retry timer; tasks older than this get their backup signature resent.
pub const REFRESH_INTERVAL: Duration = Duration::from_secs(3 * 60);
/// How long finished request ids are remembered.
pub const FINISHED_CACHE_TTL: Duration = Duration::from_secs(3 * 24 * 60 * 60);
/// Pause between two passes of the request poller.
pub const POLL_INTERVAL: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OracleStatus {
    Unstarted,
    Running,
    Stopped,
}

impl OracleStatus {
    fn as_u8(self) -> u8 {
        match self {
            OracleStatus::Unstarted => 0,
            OracleStatus::Running => 1,
            OracleStatus::Stopped => 2,
        }
    }

    fn from_u8(value: u8) -> Self {
        match value {
            1 => OracleStatus::Running,
            2 => OracleStatus::Stopped,
            _ => OracleStatus::Unstarted,
        }
    }
}

impl std::fmt::Display for OracleStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            OracleStatus::Unstarted => "Unstarted",
            OracleStatus::Running => "Running",
            OracleStatus::Stopped => "Stopped",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum OracleServiceError {
    #[error("oracle service disabled")]
    Disabled,
    #[error("oracle request already finished")]
    RequestFinished,
    #[error("oracle request not found")]
    RequestNotFound,
    #[error("{0} isn't an oracle node.")]
    NotDesignated(String),
    #[error("{0}")]
    InvalidSignature(String),
    #[error("oracle request transaction not found")]
    RequestTransactionNotFound,
    #[error("oracle response build failed: {0}")]
    BuildFailed(String),
    #[error("no oracle is designated")]
    NoOracleDesignated,
    #[error("there is no oracle account in wallet")]
    NoOracleAccount,
    #[error("oracle processing error: {0}")]
    Processing(String),
}

/// Oracle service runtime.
///
/// Shared as `Arc<OracleService>`: the poll loop and the retry timer each hold
/// a clone while running.
pub struct OracleService {
    settings: OracleServiceSettings,
    nodes: Vec<Url>,
    ledger: Arc<dyn Ledger>,
    transport: Arc<dyn PeerTransport>,
    time: Arc<dyn TimeSource>,
    protocols: ProtocolRegistry,
    status: AtomicU8,
    wallet: RwLock<Option<Arc<dyn Wallet>>>,
    wallet_provider: RwLock<Option<Arc<dyn WalletProvider>>>,
    pending_queue: DashMap<u64, Arc<OracleTask>>,
    finished_cache: DashMap<u64, DateTime<Utc>>,
    cancel: RwLock<CancellationToken>,
    /// Serializes `start` and `stop` so one token governs the running loops.
    lifecycle_lock: Mutex<()>,
    request_task: Mutex<Option<JoinHandle<()>>>,
    timer_task: Mutex<Option<JoinHandle<()>>>,
    counter: AtomicU64,
}

impl std::fmt::Debug for OracleService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OracleService")
            .field("status", &self.status())
            .field("pending", &self.pending_queue.len())
            .field("finished", &self.finished_cache.len())
            .field("protocols", &self.protocols)
            .finish()
    }
}
