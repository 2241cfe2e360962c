use super::super::{OracleService, OracleServiceError, OracleServiceSettings, OracleStatus};
use crate::ledger::Ledger;
use crate::protocols::{OracleHttpsProtocol, OracleProtocol, ProtocolRegistry};
use crate::time_provider::{SystemTimeSource, TimeSource};
use crate::transport::{HttpPeerTransport, PeerTransport, SIGNATURE_SEND_TIMEOUT};
use crate::wallet::{Wallet, WalletProvider};
use dashmap::DashMap;
use parking_lot::{Mutex, RwLock};
use std::sync::atomic::{AtomicU64, AtomicU8, Ordering};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

impl OracleService {
    /// Creates a stopped service with the HTTPS protocol registered, a
    /// `reqwest` peer transport and the system clock.
    pub fn new(
        settings: OracleServiceSettings,
        ledger: Arc<dyn Ledger>,
    ) -> Result<Self, OracleServiceError> {
        let mut settings = settings;
        settings.normalize();

        let transport = HttpPeerTransport::new(SIGNATURE_SEND_TIMEOUT)
            .map_err(|err| OracleServiceError::Processing(err.to_string()))?;
        let https = OracleHttpsProtocol::new(&settings)
            .map_err(|err| OracleServiceError::Processing(err.to_string()))?;
        let protocols = ProtocolRegistry::new();
        protocols.register("https", Arc::new(https));

        let nodes = settings.node_urls();

        Ok(Self {
            settings,
            nodes,
            ledger,
            transport: Arc::new(transport),
            time: Arc::new(SystemTimeSource),
            protocols,
            status: AtomicU8::new(OracleStatus::Unstarted.as_u8()),
            wallet: RwLock::new(None),
            wallet_provider: RwLock::new(None),
            pending_queue: DashMap::new(),
            finished_cache: DashMap::new(),
            cancel: RwLock::new(CancellationToken::new()),
            lifecycle_lock: Mutex::new(()),
            request_task: Mutex::new(None),
            timer_task: Mutex::new(None),
            counter: AtomicU64::new(0),
        })
    }

    pub fn with_transport(mut self, transport: Arc<dyn PeerTransport>) -> Self {
        self.transport = transport;
        self
    }

    pub fn with_time_source(mut self, time: Arc<dyn TimeSource>) -> Self {
        self.time = time;
        self
    }

    /// Registers a fetch protocol for `scheme`, replacing any existing one.
    pub fn register_protocol(&self, scheme: &str, protocol: Arc<dyn OracleProtocol>) {
        self.protocols.register(scheme, protocol);
    }

    pub fn set_wallet_provider(&self, provider: Arc<dyn WalletProvider>) {
        *self.wallet_provider.write() = Some(provider);
    }

    pub fn settings(&self) -> &OracleServiceSettings {
        &self.settings
    }

    pub fn status(&self) -> OracleStatus {
        OracleStatus::from_u8(self.status.load(Ordering::SeqCst))
    }

    pub fn is_running(&self) -> bool {
        self.status() == OracleStatus::Running
    }

    pub(in super::super) fn set_status(&self, status: OracleStatus) {
        self.status.store(status.as_u8(), Ordering::SeqCst);
    }

    pub(in super::super) fn current_wallet(&self) -> Option<Arc<dyn Wallet>> {
        self.wallet.read().clone()
    }

    pub(in super::super) fn cancel_token(&self) -> CancellationToken {
        self.cancel.read().clone()
    }

    /// Number of requests still collecting signatures.
    pub fn pending_count(&self) -> usize {
        self.pending_queue.len()
    }

    pub fn is_pending(&self, request_id: u64) -> bool {
        self.pending_queue.contains_key(&request_id)
    }

    pub fn is_request_finished(&self, request_id: u64) -> bool {
        self.finished_cache.contains_key(&request_id)
    }
}
