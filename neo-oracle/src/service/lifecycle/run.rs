use super::super::utils::{designated_oracles, wallet_has_oracle_account};
use super::super::{OracleService, OracleServiceError, OracleStatus};
use crate::ledger::LedgerSnapshot;
use crate::wallet::Wallet;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

impl OracleService {
    /// Starts the request poller and the retry timer with `wallet`'s oracle
    /// keys. Must be called from within a tokio runtime.
    pub fn start(self: &Arc<Self>, wallet: Arc<dyn Wallet>) -> Result<(), OracleServiceError> {
        let _guard = self.lifecycle_lock.lock();
        if self.is_running() {
            return Ok(());
        }

        let snapshot = self.ledger.snapshot();
        let oracles = designated_oracles(snapshot.as_ref());
        if oracles.is_empty() {
            warn!(target: "neo::oracle", "oracle service unavailable (no designated oracles)");
            return Err(OracleServiceError::NoOracleDesignated);
        }
        if !wallet_has_oracle_account(wallet.as_ref(), &oracles) {
            warn!(target: "neo::oracle", "oracle service unavailable (wallet has no oracle key)");
            return Err(OracleServiceError::NoOracleAccount);
        }

        *self.wallet.write() = Some(wallet);
        let cancel = CancellationToken::new();
        *self.cancel.write() = cancel.clone();
        self.set_status(OracleStatus::Running);

        let request_task = tokio::spawn(Arc::clone(self).process_requests_loop(cancel.clone()));
        let timer_task = tokio::spawn(Arc::clone(self).timer_loop(cancel));
        *self.request_task.lock() = Some(request_task);
        *self.timer_task.lock() = Some(timer_task);

        info!(target: "neo::oracle", "oracle service started");
        Ok(())
    }

    /// Cancels both loops and any in-flight fetch.
    pub fn stop(&self) {
        let _guard = self.lifecycle_lock.lock();
        self.cancel.read().cancel();
        *self.wallet.write() = None;
        self.set_status(OracleStatus::Stopped);
        info!(target: "neo::oracle", "oracle service stopped");
    }

    /// Stops the service and waits for both loops to exit.
    pub async fn shutdown(&self) {
        self.stop();
        let request_task = self.request_task.lock().take();
        let timer_task = self.timer_task.lock().take();
        for handle in [request_task, timer_task].into_iter().flatten() {
            if let Err(err) = handle.await {
                warn!(target: "neo::oracle", %err, "oracle loop ended abnormally");
            }
        }
    }

    /// Block-commit hook. Auto-starts the service and stops it once this node
    /// is no longer a designated oracle.
    pub fn on_committing(self: &Arc<Self>, snapshot: &dyn LedgerSnapshot) {
        if self.settings.auto_start && self.status() == OracleStatus::Unstarted {
            let wallet = self
                .wallet_provider
                .read()
                .as_ref()
                .and_then(|provider| provider.get_wallet());
            match wallet {
                Some(wallet) => {
                    if let Err(err) = self.start(wallet) {
                        debug!(target: "neo::oracle", %err, "oracle auto start skipped");
                    }
                }
                None => warn!(target: "neo::oracle", "please open wallet first"),
            }
        }

        if !self.is_running() {
            return;
        }

        let oracles = designated_oracles(snapshot);
        let has_account = self
            .current_wallet()
            .is_some_and(|wallet| wallet_has_oracle_account(wallet.as_ref(), &oracles));
        if oracles.is_empty() || !has_account {
            info!(target: "neo::oracle", "node is no longer an oracle");
            self.stop();
        }
    }

    /// Wallet-change hook; starts the service when `auto_start` is set.
    pub fn on_wallet_changed(self: &Arc<Self>, wallet: Arc<dyn Wallet>) {
        if !self.settings.auto_start {
            return;
        }
        if let Err(err) = self.start(wallet) {
            warn!(target: "neo::oracle", %err, "oracle service not started");
        }
    }
}
