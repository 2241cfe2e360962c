use super::super::{OracleService, OracleStatus, OracleTask, FINISHED_CACHE_TTL, POLL_INTERVAL, REFRESH_INTERVAL};
use futures::future::join_all;
use neo_core::{KeyPair, OracleRequest};
use std::collections::HashSet;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

impl OracleService {
    pub(in super::super) async fn process_requests_loop(self: Arc<Self>, cancel: CancellationToken) {
        while !cancel.is_cancelled() {
            let snapshot = self.ledger.snapshot();
            let requests = snapshot.get_requests();
            self.sync_pending_queue(&requests);

            for (request_id, request) in &requests {
                if cancel.is_cancelled() {
                    break;
                }
                if self.is_request_finished(*request_id) {
                    continue;
                }
                let task = self
                    .pending_queue
                    .get(request_id)
                    .map(|entry| Arc::clone(entry.value()));
                if task.map_or(true, |task| !task.has_tx()) {
                    self.process_request(snapshot.as_ref(), request).await;
                }
            }

            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = tokio::time::sleep(POLL_INTERVAL) => {}
            }
        }

        // A restart installs a fresh token; only the latest loop may report the stop.
        if self.cancel_token().is_cancelled() {
            self.set_status(OracleStatus::Stopped);
        }
        debug!(target: "neo::oracle", "oracle request loop exited");
    }

    /// Drops pending tasks whose request is no longer outstanding on chain.
    pub(in super::super) fn sync_pending_queue(&self, requests: &[(u64, OracleRequest)]) {
        let outstanding: HashSet<u64> = requests.iter().map(|(id, _)| *id).collect();
        self.pending_queue.retain(|id, _| outstanding.contains(id));
    }

    pub(in super::super) async fn timer_loop(self: Arc<Self>, cancel: CancellationToken) {
        loop {
            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = tokio::time::sleep(REFRESH_INTERVAL) => {}
            }
            self.on_timer().await;
        }
        debug!(target: "neo::oracle", "oracle timer exited");
    }

    /// One retry pass: evicts tasks older than `max_task_timeout`, resends the
    /// backup signature of tasks older than [`REFRESH_INTERVAL`] and prunes
    /// the finished cache.
    pub(in super::super) async fn on_timer(&self) {
        let now = self.time.utc_now();
        let tasks: Vec<Arc<OracleTask>> = self
            .pending_queue
            .iter()
            .map(|entry| Arc::clone(entry.value()))
            .collect();
        let wallet = self.current_wallet();

        let mut expired = Vec::new();
        let mut resend: Vec<(u64, Vec<u8>, KeyPair)> = Vec::new();
        for task in tasks {
            let age = (now - task.timestamp).to_std().unwrap_or_default();
            if age >= self.settings.max_task_timeout {
                expired.push(task);
                continue;
            }
            if age <= REFRESH_INTERVAL {
                continue;
            }
            let Some(wallet) = wallet.as_ref() else {
                continue;
            };
            let state = task.state.lock();
            for account in wallet.get_accounts() {
                let Some(key) = account.get_key() else {
                    continue;
                };
                if let Some(sign) = state.backup_signs.get(key.public_key()) {
                    resend.push((task.id, sign.clone(), key.clone()));
                }
            }
        }

        join_all(
            resend
                .into_iter()
                .map(|(request_id, sign, key)| async move {
                    self.send_response_signature(request_id, sign, &key).await;
                }),
        )
        .await;

        for task in expired {
            if self
                .pending_queue
                .remove_if(&task.id, |_, current| Arc::ptr_eq(current, &task))
                .is_some()
            {
                info!(
                    target: "neo::oracle",
                    request_id = task.id,
                    url = %task.request.url,
                    "oracle task timed out"
                );
            }
        }

        self.finished_cache.retain(|_, finished| {
            (now - *finished)
                .to_std()
                .map_or(true, |age| age <= FINISHED_CACHE_TTL)
        });
    }
}
