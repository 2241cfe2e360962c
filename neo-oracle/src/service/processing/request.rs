use super::super::utils::{designated_oracles, oracle_keys};
use super::super::{OracleService, OracleServiceError};
use crate::filter::filter_json;
use crate::ledger::LedgerSnapshot;
use futures::future::join_all;
use neo_core::{ECPoint, KeyPair, OracleRequest, OracleResponse, OracleResponseCode};
use tracing::{debug, info, warn};

impl OracleService {
    /// Fetches the request's URL once and answers every outstanding request
    /// that asks for the same URL.
    pub(in super::super) async fn process_request(
        &self,
        snapshot: &dyn LedgerSnapshot,
        request: &OracleRequest,
    ) {
        info!(
            target: "neo::oracle",
            tx = %request.original_tx_id,
            url = %request.url,
            "process oracle request start"
        );

        let (code, data) = self.process_url(&request.url).await;

        info!(
            target: "neo::oracle",
            tx = %request.original_tx_id,
            url = %request.url,
            code = %code,
            "process oracle request end"
        );

        let oracle_nodes = designated_oracles(snapshot);
        let keys = self
            .current_wallet()
            .map(|wallet| oracle_keys(wallet.as_ref(), &oracle_nodes))
            .unwrap_or_default();

        for (request_id, pending) in snapshot.get_requests_by_url(&request.url) {
            let mut response_code = code;
            let mut result = Vec::new();
            if code == OracleResponseCode::Success {
                match filter_json(&data, pending.filter.as_deref()) {
                    Ok(filtered) => result = filtered,
                    Err(err) => {
                        response_code = OracleResponseCode::Error;
                        warn!(
                            target: "neo::oracle",
                            request_id,
                            filter = pending.filter.as_deref().unwrap_or_default(),
                            %err,
                            "oracle filter failed"
                        );
                    }
                }
            }

            let response = OracleResponse::new(request_id, response_code, result);
            if let Err(err) = self
                .respond(snapshot, &pending, response, &oracle_nodes, &keys)
                .await
            {
                warn!(target: "neo::oracle", request_id, %err, "oracle response not built");
            }
        }
    }

    async fn respond(
        &self,
        snapshot: &dyn LedgerSnapshot,
        request: &OracleRequest,
        mut response: OracleResponse,
        oracle_nodes: &[ECPoint],
        keys: &[KeyPair],
    ) -> Result<(), OracleServiceError> {
        let request_id = response.id;
        let response_tx =
            Self::create_response_tx(snapshot, request, &mut response, oracle_nodes, false)?;
        let mut backup = OracleResponse::new(
            request_id,
            OracleResponseCode::ConsensusUnreachable,
            Vec::new(),
        );
        let backup_tx = Self::create_response_tx(snapshot, request, &mut backup, oracle_nodes, true)?;

        info!(
            target: "neo::oracle",
            request_id,
            tx = %response_tx.hash(),
            code = %response.code,
            result = %hex::encode(&response.result),
            valid_until_block = response_tx.valid_until_block(),
            backup_tx = %backup_tx.hash(),
            backup_valid_until_block = backup_tx.valid_until_block(),
            "built oracle response tx"
        );

        let network = self.settings.network;
        let mut sends = Vec::with_capacity(keys.len());
        for key in keys {
            let sign_err = |err: neo_core::CoreError| OracleServiceError::Processing(err.to_string());
            let tx_sign = response_tx.sign(key, network).map_err(sign_err)?;
            let backup_sign = backup_tx.sign(key, network).map_err(sign_err)?;

            if let Err(err) = self.add_response_tx_sign(
                snapshot,
                request_id,
                key.public_key().clone(),
                tx_sign.clone(),
                Some(response_tx.clone()),
                Some(backup_tx.clone()),
                Some(backup_sign),
            ) {
                debug!(target: "neo::oracle", request_id, %err, "local signature not recorded");
                continue;
            }

            debug!(
                target: "neo::oracle",
                request_id,
                oracle = %key.public_key(),
                sign = %hex::encode(&tx_sign),
                "send oracle sign data"
            );
            sends.push(self.send_response_signature(request_id, tx_sign, key));
        }
        join_all(sends).await;
        Ok(())
    }
}
