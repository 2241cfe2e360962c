use super::utils::response_message;
use super::OracleService;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use futures::future::join_all;
use neo_core::KeyPair;
use serde_json::json;
use std::sync::atomic::Ordering;
use tracing::warn;

impl OracleService {
    /// Sends this node's signature for `request_id` to every configured peer.
    /// Delivery failures are logged and otherwise ignored.
    pub(super) async fn send_response_signature(
        &self,
        request_id: u64,
        tx_sign: Vec<u8>,
        key: &KeyPair,
    ) {
        let message = response_message(key.public_key(), request_id, &tx_sign);
        let msg_sign = match key.sign(&message) {
            Ok(sign) => sign,
            Err(err) => {
                warn!(target: "neo::oracle", request_id, %err, "cannot sign oracle message");
                return;
            }
        };

        let id = self.counter.fetch_add(1, Ordering::SeqCst) + 1;
        let body = json!({
            "id": id,
            "jsonrpc": "2.0",
            "method": "submitoracleresponse",
            "params": [
                STANDARD.encode(key.public_key().as_bytes()),
                request_id,
                STANDARD.encode(&tx_sign),
                STANDARD.encode(&msg_sign),
            ],
        });

        let body = &body;
        let sends = self.nodes.iter().map(|url| async move {
            if let Err(err) = self.transport.post(url, body).await {
                warn!(
                    target: "neo::oracle",
                    request_id,
                    node = %url,
                    %err,
                    "failed to send the response signature"
                );
            }
        });
        join_all(sends).await;
    }
}
