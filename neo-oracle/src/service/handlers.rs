use super::utils::{ledger_height, response_message};
use super::{OracleService, OracleServiceError};
use neo_core::{ECPoint, Role};
use tracing::debug;

/// A signature relayed by a peer oracle through `submitoracleresponse`.
#[derive(Debug, Clone)]
pub struct SubmitOracleResponse {
    pub oracle_pub: ECPoint,
    pub request_id: u64,
    pub tx_sign: Vec<u8>,
    pub msg_sign: Vec<u8>,
}

impl OracleService {
    /// Accepts a peer's signature for a pending request.
    pub fn submit_oracle_response(
        &self,
        submission: SubmitOracleResponse,
    ) -> Result<(), OracleServiceError> {
        if !self.is_running() {
            return Err(OracleServiceError::Disabled);
        }
        let SubmitOracleResponse {
            oracle_pub,
            request_id,
            tx_sign,
            msg_sign,
        } = submission;

        if self.finished_cache.contains_key(&request_id) {
            return Err(OracleServiceError::RequestFinished);
        }

        let snapshot = self.ledger.snapshot();
        let height = ledger_height(snapshot.as_ref());
        let oracles = snapshot.get_designated_by_role(Role::Oracle, height);
        if !oracles.contains(&oracle_pub) {
            return Err(OracleServiceError::NotDesignated(oracle_pub.to_string()));
        }
        if snapshot.get_request(request_id).is_none() {
            return Err(OracleServiceError::RequestNotFound);
        }

        let message = response_message(&oracle_pub, request_id, &tx_sign);
        if !oracle_pub.verify_signature(&message, &msg_sign) {
            return Err(OracleServiceError::InvalidSignature(format!(
                "Invalid oracle response transaction signature from '{oracle_pub}'."
            )));
        }

        debug!(target: "neo::oracle", request_id, oracle = %oracle_pub, "oracle signature received");
        self.add_response_tx_sign(
            snapshot.as_ref(),
            request_id,
            oracle_pub,
            tx_sign,
            None,
            None,
            None,
        )
    }
}
