use super::super::OracleService;
use neo_core::OracleResponseCode;
use tracing::debug;
use url::Url;

impl OracleService {
    /// Fetches `url` with the protocol registered for its scheme, bounded by
    /// `max_oracle_timeout` and the service cancellation token.
    pub async fn process_url(&self, url: &str) -> (OracleResponseCode, String) {
        let uri = match Url::parse(url) {
            Ok(uri) => uri,
            Err(_) => return (OracleResponseCode::Error, format!("Invalid url:<{url}>")),
        };

        let Some(protocol) = self.protocols.get(uri.scheme()) else {
            return (
                OracleResponseCode::ProtocolNotSupported,
                format!("Invalid Protocol:<{url}>"),
            );
        };

        let cancel = self.cancel_token().child_token();
        let fetch = protocol.process(&uri, cancel.clone());
        let result = tokio::time::timeout(self.settings.max_oracle_timeout, fetch).await;
        cancel.cancel();

        match result {
            Ok(Ok(outcome)) => outcome,
            Ok(Err(err)) => {
                debug!(target: "neo::oracle", url, %err, "oracle fetch failed");
                (OracleResponseCode::Error, format!("Request <{url}> Error:{err}"))
            }
            Err(_) => (
                OracleResponseCode::Error,
                format!("Request <{url}> Error:timed out"),
            ),
        }
    }
}
