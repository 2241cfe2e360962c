//! Outbound delivery of oracle signatures to peer nodes.

use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Timeout of one signature POST.
pub const SIGNATURE_SEND_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("peer answered with status {0}")]
    Status(u16),
}

/// Posts JSON-RPC envelopes to peer oracle nodes.
#[async_trait]
pub trait PeerTransport: Send + Sync {
    async fn post(&self, url: &Url, body: &Value) -> Result<(), TransportError>;
}

/// `reqwest` backed transport.
#[derive(Debug, Clone)]
pub struct HttpPeerTransport {
    client: reqwest::Client,
}

impl HttpPeerTransport {
    pub fn new(timeout: Duration) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl PeerTransport for HttpPeerTransport {
    async fn post(&self, url: &Url, body: &Value) -> Result<(), TransportError> {
        let response = self.client.post(url.clone()).json(body).send().await?;
        if !response.status().is_success() {
            return Err(TransportError::Status(response.status().as_u16()));
        }
        Ok(())
    }
}
