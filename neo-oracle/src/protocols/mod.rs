//! URL fetch protocols, dispatched by scheme.

mod https;

pub use https::OracleHttpsProtocol;

use async_trait::async_trait;
use dashmap::DashMap;
use neo_primitives::OracleResponseCode;
use std::sync::Arc;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use url::Url;

#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("fetch cancelled")]
    Cancelled,

    #[error("http client error: {0}")]
    Client(#[from] reqwest::Error),

    #[error("{0}")]
    Other(String),
}

/// A fetch protocol for one URL scheme.
#[async_trait]
pub trait OracleProtocol: Send + Sync {
    /// Fetches `url`. Outcomes the network agrees on (not found, forbidden,
    /// too large, ...) come back as response codes; `Err` is reserved for
    /// failures local to this node.
    async fn process(
        &self,
        url: &Url,
        cancel: CancellationToken,
    ) -> Result<(OracleResponseCode, String), ProtocolError>;
}

/// Scheme to protocol map. Schemes are matched case-insensitively.
#[derive(Default)]
pub struct ProtocolRegistry {
    protocols: DashMap<String, Arc<dyn OracleProtocol>>,
}

impl ProtocolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `protocol` for `scheme`, replacing any previous handler.
    pub fn register(&self, scheme: &str, protocol: Arc<dyn OracleProtocol>) {
        self.protocols.insert(scheme.to_ascii_lowercase(), protocol);
    }

    pub fn get(&self, scheme: &str) -> Option<Arc<dyn OracleProtocol>> {
        self.protocols
            .get(&scheme.to_ascii_lowercase())
            .map(|entry| Arc::clone(entry.value()))
    }

    pub fn schemes(&self) -> Vec<String> {
        let mut schemes: Vec<String> = self.protocols.iter().map(|e| e.key().clone()).collect();
        schemes.sort();
        schemes
    }
}

impl std::fmt::Debug for ProtocolRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProtocolRegistry")
            .field("schemes", &self.schemes())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed;

    #[async_trait]
    impl OracleProtocol for Fixed {
        async fn process(
            &self,
            _url: &Url,
            _cancel: CancellationToken,
        ) -> Result<(OracleResponseCode, String), ProtocolError> {
            Ok((OracleResponseCode::Success, "ok".to_string()))
        }
    }

    #[test]
    fn scheme_lookup_ignores_case() {
        let registry = ProtocolRegistry::new();
        registry.register("HTTPS", Arc::new(Fixed));
        assert!(registry.get("https").is_some());
        assert!(registry.get("Https").is_some());
        assert!(registry.get("neofs").is_none());
        assert_eq!(registry.schemes(), vec!["https".to_string()]);
    }
}
