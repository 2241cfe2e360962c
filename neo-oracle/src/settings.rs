//! Oracle service configuration.
//!
//! Settings are read from TOML; durations are given in milliseconds.
//!
//! ```toml
//! network = 860833102
//! nodes = ["http://10.0.0.2:10332", "http://10.0.0.3:10332"]
//! max_task_timeout_ms = 432000000
//! max_oracle_timeout_ms = 15000
//! allow_private_host = false
//! allowed_content_types = ["application/json"]
//! https_timeout_ms = 5000
//! auto_start = false
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;
use tracing::warn;
use url::Url;

/// Default network magic (N3 MainNet).
pub const DEFAULT_NETWORK: u32 = 860_833_102;

/// Default timeout of one HTTPS fetch.
pub const DEFAULT_HTTPS_TIMEOUT: Duration = Duration::from_millis(5_000);

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse settings: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Oracle service configuration settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OracleServiceSettings {
    /// Network magic mixed into every signature.
    pub network: u32,
    /// JSON-RPC endpoints of the other oracle nodes.
    pub nodes: Vec<String>,
    /// Age after which a pending task is abandoned locally.
    #[serde(rename = "max_task_timeout_ms", with = "duration_ms")]
    pub max_task_timeout: Duration,
    /// Upper bound for one protocol fetch.
    #[serde(rename = "max_oracle_timeout_ms", with = "duration_ms")]
    pub max_oracle_timeout: Duration,
    pub allow_private_host: bool,
    pub allowed_content_types: Vec<String>,
    #[serde(rename = "https_timeout_ms", with = "duration_ms")]
    pub https_timeout: Duration,
    /// Start automatically once the node has a wallet and is designated.
    pub auto_start: bool,
}

impl Default for OracleServiceSettings {
    fn default() -> Self {
        Self {
            network: DEFAULT_NETWORK,
            nodes: Vec::new(),
            max_task_timeout: Duration::from_millis(432_000_000),
            max_oracle_timeout: Duration::from_millis(15_000),
            allow_private_host: false,
            allowed_content_types: vec!["application/json".to_string()],
            https_timeout: DEFAULT_HTTPS_TIMEOUT,
            auto_start: false,
        }
    }
}

impl OracleServiceSettings {
    pub fn from_toml_str(content: &str) -> Result<Self, SettingsError> {
        let mut settings: Self = toml::from_str(content)?;
        settings.normalize();
        Ok(settings)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Returns true if a content type is allowed.
    pub fn is_content_type_allowed(&self, content_type: &str) -> bool {
        self.allowed_content_types
            .iter()
            .any(|allowed| allowed.eq_ignore_ascii_case(content_type.trim()))
    }

    /// Parsed peer endpoints; malformed entries are skipped with a warning.
    pub fn node_urls(&self) -> Vec<Url> {
        self.nodes
            .iter()
            .filter_map(|node| match Url::parse(node) {
                Ok(url) => Some(url),
                Err(err) => {
                    warn!(target: "neo::oracle", node = %node, %err, "ignoring malformed oracle node url");
                    None
                }
            })
            .collect()
    }

    /// Restores defaults for empty or zero values.
    pub fn normalize(&mut self) {
        if self.allowed_content_types.is_empty() {
            self.allowed_content_types
                .push("application/json".to_string());
        }
        if self.https_timeout.is_zero() {
            self.https_timeout = DEFAULT_HTTPS_TIMEOUT;
        }
        if self.max_oracle_timeout.is_zero() {
            self.max_oracle_timeout = Duration::from_millis(15_000);
        }
        if self.max_task_timeout.is_zero() {
            self.max_task_timeout = Duration::from_millis(432_000_000);
        }
    }
}

mod duration_ms {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        Ok(Duration::from_millis(u64::deserialize(deserializer)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_match_plugin() {
        let settings = OracleServiceSettings::default();
        assert_eq!(settings.network, 860_833_102);
        assert_eq!(settings.max_task_timeout, Duration::from_secs(432_000));
        assert_eq!(settings.max_oracle_timeout, Duration::from_secs(15));
        assert!(settings.is_content_type_allowed("Application/JSON"));
        assert!(!settings.is_content_type_allowed("text/html"));
        assert!(!settings.auto_start);
    }

    #[test]
    fn parses_partial_toml() {
        let settings = OracleServiceSettings::from_toml_str(
            r#"
            network = 894710606
            nodes = ["http://127.0.0.1:20332", "not a url"]
            max_oracle_timeout_ms = 2000
            allowed_content_types = []
            auto_start = true
            "#,
        )
        .unwrap();
        assert_eq!(settings.network, 894_710_606);
        assert_eq!(settings.max_oracle_timeout, Duration::from_secs(2));
        assert_eq!(settings.allowed_content_types, vec!["application/json"]);
        assert_eq!(settings.https_timeout, DEFAULT_HTTPS_TIMEOUT);
        assert!(settings.auto_start);
        assert_eq!(settings.node_urls().len(), 1);
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "https_timeout_ms = 0\nallow_private_host = true").unwrap();
        let settings = OracleServiceSettings::load(file.path()).unwrap();
        assert!(settings.allow_private_host);
        assert_eq!(settings.https_timeout, DEFAULT_HTTPS_TIMEOUT);
    }

    #[test]
    fn rejects_bad_toml() {
        assert!(matches!(
            OracleServiceSettings::from_toml_str("network = \"x\""),
            Err(SettingsError::Parse(_))
        ));
    }
}
