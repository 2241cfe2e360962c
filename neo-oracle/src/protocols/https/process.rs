use super::security::is_internal_host;
use crate::protocols::{OracleProtocol, ProtocolError};
use crate::settings::OracleServiceSettings;
use async_trait::async_trait;
use futures::StreamExt;
use neo_core::payloads::MAX_RESULT_SIZE;
use neo_primitives::OracleResponseCode;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::debug;
use url::Url;

/// Redirects followed before giving up.
const MAX_REDIRECTS: usize = 2;

/// Fetches `https://` URLs with `reqwest`.
#[derive(Debug, Clone)]
pub struct OracleHttpsProtocol {
    client: reqwest::Client,
    timeout: Duration,
    allow_private_host: bool,
    allowed_content_types: Vec<String>,
}

impl OracleHttpsProtocol {
    pub fn new(settings: &OracleServiceSettings) -> Result<Self, ProtocolError> {
        let client = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .build()?;
        Ok(Self {
            client,
            timeout: settings.https_timeout,
            allow_private_host: settings.allow_private_host,
            allowed_content_types: settings.allowed_content_types.clone(),
        })
    }

    fn is_content_type_allowed(&self, content_type: &str) -> bool {
        self.allowed_content_types
            .iter()
            .any(|allowed| allowed.eq_ignore_ascii_case(content_type.trim()))
    }

    async fn fetch(&self, mut uri: Url) -> (OracleResponseCode, String) {
        let mut redirects = MAX_REDIRECTS;
        loop {
            if !self.allow_private_host {
                match is_internal_host(&uri).await {
                    Ok(true) => return (OracleResponseCode::Forbidden, String::new()),
                    Ok(false) => {}
                    Err(_) => return (OracleResponseCode::Timeout, String::new()),
                }
            }

            let request = self
                .client
                .get(uri.clone())
                .timeout(self.timeout)
                .header(
                    reqwest::header::ACCEPT,
                    self.allowed_content_types.join(", "),
                );

            let response = match request.send().await {
                Ok(response) => response,
                Err(err) => {
                    debug!(target: "neo::oracle", url = %uri, %err, "https request failed");
                    return (OracleResponseCode::Timeout, String::new());
                }
            };

            if response.status().is_redirection() {
                let next = response
                    .headers()
                    .get(reqwest::header::LOCATION)
                    .and_then(|value| value.to_str().ok())
                    .and_then(|location| uri.join(location).ok());
                match next {
                    Some(next) if redirects > 0 => {
                        redirects -= 1;
                        uri = next;
                        continue;
                    }
                    _ => return (OracleResponseCode::Timeout, String::new()),
                }
            }

            if response.status() == reqwest::StatusCode::NOT_FOUND {
                return (OracleResponseCode::NotFound, String::new());
            }
            if response.status() == reqwest::StatusCode::FORBIDDEN {
                return (OracleResponseCode::Forbidden, String::new());
            }
            if !response.status().is_success() {
                return (OracleResponseCode::Error, response.status().to_string());
            }

            let content_type = response
                .headers()
                .get(reqwest::header::CONTENT_TYPE)
                .and_then(|value| value.to_str().ok())
                .map(str::to_owned);
            let Some(content_type) = content_type else {
                return (OracleResponseCode::Error, String::new());
            };
            let mut parts = content_type.split(';').map(str::trim);
            let media_type = parts.next().unwrap_or_default();
            if !self.is_content_type_allowed(media_type) {
                return (OracleResponseCode::ContentTypeNotSupported, String::new());
            }

            let charset = parts
                .find_map(|part| part.strip_prefix("charset="))
                .map(|value| value.trim_matches('"').to_ascii_lowercase());
            if let Some(charset) = charset {
                if charset != "utf-8" && charset != "utf8" {
                    return (OracleResponseCode::Error, String::new());
                }
            }

            if let Some(len) = response.content_length() {
                if len > MAX_RESULT_SIZE as u64 {
                    return (OracleResponseCode::ResponseTooLarge, String::new());
                }
            }

            let mut body = Vec::new();
            let mut stream = response.bytes_stream();
            while let Some(chunk) = stream.next().await {
                let Ok(chunk) = chunk else {
                    return (OracleResponseCode::Error, String::new());
                };
                if body.len() + chunk.len() > MAX_RESULT_SIZE {
                    return (OracleResponseCode::ResponseTooLarge, String::new());
                }
                body.extend_from_slice(&chunk);
            }

            return match String::from_utf8(body) {
                Ok(text) => (OracleResponseCode::Success, text),
                Err(_) => (OracleResponseCode::Error, String::new()),
            };
        }
    }
}

#[async_trait]
impl OracleProtocol for OracleHttpsProtocol {
    async fn process(
        &self,
        url: &Url,
        cancel: CancellationToken,
    ) -> Result<(OracleResponseCode, String), ProtocolError> {
        tokio::select! {
            _ = cancel.cancelled() => Err(ProtocolError::Cancelled),
            result = self.fetch(url.clone()) => Ok(result),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_type_match_ignores_case() {
        let protocol = OracleHttpsProtocol::new(&OracleServiceSettings::default()).unwrap();
        assert!(protocol.is_content_type_allowed("Application/JSON"));
        assert!(!protocol.is_content_type_allowed("text/html"));
    }

    #[tokio::test]
    async fn private_hosts_are_forbidden() {
        let protocol = OracleHttpsProtocol::new(&OracleServiceSettings::default()).unwrap();
        let url = Url::parse("https://127.0.0.1/data").unwrap();
        let (code, body) = protocol
            .process(&url, CancellationToken::new())
            .await
            .unwrap();
        assert_eq!(code, OracleResponseCode::Forbidden);
        assert!(body.is_empty());
    }

    #[tokio::test]
    async fn cancelled_token_aborts_fetch() {
        let protocol = OracleHttpsProtocol::new(&OracleServiceSettings::default()).unwrap();
        let cancel = CancellationToken::new();
        cancel.cancel();
        let url = Url::parse("https://127.0.0.1/data").unwrap();
        let result = protocol.process(&url, cancel).await;
        assert!(matches!(result, Err(ProtocolError::Cancelled)));
    }
}
