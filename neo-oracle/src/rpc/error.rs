use crate::service::OracleServiceError;
use serde::{Serialize, Serializer};
use serde_json::{json, Value};
use std::fmt::{self, Display};

/// A JSON-RPC error object with Neo's error codes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RpcError {
    code: i32,
    message: String,
    data: Option<String>,
}

impl RpcError {
    pub fn new(code: i32, message: impl Into<String>, data: Option<String>) -> Self {
        let data = data
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty());
        Self {
            code,
            message: message.into(),
            data,
        }
    }

    pub fn code(&self) -> i32 {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn data(&self) -> Option<&str> {
        self.data.as_deref()
    }

    /// Creates a copy of the error carrying an additional data payload.
    pub fn with_data(&self, data: impl Into<String>) -> Self {
        Self::new(self.code, self.message.clone(), Some(data.into()))
    }

    /// Message and data joined the way Neo nodes report them.
    pub fn error_message(&self) -> String {
        match &self.data {
            Some(data) => format!("{} - {}", self.message, data),
            None => self.message.clone(),
        }
    }

    pub fn to_json(&self) -> Value {
        let mut obj = json!({
            "code": self.code,
            "message": self.error_message(),
        });
        if let Some(data) = &self.data {
            obj["data"] = Value::String(data.clone());
        }
        obj
    }

    fn simple(code: i32, message: &'static str) -> Self {
        Self::new(code, message, None)
    }

    pub fn invalid_request() -> Self {
        Self::simple(-32600, "Invalid request")
    }

    pub fn method_not_found() -> Self {
        Self::simple(-32601, "Method not found")
    }

    pub fn invalid_params() -> Self {
        Self::simple(-32602, "Invalid params")
    }

    pub fn internal_server_error() -> Self {
        Self::simple(-32603, "Internal server RpcError")
    }

    pub fn invalid_signature() -> Self {
        Self::simple(-508, "Invalid signature")
    }

    pub fn oracle_disabled() -> Self {
        Self::simple(-602, "Oracle service disabled")
    }

    pub fn oracle_request_finished() -> Self {
        Self::simple(-603, "Oracle request already finished")
    }

    pub fn oracle_request_not_found() -> Self {
        Self::simple(-604, "Oracle request not found")
    }

    pub fn oracle_not_designated_node() -> Self {
        Self::simple(-605, "Not a designated oracle node")
    }
}

impl Display for RpcError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.error_message(), self.code)
    }
}

impl std::error::Error for RpcError {}

impl Serialize for RpcError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

impl From<OracleServiceError> for RpcError {
    fn from(err: OracleServiceError) -> Self {
        match err {
            OracleServiceError::Disabled => RpcError::oracle_disabled(),
            OracleServiceError::RequestFinished => RpcError::oracle_request_finished(),
            OracleServiceError::RequestNotFound => RpcError::oracle_request_not_found(),
            OracleServiceError::NotDesignated(_) => {
                RpcError::oracle_not_designated_node().with_data(err.to_string())
            }
            OracleServiceError::InvalidSignature(message) => {
                RpcError::invalid_signature().with_data(message)
            }
            other => RpcError::internal_server_error().with_data(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_errors_map_to_neo_codes() {
        assert_eq!(RpcError::from(OracleServiceError::Disabled).code(), -602);
        assert_eq!(RpcError::from(OracleServiceError::RequestFinished).code(), -603);
        assert_eq!(RpcError::from(OracleServiceError::RequestNotFound).code(), -604);

        let err = RpcError::from(OracleServiceError::NotDesignated("02ab".into()));
        assert_eq!(err.code(), -605);
        assert_eq!(err.data(), Some("02ab isn't an oracle node."));

        let err = RpcError::from(OracleServiceError::InvalidSignature("bad".into()));
        assert_eq!(err.code(), -508);
        assert_eq!(err.data(), Some("bad"));
    }

    #[test]
    fn blank_data_is_dropped() {
        let err = RpcError::invalid_params().with_data("   ");
        assert_eq!(err.data(), None);
        assert_eq!(err.to_json(), json!({"code": -32602, "message": "Invalid params"}));
    }

    #[test]
    fn json_carries_data() {
        let err = RpcError::invalid_params().with_data("Invalid requestId: \"x\"");
        let value = serde_json::to_value(&err).unwrap();
        assert_eq!(value["code"], -32602);
        assert_eq!(value["message"], "Invalid params - Invalid requestId: \"x\"");
        assert_eq!(value["data"], "Invalid requestId: \"x\"");
    }
}
