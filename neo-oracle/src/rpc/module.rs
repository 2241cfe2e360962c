use super::RpcError;
use dashmap::DashMap;
use futures::future::{BoxFuture, FutureExt};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::future::Future;
use std::sync::Arc;

pub const JSONRPC_VERSION: &str = "2.0";

pub type RpcResult = Result<Value, RpcError>;

type RpcMethod = Arc<dyn Send + Sync + Fn(RpcParams) -> BoxFuture<'static, RpcResult>>;

#[derive(Debug, Clone, Deserialize)]
pub struct RpcRequest {
    #[serde(default)]
    pub jsonrpc: String,
    #[serde(default)]
    pub id: Value,
    pub method: String,
    #[serde(default)]
    pub params: Value,
}

impl RpcRequest {
    pub fn is_version_valid(&self) -> bool {
        self.jsonrpc == JSONRPC_VERSION
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RpcResponse {
    pub jsonrpc: &'static str,
    pub id: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<RpcError>,
}

impl RpcResponse {
    pub fn result(id: Value, result: Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            id,
            result: Some(result),
            error: None,
        }
    }

    pub fn error(id: Value, error: RpcError) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            id,
            result: None,
            error: Some(error),
        }
    }
}

/// Positional parameters of a call.
#[derive(Debug, Clone, Default)]
pub struct RpcParams(Vec<Value>);

impl RpcParams {
    pub fn new(params: Value) -> Self {
        match params {
            Value::Array(values) => Self(values),
            Value::Null => Self(Vec::new()),
            other => Self(vec![other]),
        }
    }

    pub fn get(&self, index: usize) -> Option<&Value> {
        self.0.get(index)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Method name to handler registry.
#[derive(Default)]
pub struct RpcModule {
    methods: DashMap<String, RpcMethod>,
}

impl RpcModule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<F, Fut>(&self, name: &str, func: F)
    where
        F: Send + Sync + 'static + Fn(RpcParams) -> Fut,
        Fut: Future<Output = RpcResult> + Send + 'static,
    {
        let handler = Arc::new(move |params: RpcParams| func(params).boxed()) as RpcMethod;
        self.methods.insert(name.to_ascii_lowercase(), handler);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.methods.contains_key(&name.to_ascii_lowercase())
    }

    pub async fn call(&self, request: RpcRequest) -> RpcResponse {
        if !request.is_version_valid() {
            return RpcResponse::error(
                request.id,
                RpcError::invalid_request()
                    .with_data(format!("jsonrpc must be \"{JSONRPC_VERSION}\"")),
            );
        }
        let method = match self.methods.get(&request.method.to_ascii_lowercase()) {
            Some(handler) => Arc::clone(handler.value()),
            None => {
                return RpcResponse::error(
                    request.id,
                    RpcError::method_not_found().with_data(request.method),
                );
            }
        };
        match method(RpcParams::new(request.params)).await {
            Ok(result) => RpcResponse::result(request.id, result),
            Err(err) => RpcResponse::error(request.id, err),
        }
    }
}

impl std::fmt::Debug for RpcModule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let methods: Vec<String> = self.methods.iter().map(|e| e.key().clone()).collect();
        f.debug_struct("RpcModule").field("methods", &methods).finish()
    }
}

pub async fn handle_single_request(module: &RpcModule, value: Value) -> RpcResponse {
    match serde_json::from_value::<RpcRequest>(value) {
        Ok(request) => module.call(request).await,
        Err(err) => RpcResponse::error(
            Value::Null,
            RpcError::invalid_request().with_data(err.to_string()),
        ),
    }
}
