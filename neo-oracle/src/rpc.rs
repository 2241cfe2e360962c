//! JSON-RPC surface of the oracle service.
//!
//! The node's RPC server owns the transport; this module provides the method
//! registry and the `submitoracleresponse` handler it dispatches to.

mod error;
mod module;
mod oracle;

pub use error::RpcError;
pub use module::{
    handle_single_request, RpcModule, RpcParams, RpcRequest, RpcResponse, RpcResult,
    JSONRPC_VERSION,
};
pub use oracle::{register_oracle_methods, SUBMIT_ORACLE_RESPONSE};
