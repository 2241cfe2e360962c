//! HTTPS oracle protocol.

mod process;
mod security;

pub use process::OracleHttpsProtocol;
