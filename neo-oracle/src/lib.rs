//! # Neo Oracle
//!
//! Oracle service for a Neo N3 node.
//!
//! Designated oracle nodes watch the Oracle contract for outstanding
//! requests, fetch the requested URL, filter the payload, and co-sign a
//! response transaction. Signatures are exchanged over JSON-RPC until an
//! m-of-n quorum (`m = n - (n - 1) / 3`) is reached, at which point exactly
//! one node-local finalization relays the transaction to the ledger.
//!
//! Every request carries two candidate transactions: the primary response
//! and a backup answering `ConsensusUnreachable`. Whichever collects a
//! quorum first is relayed.
//!
//! ## Components
//!
//! - [`OracleService`]: poll loop, response builder, signature aggregator,
//!   retry timer and lifecycle
//! - [`protocols`]: URL fetch protocols keyed by scheme (HTTPS built in)
//! - [`filter`]: JSONPath filtering of fetched payloads
//! - [`rpc`]: the `submitoracleresponse` JSON-RPC method
//! - [`ledger`], [`wallet`], [`transport`], [`time_provider`]: collaborator
//!   traits the host node implements

pub mod filter;
pub mod ledger;
pub mod protocols;
pub mod rpc;
pub mod service;
pub mod settings;
pub mod time_provider;
pub mod transport;
pub mod wallet;

pub use filter::{filter_json, FilterError};
pub use ledger::{Ledger, LedgerError, LedgerSnapshot};
pub use protocols::{OracleHttpsProtocol, OracleProtocol, ProtocolError, ProtocolRegistry};
pub use service::{OracleService, OracleServiceError, OracleStatus, SubmitOracleResponse};
pub use settings::{OracleServiceSettings, SettingsError};
pub use time_provider::{ManualTimeSource, SystemTimeSource, TimeSource};
pub use transport::{HttpPeerTransport, PeerTransport, TransportError};
pub use wallet::{KeyPairWallet, Wallet, WalletAccount, WalletProvider};
