//! # Neo Core
//!
//! The slice of the Neo N3 ledger model an oracle node needs in order to
//! build, size, hash and co-sign oracle response transactions.
//!
//! - [`io`]: variable-length size helpers and a little-endian [`io::BinaryWriter`]
//! - [`script`]: VM opcodes, prices and a [`script::ScriptBuilder`]
//! - [`payloads`]: [`payloads::Transaction`] and its signers, witnesses and attributes
//! - [`contract`]: signature and m-of-n multisig verification contracts
//! - [`native`]: identity of the native Oracle contract, designation roles and
//!   the on-chain [`native::OracleRequest`] record

pub mod contract;
pub mod error;
pub mod io;
pub mod native;
pub mod payloads;
pub mod script;

pub use contract::{bft_threshold, Contract};
pub use error::{CoreError, CoreResult};
pub use native::{OracleContract, OracleRequest, PolicyContract, Role};
pub use payloads::{
    OracleResponse, Signer, Transaction, TransactionAttribute, Witness, HEADER_SIZE,
};

pub use neo_crypto::{ECPoint, KeyPair};
pub use neo_primitives::{OracleResponseCode, UInt160, UInt256, WitnessScope};
