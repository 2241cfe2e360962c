//! # Neo Primitives
//!
//! Fundamental value types shared by the oracle crates:
//! - `UInt160`: 160-bit script hashes
//! - `UInt256`: 256-bit transaction hashes
//! - `OracleResponseCode`: outcome codes carried by oracle responses
//! - `WitnessScope`: signer scopes
//!
//! ## Example
//!
//! ```rust
//! use neo_primitives::{UInt160, UInt256};
//!
//! let hash = UInt256::zero();
//! assert!(hash.is_zero());
//!
//! let script_hash = UInt160::parse("0xfe924b7cfe89ddd271abaf7210a80a7e11178758").unwrap();
//! assert_eq!(script_hash.to_string(), "0xfe924b7cfe89ddd271abaf7210a80a7e11178758");
//! ```

pub mod error;
pub mod oracle_response_code;
pub mod uint160;
pub mod uint256;
pub mod witness_scope;

pub use error::{PrimitiveError, PrimitiveResult};
pub use oracle_response_code::OracleResponseCode;
pub use uint160::{UInt160, UINT160_SIZE};
pub use uint256::{UInt256, UINT256_SIZE};
pub use witness_scope::WitnessScope;
