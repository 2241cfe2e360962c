//! # Neo Crypto
//!
//! Cryptographic primitives needed to build and co-sign oracle response
//! transactions:
//!
//! - [`Crypto`]: SHA-256, RIPEMD-160, Hash160 and Hash256 helpers
//! - [`ECPoint`]: a compressed secp256r1 public key with Neo's ordering
//! - [`KeyPair`]: a secp256r1 private key producing 64-byte `r || s` signatures
//!
//! ## Example
//!
//! ```rust
//! use neo_crypto::KeyPair;
//!
//! let key = KeyPair::generate();
//! let signature = key.sign(b"payload").unwrap();
//! assert!(key.public_key().verify_signature(b"payload", &signature));
//! ```

pub mod ecc;
pub mod error;
pub mod hash;
pub mod key_pair;

pub use ecc::ECPoint;
pub use error::{CryptoError, CryptoResult};
pub use hash::Crypto;
pub use key_pair::KeyPair;
