//! Hash functions used by transactions and scripts.

use ripemd::Ripemd160;
use sha2::{Digest, Sha256};

/// Cryptographic hash functions.
pub struct Crypto;

impl Crypto {
    /// Computes SHA-256 hash of the input data.
    ///
    /// # Example
    /// ```
    /// use neo_crypto::Crypto;
    /// let hash = Crypto::sha256(b"Hello, Neo!");
    /// assert_eq!(hash.len(), 32);
    /// ```
    pub fn sha256(data: &[u8]) -> [u8; 32] {
        let mut hasher = Sha256::new();
        hasher.update(data);
        hasher.finalize().into()
    }

    /// Computes RIPEMD-160 hash of the input data.
    pub fn ripemd160(data: &[u8]) -> [u8; 20] {
        let mut hasher = Ripemd160::new();
        hasher.update(data);
        hasher.finalize().into()
    }

    /// `RIPEMD160(SHA256(data))`, the script hash function.
    pub fn hash160(data: &[u8]) -> [u8; 20] {
        Self::ripemd160(&Self::sha256(data))
    }

    /// `SHA256(SHA256(data))`.
    pub fn hash256(data: &[u8]) -> [u8; 32] {
        Self::sha256(&Self::sha256(data))
    }
}
