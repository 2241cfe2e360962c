//! secp256r1 public keys.

use crate::error::{CryptoError, CryptoResult};
use p256::ecdsa::signature::Verifier;
use p256::ecdsa::{Signature, VerifyingKey};
use p256::elliptic_curve::sec1::ToEncodedPoint;
use p256::PublicKey;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Length of a compressed secp256r1 point.
pub const COMPRESSED_SIZE: usize = 33;

/// Length of an `r || s` ECDSA signature.
pub const SIGNATURE_SIZE: usize = 64;

/// A point on secp256r1, always held in compressed form.
///
/// Points order by their X coordinate, then Y, which is the order multisig
/// redeem scripts list their keys in and the order invocation scripts push
/// signatures in.
#[derive(Clone)]
pub struct ECPoint {
    compressed: [u8; COMPRESSED_SIZE],
    key: PublicKey,
}

impl ECPoint {
    /// Decodes a SEC1 encoded point (compressed or uncompressed).
    pub fn from_bytes(bytes: &[u8]) -> CryptoResult<Self> {
        let key = PublicKey::from_sec1_bytes(bytes)
            .map_err(|err| CryptoError::InvalidPublicKey(err.to_string()))?;
        Ok(Self::from_public_key(key))
    }

    /// Parses a hex encoded point.
    pub fn from_hex(value: &str) -> CryptoResult<Self> {
        let bytes =
            hex::decode(value).map_err(|err| CryptoError::InvalidPublicKey(err.to_string()))?;
        Self::from_bytes(&bytes)
    }

    pub(crate) fn from_public_key(key: PublicKey) -> Self {
        let mut compressed = [0u8; COMPRESSED_SIZE];
        compressed.copy_from_slice(key.to_encoded_point(true).as_bytes());
        Self { compressed, key }
    }

    /// The 33-byte compressed encoding.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8; COMPRESSED_SIZE] {
        &self.compressed
    }

    #[must_use]
    pub fn encode_point(&self, compressed: bool) -> Vec<u8> {
        if compressed {
            self.compressed.to_vec()
        } else {
            self.key.to_encoded_point(false).as_bytes().to_vec()
        }
    }

    /// Verifies a 64-byte `r || s` signature over `message` (SHA-256 digest).
    ///
    /// Anything that is not exactly 64 bytes is rejected.
    #[must_use]
    pub fn verify_signature(&self, message: &[u8], signature: &[u8]) -> bool {
        if signature.len() != SIGNATURE_SIZE {
            return false;
        }
        let Ok(signature) = Signature::from_slice(signature) else {
            return false;
        };
        VerifyingKey::from(&self.key)
            .verify(message, &signature)
            .is_ok()
    }
}

impl PartialEq for ECPoint {
    fn eq(&self, other: &Self) -> bool {
        self.compressed == other.compressed
    }
}

impl Eq for ECPoint {}

impl Hash for ECPoint {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.compressed.hash(state);
    }
}

impl Ord for ECPoint {
    fn cmp(&self, other: &Self) -> Ordering {
        // Uncompressed layout is 0x04 || X || Y, both big-endian.
        let left = self.key.to_encoded_point(false);
        let right = other.key.to_encoded_point(false);
        left.as_bytes()[1..].cmp(&right.as_bytes()[1..])
    }
}

impl PartialOrd for ECPoint {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for ECPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.compressed))
    }
}

impl fmt::Debug for ECPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ECPoint({self})")
    }
}
