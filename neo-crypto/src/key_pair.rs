//! secp256r1 key pairs.

use crate::ecc::ECPoint;
use crate::error::{CryptoError, CryptoResult};
use p256::ecdsa::signature::Signer;
use p256::ecdsa::{Signature, SigningKey};
use p256::PublicKey;
use std::fmt;

/// A private key together with its public point.
#[derive(Clone)]
pub struct KeyPair {
    signing_key: SigningKey,
    public_key: ECPoint,
}

impl KeyPair {
    /// Builds a key pair from a 32-byte private key.
    pub fn from_private_key(private_key: &[u8]) -> CryptoResult<Self> {
        if private_key.len() != 32 {
            return Err(CryptoError::InvalidPrivateKey(format!(
                "expected 32 bytes, got {}",
                private_key.len()
            )));
        }
        let signing_key = SigningKey::from_slice(private_key)
            .map_err(|err| CryptoError::InvalidPrivateKey(err.to_string()))?;
        Ok(Self::from_signing_key(signing_key))
    }

    /// Generates a fresh random key pair.
    #[must_use]
    pub fn generate() -> Self {
        Self::from_signing_key(SigningKey::random(&mut rand::rngs::OsRng))
    }

    fn from_signing_key(signing_key: SigningKey) -> Self {
        let public_key = ECPoint::from_public_key(PublicKey::from(signing_key.verifying_key()));
        Self {
            signing_key,
            public_key,
        }
    }

    #[must_use]
    pub fn public_key(&self) -> &ECPoint {
        &self.public_key
    }

    #[must_use]
    pub fn private_key(&self) -> [u8; 32] {
        self.signing_key.to_bytes().into()
    }

    /// Signs `message` (SHA-256 digest, RFC 6979 nonce) and returns `r || s`.
    pub fn sign(&self, message: &[u8]) -> CryptoResult<Vec<u8>> {
        let signature: Signature = self
            .signing_key
            .try_sign(message)
            .map_err(|err| CryptoError::SigningFailed(err.to_string()))?;
        Ok(signature.to_bytes().to_vec())
    }
}

impl PartialEq for KeyPair {
    fn eq(&self, other: &Self) -> bool {
        self.public_key == other.public_key
    }
}

impl Eq for KeyPair {}

impl fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyPair")
            .field("public_key", &self.public_key)
            .finish_non_exhaustive()
    }
}
