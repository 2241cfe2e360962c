//! Property-based tests for neo-crypto
//!
//! These tests use proptest to verify:
//! - Hash composition (Hash160 and Hash256 built from their parts)
//! - Signatures verify only for the signed message and key
//! - Compressed public keys survive re-parsing

use neo_crypto::{Crypto, ECPoint, KeyPair};
use proptest::prelude::*;

fn key_from(seed: u8) -> KeyPair {
    let mut secret = [0u8; 32];
    secret[31] = seed.max(1);
    KeyPair::from_private_key(&secret).unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// Hash160 is RIPEMD160 over SHA256
    #[test]
    fn test_hash160_composition(data in any::<Vec<u8>>()) {
        prop_assert_eq!(Crypto::hash160(&data), Crypto::ripemd160(&Crypto::sha256(&data)));
    }

    /// Hash256 is a double SHA256
    #[test]
    fn test_hash256_composition(data in any::<Vec<u8>>()) {
        prop_assert_eq!(Crypto::hash256(&data), Crypto::sha256(&Crypto::sha256(&data)));
    }

    /// Test that a signature verifies against its own message
    #[test]
    fn test_sign_verify(seed in any::<u8>(), message in any::<Vec<u8>>()) {
        let key = key_from(seed);
        let signature = key.sign(&message).unwrap();
        prop_assert_eq!(signature.len(), 64);
        prop_assert!(key.public_key().verify_signature(&message, &signature));
    }

    /// Test that a signature does not verify for a different message
    #[test]
    fn test_tampered_message_rejected(seed in any::<u8>(), message in any::<Vec<u8>>(), extra in any::<u8>()) {
        let key = key_from(seed);
        let signature = key.sign(&message).unwrap();
        let mut tampered = message.clone();
        tampered.push(extra);
        prop_assert!(!key.public_key().verify_signature(&tampered, &signature));
    }

    /// Test that compressed points re-parse to the same key
    #[test]
    fn test_point_roundtrip(seed in any::<u8>()) {
        let key = key_from(seed);
        let parsed = ECPoint::from_bytes(key.public_key().as_bytes()).unwrap();
        prop_assert_eq!(&parsed, key.public_key());
    }
}

#[test]
fn test_signature_from_other_key_rejected() {
    let signer = key_from(1);
    let other = key_from(2);
    let signature = signer.sign(b"oracle").unwrap();
    assert!(!other.public_key().verify_signature(b"oracle", &signature));
}
