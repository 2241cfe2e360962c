//! Implementation of `UInt160`, a 160-bit unsigned integer.

use crate::error::{PrimitiveError, PrimitiveResult};
use ripemd::Ripemd160;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha2::{Digest, Sha256};
use std::fmt;
use std::str::FromStr;

/// The length of `UInt160` values in bytes.
pub const UINT160_SIZE: usize = 20;

/// Represents a 160-bit unsigned integer, stored little-endian.
///
/// Script hashes are displayed big-endian with a `0x` prefix, matching the
/// way block explorers and the JSON-RPC interface print them.
#[derive(Clone, Copy, Default, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct UInt160([u8; UINT160_SIZE]);

impl UInt160 {
    /// Alias matching `UInt160.Length`.
    pub const LENGTH: usize = UINT160_SIZE;

    /// Returns a zero `UInt160`.
    #[inline]
    #[must_use]
    pub const fn zero() -> Self {
        Self([0u8; UINT160_SIZE])
    }

    /// Checks if this `UInt160` is zero.
    #[inline]
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|b| *b == 0)
    }

    /// Wraps a little-endian byte array.
    #[inline]
    #[must_use]
    pub const fn from_array(value: [u8; UINT160_SIZE]) -> Self {
        Self(value)
    }

    /// Creates a new `UInt160` from a little-endian byte slice.
    ///
    /// # Errors
    ///
    /// Returns `PrimitiveError::InvalidFormat` if the input length is not exactly 20 bytes.
    pub fn from_bytes(value: &[u8]) -> PrimitiveResult<Self> {
        let array: [u8; UINT160_SIZE] =
            value
                .try_into()
                .map_err(|_| PrimitiveError::InvalidFormat {
                    message: format!("Invalid length: {}", value.len()),
                })?;
        Ok(Self(array))
    }

    /// Computes the script hash (`RIPEMD160(SHA256(script))`) of a script.
    #[must_use]
    pub fn from_script(script: &[u8]) -> Self {
        let sha = Sha256::digest(script);
        let ripemd = Ripemd160::digest(sha);
        let mut array = [0u8; UINT160_SIZE];
        array.copy_from_slice(&ripemd);
        Self(array)
    }

    /// Returns the little-endian bytes.
    #[inline]
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; UINT160_SIZE] {
        &self.0
    }

    /// Returns the little-endian bytes as a `Vec<u8>`.
    #[inline]
    #[must_use]
    pub fn to_vec(&self) -> Vec<u8> {
        self.0.to_vec()
    }

    /// Parses a big-endian hex string, with or without the `0x` prefix.
    ///
    /// # Errors
    ///
    /// Returns `PrimitiveError::InvalidFormat` on bad length or non-hex input.
    pub fn parse(s: &str) -> PrimitiveResult<Self> {
        let hex_part = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .unwrap_or(s);
        if hex_part.len() != UINT160_SIZE * 2 {
            return Err(PrimitiveError::InvalidFormat {
                message: format!("Invalid UInt160 string length: {}", hex_part.len()),
            });
        }
        let mut bytes = hex::decode(hex_part).map_err(|err| PrimitiveError::InvalidFormat {
            message: format!("Invalid hex string: {err}"),
        })?;
        bytes.reverse();
        Self::from_bytes(&bytes)
    }
}

impl fmt::Display for UInt160 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut reversed = self.0;
        reversed.reverse();
        write!(f, "0x{}", hex::encode(reversed))
    }
}

impl fmt::Debug for UInt160 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "UInt160({self})")
    }
}

impl FromStr for UInt160 {
    type Err = PrimitiveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<[u8; UINT160_SIZE]> for UInt160 {
    fn from(value: [u8; UINT160_SIZE]) -> Self {
        Self(value)
    }
}

impl Serialize for UInt160 {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for UInt160 {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}
