//! Implementation of `UInt256`, a 256-bit unsigned integer.

use crate::error::{PrimitiveError, PrimitiveResult};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// The length of `UInt256` values in bytes.
pub const UINT256_SIZE: usize = 32;

/// Represents a 256-bit unsigned integer (transaction and block hashes), stored little-endian.
#[derive(Clone, Copy, Default, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct UInt256([u8; UINT256_SIZE]);

impl UInt256 {
    pub const LENGTH: usize = UINT256_SIZE;

    #[inline]
    #[must_use]
    pub const fn zero() -> Self {
        Self([0u8; UINT256_SIZE])
    }

    #[inline]
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|b| *b == 0)
    }

    #[inline]
    #[must_use]
    pub const fn from_array(value: [u8; UINT256_SIZE]) -> Self {
        Self(value)
    }

    /// Creates a new `UInt256` from a little-endian byte slice.
    ///
    /// # Errors
    ///
    /// Returns `PrimitiveError::InvalidFormat` if the input length is not exactly 32 bytes.
    pub fn from_bytes(value: &[u8]) -> PrimitiveResult<Self> {
        let array: [u8; UINT256_SIZE] =
            value
                .try_into()
                .map_err(|_| PrimitiveError::InvalidFormat {
                    message: format!("Invalid length: {}", value.len()),
                })?;
        Ok(Self(array))
    }

    #[inline]
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; UINT256_SIZE] {
        &self.0
    }

    #[inline]
    #[must_use]
    pub fn to_vec(&self) -> Vec<u8> {
        self.0.to_vec()
    }

    /// Parses a big-endian hex string, with or without the `0x` prefix.
    pub fn parse(s: &str) -> PrimitiveResult<Self> {
        let hex_part = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .unwrap_or(s);
        if hex_part.len() != UINT256_SIZE * 2 {
            return Err(PrimitiveError::InvalidFormat {
                message: format!("Invalid UInt256 string length: {}", hex_part.len()),
            });
        }
        let mut bytes = hex::decode(hex_part).map_err(|err| PrimitiveError::InvalidFormat {
            message: format!("Invalid hex string: {err}"),
        })?;
        bytes.reverse();
        Self::from_bytes(&bytes)
    }
}

impl fmt::Display for UInt256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut reversed = self.0;
        reversed.reverse();
        write!(f, "0x{}", hex::encode(reversed))
    }
}

impl fmt::Debug for UInt256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "UInt256({self})")
    }
}

impl FromStr for UInt256 {
    type Err = PrimitiveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<[u8; UINT256_SIZE]> for UInt256 {
    fn from(value: [u8; UINT256_SIZE]) -> Self {
        Self(value)
    }
}

impl Serialize for UInt256 {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for UInt256 {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}
