//! Outcome codes recorded in an oracle response attribute.

use crate::error::PrimitiveError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Represents the response code for an oracle request.
///
/// Every code is a valid, signed outcome: a node that could not fetch the
/// data still signs a response carrying the reason.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum OracleResponseCode {
    /// The request has been successfully completed.
    Success = 0x00,
    /// The URL scheme has no registered fetch protocol.
    ProtocolNotSupported = 0x10,
    /// The oracle nodes could not agree on a result.
    ConsensusUnreachable = 0x12,
    /// The requested resource does not exist.
    NotFound = 0x14,
    /// The request was not completed in time.
    Timeout = 0x16,
    /// The resource may not be requested.
    Forbidden = 0x18,
    /// The filtered result exceeds the maximum response size.
    ResponseTooLarge = 0x1a,
    /// The request's fee budget does not cover the response transaction.
    InsufficientFunds = 0x1c,
    /// The content type of the response is not allowed.
    ContentTypeNotSupported = 0x1f,
    /// Any other failure.
    Error = 0xff,
}

impl OracleResponseCode {
    #[must_use]
    pub const fn to_byte(self) -> u8 {
        self as u8
    }

    #[must_use]
    pub const fn from_byte(value: u8) -> Option<Self> {
        match value {
            0x00 => Some(Self::Success),
            0x10 => Some(Self::ProtocolNotSupported),
            0x12 => Some(Self::ConsensusUnreachable),
            0x14 => Some(Self::NotFound),
            0x16 => Some(Self::Timeout),
            0x18 => Some(Self::Forbidden),
            0x1a => Some(Self::ResponseTooLarge),
            0x1c => Some(Self::InsufficientFunds),
            0x1f => Some(Self::ContentTypeNotSupported),
            0xff => Some(Self::Error),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "Success",
            Self::ProtocolNotSupported => "ProtocolNotSupported",
            Self::ConsensusUnreachable => "ConsensusUnreachable",
            Self::NotFound => "NotFound",
            Self::Timeout => "Timeout",
            Self::Forbidden => "Forbidden",
            Self::ResponseTooLarge => "ResponseTooLarge",
            Self::InsufficientFunds => "InsufficientFunds",
            Self::ContentTypeNotSupported => "ContentTypeNotSupported",
            Self::Error => "Error",
        }
    }

    /// Returns true if the response carries fetched data.
    #[must_use]
    pub const fn is_success(self) -> bool {
        matches!(self, Self::Success)
    }
}

impl Default for OracleResponseCode {
    fn default() -> Self {
        Self::Success
    }
}

impl fmt::Display for OracleResponseCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<u8> for OracleResponseCode {
    type Error = PrimitiveError;

    fn try_from(value: u8) -> Result<Self, PrimitiveError> {
        Self::from_byte(value).ok_or(PrimitiveError::InvalidValue {
            kind: "OracleResponseCode",
            value,
        })
    }
}

impl Serialize for OracleResponseCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for OracleResponseCode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        [
            Self::Success,
            Self::ProtocolNotSupported,
            Self::ConsensusUnreachable,
            Self::NotFound,
            Self::Timeout,
            Self::Forbidden,
            Self::ResponseTooLarge,
            Self::InsufficientFunds,
            Self::ContentTypeNotSupported,
            Self::Error,
        ]
        .into_iter()
        .find(|code| code.as_str().eq_ignore_ascii_case(&name))
        .ok_or_else(|| serde::de::Error::custom(format!("unknown oracle response code {name}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn byte_values_are_stable() {
        assert_eq!(OracleResponseCode::ConsensusUnreachable.to_byte(), 0x12);
        assert_eq!(OracleResponseCode::InsufficientFunds.to_byte(), 0x1c);
        assert_eq!(
            OracleResponseCode::try_from(0x1a).unwrap(),
            OracleResponseCode::ResponseTooLarge
        );
        assert!(OracleResponseCode::try_from(0x11).is_err());
    }

    #[test]
    fn serde_uses_names() {
        let json = serde_json::to_string(&OracleResponseCode::Forbidden).unwrap();
        assert_eq!(json, "\"Forbidden\"");
        let code: OracleResponseCode = serde_json::from_str("\"timeout\"").unwrap();
        assert_eq!(code, OracleResponseCode::Timeout);
    }
}
