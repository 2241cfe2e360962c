//! Error types for primitive parsing.

use thiserror::Error;

/// Errors raised while constructing primitive values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PrimitiveError {
    /// The input had the wrong shape (length, prefix, characters).
    #[error("invalid format: {message}")]
    InvalidFormat { message: String },

    /// A byte did not map to a known enum value.
    #[error("invalid value for {kind}: 0x{value:02x}")]
    InvalidValue { kind: &'static str, value: u8 },
}

/// Convenience result alias.
pub type PrimitiveResult<T> = Result<T, PrimitiveError>;
