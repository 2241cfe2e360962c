use neo_crypto::CryptoError;
use thiserror::Error;

/// Errors raised while building scripts, contracts and transactions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("crypto error: {0}")]
    Crypto(#[from] CryptoError),
}

pub type CoreResult<T> = Result<T, CoreError>;
