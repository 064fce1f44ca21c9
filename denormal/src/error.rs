//! Error types for the denormalization engine.

use normforms::NormError;
use num_bigint::BigUint;
use thiserror::Error;

/// Main error type for denormalization queries.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DenormalError {
    /// Unrecognized normalization form identifier
    #[error("unknown normalization form {0:?} (expected one of casefold, nfc, nfd, nfkc, nfkd)")]
    InvalidForm(String),

    /// Base character outside the Unicode scalar values
    #[error("U+{0:04X} is not a Unicode scalar value")]
    InvalidCharacter(u32),

    /// Unreadable code point address
    #[error("cannot read {0:?} as a code point address")]
    InvalidAddress(String),

    /// An exhaustive listing would exceed the caller's ceiling
    #[error("{total} denormalizations exceed the limit of {limit}")]
    CombinationOverflow { total: BigUint, limit: u64 },
}

impl From<NormError> for DenormalError {
    fn from(err: NormError) -> Self {
        match err {
            NormError::InvalidForm(name) => DenormalError::InvalidForm(name),
            NormError::InvalidCharacter(value) => DenormalError::InvalidCharacter(value),
            NormError::InvalidAddress(text) => DenormalError::InvalidAddress(text),
        }
    }
}

/// Result type alias for denormalization operations.
pub type Result<T> = std::result::Result<T, DenormalError>;
