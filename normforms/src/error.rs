//! Error types for the normalization oracles.

use thiserror::Error;

/// Errors raised while interpreting user-supplied forms and code points.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NormError {
    /// Name that is not one of the registered normalization forms
    #[error("unknown normalization form {0:?} (expected one of casefold, nfc, nfd, nfkc, nfkd)")]
    InvalidForm(String),

    /// Integer that is not a Unicode scalar value (surrogate or above U+10FFFF)
    #[error("U+{0:04X} is not a Unicode scalar value")]
    InvalidCharacter(u32),

    /// Text that is neither a single character nor a hex code point address
    #[error("cannot read {0:?} as a code point address")]
    InvalidAddress(String),
}

/// Result type alias for oracle operations.
pub type Result<T> = std::result::Result<T, NormError>;
