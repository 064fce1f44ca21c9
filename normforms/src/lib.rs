//! normforms - the Unicode oracles the denormalizer is built on
//!
//! This crate provides the normalization forms (`casefold`, `nfc`, `nfd`,
//! `nfkc`, `nfkd`), the assigned code point scan used to build reverse
//! indexes, and parsing of code point addresses such as `U+FF21`.

pub mod codepoint;
pub mod error;
pub mod form;
pub mod normalize;
pub mod ucd;

pub use error::{NormError, Result};
pub use form::Form;
