//! The normalization forms a string can be denormalized from.

use std::fmt;
use std::str::FromStr;

use caseless::Caseless;
use unicode_normalization::UnicodeNormalization;

use crate::error::NormError;

/// A Unicode normalization form, or full default case folding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Form {
    Casefold,
    Nfc,
    Nfd,
    Nfkc,
    Nfkd,
}

impl Form {
    /// Every supported form, in listing order.
    pub const ALL: [Form; 5] = [Form::Casefold, Form::Nfc, Form::Nfd, Form::Nfkc, Form::Nfkd];

    /// The lowercase name the form is registered under.
    pub fn name(self) -> &'static str {
        match self {
            Form::Casefold => "casefold",
            Form::Nfc => "nfc",
            Form::Nfd => "nfd",
            Form::Nfkc => "nfkc",
            Form::Nfkd => "nfkd",
        }
    }

    /// A one-line description of what the form does to a string.
    pub fn description(self) -> &'static str {
        match self {
            Form::Casefold => "Remove all case distinctions from the string.",
            Form::Nfc => "Normalization form composition.",
            Form::Nfd => "Normalization form decomposition.",
            Form::Nfkc => "Normalization form compatibility composition.",
            Form::Nfkd => "Normalization form compatibility decomposition.",
        }
    }

    /// Normalize `text` under this form.
    pub fn normalize(self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        self.extend_normalized(text.chars(), &mut out);
        out
    }

    /// Normalize a single character, appending the result to `out`.
    ///
    /// The reverse index scans the whole code space through this, so it
    /// reuses the caller's buffer instead of allocating per character.
    pub fn normalize_char_into(self, c: char, out: &mut String) {
        self.extend_normalized(std::iter::once(c), out);
    }

    /// Check whether `text` is unchanged by this form.
    pub fn is_normalized(self, text: &str) -> bool {
        self.normalize(text) == text
    }

    fn extend_normalized<I>(self, chars: I, out: &mut String)
    where
        I: Iterator<Item = char>,
    {
        match self {
            Form::Casefold => out.extend(chars.default_case_fold()),
            Form::Nfc => out.extend(chars.nfc()),
            Form::Nfd => out.extend(chars.nfd()),
            Form::Nfkc => out.extend(chars.nfkc()),
            Form::Nfkd => out.extend(chars.nfkd()),
        }
    }
}

impl fmt::Display for Form {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Form {
    type Err = NormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Form::ALL
            .into_iter()
            .find(|form| form.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| NormError::InvalidForm(s.to_string()))
    }
}
