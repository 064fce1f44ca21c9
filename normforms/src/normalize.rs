//! Free-function entry points to the normalization oracle
//!
//! These mirror the `normalize(string, form)` view of the oracle for callers
//! that carry the form name as text, e.g. from a command line.

use crate::error::Result;
use crate::form::Form;

/// Normalize `text` under the form registered as `form_name`.
///
/// # Arguments
/// * `form_name` - One of `casefold`, `nfc`, `nfd`, `nfkc`, `nfkd` (any case)
/// * `text` - The input text to normalize
///
/// # Returns
/// The normalized text, or `InvalidForm` for an unknown form name
pub fn normalize(form_name: &str, text: &str) -> Result<String> {
    let form: Form = form_name.parse()?;
    Ok(form.normalize(text))
}

/// Normalize each line in a multi-line text.
///
/// Line breaks are not passed through the form, so a form cannot join or
/// split lines.
pub fn normalize_lines(form: Form, text: &str) -> String {
    text.lines()
        .map(|line| form.normalize(line))
        .collect::<Vec<_>>()
        .join("\n")
}

/// The names of the registered normalization forms.
pub fn form_names() -> Vec<&'static str> {
    Form::ALL.iter().map(|form| form.name()).collect()
}
