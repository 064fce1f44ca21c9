//! Per-character denormalization choices.

use std::fmt;

use crate::index::ReverseIndex;

/// What a depth limit does when it would cut the base character itself.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DepthPolicy {
    /// Keep exactly the first `maxdepth` choices in code point order, even
    /// if that drops the base character.
    #[default]
    Truncate,
    /// Keep the first `maxdepth` choices, but swap the base character into
    /// the last kept slot when truncation dropped it.
    PreserveBase,
}

/// The characters one position of the base string may be replaced with.
///
/// Never empty. Choices are in ascending code point order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceSet {
    base: char,
    choices: Vec<char>,
}

impl ChoiceSet {
    /// The base character these choices denormalize.
    pub fn base(&self) -> char {
        self.base
    }

    pub fn len(&self) -> usize {
        self.choices.len()
    }

    /// Always false; kept for the `len` convention.
    pub fn is_empty(&self) -> bool {
        self.choices.is_empty()
    }

    pub fn as_slice(&self) -> &[char] {
        &self.choices
    }

    pub fn iter(&self) -> std::slice::Iter<'_, char> {
        self.choices.iter()
    }

    pub fn contains(&self, c: char) -> bool {
        self.choices.binary_search(&c).is_ok()
    }
}

impl fmt::Display for ChoiceSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined: String = self.choices.iter().collect();
        write!(f, "{} -> [{}]", self.base, joined)
    }
}

impl<'a> IntoIterator for &'a ChoiceSet {
    type Item = &'a char;
    type IntoIter = std::slice::Iter<'a, char>;

    fn into_iter(self) -> Self::IntoIter {
        self.choices.iter()
    }
}

/// Resolve the choices for `base` from `index`.
///
/// `maxdepth` of `None` or `Some(0)` leaves the choices unlimited. Otherwise
/// the ascending choices are cut to their first `maxdepth` entries before
/// any combination happens, with `policy` deciding whether the base
/// character may be among the dropped ones.
pub fn resolve(
    index: &ReverseIndex,
    base: char,
    maxdepth: Option<usize>,
    policy: DepthPolicy,
) -> ChoiceSet {
    let mut choices = index.lookup(base);

    if let Some(depth) = maxdepth.filter(|depth| *depth > 0) {
        if choices.len() > depth {
            choices.truncate(depth);
            if policy == DepthPolicy::PreserveBase && !choices.contains(&base) {
                choices[depth - 1] = base;
                choices.sort_unstable();
            }
        }
    }

    ChoiceSet { base, choices }
}
