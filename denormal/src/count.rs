//! Counting engine: exact totals without enumerating.

use num_bigint::BigUint;

use crate::choices::ChoiceSet;

/// The number of strings an exhaustive enumeration over `sets` produces.
///
/// This is the product of the choice set sizes, and 1 for no positions
/// (the empty string is its own single denormalization).
pub fn count_combinations(sets: &[ChoiceSet]) -> BigUint {
    sets.iter()
        .fold(BigUint::from(1u32), |total, set| total * set.len())
}
