//! Search engine over the cross product of per-position choices
//!
//! Both modes are lazy iterators: [`Combinations`] walks the product in
//! lexicographic order like an odometer (last position turns fastest), and
//! [`Samples`] draws each position uniformly at random. Neither builds the
//! product up front, and neither recurses, so arbitrarily long base strings
//! are safe. Dropping an iterator early has no side effects.

use std::sync::Arc;

use num_bigint::BigUint;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::choices::ChoiceSet;
use crate::count::count_combinations;

/// Number of random results when a random query gives no count.
pub const DEFAULT_RANDOM_COUNT: usize = 1;

/// The resolved choices for every position of one base string.
///
/// A plan can start any number of fresh enumerations or samplings.
#[derive(Debug, Clone)]
pub struct Plan {
    sets: Arc<[ChoiceSet]>,
}

impl Plan {
    pub fn new(sets: Vec<ChoiceSet>) -> Self {
        Self { sets: sets.into() }
    }

    pub fn sets(&self) -> &[ChoiceSet] {
        &self.sets
    }

    /// Exact number of strings [`Plan::combinations`] yields.
    pub fn total(&self) -> BigUint {
        count_combinations(&self.sets)
    }

    /// Start an exhaustive enumeration from the first combination.
    pub fn combinations(&self) -> Combinations {
        Combinations::new(self.sets.clone())
    }

    /// Start a random sampling of `count` results.
    ///
    /// Without a seed the generator is seeded from OS entropy and results
    /// differ between runs.
    pub fn samples(&self, count: usize, seed: Option<u64>) -> Samples {
        let rng = match seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        Samples {
            sets: self.sets.clone(),
            rng,
            remaining: count,
        }
    }
}

/// Every combination of choices, in lexicographic position order.
#[derive(Debug, Clone)]
pub struct Combinations {
    sets: Arc<[ChoiceSet]>,
    digits: Vec<usize>,
    remaining: Option<usize>,
    exhausted: bool,
}

impl Combinations {
    fn new(sets: Arc<[ChoiceSet]>) -> Self {
        let remaining = sets
            .iter()
            .try_fold(1usize, |total, set| total.checked_mul(set.len()));
        Self {
            digits: vec![0; sets.len()],
            sets,
            remaining,
            exhausted: false,
        }
    }

    fn current(&self) -> String {
        self.sets
            .iter()
            .zip(&self.digits)
            .map(|(set, &digit)| set.as_slice()[digit])
            .collect()
    }

    /// Move the odometer forward by `steps`, carrying from the last position.
    fn advance(&mut self, steps: usize) {
        let mut carry = steps;
        for pos in (0..self.digits.len()).rev() {
            if carry == 0 {
                break;
            }
            let radix = self.sets[pos].len();
            let sum = self.digits[pos] + carry % radix;
            self.digits[pos] = sum % radix;
            carry = carry / radix + sum / radix;
        }
        if carry > 0 {
            self.exhausted = true;
        }
        if let Some(remaining) = self.remaining.as_mut() {
            *remaining = remaining.saturating_sub(steps);
        }
    }
}

impl Iterator for Combinations {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        if self.exhausted {
            return None;
        }
        let out = self.current();
        self.advance(1);
        Some(out)
    }

    fn nth(&mut self, n: usize) -> Option<String> {
        if self.exhausted {
            return None;
        }
        self.advance(n);
        self.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match (self.exhausted, self.remaining) {
            (true, _) => (0, Some(0)),
            (false, Some(remaining)) => (remaining, Some(remaining)),
            (false, None) => (usize::MAX, None),
        }
    }
}

/// Independent random draws, one choice per position per result.
#[derive(Debug, Clone)]
pub struct Samples {
    sets: Arc<[ChoiceSet]>,
    rng: ChaCha8Rng,
    remaining: usize,
}

impl Iterator for Samples {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        let rng = &mut self.rng;
        Some(
            self.sets
                .iter()
                .map(|set| set.as_slice()[rng.gen_range(0..set.len())])
                .collect(),
        )
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

/// The lazy result sequence of one denormalization query.
#[derive(Debug, Clone)]
pub enum Denormalizations {
    /// Lexicographic enumeration, optionally cut to a prefix
    Exhaustive(std::iter::Take<Combinations>),
    /// Random draws
    Random(Samples),
}

impl Iterator for Denormalizations {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        match self {
            Denormalizations::Exhaustive(inner) => inner.next(),
            Denormalizations::Random(inner) => inner.next(),
        }
    }

    fn nth(&mut self, n: usize) -> Option<String> {
        match self {
            Denormalizations::Exhaustive(inner) => inner.nth(n),
            Denormalizations::Random(inner) => inner.nth(n),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self {
            Denormalizations::Exhaustive(inner) => inner.size_hint(),
            Denormalizations::Random(inner) => inner.size_hint(),
        }
    }
}
