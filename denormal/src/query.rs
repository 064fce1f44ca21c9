//! The parameters of one denormalization request.

use normforms::{codepoint, Form};

use crate::choices::DepthPolicy;
use crate::error::Result;
use crate::search::DEFAULT_RANDOM_COUNT;

/// A denormalization request: which form, which base string, and how to
/// bound or sample the results.
///
/// # Example
/// ```
/// use denormal::{DenormalizationQuery, Form};
///
/// let query = DenormalizationQuery::new(Form::Nfkc, "hi").maxdepth(2).count(3);
/// assert_eq!(query.base(), "hi");
/// assert_eq!(query.result_limit(), Some(3));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DenormalizationQuery {
    form: Form,
    base: String,
    maxdepth: Option<usize>,
    count: Option<usize>,
    seed: Option<u64>,
    random: bool,
    policy: Option<DepthPolicy>,
}

impl DenormalizationQuery {
    pub fn new(form: Form, base: impl Into<String>) -> Self {
        Self {
            form,
            base: base.into(),
            maxdepth: None,
            count: None,
            seed: None,
            random: false,
            policy: None,
        }
    }

    /// Build a query from raw code points, e.g. decoded UTF-16 units.
    ///
    /// Fails with `InvalidCharacter` on surrogates and values above U+10FFFF.
    pub fn from_codepoints(form: Form, codepoints: &[u32]) -> Result<Self> {
        let base = codepoints
            .iter()
            .map(|&value| codepoint::from_u32(value))
            .collect::<std::result::Result<String, _>>()?;
        Ok(Self::new(form, base))
    }

    /// Keep at most `maxdepth` choices per character; 0 means unlimited.
    pub fn maxdepth(mut self, maxdepth: usize) -> Self {
        self.maxdepth = Some(maxdepth).filter(|depth| *depth > 0);
        self
    }

    /// Return at most `count` results; 0 means the mode's default.
    pub fn count(mut self, count: usize) -> Self {
        self.count = Some(count).filter(|count| *count > 0);
        self
    }

    /// Seed the random generator for reproducible random results.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Draw random results instead of enumerating.
    pub fn random(mut self, random: bool) -> Self {
        self.random = random;
        self
    }

    /// Override the denormalizer's depth policy for this query.
    pub fn policy(mut self, policy: DepthPolicy) -> Self {
        self.policy = Some(policy);
        self
    }

    pub fn form(&self) -> Form {
        self.form
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn depth_limit(&self) -> Option<usize> {
        self.maxdepth
    }

    pub fn seed_value(&self) -> Option<u64> {
        self.seed
    }

    pub fn is_random(&self) -> bool {
        self.random
    }

    pub fn depth_policy(&self) -> Option<DepthPolicy> {
        self.policy
    }

    /// The cap on the number of results. Random queries always have one.
    pub fn result_limit(&self) -> Option<usize> {
        if self.random {
            Some(self.count.unwrap_or(DEFAULT_RANDOM_COUNT))
        } else {
            self.count
        }
    }
}
