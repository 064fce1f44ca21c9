//! Public entry point tying the index cache, resolver and search engine together.

use std::sync::Arc;

use normforms::{codepoint, ucd, Form};
use num_bigint::BigUint;
use serde::{Serialize, Serializer};
use tracing::{debug, warn};

use crate::cache::IndexCache;
use crate::choices::{resolve, ChoiceSet, DepthPolicy};
use crate::count::count_combinations;
use crate::error::{DenormalError, Result};
use crate::index::ReverseIndex;
use crate::query::DenormalizationQuery;
use crate::search::{Denormalizations, Plan};

/// Answers denormalization queries from a shared [`IndexCache`].
///
/// Cloning is cheap; clones share the cache.
#[derive(Clone, Default)]
pub struct Denormalizer {
    cache: IndexCache,
    policy: DepthPolicy,
}

/// How one character looks under every form, in both directions.
#[derive(Debug, Clone, Serialize)]
pub struct CharacterDetails {
    pub character: char,
    pub code_point: String,
    pub category: String,
    pub forms: Vec<FormDetails>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FormDetails {
    #[serde(serialize_with = "form_name")]
    pub form: Form,
    /// The character normalized under `form`
    pub normalized: String,
    /// Other characters that normalize to this character under `form`
    pub sources: Vec<char>,
}

fn form_name<S: Serializer>(form: &Form, serializer: S) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_str(form.name())
}

impl Denormalizer {
    /// A denormalizer with its own, initially empty, cache.
    pub fn new() -> Self {
        Self::with_cache(IndexCache::new())
    }

    /// A denormalizer sharing `cache`, e.g. [`IndexCache::global`].
    pub fn with_cache(cache: IndexCache) -> Self {
        Self {
            cache,
            policy: DepthPolicy::default(),
        }
    }

    /// Set the depth policy used by queries that do not choose their own.
    pub fn with_policy(mut self, policy: DepthPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn cache(&self) -> &IndexCache {
        &self.cache
    }

    pub fn policy(&self) -> DepthPolicy {
        self.policy
    }

    /// The reverse index for `form`, building it on first use.
    pub fn index(&self, form: Form) -> Arc<ReverseIndex> {
        self.cache.get_or_build(form)
    }

    /// The choices for one base character.
    pub fn choices(&self, form: Form, base: char, maxdepth: Option<usize>) -> ChoiceSet {
        resolve(&self.index(form), base, maxdepth, self.policy)
    }

    fn resolve_all(
        &self,
        form: Form,
        base: &str,
        maxdepth: Option<usize>,
        policy: DepthPolicy,
    ) -> Vec<ChoiceSet> {
        let index = self.index(form);
        base.chars()
            .map(|c| resolve(&index, c, maxdepth, policy))
            .collect()
    }

    /// Resolve the choices for every position of the query's base string.
    pub fn plan(&self, query: &DenormalizationQuery) -> Plan {
        let policy = query.depth_policy().unwrap_or(self.policy);
        if !query.form().is_normalized(query.base()) {
            warn!(
                form = %query.form(),
                base = query.base(),
                "base is not in the requested form, so no result normalizes back to it"
            );
        }
        let sets = self.resolve_all(query.form(), query.base(), query.depth_limit(), policy);
        debug!(
            form = %query.form(),
            base = query.base(),
            positions = sets.len(),
            "resolved denormalization plan"
        );
        Plan::new(sets)
    }

    /// Run a query as a lazy sequence of strings.
    ///
    /// Exhaustive queries enumerate in lexicographic order and stop after
    /// the query's count, if any. Random queries draw the query's count
    /// (default 1) of independent samples.
    ///
    /// # Example
    /// ```no_run
    /// use denormal::{DenormalizationQuery, Denormalizer, Form};
    ///
    /// let denormalizer = Denormalizer::new();
    /// let query = DenormalizationQuery::new(Form::Nfkc, "<>");
    /// for result in denormalizer.denormalize(&query) {
    ///     println!("{result}");
    /// }
    /// ```
    pub fn denormalize(&self, query: &DenormalizationQuery) -> Denormalizations {
        self.denormalize_plan(&self.plan(query), query)
    }

    /// Run a query over a plan already resolved for it by [`Denormalizer::plan`].
    pub fn denormalize_plan(&self, plan: &Plan, query: &DenormalizationQuery) -> Denormalizations {
        let limit = query.result_limit();
        if query.is_random() {
            let count = limit.unwrap_or_default();
            Denormalizations::Random(plan.samples(count, query.seed_value()))
        } else {
            Denormalizations::Exhaustive(plan.combinations().take(limit.unwrap_or(usize::MAX)))
        }
    }

    /// Exact number of exhaustive denormalizations of `base`.
    ///
    /// Only the per-character choice counts are resolved; nothing is enumerated.
    pub fn count_denormalizations(
        &self,
        form: Form,
        base: &str,
        maxdepth: Option<usize>,
    ) -> BigUint {
        count_combinations(&self.resolve_all(form, base, maxdepth, self.policy))
    }

    /// Draw `count` random denormalizations of `base`.
    pub fn random_denormalize(
        &self,
        form: Form,
        base: &str,
        maxdepth: Option<usize>,
        count: usize,
        seed: Option<u64>,
    ) -> Vec<String> {
        let mut query = DenormalizationQuery::new(form, base)
            .maxdepth(maxdepth.unwrap_or_default())
            .count(count)
            .random(true);
        if let Some(seed) = seed {
            query = query.seed(seed);
        }
        self.denormalize(&query).collect()
    }

    /// Check an exhaustive query against a ceiling before running it.
    ///
    /// Returns the total number of combinations, or `CombinationOverflow`
    /// when the query would yield more than `limit` results. Random queries
    /// and queries whose count is within the limit always pass.
    pub fn ensure_enumerable(&self, query: &DenormalizationQuery, limit: u64) -> Result<BigUint> {
        self.ensure_plan_enumerable(&self.plan(query), query, limit)
    }

    /// [`Denormalizer::ensure_enumerable`] over a plan already resolved for `query`.
    pub fn ensure_plan_enumerable(
        &self,
        plan: &Plan,
        query: &DenormalizationQuery,
        limit: u64,
    ) -> Result<BigUint> {
        let total = plan.total();
        if query.is_random() {
            return Ok(total);
        }
        let yielded = match query.result_limit() {
            Some(count) => total.clone().min(BigUint::from(count)),
            None => total.clone(),
        };
        if yielded > BigUint::from(limit) {
            return Err(DenormalError::CombinationOverflow { total, limit });
        }
        Ok(total)
    }

    /// Describe `c` under every form: its normalization and its other sources.
    pub fn details(&self, c: char) -> CharacterDetails {
        let mut utf8 = [0u8; 4];
        let key: &str = c.encode_utf8(&mut utf8);
        let forms = Form::ALL
            .into_iter()
            .map(|form| FormDetails {
                form,
                normalized: form.normalize(key),
                sources: self.index(form).sources(key).to_vec(),
            })
            .collect();
        CharacterDetails {
            character: c,
            code_point: codepoint::summarize(c),
            category: format!("{:?}", ucd::category(c)),
            forms,
        }
    }
}
