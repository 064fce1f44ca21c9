//! Lazily built, per-form cache of reverse indexes
//!
//! Building a [`ReverseIndex`] scans the whole code space, so each form is
//! built on first request and then shared. Caches are ordinary values:
//! create one per test or per component, or opt into the process-wide
//! instance with [`IndexCache::global`].

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use normforms::Form;
use once_cell::sync::{Lazy, OnceCell};
use tracing::debug;

use crate::index::ReverseIndex;

type IndexCell = Arc<OnceCell<Arc<ReverseIndex>>>;

static GLOBAL: Lazy<IndexCache> = Lazy::new(IndexCache::new);

/// Shared handle to a set of reverse indexes, one per normalization form.
///
/// Clones share the same storage.
#[derive(Clone, Default)]
pub struct IndexCache {
    cells: Arc<Mutex<HashMap<Form, IndexCell>>>,
}

impl IndexCache {
    /// Create an empty cache. Indexes are built when first requested.
    pub fn new() -> Self {
        Self {
            cells: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// The process-wide cache.
    pub fn global() -> &'static IndexCache {
        &GLOBAL
    }

    fn cells(&self) -> MutexGuard<'_, HashMap<Form, IndexCell>> {
        // A panic elsewhere cannot leave the map half-updated
        self.cells.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Get or build the index for `form`.
    ///
    /// The map lock is only held to find the form's cell. The build runs
    /// inside the cell, so concurrent callers for the same form wait for one
    /// build while other forms proceed independently.
    pub fn get_or_build(&self, form: Form) -> Arc<ReverseIndex> {
        let cell = self.cells().entry(form).or_default().clone();

        if let Some(index) = cell.get() {
            debug!(form = %form, "reverse index cache hit");
            return index.clone();
        }
        cell.get_or_init(|| Arc::new(ReverseIndex::build(form)))
            .clone()
    }

    /// Install an already built index, e.g. one made with
    /// [`ReverseIndex::build_with`]. Returns false if the form was already
    /// built or being built.
    pub fn insert(&self, index: ReverseIndex) -> bool {
        let form = index.form();
        let cell = self.cells().entry(form).or_default().clone();
        cell.set(Arc::new(index)).is_ok()
    }

    /// Check if the index for `form` is built and cached.
    pub fn is_cached(&self, form: Form) -> bool {
        self.cells()
            .get(&form)
            .is_some_and(|cell| cell.get().is_some())
    }

    /// (supported_forms, cached_forms)
    pub fn cache_stats(&self) -> (usize, usize) {
        let cached = self
            .cells()
            .values()
            .filter(|cell| cell.get().is_some())
            .count();
        (Form::ALL.len(), cached)
    }

    /// Drop every cached index. Indexes already handed out stay valid.
    pub fn reset(&self) {
        self.cells().clear();
    }
}
