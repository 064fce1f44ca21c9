//! Reverse decomposition index
//!
//! For one normalization form, maps every normalized value back to the
//! characters that normalize to it. Building an index is a single scan over
//! every assigned code point, so callers should go through
//! [`IndexCache`](crate::cache::IndexCache) rather than building repeatedly.

use std::collections::{BTreeMap, HashMap};
use std::io;
use std::time::Instant;

use normforms::{ucd, Form};
use serde::Serialize;
use tracing::info;

/// Characters grouped by their normalization under one form.
///
/// Only non-trivial mappings are stored. A character whose normalization is
/// itself belongs to its own bucket, and [`ReverseIndex::lookup`] adds it
/// back, so every lookup is reflexive.
#[derive(Debug, Clone)]
pub struct ReverseIndex {
    form: Form,
    buckets: HashMap<String, Vec<char>>,
    scanned: usize,
}

#[derive(Serialize)]
struct MappingRow<'a> {
    source: char,
    normalized: &'a str,
}

impl ReverseIndex {
    /// Scan every assigned code point and bucket it by its normalization under `form`.
    pub fn build(form: Form) -> Self {
        Self::build_with(form, ucd::assigned_chars(), |c, out| {
            form.normalize_char_into(c, out)
        })
    }

    /// Build from an explicit character source and normalization oracle.
    ///
    /// `normalize` appends the normalization of its character to the
    /// (cleared) buffer it is given. Characters that normalize to nothing
    /// are left out of every bucket.
    pub fn build_with<I, F>(form: Form, chars: I, mut normalize: F) -> Self
    where
        I: IntoIterator<Item = char>,
        F: FnMut(char, &mut String),
    {
        let started = Instant::now();
        let mut buckets: HashMap<String, Vec<char>> = HashMap::new();
        let mut scanned = 0;
        let mut normal = String::new();
        let mut utf8 = [0u8; 4];

        for c in chars {
            scanned += 1;
            normal.clear();
            normalize(c, &mut normal);
            if normal.is_empty() || normal == *c.encode_utf8(&mut utf8) {
                continue;
            }
            match buckets.get_mut(normal.as_str()) {
                Some(sources) => sources.push(c),
                None => {
                    buckets.insert(normal.clone(), vec![c]);
                }
            }
        }

        // Injected sources need not be ascending or unique
        for sources in buckets.values_mut() {
            sources.sort_unstable();
            sources.dedup();
        }

        let index = Self {
            form,
            buckets,
            scanned,
        };
        info!(
            form = %form,
            scanned,
            buckets = index.len(),
            sources = index.source_count(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "built reverse index"
        );
        index
    }

    /// The form this index was built for.
    pub fn form(&self) -> Form {
        self.form
    }

    /// Every character that normalizes to `c`, ascending, including `c` itself.
    pub fn lookup(&self, c: char) -> Vec<char> {
        let mut utf8 = [0u8; 4];
        let mut found = self.sources(c.encode_utf8(&mut utf8)).to_vec();
        if let Err(pos) = found.binary_search(&c) {
            found.insert(pos, c);
        }
        found
    }

    /// The stored characters whose normalization is exactly `normal`.
    ///
    /// Keys may be longer than one character, e.g. `"e\u{301}"` under NFD.
    /// The identity member is not included.
    pub fn sources(&self, normal: &str) -> &[char] {
        self.buckets
            .get(normal)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Number of normalized values with at least one other source.
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Number of characters that normalize to something other than themselves.
    pub fn source_count(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    /// Number of characters examined while building.
    pub fn scanned(&self) -> usize {
        self.scanned
    }

    /// The mappings ordered by normalized value.
    pub fn to_map(&self) -> BTreeMap<&str, &[char]> {
        self.buckets
            .iter()
            .map(|(normal, sources)| (normal.as_str(), sources.as_slice()))
            .collect()
    }

    /// Write the mappings as a pretty-printed JSON object of `normalized -> [sources]`.
    pub fn write_json<W: io::Write>(&self, writer: W) -> serde_json::Result<()> {
        serde_json::to_writer_pretty(writer, &self.to_map())
    }

    /// Write the mappings as CSV rows of `source,normalized`.
    pub fn write_csv<W: io::Write>(&self, writer: W) -> csv::Result<()> {
        let mut wtr = csv::Writer::from_writer(writer);
        for (normalized, sources) in self.to_map() {
            for &source in sources {
                wtr.serialize(MappingRow { source, normalized })?;
            }
        }
        wtr.flush()?;
        Ok(())
    }
}
