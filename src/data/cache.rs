//! Caller-owned dataset cache.
//!
//! Entries are keyed by file path and validated against a fingerprint of the
//! file content on every lookup, so an edited file is reparsed while an
//! unchanged one is served from memory. Entries live as long as the cache;
//! there is no eviction.

use crate::core::error::Result;
use crate::data::dataset::Dataset;
use crate::data::loader::{fingerprint, parse_log_bytes, read_log_file};
use log::debug;
use rustc_hash::FxHashMap;
use std::path::{Path, PathBuf};
use std::rc::Rc;

#[derive(Debug)]
struct CacheEntry {
    fingerprint: u64,
    dataset: Rc<Dataset>,
}

#[derive(Debug, Default)]
pub struct DatasetCache {
    entries: FxHashMap<PathBuf, CacheEntry>,
    hits: usize,
    misses: usize,
}

impl DatasetCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load `path`, reusing the parsed dataset when the content is unchanged
    pub fn load(&mut self, path: &Path) -> Result<Rc<Dataset>> {
        let bytes = read_log_file(path)?;
        let fingerprint = fingerprint(&bytes);

        if let Some(entry) = self.entries.get(path)
            && entry.fingerprint == fingerprint
        {
            self.hits += 1;
            debug!("Dataset cache hit: {}", path.display());
            return Ok(Rc::clone(&entry.dataset));
        }

        self.misses += 1;
        debug!("Dataset cache miss: {}", path.display());

        let dataset = Rc::new(parse_log_bytes(path, &bytes)?);
        self.entries.insert(
            path.to_path_buf(),
            CacheEntry {
                fingerprint,
                dataset: Rc::clone(&dataset),
            },
        );
        Ok(dataset)
    }

    pub fn hits(&self) -> usize {
        self.hits
    }

    pub fn misses(&self) -> usize {
        self.misses
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
