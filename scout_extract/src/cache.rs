//! Per-credential extractor instances.

use std::sync::Arc;

use dashmap::DashMap;
use tracing::{info, warn};

use scout_core::ParameterExtractor;

/// Key used when no credential is supplied.
pub const DEFAULT_CACHE_KEY: &str = "__default__";

/// Entries kept before new credentials stop being cached.
pub const DEFAULT_CACHE_CAPACITY: usize = 64;

/// Concurrent map from credential to a shared extractor.
///
/// Extractors are built outside the map's locks; when two callers race on the
/// same key the first insert wins and both get that instance. Once `capacity`
/// entries exist, unseen credentials get a fresh uncached extractor.
#[derive(Clone)]
pub struct ExtractorCache {
    entries: Arc<DashMap<String, Arc<dyn ParameterExtractor>>>,
    capacity: usize,
}

impl Default for ExtractorCache {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CACHE_CAPACITY)
    }
}

impl ExtractorCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Arc::new(DashMap::new()),
            capacity,
        }
    }

    /// Return the extractor cached for `api_key`, building it with `build` on
    /// first use. Blank keys share the default entry.
    pub fn get_or_insert_with<F>(
        &self,
        api_key: Option<&str>,
        build: F,
    ) -> Arc<dyn ParameterExtractor>
    where
        F: FnOnce(Option<&str>) -> Arc<dyn ParameterExtractor>,
    {
        let api_key = api_key.filter(|key| !key.is_empty());
        let key = api_key.unwrap_or(DEFAULT_CACHE_KEY);

        if let Some(existing) = self.entries.get(key) {
            return existing.value().clone();
        }

        let full = self.entries.len() >= self.capacity;
        info!(
            "Building extractor (credential supplied: {}, cached: {})",
            api_key.is_some(),
            !full
        );
        let built = build(api_key);
        if full {
            warn!(
                "Extractor cache holds {} entries, not caching new credential",
                self.capacity
            );
            return built;
        }

        self.entries
            .entry(key.to_string())
            .or_insert(built)
            .value()
            .clone()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl std::fmt::Debug for ExtractorCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExtractorCache")
            .field("entries", &self.entries.len())
            .field("capacity", &self.capacity)
            .finish()
    }
}
