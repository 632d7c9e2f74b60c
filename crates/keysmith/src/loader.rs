//! Cached, asynchronous dictionary loading.
//!
//! [`DictionaryLoader`] owns a per-identifier cache. Each identifier gets a
//! `tokio::sync::OnceCell`; the map lock is held only long enough to fetch
//! or insert that cell and never across an await. Concurrent loads of one
//! identifier therefore run a single fetch and share the resulting
//! `Arc<Dictionary>`. A failed load drops its empty cell so the next call
//! retries.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use keysmith_core::{parse_dictionary, Dictionary};
use tokio::sync::OnceCell;

use crate::error::DictionaryError;
use crate::source::DictionarySource;

type Slot = Arc<OnceCell<Arc<Dictionary>>>;

/// Explicit dictionary cache in front of a [`DictionarySource`].
pub struct DictionaryLoader<S> {
    source: S,
    cache: Mutex<HashMap<String, Slot>>,
}

impl<S: DictionarySource> DictionaryLoader<S> {
    /// Wrap `source` with an empty cache.
    pub fn new(source: S) -> Self {
        Self {
            source,
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// The underlying source.
    pub const fn source(&self) -> &S {
        &self.source
    }

    /// Load, parse and cache the dictionary stored under `source_id`.
    ///
    /// Returns the cached instance when present.
    ///
    /// # Errors
    ///
    /// - [`DictionaryError::Source`] when the fetch fails
    /// - [`DictionaryError::Generator`] when the text holds no entries
    pub async fn load(&self, source_id: &str) -> Result<Arc<Dictionary>, DictionaryError> {
        let slot = self.slot(source_id);

        if let Some(dictionary) = slot.get() {
            tracing::debug!(source_id, "dictionary cache hit");
            return Ok(Arc::clone(dictionary));
        }

        let result = slot
            .get_or_try_init(|| self.fetch_and_parse(source_id))
            .await
            .map(Arc::clone);

        if let Err(e) = &result {
            tracing::warn!(source_id, error = %e, "dictionary load failed");
            self.evict_empty(source_id, &slot);
        }
        result
    }

    /// Warm the cache for `source_id`.
    ///
    /// # Errors
    ///
    /// Same as [`load`](Self::load).
    pub async fn preload(&self, source_id: &str) -> Result<(), DictionaryError> {
        self.load(source_id).await.map(|_| ())
    }

    /// Whether a parsed dictionary is cached for `source_id`.
    pub fn is_cached(&self, source_id: &str) -> bool {
        self.get_cached(source_id).is_some()
    }

    /// The cached dictionary for `source_id`, without loading.
    pub fn get_cached(&self, source_id: &str) -> Option<Arc<Dictionary>> {
        self.lock()
            .get(source_id)
            .and_then(|slot| slot.get().map(Arc::clone))
    }

    /// Drop every cached dictionary.
    ///
    /// Loads already in flight finish into their detached cells and are not
    /// cached here.
    pub fn clear_cache(&self) {
        let mut cache = self.lock();
        let dropped = cache.len();
        cache.clear();
        tracing::debug!(dropped, "dictionary cache cleared");
    }

    fn slot(&self, source_id: &str) -> Slot {
        let mut cache = self.lock();
        Arc::clone(cache.entry(source_id.to_owned()).or_default())
    }

    /// Forget `slot` if it is still the uninitialised cell for `source_id`.
    fn evict_empty(&self, source_id: &str, slot: &Slot) {
        let mut cache = self.lock();
        let stale = cache
            .get(source_id)
            .is_some_and(|current| Arc::ptr_eq(current, slot) && !current.initialized());
        if stale {
            cache.remove(source_id);
        }
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, Slot>> {
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }

    async fn fetch_and_parse(&self, source_id: &str) -> Result<Arc<Dictionary>, DictionaryError> {
        tracing::debug!(source_id, "fetching dictionary");

        let text = self
            .source
            .fetch(source_id)
            .await
            .map_err(|e| DictionaryError::fetch_failed(source_id, e))?;

        let dictionary = parse_dictionary(&text)?;
        let metadata = dictionary.metadata();

        if metadata.size != dictionary.word_count() {
            tracing::warn!(
                source_id,
                declared = metadata.size,
                parsed = dictionary.word_count(),
                "dictionary size header disagrees with entry count"
            );
        }

        tracing::info!(
            source_id,
            name = %metadata.name,
            words = dictionary.word_count(),
            declared = metadata.size,
            "dictionary cached"
        );

        Ok(Arc::new(dictionary))
    }
}

impl<S> std::fmt::Debug for DictionaryLoader<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let cached = self
            .cache
            .lock()
            .map_or(0, |cache| cache.values().filter(|slot| slot.initialized()).count());
        f.debug_struct("DictionaryLoader")
            .field("cached", &cached)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FetchError;
    use crate::source::MemorySource;

    const TINY: &str = "#name: Tiny\n#size: 2\n11 alpha\n12 beta\n";

    fn loader() -> DictionaryLoader<MemorySource> {
        DictionaryLoader::new(
            MemorySource::new()
                .with("/tiny.txt", TINY)
                .with("/empty.txt", "# name: Empty\n\n"),
        )
    }

    #[tokio::test]
    async fn load_parses_and_caches() {
        let loader = loader();
        assert!(!loader.is_cached("/tiny.txt"));

        let dict = loader.load("/tiny.txt").await.unwrap();
        assert_eq!(dict.metadata().name, "Tiny");
        assert_eq!(dict.word_count(), 2);
        assert!(loader.is_cached("/tiny.txt"));

        let again = loader.load("/tiny.txt").await.unwrap();
        assert!(Arc::ptr_eq(&dict, &again));
    }

    #[tokio::test]
    async fn missing_source_maps_to_source_error() {
        let loader = loader();
        let err = loader.load("/nope.txt").await.unwrap_err();
        match err {
            DictionaryError::Source { source_id, source } => {
                assert_eq!(source_id, "/nope.txt");
                assert!(matches!(source, FetchError::NotFound(_)));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(!loader.is_cached("/nope.txt"));
        assert!(loader.get_cached("/nope.txt").is_none());
    }

    #[tokio::test]
    async fn empty_dictionary_is_generator_error() {
        let loader = loader();
        let err = loader.load("/empty.txt").await.unwrap_err();
        assert!(matches!(
            err,
            DictionaryError::Generator(keysmith_core::GeneratorError::EmptyDictionary)
        ));
        assert!(!loader.is_cached("/empty.txt"));
    }

    #[tokio::test]
    async fn failed_loads_leave_no_cells_behind() {
        let loader = DictionaryLoader::new(MemorySource::new());
        for i in 0..100 {
            assert!(loader.load(&format!("/missing-{i}.txt")).await.is_err());
        }
        assert!(loader.lock().is_empty());
    }

    #[tokio::test]
    async fn eviction_keeps_loaded_neighbours() {
        let loader = loader();
        loader.load("/tiny.txt").await.unwrap();
        assert!(loader.load("/empty.txt").await.is_err());

        let cache = loader.lock();
        assert_eq!(cache.len(), 1);
        assert!(cache.contains_key("/tiny.txt"));
    }

    #[tokio::test]
    async fn clear_cache_forces_new_instance() {
        let loader = loader();
        let first = loader.load("/tiny.txt").await.unwrap();
        loader.clear_cache();
        assert!(!loader.is_cached("/tiny.txt"));

        let second = loader.load("/tiny.txt").await.unwrap();
        assert!(!Arc::ptr_eq(&first, &second));
        assert_eq!(first.entries(), second.entries());
    }

    #[tokio::test]
    async fn preload_then_get_cached() {
        let loader = loader();
        assert!(loader.get_cached("/tiny.txt").is_none());
        loader.preload("/tiny.txt").await.unwrap();
        let cached = loader.get_cached("/tiny.txt").unwrap();
        assert_eq!(cached.entries()[0].index, "11");
    }

    #[tokio::test]
    async fn debug_reports_cached_count() {
        let loader = loader();
        loader.preload("/tiny.txt").await.unwrap();
        let debug = format!("{loader:?}");
        assert!(debug.contains("cached: 1"), "{debug}");
    }
}
