//! Memoizing wrapper around another lemmatizer.

use std::sync::Arc;

use ahash::AHashMap;
use parking_lot::RwLock;

use crate::analysis::lemmatizer::Lemmatizer;

/// Default upper bound on memoized entries.
pub const DEFAULT_CACHE_CAPACITY: usize = 100_000;

/// Lemmatizer that remembers the answers of an inner backend.
///
/// Comment corpora repeat the same few thousand words over and over, so an
/// expensive backend only needs to see each distinct word once. Once the cache
/// reaches its capacity new words are still answered, just not remembered.
pub struct CachedLemmatizer {
    inner: Arc<dyn Lemmatizer>,
    cache: RwLock<AHashMap<String, String>>,
    capacity: usize,
}

impl std::fmt::Debug for CachedLemmatizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CachedLemmatizer")
            .field("inner", &self.inner.name())
            .field("entries", &self.cache.read().len())
            .field("capacity", &self.capacity)
            .finish()
    }
}

impl CachedLemmatizer {
    /// Wrap `inner` with the default capacity.
    pub fn new(inner: Arc<dyn Lemmatizer>) -> Self {
        Self::with_capacity(inner, DEFAULT_CACHE_CAPACITY)
    }

    /// Wrap `inner` with an explicit capacity.
    pub fn with_capacity(inner: Arc<dyn Lemmatizer>, capacity: usize) -> Self {
        CachedLemmatizer {
            inner,
            cache: RwLock::new(AHashMap::new()),
            capacity,
        }
    }

    /// Number of memoized words.
    pub fn len(&self) -> usize {
        self.cache.read().len()
    }

    /// Check if nothing has been memoized yet.
    pub fn is_empty(&self) -> bool {
        self.cache.read().is_empty()
    }

    /// Drop every memoized entry.
    pub fn clear(&self) {
        self.cache.write().clear();
    }
}

impl Lemmatizer for CachedLemmatizer {
    fn base_form(&self, word: &str) -> String {
        if let Some(lemma) = self.cache.read().get(word) {
            return lemma.clone();
        }

        let lemma = self.inner.base_form(word);

        let mut cache = self.cache.write();
        if cache.len() < self.capacity {
            cache.insert(word.to_string(), lemma.clone());
        }

        lemma
    }

    fn name(&self) -> &'static str {
        "cached"
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::analysis::lemmatizer::DictionaryLemmatizer;

    struct CountingLemmatizer {
        calls: AtomicUsize,
    }

    impl Lemmatizer for CountingLemmatizer {
        fn base_form(&self, word: &str) -> String {
            self.calls.fetch_add(1, Ordering::SeqCst);
            word.trim_end_matches('у').to_string()
        }

        fn name(&self) -> &'static str {
            "counting"
        }
    }

    #[test]
    fn test_cache_hits_skip_inner() {
        let inner = Arc::new(CountingLemmatizer {
            calls: AtomicUsize::new(0),
        });
        let cached = CachedLemmatizer::new(inner.clone());

        assert_eq!(cached.base_form("мастеру"), "мастер");
        assert_eq!(cached.base_form("мастеру"), "мастер");
        assert_eq!(cached.base_form("мастеру"), "мастер");

        assert_eq!(inner.calls.load(Ordering::SeqCst), 1);
        assert_eq!(cached.len(), 1);
    }

    #[test]
    fn test_capacity_limit() {
        let cached =
            CachedLemmatizer::with_capacity(Arc::new(DictionaryLemmatizer::russian()), 1);

        assert_eq!(cached.base_form("мастеру"), "мастер");
        assert_eq!(cached.base_form("сделали"), "сделать");
        assert_eq!(cached.len(), 1);

        cached.clear();
        assert!(cached.is_empty());
    }
}
