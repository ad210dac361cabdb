//! Session cache for attribute terms.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use moka::future::Cache;
use tracing::warn;

use backroom_core::{AttributeId, TermId};

use crate::woo::{AttributeTerm, StoreApi};

/// Cache for attribute terms with an explicit staleness policy.
///
/// Terms rarely change, so the default policy keeps them for the whole
/// session; [`TermCache::with_ttl`] bounds staleness instead. A successful
/// empty result counts as loaded - [`TermCache::load`] will not re-fetch it
/// - and a failed load is recorded per attribute and cached as empty so the
/// UI can offer a retry without an endless loading state. A failure is
/// local to one attribute and never blocks others.
pub struct TermCache {
    cache: Cache<AttributeId, Arc<Vec<AttributeTerm>>>,
    errors: Mutex<HashMap<AttributeId, String>>,
}

impl TermCache {
    /// Session-long cache: entries never expire; only explicit
    /// [`TermCache::invalidate`] or [`TermCache::retry`] refresh them.
    #[must_use]
    pub fn session() -> Self {
        Self::build(None)
    }

    /// Cache with a bounded time-to-live.
    #[must_use]
    pub fn with_ttl(ttl: Duration) -> Self {
        Self::build(Some(ttl))
    }

    fn build(ttl: Option<Duration>) -> Self {
        let mut builder = Cache::builder().max_capacity(1_000);
        if let Some(ttl) = ttl {
            builder = builder.time_to_live(ttl);
        }
        Self {
            cache: builder.build(),
            errors: Mutex::new(HashMap::new()),
        }
    }

    /// Fetch-and-cache the terms of one attribute.
    ///
    /// Idempotent: a cached entry - including a cached empty result - is
    /// returned without a network call.
    pub async fn load<A: StoreApi>(
        &self,
        api: &A,
        attribute: AttributeId,
    ) -> Arc<Vec<AttributeTerm>> {
        if let Some(terms) = self.cache.get(&attribute).await {
            return terms;
        }

        match api.list_attribute_terms(attribute).await {
            Ok(terms) => {
                self.clear_error(attribute);
                let terms = Arc::new(terms);
                self.cache.insert(attribute, Arc::clone(&terms)).await;
                terms
            }
            Err(err) => {
                warn!(attribute = %attribute, error = %err, "Failed to load attribute terms");
                self.record_error(attribute, err.to_string());
                // Cache empty so the loading state ends; retry() re-fetches.
                let empty = Arc::new(Vec::new());
                self.cache.insert(attribute, Arc::clone(&empty)).await;
                empty
            }
        }
    }

    /// The cached terms of an attribute, if loaded.
    pub async fn get(&self, attribute: AttributeId) -> Option<Arc<Vec<AttributeTerm>>> {
        self.cache.get(&attribute).await
    }

    /// The recorded load error for an attribute, if its last load failed.
    #[must_use]
    pub fn load_error(&self, attribute: AttributeId) -> Option<String> {
        self.errors
            .lock()
            .ok()
            .and_then(|errors| errors.get(&attribute).cloned())
    }

    /// Drop a cached entry and its recorded error.
    pub async fn invalidate(&self, attribute: AttributeId) {
        self.cache.invalidate(&attribute).await;
        self.clear_error(attribute);
    }

    /// Invalidate and re-fetch one attribute's terms.
    pub async fn retry<A: StoreApi>(
        &self,
        api: &A,
        attribute: AttributeId,
    ) -> Arc<Vec<AttributeTerm>> {
        self.invalidate(attribute).await;
        self.load(api, attribute).await
    }

    /// Resolve a term id to its display name, from cache only.
    pub async fn term_name(&self, attribute: AttributeId, term: TermId) -> Option<String> {
        self.get(attribute)
            .await?
            .iter()
            .find(|t| t.id == term)
            .map(|t| t.name.clone())
    }

    /// Resolve a term display name or slug back to its id (edit-mode
    /// hydration: product attributes carry option names, not ids).
    pub async fn find_term(&self, attribute: AttributeId, option: &str) -> Option<TermId> {
        self.get(attribute)
            .await?
            .iter()
            .find(|t| t.name == option || t.slug == option)
            .map(|t| t.id)
    }

    fn record_error(&self, attribute: AttributeId, message: String) {
        if let Ok(mut errors) = self.errors.lock() {
            errors.insert(attribute, message);
        }
    }

    fn clear_error(&self, attribute: AttributeId) {
        if let Ok(mut errors) = self.errors.lock() {
            errors.remove(&attribute);
        }
    }
}

impl Default for TermCache {
    fn default() -> Self {
        Self::session()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::test_support::FakeStore;

    const COLOR: AttributeId = AttributeId::new(1);

    #[tokio::test]
    async fn test_load_is_idempotent() {
        let store = Arc::new(FakeStore::new());
        store.seed_terms(COLOR, &[(10, "Red"), (11, "Blue")]);
        let cache = TermCache::session();

        let first = cache.load(&store, COLOR).await;
        assert_eq!(first.len(), 2);
        assert_eq!(store.term_fetch_count(COLOR), 1);

        let second = cache.load(&store, COLOR).await;
        assert_eq!(second.len(), 2);
        // Cached; no second fetch
        assert_eq!(store.term_fetch_count(COLOR), 1);
    }

    #[tokio::test]
    async fn test_empty_result_counts_as_loaded() {
        let store = Arc::new(FakeStore::new());
        store.seed_terms(COLOR, &[]);
        let cache = TermCache::session();

        cache.load(&store, COLOR).await;
        cache.load(&store, COLOR).await;

        assert_eq!(store.term_fetch_count(COLOR), 1);
        assert!(cache.load_error(COLOR).is_none());
    }

    #[tokio::test]
    async fn test_failure_records_error_and_caches_empty() {
        let store = Arc::new(FakeStore::new());
        store.fail_terms(COLOR, true);
        let cache = TermCache::session();

        let terms = cache.load(&store, COLOR).await;
        assert!(terms.is_empty());
        assert!(cache.load_error(COLOR).is_some());

        // Marked loaded-empty: no re-fetch without an explicit retry
        cache.load(&store, COLOR).await;
        assert_eq!(store.term_fetch_count(COLOR), 1);
    }

    #[tokio::test]
    async fn test_retry_refetches_and_clears_error() {
        let store = Arc::new(FakeStore::new());
        store.fail_terms(COLOR, true);
        let cache = TermCache::session();

        cache.load(&store, COLOR).await;
        assert!(cache.load_error(COLOR).is_some());

        store.fail_terms(COLOR, false);
        store.seed_terms(COLOR, &[(10, "Red")]);
        let terms = cache.retry(&store, COLOR).await;

        assert_eq!(terms.len(), 1);
        assert!(cache.load_error(COLOR).is_none());
    }

    #[tokio::test]
    async fn test_term_resolution() {
        let store = Arc::new(FakeStore::new());
        store.seed_terms(COLOR, &[(10, "Red"), (11, "Blue")]);
        let cache = TermCache::session();
        cache.load(&store, COLOR).await;

        assert_eq!(
            cache.term_name(COLOR, TermId::new(10)).await,
            Some("Red".to_string())
        );
        assert_eq!(cache.find_term(COLOR, "Blue").await, Some(TermId::new(11)));
        assert_eq!(cache.find_term(COLOR, "blue").await, Some(TermId::new(11)));
        assert_eq!(cache.find_term(COLOR, "Green").await, None);
    }
}
