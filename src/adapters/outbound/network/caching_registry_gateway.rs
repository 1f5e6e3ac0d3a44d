use crate::ports::outbound::RegistryGateway;
use crate::takeover::domain::{DependencyRecord, Ecosystem, Existence, SubdependencyLookup};
use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Arc;

/// Cache key: a name in one ecosystem, plus the version for sub-dependency lookups
#[derive(Debug, Clone, Hash, Eq, PartialEq)]
struct LookupKey {
    ecosystem: Ecosystem,
    name: String,
    version: Option<String>,
}

impl LookupKey {
    fn existence(ecosystem: Ecosystem, name: &str) -> Self {
        Self {
            ecosystem,
            name: name.to_string(),
            version: None,
        }
    }

    fn children(ecosystem: Ecosystem, name: &str, version: &str) -> Self {
        Self {
            ecosystem,
            name: name.to_string(),
            version: Some(version.to_string()),
        }
    }
}

#[derive(Debug, Clone)]
enum CachedLookup {
    Existence(Existence),
    Children(Vec<DependencyRecord>),
}

/// Memo of conclusive registry answers, owned by whoever builds the gateway
///
/// Lives for one process run. Share it through an `Arc` to reuse answers across
/// the per-ecosystem passes of a multi-ecosystem scan.
#[derive(Debug, Default)]
pub struct LookupCache {
    entries: DashMap<LookupKey, CachedLookup>,
}

impl LookupCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn existence(&self, key: &LookupKey) -> Option<Existence> {
        match self.entries.get(key).as_deref() {
            Some(CachedLookup::Existence(existence)) => Some(*existence),
            _ => None,
        }
    }

    fn children(&self, key: &LookupKey) -> Option<Vec<DependencyRecord>> {
        match self.entries.get(key).as_deref() {
            Some(CachedLookup::Children(children)) => Some(children.clone()),
            _ => None,
        }
    }

    fn put(&self, key: LookupKey, value: CachedLookup) {
        self.entries.insert(key, value);
    }
}

/// CachingRegistryGateway wraps a RegistryGateway and memoizes its answers.
///
/// Only conclusive answers are stored. An `Indeterminate` result is handed back
/// but not remembered, so a later call for the same name asks the registry again.
pub struct CachingRegistryGateway<G: RegistryGateway> {
    inner: G,
    cache: Arc<LookupCache>,
}

impl<G: RegistryGateway> CachingRegistryGateway<G> {
    /// Wraps `inner` with a fresh cache
    pub fn new(inner: G) -> Self {
        Self::with_cache(inner, Arc::new(LookupCache::new()))
    }

    /// Wraps `inner` with an existing cache
    pub fn with_cache(inner: G, cache: Arc<LookupCache>) -> Self {
        Self { inner, cache }
    }

    pub fn cache(&self) -> &Arc<LookupCache> {
        &self.cache
    }
}

#[async_trait]
impl<G: RegistryGateway> RegistryGateway for CachingRegistryGateway<G> {
    async fn exists(&self, ecosystem: Ecosystem, name: &str) -> Existence {
        let key = LookupKey::existence(ecosystem, name);
        if let Some(cached) = self.cache.existence(&key) {
            return cached;
        }

        let existence = self.inner.exists(ecosystem, name).await;
        if existence.is_conclusive() {
            self.cache.put(key, CachedLookup::Existence(existence));
        }
        existence
    }

    async fn fetch_subdependencies(
        &self,
        ecosystem: Ecosystem,
        name: &str,
        version: &str,
    ) -> SubdependencyLookup {
        let key = LookupKey::children(ecosystem, name, version);
        if let Some(children) = self.cache.children(&key) {
            return SubdependencyLookup::Resolved(children);
        }

        let lookup = self
            .inner
            .fetch_subdependencies(ecosystem, name, version)
            .await;
        if let SubdependencyLookup::Resolved(children) = &lookup {
            self.cache.put(key, CachedLookup::Children(children.clone()));
        }
        lookup
    }
}
