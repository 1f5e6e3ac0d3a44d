use async_trait::async_trait;
use dep_takeover::prelude::*;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

/// Mock RegistryGateway backed by in-memory package data
///
/// Packages are existing unless marked missing or indeterminate. Every call is
/// recorded so tests can assert on request counts.
#[derive(Default, Clone)]
pub struct MockRegistryGateway {
    missing: HashSet<String>,
    indeterminate: HashSet<String>,
    children: HashMap<String, Vec<(String, String)>>,
    pub exists_calls: Arc<Mutex<Vec<String>>>,
    pub subdependency_calls: Arc<Mutex<Vec<(String, String)>>>,
}

#[allow(dead_code)]
impl MockRegistryGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_missing(mut self, name: &str) -> Self {
        self.missing.insert(name.to_string());
        self
    }

    pub fn with_indeterminate(mut self, name: &str) -> Self {
        self.indeterminate.insert(name.to_string());
        self
    }

    pub fn with_children(mut self, name: &str, children: &[(&str, &str)]) -> Self {
        self.children.insert(
            name.to_string(),
            children
                .iter()
                .map(|(n, v)| (n.to_string(), v.to_string()))
                .collect(),
        );
        self
    }

    pub fn exists_count(&self, name: &str) -> usize {
        self.exists_calls
            .lock()
            .unwrap()
            .iter()
            .filter(|n| *n == name)
            .count()
    }
}

#[async_trait]
impl RegistryGateway for MockRegistryGateway {
    async fn exists(&self, _ecosystem: Ecosystem, name: &str) -> Existence {
        self.exists_calls.lock().unwrap().push(name.to_string());
        if self.indeterminate.contains(name) {
            Existence::Indeterminate
        } else if self.missing.contains(name) {
            Existence::Missing
        } else {
            Existence::Existing
        }
    }

    async fn fetch_subdependencies(
        &self,
        _ecosystem: Ecosystem,
        name: &str,
        version: &str,
    ) -> SubdependencyLookup {
        self.subdependency_calls
            .lock()
            .unwrap()
            .push((name.to_string(), version.to_string()));

        let children = self
            .children
            .get(name)
            .map(|children| {
                children
                    .iter()
                    .filter_map(|(n, v)| DependencyRecord::new(n.as_str(), v.as_str()).ok())
                    .collect()
            })
            .unwrap_or_default();
        SubdependencyLookup::Resolved(children)
    }
}
