use async_trait::async_trait;
use dep_takeover::prelude::*;
use std::collections::HashSet;

/// Mock DomainProbe: every domain is live unless marked unregistered
#[derive(Default)]
pub struct MockDomainProbe {
    unregistered: HashSet<String>,
}

#[allow(dead_code)]
impl MockDomainProbe {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_unregistered(mut self, domain: &str) -> Self {
        self.unregistered.insert(domain.to_string());
        self
    }
}

#[async_trait]
impl DomainProbe for MockDomainProbe {
    async fn resolves(&self, domain: &str) -> bool {
        !self.unregistered.contains(domain)
    }

    async fn registrar(&self, domain: &str) -> Result<Option<String>> {
        if self.unregistered.contains(domain) {
            Ok(None)
        } else {
            Ok(Some("Mock Registrar, Inc.".to_string()))
        }
    }
}
