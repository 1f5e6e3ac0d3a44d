use async_trait::async_trait;
use dep_takeover::prelude::*;
use std::collections::HashMap;

/// Mock ContactMetadataRepository returning canned maintainer emails
#[derive(Default)]
pub struct MockContactMetadata {
    emails: HashMap<String, Vec<String>>,
}

#[allow(dead_code)]
impl MockContactMetadata {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_emails(mut self, package: &str, emails: &[&str]) -> Self {
        self.emails.insert(
            package.to_string(),
            emails.iter().map(|e| e.to_string()).collect(),
        );
        self
    }
}

#[async_trait]
impl ContactMetadataRepository for MockContactMetadata {
    async fn fetch_emails(&self, _ecosystem: Ecosystem, package: &str) -> Vec<String> {
        self.emails.get(package).cloned().unwrap_or_default()
    }
}
