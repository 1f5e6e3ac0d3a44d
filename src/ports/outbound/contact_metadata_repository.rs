use crate::takeover::domain::Ecosystem;
use async_trait::async_trait;

/// ContactMetadataRepository port for reading maintainer contact emails
///
/// Only ecosystems with structured contact metadata (npm, PyPI) return
/// anything; every other ecosystem yields an empty list, which is not an error.
#[async_trait]
pub trait ContactMetadataRepository: Send + Sync {
    /// Returns the emails listed for `package`, in registry order
    ///
    /// Duplicates are preserved. Network failures and unexpected responses
    /// produce an empty list.
    async fn fetch_emails(&self, ecosystem: Ecosystem, package: &str) -> Vec<String>;
}
