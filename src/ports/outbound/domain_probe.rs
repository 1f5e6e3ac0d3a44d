use crate::shared::Result;
use async_trait::async_trait;

/// DomainProbe port for checking whether a mail domain is still registered
#[async_trait]
pub trait DomainProbe: Send + Sync {
    /// Returns true if the domain resolves to at least one address
    async fn resolves(&self, domain: &str) -> bool;

    /// Looks up the registration record of `domain`
    ///
    /// # Returns
    /// The registrar name, or `None` when the record shows no active registrar
    ///
    /// # Errors
    /// Returns an error if the registration service cannot be reached or its
    /// reply cannot be read
    async fn registrar(&self, domain: &str) -> Result<Option<String>>;
}
