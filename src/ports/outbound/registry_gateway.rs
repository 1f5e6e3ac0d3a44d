use crate::takeover::domain::{Ecosystem, Existence, SubdependencyLookup};
use async_trait::async_trait;

/// RegistryGateway port for asking a package registry about names
///
/// This port abstracts the per-ecosystem registry endpoints. Implementations
/// translate native responses into the uniform [`Existence`] and
/// [`SubdependencyLookup`] results and never surface transport errors: a call
/// that could not be answered comes back as `Indeterminate`.
#[async_trait]
pub trait RegistryGateway: Send + Sync {
    /// Checks whether `name` is published in the registry of `ecosystem`
    ///
    /// # Arguments
    /// * `ecosystem` - Registry to query
    /// * `name` - Package name, non-empty
    async fn exists(&self, ecosystem: Ecosystem, name: &str) -> Existence;

    /// Fetches the declared dependencies of `name` at `version`
    ///
    /// # Arguments
    /// * `ecosystem` - Registry to query
    /// * `name` - Package name
    /// * `version` - Version constraint as declared; implementations sanitize it
    ///
    /// # Returns
    /// The children in registry order, or `Indeterminate` when the lookup failed
    async fn fetch_subdependencies(
        &self,
        ecosystem: Ecosystem,
        name: &str,
        version: &str,
    ) -> SubdependencyLookup;
}
