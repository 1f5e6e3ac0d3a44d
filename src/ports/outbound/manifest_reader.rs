use crate::shared::Result;
use crate::takeover::domain::{DependencyMap, Ecosystem};
use std::path::Path;

/// ManifestReader port for extracting declared dependencies from a project
///
/// This port abstracts the file system walk and the per-ecosystem manifest
/// formats. The analyzer only ever sees the resulting [`DependencyMap`].
pub trait ManifestReader {
    /// Reads every manifest of `ecosystem` under `project_path`
    ///
    /// # Arguments
    /// * `project_path` - Root of the project tree to scan
    /// * `ecosystem` - Which manifests to read
    ///
    /// # Returns
    /// The merged name -> version constraint map, in discovery order. Entries that
    /// cannot be claimed from a registry (git, URL, path sources) are left out.
    ///
    /// # Errors
    /// Returns an error if the project directory itself cannot be read. Individual
    /// manifests that fail to parse are skipped.
    fn read_dependencies(&self, project_path: &Path, ecosystem: Ecosystem) -> Result<DependencyMap>;
}
