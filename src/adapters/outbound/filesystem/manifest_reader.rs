use crate::adapters::outbound::manifests::{parse_manifest, ParsedManifest};
use crate::ports::outbound::ManifestReader;
use crate::shared::error::TakeoverError;
use crate::shared::security::read_guarded_file;
use crate::shared::Result;
use crate::takeover::domain::{DependencyMap, Ecosystem};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Directories that hold installed or generated code rather than project manifests
const SKIPPED_DIRECTORIES: &[&str] = &[
    "node_modules",
    ".git",
    "target",
    "vendor",
    ".venv",
    "venv",
    "__pycache__",
    "build",
    "dist",
];

/// Maximum directory depth scanned below the project root (DoS protection)
const MAX_SCAN_DEPTH: usize = 32;

/// FileSystemManifestReader adapter collecting declared dependencies from a project tree
///
/// Walks the tree below the project root with `walkdir`, without following
/// symbolic links, and parses every manifest of the requested ecosystem. Within a
/// directory, files are visited before subdirectories and both in name order, so
/// the resulting map order is stable across runs.
pub struct FileSystemManifestReader;

impl FileSystemManifestReader {
    pub fn new() -> Self {
        Self
    }

    fn find_manifests(&self, root: &Path, ecosystem: Ecosystem) -> Result<Vec<PathBuf>> {
        let mut found = Vec::new();
        let mut depth_limit_hit = false;

        let walker = WalkDir::new(root)
            .max_depth(MAX_SCAN_DEPTH + 1)
            .follow_links(false)
            .sort_by(|a, b| {
                a.file_type()
                    .is_dir()
                    .cmp(&b.file_type().is_dir())
                    .then_with(|| a.file_name().cmp(b.file_name()))
            })
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || !is_skipped_directory(e));

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) if e.depth() == 0 => {
                    return Err(TakeoverError::ManifestReadError {
                        path: root.to_path_buf(),
                        details: e.to_string(),
                    }
                    .into());
                }
                Err(e) => {
                    tracing::warn!("Skipping unreadable entry: {}", e);
                    continue;
                }
            };

            let file_type = entry.file_type();
            if file_type.is_dir() && entry.depth() == MAX_SCAN_DEPTH + 1 {
                depth_limit_hit = true;
            } else if file_type.is_file()
                && entry.file_name().to_str().is_some_and(|n| ecosystem.is_manifest(n))
            {
                found.push(entry.into_path());
            }
        }

        if depth_limit_hit {
            tracing::warn!(
                "Not descending further than {} directories below the project root",
                MAX_SCAN_DEPTH
            );
        }

        Ok(found)
    }

    fn parse_file(&self, path: &Path, ecosystem: Ecosystem) -> Option<ParsedManifest> {
        let file_name = path.file_name()?.to_str()?;

        let parsed = read_guarded_file(path, file_name)
            .and_then(|content| parse_manifest(ecosystem, file_name, &content));

        match parsed {
            Ok(manifest) => {
                tracing::debug!(
                    "{}: {} dependencies",
                    path.display(),
                    manifest.dependencies.len()
                );
                Some(manifest)
            }
            Err(e) => {
                tracing::warn!("Skipping manifest {}: {:#}", path.display(), e);
                None
            }
        }
    }
}

impl Default for FileSystemManifestReader {
    fn default() -> Self {
        Self::new()
    }
}

impl ManifestReader for FileSystemManifestReader {
    fn read_dependencies(&self, project_path: &Path, ecosystem: Ecosystem) -> Result<DependencyMap> {
        let manifests: Vec<ParsedManifest> = self
            .find_manifests(project_path, ecosystem)?
            .iter()
            .filter_map(|path| self.parse_file(path, ecosystem))
            .collect();

        // workspace members are built from the tree, not fetched from the registry
        let local_packages: HashSet<&str> = if manifests.iter().any(|m| m.declares_workspaces) {
            manifests
                .iter()
                .filter_map(|m| m.package_name.as_deref())
                .collect()
        } else {
            HashSet::new()
        };

        let mut dependencies = DependencyMap::new();
        for record in manifests.iter().flat_map(|m| m.dependencies.iter()) {
            if local_packages.contains(record.name()) {
                continue;
            }
            dependencies.insert_if_absent(record.clone());
        }

        Ok(dependencies)
    }
}

fn is_skipped_directory(entry: &DirEntry) -> bool {
    entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| SKIPPED_DIRECTORIES.contains(&name))
}
