//! Per-ecosystem manifest parsers
//!
//! Each parser turns the text of one manifest into dependency records. Entries
//! that are not registry packages (git, URL and path sources) are left out, since
//! there is no registry name for anyone to claim.

mod cargo;
mod go;
mod gradle;
mod maven;
mod npm;
mod pypi;
mod rubygems;

use crate::shared::Result;
use crate::takeover::domain::{DependencyRecord, Ecosystem};

/// What one manifest file contributes
#[derive(Debug, Default)]
pub struct ParsedManifest {
    /// Name the manifest publishes itself under, when it says
    pub package_name: Option<String>,
    /// Whether this manifest is the root of an npm workspace
    pub declares_workspaces: bool,
    pub dependencies: Vec<DependencyRecord>,
}

impl ParsedManifest {
    fn from_dependencies(dependencies: Vec<DependencyRecord>) -> Self {
        Self {
            dependencies,
            ..Self::default()
        }
    }
}

/// Parses `content` as the manifest `file_name` of `ecosystem`
pub fn parse_manifest(ecosystem: Ecosystem, file_name: &str, content: &str) -> Result<ParsedManifest> {
    match ecosystem {
        Ecosystem::Npm => npm::parse(content),
        Ecosystem::Pypi if file_name == "pyproject.toml" => {
            pypi::parse_pyproject(content).map(ParsedManifest::from_dependencies)
        }
        Ecosystem::Pypi => Ok(ParsedManifest::from_dependencies(pypi::parse_requirements(
            content,
        ))),
        Ecosystem::Cargo => cargo::parse(content).map(ParsedManifest::from_dependencies),
        Ecosystem::Go => Ok(ParsedManifest::from_dependencies(go::parse(content))),
        Ecosystem::Maven => Ok(ParsedManifest::from_dependencies(maven::parse(content))),
        Ecosystem::Gradle => Ok(ParsedManifest::from_dependencies(gradle::parse(content))),
        Ecosystem::Rubygems => Ok(ParsedManifest::from_dependencies(rubygems::parse(content))),
    }
}

/// Builds a record, dropping names that fail validation
fn record(name: &str, version: &str) -> Option<DependencyRecord> {
    match DependencyRecord::new(name, version) {
        Ok(record) => Some(record),
        Err(e) => {
            tracing::debug!("Skipping manifest entry '{}': {}", name, e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dispatch_by_file_name() {
        let pyproject = "[project]\ndependencies = [\"click>=8.0.0\"]\n";
        let parsed = parse_manifest(Ecosystem::Pypi, "pyproject.toml", pyproject).unwrap();
        assert_eq!(parsed.dependencies[0].name(), "click");

        let parsed = parse_manifest(Ecosystem::Pypi, "requirements-dev.txt", "pytest>=7\n").unwrap();
        assert_eq!(parsed.dependencies[0].name(), "pytest");
    }

    #[test]
    fn test_malformed_structured_manifest_is_an_error() {
        assert!(parse_manifest(Ecosystem::Npm, "package.json", "{ not json").is_err());
        assert!(parse_manifest(Ecosystem::Cargo, "Cargo.toml", "[dependencies\n").is_err());
    }
}
