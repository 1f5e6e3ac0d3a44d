use crate::shared::error::TakeoverError;
use crate::takeover::domain::Ecosystem;
use std::collections::HashMap;

/// Maximum length for package names (security limit)
const MAX_PACKAGE_NAME_LENGTH: usize = 255;

/// Maximum length for version constraints (security limit)
const MAX_VERSION_LENGTH: usize = 100;

/// A declared dependency: a registry name and the constraint it was declared with
///
/// The constraint is kept verbatim (`^4.18.0`, `>=2.0`, or empty when unknown);
/// lookups go through [`sanitize_version`] before it reaches a URL.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DependencyRecord {
    name: String,
    version: String,
}

impl DependencyRecord {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Result<Self, TakeoverError> {
        let name = name.into().trim().to_string();
        let version = version.into().trim().to_string();

        if name.is_empty() {
            return Err(TakeoverError::Validation {
                message: "Package name cannot be empty".to_string(),
            });
        }

        // Security: Length limits to prevent DoS
        if name.len() > MAX_PACKAGE_NAME_LENGTH {
            return Err(TakeoverError::Validation {
                message: format!(
                    "Package name is too long ({} bytes). Maximum allowed: {} bytes",
                    name.len(),
                    MAX_PACKAGE_NAME_LENGTH
                ),
            });
        }
        if version.len() > MAX_VERSION_LENGTH {
            return Err(TakeoverError::Validation {
                message: format!(
                    "Version constraint is too long ({} bytes). Maximum allowed: {} bytes",
                    version.len(),
                    MAX_VERSION_LENGTH
                ),
            });
        }

        Ok(Self { name, version })
    }

    /// Parses a `name[:version]` spec as given on the command line
    ///
    /// For maven and gradle the first colon separates group and artifact, so the
    /// version (if any) follows the second colon.
    pub fn parse_spec(ecosystem: Ecosystem, spec: &str) -> Result<Self, TakeoverError> {
        let spec = spec.trim();
        let split_at = spec
            .match_indices(':')
            .nth(ecosystem.name_colon_count())
            .map(|(index, _)| index);

        let (name, version) = match split_at {
            Some(index) => (&spec[..index], &spec[index + 1..]),
            None => (spec, ""),
        };

        Self::new(name, version).map_err(|e| TakeoverError::InvalidDependencySpec {
            spec: spec.to_string(),
            reason: match e {
                TakeoverError::Validation { message } => message,
                other => other.to_string(),
            },
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> &str {
        &self.version
    }
}

/// Reduces a version constraint to a bare version usable in a registry URL
///
/// Leading range operators are dropped and the first run of alphanumerics, dots and
/// hyphens is kept: `^1.0.0-beta+build` becomes `1.0.0-beta`, `>=2.0,<3` becomes `2.0`.
pub fn sanitize_version(version: &str) -> String {
    version
        .trim()
        .trim_start_matches(|c: char| !c.is_ascii_alphanumeric())
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric() || *c == '.' || *c == '-')
        .collect()
}

/// Name -> version constraint map that remembers insertion order
///
/// Serves as both the seed handed over by a manifest reader and the accumulator of
/// transitive names discovered during analysis.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DependencyMap {
    entries: Vec<DependencyRecord>,
    index: HashMap<String, usize>,
}

impl DependencyMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or updates an entry; an update keeps the original position
    pub fn insert(&mut self, record: DependencyRecord) {
        match self.index.get(record.name()) {
            Some(&position) => self.entries[position] = record,
            None => {
                self.index.insert(record.name().to_string(), self.entries.len());
                self.entries.push(record);
            }
        }
    }

    /// Inserts only when the name is not present yet; returns whether it was added
    pub fn insert_if_absent(&mut self, record: DependencyRecord) -> bool {
        if self.contains(record.name()) {
            return false;
        }
        self.insert(record);
        true
    }

    /// Removes every entry whose name does not satisfy `keep`
    pub fn retain(&mut self, mut keep: impl FnMut(&DependencyRecord) -> bool) {
        self.entries.retain(|record| keep(record));
        self.index = self
            .entries
            .iter()
            .enumerate()
            .map(|(position, record)| (record.name().to_string(), position))
            .collect();
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.index
            .get(name)
            .map(|&position| self.entries[position].version())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DependencyRecord> {
        self.entries.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|record| record.name())
    }
}

impl FromIterator<DependencyRecord> for DependencyMap {
    fn from_iter<T: IntoIterator<Item = DependencyRecord>>(iter: T) -> Self {
        let mut map = DependencyMap::new();
        for record in iter {
            map.insert(record);
        }
        map
    }
}

impl<'a> IntoIterator for &'a DependencyMap {
    type Item = &'a DependencyRecord;
    type IntoIter = std::slice::Iter<'a, DependencyRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, version: &str) -> DependencyRecord {
        DependencyRecord::new(name, version).unwrap()
    }

    #[test]
    fn test_record_rejects_empty_name() {
        assert!(DependencyRecord::new("", "1.0.0").is_err());
        assert!(DependencyRecord::new("   ", "1.0.0").is_err());
    }

    #[test]
    fn test_record_allows_empty_version() {
        let dep = record("serde", "");
        assert_eq!(dep.version(), "");
    }

    #[test]
    fn test_record_rejects_oversized_name() {
        let name = "a".repeat(MAX_PACKAGE_NAME_LENGTH + 1);
        assert!(DependencyRecord::new(name, "1.0").is_err());
    }

    #[test]
    fn test_parse_spec_with_version() {
        let dep = DependencyRecord::parse_spec(Ecosystem::Pypi, "requests:2.25.0").unwrap();
        assert_eq!(dep.name(), "requests");
        assert_eq!(dep.version(), "2.25.0");
    }

    #[test]
    fn test_parse_spec_without_version() {
        let dep = DependencyRecord::parse_spec(Ecosystem::Cargo, "serde").unwrap();
        assert_eq!(dep.name(), "serde");
        assert_eq!(dep.version(), "");
    }

    #[test]
    fn test_parse_spec_scoped_npm() {
        let dep = DependencyRecord::parse_spec(Ecosystem::Npm, "@scope/pkg:1.2.3").unwrap();
        assert_eq!(dep.name(), "@scope/pkg");
        assert_eq!(dep.version(), "1.2.3");
    }

    #[test]
    fn test_parse_spec_maven_coordinates() {
        let dep =
            DependencyRecord::parse_spec(Ecosystem::Maven, "org.example:artifact:1.0.0").unwrap();
        assert_eq!(dep.name(), "org.example:artifact");
        assert_eq!(dep.version(), "1.0.0");

        let dep = DependencyRecord::parse_spec(Ecosystem::Gradle, "org.example:artifact").unwrap();
        assert_eq!(dep.name(), "org.example:artifact");
        assert_eq!(dep.version(), "");
    }

    #[test]
    fn test_parse_spec_empty_name() {
        let err = DependencyRecord::parse_spec(Ecosystem::Npm, ":1.0.0").unwrap_err();
        assert!(matches!(err, TakeoverError::InvalidDependencySpec { .. }));
    }

    #[test]
    fn test_sanitize_version_strips_operators_and_build_metadata() {
        assert_eq!(sanitize_version("^1.0.0-beta+build"), "1.0.0-beta");
        assert_eq!(sanitize_version("~4.17.21"), "4.17.21");
        assert_eq!(sanitize_version(">=2.0.0,<3.0.0"), "2.0.0");
        assert_eq!(sanitize_version("~> 7.0"), "7.0");
        assert_eq!(sanitize_version("v1.9.1"), "v1.9.1");
    }

    #[test]
    fn test_sanitize_version_wildcards_and_empty() {
        assert_eq!(sanitize_version("*"), "");
        assert_eq!(sanitize_version(""), "");
        assert_eq!(sanitize_version("latest"), "latest");
    }

    #[test]
    fn test_map_preserves_insertion_order() {
        let map: DependencyMap = vec![record("zeta", "1"), record("alpha", "2"), record("mid", "3")]
            .into_iter()
            .collect();
        let names: Vec<&str> = map.names().collect();
        assert_eq!(names, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_map_update_keeps_position() {
        let mut map = DependencyMap::new();
        map.insert(record("requests", "2.31.0"));
        map.insert(record("flask", "2.0.0"));
        map.insert(record("requests", "2.32.3"));

        assert_eq!(map.len(), 2);
        assert_eq!(map.get("requests"), Some("2.32.3"));
        assert_eq!(map.names().next(), Some("requests"));
    }

    #[test]
    fn test_map_insert_if_absent() {
        let mut map = DependencyMap::new();
        assert!(map.insert_if_absent(record("express", "^4.18.0")));
        assert!(!map.insert_if_absent(record("express", "5.0.0")));
        assert_eq!(map.get("express"), Some("^4.18.0"));
    }

    #[test]
    fn test_map_retain_rebuilds_index() {
        let mut map: DependencyMap = vec![record("a", "1"), record("b", "2"), record("c", "3")]
            .into_iter()
            .collect();
        map.retain(|r| r.name() != "a");

        assert!(!map.contains("a"));
        assert_eq!(map.get("c"), Some("3"));
        map.insert(record("c", "4"));
        assert_eq!(map.len(), 2);
        assert_eq!(map.get("c"), Some("4"));
    }
}
