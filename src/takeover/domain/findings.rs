use std::collections::HashMap;

/// A dependency name confirmed absent from its registry and free to be published
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TakeoverCandidate {
    pub name: String,
    /// The version constraint the name was declared with when it was found missing
    pub version: String,
}

impl TakeoverCandidate {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }

    /// `name:version`, the line format of the results file
    pub fn as_line(&self) -> String {
        format!("{}:{}", self.name, self.version)
    }
}

/// Takeover candidates keyed by name, iterated in the order they were found
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TakeoverMap {
    entries: Vec<TakeoverCandidate>,
    index: HashMap<String, usize>,
}

impl TakeoverMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a candidate; a second insert for the same name is ignored
    pub fn insert(&mut self, name: &str, version: &str) {
        if self.index.contains_key(name) {
            return;
        }
        self.index.insert(name.to_string(), self.entries.len());
        self.entries.push(TakeoverCandidate::new(name, version));
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.index
            .get(name)
            .map(|&position| self.entries[position].version.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TakeoverCandidate> {
        self.entries.iter()
    }
}

/// A maintainer contact whose mail domain looks unregistered
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DanglingDomain {
    pub domain: String,
    pub email: String,
}

impl DanglingDomain {
    pub fn new(domain: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            email: email.into(),
        }
    }
}

/// Dangling domains found for one package
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailTakeover {
    pub package: String,
    pub domains: Vec<DanglingDomain>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_takeover_map_keeps_first_version() {
        let mut map = TakeoverMap::new();
        map.insert("left-pad-fake", "^1.0.0");
        map.insert("left-pad-fake", "2.0.0");

        assert_eq!(map.len(), 1);
        assert_eq!(map.get("left-pad-fake"), Some("^1.0.0"));
    }

    #[test]
    fn test_takeover_map_iteration_order() {
        let mut map = TakeoverMap::new();
        map.insert("b-pkg", "1");
        map.insert("a-pkg", "2");

        let names: Vec<&str> = map.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["b-pkg", "a-pkg"]);
    }

    #[test]
    fn test_candidate_line() {
        let candidate = TakeoverCandidate::new("fake-package", "1.0.0");
        assert_eq!(candidate.as_line(), "fake-package:1.0.0");

        let unversioned = TakeoverCandidate::new("serde-fake", "");
        assert_eq!(unversioned.as_line(), "serde-fake:");
    }
}
