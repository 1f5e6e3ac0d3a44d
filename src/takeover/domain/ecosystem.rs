use crate::shared::error::TakeoverError;
use std::fmt;
use std::str::FromStr;

/// Package ecosystems the auditor knows how to read and query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Ecosystem {
    Npm,
    Pypi,
    Cargo,
    Go,
    Maven,
    Gradle,
    Rubygems,
}

impl Ecosystem {
    /// Every supported ecosystem, in the order `all` scans them
    pub const ALL: [Ecosystem; 7] = [
        Ecosystem::Npm,
        Ecosystem::Pypi,
        Ecosystem::Cargo,
        Ecosystem::Go,
        Ecosystem::Maven,
        Ecosystem::Gradle,
        Ecosystem::Rubygems,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Ecosystem::Npm => "npm",
            Ecosystem::Pypi => "pypi",
            Ecosystem::Cargo => "cargo",
            Ecosystem::Go => "go",
            Ecosystem::Maven => "maven",
            Ecosystem::Gradle => "gradle",
            Ecosystem::Rubygems => "rubygems",
        }
    }

    /// Returns true if `file_name` is a manifest this ecosystem reads
    pub fn is_manifest(&self, file_name: &str) -> bool {
        match self {
            Ecosystem::Npm => file_name == "package.json",
            Ecosystem::Pypi => {
                file_name == "pyproject.toml"
                    || (file_name.starts_with("requirements") && file_name.ends_with(".txt"))
            }
            Ecosystem::Cargo => file_name == "Cargo.toml",
            Ecosystem::Go => file_name == "go.mod",
            Ecosystem::Maven => file_name == "pom.xml",
            Ecosystem::Gradle => file_name == "build.gradle" || file_name == "build.gradle.kts",
            Ecosystem::Rubygems => file_name == "Gemfile",
        }
    }

    /// Only npm and PyPI publish structured maintainer contact data
    pub fn has_contact_metadata(&self) -> bool {
        matches!(self, Ecosystem::Npm | Ecosystem::Pypi)
    }

    /// Number of `:` separators that belong to the package name itself
    ///
    /// Maven coordinates are `group:artifact`, so a `name:version` spec for them
    /// carries its version after the second colon.
    pub fn name_colon_count(&self) -> usize {
        match self {
            Ecosystem::Maven | Ecosystem::Gradle => 1,
            _ => 0,
        }
    }
}

impl fmt::Display for Ecosystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Ecosystem {
    type Err = TakeoverError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim().to_lowercase();
        Ecosystem::ALL
            .into_iter()
            .find(|e| e.as_str() == value)
            .ok_or(TakeoverError::UnknownEcosystem {
                value: s.to_string(),
            })
    }
}

/// A single ecosystem or the `all` wildcard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EcosystemSelector {
    Single(Ecosystem),
    All,
}

impl EcosystemSelector {
    pub fn ecosystems(&self) -> Vec<Ecosystem> {
        match self {
            EcosystemSelector::Single(ecosystem) => vec![*ecosystem],
            EcosystemSelector::All => Ecosystem::ALL.to_vec(),
        }
    }
}

impl FromStr for EcosystemSelector {
    type Err = TakeoverError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(EcosystemSelector::All);
        }
        s.parse().map(EcosystemSelector::Single)
    }
}
