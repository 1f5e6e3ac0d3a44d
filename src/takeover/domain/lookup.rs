use crate::takeover::domain::DependencyRecord;

/// Answer to "is this name published in the registry?"
///
/// Every registry adapter translates its native response (status code, search hit
/// count, ...) into one of these variants before the analyzer sees it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Existence {
    Existing,
    Missing,
    /// The registry could not be asked (transport error, rate limit, unexpected reply).
    /// Never to be read as either of the other two.
    Indeterminate,
}

impl Existence {
    pub fn is_conclusive(&self) -> bool {
        !matches!(self, Existence::Indeterminate)
    }
}

/// Declared sub-dependencies of one published package version
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubdependencyLookup {
    Resolved(Vec<DependencyRecord>),
    Indeterminate,
}

impl SubdependencyLookup {
    pub fn empty() -> Self {
        SubdependencyLookup::Resolved(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_existence_conclusive() {
        assert!(Existence::Existing.is_conclusive());
        assert!(Existence::Missing.is_conclusive());
        assert!(!Existence::Indeterminate.is_conclusive());
    }

    #[test]
    fn test_subdependency_empty() {
        assert_eq!(SubdependencyLookup::empty(), SubdependencyLookup::Resolved(vec![]));
    }
}
