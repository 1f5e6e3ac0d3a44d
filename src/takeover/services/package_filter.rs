use crate::shared::Result;
use crate::takeover::domain::DependencyMap;
use std::cell::Cell;

/// Maximum number of exclude patterns to prevent DoS attacks
const MAX_EXCLUDE_PATTERNS: usize = 64;

/// Maximum length of a single exclude pattern to prevent DoS attacks
const MAX_PATTERN_LENGTH: usize = 255;

/// PackageFilter - drops seed dependencies the user asked not to audit
///
/// Patterns are matched against the full package name, so `@acme/*` and
/// `org.example:*` work for scoped and coordinate-style names. `*` matches
/// zero or more characters; matching is case-sensitive.
#[derive(Debug)]
pub struct PackageFilter {
    patterns: Vec<ExcludePattern>,
}

impl PackageFilter {
    /// Compiles the given patterns
    ///
    /// # Errors
    /// - More than 64 patterns
    /// - A pattern that is empty, too long, only wildcards, or holds a character
    ///   no package name can contain
    pub fn new(patterns: Vec<String>) -> Result<Self> {
        if patterns.len() > MAX_EXCLUDE_PATTERNS {
            anyhow::bail!(
                "Too many exclusion patterns: {} (maximum: {})",
                patterns.len(),
                MAX_EXCLUDE_PATTERNS
            );
        }

        let patterns = patterns
            .into_iter()
            .map(ExcludePattern::new)
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { patterns })
    }

    /// Removes excluded names from a seed map and returns how many were dropped
    pub fn apply(&self, dependencies: &mut DependencyMap) -> usize {
        let before = dependencies.len();
        dependencies.retain(|record| !self.matches(record.name()));
        before - dependencies.len()
    }

    fn matches(&self, name: &str) -> bool {
        // no short-circuit: every pattern records whether it ever matched
        self.patterns
            .iter()
            .fold(false, |hit, pattern| pattern.matches(name) || hit)
    }

    /// Patterns that have not matched any name so far
    pub fn unmatched_patterns(&self) -> Vec<String> {
        self.patterns
            .iter()
            .filter(|p| !p.matched.get())
            .map(|p| p.original.clone())
            .collect()
    }
}

#[derive(Debug)]
struct ExcludePattern {
    original: String,
    /// Literal pieces between the `*`s
    pieces: Vec<String>,
    anchored_start: bool,
    anchored_end: bool,
    matched: Cell<bool>,
}

impl ExcludePattern {
    fn new(pattern: String) -> Result<Self> {
        validate_pattern(&pattern)?;

        let pieces = pattern
            .split('*')
            .filter(|piece| !piece.is_empty())
            .map(str::to_string)
            .collect();

        Ok(Self {
            anchored_start: !pattern.starts_with('*'),
            anchored_end: !pattern.ends_with('*'),
            pieces,
            original: pattern,
            matched: Cell::new(false),
        })
    }

    fn matches(&self, name: &str) -> bool {
        let is_match = self.glob(name);
        if is_match {
            self.matched.set(true);
        }
        is_match
    }

    fn glob(&self, name: &str) -> bool {
        if !self.original.contains('*') {
            return name == self.original;
        }

        let mut rest = name;
        let last = self.pieces.len().saturating_sub(1);
        for (position, piece) in self.pieces.iter().enumerate() {
            if position == 0 && self.anchored_start {
                match rest.strip_prefix(piece.as_str()) {
                    Some(tail) => rest = tail,
                    None => return false,
                }
            } else if position == last && self.anchored_end {
                return rest.ends_with(piece.as_str());
            } else {
                match rest.find(piece.as_str()) {
                    Some(at) => rest = &rest[at + piece.len()..],
                    None => return false,
                }
            }
        }
        // a trailing anchored piece returns above; everything else is satisfied here
        true
    }
}

fn validate_pattern(pattern: &str) -> Result<()> {
    if pattern.is_empty() {
        anyhow::bail!("Exclusion pattern cannot be empty");
    }

    if pattern.len() > MAX_PATTERN_LENGTH {
        anyhow::bail!(
            "Exclusion pattern is too long: '{}' ({} chars). Maximum: {} chars",
            pattern,
            pattern.len(),
            MAX_PATTERN_LENGTH
        );
    }

    if let Some(ch) = pattern.chars().find(|c| !is_valid_pattern_char(*c)) {
        anyhow::bail!(
            "Exclusion pattern contains invalid character '{}' in pattern '{}'. \
             Only alphanumerics and - _ . @ / : * are allowed.",
            ch,
            pattern
        );
    }

    if pattern.chars().all(|c| c == '*') {
        anyhow::bail!(
            "Exclusion pattern cannot contain only wildcards: '{}'",
            pattern
        );
    }

    Ok(())
}

fn is_valid_pattern_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '-' | '_' | '.' | '@' | '/' | ':' | '*')
}
