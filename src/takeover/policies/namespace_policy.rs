use crate::takeover::domain::Ecosystem;

/// NamespacePolicy decides whether a missing name is owned by a scope or organization
///
/// A missing scoped name is never a free takeover: the scope itself may still be
/// registered even though this particular package under it is not. Such names are
/// reported for manual review instead of being added to the takeover map.
pub struct NamespacePolicy;

impl NamespacePolicy {
    /// Returns true if `name` carries an ownership-scope prefix in `ecosystem`
    pub fn is_namespaced(ecosystem: Ecosystem, name: &str) -> bool {
        if name.contains('@') {
            return true;
        }

        match ecosystem {
            // @scope/pkg is caught above
            Ecosystem::Npm => false,
            // group:artifact, where the group is verified by domain ownership
            Ecosystem::Maven | Ecosystem::Gradle => name.contains(':'),
            // host/owner/repo module paths belong to whoever holds the owner account
            Ecosystem::Go => name.contains('/'),
            Ecosystem::Pypi | Ecosystem::Cargo | Ecosystem::Rubygems => false,
        }
    }

    /// Notice shown for a missing name that cannot be claimed outright
    pub fn notice(ecosystem: Ecosystem, name: &str) -> String {
        let mut notice = format!(
            "[DEBUG] {} is not declared but cannot be taken over because it belongs to an external organization\n\
             You might have to check manually if the organization exists.",
            name
        );
        if let Some(owner) = Self::owner_scope(ecosystem) {
            notice.push_str(&format!(
                "\nEvery {} name with {} is treated as owned, so {} results are for manual review only.",
                ecosystem, owner, ecosystem
            ));
        }
        notice
    }

    /// Ecosystems where nearly every real name is owner-scoped
    fn owner_scope(ecosystem: Ecosystem) -> Option<&'static str> {
        match ecosystem {
            Ecosystem::Maven | Ecosystem::Gradle => Some("a group"),
            Ecosystem::Go => Some("an owner path"),
            Ecosystem::Npm | Ecosystem::Pypi | Ecosystem::Cargo | Ecosystem::Rubygems => None,
        }
    }
}
