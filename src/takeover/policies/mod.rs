pub mod known_domains;
pub mod namespace_policy;

pub use known_domains::KnownDomains;
pub use namespace_policy::NamespacePolicy;
