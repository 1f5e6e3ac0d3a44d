pub mod contact_email;
pub mod dependency;
pub mod ecosystem;
pub mod findings;
pub mod lookup;

pub use contact_email::ContactEmail;
pub use dependency::{sanitize_version, DependencyMap, DependencyRecord};
pub use ecosystem::{Ecosystem, EcosystemSelector};
pub use findings::{DanglingDomain, EmailTakeover, TakeoverCandidate, TakeoverMap};
pub use lookup::{Existence, SubdependencyLookup};
