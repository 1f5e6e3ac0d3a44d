/// Network adapters for registry, contact metadata and domain lookups
mod backoff;
mod caching_registry_gateway;
mod contact_metadata_client;
mod dns_whois_probe;
mod registry_client;

pub use backoff::{FixedCooldown, NoCooldown};
pub use caching_registry_gateway::{CachingRegistryGateway, LookupCache};
pub use contact_metadata_client::ContactMetadataClient;
pub use dns_whois_probe::DnsWhoisProbe;
pub use registry_client::{RegistryClient, RegistryEndpoints, DEFAULT_TIMEOUT};
