/// Mock implementations for testing
mod mock_contact_metadata;
mod mock_domain_probe;
mod mock_manifest_reader;
mod mock_progress_reporter;
mod mock_registry_gateway;

#[allow(unused_imports)]
pub use mock_contact_metadata::MockContactMetadata;
#[allow(unused_imports)]
pub use mock_domain_probe::MockDomainProbe;
#[allow(unused_imports)]
pub use mock_manifest_reader::MockManifestReader;
pub use mock_progress_reporter::MockProgressReporter;
pub use mock_registry_gateway::MockRegistryGateway;
