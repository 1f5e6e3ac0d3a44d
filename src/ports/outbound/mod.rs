/// Outbound ports (Driven ports) - Infrastructure interfaces
///
/// These ports define the interfaces that the analysis core uses to reach
/// registries, DNS/WHOIS, the file system and the console.
pub mod backoff_policy;
pub mod contact_metadata_repository;
pub mod domain_probe;
pub mod manifest_reader;
pub mod output_presenter;
pub mod progress_reporter;
pub mod registry_gateway;

pub use backoff_policy::BackoffPolicy;
pub use contact_metadata_repository::ContactMetadataRepository;
pub use domain_probe::DomainProbe;
pub use manifest_reader::ManifestReader;
pub use output_presenter::OutputPresenter;
pub use progress_reporter::ProgressReporter;
pub use registry_gateway::RegistryGateway;
