//! dep-takeover - dependency takeover auditor
//!
//! This library finds dependencies that a project declares, directly or
//! transitively, but that are not published in their public registry: anyone
//! could register those names and have their code pulled into the build. It can
//! also flag maintainer email domains that have lapsed, which would let a buyer
//! of the domain recover the maintainer's registry account.
//!
//! # Architecture
//!
//! The library is organized into the following layers:
//!
//! - **Domain Layer** (`takeover`): dependency records, the takeover analysis
//!   engine and the policies it applies
//! - **Application Layer** (`application`): Use cases and DTOs
//! - **Ports** (`ports`): Interface definitions for infrastructure
//! - **Adapters** (`adapters`): Concrete implementations of ports
//! - **Shared** (`shared`): Common utilities and error types
//!
//! # Example
//!
//! ```no_run
//! use dep_takeover::prelude::*;
//! use std::path::PathBuf;
//!
//! # async fn run() -> Result<()> {
//! let gateway = CachingRegistryGateway::new(RegistryClient::new(
//!     FixedCooldown::default(),
//!     DEFAULT_TIMEOUT,
//! )?);
//!
//! let use_case = AuditDependenciesUseCase::new(
//!     FileSystemManifestReader::new(),
//!     gateway,
//!     ContactMetadataClient::new(DEFAULT_TIMEOUT)?,
//!     DnsWhoisProbe::new(DEFAULT_TIMEOUT),
//!     StderrProgressReporter::new(),
//! );
//!
//! let request = AuditRequest::new(
//!     Ecosystem::Npm,
//!     DependencySource::Project(PathBuf::from(".")),
//! );
//! let response = use_case.execute(request).await?;
//!
//! let output = TakeoverReportFormatter::new().results_file(response.outcome.takeover.iter());
//! print!("{}", output);
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod config;
pub mod ports;
pub mod shared;
pub mod takeover;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::console::StderrProgressReporter;
    pub use crate::adapters::outbound::filesystem::{
        FileSystemManifestReader, FileSystemWriter, StdoutPresenter,
    };
    pub use crate::adapters::outbound::formatters::TakeoverReportFormatter;
    pub use crate::adapters::outbound::network::{
        CachingRegistryGateway, ContactMetadataClient, DnsWhoisProbe, FixedCooldown, LookupCache,
        RegistryClient, DEFAULT_TIMEOUT,
    };
    pub use crate::application::dto::{AuditRequest, AuditResponse, DependencySource};
    pub use crate::application::use_cases::AuditDependenciesUseCase;
    pub use crate::ports::outbound::{
        BackoffPolicy, ContactMetadataRepository, DomainProbe, ManifestReader, OutputPresenter,
        ProgressReporter, RegistryGateway,
    };
    pub use crate::shared::Result;
    pub use crate::takeover::domain::{
        DanglingDomain, DependencyMap, DependencyRecord, Ecosystem, EcosystemSelector,
        EmailTakeover, Existence, SubdependencyLookup, TakeoverCandidate, TakeoverMap,
    };
    pub use crate::takeover::policies::{KnownDomains, NamespacePolicy};
    pub use crate::takeover::services::{
        AnalysisOutcome, DomainTakeoverChecker, PackageFilter, TakeoverAnalyzer,
    };
}
