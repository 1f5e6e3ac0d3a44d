use crate::adapters::outbound::formatters::TakeoverReportFormatter;
use crate::application::dto::{AuditRequest, AuditResponse, DependencySource};
use crate::ports::outbound::{
    ContactMetadataRepository, DomainProbe, ManifestReader, ProgressReporter, RegistryGateway,
};
use crate::shared::Result;
use crate::takeover::domain::{DependencyMap, Ecosystem, EmailTakeover};
use crate::takeover::policies::KnownDomains;
use crate::takeover::services::{
    DomainTakeoverChecker, PackageFilter, TakeoverAnalyzer, DEFAULT_PACKAGE_LIMIT,
};

/// AuditDependenciesUseCase - audits the dependencies of one ecosystem
///
/// Orchestrates the run using generic dependency injection for all
/// infrastructure dependencies:
/// 1. collect the seed dependencies (manifest scan or a single spec)
/// 2. drop excluded seeds
/// 3. walk the dependency tree for unpublished names
/// 4. optionally look for dangling maintainer email domains
///
/// # Type Parameters
/// * `MR` - ManifestReader implementation
/// * `G` - RegistryGateway implementation
/// * `CM` - ContactMetadataRepository implementation
/// * `DP` - DomainProbe implementation
/// * `PR` - ProgressReporter implementation
pub struct AuditDependenciesUseCase<MR, G, CM, DP, PR> {
    manifest_reader: MR,
    registry_gateway: G,
    contact_metadata: CM,
    domain_probe: DP,
    progress_reporter: PR,
    known_domains: KnownDomains,
    package_limit: usize,
    formatter: TakeoverReportFormatter,
}

impl<MR, G, CM, DP, PR> AuditDependenciesUseCase<MR, G, CM, DP, PR>
where
    MR: ManifestReader,
    G: RegistryGateway,
    CM: ContactMetadataRepository,
    DP: DomainProbe,
    PR: ProgressReporter,
{
    /// Creates a new AuditDependenciesUseCase with injected dependencies
    pub fn new(
        manifest_reader: MR,
        registry_gateway: G,
        contact_metadata: CM,
        domain_probe: DP,
        progress_reporter: PR,
    ) -> Self {
        Self {
            manifest_reader,
            registry_gateway,
            contact_metadata,
            domain_probe,
            progress_reporter,
            known_domains: KnownDomains::builtin(),
            package_limit: DEFAULT_PACKAGE_LIMIT,
            formatter: TakeoverReportFormatter::new(),
        }
    }

    /// Replaces the set of mail domains never flagged as dangling
    pub fn with_known_domains(mut self, known_domains: KnownDomains) -> Self {
        self.known_domains = known_domains;
        self
    }

    /// Caps the number of names queried per ecosystem run
    pub fn with_package_limit(mut self, package_limit: usize) -> Self {
        self.package_limit = package_limit;
        self
    }

    /// Executes the audit for the request's ecosystem
    ///
    /// An empty seed set is not an error: it is reported and an empty response
    /// is returned so that multi-ecosystem runs carry on.
    pub async fn execute(&self, request: AuditRequest) -> Result<AuditResponse> {
        let ecosystem = request.ecosystem;

        // Step 1: Collect seed dependencies
        let mut seeds = match &request.source {
            DependencySource::Project(path) => {
                tracing::debug!("Scanning {} for {} manifests", path.display(), ecosystem);
                self.manifest_reader.read_dependencies(path, ecosystem)?
            }
            DependencySource::Single(record) => {
                let mut seeds = DependencyMap::new();
                seeds.insert(record.clone());
                seeds
            }
        };

        if seeds.is_empty() {
            self.progress_reporter
                .report(&format!("[-] No package for {} found.", ecosystem));
            return Ok(AuditResponse::empty(ecosystem));
        }

        // Step 2: Apply exclusion filters
        let excluded_count = self.exclude(&mut seeds, request.exclude_patterns)?;
        if seeds.is_empty() {
            self.progress_reporter.report(&format!(
                "[-] All {} package(s) for {} were excluded by the provided filters.",
                excluded_count, ecosystem
            ));
            let mut response = AuditResponse::empty(ecosystem);
            response.excluded_count = excluded_count;
            return Ok(response);
        }

        let seed_count = seeds.len();
        let seed_names: Vec<String> = seeds.names().map(str::to_string).collect();
        self.progress_reporter.report(&format!(
            "[*] Checking {} {} package(s)...",
            seed_count, ecosystem
        ));

        // Step 3: Walk the dependency tree
        let mut analyzer = TakeoverAnalyzer::new(
            ecosystem,
            seeds,
            &self.registry_gateway,
            &self.progress_reporter,
        )
        .with_verbose_notices(request.print_takeover)
        .with_package_limit(self.package_limit);
        analyzer.analyze_all().await;
        let outcome = analyzer.into_outcome();

        self.progress_reporter.report_completion(&format!(
            "[*] {} {} package(s) checked, {} discovered transitively",
            outcome.processed.len(),
            ecosystem,
            outcome.processed.len().saturating_sub(seed_count)
        ));

        for line in self.formatter.takeover_summary(outcome.takeover.iter()) {
            if outcome.takeover.is_empty() {
                self.progress_reporter.report(&line);
            } else {
                self.progress_reporter.report_finding(&line);
            }
        }

        if !outcome.indeterminate.is_empty() {
            self.progress_reporter.report_error(&format!(
                "[-] {} package(s) could not be checked and may hide takeover candidates: {}",
                outcome.indeterminate.len(),
                outcome.indeterminate.join(", ")
            ));
        }
        if !outcome.incomplete.is_empty() {
            self.progress_reporter.report_error(&format!(
                "[-] Dependencies of {} package(s) could not be fetched: {}",
                outcome.incomplete.len(),
                outcome.incomplete.join(", ")
            ));
        }
        if !outcome.truncated.is_empty() {
            self.progress_reporter.report_error(&format!(
                "[-] Stopped after {} package(s); {} package(s) were not checked: {}",
                self.package_limit,
                outcome.truncated.len(),
                outcome.truncated.join(", ")
            ));
        }

        // Step 4: Check maintainer email domains of the seed dependencies
        let email_takeovers = if request.check_email {
            self.check_emails(ecosystem, &seed_names).await
        } else {
            Vec::new()
        };

        Ok(AuditResponse {
            ecosystem,
            seed_count,
            excluded_count,
            outcome,
            email_takeovers,
        })
    }

    fn exclude(&self, seeds: &mut DependencyMap, patterns: Vec<String>) -> Result<usize> {
        if patterns.is_empty() {
            return Ok(0);
        }

        let filter = PackageFilter::new(patterns)?;
        let excluded_count = filter.apply(seeds);
        if excluded_count > 0 {
            self.progress_reporter.report(&format!(
                "[*] Excluded {} package(s) based on filters",
                excluded_count
            ));
        }

        for pattern in filter.unmatched_patterns() {
            self.progress_reporter.report_error(&format!(
                "Warning: Exclude pattern '{}' did not match any dependencies.",
                pattern
            ));
        }

        Ok(excluded_count)
    }

    async fn check_emails(&self, ecosystem: Ecosystem, packages: &[String]) -> Vec<EmailTakeover> {
        if !ecosystem.has_contact_metadata() {
            self.progress_reporter.report(&format!(
                "[-] Maintainer emails are not published by the {} registry, skipping the email check.",
                ecosystem
            ));
            return Vec::new();
        }

        let checker = DomainTakeoverChecker::new(
            ecosystem,
            &self.contact_metadata,
            &self.domain_probe,
            &self.known_domains,
        );

        let mut findings = Vec::new();
        for (position, package) in packages.iter().enumerate() {
            self.progress_reporter
                .report_progress(position + 1, packages.len(), Some(package.as_str()));

            let domains = checker.check_email(package).await;
            if domains.is_empty() {
                continue;
            }

            for domain in &domains {
                self.progress_reporter
                    .report_finding(&self.formatter.dangling_domain(package, domain));
            }
            findings.push(EmailTakeover {
                package: package.clone(),
                domains,
            });
        }

        self.progress_reporter.report_completion(&format!(
            "[*] Email domains checked for {} package(s)",
            packages.len()
        ));

        findings
    }
}
