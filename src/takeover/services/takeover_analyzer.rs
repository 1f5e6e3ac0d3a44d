use crate::ports::outbound::{ProgressReporter, RegistryGateway};
use crate::takeover::domain::{
    DependencyMap, DependencyRecord, Ecosystem, Existence, SubdependencyLookup, TakeoverMap,
};
use crate::takeover::policies::NamespacePolicy;
use std::collections::HashSet;

/// Default upper bound on names queried in one run (DoS protection against hostile graphs)
pub const DEFAULT_PACKAGE_LIMIT: usize = 50_000;

/// Everything one analysis run learned about a dependency tree
#[derive(Debug, Clone, Default)]
pub struct AnalysisOutcome {
    /// Unscoped names confirmed missing, with the version they were declared at
    pub takeover: TakeoverMap,
    /// Missing names owned by a scope/organization; need manual review
    pub namespaced: Vec<String>,
    /// Names the registry could not answer for
    pub indeterminate: Vec<String>,
    /// Names confirmed to exist
    pub existing: Vec<String>,
    /// Existing names whose own dependencies could not be fetched
    pub incomplete: Vec<String>,
    /// Names left unchecked because the run hit its package limit
    pub truncated: Vec<String>,
    /// Every name queried, in the order it was queried
    pub processed: Vec<String>,
    /// The seed map plus every transitive name discovered along the way
    pub dependencies: DependencyMap,
}

/// TakeoverAnalyzer walks a dependency tree against a registry looking for names
/// that are declared but not published.
///
/// Existing packages have their own dependencies pulled in and checked the same
/// way, so an abandoned transitive dependency is found even when every direct one
/// exists. The walk uses an explicit depth-first stack gated by the processed set:
/// each distinct name is queried at most once per run, which terminates cycles and
/// collapses diamonds, and stack depth stays flat however deep the registry graph is.
pub struct TakeoverAnalyzer<'a, G, PR> {
    ecosystem: Ecosystem,
    gateway: &'a G,
    reporter: &'a PR,
    verbose: bool,
    package_limit: usize,
    dependencies: DependencyMap,
    processed: HashSet<String>,
    truncated: HashSet<String>,
    outcome: AnalysisOutcome,
}

impl<'a, G, PR> TakeoverAnalyzer<'a, G, PR>
where
    G: RegistryGateway,
    PR: ProgressReporter,
{
    /// Creates an analyzer for one ecosystem's seed map
    pub fn new(
        ecosystem: Ecosystem,
        dependencies: DependencyMap,
        gateway: &'a G,
        reporter: &'a PR,
    ) -> Self {
        Self {
            ecosystem,
            gateway,
            reporter,
            verbose: false,
            package_limit: DEFAULT_PACKAGE_LIMIT,
            dependencies,
            processed: HashSet::new(),
            truncated: HashSet::new(),
            outcome: AnalysisOutcome::default(),
        }
    }

    /// Reports each takeover and scoped finding the moment it is found
    pub fn with_verbose_notices(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Caps the number of names queried; the rest end up in `truncated`
    pub fn with_package_limit(mut self, limit: usize) -> Self {
        self.package_limit = limit;
        self
    }

    /// Checks every seed dependency, in seed order
    ///
    /// Iterates a snapshot of the seed names taken at call time; transitive names
    /// discovered meanwhile are handled by the walk under each seed, not by this loop.
    pub async fn analyze_all(&mut self) {
        let seeds: Vec<DependencyRecord> = self.dependencies.iter().cloned().collect();
        let total = seeds.len();

        for (position, seed) in seeds.iter().enumerate() {
            self.reporter
                .report_progress(position + 1, total, Some(seed.name()));
            self.check_dependency(seed.name(), seed.version()).await;
        }
    }

    /// Checks one dependency and, if it exists, everything it pulls in
    pub async fn check_dependency(&mut self, name: &str, version: &str) {
        let root = match DependencyRecord::new(name, version) {
            Ok(record) => record,
            Err(e) => {
                tracing::warn!("Skipping dependency '{}': {}", name, e);
                return;
            }
        };

        let mut stack = vec![root];
        while let Some(record) = stack.pop() {
            if self.processed.contains(record.name()) {
                continue;
            }
            if self.processed.len() >= self.package_limit {
                let pending: Vec<DependencyRecord> = stack.drain(..).rev().collect();
                self.truncate(std::iter::once(record).chain(pending));
                return;
            }

            self.processed.insert(record.name().to_string());
            self.outcome.processed.push(record.name().to_string());

            let children = self.visit(&record).await;
            // Reverse so children pop in declaration order, each fully explored
            // before its next sibling
            for child in children.into_iter().rev() {
                if self.processed.contains(child.name()) {
                    continue;
                }
                self.dependencies.insert_if_absent(child.clone());
                stack.push(child);
            }
        }
    }

    /// Classifies one package and returns the children still to explore
    async fn visit(&mut self, record: &DependencyRecord) -> Vec<DependencyRecord> {
        let name = record.name();
        match self.gateway.exists(self.ecosystem, name).await {
            Existence::Missing => {
                self.record_missing(record);
                Vec::new()
            }
            Existence::Indeterminate => {
                tracing::warn!(
                    "Could not determine whether {} exists in {}; leaving it unclassified",
                    name,
                    self.ecosystem
                );
                self.outcome.indeterminate.push(name.to_string());
                Vec::new()
            }
            Existence::Existing => {
                tracing::debug!("{} exists in {}", name, self.ecosystem);
                self.outcome.existing.push(name.to_string());
                match self
                    .gateway
                    .fetch_subdependencies(self.ecosystem, name, record.version())
                    .await
                {
                    SubdependencyLookup::Resolved(children) => children,
                    SubdependencyLookup::Indeterminate => {
                        tracing::warn!(
                            "Could not fetch the dependencies of {}@{}; its subtree is not covered",
                            name,
                            record.version()
                        );
                        self.outcome.incomplete.push(name.to_string());
                        Vec::new()
                    }
                }
            }
        }
    }

    /// Records names the walk will not reach, each once, in the order they were due
    fn truncate(&mut self, pending: impl IntoIterator<Item = DependencyRecord>) {
        if self.outcome.truncated.is_empty() {
            tracing::warn!(
                "Stopped after {} packages in {}; the dependency graph is truncated.",
                self.package_limit,
                self.ecosystem
            );
        }

        for record in pending {
            let name = record.name();
            if self.processed.contains(name) || !self.truncated.insert(name.to_string()) {
                continue;
            }
            self.outcome.truncated.push(name.to_string());
        }
    }

    fn record_missing(&mut self, record: &DependencyRecord) {
        let name = record.name();
        if NamespacePolicy::is_namespaced(self.ecosystem, name) {
            self.outcome.namespaced.push(name.to_string());
            if self.verbose {
                self.reporter.report(&NamespacePolicy::notice(self.ecosystem, name));
            }
            return;
        }

        self.outcome.takeover.insert(name, record.version());
        if self.verbose {
            self.reporter.report_finding(&format!(
                "[+] {}:{} is not published in {} and might be taken over !",
                name,
                record.version(),
                self.ecosystem
            ));
        }
    }

    pub fn takeover(&self) -> &TakeoverMap {
        &self.outcome.takeover
    }

    /// Names queried so far, in query order
    pub fn processed(&self) -> &[String] {
        &self.outcome.processed
    }

    pub fn dependencies(&self) -> &DependencyMap {
        &self.dependencies
    }

    /// Consumes the analyzer and returns what it found
    pub fn into_outcome(self) -> AnalysisOutcome {
        let mut outcome = self.outcome;
        outcome.dependencies = self.dependencies;
        outcome
    }
}
