use crate::ports::outbound::{ContactMetadataRepository, DomainProbe};
use crate::takeover::domain::{ContactEmail, DanglingDomain, Ecosystem};
use crate::takeover::policies::KnownDomains;

/// DomainTakeoverChecker looks for maintainer emails whose domain could be bought
///
/// A maintainer whose mail domain has lapsed can have their account recovered by
/// whoever registers the domain. A domain is flagged when it neither resolves nor
/// shows an active registrar; a registration lookup that fails outright is treated
/// the same as "no registrar".
pub struct DomainTakeoverChecker<'a, M, P> {
    ecosystem: Ecosystem,
    metadata: &'a M,
    probe: &'a P,
    known_domains: &'a KnownDomains,
}

impl<'a, M, P> DomainTakeoverChecker<'a, M, P>
where
    M: ContactMetadataRepository,
    P: DomainProbe,
{
    pub fn new(
        ecosystem: Ecosystem,
        metadata: &'a M,
        probe: &'a P,
        known_domains: &'a KnownDomains,
    ) -> Self {
        Self {
            ecosystem,
            metadata,
            probe,
            known_domains,
        }
    }

    /// Maintainer then contributor emails for `package`, duplicates kept
    pub async fn get_emails(&self, package: &str) -> Vec<String> {
        if !self.ecosystem.has_contact_metadata() {
            return Vec::new();
        }
        self.metadata.fetch_emails(self.ecosystem, package).await
    }

    /// Returns the `(domain, email)` pairs of `package` whose domain looks unregistered
    pub async fn check_email(&self, package: &str) -> Vec<DanglingDomain> {
        let mut dangling = Vec::new();

        for raw in self.get_emails(package).await {
            let Some(email) = ContactEmail::parse(&raw) else {
                tracing::debug!("Ignoring malformed contact '{}' of {}", raw, package);
                continue;
            };

            if self.known_domains.contains(email.domain()) {
                continue;
            }

            if self.probe.resolves(email.domain()).await {
                tracing::debug!("{} resolves; not a candidate", email.domain());
                continue;
            }

            let available = match self.probe.registrar(email.domain()).await {
                Ok(Some(registrar)) => {
                    tracing::debug!(
                        "{} does not resolve but is registered with {}",
                        email.domain(),
                        registrar
                    );
                    false
                }
                Ok(None) => true,
                Err(e) => {
                    tracing::debug!("Registration lookup for {} failed: {:#}", email.domain(), e);
                    true
                }
            };

            if available {
                dangling.push(DanglingDomain::new(email.domain(), email.address()));
            }
        }

        dangling
    }
}
