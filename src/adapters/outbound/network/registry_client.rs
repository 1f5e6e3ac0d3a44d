use crate::ports::outbound::{BackoffPolicy, RegistryGateway};
use crate::shared::Result;
use crate::takeover::domain::{
    sanitize_version, DependencyRecord, Ecosystem, Existence, SubdependencyLookup,
};
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

#[derive(Debug, Deserialize)]
struct DepsDevDependencies {
    #[serde(default)]
    dependencies: Vec<DepsDevDependency>,
}

#[derive(Debug, Deserialize)]
struct DepsDevDependency {
    package: DepsDevPackage,
    #[serde(default)]
    version: String,
}

#[derive(Debug, Deserialize)]
struct DepsDevPackage {
    name: String,
}

#[derive(Debug, Deserialize)]
struct MavenSearch {
    response: MavenSearchResponse,
}

#[derive(Debug, Deserialize)]
struct MavenSearchResponse {
    #[serde(rename = "numFound")]
    num_found: u64,
}

#[derive(Debug, Deserialize)]
struct RubyGemsVersion {
    #[serde(default)]
    dependencies: RubyGemsDependencies,
}

#[derive(Debug, Default, Deserialize)]
struct RubyGemsDependencies {
    #[serde(default)]
    runtime: Vec<RubyGemsDependency>,
}

#[derive(Debug, Deserialize)]
struct RubyGemsDependency {
    name: String,
    #[serde(default)]
    requirements: String,
}

/// Default per-request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Base URLs of the registries the client talks to
#[derive(Debug, Clone)]
pub struct RegistryEndpoints {
    pub deps_dev: String,
    pub maven_search: String,
    pub rubygems: String,
}

impl Default for RegistryEndpoints {
    fn default() -> Self {
        Self {
            deps_dev: "https://deps.dev".to_string(),
            maven_search: "https://search.maven.org".to_string(),
            rubygems: "https://rubygems.org".to_string(),
        }
    }
}

impl RegistryEndpoints {
    /// Points every registry at the same server
    pub fn single(base_url: &str) -> Self {
        let base = base_url.trim_end_matches('/').to_string();
        Self {
            deps_dev: base.clone(),
            maven_search: base.clone(),
            rubygems: base,
        }
    }
}

/// Outcome of one GET before the body is interpreted
enum Reply {
    Body(reqwest::Response),
    NotFound,
    Unanswered,
}

/// RegistryClient adapter answering existence and sub-dependency questions over HTTP
///
/// deps.dev covers npm, PyPI, crates.io, Go and Maven; Gradle existence goes to the
/// Maven Central search API and RubyGems to rubygems.org. A rate limit or transport
/// failure triggers one pause from the [`BackoffPolicy`] and the call then comes
/// back `Indeterminate`; it is not retried.
pub struct RegistryClient<B> {
    client: reqwest::Client,
    endpoints: RegistryEndpoints,
    backoff: B,
    consecutive_failures: AtomicU32,
}

impl<B: BackoffPolicy> RegistryClient<B> {
    /// Creates a client against the public registries
    pub fn new(backoff: B, timeout: Duration) -> Result<Self> {
        let version = env!("CARGO_PKG_VERSION");
        let user_agent = format!("dep-takeover/{}", version);
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            endpoints: RegistryEndpoints::default(),
            backoff,
            consecutive_failures: AtomicU32::new(0),
        })
    }

    pub fn with_endpoints(mut self, endpoints: RegistryEndpoints) -> Self {
        self.endpoints = endpoints;
        self
    }

    async fn get(&self, url: &str) -> Reply {
        tracing::debug!("GET {}", url);

        let response = match self.client.get(url).send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::debug!("Request to {} failed: {}", url, e);
                self.back_off().await;
                return Reply::Unanswered;
            }
        };

        match response.status() {
            status if status.is_success() => {
                self.consecutive_failures.store(0, Ordering::SeqCst);
                Reply::Body(response)
            }
            StatusCode::NOT_FOUND => {
                self.consecutive_failures.store(0, Ordering::SeqCst);
                Reply::NotFound
            }
            StatusCode::TOO_MANY_REQUESTS => {
                self.back_off().await;
                Reply::Unanswered
            }
            status => {
                tracing::warn!("{} answered with unexpected status {}", url, status);
                Reply::Unanswered
            }
        }
    }

    async fn back_off(&self) {
        let failures = self
            .consecutive_failures
            .fetch_add(1, Ordering::SeqCst)
            .saturating_add(1);
        let pause = self.backoff.cooldown(failures);
        if pause.is_zero() {
            tracing::warn!("[-] Registry request failed; the package is left unclassified.");
            return;
        }

        tracing::warn!(
            "[-] We have been rate limited, going to sleep for {}.",
            describe_pause(pause)
        );
        tokio::time::sleep(pause).await;
    }

    async fn existence_by_status(&self, url: &str) -> Existence {
        match self.get(url).await {
            Reply::Body(_) => Existence::Existing,
            Reply::NotFound => Existence::Missing,
            Reply::Unanswered => Existence::Indeterminate,
        }
    }

    async fn maven_central_exists(&self, name: &str) -> Existence {
        let Some((group, artifact)) = name.split_once(':') else {
            tracing::warn!("'{}' is not a group:artifact coordinate", name);
            return Existence::Indeterminate;
        };

        let url = format!(
            "{}/solrsearch/select?q=g:{}+AND+a:{}&core=gav&rows=20&wt=json",
            self.endpoints.maven_search,
            urlencoding::encode(group),
            urlencoding::encode(artifact)
        );

        match self.get(&url).await {
            Reply::Body(response) => match response.json::<MavenSearch>().await {
                Ok(search) if search.response.num_found > 0 => Existence::Existing,
                Ok(_) => Existence::Missing,
                Err(e) => {
                    tracing::warn!("Unreadable Maven Central reply for {}: {}", name, e);
                    Existence::Indeterminate
                }
            },
            Reply::NotFound => Existence::Missing,
            Reply::Unanswered => Existence::Indeterminate,
        }
    }

    async fn deps_dev_children(
        &self,
        ecosystem: Ecosystem,
        name: &str,
        version: &str,
    ) -> SubdependencyLookup {
        let url = format!(
            "{}/_/s/{}/p/{}/v/{}/dependencies",
            self.endpoints.deps_dev,
            deps_dev_system(ecosystem),
            encode_path(name),
            urlencoding::encode(version)
        );

        match self.get(&url).await {
            Reply::Body(response) => match response.json::<DepsDevDependencies>().await {
                Ok(body) => SubdependencyLookup::Resolved(
                    body.dependencies
                        .into_iter()
                        .filter_map(|d| DependencyRecord::new(d.package.name, d.version).ok())
                        .collect(),
                ),
                Err(e) => {
                    tracing::warn!("Unreadable dependency list for {}@{}: {}", name, version, e);
                    SubdependencyLookup::Indeterminate
                }
            },
            Reply::NotFound => SubdependencyLookup::empty(),
            Reply::Unanswered => SubdependencyLookup::Indeterminate,
        }
    }

    async fn rubygems_children(&self, name: &str, version: &str) -> SubdependencyLookup {
        let url = format!(
            "{}/api/v2/rubygems/{}/versions/{}.json",
            self.endpoints.rubygems,
            urlencoding::encode(name),
            urlencoding::encode(version)
        );

        match self.get(&url).await {
            Reply::Body(response) => match response.json::<RubyGemsVersion>().await {
                Ok(body) => SubdependencyLookup::Resolved(
                    body.dependencies
                        .runtime
                        .into_iter()
                        .filter_map(|d| DependencyRecord::new(d.name, d.requirements).ok())
                        .collect(),
                ),
                Err(e) => {
                    tracing::warn!("Unreadable gem metadata for {}@{}: {}", name, version, e);
                    SubdependencyLookup::Indeterminate
                }
            },
            Reply::NotFound => SubdependencyLookup::empty(),
            Reply::Unanswered => SubdependencyLookup::Indeterminate,
        }
    }
}

#[async_trait]
impl<B: BackoffPolicy> RegistryGateway for RegistryClient<B> {
    async fn exists(&self, ecosystem: Ecosystem, name: &str) -> Existence {
        match ecosystem {
            Ecosystem::Gradle => self.maven_central_exists(name).await,
            Ecosystem::Rubygems => {
                let url = format!(
                    "{}/api/v1/gems/{}.json",
                    self.endpoints.rubygems,
                    urlencoding::encode(name)
                );
                self.existence_by_status(&url).await
            }
            _ => {
                let url = format!(
                    "{}/_/s/{}/p/{}/v/",
                    self.endpoints.deps_dev,
                    deps_dev_system(ecosystem),
                    encode_path(name)
                );
                self.existence_by_status(&url).await
            }
        }
    }

    async fn fetch_subdependencies(
        &self,
        ecosystem: Ecosystem,
        name: &str,
        version: &str,
    ) -> SubdependencyLookup {
        let version = sanitize_version(version);
        if version.is_empty() {
            tracing::debug!("No usable version for {}; not fetching its dependencies", name);
            return SubdependencyLookup::empty();
        }

        match ecosystem {
            Ecosystem::Rubygems => self.rubygems_children(name, &version).await,
            _ => self.deps_dev_children(ecosystem, name, &version).await,
        }
    }
}

/// deps.dev system identifier; gradle artifacts live in the Maven system
fn deps_dev_system(ecosystem: Ecosystem) -> &'static str {
    match ecosystem {
        Ecosystem::Npm => "npm",
        Ecosystem::Pypi => "pypi",
        Ecosystem::Cargo => "cargo",
        Ecosystem::Go => "go",
        Ecosystem::Maven | Ecosystem::Gradle => "maven",
        Ecosystem::Rubygems => "rubygems",
    }
}

/// Percent-encodes each `/`-separated segment, keeping the separators
fn encode_path(name: &str) -> String {
    name.split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

fn describe_pause(pause: Duration) -> String {
    let seconds = pause.as_secs();
    if seconds >= 60 && seconds % 60 == 0 {
        format!("{} minutes", seconds / 60)
    } else {
        format!("{} seconds", seconds)
    }
}
