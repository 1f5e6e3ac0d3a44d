use crate::ports::outbound::ContactMetadataRepository;
use crate::shared::Result;
use crate::takeover::domain::Ecosystem;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;

#[derive(Debug, Deserialize)]
struct NpmPackument {
    #[serde(default)]
    maintainers: Vec<Value>,
    #[serde(default)]
    contributors: Vec<Value>,
}

#[derive(Debug, Deserialize)]
struct PyPiProject {
    info: PyPiInfo,
}

#[derive(Debug, Deserialize)]
struct PyPiInfo {
    #[serde(default)]
    author_email: Option<String>,
    #[serde(default)]
    maintainer_email: Option<String>,
}

/// ContactMetadataClient adapter reading maintainer emails from npm and PyPI
///
/// npm lists maintainers as `{name, email}` objects and contributors either the
/// same way or as `"Name <email> (url)"` strings. PyPI has free-form
/// `author_email`/`maintainer_email` fields that may hold several comma-separated
/// `Name <email>` entries.
pub struct ContactMetadataClient {
    client: reqwest::Client,
    npm_registry: String,
    pypi: String,
}

impl ContactMetadataClient {
    pub fn new(timeout: Duration) -> Result<Self> {
        let version = env!("CARGO_PKG_VERSION");
        let user_agent = format!("dep-takeover/{}", version);
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            npm_registry: "https://registry.npmjs.org".to_string(),
            pypi: "https://pypi.org".to_string(),
        })
    }

    /// Overrides the npm registry and PyPI base URLs
    pub fn with_base_urls(mut self, npm_registry: &str, pypi: &str) -> Self {
        self.npm_registry = npm_registry.trim_end_matches('/').to_string();
        self.pypi = pypi.trim_end_matches('/').to_string();
        self
    }

    async fn get_json<T: for<'de> Deserialize<'de>>(&self, url: &str) -> Result<T> {
        let response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            anyhow::bail!("{} returned status code {}", url, response.status());
        }
        Ok(response.json::<T>().await?)
    }

    async fn npm_emails(&self, package: &str) -> Result<Vec<String>> {
        let url = format!(
            "{}/{}",
            self.npm_registry,
            // scoped packages keep the slash escaped in the packument URL
            urlencoding::encode(package)
        );
        let packument: NpmPackument = self.get_json(&url).await?;

        Ok(packument
            .maintainers
            .iter()
            .chain(packument.contributors.iter())
            .filter_map(person_email)
            .collect())
    }

    async fn pypi_emails(&self, package: &str) -> Result<Vec<String>> {
        let url = format!("{}/pypi/{}/json", self.pypi, urlencoding::encode(package));
        let project: PyPiProject = self.get_json(&url).await?;

        Ok([project.info.author_email, project.info.maintainer_email]
            .into_iter()
            .flatten()
            .flat_map(|field| split_address_list(&field))
            .collect())
    }
}

#[async_trait]
impl ContactMetadataRepository for ContactMetadataClient {
    async fn fetch_emails(&self, ecosystem: Ecosystem, package: &str) -> Vec<String> {
        let result = match ecosystem {
            Ecosystem::Npm => self.npm_emails(package).await,
            Ecosystem::Pypi => self.pypi_emails(package).await,
            _ => return Vec::new(),
        };

        result.unwrap_or_else(|e| {
            tracing::debug!("No contact metadata for {}: {}", package, e);
            Vec::new()
        })
    }
}

/// Email of an npm person entry, object or `"Name <email> (url)"` string form
fn person_email(person: &Value) -> Option<String> {
    match person {
        Value::Object(fields) => fields
            .get("email")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|email| !email.is_empty())
            .map(str::to_string),
        Value::String(text) => angle_bracketed(text).map(str::to_string),
        _ => None,
    }
}

fn angle_bracketed(text: &str) -> Option<&str> {
    let start = text.find('<')? + 1;
    let end = start + text[start..].find('>')?;
    let inner = text[start..end].trim();
    (!inner.is_empty()).then_some(inner)
}

/// Splits `"A <a@x.org>, b@y.org"` into `["a@x.org", "b@y.org"]`
fn split_address_list(field: &str) -> Vec<String> {
    field
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(|item| angle_bracketed(item).unwrap_or(item).to_string())
        .collect()
}
