use super::{record, ParsedManifest};
use crate::shared::Result;
use crate::takeover::domain::DependencyRecord;
use serde::Deserialize;
use serde_json::{Map, Value};

#[derive(Debug, Deserialize)]
struct PackageJson {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    workspaces: Option<Value>,
    #[serde(default)]
    dependencies: Map<String, Value>,
    #[serde(default, rename = "devDependencies")]
    dev_dependencies: Map<String, Value>,
}

/// Prefixes of specs that point somewhere other than the npm registry
const NON_REGISTRY_PREFIXES: &[&str] = &[
    "git+", "git:", "git@", "github:", "gitlab:", "bitbucket:", "gist:", "http:", "https:",
    "file:", "link:", "portal:", "workspace:",
];

pub(super) fn parse(content: &str) -> Result<ParsedManifest> {
    let manifest: PackageJson = serde_json::from_str(content)?;

    let dependencies = manifest
        .dependencies
        .iter()
        .chain(manifest.dev_dependencies.iter())
        .filter_map(|(name, spec)| registry_dependency(name, spec.as_str()?))
        .collect();

    Ok(ParsedManifest {
        package_name: manifest.name,
        declares_workspaces: manifest.workspaces.is_some_and(|w| !w.is_null()),
        dependencies,
    })
}

fn registry_dependency(name: &str, spec: &str) -> Option<DependencyRecord> {
    let spec = spec.trim();

    // `npm:real-name@range` installs real-name under an alias
    if let Some(alias) = spec.strip_prefix("npm:") {
        let (target, range) = split_alias(alias);
        return record(target, range);
    }

    if NON_REGISTRY_PREFIXES.iter().any(|p| spec.starts_with(p)) || spec.contains("://") {
        return None;
    }

    // bare `owner/repo` is a GitHub shorthand
    if spec.contains('/') {
        return None;
    }

    record(name, spec)
}

/// `@scope/pkg@^1.0` -> (`@scope/pkg`, `^1.0`)
fn split_alias(alias: &str) -> (&str, &str) {
    let search_from = usize::from(alias.starts_with('@'));
    match alias[search_from..].find('@') {
        Some(at) => {
            let at = at + search_from;
            (&alias[..at], &alias[at + 1..])
        }
        None => (alias, ""),
    }
}
