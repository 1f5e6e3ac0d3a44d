use super::record;
use crate::shared::Result;
use crate::takeover::domain::DependencyRecord;
use anyhow::Context;
use toml::{Table, Value};

const DEPENDENCY_TABLES: [&str; 3] = ["dependencies", "dev-dependencies", "build-dependencies"];

pub(super) fn parse(content: &str) -> Result<Vec<DependencyRecord>> {
    let document: Table = toml::from_str(content).context("Failed to parse Cargo.toml")?;
    let mut dependencies = Vec::new();

    for table in DEPENDENCY_TABLES {
        dependencies.extend(dependency_table(document.get(table)));
    }

    if let Some(targets) = document.get("target").and_then(Value::as_table) {
        for target in targets.values() {
            for table in DEPENDENCY_TABLES {
                dependencies.extend(dependency_table(target.get(table)));
            }
        }
    }

    let workspace_deps = document
        .get("workspace")
        .and_then(|workspace| workspace.get("dependencies"));
    dependencies.extend(dependency_table(workspace_deps));

    Ok(dependencies)
}

fn dependency_table(value: Option<&Value>) -> Vec<DependencyRecord> {
    let Some(table) = value.and_then(Value::as_table) else {
        return Vec::new();
    };

    table
        .iter()
        .filter_map(|(key, spec)| match spec {
            Value::String(version) => record(key, version),
            Value::Table(detail) => registry_dependency(key, detail),
            _ => None,
        })
        .collect()
}

fn registry_dependency(key: &str, detail: &Table) -> Option<DependencyRecord> {
    let local = detail.contains_key("path") || detail.contains_key("git");
    let inherited = detail
        .get("workspace")
        .and_then(Value::as_bool)
        .unwrap_or(false);
    if local || inherited {
        return None;
    }

    // `package` is the crates.io name when the dependency is renamed
    let name = detail.get("package").and_then(Value::as_str).unwrap_or(key);
    let version = detail.get("version").and_then(Value::as_str).unwrap_or("");
    record(name, version)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(records: &[DependencyRecord]) -> Vec<(&str, &str)> {
        records.iter().map(|r| (r.name(), r.version())).collect()
    }

    #[test]
    fn test_dependencies_and_dev_dependencies() {
        let parsed = parse(
            r#"[package]
name = "test-rust-project"
version = "0.1.0"

[dependencies]
serde = "1.0"
tokio = { version = "1.0", features = ["full"] }
reqwest = "0.11"

[dev-dependencies]
tokio-test = "0.4"
"#,
        )
        .unwrap();

        assert_eq!(
            pairs(&parsed),
            vec![
                ("serde", "1.0"),
                ("tokio", "1.0"),
                ("reqwest", "0.11"),
                ("tokio-test", "0.4")
            ]
        );
    }

    #[test]
    fn test_local_and_inherited_entries_are_skipped() {
        let parsed = parse(
            r#"[dependencies]
core = { path = "../core" }
fork = { git = "https://github.com/me/fork" }
shared = { workspace = true }
anyhow = "1"
"#,
        )
        .unwrap();

        assert_eq!(pairs(&parsed), vec![("anyhow", "1")]);
    }

    #[test]
    fn test_renamed_dependency_uses_package_name() {
        let parsed = parse(
            r#"[dependencies]
json = { package = "serde_json", version = "1.0" }
"#,
        )
        .unwrap();

        assert_eq!(pairs(&parsed), vec![("serde_json", "1.0")]);
    }

    #[test]
    fn test_target_build_and_workspace_tables() {
        let parsed = parse(
            r#"[build-dependencies]
cc = "1"

[target.'cfg(windows)'.dependencies]
winapi = "0.3"

[workspace.dependencies]
regex = { version = "1.10" }
"#,
        )
        .unwrap();

        assert_eq!(
            pairs(&parsed),
            vec![("cc", "1"), ("winapi", "0.3"), ("regex", "1.10")]
        );
    }

    #[test]
    fn test_entry_without_version() {
        let parsed = parse("[dependencies]\nrand = { features = [\"small_rng\"] }\n").unwrap();
        assert_eq!(pairs(&parsed), vec![("rand", "")]);
    }
}
