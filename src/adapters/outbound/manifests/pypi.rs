use super::record;
use crate::shared::Result;
use crate::takeover::domain::DependencyRecord;
use anyhow::Context;
use regex::Regex;
use std::sync::LazyLock;
use toml::{Table, Value};

/// `name[extras] op version`, everything after the first constraint ignored
static REQUIREMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^([A-Za-z0-9][A-Za-z0-9._-]*)\s*(?:\[[^\]]*\])?\s*(?:(?:===|==|~=|!=|>=|<=|>|<)\s*([^,;\s]+))?",
    )
    .expect("requirement pattern is valid")
});

/// Parses a requirements file
pub(super) fn parse_requirements(content: &str) -> Vec<DependencyRecord> {
    content.lines().filter_map(parse_requirement).collect()
}

/// Parses one PEP 508 requirement; options, URLs and VCS references yield `None`
fn parse_requirement(line: &str) -> Option<DependencyRecord> {
    let line = match line.find(" #") {
        Some(comment) => &line[..comment],
        None => line,
    }
    .trim();

    if line.is_empty() || line.starts_with('#') || line.starts_with('-') {
        return None;
    }
    // direct references (`pkg @ https://...`, `git+https://...`) have no registry name to claim
    if line.contains("://") || line.contains(" @ ") || line.starts_with("git+") {
        return None;
    }

    let captures = REQUIREMENT.captures(line)?;
    let name = captures.get(1)?.as_str();
    let version = captures.get(2).map_or("", |m| m.as_str());
    record(name, version)
}

/// Parses PEP 621 and Poetry dependency tables of a pyproject.toml
pub(super) fn parse_pyproject(content: &str) -> Result<Vec<DependencyRecord>> {
    let document: Table = toml::from_str(content).context("Failed to parse pyproject.toml")?;
    let mut dependencies = Vec::new();

    if let Some(project) = document.get("project").and_then(Value::as_table) {
        dependencies.extend(requirement_array(project.get("dependencies")));

        if let Some(optional) = project
            .get("optional-dependencies")
            .and_then(Value::as_table)
        {
            for extra in optional.values() {
                dependencies.extend(requirement_array(Some(extra)));
            }
        }
    }

    let poetry = document
        .get("tool")
        .and_then(|tool| tool.get("poetry"))
        .and_then(Value::as_table);
    if let Some(poetry) = poetry {
        dependencies.extend(poetry_table(poetry.get("dependencies")));
        dependencies.extend(poetry_table(poetry.get("dev-dependencies")));

        if let Some(groups) = poetry.get("group").and_then(Value::as_table) {
            for group in groups.values() {
                dependencies.extend(poetry_table(group.get("dependencies")));
            }
        }
    }

    Ok(dependencies)
}

fn requirement_array(value: Option<&Value>) -> Vec<DependencyRecord> {
    value
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .filter_map(parse_requirement)
                .collect()
        })
        .unwrap_or_default()
}

fn poetry_table(value: Option<&Value>) -> Vec<DependencyRecord> {
    let Some(table) = value.and_then(Value::as_table) else {
        return Vec::new();
    };

    table
        .iter()
        .filter(|(name, _)| !name.eq_ignore_ascii_case("python"))
        .filter_map(|(name, spec)| match spec {
            Value::String(version) => record(name, version),
            Value::Table(detail) => {
                if ["git", "path", "url"].iter().any(|k| detail.contains_key(*k)) {
                    return None;
                }
                let version = detail.get("version").and_then(Value::as_str).unwrap_or("");
                record(name, version)
            }
            _ => None,
        })
        .collect()
}
