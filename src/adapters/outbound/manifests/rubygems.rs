use super::record;
use crate::takeover::domain::DependencyRecord;
use regex::Regex;
use std::sync::LazyLock;

static GEM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^\s*gem\s*\(?\s*["']([^"']+)["']\s*(.*)$"#).expect("gem pattern is valid")
});

/// Options that point a gem somewhere other than rubygems.org
const NON_REGISTRY_OPTIONS: &[&str] = &["git", "github", "path", "gist", "bitbucket"];

/// Parses the `gem` lines of a Gemfile
pub(super) fn parse(content: &str) -> Vec<DependencyRecord> {
    content
        .lines()
        .filter_map(|line| {
            let line = line.split('#').next().unwrap_or("");
            let captures = GEM.captures(line)?;
            let name = captures.get(1)?.as_str();
            let rest = captures.get(2).map_or("", |m| m.as_str());

            let arguments: Vec<&str> = rest
                .trim_start_matches(',')
                .split(',')
                .map(str::trim)
                .filter(|a| !a.is_empty())
                .collect();

            if arguments.iter().any(|a| is_non_registry_option(a)) {
                return None;
            }

            // the first positional string argument is the version requirement
            let version = arguments
                .iter()
                .take_while(|a| a.starts_with('"') || a.starts_with('\''))
                .map(|a| a.trim_matches(|c: char| c == '"' || c == '\'' || c == ')'))
                .next()
                .unwrap_or("");

            record(name, version)
        })
        .collect()
}

fn is_non_registry_option(argument: &str) -> bool {
    let key = argument
        .trim_start_matches(':')
        .split(|c: char| c == ':' || c == '=' || c.is_whitespace())
        .next()
        .unwrap_or("");
    NON_REGISTRY_OPTIONS.contains(&key)
}
