use super::record;
use crate::takeover::domain::DependencyRecord;
use std::collections::HashSet;

/// Parses a go.mod file
///
/// Modules that a `replace` directive points at a local directory are dropped.
pub(super) fn parse(content: &str) -> Vec<DependencyRecord> {
    let mut required: Vec<(String, String)> = Vec::new();
    let mut locally_replaced: HashSet<String> = HashSet::new();
    let mut block: Option<&str> = None;

    for raw in content.lines() {
        let line = strip_comment(raw).trim();
        if line.is_empty() {
            continue;
        }

        if let Some(directive) = block {
            if line == ")" {
                block = None;
                continue;
            }
            apply(directive, line, &mut required, &mut locally_replaced);
            continue;
        }

        let (directive, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let rest = rest.trim();
        if rest == "(" {
            block = Some(match directive {
                "require" => "require",
                "replace" => "replace",
                _ => "other",
            });
            continue;
        }
        apply(directive, rest, &mut required, &mut locally_replaced);
    }

    required
        .into_iter()
        .filter(|(module, _)| !locally_replaced.contains(module))
        .filter_map(|(module, version)| record(&module, &version))
        .collect()
}

fn apply(
    directive: &str,
    spec: &str,
    required: &mut Vec<(String, String)>,
    locally_replaced: &mut HashSet<String>,
) {
    match directive {
        "require" => {
            let mut parts = spec.split_whitespace();
            if let (Some(module), Some(version)) = (parts.next(), parts.next()) {
                required.push((module.to_string(), version.to_string()));
            }
        }
        "replace" => {
            let Some((old, new)) = spec.split_once("=>") else {
                return;
            };
            let target = new.split_whitespace().next().unwrap_or("");
            if target.starts_with('.') || target.starts_with('/') {
                if let Some(module) = old.split_whitespace().next() {
                    locally_replaced.insert(module.to_string());
                }
            }
        }
        _ => {}
    }
}

fn strip_comment(line: &str) -> &str {
    match line.find("//") {
        Some(at) => &line[..at],
        None => line,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(records: &[DependencyRecord]) -> Vec<(&str, &str)> {
        records.iter().map(|r| (r.name(), r.version())).collect()
    }

    #[test]
    fn test_require_block() {
        let parsed = parse(
            "module test-go-project

go 1.19

require (
    github.com/gin-gonic/gin v1.9.1
    github.com/stretchr/testify v1.8.4
)",
        );

        assert_eq!(
            pairs(&parsed),
            vec![
                ("github.com/gin-gonic/gin", "v1.9.1"),
                ("github.com/stretchr/testify", "v1.8.4")
            ]
        );
    }

    #[test]
    fn test_single_line_require_and_indirect_comment() {
        let parsed = parse(
            "module example.com/app
require golang.org/x/text v0.14.0
require (
\tgithub.com/pkg/errors v0.9.1 // indirect
)
",
        );

        assert_eq!(
            pairs(&parsed),
            vec![
                ("golang.org/x/text", "v0.14.0"),
                ("github.com/pkg/errors", "v0.9.1")
            ]
        );
    }

    #[test]
    fn test_local_replacements_are_dropped() {
        let parsed = parse(
            "module example.com/app
require (
\texample.com/internal/lib v0.0.0
\texample.com/forked v1.0.0
\tgithub.com/google/uuid v1.6.0
)
replace example.com/internal/lib => ./lib
replace (
\texample.com/forked v1.0.0 => ../forked
\tgithub.com/google/uuid => github.com/google/uuid v1.5.0
)
",
        );

        assert_eq!(pairs(&parsed), vec![("github.com/google/uuid", "v1.6.0")]);
    }

    #[test]
    fn test_other_blocks_are_ignored() {
        let parsed = parse("exclude (\n\tgithub.com/bad/mod v1.0.0\n)\ngo 1.22\n");
        assert!(parsed.is_empty());
    }
}
