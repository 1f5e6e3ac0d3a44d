use super::record;
use crate::takeover::domain::DependencyRecord;
use regex::Regex;
use std::sync::LazyLock;

static DEPENDENCY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<dependency>(.*?)</dependency>").expect("dependency pattern is valid")
});

static COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<!--.*?-->").expect("comment pattern is valid"));

fn element<'a>(body: &'a str, tag: &str) -> Option<&'a str> {
    let open = format!("<{}>", tag);
    let close = format!("</{}>", tag);
    let start = body.find(&open)? + open.len();
    let end = start + body[start..].find(&close)?;
    Some(body[start..end].trim())
}

/// Parses the `<dependency>` elements of a pom.xml as `groupId:artifactId`
///
/// Property references cannot be resolved without the full POM hierarchy: a
/// `${...}` version becomes empty and a `${...}` coordinate drops the entry.
pub(super) fn parse(content: &str) -> Vec<DependencyRecord> {
    let content = COMMENT.replace_all(content, "");

    DEPENDENCY
        .captures_iter(&content)
        .filter_map(|captures| {
            let body = captures.get(1)?.as_str();
            let group = element(body, "groupId")?;
            let artifact = element(body, "artifactId")?;
            if group.contains("${") || artifact.contains("${") {
                return None;
            }

            let version = element(body, "version")
                .filter(|v| !v.contains("${"))
                .unwrap_or("");
            record(&format!("{}:{}", group, artifact), version)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dependencies_with_and_without_versions() {
        let parsed = parse(
            r#"<project>
  <properties><junit.version>5.10.0</junit.version></properties>
  <dependencies>
    <dependency>
      <groupId>org.springframework</groupId>
      <artifactId>spring-core</artifactId>
      <version>6.1.2</version>
    </dependency>
    <!-- <dependency><groupId>old</groupId><artifactId>gone</artifactId></dependency> -->
    <dependency>
      <groupId>org.junit.jupiter</groupId>
      <artifactId>junit-jupiter</artifactId>
      <version>${junit.version}</version>
      <scope>test</scope>
    </dependency>
    <dependency>
      <groupId>com.internal</groupId>
      <artifactId>managed</artifactId>
    </dependency>
  </dependencies>
</project>"#,
        );

        let pairs: Vec<(&str, &str)> = parsed.iter().map(|r| (r.name(), r.version())).collect();
        assert_eq!(
            pairs,
            vec![
                ("org.springframework:spring-core", "6.1.2"),
                ("org.junit.jupiter:junit-jupiter", ""),
                ("com.internal:managed", "")
            ]
        );
    }

    #[test]
    fn test_property_coordinates_are_dropped() {
        let parsed = parse(
            "<dependency><groupId>${project.groupId}</groupId><artifactId>sibling</artifactId></dependency>",
        );
        assert!(parsed.is_empty());
    }
}
