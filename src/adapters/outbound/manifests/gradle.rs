use super::record;
use crate::takeover::domain::DependencyRecord;
use regex::Regex;
use std::sync::LazyLock;

/// `configuration "group:artifact[:version][:classifier][@ext]"`, Groovy or Kotlin DSL
static COORDINATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?m)^\s*(?:implementation|api|compileOnly|runtimeOnly|testImplementation|testRuntimeOnly|testCompileOnly|annotationProcessor|kapt|ksp|compile|testCompile|runtime|classpath|developmentOnly)\s*\(?\s*["']([^"':\s]+):([^"':\s]+)(?::([^"':@\s]+))?[^"']*["']"#,
    )
    .expect("gradle coordinate pattern is valid")
});

/// Parses string-notation dependencies of a build.gradle(.kts)
pub(super) fn parse(content: &str) -> Vec<DependencyRecord> {
    COORDINATE
        .captures_iter(content)
        .filter_map(|captures| {
            let group = captures.get(1)?.as_str();
            let artifact = captures.get(2)?.as_str();
            // `$kotlinVersion` style interpolation cannot be resolved here
            let version = captures
                .get(3)
                .map(|m| m.as_str())
                .filter(|v| !v.contains('$'))
                .unwrap_or("");
            record(&format!("{}:{}", group, artifact), version)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(records: &[DependencyRecord]) -> Vec<(&str, &str)> {
        records.iter().map(|r| (r.name(), r.version())).collect()
    }

    #[test]
    fn test_groovy_dsl() {
        let parsed = parse(
            "dependencies {
    implementation 'com.google.guava:guava:32.1.3-jre'
    testImplementation \"junit:junit:4.13.2\"
    compileOnly 'org.projectlombok:lombok'
    implementation project(':core')
}",
        );

        assert_eq!(
            pairs(&parsed),
            vec![
                ("com.google.guava:guava", "32.1.3-jre"),
                ("junit:junit", "4.13.2"),
                ("org.projectlombok:lombok", "")
            ]
        );
    }

    #[test]
    fn test_kotlin_dsl_and_interpolation() {
        let parsed = parse(
            r#"dependencies {
    implementation("org.jetbrains.kotlinx:kotlinx-coroutines-core:1.7.3")
    api("com.squareup.okhttp3:okhttp:$okhttpVersion")
    runtimeOnly("org.postgresql:postgresql:42.7.1@jar")
}"#,
        );

        assert_eq!(
            pairs(&parsed),
            vec![
                ("org.jetbrains.kotlinx:kotlinx-coroutines-core", "1.7.3"),
                ("com.squareup.okhttp3:okhttp", ""),
                ("org.postgresql:postgresql", "42.7.1")
            ]
        );
    }
}
