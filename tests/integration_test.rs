/// Integration tests for the application layer
mod test_utilities;

use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;
use test_utilities::mocks::*;
use dep_takeover::prelude::*;

fn project_request(ecosystem: Ecosystem) -> AuditRequest {
    AuditRequest::new(ecosystem, DependencySource::Project(PathBuf::from(".")))
}

#[tokio::test]
async fn test_audit_happy_path_without_findings() {
    let gateway = MockRegistryGateway::new()
        .with_children("express", &[("body-parser", "1.20.2"), ("cookie", "0.6.0")]);
    let reporter = MockProgressReporter::new();

    let use_case = AuditDependenciesUseCase::new(
        MockManifestReader::new(&[("express", "^4.18.0"), ("lodash", "^4.17.21")]),
        gateway,
        MockContactMetadata::new(),
        MockDomainProbe::new(),
        reporter.clone(),
    );

    let response = use_case.execute(project_request(Ecosystem::Npm)).await.unwrap();

    assert!(!response.has_findings());
    assert_eq!(response.seed_count, 2);
    assert_eq!(
        response.outcome.processed,
        vec!["express", "body-parser", "cookie", "lodash"]
    );
    assert!(reporter.contains("[+] No package can be taken over !"));
    assert!(reporter.contains("Progress: 1/2 - express"));
}

#[tokio::test]
async fn test_audit_finds_direct_and_transitive_candidates() {
    let gateway = MockRegistryGateway::new()
        .with_missing("acme-internal-config")
        .with_missing("acme-logger")
        .with_children("express", &[("acme-logger", "~2.1.0")]);
    let reporter = MockProgressReporter::new();

    let use_case = AuditDependenciesUseCase::new(
        MockManifestReader::new(&[("express", "^4.18.0"), ("acme-internal-config", "1.0.0")]),
        gateway,
        MockContactMetadata::new(),
        MockDomainProbe::new(),
        reporter.clone(),
    );

    let response = use_case.execute(project_request(Ecosystem::Npm)).await.unwrap();

    let lines: Vec<String> = response
        .outcome
        .takeover
        .iter()
        .map(TakeoverCandidate::as_line)
        .collect();
    assert_eq!(lines, vec!["acme-logger:~2.1.0", "acme-internal-config:1.0.0"]);
    assert_eq!(
        reporter.findings(),
        vec![
            "[+] acme-logger:~2.1.0 might be taken over !",
            "[+] acme-internal-config:1.0.0 might be taken over !"
        ]
    );
}

#[tokio::test]
async fn test_audit_print_takeover_reports_scoped_names() {
    let gateway = MockRegistryGateway::new()
        .with_missing("@acme/ui-kit")
        .with_missing("acme-theme");
    let reporter = MockProgressReporter::new();

    let use_case = AuditDependenciesUseCase::new(
        MockManifestReader::new(&[("@acme/ui-kit", "^3.0.0"), ("acme-theme", "^1.0.0")]),
        gateway,
        MockContactMetadata::new(),
        MockDomainProbe::new(),
        reporter.clone(),
    );

    let request = project_request(Ecosystem::Npm).with_print_takeover(true);
    let response = use_case.execute(request).await.unwrap();

    assert_eq!(response.outcome.namespaced, vec!["@acme/ui-kit"]);
    assert!(!response.outcome.takeover.contains("@acme/ui-kit"));
    assert!(response.outcome.takeover.contains("acme-theme"));
    assert!(reporter.contains("@acme/ui-kit"));
    assert!(reporter.contains("is not published in npm and might be taken over !"));
}

#[tokio::test]
async fn test_audit_reports_indeterminate_packages() {
    let gateway = MockRegistryGateway::new().with_indeterminate("flaky-pkg");
    let reporter = MockProgressReporter::new();

    let use_case = AuditDependenciesUseCase::new(
        MockManifestReader::new(&[("flaky-pkg", "1.0.0")]),
        gateway,
        MockContactMetadata::new(),
        MockDomainProbe::new(),
        reporter.clone(),
    );

    let response = use_case.execute(project_request(Ecosystem::Pypi)).await.unwrap();

    assert!(response.outcome.takeover.is_empty());
    assert_eq!(response.outcome.indeterminate, vec!["flaky-pkg"]);
    assert!(reporter.contains("Error: [-] 1 package(s) could not be checked"));
}

#[tokio::test]
async fn test_audit_manifest_reader_failure_propagates() {
    let use_case = AuditDependenciesUseCase::new(
        MockManifestReader::with_failure(),
        MockRegistryGateway::new(),
        MockContactMetadata::new(),
        MockDomainProbe::new(),
        MockProgressReporter::new(),
    );

    let result = use_case.execute(project_request(Ecosystem::Npm)).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_audit_email_domains_of_seed_dependencies() {
    let metadata = MockContactMetadata::new()
        .with_emails("tiny-lib", &["jane@lapsed-studio.dev", "ops@gmail.com"])
        .with_emails("transitive-lib", &["x@also-lapsed.dev"]);
    let probe = MockDomainProbe::new()
        .with_unregistered("lapsed-studio.dev")
        .with_unregistered("also-lapsed.dev");
    let gateway = MockRegistryGateway::new().with_children("tiny-lib", &[("transitive-lib", "1")]);
    let reporter = MockProgressReporter::new();

    let use_case = AuditDependenciesUseCase::new(
        MockManifestReader::new(&[("tiny-lib", "2.0.0")]),
        gateway,
        metadata,
        probe,
        reporter.clone(),
    );

    let response = use_case
        .execute(project_request(Ecosystem::Npm).with_check_email(true))
        .await
        .unwrap();

    assert!(response.has_findings());
    assert_eq!(
        response.email_takeovers,
        vec![EmailTakeover {
            package: "tiny-lib".to_string(),
            domains: vec![DanglingDomain::new(
                "lapsed-studio.dev",
                "jane@lapsed-studio.dev"
            )],
        }]
    );
    assert!(reporter.contains(
        "The account associated to dependency tiny-lib is : jane@lapsed-studio.dev and the domain lapsed-studio.dev might be purchased !"
    ));
}

#[tokio::test]
async fn test_audit_ignored_domains() {
    let metadata = MockContactMetadata::new().with_emails("tiny-lib", &["dev@corp.internal"]);
    let probe = MockDomainProbe::new().with_unregistered("corp.internal");

    let use_case = AuditDependenciesUseCase::new(
        MockManifestReader::new(&[("tiny-lib", "2.0.0")]),
        MockRegistryGateway::new(),
        metadata,
        probe,
        MockProgressReporter::new(),
    )
    .with_known_domains(KnownDomains::with_extra(["corp.internal"]));

    let response = use_case
        .execute(project_request(Ecosystem::Pypi).with_check_email(true))
        .await
        .unwrap();

    assert!(response.email_takeovers.is_empty());
}

#[tokio::test]
async fn test_shared_gateway_queries_each_name_once_per_run() {
    let gateway = MockRegistryGateway::new()
        .with_children("a", &[("shared", "1")])
        .with_children("b", &[("shared", "1")]);
    let calls = gateway.clone();

    let use_case = AuditDependenciesUseCase::new(
        MockManifestReader::new(&[("a", "1"), ("b", "1")]),
        gateway,
        MockContactMetadata::new(),
        MockDomainProbe::new(),
        MockProgressReporter::new(),
    );

    use_case.execute(project_request(Ecosystem::Cargo)).await.unwrap();

    assert_eq!(calls.exists_count("shared"), 1);
    assert_eq!(calls.exists_count("a"), 1);
}

#[tokio::test]
async fn test_audit_with_filesystem_manifests() {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join("requirements.txt"),
        "requests==2.32.3\nacme-private-sdk>=0.4\n# comment\n",
    )
    .unwrap();
    fs::write(
        temp.path().join("pyproject.toml"),
        "[project]\nname = \"demo\"\ndependencies = [\"internal-tools==1.0\"]\n",
    )
    .unwrap();

    let gateway = MockRegistryGateway::new()
        .with_missing("acme-private-sdk")
        .with_missing("internal-tools");

    let use_case = AuditDependenciesUseCase::new(
        FileSystemManifestReader::new(),
        gateway,
        MockContactMetadata::new(),
        MockDomainProbe::new(),
        MockProgressReporter::new(),
    );

    let request = AuditRequest::new(
        Ecosystem::Pypi,
        DependencySource::Project(temp.path().to_path_buf()),
    )
    .with_exclude_patterns(vec!["internal-*".to_string()]);
    let response = use_case.execute(request).await.unwrap();

    assert_eq!(response.excluded_count, 1);
    let output = TakeoverReportFormatter::new().results_file(response.outcome.takeover.iter());
    assert_eq!(output, "acme-private-sdk:0.4\n");
}

#[tokio::test]
async fn test_caching_gateway_reused_across_ecosystem_runs() {
    let inner = MockRegistryGateway::new().with_missing("ghost");
    let calls = inner.clone();

    let use_case = AuditDependenciesUseCase::new(
        MockManifestReader::new(&[("ghost", "1.0")]),
        CachingRegistryGateway::new(inner),
        MockContactMetadata::new(),
        MockDomainProbe::new(),
        MockProgressReporter::new(),
    );

    use_case.execute(project_request(Ecosystem::Npm)).await.unwrap();
    let second = use_case.execute(project_request(Ecosystem::Npm)).await.unwrap();

    assert!(second.outcome.takeover.contains("ghost"));
    assert_eq!(calls.exists_count("ghost"), 1);
}
