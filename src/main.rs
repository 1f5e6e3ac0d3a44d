mod cli;

use clap::error::ErrorKind;
use clap::CommandFactory;
use cli::Args;
use dep_takeover::adapters::outbound::console::StderrProgressReporter;
use dep_takeover::adapters::outbound::filesystem::{
    FileSystemManifestReader, FileSystemWriter, StdoutPresenter,
};
use dep_takeover::adapters::outbound::formatters::TakeoverReportFormatter;
use dep_takeover::adapters::outbound::network::{
    CachingRegistryGateway, ContactMetadataClient, DnsWhoisProbe, FixedCooldown, RegistryClient,
    DEFAULT_TIMEOUT,
};
use dep_takeover::application::dto::{AuditRequest, DependencySource};
use dep_takeover::application::use_cases::AuditDependenciesUseCase;
use dep_takeover::config::{self, ConfigFile};
use dep_takeover::ports::outbound::OutputPresenter;
use dep_takeover::shared::error::{ExitCode, TakeoverError};
use dep_takeover::shared::Result;
use dep_takeover::takeover::domain::{
    DependencyRecord, Ecosystem, EcosystemSelector, TakeoverMap,
};
use dep_takeover::takeover::policies::KnownDomains;
use std::path::{Path, PathBuf};
use std::process;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

fn main() {
    let args = Args::parse_args();
    init_tracing(args.debug);

    match run(args) {
        Ok(exit_code) => process::exit(exit_code.as_i32()),
        Err(e) => {
            eprintln!("\n❌ An error occurred:\n");
            eprintln!("{}", e);

            // Display error chain
            for cause in e.chain().skip(1) {
                eprintln!("\nCaused by: {}", cause);
            }

            eprintln!();
            process::exit(ExitCode::ApplicationError.as_i32());
        }
    }
}

/// Logs go to stderr: `--debug` wins over `RUST_LOG`, which wins over the info default
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("dep_takeover=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("dep_takeover=info"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

/// The dependencies to audit, as given on the command line
#[derive(Debug, Clone, PartialEq)]
enum Source {
    Project(PathBuf),
    Dependency(String),
}

/// Command-line flags merged over the config file, merged over the defaults
#[derive(Debug)]
struct Settings {
    ecosystems: Vec<Ecosystem>,
    source: Source,
    print_takeover: bool,
    check_email: bool,
    output_file: Option<String>,
    exclude_patterns: Vec<String>,
    ignore_domains: Vec<String>,
    cooldown: Duration,
    timeout: Duration,
    fail_on_findings: bool,
}

fn run(args: Args) -> Result<ExitCode> {
    let source = match (&args.path, &args.dependency) {
        (Some(path), _) => {
            validate_project_path(path)?;
            Source::Project(path.clone())
        }
        (None, Some(spec)) => Source::Dependency(spec.clone()),
        (None, None) => anyhow::bail!("Either --path or --dependency must be given"),
    };

    let config = match (&args.config, &source) {
        (Some(path), _) => Some(config::load_config_from_path(path)?),
        (None, Source::Project(path)) => config::discover_config(path)?,
        (None, Source::Dependency(_)) => None,
    };

    let Some(settings) = resolve_settings(args, source, config.unwrap_or_default())? else {
        Args::command()
            .error(
                ErrorKind::MissingRequiredArgument,
                "the ecosystem must be given with --ecosystem or in the config file",
            )
            .exit();
    };

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    runtime.block_on(audit(settings))
}

async fn audit(settings: Settings) -> Result<ExitCode> {
    // Create adapters (Dependency Injection)
    let registry_client = RegistryClient::new(FixedCooldown::new(settings.cooldown), settings.timeout)?;
    let use_case = AuditDependenciesUseCase::new(
        FileSystemManifestReader::new(),
        CachingRegistryGateway::new(registry_client),
        ContactMetadataClient::new(settings.timeout)?,
        DnsWhoisProbe::new(settings.timeout),
        StderrProgressReporter::new(),
    )
    .with_known_domains(KnownDomains::with_extra(&settings.ignore_domains));

    let mut takeover = TakeoverMap::new();
    let mut has_findings = false;

    for ecosystem in &settings.ecosystems {
        let source = match &settings.source {
            Source::Project(path) => DependencySource::Project(path.clone()),
            Source::Dependency(spec) => {
                DependencySource::Single(DependencyRecord::parse_spec(*ecosystem, spec)?)
            }
        };

        let request = AuditRequest::new(*ecosystem, source)
            .with_print_takeover(settings.print_takeover)
            .with_check_email(settings.check_email)
            .with_exclude_patterns(settings.exclude_patterns.clone());

        let response = use_case.execute(request).await?;
        has_findings |= response.has_findings();
        for candidate in response.outcome.takeover.iter() {
            takeover.insert(&candidate.name, &candidate.version);
        }
    }

    if let Some(output_file) = &settings.output_file {
        write_results(output_file, &takeover)?;
    }

    if has_findings && settings.fail_on_findings {
        return Ok(ExitCode::TakeoverDetected);
    }
    Ok(ExitCode::Success)
}

fn write_results(output_file: &str, takeover: &TakeoverMap) -> Result<()> {
    let formatter = TakeoverReportFormatter::new();
    let content = formatter.results_file(takeover.iter());

    if output_file == "-" {
        return StdoutPresenter::new().present(&content);
    }

    let writer = FileSystemWriter::new(PathBuf::from(output_file));
    writer.present(&content)?;
    eprintln!("{}", formatter.saved_to(writer.output_path()));
    Ok(())
}

/// Returns `None` when neither the command line nor the config names an ecosystem
fn resolve_settings(args: Args, source: Source, config: ConfigFile) -> Result<Option<Settings>> {
    let selector = match (args.ecosystem, config.ecosystem.as_deref()) {
        (Some(selector), _) => selector,
        (None, Some(value)) => value.parse::<EcosystemSelector>()?,
        (None, None) => return Ok(None),
    };

    let exclude_patterns = if args.exclude.is_empty() {
        config.exclude_packages.unwrap_or_default()
    } else {
        args.exclude
    };

    let timeout = config
        .timeout_seconds
        .map(Duration::from_secs)
        .unwrap_or(DEFAULT_TIMEOUT);
    let cooldown = config
        .cooldown_seconds
        .map(Duration::from_secs)
        .unwrap_or(FixedCooldown::DEFAULT_INTERVAL);

    Ok(Some(Settings {
        ecosystems: selector.ecosystems(),
        source,
        print_takeover: args.print_takeover || config.print_takeover.unwrap_or(false),
        check_email: args.check_email || config.check_email.unwrap_or(false),
        output_file: args.output_file.or(config.output_file),
        exclude_patterns,
        ignore_domains: config.ignore_domains.unwrap_or_default(),
        cooldown,
        timeout,
        fail_on_findings: args.fail_on_findings || config.fail_on_findings.unwrap_or(false),
    }))
}

fn validate_project_path(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(TakeoverError::InvalidProjectPath {
            path: path.to_path_buf(),
            reason: "Directory does not exist".to_string(),
        }
        .into());
    }

    // Security check: Reject symbolic links for project paths
    let metadata =
        std::fs::symlink_metadata(path).map_err(|e| TakeoverError::InvalidProjectPath {
            path: path.to_path_buf(),
            reason: format!("Failed to read path metadata: {}", e),
        })?;

    if metadata.is_symlink() {
        return Err(TakeoverError::InvalidProjectPath {
            path: path.to_path_buf(),
            reason: "Security: Project path is a symbolic link. For security reasons, symbolic links are not allowed.".to_string(),
        }
        .into());
    }

    if !metadata.is_dir() {
        return Err(TakeoverError::InvalidProjectPath {
            path: path.to_path_buf(),
            reason: "Not a directory".to_string(),
        }
        .into());
    }

    Ok(())
}
