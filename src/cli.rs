use clap::{ArgGroup, Parser};
use std::path::PathBuf;

use dep_takeover::takeover::domain::EcosystemSelector;

/// Find declared dependencies and maintainer domains an attacker could claim
#[derive(Parser, Debug)]
#[command(name = "dep-takeover")]
#[command(version)]
#[command(
    about = "Find declared dependencies and maintainer domains an attacker could claim",
    long_about = None
)]
#[command(group(ArgGroup::new("source").required(true).args(["path", "dependency"])))]
pub struct Args {
    /// Ecosystem to audit: npm, pypi, cargo, go, maven, gradle, rubygems or all
    /// (may also come from the config file)
    #[arg(short, long)]
    pub ecosystem: Option<EcosystemSelector>,

    /// Path to the project directory to scan for manifests
    #[arg(short, long)]
    pub path: Option<PathBuf>,

    /// Audit a single dependency given as name[:version]
    #[arg(short, long, value_name = "NAME[:VERSION]")]
    pub dependency: Option<String>,

    /// Report every takeover and namespaced finding as soon as it is found
    #[arg(long)]
    pub print_takeover: bool,

    /// Write takeover candidates to this file as name:version lines ("-" for stdout)
    #[arg(short, long, value_name = "PATH")]
    pub output_file: Option<String>,

    /// Also look for maintainer email domains that could be registered
    #[arg(long)]
    pub check_email: bool,

    /// Exclude packages matching patterns (supports wildcards: *)
    /// Can be specified multiple times: -x "@acme/*" -x "internal-*"
    #[arg(short = 'x', long = "exclude", value_name = "PATTERN")]
    pub exclude: Vec<String>,

    /// Config file (defaults to dep-takeover.config.yml in the project directory)
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Exit with status 1 when takeover candidates are found
    #[arg(long)]
    pub fail_on_findings: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

impl Args {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
