//! Configuration file support for dep-takeover.
//!
//! Provides YAML-based configuration through `dep-takeover.config.yml` files,
//! including data structures, file loading, and validation.

use anyhow::{bail, Context};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

use crate::shared::Result;
use crate::takeover::domain::EcosystemSelector;

pub const CONFIG_FILENAME: &str = "dep-takeover.config.yml";

/// Top-level configuration file schema.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    pub ecosystem: Option<String>,
    pub print_takeover: Option<bool>,
    pub check_email: Option<bool>,
    pub output_file: Option<String>,
    pub exclude_packages: Option<Vec<String>>,
    /// Mail domains never reported as dangling, on top of the built-in list.
    pub ignore_domains: Option<Vec<String>>,
    pub cooldown_seconds: Option<u64>,
    pub timeout_seconds: Option<u64>,
    pub fail_on_findings: Option<bool>,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

/// Load config from an explicit path. Returns an error if the file is not found.
pub fn load_config_from_path(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path).with_context(|| {
        format!(
            "Failed to read config file: {}\n\n💡 Hint: Check that the file exists and is readable.",
            path.display()
        )
    })?;

    let config: ConfigFile = serde_yaml_ng::from_str(&content).with_context(|| {
        format!(
            "Failed to parse config file: {}\n\n💡 Hint: Ensure the file contains valid YAML syntax.",
            path.display()
        )
    })?;

    validate_config(&config)?;
    warn_unknown_fields(&config);

    Ok(config)
}

/// Auto-discover config in a directory. Returns `None` silently if not found.
pub fn discover_config(dir: &Path) -> Result<Option<ConfigFile>> {
    let config_path = dir.join(CONFIG_FILENAME);

    if !config_path.exists() {
        return Ok(None);
    }

    tracing::debug!("Using config file {}", config_path.display());
    let config = load_config_from_path(&config_path)?;
    Ok(Some(config))
}

/// Validate the loaded configuration.
fn validate_config(config: &ConfigFile) -> Result<()> {
    if let Some(ref ecosystem) = config.ecosystem {
        ecosystem.parse::<EcosystemSelector>().with_context(|| {
            format!("Invalid config: ecosystem '{}' is not supported.", ecosystem)
        })?;
    }

    if let Some(ref domains) = config.ignore_domains {
        for (i, domain) in domains.iter().enumerate() {
            if domain.trim().is_empty() {
                bail!(
                    "Invalid config: ignore_domains[{}] must not be empty.\n\n\
                     💡 Hint: Each ignore_domains entry must be a mail domain (e.g., \"example.com\").",
                    i
                );
            }
        }
    }

    if config.timeout_seconds == Some(0) {
        bail!(
            "Invalid config: timeout_seconds must be greater than zero.\n\n\
             💡 Hint: Remove the key to use the default of 10 seconds."
        );
    }

    Ok(())
}

/// Warn about unknown fields in the config file.
fn warn_unknown_fields(config: &ConfigFile) {
    for key in config.unknown_fields.keys() {
        tracing::warn!("Unknown config field '{}' will be ignored.", key);
    }
}
