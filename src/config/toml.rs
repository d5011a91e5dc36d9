//! TOML configuration file parsing
//!
//! ```toml
//! [engine]
//! binary = "/opt/rethinkdb/serializer-bench"
//!
//! [erase]
//! tool = "/sbin/hdparm"
//! password = "bench"
//!
//! [parameters]
//! block-size = 4096
//! extent-size = 1048576
//!
//! [workload]
//! duration = 60
//! concurrent = 8
//! ```

use super::cli::Cli;
use super::cli_convert::{engine_parameters, workload_parameters};
use super::HarnessConfig;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Parse TOML configuration file
pub fn parse_toml_file(path: &Path) -> Result<HarnessConfig> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    parse_toml_string(&contents)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Parse TOML configuration from string
pub fn parse_toml_string(contents: &str) -> Result<HarnessConfig> {
    let config: HarnessConfig = ::toml::from_str(contents)
        .context("Failed to parse TOML configuration")?;

    Ok(config)
}

/// Merge CLI arguments with TOML configuration (CLI takes precedence)
pub fn merge_cli_with_config(cli: &Cli, mut config: HarnessConfig) -> Result<HarnessConfig> {
    if let Some(ref binary) = cli.engine {
        config.engine.binary = binary.clone();
    }
    if let Some(ref tool) = cli.erase_tool {
        config.erase.tool = tool.clone();
    }

    config.parameters.merge(engine_parameters(cli)?);
    config.workload.merge(workload_parameters(cli)?);

    Ok(config)
}

/// Build the effective configuration: optional file, then CLI overrides
pub fn load_config(cli: &Cli) -> Result<HarnessConfig> {
    let base = match cli.config {
        Some(ref path) => parse_toml_file(path)?,
        None => HarnessConfig::default(),
    };
    merge_cli_with_config(cli, base)
}
