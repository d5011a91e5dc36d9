//! CLI to parameter set conversion utilities

use crate::config::cli::Cli;
use crate::config::params::ParameterSet;
use crate::error::BenchError;
use anyhow::{Context, Result};

const SIZE_UNITS: &[(&str, u64)] = &[
    ("kb", 1024),
    ("k", 1024),
    ("mb", 1024 * 1024),
    ("m", 1024 * 1024),
    ("gb", 1024 * 1024 * 1024),
    ("g", 1024 * 1024 * 1024),
    ("tb", 1024 * 1024 * 1024 * 1024),
    ("t", 1024 * 1024 * 1024 * 1024),
];

const DURATION_UNITS: &[(&str, u64)] = &[
    ("sec", 1),
    ("s", 1),
    ("min", 60),
    ("m", 60),
    ("hr", 3600),
    ("h", 3600),
];

/// Split off at most one unit suffix; longer spellings are listed first
fn split_unit<'a>(s: &'a str, units: &[(&str, u64)]) -> (&'a str, u64) {
    units
        .iter()
        .find_map(|&(suffix, multiplier)| s.strip_suffix(suffix).map(|num| (num, multiplier)))
        .unwrap_or((s, 1))
}

/// Parse a size string (e.g., "1G", "100M", "4k") to bytes
pub fn parse_size(s: &str) -> Result<u64> {
    let s = s.trim().to_lowercase();
    let (num_str, multiplier) = split_unit(&s, SIZE_UNITS);

    let num: u64 = num_str.parse()
        .with_context(|| format!("Invalid size format: {}", s))?;

    num.checked_mul(multiplier)
        .with_context(|| format!("Size out of range: {}", s))
}

/// Parse a duration string (e.g., "60s", "5m", "1h") to seconds
pub fn parse_duration(s: &str) -> Result<u64> {
    let s = s.trim().to_lowercase();
    let (num_str, multiplier) = split_unit(&s, DURATION_UNITS);

    let num: u64 = num_str.parse()
        .with_context(|| format!("Invalid duration format: {}", s))?;

    num.checked_mul(multiplier)
        .with_context(|| format!("Duration out of range: {}", s))
}

/// Engine parameters given on the command line
pub fn engine_parameters(cli: &Cli) -> Result<ParameterSet, BenchError> {
    let mut params = ParameterSet::new();

    if let Some(ref size) = cli.block_size {
        params.insert("block-size", flag_value("block-size", size, parse_size)?);
    }
    if let Some(ref size) = cli.extent_size {
        params.insert("extent-size", flag_value("extent-size", size, parse_size)?);
    }
    if let Some(extents) = cli.active_data_extents {
        params.insert("active-data-extents", extents);
    }
    if let Some(ref size) = cli.file_zone_size {
        params.insert("file-zone-size", flag_value("file-zone-size", size, parse_size)?);
    }

    Ok(params)
}

/// Workload parameters given on the command line
pub fn workload_parameters(cli: &Cli) -> Result<ParameterSet, BenchError> {
    let mut workload = ParameterSet::new();

    if let Some(ref duration) = cli.duration {
        workload.insert("duration", flag_value("duration", duration, parse_duration)?);
    }
    if let Some(concurrent) = cli.concurrent {
        workload.insert("concurrent", concurrent);
    }
    if let Some(inserts) = cli.inserts_per_txn {
        workload.insert("inserts-per-txn", inserts);
    }
    if let Some(updates) = cli.updates_per_txn {
        workload.insert("updates-per-txn", updates);
    }

    Ok(workload)
}

/// Parse a flag value into the integer passed to serializer-bench
fn flag_value(flag: &str, raw: &str, parse: fn(&str) -> Result<u64>) -> Result<i64, BenchError> {
    parse(raw)
        .and_then(|value| i64::try_from(value).with_context(|| format!("Value too large: {}", value)))
        .map_err(|e| BenchError::InvalidArgument(format!("--{} {:?}: {:#}", flag, raw, e)))
}
