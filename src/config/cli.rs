//! CLI argument parsing using clap

use clap::Parser;
use std::path::PathBuf;

/// cleanbench - steady-state benchmark of a block device with serializer-bench
///
/// WARNING: the device is secure-erased and overwritten. Only use on solid
/// state drives whose contents you do not need.
#[derive(Parser, Debug)]
#[command(name = "cleanbench")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Block device to benchmark (e.g., /dev/sdb)
    #[arg(value_name = "DEVICE")]
    pub device: PathBuf,

    // === Serializer Parameters ===
    /// Serializer block size (e.g., 4096, 4k)
    #[arg(long, help_heading = "Serializer parameters")]
    pub block_size: Option<String>,

    /// Serializer extent size (e.g., 1048576, 1M)
    #[arg(long, help_heading = "Serializer parameters")]
    pub extent_size: Option<String>,

    /// Number of extents the serializer keeps active for data
    #[arg(long, help_heading = "Serializer parameters")]
    pub active_data_extents: Option<u32>,

    /// Size of the serializer's file zone (e.g., 64M)
    #[arg(long, help_heading = "Serializer parameters")]
    pub file_zone_size: Option<String>,

    // === Workload Parameters ===
    /// Measured run duration (e.g., 60, 60s, 5m)
    #[arg(long, help_heading = "Workload parameters")]
    pub duration: Option<String>,

    /// Number of concurrent clients
    #[arg(long, help_heading = "Workload parameters")]
    pub concurrent: Option<u32>,

    /// Inserts per transaction
    #[arg(long, help_heading = "Workload parameters")]
    pub inserts_per_txn: Option<u32>,

    /// Updates per transaction
    #[arg(long, help_heading = "Workload parameters")]
    pub updates_per_txn: Option<u32>,

    // === Harness Options ===
    /// TOML configuration file (CLI values take precedence)
    #[arg(short = 'c', long, env = "CLEANBENCH_CONFIG")]
    pub config: Option<PathBuf>,

    /// Path to the serializer-bench executable
    #[arg(long, env = "CLEANBENCH_ENGINE")]
    pub engine: Option<PathBuf>,

    /// Path to the hdparm-compatible secure-erase tool
    #[arg(long)]
    pub erase_tool: Option<PathBuf>,

    /// Validate the device and print the commands that would run, without running them
    #[arg(long)]
    pub dry_run: bool,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,

    /// Enable debug logging
    #[arg(short = 'v', long)]
    pub verbose: bool,
}

impl Cli {
    /// Parse CLI arguments from the environment
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
