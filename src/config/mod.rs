//! Configuration module
//!
//! Handles CLI argument parsing, TOML configuration files, and validation.

pub mod cli;
pub mod cli_convert;
pub mod params;
pub mod toml;
pub mod validator;

use params::ParameterSet;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Complete harness configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HarnessConfig {
    #[serde(default)]
    pub engine: EngineConfig,
    #[serde(default)]
    pub erase: EraseConfig,
    /// serializer-bench parameters, used for both the fill and the timed run
    #[serde(default)]
    pub parameters: ParameterSet,
    /// Workload parameters, used for the timed run only
    #[serde(default)]
    pub workload: ParameterSet,
}

/// serializer-bench location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default = "default_engine_binary")]
    pub binary: PathBuf,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            binary: default_engine_binary(),
        }
    }
}

fn default_engine_binary() -> PathBuf {
    PathBuf::from("./serializer-bench")
}

/// Secure-erase tool settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EraseConfig {
    /// hdparm-compatible erase utility
    #[serde(default = "default_erase_tool")]
    pub tool: PathBuf,
    /// Temporary ATA security password set before erasing
    #[serde(default = "default_erase_password")]
    pub password: String,
}

impl Default for EraseConfig {
    fn default() -> Self {
        Self {
            tool: default_erase_tool(),
            password: default_erase_password(),
        }
    }
}

fn default_erase_tool() -> PathBuf {
    PathBuf::from("hdparm")
}

fn default_erase_password() -> String {
    "password".to_string()
}
