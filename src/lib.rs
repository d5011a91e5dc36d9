//! cleanbench - steady-state block device benchmark harness
//!
//! cleanbench measures how a block device performs under the RethinkDB
//! serializer once the device has reached steady state. It does not contain
//! the storage engine; it drives the external `serializer-bench` binary and
//! an hdparm-compatible secure-erase tool through a fixed lifecycle and
//! reports the elapsed time of the measured run.
//!
//! # Architecture
//!
//! - **Device guard**: only validated block devices can be targeted (`target`)
//! - **Conditioning**: secure erase, then fill until the device is exhausted
//! - **Measurement**: timed engine run with engine + workload parameters
//! - **Extraction**: elapsed seconds parsed from the engine's stderr
//! - **Process seam**: all external programs go through `ProcessRunner`

pub mod config;
pub mod engine;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod target;

// Re-export commonly used types
pub use config::params::{ParamValue, ParameterSet};
pub use config::HarnessConfig;
pub use error::{BenchError, Stage};
pub use pipeline::{Harness, RunResult};
pub use target::BlockDevice;
