//! Clean-benchmark pipeline
//!
//! One run is a fixed sequence of fallible stages:
//!
//! 1. **Guard**: validate the device path (`BlockDevice`)
//! 2. **Condition**: secure erase, then fill until the engine runs out of space
//! 3. **Measure**: timed serializer-bench run with engine + workload parameters
//! 4. **Extract**: parse the elapsed seconds out of the engine's stderr
//!
//! The first failing stage ends the run. There are no retries and no partial
//! results; a failed conditioning invalidates any later measurement, so the
//! measurement is never attempted after one.
//!
//! Everything blocks on the child processes. Nothing is shared between runs,
//! and nothing prevents two harnesses from targeting the same device.

pub mod condition;
pub mod extract;
pub mod measure;

use crate::config::params::ParameterSet;
use crate::config::validator::validate_run_parameters;
use crate::config::{EngineConfig, EraseConfig};
use crate::engine::{Invocation, ProcessRunner, SystemRunner};
use crate::error::{BenchError, EraseStep};
use crate::target::{BlockDevice, DeviceProbe, FsProbe};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info};

/// Outcome of a successful run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunResult {
    /// Elapsed seconds reported by serializer-bench
    pub elapsed_secs: f64,
}

impl RunResult {
    /// Elapsed time as a `Duration`; `None` if it does not fit one
    pub fn as_duration(&self) -> Option<Duration> {
        Duration::try_from_secs_f64(self.elapsed_secs).ok()
    }
}

/// Drives one clean benchmark run
///
/// Generic over how processes are run so the whole sequence can be
/// exercised without spawning anything. The device is always checked
/// against the real filesystem.
pub struct Harness<R = SystemRunner> {
    runner: R,
    probe: Box<dyn DeviceProbe>,
    engine: EngineConfig,
    erase: EraseConfig,
}

impl Harness {
    /// Harness that runs real processes against the real filesystem
    pub fn new(engine: EngineConfig, erase: EraseConfig) -> Self {
        Self::with_runner(SystemRunner, engine, erase)
    }
}

impl<R: ProcessRunner> Harness<R> {
    /// Harness with a custom process runner
    pub fn with_runner(runner: R, engine: EngineConfig, erase: EraseConfig) -> Self {
        Self::with_parts(runner, FsProbe, engine, erase)
    }

    pub(crate) fn with_parts(
        runner: R,
        probe: impl DeviceProbe + 'static,
        engine: EngineConfig,
        erase: EraseConfig,
    ) -> Self {
        Self {
            runner,
            probe: Box::new(probe),
            engine,
            erase,
        }
    }

    /// Guard the device path, logging its capacity when available
    pub fn validate_device(&self, device: impl AsRef<Path>) -> Result<BlockDevice, BenchError> {
        let device = BlockDevice::open_with(device, self.probe.as_ref())?;

        match self.probe.capacity(device.path()) {
            Ok(bytes) => info!(device = %device, capacity_bytes = bytes, "validated block device"),
            Err(e) => debug!(device = %device, error = %e, "could not read device capacity"),
        }
        Ok(device)
    }

    /// Every invocation a run would make, in order, without running any
    pub fn plan(
        &self,
        device: impl AsRef<Path>,
        parameters: &ParameterSet,
        workload: &ParameterSet,
    ) -> Result<Vec<Invocation>, BenchError> {
        validate_run_parameters(parameters, workload)?;
        let device = self.validate_device(device)?;

        Ok(vec![
            condition::erase_invocation(&self.erase, EraseStep::SetPassword, &device),
            condition::erase_invocation(&self.erase, EraseStep::Erase, &device),
            condition::fill_invocation(&self.engine, &device, parameters),
            measure::measure_invocation(&self.engine, &device, parameters, workload),
        ])
    }

    /// Run the full pipeline and return the measured elapsed time
    ///
    /// # Errors
    ///
    /// `InvalidArgument` for bad parameter sets (checked before anything
    /// touches the device), then whichever stage fails first.
    pub fn run(
        &self,
        device: impl AsRef<Path>,
        parameters: &ParameterSet,
        workload: &ParameterSet,
    ) -> Result<RunResult, BenchError> {
        validate_run_parameters(parameters, workload)?;
        let device = self.validate_device(device)?;
        self.run_on(&device, parameters, workload)
    }

    /// Run the pipeline against an already validated device
    pub fn run_on(
        &self,
        device: &BlockDevice,
        parameters: &ParameterSet,
        workload: &ParameterSet,
    ) -> Result<RunResult, BenchError> {
        validate_run_parameters(parameters, workload)?;

        condition::condition(&self.runner, &self.engine, &self.erase, device, parameters)?;
        let output = measure::run_measurement(&self.runner, &self.engine, device, parameters, workload)?;
        let elapsed_secs = extract::extract_elapsed(&output)?;

        info!(device = %device, elapsed_secs, "done");
        Ok(RunResult { elapsed_secs })
    }
}
