//! Conditioning: secure erase followed by a steady-state fill
//!
//! A freshly erased flash device performs far better than it will under
//! sustained load. Before the timed run the device is erased (to start from
//! a known state) and then filled by serializer-bench in `--forever` mode
//! until the engine reports it ran out of space. Only that marker proves the
//! fill reached the end of the device; the fill's exit status says nothing
//! about it.
//!
//! Note that ATA secure erase is only safe on solid state drives. The harness
//! cannot tell device technologies apart; the caller picks the device.

use crate::config::params::ParameterSet;
use crate::config::{EngineConfig, EraseConfig};
use crate::engine::args::to_args;
use crate::engine::{Invocation, ProcessRunner};
use crate::error::{BenchError, EraseStep, Stage};
use crate::target::BlockDevice;
use tracing::{debug, info, warn};

/// Substring serializer-bench prints on stderr when the device is full
pub const EXHAUSTION_MARKER: &str = "ran out of disk space";

/// Build one of the two erase-utility invocations
pub fn erase_invocation(erase: &EraseConfig, step: EraseStep, device: &BlockDevice) -> Invocation {
    let action = match step {
        EraseStep::SetPassword => "--security-set-pass",
        EraseStep::Erase => "--security-erase",
    };
    Invocation::new(&erase.tool)
        .args(["--user-master", "u", action])
        .arg(erase.password.as_str())
        .arg(device.as_str())
}

/// Build the unbounded fill invocation
pub fn fill_invocation(engine: &EngineConfig, device: &BlockDevice, parameters: &ParameterSet) -> Invocation {
    Invocation::new(&engine.binary)
        .arg("-f")
        .arg(device.as_str())
        .arg("--forever")
        .args(to_args(parameters))
}

/// Set a temporary security password, then secure-erase under it
///
/// # Errors
///
/// `ConditioningFailed` if either invocation exits non-zero; `Spawn` if the
/// erase tool cannot be started. The second step is not attempted when the
/// first fails.
pub fn secure_erase(
    runner: &dyn ProcessRunner,
    erase: &EraseConfig,
    device: &BlockDevice,
) -> Result<(), BenchError> {
    warn!(device = %device, "secure erasing; all data on the device will be lost");

    for step in [EraseStep::SetPassword, EraseStep::Erase] {
        let invocation = erase_invocation(erase, step, device);
        debug!(%step, command = %invocation, "running erase tool");

        let outcome = runner.run(&invocation).map_err(|source| BenchError::Spawn {
            stage: Stage::Erase,
            program: invocation.program_name(),
            source,
        })?;

        if !outcome.success() {
            return Err(BenchError::ConditioningFailed {
                step,
                exit_code: outcome.exit_code,
                stderr: outcome.stderr,
            });
        }
    }

    info!(device = %device, "secure erase complete");
    Ok(())
}

/// Fill the device with serializer-bench until it runs out of space
///
/// # Errors
///
/// `ConditioningIncomplete` if the exhaustion marker is absent from the
/// fill's stderr, whatever its exit status; `Spawn` if the engine cannot be
/// started.
pub fn fill_to_steady_state(
    runner: &dyn ProcessRunner,
    engine: &EngineConfig,
    device: &BlockDevice,
    parameters: &ParameterSet,
) -> Result<(), BenchError> {
    info!(device = %device, "putting device into a steady state");

    let invocation = fill_invocation(engine, device, parameters);
    debug!(command = %invocation, "running steady-state fill");

    let outcome = runner.run(&invocation).map_err(|source| BenchError::Spawn {
        stage: Stage::Fill,
        program: invocation.program_name(),
        source,
    })?;

    if !outcome.stderr.contains(EXHAUSTION_MARKER) {
        return Err(BenchError::ConditioningIncomplete {
            stderr: outcome.stderr,
        });
    }

    debug!(exit_code = ?outcome.exit_code, "fill exhausted the device");
    Ok(())
}

/// Full conditioning sequence: erase, then fill
pub fn condition(
    runner: &dyn ProcessRunner,
    engine: &EngineConfig,
    erase: &EraseConfig,
    device: &BlockDevice,
    parameters: &ParameterSet,
) -> Result<(), BenchError> {
    secure_erase(runner, erase, device)?;
    fill_to_steady_state(runner, engine, device, parameters)
}
