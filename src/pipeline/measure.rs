//! Timed serializer-bench run

use crate::config::params::ParameterSet;
use crate::config::EngineConfig;
use crate::engine::args::to_args;
use crate::engine::{Invocation, ProcessRunner};
use crate::error::{BenchError, Stage};
use crate::target::BlockDevice;
use tracing::{debug, info};

/// Build the measurement invocation: engine parameters, then workload
pub fn measure_invocation(
    engine: &EngineConfig,
    device: &BlockDevice,
    parameters: &ParameterSet,
    workload: &ParameterSet,
) -> Invocation {
    Invocation::new(&engine.binary)
        .arg("-f")
        .arg(device.as_str())
        .args(to_args(parameters))
        .args(to_args(workload))
}

/// Run the measured workload and return the engine's stderr text
///
/// # Errors
///
/// `EngineExecutionFailed` with the captured stderr if the engine exits
/// non-zero (or is killed); `Spawn` if it cannot be started.
pub fn run_measurement(
    runner: &dyn ProcessRunner,
    engine: &EngineConfig,
    device: &BlockDevice,
    parameters: &ParameterSet,
    workload: &ParameterSet,
) -> Result<String, BenchError> {
    info!(device = %device, "running the timed workload");

    let invocation = measure_invocation(engine, device, parameters, workload);
    debug!(command = %invocation, "running serializer-bench");

    let outcome = runner.run(&invocation).map_err(|source| BenchError::Spawn {
        stage: Stage::Measure,
        program: invocation.program_name(),
        source,
    })?;

    if !outcome.success() {
        return Err(BenchError::EngineExecutionFailed {
            exit_code: outcome.exit_code,
            stderr: outcome.stderr,
        });
    }

    debug!(stdout_bytes = outcome.stdout.len(), stderr_bytes = outcome.stderr.len(), "measurement finished");
    Ok(outcome.stderr)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::mock::MockRunner;
    use crate::engine::ProcessOutcome;
    use crate::target::block::tests::FakeBlockProbe;

    fn device() -> BlockDevice {
        BlockDevice::open_with("/dev/sdx", &FakeBlockProbe).unwrap()
    }

    #[test]
    fn test_invocation_orders_engine_then_workload() {
        let params = ParameterSet::new().with("block-size", 4096);
        let workload = ParameterSet::new().with("duration", 60).with("concurrent", 4);

        let inv = measure_invocation(&EngineConfig::default(), &device(), &params, &workload);
        assert_eq!(
            inv.args,
            vec!["-f", "/dev/sdx", "--block-size", "4096", "--concurrent", "4", "--duration", "60"]
        );
    }

    #[test]
    fn test_returns_stderr_on_success() {
        let runner = MockRunner::new();
        runner.push_outcome(ProcessOutcome {
            stdout: "progress...".into(),
            stderr: "The test took 3.250 seconds.\n".into(),
            exit_code: Some(0),
        });

        let text = run_measurement(
            &runner,
            &EngineConfig::default(),
            &device(),
            &ParameterSet::new(),
            &ParameterSet::new(),
        )
        .unwrap();
        assert_eq!(text, "The test took 3.250 seconds.\n");
    }

    #[test]
    fn test_nonzero_exit_attaches_stderr() {
        let runner = MockRunner::new();
        runner.push_failure(134, "Guarantee failed: [extent != NULL]");

        let err = run_measurement(
            &runner,
            &EngineConfig::default(),
            &device(),
            &ParameterSet::new(),
            &ParameterSet::new(),
        )
        .unwrap_err();
        match err {
            BenchError::EngineExecutionFailed { exit_code, stderr } => {
                assert_eq!(exit_code, Some(134));
                assert_eq!(stderr, "Guarantee failed: [extent != NULL]");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_killed_engine_is_failure() {
        let runner = MockRunner::new();
        runner.push_outcome(ProcessOutcome {
            exit_code: None,
            ..Default::default()
        });

        let err = run_measurement(
            &runner,
            &EngineConfig::default(),
            &device(),
            &ParameterSet::new(),
            &ParameterSet::new(),
        )
        .unwrap_err();
        assert!(matches!(err, BenchError::EngineExecutionFailed { exit_code: None, .. }));
    }
}
