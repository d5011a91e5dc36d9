//! Error types for the benchmark harness
//!
//! Every failure aborts the run and surfaces exactly one `BenchError`. Each
//! variant carries enough context (path, captured output, exit code) to
//! diagnose the failure without re-running, which matters here because the
//! conditioning stage destroys the device contents.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Pipeline stage a failure belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Device validation
    Guard,
    /// Secure erase (first half of conditioning)
    Erase,
    /// Steady-state fill (second half of conditioning)
    Fill,
    /// Timed engine run
    Measure,
    /// Parsing the timing out of the engine output
    Extract,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Guard => "guard",
            Stage::Erase => "erase",
            Stage::Fill => "fill",
            Stage::Measure => "measure",
            Stage::Extract => "extract",
        };
        f.write_str(name)
    }
}

/// The two erase-utility invocations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EraseStep {
    SetPassword,
    Erase,
}

impl fmt::Display for EraseStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EraseStep::SetPassword => f.write_str("set-password"),
            EraseStep::Erase => f.write_str("erase"),
        }
    }
}

/// Harness error
#[derive(Debug, Error)]
pub enum BenchError {
    #[error("invalid device {path}: {reason}")]
    InvalidDevice { path: PathBuf, reason: String },

    #[error("secure erase ({step}) exited with {}:\n{stderr}", describe_exit(.exit_code))]
    ConditioningFailed {
        step: EraseStep,
        exit_code: Option<i32>,
        stderr: String,
    },

    #[error("steady-state fill ended without running out of disk space:\n{stderr}")]
    ConditioningIncomplete { stderr: String },

    #[error("serializer-bench exited with {}:\n{stderr}", describe_exit(.exit_code))]
    EngineExecutionFailed {
        exit_code: Option<i32>,
        stderr: String,
    },

    #[error("couldn't parse output: {output:?}")]
    UnparsableOutput { output: String },

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("failed to run {program}: {source}")]
    Spawn {
        stage: Stage,
        program: String,
        #[source]
        source: std::io::Error,
    },
}

impl BenchError {
    /// Stage the error was raised from; `None` for argument errors
    pub fn stage(&self) -> Option<Stage> {
        match self {
            BenchError::InvalidDevice { .. } => Some(Stage::Guard),
            BenchError::ConditioningFailed { .. } => Some(Stage::Erase),
            BenchError::ConditioningIncomplete { .. } => Some(Stage::Fill),
            BenchError::EngineExecutionFailed { .. } => Some(Stage::Measure),
            BenchError::UnparsableOutput { .. } => Some(Stage::Extract),
            BenchError::InvalidArgument(_) => None,
            BenchError::Spawn { stage, .. } => Some(*stage),
        }
    }
}

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("status {}", code),
        None => "no status (killed by signal)".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_mapping() {
        let err = BenchError::ConditioningIncomplete { stderr: String::new() };
        assert_eq!(err.stage(), Some(Stage::Fill));

        let err = BenchError::InvalidArgument("bad".into());
        assert_eq!(err.stage(), None);

        let err = BenchError::Spawn {
            stage: Stage::Measure,
            program: "./serializer-bench".into(),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        };
        assert_eq!(err.stage(), Some(Stage::Measure));
    }

    #[test]
    fn test_engine_failure_message_keeps_stderr() {
        let err = BenchError::EngineExecutionFailed {
            exit_code: Some(3),
            stderr: "assertion failed in extent manager".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("status 3"));
        assert!(msg.contains("assertion failed in extent manager"));
    }

    #[test]
    fn test_signal_exit_message() {
        let err = BenchError::ConditioningFailed {
            step: EraseStep::Erase,
            exit_code: None,
            stderr: String::new(),
        };
        assert!(err.to_string().contains("killed by signal"));
        assert!(err.to_string().contains("(erase)"));
    }
}
