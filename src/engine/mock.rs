//! Mock process runner for testing
//!
//! This module provides a `ProcessRunner` that never spawns anything. Tests
//! script the outcome of each successive invocation and afterwards inspect
//! which invocations the harness made, making stage tests fast and
//! deterministic (and safe: nothing gets erased).
//!
//! # Example
//!
//! ```
//! use cleanbench::engine::{Invocation, ProcessOutcome, ProcessRunner};
//! use cleanbench::engine::mock::MockRunner;
//!
//! let runner = MockRunner::new();
//! runner.push_outcome(ProcessOutcome {
//!     stderr: "The test took 1.500 seconds.".to_string(),
//!     exit_code: Some(0),
//!     ..Default::default()
//! });
//!
//! let outcome = runner.run(&Invocation::new("./serializer-bench")).unwrap();
//! assert!(outcome.success());
//! assert_eq!(runner.invocation_count(), 1);
//! ```

use super::{Invocation, ProcessOutcome, ProcessRunner};
use std::collections::VecDeque;
use std::io;
use std::sync::{Arc, Mutex};

/// Mock runner
///
/// Outcomes are consumed in FIFO order, one per invocation. Running with an
/// empty script fails with `io::ErrorKind::Other`, so an unexpected extra
/// invocation shows up as a test failure.
#[derive(Clone, Default)]
pub struct MockRunner {
    /// Scripted results, front is returned next
    script: Arc<Mutex<VecDeque<Result<ProcessOutcome, io::ErrorKind>>>>,

    /// Every invocation seen, in order
    invocations: Arc<Mutex<Vec<Invocation>>>,
}

impl MockRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the outcome for the next invocation
    pub fn push_outcome(&self, outcome: ProcessOutcome) {
        self.script.lock().unwrap().push_back(Ok(outcome));
    }

    /// Queue a successful outcome with the given stderr text
    pub fn push_success(&self, stderr: &str) {
        self.push_outcome(ProcessOutcome {
            stdout: String::new(),
            stderr: stderr.to_string(),
            exit_code: Some(0),
        });
    }

    /// Queue a failed outcome with the given exit code and stderr text
    pub fn push_failure(&self, exit_code: i32, stderr: &str) {
        self.push_outcome(ProcessOutcome {
            stdout: String::new(),
            stderr: stderr.to_string(),
            exit_code: Some(exit_code),
        });
    }

    /// Queue a spawn failure for the next invocation
    pub fn push_spawn_error(&self, kind: io::ErrorKind) {
        self.script.lock().unwrap().push_back(Err(kind));
    }

    /// Copy of all invocations made so far
    pub fn invocations(&self) -> Vec<Invocation> {
        self.invocations.lock().unwrap().clone()
    }

    pub fn invocation_count(&self) -> usize {
        self.invocations.lock().unwrap().len()
    }

    /// Number of scripted outcomes not yet consumed
    pub fn remaining(&self) -> usize {
        self.script.lock().unwrap().len()
    }
}

impl ProcessRunner for MockRunner {
    fn run(&self, invocation: &Invocation) -> io::Result<ProcessOutcome> {
        self.invocations.lock().unwrap().push(invocation.clone());

        match self.script.lock().unwrap().pop_front() {
            Some(Ok(outcome)) => Ok(outcome),
            Some(Err(kind)) => Err(io::Error::new(kind, format!("mock spawn failure: {}", invocation))),
            None => Err(io::Error::new(
                io::ErrorKind::Other,
                format!("no scripted outcome for: {}", invocation),
            )),
        }
    }
}
