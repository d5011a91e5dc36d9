//! External process abstraction
//!
//! The harness never links against the storage engine or the erase utility;
//! it drives both as child processes. This module defines what one
//! invocation looks like (`Invocation`), what comes back (`ProcessOutcome`),
//! and the `ProcessRunner` trait that executes it.
//!
//! # Runners
//!
//! - **SystemRunner**: spawns the program with `std::process::Command`,
//!   blocking until it exits and both output streams are drained
//! - **MockRunner**: replays scripted outcomes and records invocations (tests)
//!
//! # Example
//!
//! ```no_run
//! use cleanbench::engine::{Invocation, ProcessRunner, SystemRunner};
//!
//! let runner = SystemRunner;
//! let invocation = Invocation::new("./serializer-bench").arg("--help");
//! let outcome = runner.run(&invocation)?;
//! println!("exit code: {:?}", outcome.exit_code);
//! # Ok::<(), std::io::Error>(())
//! ```

pub mod args;
pub mod mock;

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// One external program invocation (no shell involved)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: PathBuf,
    pub args: Vec<String>,
}

impl Invocation {
    pub fn new(program: impl AsRef<Path>) -> Self {
        Self {
            program: program.as_ref().to_path_buf(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Program name for error messages
    pub fn program_name(&self) -> String {
        self.program.display().to_string()
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program.display())?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// Captured result of one finished invocation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessOutcome {
    pub stdout: String,
    pub stderr: String,
    /// Exit code; `None` if the process was terminated by a signal
    pub exit_code: Option<i32>,
}

impl ProcessOutcome {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Executes invocations to completion
///
/// Implementations must block until the process has exited and its output
/// streams are fully drained. There is no timeout.
pub trait ProcessRunner {
    /// Run the invocation, returning its captured outcome
    ///
    /// # Errors
    ///
    /// Returns an error only if the process could not be started or its
    /// output could not be collected. A non-zero exit is not an error here.
    fn run(&self, invocation: &Invocation) -> io::Result<ProcessOutcome>;
}

/// Runner that spawns real child processes
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl ProcessRunner for SystemRunner {
    fn run(&self, invocation: &Invocation) -> io::Result<ProcessOutcome> {
        let output = Command::new(&invocation.program)
            .args(&invocation.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()?;

        Ok(ProcessOutcome {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            exit_code: output.status.code(),
        })
    }
}
