//! Toolchain invocation.
//!
//! The build core only hands [`CommandLine`]s to an [`Invoker`] and reads back
//! a [`StepOutcome`]. [`ProcessInvoker`] spawns the real compiler.

use super::command::CommandLine;
use std::process::Command;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepOutcome {
    pub success: bool,
    pub elapsed: Duration,
    /// Captured compiler diagnostics (stderr), possibly empty.
    pub diagnostics: String,
}

pub trait Invoker: Sync {
    /// Runs one command to completion. A command that cannot be started is a
    /// failed step, not an error.
    fn invoke(&self, command: &CommandLine) -> StepOutcome;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessInvoker;

impl Invoker for ProcessInvoker {
    fn invoke(&self, command: &CommandLine) -> StepOutcome {
        let start = Instant::now();
        let output = Command::new(&command.program)
            .args(&command.args)
            .output();
        let elapsed = start.elapsed();

        match output {
            Ok(out) => StepOutcome {
                success: out.status.success(),
                elapsed,
                diagnostics: String::from_utf8_lossy(&out.stderr).to_string(),
            },
            Err(e) => StepOutcome {
                success: false,
                elapsed,
                diagnostics: format!("failed to execute '{}': {}", command.program, e),
            },
        }
    }
}
