//! engine::tool
//!
//! Invocation of the wrapped external tool.
//!
//! # Design
//!
//! The runner only needs "run these arguments in this directory and tell me
//! the exit status", so that is the whole trait. [`ProcessTool`] spawns the
//! real executable with inherited stdio; tests substitute a recorder.

use std::path::{Path, PathBuf};
use std::process::Command;

use thiserror::Error;
use tracing::debug;

/// Errors launching the external tool.
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("failed to launch '{program}': {source}")]
    Launch {
        program: PathBuf,
        source: std::io::Error,
    },
}

/// Exit status of one tool invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolStatus {
    /// Exit code, or `None` if the process was terminated by a signal.
    pub code: Option<i32>,
}

impl ToolStatus {
    /// A zero exit status.
    pub const SUCCESS: ToolStatus = ToolStatus { code: Some(0) };

    /// Whether the invocation succeeded.
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Something that can run the external tool.
pub trait ExternalTool {
    /// Run the tool with `args` in `dir` and wait for it to exit.
    fn invoke(&self, args: &[String], dir: &Path) -> Result<ToolStatus, ToolError>;
}

/// The real executable, spawned as a child process.
#[derive(Debug, Clone)]
pub struct ProcessTool {
    program: PathBuf,
}

impl ProcessTool {
    /// Create a tool handle for `program` (a path, or a name looked up on `PATH`).
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl ExternalTool for ProcessTool {
    fn invoke(&self, args: &[String], dir: &Path) -> Result<ToolStatus, ToolError> {
        debug!(program = %self.program.display(), ?args, dir = %dir.display(), "invoking tool");

        let status = Command::new(&self.program)
            .args(args)
            .current_dir(dir)
            .status()
            .map_err(|e| ToolError::Launch {
                program: self.program.clone(),
                source: e,
            })?;

        debug!(code = ?status.code(), "tool exited");
        Ok(ToolStatus {
            code: status.code(),
        })
    }
}
