//! Local version control for a freshly scaffolded project.
//!
//! Handles:
//! - Repository initialization and the first commit
//! - Registering the `origin` remote
//! - Pushing the primary branch
//!
//! Every step reports a [`StepOutcome`] built from the command's exit status.
//! Callers turn a failed outcome into a VCS error with [`require`] and stop
//! there, so nothing is pushed on top of a broken local history.

mod operations;

pub use operations::{GitClient, SystemRunner};

use std::path::Path;

use crate::error::{BootstrapError, Result};
use crate::outcome::StepOutcome;

/// Name of the remote registered for the new repository.
pub const ORIGIN: &str = "origin";

/// Captured result of an external command.
#[derive(Debug, Clone, Default)]
pub struct CommandOutput {
    /// Exit code, `None` when the process was killed by a signal
    pub code: Option<i32>,
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

/// Runs external commands. The seam tests replace.
pub trait CommandRunner {
    fn run(&self, dir: &Path, program: &str, args: &[&str]) -> std::io::Result<CommandOutput>;
}

/// The five local version-control steps of a bootstrap.
pub trait VersionControl {
    fn init(&self, dir: &Path) -> StepOutcome;

    fn stage_all(&self, dir: &Path) -> StepOutcome;

    fn commit(&self, dir: &Path, message: &str) -> StepOutcome;

    /// Register `url` as the `origin` remote.
    fn add_remote(&self, dir: &Path, url: &str) -> StepOutcome;

    /// Push the current HEAD to `branch` on `origin` and track it.
    fn push(&self, dir: &Path, branch: &str) -> StepOutcome;
}

/// Convert a failed step into a VCS error.
pub fn require(step: &'static str, outcome: StepOutcome) -> Result<StepOutcome> {
    if outcome.succeeded {
        Ok(outcome)
    } else {
        Err(BootstrapError::Vcs {
            step,
            detail: outcome.detail,
        })
    }
}
