//! Git operations through the `git` executable

use std::path::Path;
use std::process::Command;

use super::{CommandOutput, CommandRunner, VersionControl, ORIGIN};
use crate::outcome::StepOutcome;

/// Runs commands as child processes.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, dir: &Path, program: &str, args: &[&str]) -> std::io::Result<CommandOutput> {
        let output = Command::new(program)
            .args(args)
            .current_dir(dir)
            .output()?;

        Ok(CommandOutput {
            code: output.status.code(),
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).trim().to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        })
    }
}

/// [`VersionControl`] backed by the git CLI.
#[derive(Debug, Clone, Default)]
pub struct GitClient<R = SystemRunner> {
    runner: R,
}

impl GitClient<SystemRunner> {
    pub fn system() -> Self {
        Self {
            runner: SystemRunner,
        }
    }
}

impl<R: CommandRunner> GitClient<R> {
    pub fn with_runner(runner: R) -> Self {
        Self { runner }
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    fn git(&self, dir: &Path, args: &[&str]) -> StepOutcome {
        tracing::debug!("git {} (in {})", args.join(" "), dir.display());

        let output = match self.runner.run(dir, "git", args) {
            Ok(output) => output,
            Err(e) => return StepOutcome::failed(format!("Failed to run git: {}", e)),
        };

        if output.success {
            let detail = if output.stdout.is_empty() {
                format!("git {}", args[0])
            } else {
                output.stdout
            };
            return StepOutcome::ok(detail);
        }

        let code = output
            .code
            .map(|c| format!("exit code {}", c))
            .unwrap_or_else(|| "terminated by signal".to_string());
        // git writes some failures (e.g. "nothing to commit") to stdout
        let message = if output.stderr.is_empty() {
            output.stdout
        } else {
            output.stderr
        };
        StepOutcome::failed(format!("{}: {}", code, message))
    }
}

impl<R: CommandRunner> VersionControl for GitClient<R> {
    fn init(&self, dir: &Path) -> StepOutcome {
        self.git(dir, &["init"])
    }

    fn stage_all(&self, dir: &Path) -> StepOutcome {
        self.git(dir, &["add", "."])
    }

    fn commit(&self, dir: &Path, message: &str) -> StepOutcome {
        self.git(dir, &["commit", "-m", message])
    }

    fn add_remote(&self, dir: &Path, url: &str) -> StepOutcome {
        self.git(dir, &["remote", "add", ORIGIN, url])
    }

    fn push(&self, dir: &Path, branch: &str) -> StepOutcome {
        let refspec = format!("HEAD:{}", branch);
        self.git(dir, &["push", "-u", ORIGIN, &refspec])
    }
}
