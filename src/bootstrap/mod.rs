//! End-to-end project bootstrap.
//!
//! "Do X": Turn a repository name into a local project, a remote repository
//! and two tracking issues, or stop cleanly when that is not safe.
//!
//! # Stages
//!
//! ```text
//! Start → CredentialResolved → ExistenceChecked → Aborted
//!                                               → ScaffoldBuilt → LocalCommitted
//! LocalCommitted → CreationFailed
//! LocalCommitted → RemoteCreated → PushedAndTicketed → Done
//! ```
//!
//! # Failure policy
//!
//! - Configuration and filesystem errors abort at once.
//! - Any remote error during the existence check aborts. The state of the
//!   remote is unknown, so nothing is created.
//! - A failed repository creation stops before push and issues. The local
//!   scaffold and commit stay in place.
//! - A failed git step stops the remaining git and push steps.
//! - Issue failures are reported per ticket and never abort the run.
//!
//! The existence check is the only guard against creating the same
//! repository twice. Two runs racing on one name can both pass it.
//!
//! # Example
//!
//! ```ignore
//! use kickoff::bootstrap::{Bootstrap, BootstrapSettings, TracingReporter};
//!
//! let bootstrap = Bootstrap::new(settings, &credentials, &connector, &git, &TracingReporter);
//! let report = bootstrap.run("demo-repo")?;
//! ```

mod internal;

use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

use crate::config::KickoffConfig;
use crate::credential::CredentialSource;
use crate::error::Result;
use crate::forge::{CreatedIssue, ForgeConnector, RemoteRepository, Visibility};
use crate::git::VersionControl;
use crate::outcome::StepOutcome;
use crate::scaffold::{LocalScaffold, ScaffoldReport};

/// Workflow states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Start,
    CredentialResolved,
    ExistenceChecked,
    Aborted,
    ScaffoldBuilt,
    LocalCommitted,
    RemoteCreated,
    CreationFailed,
    PushedAndTicketed,
    Done,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Start => "start",
            Stage::CredentialResolved => "credential",
            Stage::ExistenceChecked => "existence check",
            Stage::Aborted => "aborted",
            Stage::ScaffoldBuilt => "scaffold",
            Stage::LocalCommitted => "local commit",
            Stage::RemoteCreated => "remote repository",
            Stage::CreationFailed => "creation failed",
            Stage::PushedAndTicketed => "push and tickets",
            Stage::Done => "done",
        };
        f.write_str(name)
    }
}

/// One step's result, emitted as it happens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BootstrapEvent {
    pub stage: Stage,
    pub step: String,
    pub outcome: StepOutcome,
}

/// Observes stage events. Presentation lives behind this trait.
pub trait Reporter {
    fn report(&self, event: &BootstrapEvent);
}

/// Writes every event to the tracing subscriber.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn report(&self, event: &BootstrapEvent) {
        match (event.outcome.succeeded, event.stage) {
            (true, _) => {
                tracing::info!(stage = %event.stage, "{}: {}", event.step, event.outcome.detail)
            }
            (false, Stage::CreationFailed) => {
                tracing::error!(stage = %event.stage, "{}: {}", event.step, event.outcome.detail)
            }
            (false, _) => {
                tracing::warn!(stage = %event.stage, "{}: {}", event.step, event.outcome.detail)
            }
        }
    }
}

/// Per-run settings.
#[derive(Debug, Clone)]
pub struct BootstrapSettings {
    /// Account owning the repository. Asked from the forge when `None`.
    pub owner: Option<String>,
    pub workspace: PathBuf,
    pub description: String,
    pub visibility: Visibility,
    pub branch: String,
    pub commit_message: String,
}

impl BootstrapSettings {
    pub fn from_config(config: &KickoffConfig) -> Self {
        Self {
            owner: config.github.owner.clone(),
            workspace: config.project.workspace(),
            description: config.project.description.clone(),
            visibility: config.project.visibility(),
            branch: config.project.branch.clone(),
            commit_message: config.project.commit_message.clone(),
        }
    }
}

/// Outcome of one tracking ticket.
#[derive(Debug, Clone, Serialize)]
pub struct TicketOutcome {
    pub title: String,
    pub outcome: StepOutcome,
    pub issue: Option<CreatedIssue>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BootstrapOutcome {
    /// The repository was already there; nothing was touched.
    AlreadyExists,
    Completed,
}

/// Summary of a run that reached a terminal state without error.
#[derive(Debug, Clone, Serialize)]
pub struct BootstrapReport {
    pub owner: String,
    pub name: String,
    pub outcome: BootstrapOutcome,
    pub scaffold: Option<ScaffoldReport>,
    pub remote: Option<RemoteRepository>,
    pub tickets: Vec<TicketOutcome>,
}

impl BootstrapReport {
    pub fn tickets_filed(&self) -> usize {
        self.tickets.iter().filter(|t| t.outcome.succeeded).count()
    }
}

/// Result of an existence-only check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Availability {
    pub owner: String,
    pub name: String,
    pub exists: bool,
}

/// Runs the bootstrap workflow against injected collaborators.
pub struct Bootstrap<'a> {
    settings: BootstrapSettings,
    scaffold: LocalScaffold,
    credentials: &'a dyn CredentialSource,
    connector: &'a dyn ForgeConnector,
    vcs: &'a dyn VersionControl,
    reporter: &'a dyn Reporter,
}

impl<'a> Bootstrap<'a> {
    pub fn new(
        settings: BootstrapSettings,
        credentials: &'a dyn CredentialSource,
        connector: &'a dyn ForgeConnector,
        vcs: &'a dyn VersionControl,
        reporter: &'a dyn Reporter,
    ) -> Self {
        let scaffold = LocalScaffold::new(&settings.workspace);
        Self {
            settings,
            scaffold,
            credentials,
            connector,
            vcs,
            reporter,
        }
    }

    pub fn settings(&self) -> &BootstrapSettings {
        &self.settings
    }

    /// Bootstrap repository `name` end to end.
    ///
    /// Returns `Ok` with [`BootstrapOutcome::AlreadyExists`] when the guard
    /// stops the run, and `Err` for every terminal failure.
    pub fn run(&self, name: &str) -> Result<BootstrapReport> {
        internal::run(self, name)
    }

    /// Resolve the credential and owner, then only evaluate the existence guard.
    pub fn check(&self, name: &str) -> Result<Availability> {
        internal::check(self, name)
    }
}
