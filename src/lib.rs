//! # kickoff - bootstrap a new project in one command
//!
//! Checks that a repository name is free on GitHub, scaffolds a local
//! directory with placeholder files, makes the first commit, creates the
//! remote repository, pushes, and files two tracking issues.
//!
//! ## Modules
//!
//! - [`bootstrap`]: The orchestrated workflow and its failure policy
//! - [`forge`]: Remote repository operations (GitHub REST)
//! - [`git`]: Local version-control steps
//! - [`scaffold`]: Non-destructive project directory creation
//! - [`credential`]: Access token resolution
//! - [`config`]: `~/.kickoff/config.toml` loading

pub mod bootstrap;
pub mod config;
pub mod credential;
pub mod error;
pub mod forge;
pub mod git;
pub mod logging;
pub mod outcome;
pub mod paths;
pub mod scaffold;

// Re-export commonly used types
pub use bootstrap::{Bootstrap, BootstrapReport, BootstrapSettings};
pub use error::{BootstrapError, RemoteError, Result};
pub use outcome::StepOutcome;
