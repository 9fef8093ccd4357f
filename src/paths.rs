//! Single source of truth for kickoff's filesystem layout.
//!
//! This module defines WHERE things live. It has no I/O, no validation,
//! no business logic.
//!
//! ```text
//! ~/.kickoff/
//! └── config.toml              # Global config
//!
//! <workspace>/                 # Desktop by default
//! └── <repo-name>/             # One scaffold per bootstrap run
//!     ├── README.md
//!     ├── LICENSE
//!     └── .git/
//! ```

use std::path::{Path, PathBuf};

/// Scaffold file names written into every new project.
pub const README_FILE: &str = "README.md";
pub const LICENSE_FILE: &str = "LICENSE";

/// User's kickoff home directory: `~/.kickoff/`
pub fn kickoff_home() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".kickoff")
}

/// Global config file: `~/.kickoff/config.toml`
pub fn config_path() -> PathBuf {
    kickoff_home().join("config.toml")
}

/// Default parent directory for new projects.
///
/// The desktop when the platform has one, else the home directory.
pub fn default_workspace() -> PathBuf {
    dirs::desktop_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Project directory for a repository: `<workspace>/<name>/`
pub fn project_dir(workspace: &Path, name: &str) -> PathBuf {
    workspace.join(name)
}
