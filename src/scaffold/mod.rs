//! Local project scaffold.
//!
//! "Do X": Materialize a project directory with baseline placeholder files.
//!
//! Both operations are safe to repeat. Directories are created with
//! `mkdir -p` semantics and files are only written when absent, so a README
//! the user already edited survives any number of runs.
//!
//! # Example
//!
//! ```no_run
//! use kickoff::scaffold::LocalScaffold;
//! use std::path::Path;
//!
//! let scaffold = LocalScaffold::new(Path::new("/tmp/workspace"));
//! let report = scaffold.materialize("demo-repo")?;
//! println!("Project at {}", report.path.display());
//! # Ok::<(), kickoff::BootstrapError>(())
//! ```

mod internal;

use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::paths;

/// Placeholder README content.
pub const README_PLACEHOLDER: &str =
    "# My Data Analysis Project\n\nFill in your project description here.\n";

/// Placeholder LICENSE content.
pub const LICENSE_PLACEHOLDER: &str = "License terms to be defined here.\n";

/// A file the scaffold places in every new project.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScaffoldFile {
    pub relative_path: &'static str,
    pub content: &'static str,
}

/// The fixed set of baseline files.
pub const BASELINE_FILES: [ScaffoldFile; 2] = [
    ScaffoldFile {
        relative_path: paths::README_FILE,
        content: README_PLACEHOLDER,
    },
    ScaffoldFile {
        relative_path: paths::LICENSE_FILE,
        content: LICENSE_PLACEHOLDER,
    },
];

/// What happened to a single scaffold file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FileStatus {
    Written,
    /// Already present, left untouched
    Kept,
}

impl FileStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            FileStatus::Written => "written",
            FileStatus::Kept => "kept",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ScaffoldReport {
    pub path: PathBuf,
    pub files: Vec<(String, FileStatus)>,
}

impl ScaffoldReport {
    pub fn written(&self) -> usize {
        self.files
            .iter()
            .filter(|(_, status)| *status == FileStatus::Written)
            .count()
    }
}

/// Creates project directories under a workspace root.
#[derive(Debug, Clone)]
pub struct LocalScaffold {
    workspace: PathBuf,
}

impl LocalScaffold {
    pub fn new(workspace: &Path) -> Self {
        Self {
            workspace: workspace.to_path_buf(),
        }
    }

    pub fn workspace(&self) -> &Path {
        &self.workspace
    }

    /// Directory a project named `name` will live in.
    pub fn project_path(&self, name: &str) -> PathBuf {
        paths::project_dir(&self.workspace, name)
    }

    /// Create `path` and any missing parents. Succeeds silently if it exists.
    pub fn ensure_directory(&self, path: &Path) -> Result<PathBuf> {
        internal::ensure_directory(path)
    }

    /// Write `content` to `path` only when no file exists there yet.
    pub fn write_file_if_absent(&self, path: &Path, content: &str) -> Result<FileStatus> {
        internal::write_file_if_absent(path, content)
    }

    /// Ensure the project directory and write every baseline file that is missing.
    pub fn materialize(&self, name: &str) -> Result<ScaffoldReport> {
        internal::materialize(self, name)
    }
}
