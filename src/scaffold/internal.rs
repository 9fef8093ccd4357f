//! Internal implementation for the scaffold module

use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use super::{FileStatus, LocalScaffold, ScaffoldReport, BASELINE_FILES};
use crate::error::{BootstrapError, Result};

pub(crate) fn ensure_directory(path: &Path) -> Result<PathBuf> {
    fs::create_dir_all(path).map_err(|e| BootstrapError::local_io(path, e))?;
    Ok(path.to_path_buf())
}

pub(crate) fn write_file_if_absent(path: &Path, content: &str) -> Result<FileStatus> {
    // create_new fails on an existing file, so the check and the write are one step
    let mut file = match OpenOptions::new().write(true).create_new(true).open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::AlreadyExists => {
            tracing::debug!("Keeping existing {}", path.display());
            return Ok(FileStatus::Kept);
        }
        Err(e) => return Err(BootstrapError::local_io(path, e)),
    };

    file.write_all(content.as_bytes())
        .map_err(|e| BootstrapError::local_io(path, e))?;
    tracing::debug!("Wrote {}", path.display());
    Ok(FileStatus::Written)
}

pub(crate) fn materialize(scaffold: &LocalScaffold, name: &str) -> Result<ScaffoldReport> {
    let project = scaffold.ensure_directory(&scaffold.project_path(name))?;

    let mut files = Vec::with_capacity(BASELINE_FILES.len());
    for file in BASELINE_FILES {
        let status =
            scaffold.write_file_if_absent(&project.join(file.relative_path), file.content)?;
        files.push((file.relative_path.to_string(), status));
    }

    Ok(ScaffoldReport {
        path: project,
        files,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scaffold::{LICENSE_PLACEHOLDER, README_PLACEHOLDER};
    use tempfile::TempDir;

    #[test]
    fn test_ensure_directory_creates_parents() {
        let temp = TempDir::new().unwrap();
        let nested = temp.path().join("a").join("b").join("c");
        let created = ensure_directory(&nested).unwrap();
        assert_eq!(created, nested);
        assert!(nested.is_dir());
    }

    #[test]
    fn test_ensure_directory_is_idempotent() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("project");
        ensure_directory(&dir).unwrap();
        ensure_directory(&dir).unwrap();
        assert!(dir.is_dir());
    }

    #[test]
    fn test_write_file_if_absent_never_overwrites() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("README.md");
        fs::write(&path, "my own notes").unwrap();

        let status = write_file_if_absent(&path, "placeholder").unwrap();
        assert_eq!(status, FileStatus::Kept);
        assert_eq!(fs::read_to_string(&path).unwrap(), "my own notes");
    }

    #[test]
    fn test_write_file_into_missing_directory_is_local_io_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("missing").join("README.md");
        let err = write_file_if_absent(&path, "x").unwrap_err();
        assert!(matches!(err, BootstrapError::LocalIo { .. }));
    }

    #[test]
    fn test_scaffold_methods_create_then_keep() {
        let temp = TempDir::new().unwrap();
        let scaffold = LocalScaffold::new(temp.path());

        let dir = scaffold.ensure_directory(&scaffold.project_path("notes")).unwrap();
        let path = dir.join("TODO.md");
        assert_eq!(
            scaffold.write_file_if_absent(&path, "first").unwrap(),
            FileStatus::Written
        );
        assert_eq!(
            scaffold.write_file_if_absent(&path, "second").unwrap(),
            FileStatus::Kept
        );
        assert_eq!(fs::read_to_string(&path).unwrap(), "first");
    }

    #[test]
    fn test_materialize_writes_baseline_files() {
        let temp = TempDir::new().unwrap();
        let scaffold = LocalScaffold::new(temp.path());

        let report = scaffold.materialize("demo-repo").unwrap();
        assert_eq!(report.path, temp.path().join("demo-repo"));
        assert_eq!(report.written(), 2);
        assert_eq!(
            fs::read_to_string(report.path.join("README.md")).unwrap(),
            README_PLACEHOLDER
        );
        assert_eq!(
            fs::read_to_string(report.path.join("LICENSE")).unwrap(),
            LICENSE_PLACEHOLDER
        );

        let again = scaffold.materialize("demo-repo").unwrap();
        assert_eq!(again.written(), 0);
        assert!(again.files.iter().all(|(_, s)| *s == FileStatus::Kept));
    }
}
