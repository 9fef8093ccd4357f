//! Domain types for the forge abstraction.
//!
//! Platform-agnostic descriptions of what gets created remotely.

use serde::{Deserialize, Serialize};

use crate::error::{BootstrapError, Result};

/// Repository visibility on the forge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    #[default]
    Public,
    Private,
}

impl Visibility {
    pub fn is_private(self) -> bool {
        self == Visibility::Private
    }
}

/// Everything needed to create a repository. Identity on the forge is (owner, name).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepositoryDescriptor {
    pub name: String,
    pub description: String,
    pub visibility: Visibility,
}

impl RepositoryDescriptor {
    /// Build a descriptor, rejecting names that are empty or unsafe as a directory name.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        visibility: Visibility,
    ) -> Result<Self> {
        let name = name.into();
        validate_repo_name(&name)?;
        Ok(Self {
            name,
            description: description.into(),
            visibility,
        })
    }
}

/// Check that `name` is usable both as a repository name and as a directory name.
pub fn validate_repo_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(BootstrapError::Configuration(
            "Repository name must not be empty".to_string(),
        ));
    }
    if name == "." || name == ".." {
        return Err(BootstrapError::Configuration(format!(
            "'{}' is not a valid repository name",
            name
        )));
    }
    if let Some(bad) = name
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.')))
    {
        return Err(BootstrapError::Configuration(format!(
            "Repository name '{}' contains invalid character '{}'",
            name, bad
        )));
    }
    Ok(())
}

/// A repository that now exists on the forge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteRepository {
    pub clone_url: String,
    #[serde(default)]
    pub html_url: Option<String>,
}

/// Issue to file against the new repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IssueTicket {
    pub title: String,
    pub body: String,
}

impl IssueTicket {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
        }
    }
}

/// Issue as reported back by the forge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedIssue {
    /// Issue number, when the response body carried one
    #[serde(default)]
    pub number: Option<i64>,
    #[serde(default)]
    pub html_url: Option<String>,
}

/// The two tracking tickets filed on every new repository.
pub fn tracking_tickets() -> Vec<IssueTicket> {
    vec![
        IssueTicket::new(
            "Ticket 1: Initial setup",
            "This ticket tracks the initial setup of the repository.",
        ),
        IssueTicket::new(
            "Ticket 2: Add a data cleaning module",
            "Implement the data cleaning module for the project.",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_names() {
        for name in ["demo-repo", "my_project", "v1.2", "A"] {
            assert!(validate_repo_name(name).is_ok(), "{name} should be valid");
        }
    }

    #[test]
    fn test_invalid_names() {
        for name in ["", ".", "..", "a/b", "../escape", "with space", "ünïcode"] {
            assert!(
                matches!(
                    validate_repo_name(name),
                    Err(BootstrapError::Configuration(_))
                ),
                "{name:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_descriptor_defaults_public() {
        let descriptor =
            RepositoryDescriptor::new("demo-repo", "desc", Visibility::default()).unwrap();
        assert!(!descriptor.visibility.is_private());
    }

    #[test]
    fn test_two_distinct_tracking_tickets() {
        let tickets = tracking_tickets();
        assert_eq!(tickets.len(), 2);
        assert_ne!(tickets[0].title, tickets[1].title);
        assert!(tickets.iter().all(|t| !t.body.is_empty()));
    }
}
