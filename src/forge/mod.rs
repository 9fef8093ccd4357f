//! Forge abstraction for creating repositories and issues.
//!
//! "Do X": Check for, create, and ticket a repository on a forge platform.
//!
//! # Design
//!
//! - **ForgeClient**: the three remote operations a bootstrap needs, plus
//!   owner discovery
//! - **GitHubClient**: REST implementation over a blocking HTTP client
//! - **ForgeConnector**: builds a client once the credential is known
//!
//! # Example
//!
//! ```ignore
//! use kickoff::forge::{ForgeClient, GitHubClient};
//!
//! let client = GitHubClient::new(&settings, &credential)?;
//! if !client.repo_exists("octo", "demo-repo")? {
//!     // safe to create
//! }
//! ```

pub mod github;
mod types;

pub use github::{GitHubClient, GitHubConnector};
pub use types::*;

use crate::credential::Credential;
use crate::error::RemoteError;

/// Remote operations on a forge platform.
pub trait ForgeClient {
    /// Whether `owner/name` exists. Not-found is `Ok(false)`; anything
    /// other than found/not-found is an error.
    fn repo_exists(&self, owner: &str, name: &str) -> Result<bool, RemoteError>;

    /// Create a repository for the authenticated account.
    fn create_repo(&self, descriptor: &RepositoryDescriptor)
        -> Result<RemoteRepository, RemoteError>;

    /// File one issue against `owner/name`.
    fn create_issue(
        &self,
        owner: &str,
        name: &str,
        ticket: &IssueTicket,
    ) -> Result<CreatedIssue, RemoteError>;

    /// Login of the account the credential belongs to.
    fn current_user(&self) -> Result<String, RemoteError>;
}

impl<T: ForgeClient + ?Sized> ForgeClient for &T {
    fn repo_exists(&self, owner: &str, name: &str) -> Result<bool, RemoteError> {
        (**self).repo_exists(owner, name)
    }

    fn create_repo(
        &self,
        descriptor: &RepositoryDescriptor,
    ) -> Result<RemoteRepository, RemoteError> {
        (**self).create_repo(descriptor)
    }

    fn create_issue(
        &self,
        owner: &str,
        name: &str,
        ticket: &IssueTicket,
    ) -> Result<CreatedIssue, RemoteError> {
        (**self).create_issue(owner, name, ticket)
    }

    fn current_user(&self) -> Result<String, RemoteError> {
        (**self).current_user()
    }
}

/// Opens an authenticated [`ForgeClient`].
pub trait ForgeConnector {
    fn connect(&self, credential: &Credential) -> crate::error::Result<Box<dyn ForgeClient + '_>>;
}
