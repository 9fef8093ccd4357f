//! GitHub ForgeClient implementation.
//!
//! "Do X": Create repositories and issues through the GitHub REST API.
//!
//! Talks to the API with a blocking reqwest client. Credential headers and
//! the request timeout are fixed when the client is built.
//! All request and response handling is hidden in internal.rs.

mod internal;

use reqwest::blocking::Client;

use super::{
    CreatedIssue, ForgeClient, ForgeConnector, IssueTicket, RemoteRepository,
    RepositoryDescriptor,
};
use crate::config::GitHubSection;
use crate::credential::Credential;
use crate::error::{RemoteError, Result};

/// Media type selecting the v3 REST API.
pub const ACCEPT_V3: &str = "application/vnd.github.v3+json";

/// GitHub implementation of ForgeClient.
pub struct GitHubClient {
    api_url: String,
    client: Client,
}

impl GitHubClient {
    pub fn new(settings: &GitHubSection, credential: &Credential) -> Result<Self> {
        let client = internal::build_client(settings, credential)?;
        Ok(Self {
            api_url: settings.api_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }
}

impl ForgeClient for GitHubClient {
    fn repo_exists(&self, owner: &str, name: &str) -> std::result::Result<bool, RemoteError> {
        internal::repo_exists(&self.client, &self.api_url, owner, name)
    }

    fn create_repo(
        &self,
        descriptor: &RepositoryDescriptor,
    ) -> std::result::Result<RemoteRepository, RemoteError> {
        internal::create_repo(&self.client, &self.api_url, descriptor)
    }

    fn create_issue(
        &self,
        owner: &str,
        name: &str,
        ticket: &IssueTicket,
    ) -> std::result::Result<CreatedIssue, RemoteError> {
        internal::create_issue(&self.client, &self.api_url, owner, name, ticket)
    }

    fn current_user(&self) -> std::result::Result<String, RemoteError> {
        internal::current_user(&self.client, &self.api_url)
    }
}

/// Builds [`GitHubClient`]s from configuration.
#[derive(Debug, Clone)]
pub struct GitHubConnector {
    settings: GitHubSection,
}

impl GitHubConnector {
    pub fn new(settings: GitHubSection) -> Self {
        Self { settings }
    }
}

impl ForgeConnector for GitHubConnector {
    fn connect(&self, credential: &Credential) -> Result<Box<dyn ForgeClient + '_>> {
        Ok(Box::new(GitHubClient::new(&self.settings, credential)?))
    }
}
