//! Internal implementation for GitHubClient.
//!
//! Contains REST calls, status mapping and JSON types.
//! Not exposed in public interface.

use reqwest::blocking::{Client, Response};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

use super::ACCEPT_V3;
use crate::config::GitHubSection;
use crate::credential::Credential;
use crate::error::{BootstrapError, RemoteError};
use crate::forge::{CreatedIssue, IssueTicket, RemoteRepository, RepositoryDescriptor};

const EXISTS: &str = "existence check";
const CREATE_REPO: &str = "create repository";
const CREATE_ISSUE: &str = "create issue";
const CURRENT_USER: &str = "current user lookup";

// ============================================================================
// GitHub JSON types (internal, match REST payloads)
// ============================================================================

#[derive(Debug, Serialize)]
struct CreateRepoRequest<'a> {
    name: &'a str,
    description: &'a str,
    private: bool,
}

#[derive(Debug, Serialize)]
struct CreateIssueRequest<'a> {
    title: &'a str,
    body: &'a str,
}

#[derive(Debug, Deserialize)]
struct GhUser {
    login: String,
}

// ============================================================================
// Client construction
// ============================================================================

pub(crate) fn build_client(
    settings: &GitHubSection,
    credential: &Credential,
) -> Result<Client, BootstrapError> {
    let mut auth = HeaderValue::from_str(&format!("token {}", credential.expose()))?;
    auth.set_sensitive(true);

    let mut headers = HeaderMap::new();
    headers.insert(AUTHORIZATION, auth);
    headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_V3));

    Client::builder()
        .user_agent(settings.user_agent.as_str())
        .default_headers(headers)
        .timeout(settings.timeout())
        .build()
        .map_err(|e| BootstrapError::Configuration(format!("Failed to create HTTP client: {}", e)))
}

// ============================================================================
// Operations (called by GitHubClient)
// ============================================================================

pub(crate) fn repo_exists(
    client: &Client,
    api_url: &str,
    owner: &str,
    name: &str,
) -> Result<bool, RemoteError> {
    let url = format!("{}/repos/{}/{}", api_url, owner, name);
    tracing::debug!("GET {}", url);

    let response = client
        .get(&url)
        .send()
        .map_err(|e| RemoteError::from_reqwest(EXISTS, e))?;

    match response.status() {
        StatusCode::OK => Ok(true),
        StatusCode::NOT_FOUND => Ok(false),
        _ => Err(status_error(EXISTS, response)),
    }
}

pub(crate) fn create_repo(
    client: &Client,
    api_url: &str,
    descriptor: &RepositoryDescriptor,
) -> Result<RemoteRepository, RemoteError> {
    let url = format!("{}/user/repos", api_url);
    tracing::debug!("POST {} ({})", url, descriptor.name);

    let response = client
        .post(&url)
        .json(&CreateRepoRequest {
            name: &descriptor.name,
            description: &descriptor.description,
            private: descriptor.visibility.is_private(),
        })
        .send()
        .map_err(|e| RemoteError::from_reqwest(CREATE_REPO, e))?;

    if response.status() != StatusCode::CREATED {
        return Err(status_error(CREATE_REPO, response));
    }
    decode(CREATE_REPO, response)
}

pub(crate) fn create_issue(
    client: &Client,
    api_url: &str,
    owner: &str,
    name: &str,
    ticket: &IssueTicket,
) -> Result<CreatedIssue, RemoteError> {
    let url = format!("{}/repos/{}/{}/issues", api_url, owner, name);
    tracing::debug!("POST {} ({})", url, ticket.title);

    let response = client
        .post(&url)
        .json(&CreateIssueRequest {
            title: &ticket.title,
            body: &ticket.body,
        })
        .send()
        .map_err(|e| RemoteError::from_reqwest(CREATE_ISSUE, e))?;

    if response.status() != StatusCode::CREATED {
        return Err(status_error(CREATE_ISSUE, response));
    }
    // 201 is the success signal; the body only adds detail
    match decode(CREATE_ISSUE, response) {
        Ok(issue) => Ok(issue),
        Err(e) => {
            tracing::warn!("Issue '{}' created but response unreadable: {}", ticket.title, e);
            Ok(CreatedIssue {
                number: None,
                html_url: None,
            })
        }
    }
}

pub(crate) fn current_user(client: &Client, api_url: &str) -> Result<String, RemoteError> {
    let url = format!("{}/user", api_url);
    tracing::debug!("GET {}", url);

    let response = client
        .get(&url)
        .send()
        .map_err(|e| RemoteError::from_reqwest(CURRENT_USER, e))?;

    if !response.status().is_success() {
        return Err(status_error(CURRENT_USER, response));
    }
    let user: GhUser = decode(CURRENT_USER, response)?;
    Ok(user.login)
}

// ============================================================================
// Response helpers
// ============================================================================

fn status_error(operation: &'static str, response: Response) -> RemoteError {
    let status = response.status().as_u16();
    let body = response.text().unwrap_or_default();
    RemoteError::Status {
        operation,
        status,
        body,
    }
}

fn decode<T: for<'de> Deserialize<'de>>(
    operation: &'static str,
    response: Response,
) -> Result<T, RemoteError> {
    let body = response
        .text()
        .map_err(|e| RemoteError::from_reqwest(operation, e))?;
    serde_json::from_str(&body).map_err(|e| RemoteError::Decode {
        operation,
        detail: e.to_string(),
    })
}
