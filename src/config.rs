//! Configuration stored in `~/.kickoff/config.toml`.
//!
//! Every section is optional; a missing file yields defaults. Command-line
//! flags are layered on top with [`KickoffConfig::apply`].

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{BootstrapError, Result};
use crate::forge::Visibility;
use crate::paths;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KickoffConfig {
    #[serde(default)]
    pub github: GitHubSection,
    #[serde(default)]
    pub project: ProjectSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitHubSection {
    /// Account that will own new repositories. Discovered from the token when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    /// REST API base URL
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Environment variable holding the access token
    #[serde(default = "default_token_env")]
    pub token_env: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_api_url() -> String {
    "https://api.github.com".to_string()
}
fn default_token_env() -> String {
    "GITHUB_ACCESS_TOKEN".to_string()
}
fn default_timeout_secs() -> u64 {
    30
}
fn default_user_agent() -> String {
    "kickoff-cli".to_string()
}

impl Default for GitHubSection {
    fn default() -> Self {
        Self {
            owner: None,
            api_url: default_api_url(),
            token_env: default_token_env(),
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

impl GitHubSection {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectSection {
    /// Parent directory for new projects (desktop by default)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workspace: Option<PathBuf>,
    #[serde(default = "default_description")]
    pub description: String,
    #[serde(default)]
    pub private: bool,
    /// Branch pushed to the new remote
    #[serde(default = "default_branch")]
    pub branch: String,
    #[serde(default = "default_commit_message")]
    pub commit_message: String,
}

fn default_description() -> String {
    "This is my new repository".to_string()
}
fn default_branch() -> String {
    "main".to_string()
}
fn default_commit_message() -> String {
    "Initial commit with README.md and LICENSE".to_string()
}

impl Default for ProjectSection {
    fn default() -> Self {
        Self {
            workspace: None,
            description: default_description(),
            private: false,
            branch: default_branch(),
            commit_message: default_commit_message(),
        }
    }
}

impl ProjectSection {
    pub fn workspace(&self) -> PathBuf {
        self.workspace
            .clone()
            .unwrap_or_else(paths::default_workspace)
    }

    pub fn visibility(&self) -> Visibility {
        if self.private {
            Visibility::Private
        } else {
            Visibility::Public
        }
    }
}

/// Values supplied on the command line. `None` leaves the file value alone.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub owner: Option<String>,
    pub api_url: Option<String>,
    pub workspace: Option<PathBuf>,
    pub description: Option<String>,
    pub branch: Option<String>,
    pub private: bool,
}

impl KickoffConfig {
    /// Load config from `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let content =
            std::fs::read_to_string(path).map_err(|e| BootstrapError::local_io(path, e))?;
        Self::parse(&content)
            .map_err(|e| BootstrapError::Configuration(format!("{}: {}", path.display(), e)))
    }

    /// Load `~/.kickoff/config.toml`
    pub fn load_default() -> Result<Self> {
        Self::load(&paths::config_path())
    }

    pub fn parse(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    pub fn apply(&mut self, overrides: ConfigOverrides) {
        if let Some(owner) = overrides.owner {
            self.github.owner = Some(owner);
        }
        if let Some(api_url) = overrides.api_url {
            self.github.api_url = api_url;
        }
        if let Some(workspace) = overrides.workspace {
            self.project.workspace = Some(workspace);
        }
        if let Some(description) = overrides.description {
            self.project.description = description;
        }
        if let Some(branch) = overrides.branch {
            self.project.branch = branch;
        }
        if overrides.private {
            self.project.private = true;
        }
    }
}
