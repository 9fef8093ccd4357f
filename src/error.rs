use std::path::PathBuf;

use thiserror::Error;

/// Failure talking to the remote repository service.
#[derive(Error, Debug)]
pub enum RemoteError {
    #[error("{operation} failed with status {status}: {body}")]
    Status {
        operation: &'static str,
        status: u16,
        body: String,
    },

    #[error("{operation} timed out")]
    Timeout { operation: &'static str },

    #[error("{operation} request failed: {source}")]
    Transport {
        operation: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("{operation} returned an unexpected response: {detail}")]
    Decode {
        operation: &'static str,
        detail: String,
    },
}

impl RemoteError {
    /// Classify a reqwest failure, keeping timeouts distinct.
    pub fn from_reqwest(operation: &'static str, source: reqwest::Error) -> Self {
        if source.is_timeout() {
            RemoteError::Timeout { operation }
        } else {
            RemoteError::Transport { operation, source }
        }
    }

    /// HTTP status carried by this error, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            RemoteError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[derive(Error, Debug)]
pub enum BootstrapError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Remote error: {0}")]
    Remote(#[from] RemoteError),

    #[error("IO error at {}: {source}", path.display())]
    LocalIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("git {step} failed: {detail}")]
    Vcs { step: &'static str, detail: String },
}

impl BootstrapError {
    pub fn local_io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        BootstrapError::LocalIo {
            path: path.into(),
            source,
        }
    }
}

impl From<reqwest::header::InvalidHeaderValue> for BootstrapError {
    fn from(_: reqwest::header::InvalidHeaderValue) -> Self {
        BootstrapError::Configuration(
            "Access token contains characters not allowed in an HTTP header".to_string(),
        )
    }
}

pub type Result<T> = std::result::Result<T, BootstrapError>;
