//! Access credential resolution.
//!
//! The credential value is handed in at construction. Reading it from the
//! process environment is the binary's job, so tests can substitute any value.

use std::fmt;

use crate::error::{BootstrapError, Result};

/// Opaque access token. Never printed.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}

/// Supplies the single access credential for a run.
pub trait CredentialSource {
    fn get(&self) -> Result<Credential>;
}

/// Credential taken from an externally supplied configuration value.
#[derive(Clone)]
pub struct ConfiguredCredential {
    /// Where the value came from, used in error messages (e.g. an env var name).
    origin: String,
    value: Option<String>,
}

impl ConfiguredCredential {
    pub fn new(origin: impl Into<String>, value: Option<String>) -> Self {
        Self {
            origin: origin.into(),
            value,
        }
    }
}

impl CredentialSource for ConfiguredCredential {
    fn get(&self) -> Result<Credential> {
        match self.value.as_deref().map(str::trim) {
            Some(token) if !token.is_empty() => Ok(Credential(token.to_string())),
            Some(_) => Err(BootstrapError::Configuration(format!(
                "{} is set but empty",
                self.origin
            ))),
            None => Err(BootstrapError::Configuration(format!(
                "Please set {} to a GitHub access token",
                self.origin
            ))),
        }
    }
}
