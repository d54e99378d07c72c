use std::fmt;

use thiserror::Error;

use crate::constants::TOKEN_ENV_VAR;

/// A long-lived GitHub token, exchanged for a Copilot session token before chatting.
#[derive(Clone)]
pub struct Credential {
    token: String,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CredentialError {
    #[error(
        "no GitHub token provided; pass one with --token or set the {0} environment variable"
    )]
    Missing(&'static str),
}

impl Credential {
    /// Resolve the credential from an explicit value, falling back to the process environment.
    pub fn resolve(explicit: Option<&str>) -> Result<Self, CredentialError> {
        Self::resolve_with(explicit, |name| std::env::var(name).ok())
    }

    /// Resolve the credential using a custom environment lookup.
    ///
    /// An explicit value always wins over the environment. Empty values count as absent.
    pub fn resolve_with<F>(explicit: Option<&str>, lookup: F) -> Result<Self, CredentialError>
    where
        F: FnOnce(&str) -> Option<String>,
    {
        let token = match explicit.filter(|value| !value.is_empty()) {
            Some(value) => Some(value.to_owned()),
            None => lookup(TOKEN_ENV_VAR),
        };
        token
            .filter(|value| !value.is_empty())
            .map(|token| Self { token })
            .ok_or(CredentialError::Missing(TOKEN_ENV_VAR))
    }

    /// From a raw token string.
    pub fn from_raw(token: &str) -> Self {
        Self {
            token: token.to_owned(),
        }
    }

    pub fn get(&self) -> &str {
        &self.token
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("token", &"<redacted>")
            .finish()
    }
}
