use std::fmt;

use crate::error::{CadenceError, Result};

/// An `owner/name` pair identifying a GitHub repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoRef {
    pub owner: String,
    pub name: String,
}

impl RepoRef {
    /// Resolves a `NAME` or `OWNER/NAME` identifier.
    ///
    /// An explicit owner always wins over `default_owner`. Anything after a
    /// second `/` is ignored.
    ///
    /// # Errors
    /// Returns [`CadenceError::Resolution`] when the identifier has no owner and
    /// no default owner is configured, or when either part is empty.
    pub fn resolve(identifier: &str, default_owner: Option<&str>) -> Result<Self> {
        let (owner, name) = match identifier.split_once('/') {
            Some((owner, rest)) => {
                let name = rest.split('/').next().unwrap_or(rest);
                (owner, name)
            }
            None => {
                let owner = default_owner
                    .filter(|o| !o.is_empty())
                    .ok_or_else(|| resolution_error(identifier, "--owner is unset"))?;
                (owner, identifier)
            }
        };

        if owner.is_empty() {
            return Err(resolution_error(identifier, "owner is empty"));
        }
        if name.is_empty() {
            return Err(resolution_error(identifier, "repository name is empty"));
        }

        Ok(Self {
            owner: owner.to_string(),
            name: name.to_string(),
        })
    }
}

fn resolution_error(identifier: &str, reason: &str) -> CadenceError {
    CadenceError::Resolution {
        identifier: identifier.to_string(),
        reason: reason.to_string(),
    }
}

impl fmt::Display for RepoRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}
