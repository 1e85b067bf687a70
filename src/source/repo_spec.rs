use super::UsageError;
use std::fmt;
use std::str::FromStr;

/// Ref checked out when a spec carries no `@ref` suffix
pub const DEFAULT_REF: &str = "HEAD";

/// A remote repository reference in `owner/name[@ref]` form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoSpec {
    pub owner: String,
    pub name: String,
    pub git_ref: String,
    raw: String,
}

impl RepoSpec {
    pub fn parse(raw: &str) -> Result<Self, UsageError> {
        let invalid = |reason: &'static str| UsageError::InvalidRepoSpec {
            spec: raw.to_string(),
            reason,
        };

        let trimmed = raw.trim();
        let (owner, name_ref) = trimmed
            .split_once('/')
            .ok_or_else(|| invalid("expected owner/name"))?;

        let (name, git_ref) = match name_ref.split_once('@') {
            Some((name, git_ref)) => (name, git_ref),
            None => (name_ref, DEFAULT_REF),
        };

        if owner.is_empty() {
            return Err(invalid("owner is empty"));
        }
        if name.is_empty() {
            return Err(invalid("repository name is empty"));
        }
        if name.contains('/') {
            return Err(invalid("repository name must not contain '/'"));
        }
        if git_ref.is_empty() {
            return Err(invalid("ref after '@' is empty"));
        }

        Ok(Self {
            owner: owner.to_string(),
            name: name.to_string(),
            git_ref: git_ref.to_string(),
            raw: trimmed.to_string(),
        })
    }

    /// The spec exactly as the user wrote it
    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl FromStr for RepoSpec {
    type Err = UsageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for RepoSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}
