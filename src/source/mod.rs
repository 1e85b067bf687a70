//! Where a run reads its files from: a local folder or a fetched repository

mod git;
mod repo_spec;

pub use git::{GitFetcher, DEFAULT_GIT_BASE_URL};
pub use repo_spec::{RepoSpec, DEFAULT_REF};

use async_trait::async_trait;
use std::io;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use thiserror::Error;
use tracing::debug;

/// Prefix of the temporary directory a remote repository is fetched into
pub const TEMP_DIR_PREFIX: &str = "readmegen_repo_";

/// Problems with how a run was requested, detected before any work starts
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum UsageError {
    #[error("one of --path or --repo is required")]
    MissingSource,

    #[error("--path and --repo cannot be used together")]
    ConflictingSources,

    #[error("invalid repository spec '{spec}': {reason}")]
    InvalidRepoSpec { spec: String, reason: &'static str },

    #[error("cannot use '{path}' as project folder: {reason}")]
    InvalidPath { path: PathBuf, reason: String },
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("failed to create temporary directory: {0}")]
    TempDir(#[source] io::Error),

    #[error("failed to launch {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("`git {step}` exited with {status}: {stderr}")]
    CommandFailed {
        step: String,
        status: String,
        stderr: String,
    },

    #[error("fetch failed: {0}")]
    Other(String),
}

/// Materializes a repository's tree at a ref into a directory
#[async_trait]
pub trait RepositoryFetcher: Send + Sync {
    /// `dest` exists and is empty when this is called
    async fn fetch(&self, spec: &RepoSpec, dest: &Path) -> Result<(), FetchError>;
}

/// Exactly one input per run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Local(PathBuf),
    Remote(RepoSpec),
}

impl Source {
    pub fn from_options(path: Option<PathBuf>, repo: Option<&str>) -> Result<Self, UsageError> {
        match (path, repo) {
            (Some(_), Some(_)) => Err(UsageError::ConflictingSources),
            (None, None) => Err(UsageError::MissingSource),
            (Some(path), None) => Ok(Source::Local(path)),
            (None, Some(repo)) => Ok(Source::Remote(RepoSpec::parse(repo)?)),
        }
    }
}

/// The folder a run scans. A fetched repository lives in a [`TempDir`] that
/// is removed when this value is dropped.
#[derive(Debug)]
pub enum WorkingRoot {
    Local(PathBuf),
    Remote { spec: RepoSpec, dir: TempDir },
}

impl WorkingRoot {
    pub fn path(&self) -> &Path {
        match self {
            WorkingRoot::Local(path) => path,
            WorkingRoot::Remote { dir, .. } => dir.path(),
        }
    }

    pub fn is_temporary(&self) -> bool {
        matches!(self, WorkingRoot::Remote { .. })
    }

    /// Resolves a local folder to an absolute directory path
    pub fn local(path: &Path) -> Result<Self, UsageError> {
        let resolved = path.canonicalize().map_err(|e| UsageError::InvalidPath {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        if !resolved.is_dir() {
            return Err(UsageError::InvalidPath {
                path: path.to_path_buf(),
                reason: "not a directory".to_string(),
            });
        }
        Ok(WorkingRoot::Local(resolved))
    }

    /// Creates a fresh temporary directory and fetches `spec` into it.
    ///
    /// On failure the directory is dropped, and so removed, before returning.
    pub async fn fetch(
        fetcher: &dyn RepositoryFetcher,
        spec: &RepoSpec,
    ) -> Result<Self, FetchError> {
        let dir = tempfile::Builder::new()
            .prefix(TEMP_DIR_PREFIX)
            .tempdir()
            .map_err(FetchError::TempDir)?;
        debug!(dir = %dir.path().display(), repo = %spec, "Created temporary checkout directory");

        fetcher.fetch(spec, dir.path()).await?;

        Ok(WorkingRoot::Remote {
            spec: spec.clone(),
            dir,
        })
    }
}
