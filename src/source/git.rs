//! Shallow git fetch of a single ref

use super::{FetchError, RepoSpec, RepositoryFetcher};
use async_trait::async_trait;
use std::ffi::OsString;
use std::path::Path;
use tokio::process::Command;
use tracing::{debug, info};

pub const DEFAULT_GIT_BASE_URL: &str = "https://github.com";

/// Clones `{base_url}/{owner}/{name}.git` with depth 1 and no blobs, then
/// materializes the requested ref.
#[derive(Debug, Clone)]
pub struct GitFetcher {
    base_url: String,
    program: String,
}

impl Default for GitFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl GitFetcher {
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_GIT_BASE_URL.to_string(),
            program: "git".to_string(),
        }
    }

    /// Points the fetcher at another host, or at a `file://` directory of bare repos
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    pub fn clone_url(&self, spec: &RepoSpec) -> String {
        format!(
            "{}/{}/{}.git",
            self.base_url.trim_end_matches('/'),
            spec.owner,
            spec.name
        )
    }

    /// The four git invocations, in order, as argument lists
    pub fn commands(&self, spec: &RepoSpec, dest: &Path) -> Vec<Vec<OsString>> {
        let dir = dest.as_os_str().to_os_string();
        let in_dir = |args: &[&str]| {
            let mut full: Vec<OsString> = vec!["-C".into(), dir.clone()];
            full.extend(args.iter().map(OsString::from));
            full
        };

        vec![
            vec![
                "clone".into(),
                "--depth".into(),
                "1".into(),
                "--filter=blob:none".into(),
                "--no-checkout".into(),
                self.clone_url(spec).into(),
                dir.clone(),
            ],
            in_dir(&["checkout", spec.git_ref.as_str()]),
            in_dir(&["sparse-checkout", "set", "--no-cone", "."]),
            in_dir(&["checkout"]),
        ]
    }

    async fn run(&self, args: &[OsString]) -> Result<(), FetchError> {
        let step = args
            .iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect::<Vec<_>>()
            .join(" ");
        debug!(command = %step, "Running git");

        let output = Command::new(&self.program)
            .args(args)
            .output()
            .await
            .map_err(|source| FetchError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if output.status.success() {
            Ok(())
        } else {
            Err(FetchError::CommandFailed {
                step,
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            })
        }
    }
}

#[async_trait]
impl RepositoryFetcher for GitFetcher {
    async fn fetch(&self, spec: &RepoSpec, dest: &Path) -> Result<(), FetchError> {
        info!(repo = %spec, url = %self.clone_url(spec), "Fetching repository");
        for args in self.commands(spec, dest) {
            self.run(&args).await?;
        }
        Ok(())
    }
}
