//! Shared fixtures for integration tests

use async_trait::async_trait;
use readmegen::{
    FetchError, MockLLMClient, PromptClient, ReadmeOrchestrator, RepoSpec, RepositoryFetcher,
    TemplateRenderer,
};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Writes `files` (relative path, contents) under `root`, creating parents
pub fn write_tree(root: &Path, files: &[(&str, &str)]) {
    for (rel, contents) in files {
        let path = root.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, contents).unwrap();
    }
}

/// Stands in for a git clone: writes a fixed tree into the destination and
/// remembers where that was.
pub struct FixtureFetcher {
    files: Vec<(String, String)>,
    links: Vec<(String, PathBuf)>,
    fail: bool,
    dest: Mutex<Option<PathBuf>>,
}

#[allow(dead_code)]
impl FixtureFetcher {
    pub fn new(files: &[(&str, &str)]) -> Self {
        Self {
            files: files
                .iter()
                .map(|(p, c)| (p.to_string(), c.to_string()))
                .collect(),
            links: Vec::new(),
            fail: false,
            dest: Mutex::new(None),
        }
    }

    /// Writes the tree, then reports failure
    pub fn failing(files: &[(&str, &str)]) -> Self {
        Self {
            fail: true,
            ..Self::new(files)
        }
    }

    /// Also creates `rel` as a symlink pointing at `target`
    #[cfg(unix)]
    pub fn with_symlink(mut self, rel: &str, target: impl Into<PathBuf>) -> Self {
        self.links.push((rel.to_string(), target.into()));
        self
    }

    pub fn dest(&self) -> Option<PathBuf> {
        self.dest.lock().unwrap().clone()
    }
}

#[async_trait]
impl RepositoryFetcher for FixtureFetcher {
    async fn fetch(&self, _spec: &RepoSpec, dest: &Path) -> Result<(), FetchError> {
        *self.dest.lock().unwrap() = Some(dest.to_path_buf());
        for (rel, contents) in &self.files {
            write_tree(dest, &[(rel.as_str(), contents.as_str())]);
        }
        #[cfg(unix)]
        for (rel, target) in &self.links {
            std::os::unix::fs::symlink(target, dest.join(rel)).unwrap();
        }
        if self.fail {
            Err(FetchError::Other("simulated clone failure".to_string()))
        } else {
            Ok(())
        }
    }
}

#[allow(dead_code)]
pub fn orchestrator(mock: Arc<MockLLMClient>, fetcher: Arc<FixtureFetcher>) -> ReadmeOrchestrator {
    ReadmeOrchestrator::new(
        PromptClient::new(mock),
        fetcher,
        TemplateRenderer::new().unwrap(),
    )
}

#[allow(dead_code)]
pub fn local_orchestrator(mock: Arc<MockLLMClient>) -> ReadmeOrchestrator {
    orchestrator(mock, Arc::new(FixtureFetcher::new(&[])))
}
