use super::error::BuildError;
use crate::detection::detect_signals;
use crate::llm::PromptClient;
use crate::render::{RenderContext, TemplateRenderer};
use crate::scan::{FileRecord, FileScanner, DEFAULT_MAX_PREVIEW_BYTES};
use crate::source::{RepositoryFetcher, Source, WorkingRoot};
use crate::summarize::{summarize_file, PurposeSummarizer};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

pub const DEFAULT_MAX_FILES: usize = 50;

/// Upper bound on files sampled for the purpose summary
pub const PURPOSE_SAMPLE_LIMIT: usize = 20;

const FALLBACK_TITLE: &str = "Project";

#[derive(Debug, Clone)]
pub struct BuildRequest {
    pub source: Source,
    pub output_path: PathBuf,
    /// Files summarized individually, after README files are excluded
    pub max_files: usize,
}

impl BuildRequest {
    pub fn new(source: Source, output_path: impl Into<PathBuf>) -> Self {
        Self {
            source,
            output_path: output_path.into(),
            max_files: DEFAULT_MAX_FILES,
        }
    }

    pub fn with_max_files(mut self, max_files: usize) -> Self {
        self.max_files = max_files;
        self
    }
}

/// True for `README*` at the root and for anything under or named `readme*`
/// deeper in the tree. `path` is the slash-separated relative path.
pub fn is_readme_path(path: &str) -> bool {
    let lower = path.to_lowercase();
    lower.starts_with("readme") || lower.contains("/readme")
}

/// Folder name for local runs; for remote runs, the last `/` segment of the
/// spec with any `@ref` removed.
pub fn derive_title(source: &Source, root: &Path) -> String {
    let title = match source {
        Source::Local(_) => root
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default(),
        Source::Remote(spec) => {
            let tail = spec.as_str().rsplit('/').next().unwrap_or_default();
            tail.split('@').next().unwrap_or_default().to_string()
        }
    };

    if title.is_empty() {
        FALLBACK_TITLE.to_string()
    } else {
        title
    }
}

/// Runs one README generation end to end.
///
/// Every stage runs after the previous one finishes, and every model call
/// is awaited before the next is sent. A remote checkout is owned by the
/// [`WorkingRoot`] held in [`build_document`](Self::build_document), so it
/// is removed whether the run succeeds or fails at any stage.
pub struct ReadmeOrchestrator {
    prompt_client: PromptClient,
    fetcher: Arc<dyn RepositoryFetcher>,
    renderer: TemplateRenderer,
    max_preview_bytes: usize,
}

impl ReadmeOrchestrator {
    pub fn new(
        prompt_client: PromptClient,
        fetcher: Arc<dyn RepositoryFetcher>,
        renderer: TemplateRenderer,
    ) -> Self {
        Self {
            prompt_client,
            fetcher,
            renderer,
            max_preview_bytes: DEFAULT_MAX_PREVIEW_BYTES,
        }
    }

    pub fn with_max_preview_bytes(mut self, max_preview_bytes: usize) -> Self {
        self.max_preview_bytes = max_preview_bytes;
        self
    }

    /// Generates the README and returns the absolute path it was written to
    pub async fn build_document(&self, request: &BuildRequest) -> Result<PathBuf, BuildError> {
        let start = Instant::now();
        let root = self.resolve(&request.source).await?;
        info!(
            root = %root.path().display(),
            temporary = root.is_temporary(),
            max_files = request.max_files,
            "Starting README generation"
        );

        let result = self.generate(&root, request).await;
        drop(root);

        let written = result?;
        info!(
            output = %written.display(),
            duration_ms = start.elapsed().as_millis() as u64,
            "README generation complete"
        );
        Ok(written)
    }

    async fn resolve(&self, source: &Source) -> Result<WorkingRoot, BuildError> {
        match source {
            Source::Local(path) => Ok(WorkingRoot::local(path)?),
            Source::Remote(spec) => Ok(WorkingRoot::fetch(self.fetcher.as_ref(), spec).await?),
        }
    }

    fn select_files(&self, root: &Path, max_files: usize) -> Vec<FileRecord> {
        FileScanner::new(root)
            .with_max_bytes(self.max_preview_bytes)
            .scan()
            .filter(|record| !is_readme_path(&record.path))
            .take(max_files)
            .collect()
    }

    async fn generate(
        &self,
        root: &WorkingRoot,
        request: &BuildRequest,
    ) -> Result<PathBuf, BuildError> {
        let root_path = root.path();

        let files = self.select_files(root_path, request.max_files);
        info!(files = files.len(), "Summarizing files");

        let mut bullets = Vec::with_capacity(files.len());
        for record in &files {
            bullets.push(summarize_file(&self.prompt_client, record).await?);
        }
        debug!(bullets = bullets.len(), "File summaries collected");

        let purpose = PurposeSummarizer::new(self.prompt_client.clone())
            .with_max_preview_bytes(self.max_preview_bytes)
            .summarize(root_path, request.max_files.min(PURPOSE_SAMPLE_LIMIT))
            .await?;

        let signals = detect_signals(root_path)?;

        let title = derive_title(&request.source, root_path);
        let context = RenderContext::assemble(title, purpose, signals, &bullets);

        Ok(self.renderer.render_to_file(&context, &request.output_path)?)
    }
}

impl std::fmt::Debug for ReadmeOrchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReadmeOrchestrator")
            .field("prompt_client", &self.prompt_client)
            .field("renderer", &self.renderer.template_name())
            .field("max_preview_bytes", &self.max_preview_bytes)
            .finish()
    }
}
