//! readmegen - README generation from a project's own files
//!
//! A run scans a local folder or a freshly fetched GitHub repository, asks a
//! text-generation model for one-line summaries of the files and a short
//! description of the project, detects the tech stack, quick-start recipe,
//! layout and license deterministically, and renders everything through a
//! Handlebars template.
//!
//! # Example Usage
//!
//! ```no_run
//! use readmegen::{
//!     BuildRequest, GitFetcher, PromptClient, ReadmeOrchestrator, ReadmegenConfig, Source,
//!     TemplateRenderer,
//! };
//! use std::path::PathBuf;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ReadmegenConfig::default();
//! let orchestrator = ReadmeOrchestrator::new(
//!     PromptClient::new(config.create_client()?),
//!     Arc::new(GitFetcher::new()),
//!     TemplateRenderer::new()?,
//! );
//!
//! let request = BuildRequest::new(Source::Local(PathBuf::from(".")), "README.md");
//! let written = orchestrator.build_document(&request).await?;
//! println!("README written to {}", written.display());
//! # Ok(())
//! # }
//! ```
//!
//! # Project Structure
//!
//! - [`scan`]: text file enumeration with capped, hashed previews
//! - [`detection`]: marker-based tech stack, quick start, license and layout
//! - [`llm`]: model backends, prompts and structured-answer recovery
//! - [`summarize`]: per-file bullets and the project purpose summary
//! - [`source`]: local folders, repository specs and fetching
//! - [`pipeline`]: the end-to-end run
//! - [`render`]: Handlebars rendering of the README

pub mod cli;
pub mod config;
pub mod detection;
pub mod llm;
pub mod pipeline;
pub mod render;
pub mod scan;
pub mod source;
pub mod summarize;
pub mod util;

pub use config::{ConfigError, ReadmegenConfig};
pub use detection::{detect_signals, DetectionError, SignalSet};
pub use llm::{BackendError, LLMClient, MockLLMClient, MockResponse, OllamaClient, PromptClient};
pub use pipeline::{BuildError, BuildRequest, ReadmeOrchestrator};
pub use render::{RenderContext, RenderError, TemplateRenderer};
pub use scan::{FileRecord, FileScanner};
pub use source::{
    FetchError, GitFetcher, RepoSpec, RepositoryFetcher, Source, UsageError, WorkingRoot,
};
pub use summarize::{PurposeRecord, PurposeSummarizer};
pub use util::{init_default, init_from_env, init_logging, LoggingConfig};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
