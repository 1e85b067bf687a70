//! README rendering with Handlebars
//!
//! The built-in template is compiled into the binary. A custom template can
//! be loaded from disk; it receives the same [`RenderContext`]. HTML escaping
//! is applied only to templates whose file name marks them as HTML or XML,
//! so Markdown output keeps its backticks, angle brackets and quotes intact.

use crate::detection::{LicenseInfo, QuickStart, SignalSet, TechStack};
use crate::summarize::PurposeRecord;
use handlebars::Handlebars;
use serde::Serialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Name under which the built-in template is registered
pub const BUILTIN_TEMPLATE_NAME: &str = "README.md";

const BUILTIN_TEMPLATE: &str = include_str!("../../templates/README.md.hbs");

const ESCAPED_EXTENSIONS: &[&str] = &["html", "htm", "xml"];

/// Every variable a README template can use
pub const CONTEXT_KEYS: [&str; 9] = [
    "project_title",
    "tagline",
    "description_short",
    "features",
    "tech_stack_plain",
    "quick_start",
    "project_structure",
    "license",
    "key_file_summaries",
];

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("template not found: {path}")]
    TemplateNotFound {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid template '{name}': {source}")]
    InvalidTemplate {
        name: String,
        #[source]
        source: Box<handlebars::TemplateError>,
    },

    #[error("failed to render '{name}': {source}")]
    Render {
        name: String,
        #[source]
        source: Box<handlebars::RenderError>,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// The flat mapping a README template is rendered from
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RenderContext {
    pub project_title: String,
    pub tagline: String,
    pub description_short: String,
    pub features: Vec<String>,
    pub tech_stack_plain: TechStack,
    pub quick_start: QuickStart,
    pub project_structure: String,
    pub license: LicenseInfo,
    /// Newline-joined bullets from [`crate::summarize::format_bullet`]
    pub key_file_summaries: String,
}

impl RenderContext {
    pub fn assemble(
        project_title: impl Into<String>,
        purpose: PurposeRecord,
        signals: SignalSet,
        file_bullets: &[String],
    ) -> Self {
        Self {
            project_title: project_title.into(),
            tagline: purpose.tagline,
            description_short: purpose.overview,
            features: purpose.features,
            tech_stack_plain: signals.tech_stack,
            quick_start: signals.quick_start,
            project_structure: signals.project_structure,
            license: signals.license,
            key_file_summaries: file_bullets.join("\n"),
        }
    }
}

/// Whether output of the named template gets HTML escaping
pub fn escapes_html(template_name: &str) -> bool {
    Path::new(template_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            ESCAPED_EXTENSIONS
                .iter()
                .any(|candidate| ext.eq_ignore_ascii_case(candidate))
        })
        .unwrap_or(false)
}

#[derive(Debug)]
pub struct TemplateRenderer {
    registry: Handlebars<'static>,
    template_name: String,
}

impl TemplateRenderer {
    /// Renderer for the built-in Markdown template
    pub fn new() -> Result<Self, RenderError> {
        Self::from_template_string(BUILTIN_TEMPLATE_NAME, BUILTIN_TEMPLATE)
    }

    /// Loads a template file; its file name decides the escaping rule
    pub fn from_file(path: &Path) -> Result<Self, RenderError> {
        let source = fs::read_to_string(path).map_err(|source| RenderError::TemplateNotFound {
            path: path.to_path_buf(),
            source,
        })?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        debug!(template = %path.display(), "Loaded custom template");
        Self::from_template_string(&name, &source)
    }

    pub fn from_template_string(name: &str, source: &str) -> Result<Self, RenderError> {
        let mut registry = Handlebars::new();
        if !escapes_html(name) {
            registry.register_escape_fn(handlebars::no_escape);
        }
        registry
            .register_template_string(name, source)
            .map_err(|e| RenderError::InvalidTemplate {
                name: name.to_string(),
                source: Box::new(e),
            })?;

        Ok(Self {
            registry,
            template_name: name.to_string(),
        })
    }

    pub fn template_name(&self) -> &str {
        &self.template_name
    }

    pub fn render_to_string(&self, context: &RenderContext) -> Result<String, RenderError> {
        self.registry
            .render(&self.template_name, context)
            .map_err(|e| RenderError::Render {
                name: self.template_name.clone(),
                source: Box::new(e),
            })
    }

    /// Renders fully in memory, then writes `output`. Returns the absolute
    /// path of the written file.
    pub fn render_to_file(
        &self,
        context: &RenderContext,
        output: &Path,
    ) -> Result<PathBuf, RenderError> {
        let rendered = self.render_to_string(context)?;
        let write_err = |source| RenderError::Write {
            path: output.to_path_buf(),
            source,
        };

        fs::write(output, rendered).map_err(write_err)?;
        let written = output.canonicalize().map_err(write_err)?;
        info!(output = %written.display(), "README rendered");
        Ok(written)
    }
}
