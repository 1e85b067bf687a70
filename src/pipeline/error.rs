use crate::detection::DetectionError;
use crate::llm::BackendError;
use crate::render::RenderError;
use crate::source::{FetchError, UsageError};
use thiserror::Error;

/// Any failure that aborts a README generation run
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Usage error: {0}")]
    Usage(#[from] UsageError),

    #[error("Repository fetch failed: {0}")]
    Fetch(#[from] FetchError),

    #[error("Model backend error: {0}")]
    Backend(#[from] BackendError),

    #[error("Detection failed: {0}")]
    Detection(#[from] DetectionError),

    #[error("Rendering failed: {0}")]
    Render(#[from] RenderError),
}

impl BuildError {
    pub fn is_usage(&self) -> bool {
        matches!(self, BuildError::Usage(_))
    }
}
