pub mod error;
pub mod orchestrator;

pub use error::BuildError;
pub use orchestrator::{
    derive_title, is_readme_path, BuildRequest, ReadmeOrchestrator, DEFAULT_MAX_FILES,
    PURPOSE_SAMPLE_LIMIT,
};
