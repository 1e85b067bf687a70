//! Model-backed summaries: per-file bullets and the project purpose

pub mod file_summary;
pub mod purpose;

pub use file_summary::{file_task, format_bullet, summarize_file};
pub use purpose::{PurposeRecord, PurposeSummarizer};
