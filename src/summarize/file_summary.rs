//! One-sentence summaries of individual files

use crate::llm::{BackendError, PromptClient};
use crate::scan::FileRecord;
use tracing::debug;

/// The task line sent along with a file's preview
pub fn file_task(path: &str) -> String {
    format!(
        "Summarize the purpose of this file in one concise sentence. \
         If unclear, state what it appears to configure or define. \
         File path: {}",
        path
    )
}

/// Markdown bullet for one summarized file
pub fn format_bullet(path: &str, summary: &str) -> String {
    format!("- **{}** — {}", path, summary)
}

/// Summarizes a single file and returns its bullet line
pub async fn summarize_file(
    client: &PromptClient,
    record: &FileRecord,
) -> Result<String, BackendError> {
    debug!(path = %record.path, bytes = record.byte_length, "Summarizing file");
    let summary = client
        .summarize_text(&record.preview, &file_task(&record.path))
        .await?;
    Ok(format_bullet(&record.path, &summary))
}
