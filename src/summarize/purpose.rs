//! Project purpose summary: tagline, overview and feature bullets

use crate::llm::{BackendError, PromptClient, StructuredObject};
use crate::scan::{FileRecord, FileScanner, DEFAULT_MAX_PREVIEW_BYTES};
use serde::Serialize;
use serde_json::Value;
use std::path::Path;
use tracing::{info, warn};

/// Characters of each file preview included in the sample
pub const PREVIEW_BLOCK_CHARS: usize = 1000;

/// Upper bound on the number of feature bullets kept
pub const MAX_FEATURES: usize = 8;

const PURPOSE_INSTRUCTIONS: &str = "\
You are generating README content for a GitHub repository.
Use ONLY the information given below.
Return STRICT JSON with keys:
- \"tagline\": one short sentence (<= 120 chars)
- \"overview\": 1-2 sentences describing the project purpose
- \"features\": array of 3-8 concise bullet items

Do not invent commands or technologies that don't exist in the text.
If you are unsure, skip that feature.
";

/// Model-written description of what a project is for.
///
/// Always fully shaped: fields the model omitted, or that could not be
/// parsed, are empty rather than missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PurposeRecord {
    pub tagline: String,
    pub overview: String,
    pub features: Vec<String>,
}

fn string_field(object: &StructuredObject, key: &str) -> String {
    match object.get(key) {
        Some(Value::String(s)) => s.trim().to_string(),
        _ => String::new(),
    }
}

fn feature_text(item: &Value) -> Option<String> {
    let text = match item {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => return None,
    };
    (!text.is_empty()).then_some(text)
}

impl PurposeRecord {
    /// Normalizes whatever the model returned, field by field
    pub fn from_object(object: &StructuredObject) -> Self {
        let features = match object.get("features") {
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(feature_text)
                .take(MAX_FEATURES)
                .collect(),
            _ => Vec::new(),
        };

        Self {
            tagline: string_field(object, "tagline"),
            overview: string_field(object, "overview"),
            features,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.tagline.is_empty() && self.overview.is_empty() && self.features.is_empty()
    }
}

/// One `--- path ---` block per file, separated by blank lines
pub fn sample_text(records: &[FileRecord]) -> String {
    records
        .iter()
        .map(|record| {
            let preview: String = record.preview.chars().take(PREVIEW_BLOCK_CHARS).collect();
            format!("--- {} ---\n{}", record.path, preview)
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

pub fn purpose_prompt(records: &[FileRecord]) -> String {
    format!(
        "\n{}\nRepository text sample:\n{}\n",
        PURPOSE_INSTRUCTIONS,
        sample_text(records)
    )
}

#[derive(Debug, Clone)]
pub struct PurposeSummarizer {
    client: PromptClient,
    max_preview_bytes: usize,
}

impl PurposeSummarizer {
    pub fn new(client: PromptClient) -> Self {
        Self {
            client,
            max_preview_bytes: DEFAULT_MAX_PREVIEW_BYTES,
        }
    }

    pub fn with_max_preview_bytes(mut self, max_preview_bytes: usize) -> Self {
        self.max_preview_bytes = max_preview_bytes;
        self
    }

    /// Samples up to `max_files` files under `root` and asks the model what
    /// the project does.
    ///
    /// Backend failures propagate; unusable answers yield an empty record.
    pub async fn summarize(
        &self,
        root: &Path,
        max_files: usize,
    ) -> Result<PurposeRecord, BackendError> {
        let records: Vec<FileRecord> = FileScanner::new(root)
            .with_max_bytes(self.max_preview_bytes)
            .scan()
            .take(max_files)
            .collect();

        info!(
            sampled_files = records.len(),
            max_files, "Summarizing project purpose"
        );

        let object = self.client.query_structured(&purpose_prompt(&records)).await?;
        let record = PurposeRecord::from_object(&object);

        if record.is_empty() {
            warn!("Model returned no usable purpose summary");
        }

        Ok(record)
    }
}
