//! Prompt-level helpers over an [`LLMClient`]
//!
//! Every call is a fresh single-turn request; nothing is carried over between
//! calls. Backend failures always propagate. Only the parsing of structured
//! answers is forgiving.

use super::client::LLMClient;
use super::error::BackendError;
use super::extract::{parse_structured_or_empty, StructuredObject};
use super::types::LLMRequest;
use std::sync::Arc;
use tracing::debug;

/// Builds the short-answer prompt used by [`PromptClient::summarize_text`]
pub fn summarize_prompt(text: &str, task: &str) -> String {
    format!("{}:\n{}\n\nRespond briefly and factually.", task, text)
}

/// Builds the strict-JSON prompt used by [`PromptClient::extract_structured`]
pub fn structured_prompt(text: &str, schema_hint: &str) -> String {
    format!(
        "Analyze the following text and produce JSON according to this schema: {}.\n\
         Return only valid JSON, no extra text.\n\n{}",
        schema_hint, text
    )
}

#[derive(Clone)]
pub struct PromptClient {
    backend: Arc<dyn LLMClient>,
}

impl PromptClient {
    pub fn new(backend: Arc<dyn LLMClient>) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &dyn LLMClient {
        self.backend.as_ref()
    }

    /// Sends `prompt` and returns the trimmed reply
    pub async fn query(&self, prompt: &str) -> Result<String, BackendError> {
        debug!(
            backend = self.backend.name(),
            prompt_length = prompt.len(),
            "Querying model"
        );
        let response = self.backend.chat(LLMRequest::prompt(prompt)).await?;
        Ok(response.content.trim().to_string())
    }

    /// Asks for a brief answer to `task` about `text`
    pub async fn summarize_text(&self, text: &str, task: &str) -> Result<String, BackendError> {
        self.query(&summarize_prompt(text, task)).await
    }

    /// Sends `prompt` as-is and recovers a JSON object from the reply.
    ///
    /// Unparseable replies become an empty object.
    pub async fn query_structured(&self, prompt: &str) -> Result<StructuredObject, BackendError> {
        let raw = self.query(prompt).await?;
        Ok(parse_structured_or_empty(&raw))
    }

    /// Asks for strict JSON matching `schema_hint` and recovers it from the reply
    pub async fn extract_structured(
        &self,
        text: &str,
        schema_hint: &str,
    ) -> Result<StructuredObject, BackendError> {
        self.query_structured(&structured_prompt(text, schema_hint))
            .await
    }
}

impl std::fmt::Debug for PromptClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PromptClient")
            .field("backend", &self.backend.name())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::{MockLLMClient, MockResponse};

    fn client_with(responses: Vec<MockResponse>) -> (Arc<MockLLMClient>, PromptClient) {
        let mock = Arc::new(MockLLMClient::new());
        mock.add_responses(responses);
        (mock.clone(), PromptClient::new(mock))
    }

    #[tokio::test]
    async fn test_query_trims() {
        let (_, client) = client_with(vec![MockResponse::text("  hello \n")]);
        assert_eq!(client.query("hi").await.unwrap(), "hello");
    }

    #[tokio::test]
    async fn test_query_propagates_backend_error() {
        let (_, client) = client_with(vec![MockResponse::error(BackendError::NetworkError {
            message: "down".to_string(),
        })]);
        assert!(client.query("hi").await.is_err());
    }

    #[tokio::test]
    async fn test_summarize_text_prompt_shape() {
        let (mock, client) = client_with(vec![MockResponse::text("Configures lint rules.")]);

        let summary = client
            .summarize_text("{\"extends\": \"eslint:recommended\"}", "Summarize this file")
            .await
            .unwrap();

        assert_eq!(summary, "Configures lint rules.");
        let prompt = &mock.prompts()[0];
        assert!(prompt.starts_with("Summarize this file:\n{\"extends\""));
        assert!(prompt.ends_with("\n\nRespond briefly and factually."));
    }

    #[tokio::test]
    async fn test_extract_structured_recovers_embedded_object() {
        let (mock, client) = client_with(vec![MockResponse::text(
            "Here you go: {\"name\": \"demo\"} hope that helps",
        )]);

        let object = client
            .extract_structured("some text", "{name: string}")
            .await
            .unwrap();

        assert_eq!(object["name"], "demo");
        assert!(mock.prompts()[0].contains("according to this schema: {name: string}."));
        assert!(mock.prompts()[0].contains("Return only valid JSON, no extra text."));
    }

    #[tokio::test]
    async fn test_extract_structured_degrades_to_empty() {
        let (_, client) = client_with(vec![MockResponse::text("I cannot help with that.")]);
        let object = client.extract_structured("text", "{}").await.unwrap();
        assert!(object.is_empty());
    }
}
