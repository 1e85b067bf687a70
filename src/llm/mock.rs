use super::client::LLMClient;
use super::error::BackendError;
use super::types::{LLMRequest, LLMResponse};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

/// Scripted backend for tests: replays queued responses in order and keeps
/// every prompt it was sent.
pub struct MockLLMClient {
    responses: Mutex<VecDeque<MockResponse>>,
    prompts: Mutex<Vec<String>>,
    fallback: Option<String>,
    name: String,
}

#[derive(Debug, Clone)]
pub struct MockResponse {
    pub content: String,
    pub error: Option<BackendError>,
}

impl MockResponse {
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            error: None,
        }
    }

    pub fn error(error: BackendError) -> Self {
        Self {
            content: String::new(),
            error: Some(error),
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl MockLLMClient {
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(VecDeque::new()),
            prompts: Mutex::new(Vec::new()),
            fallback: None,
            name: "MockLLM".to_string(),
        }
    }

    pub fn with_name(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::new()
        }
    }

    /// Answers with `content` whenever the queue is empty
    pub fn with_fallback(mut self, content: impl Into<String>) -> Self {
        self.fallback = Some(content.into());
        self
    }

    pub fn add_response(&self, response: MockResponse) {
        lock(&self.responses).push_back(response);
    }

    pub fn add_responses(&self, responses: impl IntoIterator<Item = MockResponse>) {
        lock(&self.responses).extend(responses);
    }

    pub fn remaining_responses(&self) -> usize {
        lock(&self.responses).len()
    }

    /// User text of every request received so far, oldest first
    pub fn prompts(&self) -> Vec<String> {
        lock(&self.prompts).clone()
    }

    pub fn call_count(&self) -> usize {
        lock(&self.prompts).len()
    }
}

impl Default for MockLLMClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LLMClient for MockLLMClient {
    async fn chat(&self, request: LLMRequest) -> Result<LLMResponse, BackendError> {
        lock(&self.prompts).push(request.user_text());

        let queued = lock(&self.responses).pop_front();
        let response = match (queued, &self.fallback) {
            (Some(response), _) => response,
            (None, Some(fallback)) => MockResponse::text(fallback.clone()),
            (None, None) => {
                return Err(BackendError::Other {
                    message: "MockLLMClient: No more responses in queue".to_string(),
                })
            }
        };

        if let Some(error) = response.error {
            return Err(error);
        }

        Ok(LLMResponse::text(response.content, Duration::from_millis(10)))
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn model_info(&self) -> Option<String> {
        Some("mock-model".to_string())
    }
}

impl std::fmt::Debug for MockLLMClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockLLMClient")
            .field("name", &self.name)
            .field("remaining_responses", &self.remaining_responses())
            .field("calls", &self.call_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_client_basic() {
        let client = MockLLMClient::new();
        client.add_response(MockResponse::text("Hello!"));

        let response = client.chat(LLMRequest::prompt("hi")).await.unwrap();

        assert_eq!(response.content, "Hello!");
        assert_eq!(client.prompts(), vec!["hi".to_string()]);
    }

    #[tokio::test]
    async fn test_mock_client_error() {
        let client = MockLLMClient::new();
        client.add_response(MockResponse::error(BackendError::TimeoutError { seconds: 30 }));

        let result = client.chat(LLMRequest::prompt("hi")).await;

        assert_eq!(result.unwrap_err(), BackendError::TimeoutError { seconds: 30 });
    }

    #[tokio::test]
    async fn test_mock_client_no_responses() {
        let client = MockLLMClient::new();
        assert!(client.chat(LLMRequest::prompt("hi")).await.is_err());
        assert_eq!(client.call_count(), 1);
    }

    #[tokio::test]
    async fn test_mock_client_sequence_then_fallback() {
        let client = MockLLMClient::new().with_fallback("default");
        client.add_responses(vec![MockResponse::text("First"), MockResponse::text("Second")]);

        assert_eq!(client.remaining_responses(), 2);
        assert_eq!(client.chat(LLMRequest::prompt("1")).await.unwrap().content, "First");
        assert_eq!(client.chat(LLMRequest::prompt("2")).await.unwrap().content, "Second");
        assert_eq!(client.chat(LLMRequest::prompt("3")).await.unwrap().content, "default");
        assert_eq!(client.remaining_responses(), 0);
    }

    #[test]
    fn test_custom_name() {
        let client = MockLLMClient::with_name("TestClient");
        assert_eq!(client.name(), "TestClient");
        assert_eq!(client.model_info().as_deref(), Some("mock-model"));
    }
}
