//! Ollama HTTP backend
//!
//! Talks to a local Ollama server through its `/api/chat` endpoint with
//! streaming disabled, so each call is exactly one request and one response.
//!
//! # Example
//!
//! ```no_run
//! use readmegen::llm::{LLMClient, LLMRequest, OllamaClient};
//! use std::time::Duration;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = OllamaClient::with_timeout(
//!     "http://localhost:11434",
//!     "qwen2:7b",
//!     Duration::from_secs(120),
//! )?;
//!
//! let response = client.chat(LLMRequest::prompt("Say hello")).await?;
//! println!("{}", response.content);
//! # Ok(())
//! # }
//! ```

use super::client::LLMClient;
use super::error::BackendError;
use super::types::{ChatMessage, LLMRequest, LLMResponse};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};

const DEFAULT_TIMEOUT_SECS: u64 = 300;

/// Client for a local Ollama server
pub struct OllamaClient {
    endpoint: String,
    model: String,
    http_client: Client,
    timeout: Duration,
}

impl OllamaClient {
    pub fn new(endpoint: impl Into<String>, model: impl Into<String>) -> Result<Self, BackendError> {
        Self::with_timeout(endpoint, model, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    pub fn with_timeout(
        endpoint: impl Into<String>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, BackendError> {
        let http_client = Client::builder().timeout(timeout).build().map_err(|e| {
            BackendError::ConfigurationError {
                message: format!("Failed to build HTTP client: {}", e),
            }
        })?;

        Ok(Self {
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            model: model.into(),
            http_client,
            timeout,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn map_send_error(&self, e: reqwest::Error) -> BackendError {
        if e.is_timeout() {
            error!("Ollama request timed out after {:?}", self.timeout);
            BackendError::TimeoutError {
                seconds: self.timeout.as_secs(),
            }
        } else if e.is_connect() {
            error!("Cannot connect to Ollama at {}", self.endpoint);
            BackendError::NetworkError {
                message: format!("Connection failed: {}", e),
            }
        } else {
            error!("Ollama request error: {}", e);
            BackendError::NetworkError {
                message: format!("Request failed: {}", e),
            }
        }
    }
}

#[async_trait]
impl LLMClient for OllamaClient {
    async fn chat(&self, request: LLMRequest) -> Result<LLMResponse, BackendError> {
        let url = format!("{}/api/chat", self.endpoint);

        let body = OllamaChatRequest {
            model: &self.model,
            messages: &request.messages,
            stream: false,
            options: OllamaOptions {
                temperature: request.temperature,
                num_predict: request.max_tokens,
            },
        };

        debug!(
            model = %self.model,
            prompt_length = request.user_text().len(),
            "Sending request to Ollama"
        );

        let start = Instant::now();

        let response = self
            .http_client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();

            error!("Ollama API returned error status {}: {}", status, body);

            if status.as_u16() == 404 && body.contains("model") {
                return Err(BackendError::Other {
                    message: format!(
                        "Model '{}' not found. Please pull it with: ollama pull {}",
                        self.model, self.model
                    ),
                });
            }

            return Err(BackendError::ApiError {
                message: format!("HTTP {}: {}", status, body),
                status_code: Some(status.as_u16()),
            });
        }

        let parsed: OllamaChatResponse = response.json().await.map_err(|e| {
            error!("Failed to parse Ollama response: {}", e);
            BackendError::InvalidResponse {
                message: format!("JSON parse error: {}", e),
            }
        })?;

        if !parsed.done {
            warn!("Ollama response indicates incomplete generation");
        }

        let elapsed = start.elapsed();
        info!(
            model = %self.model,
            elapsed_secs = elapsed.as_secs_f64(),
            eval_tokens = parsed.eval_count.unwrap_or(0),
            "Ollama generation completed"
        );

        Ok(LLMResponse::text(parsed.message.content.trim(), elapsed))
    }

    fn name(&self) -> &str {
        "Ollama"
    }

    fn model_info(&self) -> Option<String> {
        Some(self.model.clone())
    }
}

impl std::fmt::Debug for OllamaClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OllamaClient")
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[derive(Debug, Serialize)]
struct OllamaChatRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    stream: bool,
    options: OllamaOptions,
}

#[derive(Debug, Serialize)]
struct OllamaOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    num_predict: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct OllamaChatResponse {
    message: ChatMessage,
    #[serde(default)]
    done: bool,
    #[serde(default)]
    eval_count: Option<u64>,
}
