//! Runtime configuration for readmegen
//!
//! Settings come from environment variables with defaults. Command-line flags
//! may override individual fields after loading.
//!
//! # Environment Variables
//!
//! - `READMEGEN_OLLAMA_HOST`: model server endpoint, falling back to `OLLAMA_HOST`,
//!   then "http://localhost:11434"
//! - `READMEGEN_MODEL`: model name - default: "qwen2:7b"
//! - `READMEGEN_REQUEST_TIMEOUT`: per-request timeout in seconds - default: "300"
//! - `READMEGEN_MAX_PREVIEW_BYTES`: bytes read from each file - default: "4096"
//! - `READMEGEN_LOG_LEVEL`: logging level - default: "info"
//! - `READMEGEN_GIT_BASE_URL`: host remote repositories are cloned from -
//!   default: "https://github.com"
//!
//! # Example
//!
//! ```no_run
//! use readmegen::ReadmegenConfig;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ReadmegenConfig::default();
//! config.validate()?;
//! let client = config.create_client()?;
//! # Ok(())
//! # }
//! ```

use crate::llm::{BackendError, OllamaClient};
use crate::scan::DEFAULT_MAX_PREVIEW_BYTES;
use crate::source::{GitFetcher, DEFAULT_GIT_BASE_URL};
use std::collections::HashMap;
use std::env;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

const DEFAULT_OLLAMA_HOST: &str = "http://localhost:11434";
const DEFAULT_MODEL: &str = "qwen2:7b";
const DEFAULT_LOG_LEVEL: &str = "info";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 300;

const MAX_REQUEST_TIMEOUT_SECS: u64 = 3600;
const MIN_PREVIEW_BYTES: usize = 64;
const MAX_PREVIEW_BYTES: usize = 1_048_576;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration validation failed: {0}")]
    ValidationFailed(String),

    #[error("Backend initialization failed: {0}")]
    BackendInitError(#[from] BackendError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadmegenConfig {
    /// Base URL of the Ollama server
    pub ollama_host: String,

    pub model: String,

    /// Request timeout in seconds
    pub request_timeout_secs: u64,

    /// Bytes read from each scanned file
    pub max_preview_bytes: usize,

    /// Logging level (trace, debug, info, warn, error)
    pub log_level: String,

    /// Base URL that `owner/name` is appended to when cloning
    pub git_base_url: String,
}

fn env_parsed<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|v| v.trim().parse::<T>().ok())
}

impl Default for ReadmegenConfig {
    /// Loads from `READMEGEN_*` environment variables, falling back to defaults
    fn default() -> Self {
        let ollama_host = env::var("READMEGEN_OLLAMA_HOST")
            .or_else(|_| env::var("OLLAMA_HOST"))
            .unwrap_or_else(|_| DEFAULT_OLLAMA_HOST.to_string());

        let model = env::var("READMEGEN_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());

        let request_timeout_secs =
            env_parsed("READMEGEN_REQUEST_TIMEOUT").unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS);

        let max_preview_bytes =
            env_parsed("READMEGEN_MAX_PREVIEW_BYTES").unwrap_or(DEFAULT_MAX_PREVIEW_BYTES);

        let log_level = env::var("READMEGEN_LOG_LEVEL")
            .unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_string())
            .to_lowercase();

        let git_base_url = env::var("READMEGEN_GIT_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_GIT_BASE_URL.to_string());

        Self {
            ollama_host,
            model,
            request_timeout_secs,
            max_preview_bytes,
            log_level,
            git_base_url,
        }
    }
}

impl ReadmegenConfig {
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into().to_lowercase();
        self
    }

    /// Checks that:
    /// - the host is set
    /// - numeric values are in range
    /// - the log level is known
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.ollama_host.trim().is_empty() {
            return Err(ConfigError::ValidationFailed(
                "Ollama host must not be empty".to_string(),
            ));
        }

        if self.model.trim().is_empty() {
            return Err(ConfigError::ValidationFailed(
                "Model name must not be empty".to_string(),
            ));
        }

        if self.request_timeout_secs == 0 {
            return Err(ConfigError::ValidationFailed(
                "Request timeout must be at least 1 second".to_string(),
            ));
        }
        if self.request_timeout_secs > MAX_REQUEST_TIMEOUT_SECS {
            return Err(ConfigError::ValidationFailed(
                "Request timeout cannot exceed 1 hour".to_string(),
            ));
        }

        if !(MIN_PREVIEW_BYTES..=MAX_PREVIEW_BYTES).contains(&self.max_preview_bytes) {
            return Err(ConfigError::ValidationFailed(format!(
                "Max preview bytes must be between {} and {}",
                MIN_PREVIEW_BYTES, MAX_PREVIEW_BYTES
            )));
        }

        match self.log_level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(ConfigError::ValidationFailed(format!(
                    "Invalid log level: {}. Valid options: trace, debug, info, warn, error",
                    self.log_level
                )))
            }
        }

        Ok(())
    }

    /// Builds the Ollama client for this configuration
    pub fn create_client(&self) -> Result<Arc<OllamaClient>, ConfigError> {
        let client = OllamaClient::with_timeout(
            self.ollama_host.clone(),
            self.model.clone(),
            Duration::from_secs(self.request_timeout_secs),
        )?;
        Ok(Arc::new(client))
    }

    pub fn create_fetcher(&self) -> GitFetcher {
        GitFetcher::new().with_base_url(self.git_base_url.clone())
    }

    pub fn to_display_map(&self) -> HashMap<String, String> {
        let mut map = HashMap::new();

        map.insert("ollama_host".to_string(), self.ollama_host.clone());
        map.insert("model".to_string(), self.model.clone());
        map.insert(
            "request_timeout_secs".to_string(),
            self.request_timeout_secs.to_string(),
        );
        map.insert(
            "max_preview_bytes".to_string(),
            self.max_preview_bytes.to_string(),
        );
        map.insert("log_level".to_string(), self.log_level.clone());
        map.insert("git_base_url".to_string(), self.git_base_url.clone());

        map
    }
}

impl fmt::Display for ReadmegenConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Readmegen Configuration:")?;
        writeln!(f, "  Ollama Host: {}", self.ollama_host)?;
        writeln!(f, "  Model: {}", self.model)?;
        writeln!(f, "  Request Timeout: {}s", self.request_timeout_secs)?;
        writeln!(f, "  Max Preview: {} bytes", self.max_preview_bytes)?;
        writeln!(f, "  Log Level: {}", self.log_level)?;
        writeln!(f, "  Git Base URL: {}", self.git_base_url)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    struct EnvGuard {
        key: String,
        old_value: Option<String>,
    }

    impl EnvGuard {
        fn set(key: &str, value: &str) -> Self {
            let old_value = env::var(key).ok();
            env::set_var(key, value);
            Self {
                key: key.to_string(),
                old_value,
            }
        }

        fn remove(key: &str) -> Self {
            let old_value = env::var(key).ok();
            env::remove_var(key);
            Self {
                key: key.to_string(),
                old_value,
            }
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            match &self.old_value {
                Some(v) => env::set_var(&self.key, v),
                None => env::remove_var(&self.key),
            }
        }
    }

    fn valid() -> ReadmegenConfig {
        ReadmegenConfig {
            ollama_host: DEFAULT_OLLAMA_HOST.to_string(),
            model: DEFAULT_MODEL.to_string(),
            request_timeout_secs: 30,
            max_preview_bytes: 4096,
            log_level: "info".to_string(),
            git_base_url: DEFAULT_GIT_BASE_URL.to_string(),
        }
    }

    #[test]
    #[serial]
    fn test_defaults() {
        let _guards = vec![
            EnvGuard::remove("READMEGEN_OLLAMA_HOST"),
            EnvGuard::remove("OLLAMA_HOST"),
            EnvGuard::remove("READMEGEN_MODEL"),
            EnvGuard::remove("READMEGEN_REQUEST_TIMEOUT"),
            EnvGuard::remove("READMEGEN_MAX_PREVIEW_BYTES"),
            EnvGuard::remove("READMEGEN_LOG_LEVEL"),
            EnvGuard::remove("READMEGEN_GIT_BASE_URL"),
        ];

        let config = ReadmegenConfig::default();

        assert_eq!(config.ollama_host, DEFAULT_OLLAMA_HOST);
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.request_timeout_secs, DEFAULT_REQUEST_TIMEOUT_SECS);
        assert_eq!(config.max_preview_bytes, DEFAULT_MAX_PREVIEW_BYTES);
        assert_eq!(config.log_level, DEFAULT_LOG_LEVEL);
        assert_eq!(config.git_base_url, DEFAULT_GIT_BASE_URL);
        assert!(config.validate().is_ok());
    }

    #[test]
    #[serial]
    fn test_environment_overrides() {
        let _guards = vec![
            EnvGuard::set("READMEGEN_OLLAMA_HOST", "http://gpu-box:11434"),
            EnvGuard::set("READMEGEN_MODEL", "llama3:8b"),
            EnvGuard::set("READMEGEN_REQUEST_TIMEOUT", "60"),
            EnvGuard::set("READMEGEN_MAX_PREVIEW_BYTES", "2048"),
            EnvGuard::set("READMEGEN_LOG_LEVEL", "DEBUG"),
            EnvGuard::set("READMEGEN_GIT_BASE_URL", "file:///srv/git"),
        ];

        let config = ReadmegenConfig::default();

        assert_eq!(config.ollama_host, "http://gpu-box:11434");
        assert_eq!(config.model, "llama3:8b");
        assert_eq!(config.request_timeout_secs, 60);
        assert_eq!(config.max_preview_bytes, 2048);
        assert_eq!(config.log_level, "debug");
        assert_eq!(
            config.create_fetcher().clone_url(&"a/b".parse().unwrap()),
            "file:///srv/git/a/b.git"
        );
    }

    #[test]
    #[serial]
    fn test_ollama_host_fallback() {
        let _guards = vec![
            EnvGuard::remove("READMEGEN_OLLAMA_HOST"),
            EnvGuard::set("OLLAMA_HOST", "http://shared:11434"),
        ];
        assert_eq!(ReadmegenConfig::default().ollama_host, "http://shared:11434");
    }

    #[test]
    #[serial]
    fn test_unparseable_numbers_use_defaults() {
        let _guards = vec![
            EnvGuard::set("READMEGEN_REQUEST_TIMEOUT", "soon"),
            EnvGuard::set("READMEGEN_MAX_PREVIEW_BYTES", "-1"),
        ];
        let config = ReadmegenConfig::default();
        assert_eq!(config.request_timeout_secs, DEFAULT_REQUEST_TIMEOUT_SECS);
        assert_eq!(config.max_preview_bytes, DEFAULT_MAX_PREVIEW_BYTES);
    }

    #[test]
    fn test_validation() {
        assert!(valid().validate().is_ok());

        let mut config = valid();
        config.request_timeout_secs = 0;
        assert!(config.validate().is_err());

        let mut config = valid();
        config.request_timeout_secs = MAX_REQUEST_TIMEOUT_SECS + 1;
        assert!(config.validate().is_err());

        let mut config = valid();
        config.max_preview_bytes = 10;
        assert!(config.validate().is_err());

        let mut config = valid();
        config.max_preview_bytes = MAX_PREVIEW_BYTES + 1;
        assert!(config.validate().is_err());

        let mut config = valid();
        config.log_level = "loud".to_string();
        assert!(config.validate().is_err());

        let mut config = valid();
        config.ollama_host = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_overrides_from_flags() {
        let config = valid().with_model("phi3").with_log_level("WARN");
        assert_eq!(config.model, "phi3");
        assert_eq!(config.log_level, "warn");
    }

    #[test]
    fn test_create_client() {
        let client = valid().create_client().unwrap();
        assert_eq!(client.endpoint(), DEFAULT_OLLAMA_HOST);
    }

    #[test]
    fn test_display_and_map() {
        let config = valid();
        let display = config.to_string();
        assert!(display.contains("Readmegen Configuration:"));
        assert!(display.contains("Model: qwen2:7b"));

        let map = config.to_display_map();
        assert_eq!(map.get("max_preview_bytes").map(String::as_str), Some("4096"));
        assert_eq!(map.len(), 6);
    }
}
