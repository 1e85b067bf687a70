use std::fmt;

/// Errors raised by a model backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendError {
    /// The backend answered with a non-success status
    ApiError {
        message: String,
        status_code: Option<u16>,
    },

    /// Request timed out after the specified duration (in seconds)
    TimeoutError { seconds: u64 },

    /// The backend answered, but not with something we can read
    InvalidResponse { message: String },

    /// Missing or invalid client settings
    ConfigurationError { message: String },

    NetworkError { message: String },

    Other { message: String },
}

impl fmt::Display for BackendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendError::ApiError {
                message,
                status_code,
            } => {
                if let Some(code) = status_code {
                    write!(f, "API error ({}): {}", code, message)
                } else {
                    write!(f, "API error: {}", message)
                }
            }
            BackendError::TimeoutError { seconds } => {
                write!(f, "Request timed out after {} seconds", seconds)
            }
            BackendError::InvalidResponse { message } => {
                write!(f, "Invalid response from LLM: {}", message)
            }
            BackendError::ConfigurationError { message } => {
                write!(f, "Configuration error: {}", message)
            }
            BackendError::NetworkError { message } => write!(f, "Network error: {}", message),
            BackendError::Other { message } => write!(f, "{}", message),
        }
    }
}

impl std::error::Error for BackendError {}
