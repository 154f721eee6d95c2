//! Error types and handling for the lunch bot

use thiserror::Error;

/// Main error type for a lunch suggestion
#[derive(Error, Debug)]
pub enum LunchError {
    /// Connection failures and timeouts
    #[error("Transport error: {message}")]
    Transport { message: String },

    /// Upstream answered with a non-success status
    #[error("Upstream returned {status}: {body}")]
    UpstreamStatus { status: u16, body: String },

    /// Response body could not be decoded
    #[error("Parse error: {message}")]
    Parse { message: String },

    /// Nothing left to pick from after searching
    #[error("No candidates: {message}")]
    NoCandidates { message: String },

    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl LunchError {
    /// Create a new transport error
    pub fn transport<S: Into<String>>(message: S) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Create a new upstream status error, keeping only the head of the body
    pub fn upstream_status<S: Into<String>>(status: u16, body: S) -> Self {
        let body: String = body.into();
        let body = body.chars().take(200).collect();
        Self::UpstreamStatus { status, body }
    }

    /// Create a new parse error
    pub fn parse<S: Into<String>>(message: S) -> Self {
        Self::Parse {
            message: message.into(),
        }
    }

    /// Create a new no-candidates error
    pub fn no_candidates<S: Into<String>>(message: S) -> Self {
        Self::NoCandidates {
            message: message.into(),
        }
    }

    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            LunchError::Transport { .. } => {
                "Unable to reach external services. Please check your internet connection."
                    .to_string()
            }
            LunchError::UpstreamStatus { status, .. } => {
                format!("An external service answered with status {status}.")
            }
            LunchError::Parse { .. } => {
                "An external service sent data that could not be understood.".to_string()
            }
            LunchError::NoCandidates { message } => message.clone(),
            LunchError::Config { .. } => {
                "Configuration error. Please check your config file and API keys.".to_string()
            }
        }
    }
}

impl From<reqwest::Error> for LunchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            LunchError::transport(format!("request timed out: {err}"))
        } else if err.is_decode() {
            LunchError::parse(err.to_string())
        } else {
            LunchError::transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for LunchError {
    fn from(err: serde_json::Error) -> Self {
        LunchError::parse(err.to_string())
    }
}
