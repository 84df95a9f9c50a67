//! Error types for the Portaria console

use thiserror::Error;

/// Main console error type
#[derive(Error, Debug)]
pub enum ConsoleError {
    /// Rejected locally, before any request was made
    #[error("Validation error: {0}")]
    Validation(String),

    /// The backend answered with a non-2xx status
    #[error("API Error: {status} {status_text}")]
    Api { status: u16, status_text: String },

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// A 2xx response without the payload the operation needs
    #[error("Empty response from {0}")]
    EmptyResponse(String),

    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

impl ConsoleError {
    /// True for failures raised before any request went out
    pub fn is_local(&self) -> bool {
        matches!(self, ConsoleError::Validation(_) | ConsoleError::InvalidState(_))
    }

    /// HTTP status of an API failure, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            ConsoleError::Api { status, .. } => Some(*status),
            ConsoleError::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

impl From<validator::ValidationErrors> for ConsoleError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut messages: Vec<String> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| match &e.message {
                    Some(msg) => msg.to_string(),
                    None => format!("{} is invalid", field),
                })
            })
            .collect();
        messages.sort();
        ConsoleError::Validation(messages.join("; "))
    }
}

/// Result type alias for console operations
pub type ConsoleResult<T> = Result<T, ConsoleError>;
