//! Result and error types for Prefijar.

use thiserror::Error;

/// Result type for Prefijar operations
pub type PrefijarResult<T> = Result<T, PrefijarError>;

/// Errors that can occur in Prefijar
#[derive(Debug, Error)]
pub enum PrefijarError {
    /// Stylesheet failed to parse
    #[error("CSS parse error: {message}")]
    Parse {
        /// Error message
        message: String,
    },

    /// Stylesheet failed to serialize
    #[error("CSS print error: {message}")]
    Print {
        /// Error message
        message: String,
    },

    /// Pipeline transform step failed
    #[error("Pipeline error: {message}")]
    Pipeline {
        /// Error message
        message: String,
    },

    /// Message envelope could not be understood
    #[error("Protocol error: {message}")]
    Protocol {
        /// Error message
        message: String,
    },

    /// Worker channel is closed or the actor task is gone
    #[error("Worker channel error: {message}")]
    Channel {
        /// Error message
        message: String,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl PrefijarError {
    /// Create a parse error
    #[must_use]
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
        }
    }

    /// Create a print error
    #[must_use]
    pub fn print(message: impl Into<String>) -> Self {
        Self::Print {
            message: message.into(),
        }
    }

    /// Create a pipeline error
    #[must_use]
    pub fn pipeline(message: impl Into<String>) -> Self {
        Self::Pipeline {
            message: message.into(),
        }
    }

    /// Create a protocol error
    #[must_use]
    pub fn protocol(message: impl Into<String>) -> Self {
        Self::Protocol {
            message: message.into(),
        }
    }

    /// Create a channel error
    #[must_use]
    pub fn channel(message: impl Into<String>) -> Self {
        Self::Channel {
            message: message.into(),
        }
    }
}
