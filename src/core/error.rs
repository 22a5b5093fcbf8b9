//! Custom error types for apiscout
//!
//! Provides a unified error handling system across all modules.

use thiserror::Error;

/// Stage of the two-stage workflow, used to attribute failures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Discovery,
    Consumption,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Stage::Discovery => write!(f, "discovery"),
            Stage::Consumption => write!(f, "consumption"),
        }
    }
}

/// Main error type for apiscout operations
#[derive(Error, Debug)]
pub enum ScoutError {
    /// Workflow input was empty or malformed
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A runner invocation completed without producing a final output
    #[error("{0} stage completed without a final output")]
    MissingOutput(Stage),

    /// The execution service reported a failure or never reached a terminal state
    #[error("gateway error: {0}")]
    Gateway(String),

    /// The workflow was cancelled before completing
    #[error("workflow cancelled")]
    Cancelled,

    /// Configuration errors
    #[error("configuration error: {0}")]
    Config(String),

    /// JSON parsing errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP request errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience Result type for apiscout operations
pub type Result<T> = std::result::Result<T, ScoutError>;

impl ScoutError {
    /// Create an invalid-input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create a gateway error
    pub fn gateway(msg: impl Into<String>) -> Self {
        Self::Gateway(msg.into())
    }

    /// Create a config error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_output_names_stage() {
        let err = ScoutError::MissingOutput(Stage::Discovery);
        assert_eq!(
            err.to_string(),
            "discovery stage completed without a final output"
        );

        let err = ScoutError::MissingOutput(Stage::Consumption);
        assert!(err.to_string().starts_with("consumption"));
    }
}
