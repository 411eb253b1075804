//! Shared error types for the engine

use thiserror::Error;

/// Main error type for smelter operations
#[derive(Debug, Error)]
pub enum Error {
    /// Malformed input; the whole analysis request is aborted
    #[error("Parse error at {line}:{column}: {message}")]
    Parse {
        line: usize,
        column: usize,
        message: String,
    },

    /// The tree carries no source span for a function, so line-based
    /// detection cannot run. Mutated trees must be serialized and re-parsed
    /// before detection is re-run.
    #[error("no source span recorded for function '{function}'")]
    MissingSpan { function: String },

    /// A rewrite referenced a declaration that is not in the tree
    #[error("rewrite failed: function '{name}' is not declared in this tree")]
    Rewrite { name: String },

    /// The mutated tree could not be rendered back to valid source
    #[error("serialization failed: {0}")]
    Serialization(String),
}

impl Error {
    /// Create a parse error with location
    pub fn parse(line: usize, column: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            line,
            column,
            message: message.into(),
        }
    }
}

/// Result type alias using our error type
pub type Result<T> = std::result::Result<T, Error>;
