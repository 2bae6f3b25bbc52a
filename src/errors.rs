//! Error types for reasongraph
//!
//! This module defines the error types used throughout the library.
//! Every variant is fatal for the run that produced it: the pipeline either
//! yields one complete merged graph or aborts.

use thiserror::Error;

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, GraphError>;

/// Main error type for reasongraph
#[derive(Error, Debug, Clone)]
pub enum GraphError {
    /// The tabular data source could not be read or parsed
    #[error("Load failure: {message}")]
    Load { message: String },

    /// The morphological analyzer could not be built or failed on a text
    #[error("Tokenizer failure: {message}")]
    Tokenizer { message: String },

    /// Configuration validation failed
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// A relation references a text that was never registered as a vertex
    #[error("No component for text {text:?}")]
    MissingComponent { text: String },

    /// A layout does not cover the graph it is supposed to describe
    #[error("Layout mismatch: {message}")]
    Layout { message: String },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {message}")]
    Serialization { message: String },

    /// Writing an output failed
    #[error("I/O error: {message}")]
    Io { message: String },

    /// Internal error (should not occur in normal usage)
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl GraphError {
    /// Create a load error
    pub fn load(message: impl Into<String>) -> Self {
        Self::Load {
            message: message.into(),
        }
    }

    /// Create a tokenizer error
    pub fn tokenizer(message: impl Into<String>) -> Self {
        Self::Tokenizer {
            message: message.into(),
        }
    }

    /// Create an invalid config error
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create a missing component error
    pub fn missing_component(text: impl Into<String>) -> Self {
        Self::MissingComponent { text: text.into() }
    }

    /// Create a layout error
    pub fn layout(message: impl Into<String>) -> Self {
        Self::Layout {
            message: message.into(),
        }
    }

    /// Create a serialization error
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization {
            message: message.into(),
        }
    }

    /// Create an I/O error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Check if this error indicates a broken registry/relation invariant
    pub fn is_invariant_violation(&self) -> bool {
        matches!(self, Self::MissingComponent { .. })
    }
}

impl From<serde_json::Error> for GraphError {
    fn from(err: serde_json::Error) -> Self {
        Self::serialization(err.to_string())
    }
}

impl From<csv::Error> for GraphError {
    fn from(err: csv::Error) -> Self {
        Self::load(err.to_string())
    }
}

impl From<std::io::Error> for GraphError {
    fn from(err: std::io::Error) -> Self {
        Self::io(err.to_string())
    }
}
