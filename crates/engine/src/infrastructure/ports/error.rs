//! Error types for port operations.

/// Storage operation errors with context for debugging.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Backend operation failed - includes operation name for tracing.
    #[error("Storage error in {operation}: {message}")]
    Backend {
        operation: &'static str,
        message: String,
    },

    /// A stored value could not be encoded or decoded.
    #[error("Serialization error for key '{key}': {message}")]
    Serialization { key: String, message: String },
}

impl StorageError {
    /// Create a Backend error with operation context.
    pub fn backend(operation: &'static str, message: impl ToString) -> Self {
        Self::Backend {
            operation,
            message: message.to_string(),
        }
    }

    /// Create a Serialization error for a key.
    pub fn serialization(key: impl Into<String>, message: impl ToString) -> Self {
        Self::Serialization {
            key: key.into(),
            message: message.to_string(),
        }
    }
}
