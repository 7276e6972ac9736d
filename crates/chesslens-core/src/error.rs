//! Error types for the ChessLens client.

use thiserror::Error;

/// A shared error type for the entire ChessLens client.
///
/// Every remote call is converted into one of the workflow kinds
/// (`Prediction`, `Fetch`, `NotFound`, `Save`, `Delete`) at the component
/// boundary; raw transport errors never escape the HTTP adapter. The
/// remaining variants cover client-side preconditions and ambient plumbing.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LensError {
    /// Image analysis failed. Terminal for the invocation; the user retries manually.
    #[error("Prediction failed: {0}")]
    Prediction(String),

    /// A read from the remote library failed.
    #[error("Failed to fetch: {0}")]
    Fetch(String),

    /// Entity not found error with type information
    #[error("Entity not found: {entity_type} '{id}'")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// Create or update failed. Working data is preserved for retry.
    #[error("Failed to save: {0}")]
    Save(String),

    /// Delete failed. The library store rolls back its optimistic removal.
    #[error("Failed to delete: {0}")]
    Delete(String),

    /// No credential is present; the caller should redirect to login.
    #[error("Not authenticated")]
    Unauthenticated,

    /// Login or registration was rejected.
    #[error("Authentication error: {0}")]
    Auth(String),

    /// A capture is already in flight on this workflow instance.
    #[error("A capture is already in progress")]
    Busy,

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "TOML", "JSON", etc.
        message: String,
    },

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl LensError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a Prediction error
    pub fn prediction(message: impl Into<String>) -> Self {
        Self::Prediction(message.into())
    }

    /// Creates a Fetch error
    pub fn fetch(message: impl Into<String>) -> Self {
        Self::Fetch(message.into())
    }

    /// Creates a NotFound error
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    /// Creates a Save error
    pub fn save(message: impl Into<String>) -> Self {
        Self::Save(message.into())
    }

    /// Creates a Delete error
    pub fn delete(message: impl Into<String>) -> Self {
        Self::Delete(message.into())
    }

    /// Creates an Auth error
    pub fn auth(message: impl Into<String>) -> Self {
        Self::Auth(message.into())
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    // ============================================================================
    // Classification
    // ============================================================================

    /// Re-labels this error as `kind` unless it already is one.
    ///
    /// `Unauthenticated` and `NotFound` pass through untouched so callers can
    /// still redirect to login or end the session. Everything else is
    /// rewrapped with its message, e.g.
    /// `err.classify_as(LensError::Delete)`.
    pub fn classify_as(self, kind: fn(String) -> LensError) -> LensError {
        let expected = kind(String::new());
        if self.is_unauthenticated()
            || self.is_not_found()
            || std::mem::discriminant(&self) == std::mem::discriminant(&expected)
        {
            self
        } else {
            kind(self.to_string())
        }
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this is a NotFound error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if the caller should send the user to the login screen
    pub fn is_unauthenticated(&self) -> bool {
        matches!(self, Self::Unauthenticated)
    }

    /// Check if the failed action can be retried with the data the user already has.
    ///
    /// Saves and deletes leave the user's data intact (working copy or rolled
    /// back collection), and reads can simply be reissued. Predictions,
    /// missing records and configuration problems need the user to change
    /// something first.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::Fetch(_) | Self::Save(_) | Self::Delete(_) | Self::Busy
        )
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for LensError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for LensError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for LensError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for LensError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, LensError>`.
pub type Result<T> = std::result::Result<T, LensError>;
