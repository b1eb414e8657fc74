//! Error types for parameter binding.
//!
//! Binding is deliberately forgiving: unknown keys are skipped and failed
//! numeric/boolean coercions fall back to the type's default value. The
//! errors here cover the cases that cannot be absorbed silently — a bind
//! destination or source of the wrong shape, or a fault raised while
//! descending into a composite's fields.
//!
//! ```rust
//! use sift_query::error::BindError;
//!
//! let err = BindError::invalid_source("StringFilter expects a parameter map");
//! assert!(err.to_string().contains("parameter map"));
//! ```

use thiserror::Error;

/// Result type for binding operations.
pub type BindResult<T> = Result<T, BindError>;

/// Errors raised while binding normalized parameters into a criteria
/// composite.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BindError {
    /// The bind destination is not a criteria composite.
    #[error("invalid bind target: {0}")]
    InvalidTargetKind(String),

    /// The bind source is not a parameter map.
    #[error("invalid bind source: {0}")]
    InvalidSourceKind(String),

    /// A fault occurred while assigning one of a composite's fields.
    ///
    /// Fields assigned before the fault keep their values; there is no
    /// rollback.
    #[error("binding failed: {0}")]
    BindingFailed(String),
}

impl BindError {
    /// Create an [`BindError::InvalidTargetKind`] error.
    pub fn invalid_target(message: impl Into<String>) -> Self {
        Self::InvalidTargetKind(message.into())
    }

    /// Create an [`BindError::InvalidSourceKind`] error.
    pub fn invalid_source(message: impl Into<String>) -> Self {
        Self::InvalidSourceKind(message.into())
    }

    /// Create a [`BindError::BindingFailed`] error.
    pub fn binding_failed(message: impl Into<String>) -> Self {
        Self::BindingFailed(message.into())
    }

    /// Short machine-readable name for the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidTargetKind(_) => "invalid_target",
            Self::InvalidSourceKind(_) => "invalid_source",
            Self::BindingFailed(_) => "binding_failed",
        }
    }
}
