//! Error types and handling
//!
//! Errors surfaced by record construction, masking, and the collaborator
//! contracts. Validation fails fast at construction time; store and RBAC
//! backend failures are propagated to the caller unchanged, since this
//! crate has no context to decide retry or recovery policy. Nothing here
//! logs; user-visible failure behavior belongs to the calling layer.

use thiserror::Error;

/// Identity and credential record errors
#[derive(Debug, Error)]
pub enum AuthError {
    /// A required field is missing or a field value is malformed.
    #[error("validation error: {0}")]
    Validation(String),

    /// A declared-unique field collided with an existing record. Only the
    /// field name is reported; the colliding value may be secret material.
    #[error("uniqueness violation on field '{field}'")]
    UniquenessViolation { field: String },

    /// No RBAC backend is wired into the registry.
    #[error("no RBAC backend is configured")]
    BackendUnavailable,

    /// The RBAC backend failed while resolving roles.
    #[error("rbac backend error: {0}")]
    Backend(#[from] anyhow::Error),

    /// A lookup that requires a record came back empty.
    #[error("not found: {0}")]
    NotFound(String),

    /// An expired credential was presented.
    #[error("token expired")]
    TokenExpired,

    /// A record could not be serialized into its exported representation.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Reserved extension point with no implementation yet.
    #[error("not implemented: {0}")]
    NotImplemented(&'static str),
}

impl From<validator::ValidationErrors> for AuthError {
    fn from(err: validator::ValidationErrors) -> Self {
        AuthError::Validation(err.to_string())
    }
}

/// Result type alias for this crate's fallible operations.
pub type AuthResult<T> = Result<T, AuthError>;
