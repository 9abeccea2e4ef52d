//! Access token record

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;
use validator::Validate;

use crate::models::record::Record;
use crate::utils::error::AuthResult;
use crate::utils::time;

/// A short-lived bearer token bound to a user by name.
///
/// Tokens are immutable after issuance; their only lifecycle transitions
/// are implicit expiry and explicit revocation. They are internal-trust
/// records with no secret fields declared: callers presenting a token
/// externally decide which fields to reveal.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Token {
    /// Store-assigned surrogate id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    /// Owning username, stored by value with no referential integrity.
    #[validate(length(min = 1, message = "user is required"))]
    pub user: String,
    /// Opaque bearer credential, globally unique.
    #[validate(length(min = 1, message = "token is required"))]
    pub token: String,
    /// Instant at which this token stops being valid.
    pub expiry: DateTime<Utc>,
    /// Arbitrary metadata attached at issuance.
    #[serde(default)]
    pub metadata: HashMap<String, Value>,
    /// True for service (system) tokens.
    #[serde(default)]
    pub service: bool,
}

impl Token {
    /// Create a token record. `user` and `token` must be non-empty.
    pub fn new(
        user: impl Into<String>,
        token: impl Into<String>,
        expiry: DateTime<Utc>,
    ) -> AuthResult<Self> {
        let token = Self {
            id: None,
            user: user.into(),
            token: token.into(),
            expiry,
            metadata: HashMap::new(),
            service: false,
        };
        token.validate()?;
        Ok(token)
    }

    /// Attach issuance metadata.
    pub fn with_metadata(mut self, metadata: HashMap<String, Value>) -> Self {
        self.metadata = metadata;
        self
    }

    /// Mark this token as a service token.
    pub fn service(mut self) -> Self {
        self.service = true;
        self
    }

    /// Whether this token's expiry has passed.
    pub fn is_expired(&self) -> bool {
        self.expired_at(time::utc_now())
    }

    /// Expiry check against an explicit instant. A token whose expiry
    /// equals `now` is already expired.
    pub fn expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expiry
    }
}

impl Record for Token {}
