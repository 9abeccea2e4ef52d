//! API key record

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;
use validator::Validate;

use crate::models::record::{derive_uid, Record, ResourceType};
use crate::utils::error::AuthResult;
use crate::utils::time;

/// Fields overwritten by the masking sentinel on every masked export.
const SECRET_FIELDS: &[&str] = &["key_hash", "uid"];

fn default_enabled() -> bool {
    true
}

/// A long-lived credential addressed by the hash of its secret.
///
/// Callers hash the key secret before constructing this record (see
/// [`crate::utils::hash`]); the raw secret never reaches this crate. Each
/// key is scoped to its owning user and inherits that user's permissions.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ApiKey {
    /// Store-assigned surrogate id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    /// Owning username, stored by value with no referential integrity.
    #[validate(length(min = 1, message = "user is required"))]
    pub user: String,
    /// One-way hash of the key secret, globally unique.
    #[validate(length(min = 1, message = "key_hash is required"))]
    pub key_hash: String,
    /// Arbitrary metadata attached at issuance.
    #[serde(default)]
    pub metadata: HashMap<String, Value>,
    /// Creation time, microsecond precision.
    pub created_at: DateTime<Utc>,
    /// Disabled keys are rejected by callers without being deleted, so
    /// issuance history survives revocation.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Derived identifier, a pure function of `key_hash`. Recomputed at
    /// construction, never settable independently.
    pub uid: String,
}

impl ApiKey {
    /// Build a key record from an already-hashed secret.
    pub fn new(user: impl Into<String>, key_hash: impl Into<String>) -> AuthResult<Self> {
        let key_hash = key_hash.into();
        let uid = derive_uid(ResourceType::ApiKey, &[key_hash.as_str()]);
        let key = Self {
            id: None,
            user: user.into(),
            key_hash,
            metadata: HashMap::new(),
            created_at: time::utc_now(),
            enabled: true,
            uid,
        };
        key.validate()?;
        Ok(key)
    }

    /// Attach issuance metadata.
    pub fn with_metadata(mut self, metadata: HashMap<String, Value>) -> Self {
        self.metadata = metadata;
        self
    }

    /// Reinstate a disabled key.
    pub fn enable(&mut self) {
        self.enabled = true;
    }

    /// Revoke this key without deleting it.
    pub fn disable(&mut self) {
        self.enabled = false;
    }
}

impl Record for ApiKey {
    // The hash is one way and nominally safe to show, but a leaked hash
    // plus a precomputed table still has value to an attacker, and the uid
    // embeds the hash. Both stay masked on every export.
    fn secret_fields(&self) -> &'static [&'static str] {
        SECRET_FIELDS
    }
}
