//! SSO handshake request record

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::record::Record;
use crate::utils::error::{AuthError, AuthResult};
use crate::utils::time;
use crate::utils::validation;

/// Client channel that initiated an SSO handshake.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SsoRequestKind {
    /// Command-line client; responses are encrypted with the request key.
    Cli,
    /// Browser client.
    Web,
}

impl std::fmt::Display for SsoRequestKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SsoRequestKind::Cli => write!(f, "cli"),
            SsoRequestKind::Web => write!(f, "web"),
        }
    }
}

impl std::str::FromStr for SsoRequestKind {
    type Err = AuthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "cli" => Ok(SsoRequestKind::Cli),
            "web" => Ok(SsoRequestKind::Web),
            _ => Err(AuthError::Validation(format!(
                "invalid sso request type: {}",
                s
            ))),
        }
    }
}

/// An in-flight single-sign-on handshake, correlating the external
/// exchange back to the client channel that started it.
///
/// `request_id` uniqueness per in-flight handshake is the issuer's
/// responsibility; it is not declared to the store.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SsoRequest {
    /// Store-assigned surrogate id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    /// Correlation id for the handshake.
    #[validate(length(min = 1, message = "request_id is required"))]
    pub request_id: String,
    /// Symmetric key for encrypting payloads back to a CLI client.
    ///
    /// Populated for CLI handshakes. The pairing with `kind` is not
    /// enforced by this record; issuing callers own that rule.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    /// Instant at which this handshake stops being honored.
    pub expiry: DateTime<Utc>,
    /// Client channel that opened the handshake.
    #[serde(rename = "type")]
    pub kind: SsoRequestKind,
}

impl SsoRequest {
    /// Create a handshake record. `request_id` must be non-empty.
    pub fn new(
        request_id: impl Into<String>,
        kind: SsoRequestKind,
        expiry: DateTime<Utc>,
    ) -> AuthResult<Self> {
        let request = Self {
            id: None,
            request_id: request_id.into(),
            key: None,
            expiry,
            kind,
        };
        request.validate()?;
        if !validation::validate_request_id(&request.request_id) {
            return Err(AuthError::Validation(format!(
                "invalid request_id: {:?}",
                request.request_id
            )));
        }
        Ok(request)
    }

    /// Attach the symmetric key handed to a CLI client.
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Whether this handshake's expiry has passed.
    pub fn is_expired(&self) -> bool {
        self.expired_at(time::utc_now())
    }

    /// Expiry check against an explicit instant; the boundary counts as
    /// expired.
    pub fn expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expiry
    }
}

impl Record for SsoRequest {}
