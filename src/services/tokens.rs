//! Token lifecycle service

use tracing::{debug, info};

use crate::models::Token;
use crate::store::{Criteria, Store};
use crate::utils::error::{AuthError, AuthResult};
use crate::utils::time;

/// Issuance bookkeeping and lifecycle management for access tokens.
///
/// Token values never appear in log events; only usernames and counts do.
pub struct TokenService<S> {
    store: S,
}

impl<S: Store<Token>> TokenService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Persist a freshly issued token. Duplicate token values fail with
    /// [`AuthError::UniquenessViolation`], enforced by the store.
    pub async fn issue(&self, token: Token) -> AuthResult<Token> {
        let token = self.store.create(token).await?;
        info!(user = %token.user, service = token.service, "token issued");
        Ok(token)
    }

    /// Look up a token by its credential value.
    pub async fn get(&self, value: &str) -> AuthResult<Option<Token>> {
        self.store
            .get_one(&Criteria::new().field("token", value))
            .await
    }

    /// Look up a token and reject it when missing or expired. The expired
    /// record is left in place until revoked or purged.
    pub async fn validate(&self, value: &str) -> AuthResult<Token> {
        let token = self
            .get(value)
            .await?
            .ok_or_else(|| AuthError::NotFound("token".to_string()))?;
        if token.is_expired() {
            return Err(AuthError::TokenExpired);
        }
        Ok(token)
    }

    /// Revoke a token by its credential value.
    pub async fn revoke(&self, value: &str) -> AuthResult<bool> {
        let removed = self
            .store
            .delete(&Criteria::new().field("token", value))
            .await?;
        if removed > 0 {
            info!("token revoked");
        }
        Ok(removed > 0)
    }

    /// Delete every token whose expiry has passed, returning the count.
    pub async fn purge_expired(&self) -> AuthResult<u64> {
        let now = time::utc_now();
        let mut purged = 0;
        for token in self.store.get(&Criteria::new()).await? {
            if token.expired_at(now) {
                purged += self
                    .store
                    .delete(&Criteria::new().field("token", token.token.as_str()))
                    .await?;
            }
        }
        if purged > 0 {
            debug!(count = purged, "expired tokens purged");
        }
        Ok(purged)
    }
}
