//! API key lifecycle service

use tracing::info;

use crate::models::ApiKey;
use crate::store::{Criteria, Store};
use crate::utils::error::{AuthError, AuthResult};

/// Registration and administration of API key records.
///
/// `key_hash` and `uid` never appear in log events; the uid embeds the
/// hash.
pub struct ApiKeyService<S> {
    store: S,
}

impl<S: Store<ApiKey>> ApiKeyService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Register a key record built from an already-hashed secret.
    /// Duplicate hashes fail with [`AuthError::UniquenessViolation`],
    /// enforced by the store.
    pub async fn register(&self, key: ApiKey) -> AuthResult<ApiKey> {
        let key = self.store.create(key).await?;
        info!(user = %key.user, "api key registered");
        Ok(key)
    }

    /// Look up a key by the hash of its secret. Callers needing the real
    /// hash for matching read the live record here, never a masked export.
    pub async fn get_by_hash(&self, key_hash: &str) -> AuthResult<Option<ApiKey>> {
        self.store
            .get_one(&Criteria::new().field("key_hash", key_hash))
            .await
    }

    /// All keys issued to `user`.
    pub async fn list_for_user(&self, user: &str) -> AuthResult<Vec<ApiKey>> {
        self.store.get(&Criteria::new().field("user", user)).await
    }

    /// Revoke or reinstate a key without deleting its history.
    pub async fn set_enabled(&self, key_hash: &str, enabled: bool) -> AuthResult<ApiKey> {
        let mut key = self
            .get_by_hash(key_hash)
            .await?
            .ok_or_else(|| AuthError::NotFound("api key".to_string()))?;
        key.enabled = enabled;
        let key = self.store.update(&key).await?;
        info!(user = %key.user, enabled, "api key toggled");
        Ok(key)
    }

    /// Delete a key record outright.
    pub async fn delete(&self, key_hash: &str) -> AuthResult<bool> {
        let removed = self
            .store
            .delete(&Criteria::new().field("key_hash", key_hash))
            .await?;
        Ok(removed > 0)
    }
}
