//! User provisioning service

use tracing::info;

use crate::models::User;
use crate::store::{Criteria, Store};
use crate::utils::error::{AuthError, AuthResult};

/// Account provisioning and identity-management operations.
pub struct UserService<S> {
    store: S,
}

impl<S: Store<User>> UserService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Provision an account. Duplicate names fail with
    /// [`AuthError::UniquenessViolation`], enforced by the store.
    pub async fn create(&self, user: User) -> AuthResult<User> {
        let user = self.store.create(user).await?;
        info!(user = %user.name, service = user.is_service, "user created");
        Ok(user)
    }

    /// Look up an account by username.
    pub async fn get_by_name(&self, name: &str) -> AuthResult<Option<User>> {
        self.store
            .get_one(&Criteria::new().field("name", name))
            .await
    }

    /// Record or replace the nickname this user goes by on a chat origin.
    pub async fn set_nickname(
        &self,
        name: &str,
        origin: &str,
        nickname: &str,
    ) -> AuthResult<User> {
        let mut user = self
            .get_by_name(name)
            .await?
            .ok_or_else(|| AuthError::NotFound(format!("user {}", name)))?;
        user.nicknames
            .insert(origin.to_string(), nickname.to_string());
        self.store.update(&user).await
    }

    /// Delete an account. Credential records referencing the name are left
    /// in place; sweeping them is the caller's decision.
    pub async fn delete(&self, name: &str) -> AuthResult<bool> {
        let removed = self
            .store
            .delete(&Criteria::new().field("name", name))
            .await?;
        if removed > 0 {
            info!(user = %name, "user deleted");
        }
        Ok(removed > 0)
    }
}
