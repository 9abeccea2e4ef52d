//! User record

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::record::Record;
use crate::rbac::{PermissionGrant, RbacRegistry, Role};
use crate::utils::error::{AuthError, AuthResult};
use crate::utils::validation;

/// A system user account.
///
/// `name` doubles as the foreign key credential records use to refer to
/// their owner, so it is globally unique. Tokens and API keys store the
/// username by value; deleting a user does not cascade to them.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct User {
    /// Store-assigned surrogate id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    /// Username, globally unique.
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    /// True for service accounts.
    #[serde(default)]
    pub is_service: bool,
    /// Chat origin -> nickname pairs for ChatOps identities.
    #[serde(default)]
    pub nicknames: HashMap<String, String>,
}

impl User {
    /// Create a user record for `name`.
    pub fn new(name: impl Into<String>) -> AuthResult<Self> {
        let user = Self {
            id: None,
            name: name.into(),
            is_service: false,
            nicknames: HashMap::new(),
        };
        user.validate()?;
        if !validation::validate_username(&user.name) {
            return Err(AuthError::Validation(format!(
                "invalid username: {:?}",
                user.name
            )));
        }
        Ok(user)
    }

    /// Mark this account as a service account.
    pub fn service(mut self) -> Self {
        self.is_service = true;
        self
    }

    /// Roles assigned to this user, resolved by the active RBAC backend.
    ///
    /// Pass `include_remote = true` to also include remote role
    /// assignments. Results are returned in the backend's order, with no
    /// local caching or filtering. Fails with
    /// [`AuthError::BackendUnavailable`] when no backend is wired into the
    /// registry; backend failures propagate unchanged.
    pub async fn get_roles(
        &self,
        rbac: &RbacRegistry,
        include_remote: bool,
    ) -> AuthResult<Vec<Role>> {
        let resolver = rbac.resolver()?;
        resolver.get_roles_for_user(self, include_remote).await
    }

    /// Reserved extension point for listing direct permission grants.
    ///
    /// Callers must not depend on this returning a value.
    pub fn get_permission_assignments(&self) -> AuthResult<Vec<PermissionGrant>> {
        Err(AuthError::NotImplemented("permission assignment listing"))
    }
}

impl Record for User {}
