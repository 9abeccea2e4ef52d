//! Role resolution backend contract
//!
//! Which roles a user holds is decided by a pluggable RBAC backend outside
//! this crate. This module defines the resolver contract, the role types
//! it returns, and the registry handle records use to reach the active
//! backend. Policy evaluation itself lives entirely in the backend.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::models::User;
use crate::utils::error::{AuthError, AuthResult};

/// A named role as resolved by the backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Role {
    /// Role name, unique within the backend.
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// True for built-in roles the backend refuses to modify.
    #[serde(default)]
    pub system: bool,
    /// Identifiers of the permission grants attached to this role.
    #[serde(default)]
    pub permission_grants: Vec<String>,
}

impl Role {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            system: false,
            permission_grants: Vec::new(),
        }
    }
}

/// A single resource/permission pairing, reserved for future listing APIs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PermissionGrant {
    /// UID of the resource the grant applies to.
    pub resource_uid: String,
    pub resource_type: String,
    /// Permission type names granted on the resource.
    pub permission_types: Vec<String>,
}

/// Resolves role assignments for a user identity.
///
/// Implementations may reach a database or a remote service; every call is
/// a suspension point and timeout policy belongs to the caller and the
/// backend, not to this crate.
#[async_trait]
pub trait RoleResolver: Send + Sync {
    /// Roles assigned to `user`, in backend order. With `include_remote`,
    /// assignments synced from remote systems are included as well.
    async fn get_roles_for_user(&self, user: &User, include_remote: bool)
        -> AuthResult<Vec<Role>>;
}

/// Handle to the active role-resolution backend.
///
/// Which concrete backend is active is wiring-time configuration; an empty
/// registry makes every role lookup fail with
/// [`AuthError::BackendUnavailable`].
#[derive(Clone, Default)]
pub struct RbacRegistry {
    resolver: Option<Arc<dyn RoleResolver>>,
}

impl RbacRegistry {
    /// Registry with no backend configured.
    pub fn new() -> Self {
        Self { resolver: None }
    }

    /// Registry backed by `resolver`.
    pub fn with_resolver(resolver: Arc<dyn RoleResolver>) -> Self {
        Self {
            resolver: Some(resolver),
        }
    }

    /// The active resolver, or `BackendUnavailable` when none is wired.
    pub fn resolver(&self) -> AuthResult<&dyn RoleResolver> {
        self.resolver
            .as_deref()
            .ok_or(AuthError::BackendUnavailable)
    }
}

impl std::fmt::Debug for RbacRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RbacRegistry")
            .field("configured", &self.resolver.is_some())
            .finish()
    }
}
