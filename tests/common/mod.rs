//! Common test utilities
//!
//! Shared stub collaborators and helpers for the integration tests.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use identity_core::utils::time;
use identity_core::{AuthError, AuthResult, Role, RoleResolver, User};

/// Role resolver stub with distinct local and remote role sets.
///
/// Resolving the user `ghost` fails, standing in for a backend that cannot
/// resolve the identity.
pub struct StubResolver {
    local: Vec<Role>,
    remote: Vec<Role>,
}

impl StubResolver {
    pub fn new(local: &[&str], remote: &[&str]) -> Self {
        Self {
            local: local.iter().map(|name| Role::new(*name)).collect(),
            remote: remote.iter().map(|name| Role::new(*name)).collect(),
        }
    }
}

#[async_trait]
impl RoleResolver for StubResolver {
    async fn get_roles_for_user(
        &self,
        user: &User,
        include_remote: bool,
    ) -> AuthResult<Vec<Role>> {
        if user.name == "ghost" {
            return Err(AuthError::Backend(anyhow::anyhow!(
                "user not found: {}",
                user.name
            )));
        }
        let mut roles = self.local.clone();
        if include_remote {
            roles.extend(self.remote.iter().cloned());
        }
        Ok(roles)
    }
}

/// An expiry `minutes` from now (negative for the past).
pub fn expiry_in_minutes(minutes: i64) -> DateTime<Utc> {
    time::utc_now() + Duration::minutes(minutes)
}
