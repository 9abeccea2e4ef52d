//! Identity and Credential Records
//!
//! This crate provides the canonical record types for users, access tokens,
//! API keys and single-sign-on handshake requests, together with the
//! invariants that keep them safe to persist and expose: credential
//! uniqueness, irreversible secret masking on export, deterministic UID
//! derivation from hashed material, and expiry-based lifecycle rules.
//!
//! Persistence and role resolution are external collaborators: records are
//! written through the [`store::Store`] contract and roles are resolved
//! through a pluggable [`rbac::RoleResolver`] backend.

pub mod models;
pub mod rbac;
pub mod services;
pub mod store;
pub mod utils;

pub use models::{
    derive_uid, ApiKey, Record, ResourceType, SsoRequest, SsoRequestKind, Token, User,
    MASKED_ATTRIBUTE_VALUE,
};
pub use rbac::{PermissionGrant, RbacRegistry, Role, RoleResolver};
pub use store::{Criteria, MemoryStore, Store, StoredRecord};
pub use utils::error::{AuthError, AuthResult};
