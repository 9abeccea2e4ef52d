//! Persistence collaborator contract
//!
//! Records are persisted by an external store. This module declares the
//! contract that store must honor: surrogate-id addressing, equality
//! criteria lookup over indexed fields, and atomic enforcement of the
//! uniqueness constraints each record type declares. The engine behind the
//! contract is a collaborator concern; [`MemoryStore`] is the reference
//! implementation used by tests and embedded callers.

pub mod memory;

pub use memory::MemoryStore;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

use crate::models::{ApiKey, ResourceType, SsoRequest, Token, User};
use crate::utils::error::AuthResult;

/// Store-level declarations for a record type.
///
/// Uniqueness is enforced by the store at write time; record code requests
/// the constraint here instead of re-implementing it.
pub trait StoredRecord: Clone + Send + Sync + Serialize + DeserializeOwned + 'static {
    /// Namespace this record type persists under.
    const RESOURCE_TYPE: ResourceType;

    /// Fields the store must keep globally unique, atomically at write
    /// time.
    fn unique_fields() -> &'static [&'static str] {
        &[]
    }

    /// Fields the store should index for criteria lookup.
    fn indexed_fields() -> &'static [&'static str] {
        &[]
    }

    /// Store-assigned surrogate id, present once persisted.
    fn surrogate_id(&self) -> Option<Uuid>;

    /// Called by the store when it assigns the surrogate id.
    fn set_surrogate_id(&mut self, id: Uuid);
}

impl StoredRecord for User {
    const RESOURCE_TYPE: ResourceType = ResourceType::User;

    fn unique_fields() -> &'static [&'static str] {
        &["name"]
    }

    fn indexed_fields() -> &'static [&'static str] {
        &["name"]
    }

    fn surrogate_id(&self) -> Option<Uuid> {
        self.id
    }

    fn set_surrogate_id(&mut self, id: Uuid) {
        self.id = Some(id);
    }
}

impl StoredRecord for Token {
    const RESOURCE_TYPE: ResourceType = ResourceType::Token;

    fn unique_fields() -> &'static [&'static str] {
        &["token"]
    }

    fn indexed_fields() -> &'static [&'static str] {
        &["user", "token"]
    }

    fn surrogate_id(&self) -> Option<Uuid> {
        self.id
    }

    fn set_surrogate_id(&mut self, id: Uuid) {
        self.id = Some(id);
    }
}

impl StoredRecord for ApiKey {
    const RESOURCE_TYPE: ResourceType = ResourceType::ApiKey;

    fn unique_fields() -> &'static [&'static str] {
        &["key_hash"]
    }

    fn indexed_fields() -> &'static [&'static str] {
        &["user", "key_hash"]
    }

    fn surrogate_id(&self) -> Option<Uuid> {
        self.id
    }

    fn set_surrogate_id(&mut self, id: Uuid) {
        self.id = Some(id);
    }
}

// request_id uniqueness is deliberately not declared: it is the issuer's
// responsibility per in-flight handshake.
impl StoredRecord for SsoRequest {
    const RESOURCE_TYPE: ResourceType = ResourceType::SsoRequest;

    fn indexed_fields() -> &'static [&'static str] {
        &["request_id"]
    }

    fn surrogate_id(&self) -> Option<Uuid> {
        self.id
    }

    fn set_surrogate_id(&mut self, id: Uuid) {
        self.id = Some(id);
    }
}

/// Conjunction of field equality predicates for store lookups.
#[derive(Debug, Clone, Default)]
pub struct Criteria {
    fields: Vec<(String, Value)>,
}

impl Criteria {
    /// Criteria matching every record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Require `field` to equal `value`.
    pub fn field(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.push((field.into(), value.into()));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Whether a serialized record document satisfies every predicate.
    pub fn matches(&self, document: &Value) -> bool {
        self.fields
            .iter()
            .all(|(field, expected)| document.get(field) == Some(expected))
    }
}

/// Persistence operations a store collaborator provides for one record
/// type.
///
/// Implementations must be safe for concurrent use at the granularity of a
/// single operation, and must enforce declared uniqueness atomically with
/// the write.
#[async_trait]
pub trait Store<T: StoredRecord>: Send + Sync {
    /// Persist a new record, assigning its surrogate id. Fails with
    /// [`crate::utils::error::AuthError::UniquenessViolation`] when a
    /// declared unique field collides with an existing record.
    async fn create(&self, record: T) -> AuthResult<T>;

    /// All records matching `criteria`.
    async fn get(&self, criteria: &Criteria) -> AuthResult<Vec<T>>;

    /// The first record matching `criteria`, if any. No ordering is
    /// promised for non-unique lookups.
    async fn get_one(&self, criteria: &Criteria) -> AuthResult<Option<T>> {
        Ok(self.get(criteria).await?.into_iter().next())
    }

    /// Replace a previously-persisted record, matched by surrogate id.
    async fn update(&self, record: &T) -> AuthResult<T>;

    /// Delete all records matching `criteria`, returning the count
    /// removed.
    async fn delete(&self, criteria: &Criteria) -> AuthResult<u64>;
}
