//! In-memory reference store
//!
//! Backs tests and embedded callers. The uniqueness scan and the write
//! happen under one write guard, the same atomicity a database store gets
//! from unique indexes. Criteria matching runs over the serialized
//! document form, so one implementation serves every record type.

use std::collections::HashMap;
use std::marker::PhantomData;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use super::{Criteria, Store, StoredRecord};
use crate::utils::error::{AuthError, AuthResult};

/// In-memory store for one record type, keyed by surrogate id.
pub struct MemoryStore<T> {
    records: RwLock<HashMap<Uuid, Value>>,
    _record: PhantomData<T>,
}

impl<T: StoredRecord> MemoryStore<T> {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
            _record: PhantomData,
        }
    }

    fn to_document(record: &T) -> AuthResult<Value> {
        Ok(serde_json::to_value(record)?)
    }

    fn from_document(document: &Value) -> AuthResult<T> {
        Ok(serde_json::from_value(document.clone())?)
    }

    /// Scan for a unique-field collision, skipping the record being
    /// replaced on updates.
    fn check_unique(
        existing: &HashMap<Uuid, Value>,
        document: &Value,
        skip: Option<Uuid>,
    ) -> AuthResult<()> {
        for field in T::unique_fields() {
            let Some(value) = document.get(*field) else {
                continue;
            };
            if value.is_null() {
                continue;
            }
            for (id, other) in existing {
                if Some(*id) == skip {
                    continue;
                }
                if other.get(*field) == Some(value) {
                    return Err(AuthError::UniquenessViolation {
                        field: (*field).to_string(),
                    });
                }
            }
        }
        Ok(())
    }
}

impl<T: StoredRecord> Default for MemoryStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T: StoredRecord> Store<T> for MemoryStore<T> {
    async fn create(&self, mut record: T) -> AuthResult<T> {
        let mut records = self.records.write().await;

        let id = Uuid::new_v4();
        record.set_surrogate_id(id);
        let document = Self::to_document(&record)?;
        Self::check_unique(&records, &document, None)?;
        records.insert(id, document);

        debug!(resource = %T::RESOURCE_TYPE, %id, "record created");
        Ok(record)
    }

    async fn get(&self, criteria: &Criteria) -> AuthResult<Vec<T>> {
        let records = self.records.read().await;
        let mut matches = Vec::new();
        for document in records.values() {
            if criteria.matches(document) {
                matches.push(Self::from_document(document)?);
            }
        }
        Ok(matches)
    }

    async fn update(&self, record: &T) -> AuthResult<T> {
        let id = record.surrogate_id().ok_or_else(|| {
            AuthError::Validation("cannot update a record that was never persisted".to_string())
        })?;

        let mut records = self.records.write().await;
        if !records.contains_key(&id) {
            return Err(AuthError::NotFound(format!("{} {}", T::RESOURCE_TYPE, id)));
        }
        let document = Self::to_document(record)?;
        Self::check_unique(&records, &document, Some(id))?;
        records.insert(id, document);

        debug!(resource = %T::RESOURCE_TYPE, %id, "record updated");
        Ok(record.clone())
    }

    async fn delete(&self, criteria: &Criteria) -> AuthResult<u64> {
        let mut records = self.records.write().await;
        let doomed: Vec<Uuid> = records
            .iter()
            .filter(|(_, document)| criteria.matches(document))
            .map(|(id, _)| *id)
            .collect();
        for id in &doomed {
            records.remove(id);
        }

        if !doomed.is_empty() {
            debug!(resource = %T::RESOURCE_TYPE, count = doomed.len(), "records deleted");
        }
        Ok(doomed.len() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Token, User};
    use crate::utils::time;
    use chrono::Duration;

    #[tokio::test]
    async fn test_create_assigns_surrogate_id() {
        let store = MemoryStore::<User>::new();
        let user = store.create(User::new("anna").unwrap()).await.unwrap();
        assert!(user.id.is_some());
    }

    #[tokio::test]
    async fn test_create_enforces_declared_uniqueness() {
        let store = MemoryStore::<User>::new();
        store.create(User::new("anna").unwrap()).await.unwrap();

        let duplicate = store.create(User::new("anna").unwrap()).await;
        assert!(matches!(
            duplicate,
            Err(AuthError::UniquenessViolation { ref field }) if field == "name"
        ));
    }

    #[tokio::test]
    async fn test_get_by_indexed_field() {
        let store = MemoryStore::<Token>::new();
        let expiry = time::utc_now() + Duration::minutes(5);
        store
            .create(Token::new("anna", "tok-1", expiry).unwrap())
            .await
            .unwrap();
        store
            .create(Token::new("anna", "tok-2", expiry).unwrap())
            .await
            .unwrap();
        store
            .create(Token::new("ben", "tok-3", expiry).unwrap())
            .await
            .unwrap();

        let annas = store
            .get(&Criteria::new().field("user", "anna"))
            .await
            .unwrap();
        assert_eq!(annas.len(), 2);

        let one = store
            .get_one(&Criteria::new().field("token", "tok-3"))
            .await
            .unwrap();
        assert_eq!(one.unwrap().user, "ben");
    }

    #[tokio::test]
    async fn test_update_replaces_by_surrogate_id() {
        let store = MemoryStore::<User>::new();
        let mut user = store.create(User::new("anna").unwrap()).await.unwrap();

        user.nicknames
            .insert("irc".to_string(), "annie".to_string());
        store.update(&user).await.unwrap();

        let reloaded = store
            .get_one(&Criteria::new().field("name", "anna"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(reloaded.nicknames.get("irc").map(String::as_str), Some("annie"));
    }

    #[tokio::test]
    async fn test_update_rejects_unpersisted_record() {
        let store = MemoryStore::<User>::new();
        let user = User::new("anna").unwrap();
        assert!(matches!(
            store.update(&user).await,
            Err(AuthError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_update_keeps_uniqueness_across_other_records() {
        let store = MemoryStore::<User>::new();
        store.create(User::new("anna").unwrap()).await.unwrap();
        let mut ben = store.create(User::new("ben").unwrap()).await.unwrap();

        ben.name = "anna".to_string();
        assert!(matches!(
            store.update(&ben).await,
            Err(AuthError::UniquenessViolation { .. })
        ));
    }

    #[tokio::test]
    async fn test_delete_returns_count() {
        let store = MemoryStore::<Token>::new();
        let expiry = time::utc_now() + Duration::minutes(5);
        store
            .create(Token::new("anna", "tok-1", expiry).unwrap())
            .await
            .unwrap();
        store
            .create(Token::new("anna", "tok-2", expiry).unwrap())
            .await
            .unwrap();

        let removed = store
            .delete(&Criteria::new().field("user", "anna"))
            .await
            .unwrap();
        assert_eq!(removed, 2);
        assert!(store.get(&Criteria::new()).await.unwrap().is_empty());
    }
}
