//! SSO handshake record service

use tracing::{debug, info};

use crate::models::SsoRequest;
use crate::store::{Criteria, Store};
use crate::utils::error::AuthResult;
use crate::utils::time;

/// Lifecycle of in-flight SSO handshake records.
///
/// Completion is single-shot: the record is consumed on verification, so a
/// replayed correlation id finds nothing.
pub struct SsoRequestService<S> {
    store: S,
}

impl<S: Store<SsoRequest>> SsoRequestService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Record the start of a handshake.
    pub async fn begin(&self, request: SsoRequest) -> AuthResult<SsoRequest> {
        let request = self.store.create(request).await?;
        info!(request_id = %request.request_id, kind = %request.kind, "sso handshake started");
        Ok(request)
    }

    /// Complete a handshake: consume its record and return it, or `None`
    /// when the id is unknown or the request already expired. The record
    /// is removed either way.
    pub async fn complete(&self, request_id: &str) -> AuthResult<Option<SsoRequest>> {
        let criteria = Criteria::new().field("request_id", request_id);
        let Some(request) = self.store.get_one(&criteria).await? else {
            return Ok(None);
        };
        self.store.delete(&criteria).await?;

        if request.is_expired() {
            debug!(request_id, "expired sso handshake discarded");
            return Ok(None);
        }
        info!(request_id, kind = %request.kind, "sso handshake completed");
        Ok(Some(request))
    }

    /// Drop every expired handshake record, returning the count.
    pub async fn purge_expired(&self) -> AuthResult<u64> {
        let now = time::utc_now();
        let mut purged = 0;
        for request in self.store.get(&Criteria::new()).await? {
            if request.expired_at(now) {
                purged += self
                    .store
                    .delete(&Criteria::new().field("request_id", request.request_id.as_str()))
                    .await?;
            }
        }
        if purged > 0 {
            debug!(count = purged, "expired sso handshakes purged");
        }
        Ok(purged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SsoRequestKind;
    use crate::store::MemoryStore;
    use chrono::Duration;

    fn service() -> SsoRequestService<MemoryStore<SsoRequest>> {
        SsoRequestService::new(MemoryStore::new())
    }

    #[tokio::test]
    async fn test_complete_is_single_shot() {
        let sso = service();
        let expiry = time::utc_now() + Duration::minutes(2);
        sso.begin(
            SsoRequest::new("req-1", SsoRequestKind::Cli, expiry)
                .unwrap()
                .with_key("symmetric-key"),
        )
        .await
        .unwrap();

        let completed = sso.complete("req-1").await.unwrap().unwrap();
        assert_eq!(completed.key.as_deref(), Some("symmetric-key"));

        assert!(sso.complete("req-1").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_complete_unknown_id() {
        let sso = service();
        assert!(sso.complete("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_complete_expired_request_consumes_record() {
        let sso = service();
        let expiry = time::utc_now() - Duration::minutes(2);
        sso.begin(SsoRequest::new("req-1", SsoRequestKind::Web, expiry).unwrap())
            .await
            .unwrap();

        assert!(sso.complete("req-1").await.unwrap().is_none());
        // Consumed even though it was expired.
        assert_eq!(sso.purge_expired().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_purge_expired() {
        let sso = service();
        let now = time::utc_now();
        sso.begin(SsoRequest::new("dead", SsoRequestKind::Web, now - Duration::minutes(1)).unwrap())
            .await
            .unwrap();
        sso.begin(SsoRequest::new("live", SsoRequestKind::Web, now + Duration::minutes(5)).unwrap())
            .await
            .unwrap();

        assert_eq!(sso.purge_expired().await.unwrap(), 1);
        assert!(sso.complete("live").await.unwrap().is_some());
    }
}
