//! In-memory session store with expired-record pruning.
//!
//! Sessions only hold the placeholder login, the scroll offset and the cart,
//! so they live in process memory and vanish on restart. Expired records are
//! hidden on load and removed by [`prune_expired_sessions`].

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tower_sessions::SessionStore;
use tower_sessions::cookie::time::OffsetDateTime;
use tower_sessions::session::{Id, Record};
use tower_sessions::session_store::{self, ExpiredDeletion};

/// Session records keyed by ID.
#[derive(Clone, Debug, Default)]
pub struct SessionMemoryStore(Arc<Mutex<HashMap<Id, Record>>>);

impl SessionMemoryStore {
    /// Number of stored records, expired or not.
    pub async fn len(&self) -> usize {
        self.0.lock().await.len()
    }

    /// Whether no records are stored.
    pub async fn is_empty(&self) -> bool {
        self.0.lock().await.is_empty()
    }
}

fn is_active(record: &Record) -> bool {
    record.expiry_date > OffsetDateTime::now_utc()
}

#[async_trait]
impl SessionStore for SessionMemoryStore {
    async fn create(&self, record: &mut Record) -> session_store::Result<()> {
        let mut records = self.0.lock().await;
        while records.contains_key(&record.id) {
            record.id = Id::default();
        }
        records.insert(record.id, record.clone());
        Ok(())
    }

    async fn save(&self, record: &Record) -> session_store::Result<()> {
        self.0.lock().await.insert(record.id, record.clone());
        Ok(())
    }

    async fn load(&self, session_id: &Id) -> session_store::Result<Option<Record>> {
        Ok(self
            .0
            .lock()
            .await
            .get(session_id)
            .filter(|record| is_active(record))
            .cloned())
    }

    async fn delete(&self, session_id: &Id) -> session_store::Result<()> {
        self.0.lock().await.remove(session_id);
        Ok(())
    }
}

#[async_trait]
impl ExpiredDeletion for SessionMemoryStore {
    async fn delete_expired(&self) -> session_store::Result<()> {
        self.0.lock().await.retain(|_, record| is_active(record));
        Ok(())
    }
}

/// Delete expired sessions every `period`, forever.
///
/// Spawned once at boot; the first pass runs after one full period.
pub async fn prune_expired_sessions(store: SessionMemoryStore, period: Duration) {
    let mut interval = tokio::time::interval_at(tokio::time::Instant::now() + period, period);
    loop {
        interval.tick().await;
        let before = store.len().await;
        match store.delete_expired().await {
            Ok(()) => {
                let removed = before.saturating_sub(store.len().await);
                tracing::debug!(removed, "Pruned expired sessions");
            }
            Err(e) => tracing::warn!(error = %e, "Failed to prune expired sessions"),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use tower_sessions::cookie::time::Duration as TimeDuration;

    use super::*;

    fn record(expires_in: TimeDuration) -> Record {
        Record {
            id: Id::default(),
            data: HashMap::new(),
            expiry_date: OffsetDateTime::now_utc() + expires_in,
        }
    }

    #[tokio::test]
    async fn test_expired_sessions_hidden_and_pruned() {
        let store = SessionMemoryStore::default();
        let mut stale = record(TimeDuration::seconds(-60));
        let mut fresh = record(TimeDuration::hours(1));
        store.create(&mut stale).await.unwrap();
        store.create(&mut fresh).await.unwrap();

        assert!(store.load(&stale.id).await.unwrap().is_none());
        assert!(store.load(&fresh.id).await.unwrap().is_some());
        assert_eq!(store.len().await, 2);

        store.delete_expired().await.unwrap();
        assert_eq!(store.len().await, 1);
        assert!(store.load(&fresh.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_delete_session() {
        let store = SessionMemoryStore::default();
        let mut session = record(TimeDuration::hours(1));
        store.create(&mut session).await.unwrap();

        store.delete(&session.id).await.unwrap();
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_pruning_task_runs_each_period() {
        let store = SessionMemoryStore::default();
        let mut stale = record(TimeDuration::seconds(-1));
        store.create(&mut stale).await.unwrap();

        let task = tokio::spawn(prune_expired_sessions(
            store.clone(),
            Duration::from_millis(10),
        ));
        tokio::time::sleep(Duration::from_millis(100)).await;

        assert!(store.is_empty().await);
        task.abort();
    }
}
