use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Arc;
use time::OffsetDateTime;
use tower_sessions::session::{Id, Record};
use tower_sessions::session_store::{self, ExpiredDeletion};
use tower_sessions::SessionStore;

/// Anonymous voter sessions kept in process. Expired records are filtered
/// on load and dropped by [`ExpiredDeletion::delete_expired`], which `main`
/// runs periodically.
#[derive(Clone, Debug, Default)]
pub struct VoterSessionStore {
    records: Arc<DashMap<Id, Record>>,
}

impl VoterSessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

fn is_active(record: &Record) -> bool {
    record.expiry_date > OffsetDateTime::now_utc()
}

#[async_trait]
impl SessionStore for VoterSessionStore {
    async fn create(&self, record: &mut Record) -> session_store::Result<()> {
        while self.records.contains_key(&record.id) {
            record.id = Id::default();
        }
        self.records.insert(record.id, record.clone());
        Ok(())
    }

    async fn save(&self, record: &Record) -> session_store::Result<()> {
        self.records.insert(record.id, record.clone());
        Ok(())
    }

    async fn load(&self, session_id: &Id) -> session_store::Result<Option<Record>> {
        Ok(self
            .records
            .get(session_id)
            .map(|entry| entry.value().clone())
            .filter(is_active))
    }

    async fn delete(&self, session_id: &Id) -> session_store::Result<()> {
        self.records.remove(session_id);
        Ok(())
    }
}

#[async_trait]
impl ExpiredDeletion for VoterSessionStore {
    async fn delete_expired(&self) -> session_store::Result<()> {
        let before = self.records.len();
        self.records.retain(|_, record| is_active(record));
        tracing::debug!("Dropped {} expired voter sessions", before.saturating_sub(self.records.len()));
        Ok(())
    }
}

/// Calls [`ExpiredDeletion::delete_expired`] every `period`, forever.
pub async fn sweep_expired_sessions(store: VoterSessionStore, period: std::time::Duration) {
    let mut interval = tokio::time::interval(period);
    // The first tick fires immediately.
    interval.tick().await;
    loop {
        interval.tick().await;
        if let Err(e) = store.delete_expired().await {
            tracing::warn!("Session sweep failed: {}", e);
        }
    }
}
