//! Process-local admin session store with expiry sweeping.
//!
//! Records are keyed by session id and carry their own expiry. Expired
//! records are never returned by `load`, and [`AdminSessionStore::delete_expired`]
//! drops them from memory. [`AdminSessionStore::spawn_expiry_sweep`] runs that
//! cleanup periodically so abandoned logins do not accumulate.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tower_sessions::cookie::time::OffsetDateTime;
use tower_sessions::session::{Id, Record};
use tower_sessions::{SessionStore, session_store};

/// In-memory session store that evicts expired records.
#[derive(Debug, Clone, Default)]
pub struct AdminSessionStore {
    records: Arc<Mutex<HashMap<Id, Record>>>,
}

impl AdminSessionStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop every record whose expiry has passed.
    ///
    /// Returns the number of records removed.
    pub async fn delete_expired(&self) -> usize {
        let now = OffsetDateTime::now_utc();
        let mut records = self.records.lock().await;
        let before = records.len();
        records.retain(|_, record| record.expiry_date > now);
        before - records.len()
    }

    /// Run [`Self::delete_expired`] every `period` on the tokio runtime.
    pub fn spawn_expiry_sweep(&self, period: Duration) -> JoinHandle<()> {
        let store = self.clone();
        tracing::info!(period_secs = period.as_secs(), "Spawning session expiry sweep");
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            loop {
                ticker.tick().await;
                let removed = store.delete_expired().await;
                if removed > 0 {
                    tracing::debug!(removed, "Deleted expired admin sessions");
                }
            }
        })
    }
}

#[async_trait]
impl SessionStore for AdminSessionStore {
    async fn create(&self, record: &mut Record) -> session_store::Result<()> {
        let mut records = self.records.lock().await;
        while records.contains_key(&record.id) {
            record.id = Id::default();
        }
        records.insert(record.id, record.clone());
        Ok(())
    }

    async fn save(&self, record: &Record) -> session_store::Result<()> {
        self.records.lock().await.insert(record.id, record.clone());
        Ok(())
    }

    async fn load(&self, session_id: &Id) -> session_store::Result<Option<Record>> {
        let now = OffsetDateTime::now_utc();
        Ok(self
            .records
            .lock()
            .await
            .get(session_id)
            .filter(|record| record.expiry_date > now)
            .cloned())
    }

    async fn delete(&self, session_id: &Id) -> session_store::Result<()> {
        self.records.lock().await.remove(session_id);
        Ok(())
    }
}
