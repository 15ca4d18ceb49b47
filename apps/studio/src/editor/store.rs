use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Mutex, RwLock};
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, info};
use uuid::Uuid;

use crate::editor::EditorSession;

/// Sessions untouched for this long are dropped.
pub const DEFAULT_IDLE_TTL: Duration = Duration::from_secs(30 * 60);

/// Exclusive handle to one session. Edits lock it for their duration.
pub type SharedSession = Arc<Mutex<EditorSession>>;

struct Slot {
    session: SharedSession,
    last_touched: Instant,
}

impl Slot {
    fn is_idle(&self, now: Instant, ttl: Duration) -> bool {
        now.duration_since(self.last_touched) >= ttl
    }
}

/// Open sessions by id. Unsaved work in an idle session is discarded on eviction.
#[derive(Clone)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<Uuid, Slot>>>,
    idle_ttl: Duration,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::with_idle_ttl(DEFAULT_IDLE_TTL)
    }

    pub fn with_idle_ttl(idle_ttl: Duration) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            idle_ttl,
        }
    }

    pub fn idle_ttl(&self) -> Duration {
        self.idle_ttl
    }

    pub async fn insert(&self, session: EditorSession) -> (Uuid, SharedSession) {
        let id = session.id();
        let shared = Arc::new(Mutex::new(session));
        let slot = Slot {
            session: shared.clone(),
            last_touched: Instant::now(),
        };
        self.sessions.write().await.insert(id, slot);
        (id, shared)
    }

    /// Looks up a session and marks it as used. An idle session is evicted instead.
    pub async fn get(&self, id: &Uuid) -> Option<SharedSession> {
        let now = Instant::now();
        let mut sessions = self.sessions.write().await;
        let slot = sessions.get_mut(id)?;
        if slot.is_idle(now, self.idle_ttl) {
            sessions.remove(id);
            debug!(session = %id, "evicted idle session on access");
            return None;
        }
        slot.last_touched = now;
        Some(slot.session.clone())
    }

    pub async fn remove(&self, id: &Uuid) -> Option<SharedSession> {
        self.sessions.write().await.remove(id).map(|slot| slot.session)
    }

    #[cfg(test)]
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Drops every session idle for at least the TTL. Returns how many went.
    pub async fn evict_idle(&self) -> usize {
        let now = Instant::now();
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|id, slot| {
            let keep = !slot.is_idle(now, self.idle_ttl);
            if !keep {
                debug!(session = %id, "evicted idle session");
            }
            keep
        });
        let evicted = before - sessions.len();
        if evicted > 0 {
            info!(evicted, open = sessions.len(), "cleaned up idle editor sessions");
        }
        evicted
    }

    /// Sweeps idle sessions every `every` until the runtime shuts down.
    pub fn start_eviction_task(self, every: Duration) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(every);
            loop {
                interval.tick().await;
                self.evict_idle().await;
            }
        })
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::templates::TemplateId;
    use serde_json::json;

    #[tokio::test]
    async fn test_insert_get_remove() {
        let store = SessionStore::new();
        let (id, _) = store.insert(EditorSession::create(TemplateId::Classic)).await;
        assert!(store.get(&id).await.is_some());
        assert_eq!(store.len().await, 1);
        store.remove(&id).await;
        assert!(store.get(&id).await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_idle_session_is_evicted_on_access() {
        let store = SessionStore::with_idle_ttl(Duration::from_secs(60));
        let (id, _) = store.insert(EditorSession::create(TemplateId::Classic)).await;

        tokio::time::advance(Duration::from_secs(59)).await;
        assert!(store.get(&id).await.is_some());

        // The lookup above reset the clock for this session.
        tokio::time::advance(Duration::from_secs(59)).await;
        assert!(store.get(&id).await.is_some());

        tokio::time::advance(Duration::from_secs(60)).await;
        assert!(store.get(&id).await.is_none());
        assert_eq!(store.len().await, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_evict_idle_keeps_recent_sessions() {
        let store = SessionStore::with_idle_ttl(Duration::from_secs(60));
        let (stale, _) = store.insert(EditorSession::create(TemplateId::Classic)).await;
        tokio::time::advance(Duration::from_secs(45)).await;
        let (fresh, _) = store.insert(EditorSession::create(TemplateId::Modern)).await;
        tokio::time::advance(Duration::from_secs(30)).await;

        assert_eq!(store.evict_idle().await, 1);
        assert_eq!(store.len().await, 1);
        assert!(store.get(&fresh).await.is_some());
        assert!(store.get(&stale).await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_eviction_task_sweeps_periodically() {
        let store = SessionStore::with_idle_ttl(Duration::from_secs(60));
        store.insert(EditorSession::create(TemplateId::Classic)).await;
        let task = store.clone().start_eviction_task(Duration::from_secs(10));

        tokio::time::sleep(Duration::from_secs(55)).await;
        assert_eq!(store.len().await, 1);

        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(store.len().await, 0);
        task.abort();
    }

    #[tokio::test]
    async fn test_concurrent_edits_apply_in_turn() {
        let store = SessionStore::new();
        let (id, _) = store.insert(EditorSession::create(TemplateId::Classic)).await;

        let mut tasks = Vec::new();
        for i in 0..8 {
            let store = store.clone();
            tasks.push(tokio::spawn(async move {
                let session = store.get(&id).await.unwrap();
                let mut session = session.lock().await;
                session
                    .set_field("professionalSummary", &json!(format!("edit {i}")))
                    .unwrap();
            }));
        }
        for task in tasks {
            task.await.unwrap();
        }

        let session = store.get(&id).await.unwrap();
        let session = session.lock().await;
        assert_eq!(session.snapshot().revision, 8);
        assert!(session.document().professional_summary.as_deref().unwrap().starts_with("edit "));
    }
}
