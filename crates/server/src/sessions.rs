//! In-memory store of browser sessions.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use marquee_core::Session;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use crate::metrics::{SESSIONS_CREATED_TOTAL, SESSIONS_EXPIRED_TOTAL};

struct SessionEntry {
    session: Session,
    last_seen: Instant,
}

/// Sessions keyed by an opaque id, dropped after `idle_timeout` without use.
pub struct SessionStore {
    sessions: RwLock<HashMap<String, SessionEntry>>,
    idle_timeout: Duration,
}

impl SessionStore {
    pub fn new(idle_timeout: Duration) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            idle_timeout,
        }
    }

    /// Store a session and return its new id.
    pub async fn create(&self, session: Session) -> String {
        let now = Instant::now();
        let id = Uuid::new_v4().to_string();

        let mut sessions = self.sessions.write().await;
        Self::prune_locked(&mut sessions, self.idle_timeout, now);
        sessions.insert(
            id.clone(),
            SessionEntry {
                session,
                last_seen: now,
            },
        );
        SESSIONS_CREATED_TOTAL.inc();
        debug!(session_id = %id, "Session created");
        id
    }

    /// Run `f` against a live session, marking it as used.
    ///
    /// Returns `None` when the id is unknown or the session has expired.
    pub async fn with_session<R>(&self, id: &str, f: impl FnOnce(&mut Session) -> R) -> Option<R> {
        let now = Instant::now();
        let mut sessions = self.sessions.write().await;

        let expired = sessions
            .get(id)
            .is_some_and(|e| now.saturating_duration_since(e.last_seen) >= self.idle_timeout);
        if expired {
            sessions.remove(id);
            SESSIONS_EXPIRED_TOTAL.inc();
            return None;
        }

        let entry = sessions.get_mut(id)?;
        entry.last_seen = now;
        Some(f(&mut entry.session))
    }

    /// Remove a session. Returns false if it did not exist.
    pub async fn remove(&self, id: &str) -> bool {
        self.sessions.write().await.remove(id).is_some()
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }

    /// Drop every session idle for longer than the timeout, as of `now`.
    pub async fn prune_idle(&self, now: Instant) -> usize {
        let mut sessions = self.sessions.write().await;
        Self::prune_locked(&mut sessions, self.idle_timeout, now)
    }

    fn prune_locked(
        sessions: &mut HashMap<String, SessionEntry>,
        idle_timeout: Duration,
        now: Instant,
    ) -> usize {
        let before = sessions.len();
        sessions.retain(|_, e| now.saturating_duration_since(e.last_seen) < idle_timeout);
        let dropped = before - sessions.len();
        if dropped > 0 {
            SESSIONS_EXPIRED_TOTAL.inc_by(dropped as u64);
            debug!("Pruned {} idle sessions", dropped);
        }
        dropped
    }
}
