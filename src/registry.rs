//! Per-session serialization for hosts that serve many players at once.
//!
//! Every session sits behind its own mutex: operations on one session run
//! one at a time, while different sessions never wait on each other beyond
//! the brief map lookup.

use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::session::{Session, SessionSettings};
use crate::words::WordPool;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionId(u64);

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "session-{}", self.0)
    }
}

// Session state is plain data and every controller operation leaves it
// consistent, so a lock poisoned by a panicking caller is still usable.
fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(|e| e.into_inner())
}

#[derive(Debug)]
pub struct SessionRegistry {
    pool: Arc<WordPool>,
    settings: SessionSettings,
    next_id: AtomicU64,
    sessions: Mutex<HashMap<SessionId, Arc<Mutex<Session>>>>,
}

impl SessionRegistry {
    pub fn new(pool: Arc<WordPool>, settings: SessionSettings) -> Self {
        Self {
            pool,
            settings,
            next_id: AtomicU64::new(1),
            sessions: Mutex::new(HashMap::new()),
        }
    }

    /// Register a new idle session sharing the registry's word pool.
    pub fn create(&self) -> SessionId {
        self.insert(Session::new(Arc::clone(&self.pool), self.settings))
    }

    /// Register a pre-built session, e.g. one with a seeded RNG.
    pub fn insert(&self, session: Session) -> SessionId {
        let id = SessionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        lock(&self.sessions).insert(id, Arc::new(Mutex::new(session)));
        tracing::debug!(%id, "session registered");
        id
    }

    /// Run `f` with exclusive access to one session. `None` for unknown ids.
    pub fn with_session<T>(&self, id: SessionId, f: impl FnOnce(&mut Session) -> T) -> Option<T> {
        let session = lock(&self.sessions).get(&id).cloned()?;
        let mut guard = lock(&session);
        Some(f(&mut guard))
    }

    pub fn remove(&self, id: SessionId) -> bool {
        let removed = lock(&self.sessions).remove(&id).is_some();
        if removed {
            tracing::debug!(%id, "session removed");
        }
        removed
    }

    pub fn len(&self) -> usize {
        lock(&self.sessions).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
