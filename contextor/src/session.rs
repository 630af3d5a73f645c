//! Process-wide session registry.
//!
//! The map lock is held only for get-or-create. Each session's state sits
//! behind its own async mutex that a request holds for the whole turn, so the
//! counter increment and the memory append happen in one critical section.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::{Mutex as AsyncMutex, MutexGuard};
use tracing::debug;

use crate::memory::ConversationMemory;

/// Mutable state of one conversation.
#[derive(Debug)]
pub struct SessionState {
    /// Inbound queries seen so far (FAQ or not, failed or not).
    pub questions: u32,
    pub memory: ConversationMemory,
}

/// Handle to one session; clone the `Arc` freely.
#[derive(Debug)]
pub struct Session {
    id: String,
    state: AsyncMutex<SessionState>,
}

impl Session {
    fn new(id: String, window: usize) -> Self {
        Self {
            id,
            state: AsyncMutex::new(SessionState {
                questions: 0,
                memory: ConversationMemory::new(window),
            }),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Waits for exclusive access to the session state.
    pub async fn lock(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().await
    }
}

/// Session id → session. No expiry: entries live until the process exits.
#[derive(Debug)]
pub struct SessionStore {
    sessions: Mutex<HashMap<String, Arc<Session>>>,
    memory_window: usize,
}

impl SessionStore {
    pub fn new(memory_window: usize) -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            memory_window,
        }
    }

    /// Returns the session for `id`, creating it atomically on first use.
    ///
    /// Repeated calls with the same id return the same `Arc`.
    pub fn get_or_create(&self, id: &str) -> Arc<Session> {
        let mut map = self.sessions.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(s) = map.get(id) {
            return Arc::clone(s);
        }
        debug!(session_id = %id, "new session");
        let s = Arc::new(Session::new(id.to_string(), self.memory_window));
        map.insert(id.to_string(), Arc::clone(&s));
        s
    }

    pub fn len(&self) -> usize {
        self.sessions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_or_create_is_idempotent() {
        let store = SessionStore::new(10);
        let a = store.get_or_create("s1");
        let b = store.get_or_create("s1");
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(store.len(), 1);

        let c = store.get_or_create("s2");
        assert!(!Arc::ptr_eq(&a, &c));
        assert_eq!(store.len(), 2);
    }

    #[tokio::test]
    async fn state_is_shared_between_handles() {
        let store = SessionStore::new(10);
        let first = store.get_or_create("s");
        first.lock().await.questions += 1;
        {
            let second = store.get_or_create("s");
            let mut st = second.lock().await;
            st.questions += 1;
            st.memory.record("hi", "hello");
        }
        let third = store.get_or_create("s");
        let st = third.lock().await;
        assert_eq!(st.questions, 2);
        assert_eq!(st.memory.exchanges(), 1);
    }

    #[tokio::test]
    async fn concurrent_creation_yields_one_session() {
        let store = Arc::new(SessionStore::new(10));
        let handles: Vec<_> = (0..16)
            .map(|_| {
                let store = Arc::clone(&store);
                tokio::spawn(async move { store.get_or_create("fresh") })
            })
            .collect();
        let mut sessions = Vec::new();
        for h in handles {
            sessions.push(h.await.unwrap());
        }
        assert!(sessions.windows(2).all(|w| Arc::ptr_eq(&w[0], &w[1])));
        assert_eq!(store.len(), 1);
    }
}
