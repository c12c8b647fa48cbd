//! Session store.
//!
//! The sidebar never owns sessions: it reads the count and the current index
//! and delegates every change through [`SessionStore`]. [`ChatStore`] is the
//! in-memory store used by the terminal client.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Topic given to sessions that have no messages yet.
pub const DEFAULT_TOPIC: &str = "New Conversation";

/// The session store surface consumed by the sidebar.
pub trait SessionStore {
    fn session_count(&self) -> usize;

    fn current_index(&self) -> usize;

    /// Makes the session at `index` current. Out-of-range indices are ignored.
    fn select_session(&mut self, index: usize);

    /// Inserts a fresh session at the top of the list and makes it current.
    fn create_session(&mut self);

    /// Removes the session at `index`. Out-of-range indices are ignored.
    fn delete_session(&mut self, index: usize);
}

/// A single chat session as seen by the sidebar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatSession {
    pub id: String,
    pub topic: String,
    pub message_count: usize,
    pub last_update: DateTime<Utc>,
}

impl ChatSession {
    pub fn empty() -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            topic: DEFAULT_TOPIC.to_string(),
            message_count: 0,
            last_update: Utc::now(),
        }
    }

    pub fn with_topic(topic: impl Into<String>, message_count: usize) -> Self {
        Self {
            topic: topic.into(),
            message_count,
            ..Self::empty()
        }
    }
}

/// In-memory session list. Always holds at least one session.
#[derive(Debug, Clone)]
pub struct ChatStore {
    sessions: Vec<ChatSession>,
    current: usize,
}

impl Default for ChatStore {
    fn default() -> Self {
        Self {
            sessions: vec![ChatSession::empty()],
            current: 0,
        }
    }
}

impl ChatStore {
    /// Builds a store from existing sessions. An empty list gets one empty session.
    pub fn with_sessions(sessions: Vec<ChatSession>) -> Self {
        if sessions.is_empty() {
            return Self::default();
        }
        Self {
            sessions,
            current: 0,
        }
    }

    pub fn sessions(&self) -> &[ChatSession] {
        &self.sessions
    }

    pub fn current_session(&self) -> Option<&ChatSession> {
        self.sessions.get(self.current)
    }
}

impl SessionStore for ChatStore {
    fn session_count(&self) -> usize {
        self.sessions.len()
    }

    fn current_index(&self) -> usize {
        self.current
    }

    fn select_session(&mut self, index: usize) {
        if index < self.sessions.len() {
            self.current = index;
        } else {
            tracing::debug!(index, count = self.sessions.len(), "ignored out-of-range select");
        }
    }

    fn create_session(&mut self) {
        self.sessions.insert(0, ChatSession::empty());
        self.current = 0;
    }

    fn delete_session(&mut self, index: usize) {
        if index >= self.sessions.len() {
            tracing::debug!(index, count = self.sessions.len(), "ignored out-of-range delete");
            return;
        }

        let deleting_last = self.sessions.len() == 1;
        let removed = self.sessions.remove(index);
        tracing::info!(id = %removed.id, topic = %removed.topic, "session deleted");

        if deleting_last {
            self.sessions.push(ChatSession::empty());
            self.current = 0;
            return;
        }

        let shifted = self.current - usize::from(index < self.current);
        self.current = shifted.min(self.sessions.len() - 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_with(topics: &[&str]) -> ChatStore {
        ChatStore::with_sessions(
            topics
                .iter()
                .map(|t| ChatSession::with_topic(*t, 1))
                .collect(),
        )
    }

    fn topics(store: &ChatStore) -> Vec<&str> {
        store.sessions().iter().map(|s| s.topic.as_str()).collect()
    }

    #[test]
    fn test_default_store_has_one_empty_session() {
        let store = ChatStore::default();
        assert_eq!(store.session_count(), 1);
        assert_eq!(store.current_index(), 0);
        assert_eq!(store.sessions()[0].topic, DEFAULT_TOPIC);
    }

    #[test]
    fn test_create_session_inserts_at_top_and_selects() {
        let mut store = store_with(&["a", "b"]);
        store.select_session(1);

        store.create_session();

        assert_eq!(store.session_count(), 3);
        assert_eq!(store.current_index(), 0);
        assert_eq!(topics(&store)[1..], ["a", "b"]);
    }

    #[test]
    fn test_select_out_of_range_is_ignored() {
        let mut store = store_with(&["a", "b"]);
        store.select_session(1);
        store.select_session(5);
        assert_eq!(store.current_index(), 1);
    }

    #[test]
    fn test_delete_before_current_shifts_index() {
        let mut store = store_with(&["a", "b", "c"]);
        store.select_session(2);

        store.delete_session(0);

        assert_eq!(topics(&store), ["b", "c"]);
        assert_eq!(store.current_session().unwrap().topic, "c");
    }

    #[test]
    fn test_delete_current_at_end_moves_to_new_last() {
        let mut store = store_with(&["a", "b", "c"]);
        store.select_session(2);

        store.delete_session(2);

        assert_eq!(store.current_index(), 1);
        assert_eq!(store.current_session().unwrap().topic, "b");
    }

    #[test]
    fn test_delete_after_current_keeps_index() {
        let mut store = store_with(&["a", "b", "c"]);

        store.delete_session(2);

        assert_eq!(store.current_index(), 0);
        assert_eq!(topics(&store), ["a", "b"]);
    }

    #[test]
    fn test_delete_last_session_replaces_with_empty() {
        let mut store = store_with(&["only"]);

        store.delete_session(0);

        assert_eq!(store.session_count(), 1);
        assert_eq!(store.current_index(), 0);
        assert_eq!(store.sessions()[0].topic, DEFAULT_TOPIC);
    }

    #[test]
    fn test_delete_out_of_range_is_ignored() {
        let mut store = store_with(&["a"]);
        store.delete_session(3);
        assert_eq!(topics(&store), ["a"]);
    }
}
