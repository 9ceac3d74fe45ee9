use std::sync::Arc;
use std::time::{Duration, Instant};

use dashmap::DashMap;
use tracing::{error, warn};

use crate::domain::{
    common::entities::app_errors::CoreError,
    session::{
        entities::{ConversationState, Session},
        ports::SessionRepository,
    },
};

#[derive(Debug, Clone)]
struct StoredSession {
    /// JSON document, the shape a key-value server would hold.
    blob: String,
    touched: Instant,
}

impl StoredSession {
    fn new(blob: String) -> Self {
        Self {
            blob,
            touched: Instant::now(),
        }
    }
}

fn encode(session: &Session) -> Result<String, CoreError> {
    serde_json::to_string(session).map_err(|e| {
        error!("Failed to encode session: {}", e);
        CoreError::InternalServerError
    })
}

fn decode(chat_id: i64, blob: &str) -> Result<Session, CoreError> {
    serde_json::from_str(blob).map_err(|e| {
        error!(chat_id, "Failed to decode session: {}", e);
        CoreError::CorruptSession(e.to_string())
    })
}

/// Session store backed by a concurrent map of JSON blobs.
///
/// Entries not written for longer than `ttl` read as absent and are dropped by
/// [`InMemorySessionRepository::purge_expired`].
#[derive(Debug, Clone, Default)]
pub struct InMemorySessionRepository {
    sessions: Arc<DashMap<i64, StoredSession>>,
    ttl: Option<Duration>,
}

impl InMemorySessionRepository {
    pub fn new(ttl: Option<Duration>) -> Self {
        Self {
            sessions: Arc::new(DashMap::new()),
            ttl,
        }
    }

    fn is_expired(&self, stored: &StoredSession) -> bool {
        self.ttl
            .is_some_and(|ttl| stored.touched.elapsed() > ttl)
    }

    /// Drops expired entries and returns how many were removed.
    pub fn purge_expired(&self) -> usize {
        let before = self.sessions.len();
        self.sessions.retain(|_, stored| !self.is_expired(stored));
        before.saturating_sub(self.sessions.len())
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Stores a raw document as-is, bypassing encoding.
    #[cfg(test)]
    pub(crate) fn insert_raw(&self, chat_id: i64, blob: &str) {
        self.sessions
            .insert(chat_id, StoredSession::new(blob.to_string()));
    }

    /// Read-modify-write under the entry lock of `chat_id`.
    fn update<F>(&self, chat_id: i64, apply: F) -> Result<Session, CoreError>
    where
        F: FnOnce(&mut Session),
    {
        let mut entry = self
            .sessions
            .entry(chat_id)
            .or_insert_with(|| StoredSession::new("{}".to_string()));

        let mut session = if self.is_expired(&entry) {
            Session::default()
        } else {
            decode(chat_id, &entry.blob).unwrap_or_else(|_| {
                warn!(chat_id, "Replacing unreadable session before update");
                Session::default()
            })
        };

        apply(&mut session);

        entry.blob = encode(&session)?;
        entry.touched = Instant::now();
        Ok(session)
    }
}

impl SessionRepository for InMemorySessionRepository {
    async fn get(&self, chat_id: i64) -> Result<Option<Session>, CoreError> {
        let stored = self
            .sessions
            .get(&chat_id)
            .map(|stored| (stored.blob.clone(), self.is_expired(&stored)));

        match stored {
            None => Ok(None),
            Some((_, true)) => {
                self.sessions
                    .remove_if(&chat_id, |_, stored| self.is_expired(stored));
                Ok(None)
            }
            Some((blob, false)) => decode(chat_id, &blob).map(Some),
        }
    }

    async fn set(&self, chat_id: i64, session: Session) -> Result<(), CoreError> {
        let blob = encode(&session)?;
        self.sessions.insert(chat_id, StoredSession::new(blob));
        Ok(())
    }

    async fn merge_add(&self, chat_id: i64, names: Vec<String>) -> Result<Session, CoreError> {
        self.update(chat_id, |session| {
            session.add_ingredients(names);
        })
    }

    async fn merge_remove(
        &self,
        chat_id: i64,
        names: Vec<String>,
    ) -> Result<Session, CoreError> {
        self.update(chat_id, |session| {
            session.remove_ingredients(&names);
        })
    }

    async fn set_state(
        &self,
        chat_id: i64,
        state: ConversationState,
    ) -> Result<Session, CoreError> {
        self.update(chat_id, |session| session.state = state)
    }

    async fn delete(&self, chat_id: i64) -> Result<(), CoreError> {
        self.sessions.remove(&chat_id);
        Ok(())
    }
}
