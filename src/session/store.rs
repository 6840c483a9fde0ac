//! Session store over a key-value backend.
//!
//! Owns two independent storage keys: the saved-session collection and
//! the single auto-save slot. Every operation is best-effort with respect
//! to the backend: a failing read degrades to an empty collection, a
//! failing write is logged and swallowed. Nothing here may crash the
//! caller over a storage problem.

use crate::error::{Error, Result};
use crate::session::model::{
    AutoSaveSlot, SavedSession, SessionCollection, SessionPatch,
};
use crate::storage::KvStore;
use chrono::{Duration, Utc};

/// Storage key for the serialized session collection.
const SESSIONS_KEY: &str = "sessions";

/// Storage key for the serialized auto-save slot.
const AUTO_SAVE_KEY: &str = "auto-save";

/// Default number of sessions returned by [`SessionStore::list_recent`].
pub const DEFAULT_RECENT: usize = 5;

/// Durable store for saved sessions and the auto-save slot.
#[derive(Debug)]
pub struct SessionStore<S: KvStore> {
    backend: S,
}

impl<S: KvStore> SessionStore<S> {
    /// Create a store over the given backend.
    pub fn new(backend: S) -> Self {
        Self { backend }
    }

    /// Load the session collection.
    ///
    /// Missing or corrupt data yields a fresh empty collection instead of
    /// an error; date fields are revived into proper timestamps on read.
    #[must_use]
    pub fn load(&self) -> SessionCollection {
        let stored = match self.backend.get(SESSIONS_KEY) {
            Ok(stored) => stored,
            Err(e) => {
                eprintln!("exprpad: warning: storage error: {e}");
                return SessionCollection::empty();
            }
        };
        let Some(raw) = stored else {
            return SessionCollection::empty();
        };
        match serde_json::from_str(&raw) {
            Ok(collection) => collection,
            Err(e) => {
                eprintln!("exprpad: warning: corrupt session data, starting fresh: {e}");
                SessionCollection::empty()
            }
        }
    }

    /// Save a new session at the front of the collection.
    ///
    /// The name is trimmed and must not end up blank. A persistence
    /// failure is logged and swallowed; the created session is still
    /// returned so the caller's in-memory view stays consistent.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyName`] if `name` is blank after trimming.
    pub fn save(
        &self,
        name: &str,
        expression: &str,
        context: &str,
        description: Option<&str>,
        tags: Option<&[String]>,
    ) -> Result<SavedSession> {
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::EmptyName);
        }

        let mut session = SavedSession::new(name, expression, context);
        session.description = description.map(ToString::to_string);
        session.tags = tags.map(<[String]>::to_vec);

        let mut collection = self.load();
        collection.sessions.insert(0, session.clone());
        self.persist(&collection);

        Ok(session)
    }

    /// Find a saved session by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<SavedSession> {
        self.load().sessions.into_iter().find(|s| s.id == id)
    }

    /// Apply partial field changes to the session matching `id`,
    /// refreshing its `updated_at`. No-op if the id is unknown.
    pub fn update(&self, id: &str, patch: &SessionPatch) {
        let mut collection = self.load();
        let Some(session) = collection.sessions.iter_mut().find(|s| s.id == id) else {
            return;
        };
        patch.apply(session, Utc::now());
        self.persist(&collection);
    }

    /// Remove the session matching `id`. No-op if the id is unknown.
    pub fn delete(&self, id: &str) {
        let mut collection = self.load();
        collection.sessions.retain(|s| s.id != id);
        self.persist(&collection);
    }

    /// The `n` sessions with the most recent `updated_at`, descending.
    /// Ties keep collection order (stable sort).
    #[must_use]
    pub fn list_recent(&self, n: usize) -> Vec<SavedSession> {
        let mut sessions = self.load().sessions;
        sessions.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        sessions.truncate(n);
        sessions
    }

    /// Overwrite the auto-save slot with the current buffer text.
    ///
    /// Fully replaces the previous slot; independent of the session
    /// collection. Failures are logged and swallowed.
    pub fn auto_save(&self, expression: &str, context: &str) {
        let slot = AutoSaveSlot {
            expression: expression.to_string(),
            context: context.to_string(),
            last_saved: Utc::now(),
        };
        match serde_json::to_string(&slot) {
            Ok(raw) => {
                if let Err(e) = self.backend.put(AUTO_SAVE_KEY, &raw) {
                    eprintln!("exprpad: warning: failed to auto-save: {e}");
                }
            }
            Err(e) => eprintln!("exprpad: warning: failed to auto-save: {e}"),
        }
    }

    /// The auto-save slot, or `None` if never written or unreadable.
    #[must_use]
    pub fn get_auto_saved(&self) -> Option<AutoSaveSlot> {
        let raw = match self.backend.get(AUTO_SAVE_KEY) {
            Ok(raw) => raw?,
            Err(e) => {
                eprintln!("exprpad: warning: storage error: {e}");
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(slot) => Some(slot),
            Err(e) => {
                eprintln!("exprpad: warning: corrupt auto-save slot: {e}");
                None
            }
        }
    }

    /// Delete sessions whose `updated_at` is older than `older_than` ago
    /// and stamp the cleanup time. Returns the number removed.
    pub fn clean(&self, older_than: Duration) -> usize {
        let now = Utc::now();
        let cutoff = now - older_than;

        let mut collection = self.load();
        let before = collection.sessions.len();
        collection.sessions.retain(|s| s.updated_at >= cutoff);
        let removed = before - collection.sessions.len();

        collection.metadata.last_cleanup = now;
        self.persist(&collection);

        removed
    }

    /// Write the full collection back, logging and swallowing failures.
    fn persist(&self, collection: &SessionCollection) {
        match serde_json::to_string(collection) {
            Ok(raw) => {
                if let Err(e) = self.backend.put(SESSIONS_KEY, &raw) {
                    eprintln!("exprpad: warning: failed to save sessions: {e}");
                }
            }
            Err(e) => eprintln!("exprpad: warning: failed to save sessions: {e}"),
        }
    }
}
