//! Session data model.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Schema version written into collection metadata.
pub const STORAGE_VERSION: &str = "1.0";

/// How long an auto-saved slot stays eligible for silent restore.
pub const RESTORE_WINDOW_HOURS: i64 = 24;

/// An explicitly saved playground session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SavedSession {
    /// Opaque unique identifier, generated at creation, immutable.
    pub id: String,

    /// Display name. Never blank after trimming.
    pub name: String,

    /// Optional free-text description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Source text of the expression.
    pub expression: String,

    /// Source text of the JSON context. Stored as text, not parsed, so
    /// invalid JSON can still be saved.
    pub context: String,

    /// When the session was created. Set once.
    pub created_at: DateTime<Utc>,

    /// When the session was last mutated.
    pub updated_at: DateTime<Utc>,

    /// Optional ordered list of short labels.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

impl SavedSession {
    /// Create a new session with a fresh id and `created_at == updated_at`.
    #[must_use]
    pub fn new(name: &str, expression: &str, context: &str) -> Self {
        let now = Utc::now();
        Self {
            id: generate_id(),
            name: name.to_string(),
            description: None,
            expression: expression.to_string(),
            context: context.to_string(),
            created_at: now,
            updated_at: now,
            tags: None,
        }
    }
}

/// Generate a session id: a monotonically increasing time component plus
/// a random component (UUIDv7), so repeated calls in the same tick stay
/// unique within a single local store.
fn generate_id() -> String {
    Uuid::now_v7().to_string()
}

/// The single implicit snapshot of editor contents.
///
/// At most one slot exists; each write fully replaces it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AutoSaveSlot {
    /// Latest expression text.
    pub expression: String,

    /// Latest context text.
    pub context: String,

    /// When the snapshot was taken.
    pub last_saved: DateTime<Utc>,
}

impl AutoSaveSlot {
    /// Whether the slot is recent enough to restore silently.
    #[must_use]
    pub fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        now - self.last_saved < Duration::hours(RESTORE_WINDOW_HOURS)
    }
}

/// The persisted aggregate of saved sessions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionCollection {
    /// Saved sessions, most recent first by convention.
    pub sessions: Vec<SavedSession>,

    /// Forward-compatibility metadata.
    pub metadata: CollectionMetadata,
}

impl SessionCollection {
    /// A fresh empty collection with current metadata.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            sessions: Vec::new(),
            metadata: CollectionMetadata {
                version: STORAGE_VERSION.to_string(),
                last_cleanup: Utc::now(),
            },
        }
    }
}

/// Collection metadata for forward-compatible migration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionMetadata {
    /// Storage schema version.
    pub version: String,

    /// When old sessions were last cleaned up.
    pub last_cleanup: DateTime<Utc>,
}

/// Partial field changes for [`SavedSession`]. `None` leaves a field
/// untouched; `id` and `created_at` are not patchable.
#[derive(Debug, Clone, Default)]
pub struct SessionPatch {
    /// Replacement name.
    pub name: Option<String>,

    /// Replacement description.
    pub description: Option<String>,

    /// Replacement expression text.
    pub expression: Option<String>,

    /// Replacement context text.
    pub context: Option<String>,

    /// Replacement tag list.
    pub tags: Option<Vec<String>>,
}

impl SessionPatch {
    /// Apply the patch to a session, refreshing `updated_at`.
    pub(crate) fn apply(&self, session: &mut SavedSession, now: DateTime<Utc>) {
        if let Some(name) = &self.name {
            session.name.clone_from(name);
        }
        if let Some(description) = &self.description {
            session.description = Some(description.clone());
        }
        if let Some(expression) = &self.expression {
            session.expression.clone_from(expression);
        }
        if let Some(context) = &self.context {
            session.context.clone_from(context);
        }
        if let Some(tags) = &self.tags {
            session.tags = Some(tags.clone());
        }
        session.updated_at = now;
    }
}
