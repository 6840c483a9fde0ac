//! `exprpad list` command implementation.

use crate::config::load_config;
use crate::error::Result;
use crate::session::{DEFAULT_RECENT, SessionStore};
use crate::storage::FileBackend;
use chrono::{DateTime, Local, Utc};

/// Maximum length for expression preview.
const EXPRESSION_PREVIEW_LEN: usize = 40;

/// Run the list command.
///
/// Shows the most recently updated sessions with their IDs, names, and
/// expression previews.
///
/// # Errors
///
/// Returns an error if the storage backend cannot be opened.
pub fn run(limit: Option<usize>) -> Result<()> {
    let config = load_config()?;
    let store = SessionStore::new(FileBackend::new(config.storage.path.clone())?);
    let limit = limit.unwrap_or(DEFAULT_RECENT);

    let sessions = store.list_recent(limit);

    if sessions.is_empty() {
        println!("No saved sessions.");
        println!("\nSessions are stored in: {}", config.storage.path.display());
        return Ok(());
    }

    println!("{:<38} {:<20} {:<18} Expression", "ID", "Name", "Updated");
    println!("{}", "─".repeat(110));

    for session in &sessions {
        let updated = format_local_time(session.updated_at);
        let name = truncate(&session.name, 18);
        let expression = truncate(&session.expression, EXPRESSION_PREVIEW_LEN);

        println!("{:<38} {:<20} {:<18} {}", session.id, name, updated, expression);
    }

    println!("{}", "─".repeat(110));
    println!("Showing {} session(s)", sessions.len());

    Ok(())
}

/// Format UTC time as local time for display.
fn format_local_time(utc: DateTime<Utc>) -> String {
    let local: DateTime<Local> = utc.into();
    local.format("%Y-%m-%d %H:%M").to_string()
}

/// Truncate to `max` characters on a char boundary, marking the cut.
fn truncate(text: &str, max: usize) -> String {
    let first_line = text.lines().next().unwrap_or(text);
    if first_line.chars().count() > max {
        let cut: String = first_line.chars().take(max).collect();
        format!("{cut}...")
    } else {
        first_line.to_string()
    }
}
