//! `exprpad delete` command implementation.

use crate::config::load_config;
use crate::error::{Error, Result};
use crate::session::SessionStore;
use crate::storage::FileBackend;

/// Run the delete command.
///
/// Removes a saved session by id.
///
/// # Errors
///
/// Returns an error if the storage backend cannot be opened or the
/// session is not found.
pub fn run(id: &str) -> Result<()> {
    let config = load_config()?;
    let store = SessionStore::new(FileBackend::new(config.storage.path.clone())?);

    let session = store
        .get(id)
        .ok_or_else(|| Error::SessionNotFound(id.to_string()))?;

    store.delete(id);
    println!("Deleted session '{}' ({id})", session.name);

    Ok(())
}
