//! `exprpad show` command implementation.

use crate::config::load_config;
use crate::error::{Error, Result};
use crate::session::SessionStore;
use crate::storage::FileBackend;

/// Run the show command.
///
/// Dumps a saved session as pretty JSON.
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

    let json = serde_json::to_string_pretty(&session)?;
    println!("{json}");

    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::session::SessionStore;
    use crate::storage::MemoryBackend;

    #[test]
    fn show_outputs_all_fields() {
        let store = SessionStore::new(MemoryBackend::new());
        let tags = vec!["demo".to_string()];
        let saved = store
            .save("visible", "a.b", r#"{"a":{"b":1}}"#, Some("notes"), Some(&tags))
            .unwrap();

        let session = store.get(&saved.id).unwrap();
        let json = serde_json::to_string_pretty(&session).unwrap();

        assert!(json.contains("visible"));
        assert!(json.contains("a.b"));
        assert!(json.contains("notes"));
        assert!(json.contains("demo"));
        assert!(json.contains("created_at"));
    }
}
