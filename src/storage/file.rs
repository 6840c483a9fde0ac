//! File-based storage backend.

use crate::error::Result;
use crate::storage::traits::KvStore;
use std::fs;
use std::path::PathBuf;

/// File-based storage backend with atomic writes.
///
/// Each key is stored as `<key>.json` inside the base directory.
#[derive(Debug)]
pub struct FileBackend {
    base_dir: PathBuf,
}

impl FileBackend {
    /// Create a new file backend.
    ///
    /// Creates the base directory if it doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the base directory cannot be created.
    pub fn new(base_dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    /// Get the path to a key's file.
    fn key_path(&self, key: &str) -> PathBuf {
        self.base_dir.join(format!("{key}.json"))
    }
}

impl KvStore for FileBackend {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.key_path(key);
        if !path.exists() {
            return Ok(None);
        }
        let contents = fs::read_to_string(&path)?;
        Ok(Some(contents))
    }

    fn put(&self, key: &str, value: &str) -> Result<()> {
        let path = self.key_path(key);
        let temp = path.with_extension("tmp");

        // Write to temp file first
        fs::write(&temp, value)?;

        // Atomic rename - prevents corruption if process crashes mid-write
        fs::rename(&temp, &path)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_backend() -> (FileBackend, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let backend = FileBackend::new(temp_dir.path().join("store")).unwrap();
        (backend, temp_dir)
    }

    #[test]
    fn creates_base_directory() {
        let temp_dir = TempDir::new().unwrap();
        let _backend = FileBackend::new(temp_dir.path().join("store")).unwrap();
        assert!(temp_dir.path().join("store").exists());
    }

    #[test]
    fn get_missing_key() {
        let (store, _temp) = create_test_backend();
        let result = store.get("sessions").unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn put_and_get_key() {
        let (store, _temp) = create_test_backend();

        store.put("sessions", r#"{"sessions":[]}"#).unwrap();

        let retrieved = store.get("sessions").unwrap().unwrap();
        assert_eq!(retrieved, r#"{"sessions":[]}"#);
    }

    #[test]
    fn put_fully_replaces_previous_value() {
        let (store, _temp) = create_test_backend();

        store.put("auto-save", "first").unwrap();
        store.put("auto-save", "second").unwrap();

        assert_eq!(store.get("auto-save").unwrap().unwrap(), "second");
    }

    #[test]
    fn keys_are_independent() {
        let (store, _temp) = create_test_backend();

        store.put("sessions", "a").unwrap();
        store.put("auto-save", "b").unwrap();

        assert_eq!(store.get("sessions").unwrap().unwrap(), "a");
        assert_eq!(store.get("auto-save").unwrap().unwrap(), "b");
    }

    #[test]
    fn atomic_write_creates_no_temp_file() {
        let (store, temp_dir) = create_test_backend();

        store.put("sessions", "{}").unwrap();

        // Temp file should not exist after successful write
        let temp_path = temp_dir.path().join("store").join("sessions.tmp");
        assert!(!temp_path.exists());

        // Main file should exist
        let main_path = temp_dir.path().join("store").join("sessions.json");
        assert!(main_path.exists());
    }

    #[test]
    fn get_survives_non_json_contents() {
        let (store, temp_dir) = create_test_backend();

        // The adapter is schema-free: whatever bytes are on disk come back
        let path = temp_dir.path().join("store").join("sessions.json");
        fs::write(&path, "not json at all").unwrap();

        assert_eq!(store.get("sessions").unwrap().unwrap(), "not json at all");
    }
}
