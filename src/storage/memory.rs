//! In-memory storage backend for testing.

use crate::error::Result;
use crate::storage::traits::KvStore;
use std::collections::HashMap;
use std::sync::RwLock;

/// In-memory storage backend for testing.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryBackend {
    /// Create a new in-memory backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KvStore for MemoryBackend {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let entries = self.entries.read().unwrap();
        Ok(entries.get(key).cloned())
    }

    fn put(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.entries.write().unwrap();
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Backend whose writes always fail, for exercising best-effort paths.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct FailingBackend;

#[cfg(test)]
impl KvStore for FailingBackend {
    fn get(&self, _key: &str) -> Result<Option<String>> {
        Err(std::io::Error::other("storage unavailable").into())
    }

    fn put(&self, _key: &str, _value: &str) -> Result<()> {
        Err(std::io::Error::other("storage unavailable").into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_missing_key() {
        let store = MemoryBackend::new();
        let result = store.get("sessions").unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn put_and_get_key() {
        let store = MemoryBackend::new();

        store.put("sessions", "payload").unwrap();

        let retrieved = store.get("sessions").unwrap().unwrap();
        assert_eq!(retrieved, "payload");
    }

    #[test]
    fn put_fully_replaces_previous_value() {
        let store = MemoryBackend::new();

        store.put("auto-save", "first").unwrap();
        store.put("auto-save", "second").unwrap();

        assert_eq!(store.get("auto-save").unwrap().unwrap(), "second");
    }

    #[test]
    fn concurrent_reads_and_writes() {
        use std::sync::Arc;
        use std::thread;

        let store = Arc::new(MemoryBackend::new());
        store.put("shared", "seed").unwrap();

        let mut handles = vec![];
        for i in 0..5 {
            let store_clone = Arc::clone(&store);
            handles.push(thread::spawn(move || {
                for j in 0..50 {
                    store_clone.put(&format!("key-{i}"), &format!("v{j}")).unwrap();
                    let _ = store_clone.get("shared").unwrap();
                }
            }));
        }

        for handle in handles {
            handle.join().expect("Thread panicked");
        }

        for i in 0..5 {
            assert_eq!(store.get(&format!("key-{i}")).unwrap().unwrap(), "v49");
        }
    }
}
