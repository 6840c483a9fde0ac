//! Storage trait definitions.

use crate::error::Result;

/// Durable local key-value space holding plain-text records.
///
/// Values are JSON-serialized by the caller; the store itself is
/// schema-free. Reads and writes are best-effort: callers that cannot
/// tolerate failure must decide what to do with the error themselves.
pub trait KvStore: Send + Sync {
    /// Read the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write `value` under `key`, fully replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    fn put(&self, key: &str, value: &str) -> Result<()>;
}
