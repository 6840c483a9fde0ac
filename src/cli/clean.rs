//! `exprpad clean` command implementation.

use crate::config::load_config;
use crate::error::{Error, Result};
use crate::session::SessionStore;
use crate::storage::FileBackend;
use chrono::Duration;

/// Run the clean command.
///
/// Removes saved sessions untouched for longer than the given duration
/// (configured retention by default) and stamps the cleanup time in the
/// collection metadata.
///
/// # Errors
///
/// Returns an error if the duration format is invalid or the storage
/// backend cannot be opened.
pub fn run(before: Option<&str>, all: bool) -> Result<()> {
    let config = load_config()?;
    let store = SessionStore::new(FileBackend::new(config.storage.path.clone())?);

    let duration = if all {
        Duration::zero() // Clean everything
    } else {
        match before {
            Some(given) => parse_duration(given)?,
            None => Duration::days(i64::from(config.cleanup.retention_days)),
        }
    };

    let removed = store.clean(duration);

    if removed == 0 {
        println!("No sessions to clean.");
    } else {
        println!("Cleaned {removed} session(s).");
    }

    Ok(())
}

/// Parse a duration string like "7d", "30d", "24h".
///
/// # Errors
///
/// Returns an error if the duration format is invalid.
fn parse_duration(s: &str) -> Result<Duration> {
    let s = s.trim();

    if s.is_empty() {
        return Ok(Duration::days(7)); // Default
    }

    let parse_err = |_| Error::InvalidArgument(format!("Invalid duration: {s}"));

    if let Some(stripped) = s.strip_suffix('d') {
        let num: i64 = stripped.parse().map_err(parse_err)?;
        Ok(Duration::days(num))
    } else if let Some(stripped) = s.strip_suffix('h') {
        let num: i64 = stripped.parse().map_err(parse_err)?;
        Ok(Duration::hours(num))
    } else if let Some(stripped) = s.strip_suffix('m') {
        let num: i64 = stripped.parse().map_err(parse_err)?;
        Ok(Duration::minutes(num))
    } else {
        // Default to days if no unit
        let num: i64 = s.parse().map_err(parse_err)?;
        Ok(Duration::days(num))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::SessionStore;
    use crate::storage::MemoryBackend;

    #[test]
    fn parse_duration_days() {
        let d = parse_duration("7d").unwrap();
        assert_eq!(d, Duration::days(7));
    }

    #[test]
    fn parse_duration_hours() {
        let d = parse_duration("24h").unwrap();
        assert_eq!(d, Duration::hours(24));
    }

    #[test]
    fn parse_duration_minutes() {
        let d = parse_duration("30m").unwrap();
        assert_eq!(d, Duration::minutes(30));
    }

    #[test]
    fn parse_duration_no_unit_defaults_to_days() {
        let d = parse_duration("14").unwrap();
        assert_eq!(d, Duration::days(14));
    }

    #[test]
    fn parse_duration_invalid_is_error() {
        assert!(parse_duration("soon").is_err());
    }

    #[test]
    fn clean_with_zero_duration_removes_everything() {
        let store = SessionStore::new(MemoryBackend::new());
        store.save("a", "1", "{}", None, None).unwrap();
        store.save("b", "2", "{}", None, None).unwrap();

        let removed = store.clean(Duration::zero());

        assert_eq!(removed, 2);
        assert!(store.load().sessions.is_empty());
    }
}
