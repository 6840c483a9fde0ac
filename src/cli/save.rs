//! `exprpad save` command implementation.

use crate::config::load_config;
use crate::error::{Error, Result};
use crate::session::SessionStore;
use crate::storage::FileBackend;
use std::fs;
use std::path::Path;

/// Run the save command.
///
/// Saves a named session. Expression and context default to the current
/// auto-saved draft, so `exprpad save <name>` names whatever was last
/// being edited.
///
/// # Errors
///
/// Returns an error if the name is blank, the context file cannot be
/// read, or there is neither an explicit expression nor a draft to save.
pub fn run(
    name: &str,
    expression: Option<&str>,
    context_file: Option<&Path>,
    description: Option<&str>,
    tags: &[String],
) -> Result<()> {
    let config = load_config()?;
    let store = SessionStore::new(FileBackend::new(config.storage.path.clone())?);

    let draft = store.get_auto_saved();

    let expression = match expression {
        Some(expression) => expression.to_string(),
        None => draft
            .as_ref()
            .map(|slot| slot.expression.clone())
            .ok_or_else(|| {
                Error::InvalidArgument(
                    "no --expression given and no auto-saved draft to save".to_string(),
                )
            })?,
    };

    let context = match context_file {
        Some(path) => fs::read_to_string(path)?,
        None => draft.map(|slot| slot.context).unwrap_or_default(),
    };

    let tags = if tags.is_empty() { None } else { Some(tags) };
    let session = store.save(name, &expression, &context, description, tags)?;

    println!("Saved session '{}' ({})", session.name, session.id);
    Ok(())
}
