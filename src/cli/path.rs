//! `exprpad path` command implementation.

use crate::error::Result;
use crate::path::resolve_path;
use std::fs;
use std::path::Path;

/// Run the path command.
///
/// Resolves the accessor path at a byte offset inside a JSON document,
/// the same resolution a click in the context editor performs.
///
/// # Errors
///
/// Returns an error if the document file cannot be read.
pub fn run(file: &Path, offset: usize) -> Result<()> {
    let document = fs::read_to_string(file)?;

    match resolve_path(&document, offset) {
        Some(path) => println!("{path}"),
        None => println!("(no path at offset {offset})"),
    }

    Ok(())
}
