//! `exprpad examples` command implementation.

use crate::catalog::EXAMPLES;
use crate::error::Result;

/// Run the examples command.
///
/// Lists the built-in example sessions. Any of them can be evaluated
/// with `exprpad eval --example <N>`.
///
/// # Errors
///
/// Never fails; returns `Result` for uniformity with the other commands.
pub fn run() -> Result<()> {
    for (index, example) in EXAMPLES.iter().enumerate() {
        println!("#{index} {}", example.title);
        println!("    {}", example.description);
        println!("    {}", example.expression);
        println!();
    }

    println!("Evaluate one with: exprpad eval --example <N>");
    Ok(())
}
