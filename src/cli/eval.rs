//! `exprpad eval` command implementation.

use crate::catalog::{DEFAULT_CONTEXT, DEFAULT_EXPRESSION, EXAMPLES};
use crate::config::load_config;
use crate::error::{Error, Result};
use crate::eval::{HttpEvaluator, Orchestrator, Outcome};
use crate::session::SessionStore;
use crate::storage::FileBackend;
use chrono::{Local, Utc};
use std::fs;
use std::path::Path;

/// Run the eval command.
///
/// Evaluates an expression against a JSON context through the configured
/// evaluator endpoint and prints the formatted result with its type.
/// With no expression or context given, a fresh auto-saved draft is
/// restored; failing that, the default example is used.
///
/// # Errors
///
/// Returns an error if the context file cannot be read, the example
/// index is unknown, or the evaluation itself fails.
pub fn run(
    expression: Option<&str>,
    context_file: Option<&Path>,
    example: Option<usize>,
    endpoint: Option<&str>,
) -> Result<()> {
    let config = load_config()?;
    let endpoint = endpoint.unwrap_or(&config.evaluator.endpoint);

    let store = SessionStore::new(FileBackend::new(config.storage.path.clone())?);
    let evaluator = HttpEvaluator::new(endpoint);
    let mut orch = Orchestrator::new(store, evaluator, config.playground.orchestrator_options());

    let now = Utc::now();
    orch.load_buffers(DEFAULT_EXPRESSION, DEFAULT_CONTEXT, now);

    if let Some(index) = example {
        let example = EXAMPLES.get(index).ok_or_else(|| {
            Error::InvalidArgument(format!(
                "no example #{index} (run `exprpad examples` to list them)"
            ))
        })?;
        orch.load_buffers(example.expression, example.context, now);
    } else if expression.is_none() && context_file.is_none() {
        // Same behavior as opening the playground: pick up where the
        // user left off if the draft is fresh enough.
        if orch.restore_auto_saved(now) {
            if let Some(slot) = orch.store().get_auto_saved() {
                let when = slot.last_saved.with_timezone(&Local);
                eprintln!(
                    "exprpad: restored auto-saved draft from {}",
                    when.format("%Y-%m-%d %H:%M")
                );
            }
        }
    }

    if let Some(expression) = expression {
        orch.set_expression(expression, now);
    }
    if let Some(path) = context_file {
        let context = fs::read_to_string(path)?;
        orch.set_context(context, now);
    }

    let Some(outcome) = orch.evaluate_now(now).cloned() else {
        return Err(Error::Evaluation("evaluation did not settle".to_string()));
    };
    match outcome {
        Outcome::Succeeded { .. } => {
            println!("{}", outcome.display());
            if let Some(label) = outcome.type_label() {
                println!();
                println!("Type: {label}");
            }
            Ok(())
        }
        Outcome::Failed { message } => Err(Error::Evaluation(message)),
    }
}
