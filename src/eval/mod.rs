//! Evaluation pipeline: the external evaluator boundary, result
//! classification, and the debounced orchestrator that ties editing,
//! evaluation, and auto-save together.

pub mod classify;
pub mod evaluator;
pub mod orchestrator;

pub use classify::{ValueKind, classify, format_value};
pub use evaluator::{Evaluator, EvaluatorError, HttpEvaluator};
pub use orchestrator::{
    CycleState, EditSession, Notice, Orchestrator, OrchestratorOptions, Outcome,
};
