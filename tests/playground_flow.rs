//! Integration tests for the full playground flow.

use chrono::{Duration, Utc};
use exprpad::eval::evaluator::EvalResult;
use exprpad::eval::{Notice, Orchestrator, OrchestratorOptions, Outcome, ValueKind};
use exprpad::session::model::AutoSaveSlot;
use exprpad::session::SessionStore;
use exprpad::storage::{FileBackend, KvStore};
use serde_json::Value;
use tempfile::TempDir;

/// Scripted evaluator: resolves the expression as a dotted property path
/// into the context, failing on a `boom` expression.
fn scripted_evaluator(expression: &str, context: &Value) -> EvalResult {
    if expression == "boom" {
        return Err(exprpad::eval::EvaluatorError(
            "boom is not defined".to_string(),
        ));
    }
    let mut current = Some(context);
    for part in expression.split('.') {
        current = current.and_then(|v| v.get(part));
    }
    Ok(current.cloned())
}

fn file_store(dir: &TempDir) -> SessionStore<FileBackend> {
    SessionStore::new(FileBackend::new(dir.path().join("store")).unwrap())
}

#[test]
fn full_flow_edit_evaluate_autosave_restore() {
    let dir = TempDir::new().unwrap();
    let t0 = Utc::now();

    // Step 1: The user types, with pauses shorter than the debounce
    let mut orch = Orchestrator::new(
        file_store(&dir),
        scripted_evaluator,
        OrchestratorOptions::default(),
    );
    orch.set_context(r#"{"user": {"name": "Alice"}}"#, t0);
    orch.set_expression("user", t0 + Duration::milliseconds(200));
    orch.set_expression("user.name", t0 + Duration::milliseconds(400));

    // Nothing fires before the deadline of the last edit
    assert!(orch.tick(t0 + Duration::milliseconds(700)).is_none());

    // Step 2: The debounce settles; exactly one evaluation with the
    // final buffer content
    let outcome = orch.tick(t0 + Duration::milliseconds(900)).cloned().unwrap();
    match outcome {
        Outcome::Succeeded { value, kind } => {
            assert_eq!(value, Some(Value::String("Alice".to_string())));
            assert_eq!(kind, ValueKind::String);
        }
        Outcome::Failed { message } => panic!("expected success, got {message}"),
    }

    // Step 3: The settled cycle auto-saved the raw buffers
    let slot = orch.store().get_auto_saved().unwrap();
    assert_eq!(slot.expression, "user.name");
    assert_eq!(slot.context, r#"{"user": {"name": "Alice"}}"#);

    // Step 4: A "new tab" over the same storage restores the draft
    drop(orch);
    let mut restarted = Orchestrator::new(
        file_store(&dir),
        scripted_evaluator,
        OrchestratorOptions::default(),
    );
    let reopened_at = t0 + Duration::hours(1);
    assert!(restarted.restore_auto_saved(reopened_at));
    assert_eq!(restarted.session().expression(), "user.name");
    assert_eq!(restarted.notice(reopened_at), Some(Notice::Restored));

    // The notice clears on its own
    assert_eq!(restarted.notice(reopened_at + Duration::seconds(5)), None);
}

#[test]
fn stale_draft_is_not_restored_across_restart() {
    let dir = TempDir::new().unwrap();

    // A draft last saved 25 hours ago
    let backend = FileBackend::new(dir.path().join("store")).unwrap();
    let slot = AutoSaveSlot {
        expression: "old.draft".to_string(),
        context: "{}".to_string(),
        last_saved: Utc::now() - Duration::hours(25),
    };
    backend
        .put("auto-save", &serde_json::to_string(&slot).unwrap())
        .unwrap();

    let mut orch = Orchestrator::new(
        SessionStore::new(backend),
        scripted_evaluator,
        OrchestratorOptions::default(),
    );
    assert!(!orch.restore_auto_saved(Utc::now()));
    assert_eq!(orch.session().expression(), "");
}

#[test]
fn failed_evaluation_still_preserves_the_draft() {
    let dir = TempDir::new().unwrap();
    let t0 = Utc::now();

    let mut orch = Orchestrator::new(
        file_store(&dir),
        scripted_evaluator,
        OrchestratorOptions::default(),
    );
    orch.set_context(r#"{"a": 1}"#, t0);
    orch.set_expression("boom", t0);

    let outcome = orch.tick(t0 + Duration::milliseconds(500)).cloned().unwrap();
    assert_eq!(outcome.error_message(), Some("boom is not defined"));
    assert!(outcome.type_label().is_none());

    // The failing expression is still auto-saved
    let slot = orch.store().get_auto_saved().unwrap();
    assert_eq!(slot.expression, "boom");
}

#[test]
fn saved_sessions_survive_restart() {
    let dir = TempDir::new().unwrap();

    {
        let store = file_store(&dir);
        store
            .save("keeper", "user.name", r#"{"user":{"name":"Ada"}}"#, None, None)
            .unwrap();
    }

    let store = file_store(&dir);
    let recent = store.list_recent(5);
    assert_eq!(recent.len(), 1);
    assert_eq!(recent[0].name, "keeper");
    assert_eq!(recent[0].expression, "user.name");

    store.delete(&recent[0].id);
    assert!(file_store(&dir).list_recent(5).is_empty());
}

#[test]
fn context_click_resolves_path_against_live_buffer() {
    let dir = TempDir::new().unwrap();
    let t0 = Utc::now();

    let mut orch = Orchestrator::new(
        file_store(&dir),
        scripted_evaluator,
        OrchestratorOptions::default(),
    );

    let context = r#"{"users":[{"name":"Alice"},{"name":"Bob"}]}"#;
    orch.set_context(context, t0);

    let offset = context.find("Bob").unwrap();
    assert_eq!(orch.resolve_context_path(offset), Some("users[1].name"));

    // Editing the context invalidates the remembered path
    orch.set_context(r#"{"users":[]}"#, t0 + Duration::milliseconds(100));
    assert_eq!(orch.session().context_path(), None);
}
