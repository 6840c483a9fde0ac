//! Debounced evaluation orchestrator.
//!
//! Turns raw buffer edits into evaluation cycles: each change arms a
//! single trailing-edge debounce deadline; when it settles, the context
//! buffer is parsed, the external evaluator runs, the outcome is
//! classified, and the raw buffer text is auto-saved. The orchestrator is
//! clock-driven - callers pass `now` into every time-dependent method -
//! so the whole state machine is deterministic.

use crate::eval::classify::{ValueKind, classify, format_value};
use crate::eval::evaluator::Evaluator;
use crate::path::resolve_path;
use crate::session::SessionStore;
use crate::storage::KvStore;
use chrono::{DateTime, Duration, Utc};
use serde_json::Value;

/// Default trailing-edge debounce delay.
pub const DEBOUNCE_DELAY_MS: i64 = 500;

/// How long the "restored" notice stays visible.
const RESTORED_NOTICE_SECS: i64 = 3;

/// How long the "auto-saved" notice stays visible.
const AUTO_SAVED_NOTICE_SECS: i64 = 2;

/// Tuning knobs for the orchestrator.
#[derive(Debug, Clone)]
pub struct OrchestratorOptions {
    /// Trailing-edge debounce delay between the last edit and evaluation.
    pub debounce_delay: Duration,

    /// Whether a manual evaluation also writes the auto-save slot.
    /// The debounce path always auto-saves; manual runs historically did
    /// not, so that re-running an unchanged buffer does not amplify
    /// writes.
    pub auto_save_on_manual_evaluate: bool,
}

impl Default for OrchestratorOptions {
    fn default() -> Self {
        Self {
            debounce_delay: Duration::milliseconds(DEBOUNCE_DELAY_MS),
            auto_save_on_manual_evaluate: false,
        }
    }
}

/// The editing state owned by the orchestrator: both text buffers plus
/// the last resolved context path. Collaborating editor widgets read and
/// write this only through orchestrator methods.
#[derive(Debug, Clone, Default)]
pub struct EditSession {
    expression: String,
    context: String,
    context_path: Option<String>,
}

impl EditSession {
    /// Current expression buffer text.
    #[must_use]
    pub fn expression(&self) -> &str {
        &self.expression
    }

    /// Current context buffer text.
    #[must_use]
    pub fn context(&self) -> &str {
        &self.context
    }

    /// Path resolved from the last context-editor click, if any.
    #[must_use]
    pub fn context_path(&self) -> Option<&str> {
        self.context_path.as_deref()
    }
}

/// Where the current evaluation cycle stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleState {
    /// Waiting for edits or a due deadline.
    Idle,
    /// An evaluation is in flight.
    Evaluating,
}

/// Settled result of one evaluation cycle: a classified value or an
/// error message, never both.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The evaluator returned a value (possibly absent).
    Succeeded {
        /// The returned value; `None` models an absent result.
        value: Option<Value>,
        /// Classification of the value.
        kind: ValueKind,
    },
    /// Context parsing or evaluation failed.
    Failed {
        /// Human-readable error, surfaced as-is.
        message: String,
    },
}

impl Outcome {
    /// The type label for a successful outcome.
    #[must_use]
    pub fn type_label(&self) -> Option<String> {
        match self {
            Self::Succeeded { kind, .. } => Some(kind.to_string()),
            Self::Failed { .. } => None,
        }
    }

    /// The error message for a failed outcome.
    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Succeeded { .. } => None,
            Self::Failed { message } => Some(message),
        }
    }

    /// Text for the output pane.
    #[must_use]
    pub fn display(&self) -> String {
        match self {
            Self::Succeeded { value, .. } => format_value(value.as_ref()),
            Self::Failed { message } => format!("Error: {message}"),
        }
    }
}

/// Transient status surfaced to the user, self-clearing after a short
/// delay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    /// An auto-saved slot was silently restored into the buffers.
    Restored,
    /// The buffers were auto-saved after a settled cycle.
    AutoSaved,
}

/// Coordinates editing, evaluation, and persistence.
#[derive(Debug)]
pub struct Orchestrator<S: KvStore, E: Evaluator> {
    options: OrchestratorOptions,
    session: EditSession,
    store: SessionStore<S>,
    evaluator: E,
    deadline: Option<DateTime<Utc>>,
    state: CycleState,
    seq: u64,
    outcome: Option<Outcome>,
    notice: Option<(Notice, DateTime<Utc>)>,
}

impl<S: KvStore, E: Evaluator> Orchestrator<S, E> {
    /// Create an orchestrator with empty buffers.
    pub fn new(store: SessionStore<S>, evaluator: E, options: OrchestratorOptions) -> Self {
        Self {
            options,
            session: EditSession::default(),
            store,
            evaluator,
            deadline: None,
            state: CycleState::Idle,
            seq: 0,
            outcome: None,
            notice: None,
        }
    }

    /// The editing state.
    #[must_use]
    pub fn session(&self) -> &EditSession {
        &self.session
    }

    /// The session store this orchestrator persists through.
    #[must_use]
    pub fn store(&self) -> &SessionStore<S> {
        &self.store
    }

    /// Current cycle state.
    #[must_use]
    pub fn state(&self) -> CycleState {
        self.state
    }

    /// The most recent settled outcome, if any cycle has run.
    #[must_use]
    pub fn outcome(&self) -> Option<&Outcome> {
        self.outcome.as_ref()
    }

    /// The active transient notice, if it has not yet expired.
    #[must_use]
    pub fn notice(&self, now: DateTime<Utc>) -> Option<Notice> {
        self.notice
            .and_then(|(notice, until)| (now < until).then_some(notice))
    }

    /// Whether a debounce deadline is armed.
    #[must_use]
    pub fn evaluation_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Replace the expression buffer and restart the debounce.
    pub fn set_expression(&mut self, text: impl Into<String>, now: DateTime<Utc>) {
        self.session.expression = text.into();
        self.arm(now);
    }

    /// Replace the context buffer and restart the debounce. Any resolved
    /// context path no longer refers to the current text and is dropped.
    pub fn set_context(&mut self, text: impl Into<String>, now: DateTime<Utc>) {
        self.session.context = text.into();
        self.session.context_path = None;
        self.arm(now);
    }

    /// Replace both buffers at once (loading a saved session or the
    /// default example) through the normal change path.
    pub fn load_buffers(
        &mut self,
        expression: impl Into<String>,
        context: impl Into<String>,
        now: DateTime<Utc>,
    ) {
        self.set_expression(expression, now);
        self.set_context(context, now);
    }

    /// Arm the single owned debounce deadline, cancelling any previous
    /// one.
    fn arm(&mut self, now: DateTime<Utc>) {
        self.deadline = Some(now + self.options.debounce_delay);
    }

    /// Advance the clock: fire the debounce if its deadline has passed.
    ///
    /// Returns the settled outcome when a cycle ran. On every settled
    /// cycle - success or failure - the raw buffer text is auto-saved, so
    /// invalid-but-in-progress edits are not lost.
    pub fn tick(&mut self, now: DateTime<Utc>) -> Option<&Outcome> {
        if let Some((_, until)) = self.notice {
            if now >= until {
                self.notice = None;
            }
        }

        if !self.deadline.is_some_and(|deadline| now >= deadline) {
            return None;
        }
        self.deadline = None;

        self.run_cycle();
        self.store
            .auto_save(&self.session.expression, &self.session.context);
        self.notice = Some((
            Notice::AutoSaved,
            now + Duration::seconds(AUTO_SAVED_NOTICE_SECS),
        ));

        self.outcome.as_ref()
    }

    /// Evaluate immediately, bypassing the debounce. A pending deadline
    /// is left armed. Auto-save only happens here when
    /// [`OrchestratorOptions::auto_save_on_manual_evaluate`] is set.
    pub fn evaluate_now(&mut self, now: DateTime<Utc>) -> Option<&Outcome> {
        self.run_cycle();
        if self.options.auto_save_on_manual_evaluate {
            self.store
                .auto_save(&self.session.expression, &self.session.context);
            self.notice = Some((
                Notice::AutoSaved,
                now + Duration::seconds(AUTO_SAVED_NOTICE_SECS),
            ));
        }
        self.outcome.as_ref()
    }

    /// Run one parse-evaluate-classify cycle.
    fn run_cycle(&mut self) {
        self.seq += 1;
        let seq = self.seq;
        self.state = CycleState::Evaluating;

        let outcome = match serde_json::from_str::<Value>(&self.session.context) {
            Err(e) => Outcome::Failed {
                message: format!("Invalid JSON context: {e}"),
            },
            Ok(context) => match self.evaluator.evaluate(&self.session.expression, &context) {
                Ok(value) => {
                    let kind = classify(value.as_ref());
                    Outcome::Succeeded { value, kind }
                }
                Err(e) => Outcome::Failed {
                    message: e.to_string(),
                },
            },
        };

        self.complete(seq, outcome);
    }

    /// Apply a cycle's outcome. An outcome whose sequence number is no
    /// longer the latest issued belongs to a superseded cycle and is
    /// discarded.
    fn complete(&mut self, seq: u64, outcome: Outcome) {
        self.state = CycleState::Idle;
        if seq != self.seq {
            return;
        }
        self.outcome = Some(outcome);
    }

    /// Restore a fresh auto-saved slot into both buffers.
    ///
    /// A slot older than the restore window is retained but not offered.
    /// On restore, a transient [`Notice::Restored`] is raised; the prior
    /// buffer content is not confirmed away since it was only the loaded
    /// default. Returns whether a restore happened.
    pub fn restore_auto_saved(&mut self, now: DateTime<Utc>) -> bool {
        let Some(slot) = self.store.get_auto_saved() else {
            return false;
        };
        if !slot.is_fresh(now) {
            return false;
        }

        self.load_buffers(slot.expression, slot.context, now);
        self.notice = Some((
            Notice::Restored,
            now + Duration::seconds(RESTORED_NOTICE_SECS),
        ));
        true
    }

    /// Resolve the accessor path at a byte offset in the context buffer,
    /// remembering it on the session. Read-only with respect to the
    /// buffers; safe to call on every click.
    pub fn resolve_context_path(&mut self, offset: usize) -> Option<&str> {
        self.session.context_path = resolve_path(&self.session.context, offset);
        self.session.context_path.as_deref()
    }
}
