//! The external evaluator boundary.
//!
//! The expression language itself is a black box: an evaluator takes an
//! expression string and a context value and either returns a value (or
//! nothing) or fails with a human-readable message. The playground talks
//! to the reference evaluator service over HTTP.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Evaluation failure, carrying the evaluator's message verbatim.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{0}")]
pub struct EvaluatorError(pub String);

/// Outcome of a single evaluator call. `Ok(None)` models an absent
/// (`undefined`) result.
pub type EvalResult = std::result::Result<Option<Value>, EvaluatorError>;

/// An expression evaluator.
pub trait Evaluator {
    /// Evaluate `expression` against `context`.
    ///
    /// # Errors
    ///
    /// Returns an [`EvaluatorError`] with the evaluator's own message if
    /// the expression cannot be evaluated.
    fn evaluate(&self, expression: &str, context: &Value) -> EvalResult;
}

/// Any closure with the right shape is an evaluator. Used by tests and
/// embedders that evaluate in-process.
impl<F> Evaluator for F
where
    F: Fn(&str, &Value) -> EvalResult,
{
    fn evaluate(&self, expression: &str, context: &Value) -> EvalResult {
        self(expression, context)
    }
}

/// Request body for `POST /evaluate`.
#[derive(Debug, Serialize)]
struct EvalRequest<'a> {
    expression: &'a str,
    context: &'a Value,
}

/// Response body from `POST /evaluate`.
#[derive(Debug, Deserialize)]
struct EvalResponse {
    #[serde(default)]
    result: Value,
    #[serde(default)]
    error: Option<String>,
}

/// Evaluator backed by the playground's evaluate endpoint.
#[derive(Debug)]
pub struct HttpEvaluator {
    client: reqwest::blocking::Client,
    endpoint: String,
}

impl HttpEvaluator {
    /// Create an evaluator for the service at `endpoint` (base URL,
    /// without the `/evaluate` suffix).
    #[must_use]
    pub fn new(endpoint: &str) -> Self {
        Self {
            client: reqwest::blocking::Client::new(),
            endpoint: endpoint.trim_end_matches('/').to_string(),
        }
    }
}

impl Evaluator for HttpEvaluator {
    fn evaluate(&self, expression: &str, context: &Value) -> EvalResult {
        let response = self
            .client
            .post(format!("{}/evaluate", self.endpoint))
            .json(&EvalRequest {
                expression,
                context,
            })
            .send()
            .and_then(reqwest::blocking::Response::error_for_status)
            .map_err(|e| EvaluatorError(e.to_string()))?;

        let body: EvalResponse = response
            .json()
            .map_err(|e| EvaluatorError(format!("invalid evaluator response: {e}")))?;

        match body.error {
            Some(message) => Err(EvaluatorError(message)),
            None => Ok(Some(body.result)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn closures_are_evaluators() {
        let eval = |_: &str, context: &Value| -> EvalResult { Ok(context.get("a").cloned()) };

        let result = eval.evaluate("a", &json!({"a": 7})).unwrap();
        assert_eq!(result, Some(json!(7)));

        let absent = eval.evaluate("b", &json!({})).unwrap();
        assert_eq!(absent, None);
    }

    #[test]
    fn evaluator_error_displays_message_verbatim() {
        let err = EvaluatorError("Unexpected token at position 3".to_string());
        assert_eq!(err.to_string(), "Unexpected token at position 3");
    }

    #[test]
    fn response_error_takes_precedence() {
        // The wire envelope is {result, error}; an error message means
        // failure even when a result field is present.
        let body: EvalResponse =
            serde_json::from_str(r#"{"result": null, "error": "boom"}"#).unwrap();
        assert_eq!(body.error.as_deref(), Some("boom"));
    }

    #[test]
    fn response_defaults_missing_result_to_null() {
        let body: EvalResponse = serde_json::from_str(r#"{"error": null}"#).unwrap();
        assert_eq!(body.result, Value::Null);
        assert!(body.error.is_none());
    }
}
