//! Execution engine.
//!
//! Dispatches normalized calls to their handlers strictly in order. A
//! failing call is recorded as an `Err` result and the batch moves on;
//! nothing here aborts a batch.

use codescape_core::{NormalizedCall, Value};
use serde::Serialize;

use crate::placement::Outcome;
use crate::registry::Registry;
use crate::world::World;

/// Ok outcome, or the failure message carried verbatim.
pub type ExecutionOutcome = Result<Outcome, String>;

/// One call plus what happened when it ran.
#[derive(Debug, Clone, PartialEq)]
pub struct ExecutionResult {
    pub call: NormalizedCall,
    pub outcome: ExecutionOutcome,
}

#[derive(Serialize)]
struct ResultJson<'a> {
    line: u32,
    operation: &'a str,
    args: &'a [Value],
    original: &'a str,
    ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    value: Option<&'a Outcome>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<&'a str>,
}

impl ExecutionResult {
    pub fn is_ok(&self) -> bool {
        self.outcome.is_ok()
    }

    pub fn to_json_value(&self) -> serde_json::Value {
        let (value, error) = match &self.outcome {
            Ok(outcome) => (Some(outcome), None),
            Err(msg) => (None, Some(msg.as_str())),
        };
        serde_json::to_value(ResultJson {
            line: self.call.line,
            operation: &self.call.operation,
            args: &self.call.args,
            original: self.call.original.trim(),
            ok: self.is_ok(),
            value,
            error,
        })
        .unwrap_or(serde_json::Value::Null)
    }
}

/// Run every call in order against `world`.
///
/// Returns the per-call results (same order as `calls`) and the number of
/// Ok outcomes.
pub fn execute(
    calls: &[NormalizedCall],
    registry: &Registry,
    world: &mut World,
) -> (Vec<ExecutionResult>, usize) {
    let mut results = Vec::with_capacity(calls.len());
    let mut success_count = 0;

    for call in calls {
        let outcome = match registry.get(&call.operation) {
            None => Err(format!("handler not found: {}", call.operation)),
            Some(handler) => {
                tracing::debug!(line = call.line, operation = %call.operation, "dispatching call");
                handler(world, &call.args).map_err(|e| e.to_string())
            }
        };
        match &outcome {
            Ok(value) => {
                success_count += 1;
                tracing::debug!(line = call.line, result = %value, "call succeeded");
            }
            Err(msg) => {
                tracing::debug!(line = call.line, operation = %call.operation, error = %msg, "call failed");
            }
        }
        results.push(ExecutionResult {
            call: call.clone(),
            outcome,
        });
    }

    tracing::info!(
        calls = calls.len(),
        succeeded = success_count,
        failed = calls.len() - success_count,
        "batch executed"
    );
    (results, success_count)
}
