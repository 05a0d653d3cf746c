//! Error types.
//!
//! Infeasibility is an expected, recoverable outcome — a caller relaxing a
//! deadline should get a typed value to act on, not a panic. Every failure
//! path in the engine surfaces through [`PlanError`].

use crate::lp::SolveError;
use crate::validation::ValidationError;

/// Top-level planning failure.
#[derive(Debug, thiserror::Error)]
pub enum PlanError {
    /// A due task (or one of its prerequisites) cannot meet its deadline
    /// within the allotted day budget.
    #[error("deadline infeasible for '{task}': needs at least {min_days} days, budget is {budget_days}")]
    DeadlineInfeasible {
        task: String,
        min_days: i64,
        budget_days: i64,
    },

    /// Structural validation failed; all detected problems are listed.
    #[error("invalid planning input: {}", format_validation(.0))]
    Invalid(Vec<ValidationError>),

    /// Malformed tensors, degenerate quantities (zero-effort subgraph,
    /// non-positive capacity), or an empty horizon.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The external LP solve failed (infeasible, unbounded, timed out, or
    /// solver-internal error).
    #[error(transparent)]
    Solve(#[from] SolveError),
}

fn format_validation(errors: &[ValidationError]) -> String {
    let msgs: Vec<&str> = errors.iter().map(|e| e.message.as_str()).collect();
    msgs.join("; ")
}
