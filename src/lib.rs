//! Day-by-day hour allocation engine for personal re-planning.
//!
//! Turns a registry of tasks — finite-effort work with deadlines, open-ended
//! recurring commitments, and fixed pre-existing time blocks — into an
//! hours-by-task-by-day matrix that satisfies deadlines, respects daily
//! capacity, and steers toward score-based lifestyle targets. The allocation
//! is solved exactly as a linear program, not heuristically.
//!
//! # Modules
//!
//! - **`models`**: Domain types — `Task`, `TaskKind`, `Block`, `Recurrence`
//! - **`validation`**: Input integrity checks (handle references, DAG cycles)
//! - **`cascade`**: Proportional due-date propagation through prerequisites
//! - **`lp`**: LP formulation, the solver contract, and the `microlp` backend
//! - **`planner`**: The aggregator gluing it all together
//!
//! # Pipeline
//!
//! `Planner` → validate → cascade due dates → build tensors → `Optimizer` →
//! external LP solver → hours matrix, which is fed back into the next solve
//! as a stabilization anchor.
//!
//! # References
//!
//! - Chvátal (1983), "Linear Programming" (absolute-value linearization)
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems"

pub mod cascade;
pub mod error;
pub mod lp;
pub mod models;
pub mod planner;
pub mod validation;

pub use error::PlanError;
pub use models::{Block, Recurrence, Repeat, Task, TaskId, TaskKind, NUM_SCORES};
pub use planner::{Plan, Planner, PlannerConfig};
