//! Planning domain models.
//!
//! Core data types for representing a personal planning problem: tasks
//! (finite, ongoing, or benchmarked), fixed time blocks, and calendar
//! recurrence rules. Tasks are immutable after construction except for
//! due-date lowering, which is driven by the deadline cascade.

mod block;
mod recurrence;
mod task;

pub use block::{Block, Repeat};
pub use recurrence::Recurrence;
pub use task::{CompletableData, OngoingData, Scores, Task, TaskId, TaskKind, NUM_SCORES};
