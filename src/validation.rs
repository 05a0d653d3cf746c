//! Input validation for planning problems.
//!
//! Checks structural integrity of the task registry and block list before
//! cascading or optimizing. Detects:
//! - Non-positive or non-finite per-day capacity
//! - Negative or non-finite effort and targets
//! - Out-of-range handle references (prerequisites, benchmarks, blocks)
//! - Prerequisites pointing at non-completable tasks
//! - Circular prerequisite dependencies (DAG validation)
//! - Degenerate blocks (end before start, zero repeat interval)
//!
//! # Reference
//! Cormen et al. (2009), "Introduction to Algorithms", Ch. 22.4 (Topological Sort)

use std::collections::HashSet;

use crate::models::{Block, Recurrence, Task, TaskId, TaskKind};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// `max_day_hours` is zero, negative, or non-finite.
    NonPositiveCapacity,
    /// Effort, target, cost, or score is negative or non-finite.
    InvalidQuantity,
    /// A handle points outside the registry or at the wrong task kind.
    InvalidTaskReference,
    /// Prerequisite graph contains a cycle.
    CyclicDependency,
    /// A block's interval or repeat rule is degenerate.
    InvalidBlock,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates a task registry and its block list.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate(tasks: &[Task], blocks: &[Block]) -> ValidationResult {
    let mut errors = Vec::new();
    let n = tasks.len();

    for (i, task) in tasks.iter().enumerate() {
        if !(task.max_day_hours > 0.0) || !task.max_day_hours.is_finite() {
            errors.push(ValidationError::new(
                ValidationErrorKind::NonPositiveCapacity,
                format!(
                    "task '{}' has non-positive max_day_hours {}",
                    task.name, task.max_day_hours
                ),
            ));
        }

        if task.scores.iter().any(|s| !s.is_finite()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidQuantity,
                format!("task '{}' has a non-finite score", task.name),
            ));
        }

        if let Some(c) = task.completable() {
            if !(c.total_hours >= 0.0) || !c.total_hours.is_finite() {
                errors.push(ValidationError::new(
                    ValidationErrorKind::InvalidQuantity,
                    format!(
                        "task '{}' has invalid total_hours {}",
                        task.name, c.total_hours
                    ),
                ));
            }
            for p in &c.prereqs {
                if p.index() >= n {
                    errors.push(ValidationError::new(
                        ValidationErrorKind::InvalidTaskReference,
                        format!(
                            "task '{}' has out-of-range prerequisite handle {}",
                            task.name,
                            p.index()
                        ),
                    ));
                } else if tasks[p.index()].completable().is_none() {
                    errors.push(ValidationError::new(
                        ValidationErrorKind::InvalidTaskReference,
                        format!(
                            "task '{}' lists ongoing task '{}' as a prerequisite; \
                             use a benchmark instead",
                            task.name,
                            tasks[p.index()].name
                        ),
                    ));
                }
            }
        }

        if let Some(o) = task.ongoing_data() {
            if o.week_hours_target < 0.0
                || o.miss_week_target_cost < 0.0
                || !o.week_hours_target.is_finite()
                || !o.miss_week_target_cost.is_finite()
            {
                errors.push(ValidationError::new(
                    ValidationErrorKind::InvalidQuantity,
                    format!("task '{}' has an invalid weekly target", task.name),
                ));
            }
        }

        if let TaskKind::Benchmark { ongoing, .. } = &task.kind {
            let ok = ongoing.index() < n
                && matches!(tasks[ongoing.index()].kind, TaskKind::Ongoing(_));
            if !ok {
                errors.push(ValidationError::new(
                    ValidationErrorKind::InvalidTaskReference,
                    format!(
                        "benchmark '{}' (handle {}) does not reference an ongoing task",
                        task.name, i
                    ),
                ));
            }
        }
    }

    for block in blocks {
        if block.task.index() >= n {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidTaskReference,
                format!(
                    "block references out-of-range task handle {}",
                    block.task.index()
                ),
            ));
        }
        if block.end < block.start {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidBlock,
                format!("block on handle {} ends before it starts", block.task.index()),
            ));
        }
        if let Some(repeat) = &block.repeat {
            if let Recurrence::Interval { every_days: 0, .. } = repeat.rule {
                errors.push(ValidationError::new(
                    ValidationErrorKind::InvalidBlock,
                    format!(
                        "repeating block on handle {} has a zero-day interval",
                        block.task.index()
                    ),
                ));
            }
        }
    }

    if let Some(id) = find_cycle(tasks) {
        errors.push(ValidationError::new(
            ValidationErrorKind::CyclicDependency,
            format!(
                "prerequisite cycle detected involving task '{}'",
                tasks[id.index()].name
            ),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Finds a task on a prerequisite cycle, if any exists.
///
/// DFS-based topological check: a back-edge to a node still on the recursion
/// stack proves a cycle. Out-of-range handles are skipped here; they are
/// reported separately by [`validate`].
pub(crate) fn find_cycle(tasks: &[Task]) -> Option<TaskId> {
    let mut visited = HashSet::new();
    let mut in_stack = HashSet::new();

    for start in 0..tasks.len() {
        if !visited.contains(&start) && has_cycle_dfs(tasks, start, &mut visited, &mut in_stack) {
            return Some(TaskId(start));
        }
    }
    None
}

fn has_cycle_dfs(
    tasks: &[Task],
    node: usize,
    visited: &mut HashSet<usize>,
    in_stack: &mut HashSet<usize>,
) -> bool {
    visited.insert(node);
    in_stack.insert(node);

    if let Some(c) = tasks[node].completable() {
        for p in &c.prereqs {
            let next = p.index();
            if next >= tasks.len() {
                continue;
            }
            if in_stack.contains(&next) {
                return true; // back edge
            }
            if !visited.contains(&next) && has_cycle_dfs(tasks, next, visited, in_stack) {
                return true;
            }
        }
    }

    in_stack.remove(&node);
    false
}
