//! Task model.
//!
//! A task is a unit of schedulable work. Three kinds exist:
//!
//! - **Completable**: finite effort, optional deadline, prerequisite set.
//!   Projects and chores.
//! - **Ongoing**: open-ended recurring commitment with an optional weekly
//!   hour target. Exercise, skills practice.
//! - **Benchmark**: a dated milestone carved out of an ongoing task (e.g.
//!   "5 hours of piano practice before the concert"), so recurring work can
//!   participate as a prerequisite with a concrete due date.
//!
//! Tasks live in an arena owned by the [`Planner`](crate::planner::Planner)
//! and are referenced by stable [`TaskId`] handles; prerequisite edges are
//! adjacency lists of handles.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Number of lifestyle score categories.
pub const NUM_SCORES: usize = 6;

/// Per-hour score weights, one per lifestyle category.
pub type Scores = [f64; NUM_SCORES];

/// Stable arena handle for a registered task.
///
/// Assigned at registration, valid for the lifetime of the owning planner.
/// Every index-keyed tensor fed to the optimizer uses these indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaskId(pub(crate) usize);

impl TaskId {
    /// Position of this task in the registry (and in every tensor row).
    #[inline]
    pub fn index(&self) -> usize {
        self.0
    }
}

/// A unit of schedulable work.
///
/// Construction is via [`Task::new_completable`], [`Task::ongoing`], or
/// [`Task::benchmark`] plus `with_*` builders. After registration the only
/// mutation the engine performs is lowering a completable's due date.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    /// Display name. Not an identity key.
    pub name: String,
    /// Maximum hours this task may receive on any single day.
    pub max_day_hours: f64,
    /// Per-hour score weights (one per lifestyle category).
    pub scores: Scores,
    /// Kind-specific data.
    pub kind: TaskKind,
}

/// Kind-specific task data.
///
/// A tagged variant rather than an inheritance ladder: a benchmark is a
/// completable goal plus a handle to the ongoing task it milestones, not a
/// second representation of the same task.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum TaskKind {
    /// Finite-effort task.
    Completable(CompletableData),
    /// Open-ended recurring task.
    Ongoing(OngoingData),
    /// Dated milestone for an ongoing task.
    Benchmark {
        /// The finite goal (due date, hours, prerequisites).
        goal: CompletableData,
        /// The ongoing task this milestone belongs to.
        ongoing: TaskId,
    },
}

/// Finite-effort task data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletableData {
    /// Deadline. `None` until assigned (directly or by the cascade).
    pub due: Option<NaiveDate>,
    /// Whether this task's deadline actively drives schedule pressure.
    pub due_task: bool,
    /// Remaining effort in hours. Constant; the engine never burns it down.
    pub total_hours: f64,
    /// Prerequisite tasks (must be completable-kind).
    pub prereqs: Vec<TaskId>,
}

/// Recurring-commitment data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OngoingData {
    /// Target hours per 7-day week. Zero = no target.
    pub week_hours_target: f64,
    /// Objective cost per hour of weekly-target deviation. Zero = no target.
    pub miss_week_target_cost: f64,
}

impl CompletableData {
    /// Lowers the due date, never raises it.
    ///
    /// A `None` due date is treated as unboundedly late.
    pub fn push_up_due_date(&mut self, date: NaiveDate) {
        match self.due {
            Some(current) if current <= date => {}
            _ => self.due = Some(date),
        }
    }
}

impl Task {
    /// Creates a completable task with no deadline.
    pub fn new_completable(name: impl Into<String>, max_day_hours: f64, total_hours: f64) -> Self {
        Self {
            name: name.into(),
            max_day_hours,
            scores: [0.0; NUM_SCORES],
            kind: TaskKind::Completable(CompletableData {
                due: None,
                due_task: false,
                total_hours,
                prereqs: Vec::new(),
            }),
        }
    }

    /// Creates an ongoing task.
    ///
    /// Pass zero for both target fields if there is no weekly target.
    pub fn ongoing(
        name: impl Into<String>,
        max_day_hours: f64,
        week_hours_target: f64,
        miss_week_target_cost: f64,
    ) -> Self {
        Self {
            name: name.into(),
            max_day_hours,
            scores: [0.0; NUM_SCORES],
            kind: TaskKind::Ongoing(OngoingData {
                week_hours_target,
                miss_week_target_cost,
            }),
        }
    }

    /// Creates a benchmark: a dated, finite goal for an ongoing task.
    ///
    /// Prefer [`Planner::add_benchmark`](crate::planner::Planner::add_benchmark),
    /// which copies name, capacity, and scores from the referenced task.
    pub fn benchmark(
        ongoing: TaskId,
        name: impl Into<String>,
        max_day_hours: f64,
        total_hours: f64,
        due: NaiveDate,
        due_task: bool,
    ) -> Self {
        Self {
            name: name.into(),
            max_day_hours,
            scores: [0.0; NUM_SCORES],
            kind: TaskKind::Benchmark {
                goal: CompletableData {
                    due: Some(due),
                    due_task,
                    total_hours,
                    prereqs: Vec::new(),
                },
                ongoing,
            },
        }
    }

    /// Sets the score vector.
    pub fn with_scores(mut self, scores: Scores) -> Self {
        self.scores = scores;
        self
    }

    /// Sets the deadline and marks the task as deadline-driven.
    ///
    /// No effect on ongoing tasks (they have no deadline).
    pub fn with_due(mut self, due: NaiveDate) -> Self {
        if let Some(c) = self.completable_mut() {
            c.due = Some(due);
            c.due_task = true;
        }
        self
    }

    /// Adds a prerequisite edge.
    ///
    /// The handle is checked for range and kind at validation time.
    pub fn with_prereq(mut self, prereq: TaskId) -> Self {
        if let Some(c) = self.completable_mut() {
            if !c.prereqs.contains(&prereq) {
                c.prereqs.push(prereq);
            }
        }
        self
    }

    /// Completable view: `Some` for completables and benchmarks.
    pub fn completable(&self) -> Option<&CompletableData> {
        match &self.kind {
            TaskKind::Completable(c) => Some(c),
            TaskKind::Benchmark { goal, .. } => Some(goal),
            TaskKind::Ongoing(_) => None,
        }
    }

    /// Mutable completable view.
    pub(crate) fn completable_mut(&mut self) -> Option<&mut CompletableData> {
        match &mut self.kind {
            TaskKind::Completable(c) => Some(c),
            TaskKind::Benchmark { goal, .. } => Some(goal),
            TaskKind::Ongoing(_) => None,
        }
    }

    /// Ongoing view: `Some` only for ongoing-kind tasks.
    pub fn ongoing_data(&self) -> Option<&OngoingData> {
        match &self.kind {
            TaskKind::Ongoing(o) => Some(o),
            _ => None,
        }
    }

    /// Whether this task's deadline actively drives schedule pressure.
    pub fn is_due_task(&self) -> bool {
        self.completable().is_some_and(|c| c.due_task)
    }

    /// Minimum days needed to finish even at maximal daily effort.
    ///
    /// `ceil(total_hours / max_day_hours)`; `None` for ongoing tasks.
    /// Used as a feasibility floor by the cascade.
    pub fn min_days(&self) -> Option<i64> {
        let c = self.completable()?;
        Some((c.total_hours / self.max_day_hours).ceil() as i64)
    }
}
