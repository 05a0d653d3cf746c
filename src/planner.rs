//! The planner: registry, tensor assembly, and re-optimization.
//!
//! `Planner` owns the task arena and the block list, assigns stable indices,
//! and drives the pipeline: validate → cascade due dates → build every input
//! tensor the [`Optimizer`](crate::lp::Optimizer) needs → solve → decode.
//! The solved matrix is retained and fed into the next solve as the prior
//! solution, biasing re-planning toward continuity.
//!
//! Access is single-writer: cascading and prior-solution feedback are
//! stateful and order-dependent, so callers must serialize use of one
//! `Planner`. Re-running with unchanged inputs is idempotent up to solver
//! tie-breaking among equally optimal plans.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::cascade;
use crate::error::PlanError;
use crate::lp::{LpSolver, MicrolpSolver, Optimizer, SolverConfig};
use crate::models::{Block, Task, TaskId, TaskKind, NUM_SCORES};
use crate::validation;

/// Objective weights and capacity limits.
///
/// Defaults follow the reference configuration: a 15-hour day, a strong
/// total-hours cost so nothing is scheduled without a reason, and per-category
/// daily score targets.
#[derive(Debug, Clone)]
pub struct PlannerConfig {
    /// Global cap on summed hours per day.
    pub max_daily_hours: f64,
    /// Weight on deviation from the prior solution (plan churn).
    pub shift_cost: f64,
    /// Weight on total scheduled hours.
    pub time_cost: f64,
    /// Weight on day-to-day volatility of total hours.
    pub unsmooth_cost: f64,
    /// Per-category daily score targets.
    pub daily_score_targets: [f64; NUM_SCORES],
    /// Per-category costs for missing the daily score target.
    pub miss_daily_score_costs: [f64; NUM_SCORES],
    /// External solver knobs (time limit).
    pub solver: SolverConfig,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            max_daily_hours: 15.0,
            shift_cost: 50.0,
            time_cost: 10_000.0,
            unsmooth_cost: 100.0,
            daily_score_targets: [700.0, 200.0, 50.0, 200.0, 200.0, 2400.0],
            miss_daily_score_costs: [1000.0, 200.0, 300.0, 200.0, 200.0, 50.0],
            solver: SolverConfig::default(),
        }
    }
}

/// A solved day-by-day hour allocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Plan {
    /// First day of the horizon (day index 0).
    pub start: NaiveDate,
    /// Hours of task `i` on day `j`.
    pub hours: Vec<Vec<f64>>,
    /// Objective value at the optimum.
    pub objective: f64,
}

impl Plan {
    /// Horizon length in days.
    pub fn days(&self) -> usize {
        self.hours.first().map_or(0, Vec::len)
    }

    /// Calendar date of day index `j`.
    pub fn date_of(&self, j: usize) -> NaiveDate {
        self.start + Duration::days(j as i64)
    }

    /// Hours allocated to `task` on day `j` (0 outside the matrix).
    pub fn hours_for(&self, task: TaskId, j: usize) -> f64 {
        self.hours
            .get(task.index())
            .and_then(|row| row.get(j))
            .copied()
            .unwrap_or(0.0)
    }

    /// Total hours scheduled on day `j` across all tasks.
    pub fn day_total(&self, j: usize) -> f64 {
        self.hours.iter().filter_map(|row| row.get(j)).sum()
    }

    /// Total hours allocated to `task` across the horizon.
    pub fn task_total(&self, task: TaskId) -> f64 {
        self.hours
            .get(task.index())
            .map_or(0.0, |row| row.iter().sum())
    }
}

/// Task registry, block list, and re-planning driver.
#[derive(Debug, Clone, Default)]
pub struct Planner {
    config: PlannerConfig,
    tasks: Vec<Task>,
    completables: Vec<TaskId>,
    ongoings: Vec<TaskId>,
    blocks: Vec<Block>,
    last_plan: Option<Plan>,
}

impl Planner {
    /// Creates a planner with default weights.
    pub fn new() -> Self {
        Self::with_config(PlannerConfig::default())
    }

    /// Creates a planner with the given weights.
    pub fn with_config(config: PlannerConfig) -> Self {
        Self {
            config,
            tasks: Vec::new(),
            completables: Vec::new(),
            ongoings: Vec::new(),
            blocks: Vec::new(),
            last_plan: None,
        }
    }

    /// Registers a task, returning its stable handle.
    ///
    /// Benchmarks are indexed alongside completables; registration consumes
    /// the task, so a task is registered exactly once.
    pub fn add_task(&mut self, task: Task) -> TaskId {
        let id = TaskId(self.tasks.len());
        match task.kind {
            TaskKind::Completable(_) | TaskKind::Benchmark { .. } => self.completables.push(id),
            TaskKind::Ongoing(_) => self.ongoings.push(id),
        }
        self.tasks.push(task);
        id
    }

    /// Registers a dated milestone for an already-registered ongoing task.
    ///
    /// Copies name, daily capacity, and scores from the referenced task, so
    /// the milestone schedules and scores exactly like the work it stands for.
    pub fn add_benchmark(
        &mut self,
        ongoing: TaskId,
        total_hours: f64,
        due: NaiveDate,
        due_task: bool,
    ) -> Result<TaskId, PlanError> {
        let source = self
            .tasks
            .get(ongoing.index())
            .filter(|t| matches!(t.kind, TaskKind::Ongoing(_)))
            .ok_or_else(|| {
                PlanError::InvalidInput(format!(
                    "benchmark must reference a registered ongoing task, got handle {}",
                    ongoing.index()
                ))
            })?;
        let benchmark = Task::benchmark(
            ongoing,
            source.name.clone(),
            source.max_day_hours,
            total_hours,
            due,
            due_task,
        )
        .with_scores(source.scores);
        Ok(self.add_task(benchmark))
    }

    /// Adds a prerequisite edge: `task` cannot start until `prereq` is done.
    ///
    /// Both handles must refer to completable-kind tasks. Duplicate edges
    /// are no-ops.
    pub fn add_prereq(&mut self, task: TaskId, prereq: TaskId) -> Result<(), PlanError> {
        if prereq.index() >= self.tasks.len()
            || self.tasks[prereq.index()].completable().is_none()
        {
            return Err(PlanError::InvalidInput(format!(
                "prerequisite handle {} is not a registered completable task",
                prereq.index()
            )));
        }
        let dependent = self
            .tasks
            .get_mut(task.index())
            .and_then(Task::completable_mut)
            .ok_or_else(|| {
                PlanError::InvalidInput(format!(
                    "handle {} is not a registered completable task",
                    task.index()
                ))
            })?;
        if !dependent.prereqs.contains(&prereq) {
            dependent.prereqs.push(prereq);
        }
        Ok(())
    }

    /// Registers an ordered to-do list: each task becomes a prerequisite of
    /// the next one.
    ///
    /// Non-completable entries are registered but not linked.
    pub fn add_todo_chain(&mut self, todo: Vec<Task>) -> Vec<TaskId> {
        let mut ids = Vec::with_capacity(todo.len());
        for task in todo {
            let id = self.add_task(task);
            if let Some(&previous) = ids.last() {
                // Both ends must be completable for the link to make sense.
                let _ = self.add_prereq(id, previous);
            }
            ids.push(id);
        }
        ids
    }

    /// Registers a fixed block of already-committed time.
    pub fn add_block(&mut self, block: Block) -> Result<(), PlanError> {
        if block.task.index() >= self.tasks.len() {
            return Err(PlanError::InvalidInput(format!(
                "block references unregistered task handle {}",
                block.task.index()
            )));
        }
        self.blocks.push(block);
        Ok(())
    }

    /// The registered tasks, in registration order.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Looks up a task by handle.
    pub fn task(&self, id: TaskId) -> Option<&Task> {
        self.tasks.get(id.index())
    }

    /// Handles of all completable-kind tasks (benchmarks included).
    pub fn completable_tasks(&self) -> &[TaskId] {
        &self.completables
    }

    /// Handles of all ongoing tasks.
    pub fn ongoing_tasks(&self) -> &[TaskId] {
        &self.ongoings
    }

    /// The most recently solved plan, if any.
    pub fn last_plan(&self) -> Option<&Plan> {
        self.last_plan.as_ref()
    }

    /// Cascades due dates from every due task onto its prerequisites.
    ///
    /// Transactional: on failure no due date is changed.
    pub fn cascade_due_dates(&mut self, budget_days: i64) -> Result<(), PlanError> {
        validation::validate(&self.tasks, &self.blocks).map_err(PlanError::Invalid)?;
        cascade::assign_due_dates(&mut self.tasks, budget_days)
    }

    /// Produces a plan for `days` days starting at `start`, using the
    /// default `microlp` backend.
    pub fn plan(&mut self, start: NaiveDate, days: usize) -> Result<&Plan, PlanError> {
        self.plan_with(&MicrolpSolver, start, days)
    }

    /// Produces a plan with a caller-supplied solving backend.
    ///
    /// Runs the full pipeline and retains the result as the prior solution
    /// for the next call.
    pub fn plan_with<S: LpSolver>(
        &mut self,
        lp_solver: &S,
        start: NaiveDate,
        days: usize,
    ) -> Result<&Plan, PlanError> {
        if days == 0 {
            return Err(PlanError::InvalidInput(
                "planning horizon must be at least one day".into(),
            ));
        }
        info!(tasks = self.tasks.len(), days, %start, "re-planning");

        validation::validate(&self.tasks, &self.blocks).map_err(PlanError::Invalid)?;
        cascade::assign_due_dates(&mut self.tasks, days as i64)?;

        let optimizer = self.build_optimizer(start, days);
        let solved = optimizer.optimize(lp_solver, &self.config.solver)?;
        debug!(objective = solved.objective, "plan solved");

        let plan = Plan {
            start,
            hours: solved.hours,
            objective: solved.objective,
        };
        Ok(self.last_plan.insert(plan))
    }

    /// Assembles every optimizer input tensor from current registry state.
    fn build_optimizer(&self, start: NaiveDate, days: usize) -> Optimizer {
        let n = self.tasks.len();

        let mut dues = vec![0i64; n];
        let mut total_hours = vec![0.0; n];
        let mut completable = vec![false; n];
        let mut week_hours = vec![0.0; n];
        let mut miss_weekly_target_costs = vec![0.0; n];

        for (i, task) in self.tasks.iter().enumerate() {
            if let Some(c) = task.completable() {
                completable[i] = true;
                total_hours[i] = c.total_hours;
                if c.due_task {
                    if let Some(due) = c.due {
                        dues[i] = (due - start).num_days();
                    }
                }
            }
            if let Some(o) = task.ongoing_data() {
                week_hours[i] = o.week_hours_target;
                miss_weekly_target_costs[i] = o.miss_week_target_cost;
            }
        }

        Optimizer {
            num_days: days,
            max_daily_hours: self.config.max_daily_hours,
            dues,
            total_hours,
            completable,
            max_day_hours: self.tasks.iter().map(|t| t.max_day_hours).collect(),
            week_hours,
            hour_scores: self.tasks.iter().map(|t| t.scores).collect(),
            x_prime: self.make_x_prime(start, days),
            perm_task_time: self.make_perm_task_time(start, days),
            whether: self.make_whether(start, days),
            miss_daily_target_costs: self.config.miss_daily_score_costs,
            daily_score_targets: self.config.daily_score_targets,
            miss_weekly_target_costs,
            shift_cost: self.config.shift_cost,
            time_cost: self.config.time_cost,
            unsmooth_cost: self.config.unsmooth_cost,
        }
    }

    /// Prior solution aligned to the new start date and dimensions.
    ///
    /// Columns for days elapsed since the prior plan's start are dropped, so
    /// the churn anchor for a given calendar day is the hours previously
    /// solved for that same day; the tail is zero-padded. A start at or
    /// before the prior start shifts nothing. The registry only grows and
    /// keeps indices stable, so surviving rows still line up with their
    /// tasks; new tasks get zero rows.
    fn make_x_prime(&self, start: NaiveDate, days: usize) -> Vec<Vec<f64>> {
        let n = self.tasks.len();
        let mut x_prime = vec![vec![0.0; days]; n];
        if let Some(previous) = &self.last_plan {
            let elapsed = (start - previous.start).num_days().max(0) as usize;
            for (row, prev_row) in x_prime.iter_mut().zip(&previous.hours) {
                for (cell, &prev) in row.iter_mut().zip(prev_row.iter().skip(elapsed)) {
                    *cell = prev;
                }
            }
        }
        x_prime
    }

    /// Per-cell eligibility mask.
    ///
    /// A completable with prerequisites may not be scheduled before its
    /// prerequisites are meant to finish: days up to the day before the
    /// latest prerequisite due date are masked off. A prerequisite with no
    /// due date masks the dependent for the whole horizon.
    fn make_whether(&self, start: NaiveDate, days: usize) -> Vec<Vec<f64>> {
        let mut whether = vec![vec![1.0; days]; self.tasks.len()];
        for (i, task) in self.tasks.iter().enumerate() {
            let Some(c) = task.completable() else {
                continue;
            };
            let mut gate = 0usize;
            for p in &c.prereqs {
                match self.tasks[p.index()].completable().and_then(|pc| pc.due) {
                    Some(due) => {
                        let idx = (due - start).num_days() - 1;
                        gate = gate.max(idx.max(0) as usize);
                    }
                    None => {
                        gate = days;
                        break;
                    }
                }
            }
            for cell in whether[i].iter_mut().take(gate.min(days)) {
                *cell = 0.0;
            }
        }
        whether
    }

    /// Fixed-commitment floor matrix.
    ///
    /// Later blocks overwrite earlier ones on the same cell; occurrences
    /// do not stack.
    fn make_perm_task_time(&self, start: NaiveDate, days: usize) -> Vec<Vec<f64>> {
        let mut floor = vec![vec![0.0; days]; self.tasks.len()];
        for block in &self.blocks {
            for (j, cell) in floor[block.task.index()].iter_mut().enumerate() {
                let date = start + Duration::days(j as i64);
                if block.occurs_on(date) {
                    *cell = block.hours();
                }
            }
        }
        floor
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Recurrence;
    use chrono::{NaiveDateTime, Weekday};

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn dt(y: i32, m: u32, day: u32, h: u32) -> NaiveDateTime {
        d(y, m, day).and_hms_opt(h, 0, 0).unwrap()
    }

    // 2026-08-24 is a Monday.
    const START: (i32, u32, u32) = (2026, 8, 24);

    fn start_date() -> NaiveDate {
        d(START.0, START.1, START.2)
    }

    #[test]
    fn test_one_off_block_floor_matrix() {
        let mut planner = Planner::new();
        let chores = planner.add_task(Task::new_completable("chores", 4.0, 20.0));
        planner
            .add_block(Block::once(chores, dt(2026, 8, 26, 9), dt(2026, 8, 26, 11)))
            .unwrap();

        let floor = planner.make_perm_task_time(start_date(), 7);
        for (j, &cell) in floor[chores.index()].iter().enumerate() {
            if j == 2 {
                assert!((cell - 2.0).abs() < 1e-12);
            } else {
                assert_eq!(cell, 0.0);
            }
        }
    }

    #[test]
    fn test_weekly_block_floor_matrix() {
        let mut planner = Planner::new();
        let class = planner.add_task(Task::ongoing("class", 3.0, 0.0, 0.0));
        planner
            .add_block(Block::repeating(
                class,
                dt(2026, 8, 24, 18),
                dt(2026, 8, 24, 19),
                d(2026, 9, 30),
                Recurrence::Weekdays(vec![Weekday::Mon]),
            ))
            .unwrap();

        let floor = planner.make_perm_task_time(start_date(), 10);
        for (j, &cell) in floor[class.index()].iter().enumerate() {
            if j == 0 || j == 7 {
                assert!((cell - 1.0).abs() < 1e-12, "day {j} should be a Monday hour");
            } else {
                assert_eq!(cell, 0.0, "day {j} should be empty");
            }
        }
    }

    #[test]
    fn test_overlapping_blocks_overwrite_not_stack() {
        let mut planner = Planner::new();
        let gym = planner.add_task(Task::ongoing("gym", 3.0, 0.0, 0.0));
        planner
            .add_block(Block::once(gym, dt(2026, 8, 25, 9), dt(2026, 8, 25, 11)))
            .unwrap();
        planner
            .add_block(Block::once(gym, dt(2026, 8, 25, 18), dt(2026, 8, 25, 19)))
            .unwrap();

        let floor = planner.make_perm_task_time(start_date(), 7);
        assert!((floor[gym.index()][1] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_plan_meets_deadline_exactly() {
        let mut planner = Planner::new();
        let report = planner.add_task(
            Task::new_completable("report", 15.0, 10.0).with_due(start_date() + Duration::days(5)),
        );

        let plan = planner.plan(start_date(), 5).unwrap();
        assert!((plan.task_total(report) - 10.0).abs() < 1e-6);
        for j in 0..5 {
            assert!(plan.day_total(j) <= 15.0 + 1e-6);
        }
    }

    #[test]
    fn test_plan_reports_impossible_deadline() {
        let mut planner = Planner::new();
        planner.add_task(
            Task::new_completable("mountain", 15.0, 100.0).with_due(start_date() + Duration::days(1)),
        );

        let err = planner.plan(start_date(), 1).unwrap_err();
        assert!(matches!(err, PlanError::DeadlineInfeasible { .. }));
        assert!(planner.last_plan().is_none());
    }

    #[test]
    fn test_prior_solution_feeds_next_solve() {
        let mut planner = Planner::new();
        planner.add_task(
            Task::new_completable("report", 15.0, 10.0).with_due(start_date() + Duration::days(5)),
        );

        let first = planner.plan(start_date(), 5).unwrap().hours.clone();
        let x_prime = planner.make_x_prime(start_date(), 5);
        assert_eq!(x_prime, first);

        // New task appended after a solve gets a zero prior row.
        planner.add_task(Task::ongoing("run", 2.0, 0.0, 0.0));
        let padded = planner.make_x_prime(start_date(), 5);
        assert_eq!(padded.len(), 2);
        assert_eq!(padded[1], vec![0.0; 5]);
    }

    #[test]
    fn test_prior_solution_realigns_to_later_start() {
        let mut planner = Planner::new();
        planner.add_task(Task::new_completable("report", 15.0, 15.0));
        planner.last_plan = Some(Plan {
            start: start_date(),
            hours: vec![vec![1.0, 2.0, 3.0, 4.0, 5.0]],
            objective: 0.0,
        });

        // One day later: the elapsed column drops, the tail zero-pads, and
        // each calendar day keeps its previously solved hours as the anchor.
        let shifted = planner.make_x_prime(start_date() + Duration::days(1), 5);
        assert_eq!(shifted[0], vec![2.0, 3.0, 4.0, 5.0, 0.0]);

        // Past the prior horizon entirely: nothing to anchor to.
        let beyond = planner.make_x_prime(start_date() + Duration::days(10), 5);
        assert_eq!(beyond[0], vec![0.0; 5]);

        // An earlier start never shifts backwards.
        let earlier = planner.make_x_prime(start_date() - Duration::days(2), 5);
        assert_eq!(earlier[0], vec![1.0, 2.0, 3.0, 4.0, 5.0]);
    }

    #[test]
    fn test_prereq_gates_dependent_days() {
        let mut planner = Planner::new();
        let draft = planner.add_task(
            Task::new_completable("draft", 2.0, 4.0).with_due(start_date() + Duration::days(4)),
        );
        let submit = planner.add_task(
            Task::new_completable("submit", 2.0, 2.0).with_due(start_date() + Duration::days(6)),
        );
        planner.add_prereq(submit, draft).unwrap();

        let whether = planner.make_whether(start_date(), 6);
        // Draft is due at index 4; submit is ineligible before index 3.
        assert_eq!(whether[submit.index()][..3], [0.0, 0.0, 0.0]);
        assert_eq!(whether[submit.index()][3..], [1.0, 1.0, 1.0]);
        assert_eq!(whether[draft.index()], vec![1.0; 6]);
    }

    #[test]
    fn test_undated_prereq_masks_whole_horizon() {
        let mut planner = Planner::new();
        let research = planner.add_task(Task::new_completable("research", 2.0, 4.0));
        let writeup = planner.add_task(Task::new_completable("writeup", 2.0, 2.0));
        planner.add_prereq(writeup, research).unwrap();

        let whether = planner.make_whether(start_date(), 5);
        assert_eq!(whether[writeup.index()], vec![0.0; 5]);
        assert_eq!(whether[research.index()], vec![1.0; 5]);
    }

    #[test]
    fn test_gated_task_gets_no_hours_on_gated_days() {
        let mut planner = Planner::new();
        let draft = planner.add_task(Task::new_completable("draft", 2.0, 4.0));
        let submit = planner.add_task(
            Task::new_completable("submit", 2.0, 2.0).with_due(start_date() + Duration::days(6)),
        );
        planner.add_prereq(submit, draft).unwrap();

        // The cascade gives draft a due date, which gates submit's early days.
        let plan = planner.plan(start_date(), 6).unwrap().clone();
        let gate = planner
            .task(draft)
            .unwrap()
            .completable()
            .unwrap()
            .due
            .unwrap();
        let gate_days = (gate - start_date()).num_days() - 1;
        assert!(gate_days > 0, "cascade should leave draft due mid-horizon");
        for j in 0..gate_days as usize {
            assert_eq!(plan.hours_for(submit, j), 0.0, "day {j} should be gated");
        }
        assert!((plan.task_total(submit) - 2.0).abs() < 1e-6);
        assert!((plan.task_total(draft) - 4.0).abs() < 1e-6);
    }

    #[test]
    fn test_replan_is_stable_for_unchanged_inputs() {
        let mut planner = Planner::new();
        let report = planner.add_task(
            Task::new_completable("report", 15.0, 10.0).with_due(start_date() + Duration::days(5)),
        );

        let first = planner.plan(start_date(), 5).unwrap().hours.clone();
        let second = planner.plan(start_date(), 5).unwrap().hours.clone();
        for j in 0..5 {
            assert!(
                (first[report.index()][j] - second[report.index()][j]).abs() < 1e-6,
                "day {j} drifted between identical re-solves"
            );
        }
    }

    #[test]
    fn test_benchmark_copies_ongoing_identity() {
        let mut planner = Planner::new();
        let piano = planner.add_task(
            Task::ongoing("piano", 2.0, 3.0, 100.0).with_scores([0.0, 80.0, 0.0, 0.0, 0.0, 20.0]),
        );
        let concert_prep = planner
            .add_benchmark(piano, 5.0, d(2026, 9, 10), true)
            .unwrap();

        let benchmark = planner.task(concert_prep).unwrap();
        assert_eq!(benchmark.name, "piano");
        assert_eq!(benchmark.max_day_hours, 2.0);
        assert_eq!(benchmark.scores[1], 80.0);
        assert!(benchmark.is_due_task());
    }

    #[test]
    fn test_benchmark_rejects_completable_reference() {
        let mut planner = Planner::new();
        let chores = planner.add_task(Task::new_completable("chores", 4.0, 2.0));
        let err = planner
            .add_benchmark(chores, 5.0, d(2026, 9, 10), true)
            .unwrap_err();
        assert!(matches!(err, PlanError::InvalidInput(_)));
    }

    #[test]
    fn test_add_prereq_rejects_ongoing() {
        let mut planner = Planner::new();
        let run = planner.add_task(Task::ongoing("run", 2.0, 3.0, 100.0));
        let report = planner.add_task(Task::new_completable("report", 4.0, 8.0));
        assert!(planner.add_prereq(report, run).is_err());
        assert!(planner.add_prereq(run, report).is_err());
    }

    #[test]
    fn test_todo_chain_links_in_order() {
        let mut planner = Planner::new();
        let ids = planner.add_todo_chain(vec![
            Task::new_completable("draft", 4.0, 4.0),
            Task::new_completable("revise", 4.0, 2.0),
            Task::new_completable("submit", 4.0, 1.0).with_due(d(2026, 9, 10)),
        ]);

        let revise = planner.task(ids[1]).unwrap().completable().unwrap();
        assert_eq!(revise.prereqs, vec![ids[0]]);
        let submit = planner.task(ids[2]).unwrap().completable().unwrap();
        assert_eq!(submit.prereqs, vec![ids[1]]);
    }

    #[test]
    fn test_cascade_through_planner_sets_prereq_dues() {
        let mut planner = Planner::new();
        let ids = planner.add_todo_chain(vec![
            Task::new_completable("draft", 2.0, 2.0),
            Task::new_completable("submit", 2.0, 2.0).with_due(start_date() + Duration::days(10)),
        ]);
        planner.cascade_due_dates(10).unwrap();

        let draft = planner.task(ids[0]).unwrap().completable().unwrap();
        let submit = planner.task(ids[1]).unwrap().completable().unwrap();
        assert!(draft.due_task);
        assert!(draft.due.unwrap() < submit.due.unwrap());
    }

    #[test]
    fn test_block_floor_survives_into_plan() {
        let mut planner = Planner::new();
        let class = planner.add_task(Task::ongoing("class", 3.0, 0.0, 0.0));
        planner
            .add_block(Block::once(class, dt(2026, 8, 25, 9), dt(2026, 8, 25, 11)))
            .unwrap();

        let plan = planner.plan(start_date(), 3).unwrap();
        assert!(plan.hours_for(class, 1) >= 2.0 - 1e-6);
    }

    #[test]
    fn test_zero_day_horizon_rejected() {
        let mut planner = Planner::new();
        let err = planner.plan(start_date(), 0).unwrap_err();
        assert!(matches!(err, PlanError::InvalidInput(_)));
    }
}
