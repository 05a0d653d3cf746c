//! LP formulation of the day-allocation problem.
//!
//! Bridges the planning domain to a linear-program backend. The
//! [`Optimizer`] takes index-keyed input tensors, builds decision variables
//! `x[i][j]` (hours of task `i` on day `j`) with a five-term weighted
//! objective, submits the model to an [`LpSolver`], and decodes the solution
//! back into an hours-by-task-by-day matrix.
//!
//! # Objective (minimize)
//!
//! 1. `unsmooth_cost · Σ_j |day j total − day j+1 total|` — volatility
//! 2. `time_cost · Σ_ij whether[i][j]·x[i][j]` — total scheduled hours
//! 3. `shift_cost · Σ_ij |whether[i][j]·x[i][j] − x_prime[i][j]|` — churn
//!    against the prior solution
//! 4. `Σ_m miss_daily_cost[m] · Σ_j |day j score m − daily target m|`
//! 5. `Σ_i miss_weekly_cost[i] · Σ_w |weekly target i − week w hours i|`
//!
//! Each absolute value is linearized through an auxiliary non-negative
//! variable (see [`LpModel::bound_abs`]).

mod model;
mod solver;

pub use model::{CmpOp, LinExpr, LpConstraint, LpModel, Variable};
pub use solver::{LpSolution, LpSolver, MicrolpSolver, SolveError, SolverConfig};

use tracing::debug;

use crate::error::PlanError;
use crate::models::{Scores, NUM_SCORES};

/// Solved allocation.
#[derive(Debug, Clone)]
pub struct Solved {
    /// Hours of task `i` on day `j`.
    pub hours: Vec<Vec<f64>>,
    /// Objective value at the optimum.
    pub objective: f64,
}

/// Builds and solves the allocation LP from index-keyed input tensors.
///
/// Every per-task vector and matrix row is keyed by the registry index of
/// the task; [`validate`](Self::validate) rejects mismatched dimensions
/// before any formulation happens.
#[derive(Debug, Clone)]
pub struct Optimizer {
    /// Planning horizon in days.
    pub num_days: usize,
    /// Global cap on summed hours per day.
    pub max_daily_hours: f64,
    /// Days from the plan start until each task's due date; ≤ 0 when the
    /// task is not deadline-driven.
    pub dues: Vec<i64>,
    /// Remaining effort per task (0 for ongoing tasks).
    pub total_hours: Vec<f64>,
    /// Whether each task is finite (gates the completion ceiling).
    pub completable: Vec<bool>,
    /// Per-task cap on hours in a single day.
    pub max_day_hours: Vec<f64>,
    /// Weekly hour target per task (0 when none).
    pub week_hours: Vec<f64>,
    /// Per-hour score weights per task.
    pub hour_scores: Vec<Scores>,
    /// Prior solution, the stabilization anchor.
    pub x_prime: Vec<Vec<f64>>,
    /// Fixed-commitment floor matrix.
    pub perm_task_time: Vec<Vec<f64>>,
    /// 0/1 eligibility mask: may task `i` be scheduled on day `j` at all.
    pub whether: Vec<Vec<f64>>,
    /// Score-target deviation costs, one per category.
    pub miss_daily_target_costs: [f64; NUM_SCORES],
    /// Daily score targets, one per category.
    pub daily_score_targets: [f64; NUM_SCORES],
    /// Weekly-target deviation cost per task (0 when none).
    pub miss_weekly_target_costs: Vec<f64>,
    /// Weight on plan churn.
    pub shift_cost: f64,
    /// Weight on total scheduled hours.
    pub time_cost: f64,
    /// Weight on day-to-day volatility.
    pub unsmooth_cost: f64,
}

impl Optimizer {
    fn num_tasks(&self) -> usize {
        self.dues.len()
    }

    /// Checks tensor dimensions and degenerate quantities.
    pub fn validate(&self) -> Result<(), PlanError> {
        let n = self.num_tasks();
        let d = self.num_days;

        if d == 0 {
            return Err(PlanError::InvalidInput(
                "planning horizon must be at least one day".into(),
            ));
        }
        if !(self.max_daily_hours > 0.0) {
            return Err(PlanError::InvalidInput(format!(
                "max_daily_hours must be positive, got {}",
                self.max_daily_hours
            )));
        }

        let vec_lens = [
            ("total_hours", self.total_hours.len()),
            ("completable", self.completable.len()),
            ("max_day_hours", self.max_day_hours.len()),
            ("week_hours", self.week_hours.len()),
            ("hour_scores", self.hour_scores.len()),
            ("miss_weekly_target_costs", self.miss_weekly_target_costs.len()),
            ("x_prime", self.x_prime.len()),
            ("perm_task_time", self.perm_task_time.len()),
            ("whether", self.whether.len()),
        ];
        for (name, len) in vec_lens {
            if len != n {
                return Err(PlanError::InvalidInput(format!(
                    "{name} has length {len}, expected {n} tasks"
                )));
            }
        }
        for (name, matrix) in [
            ("x_prime", &self.x_prime),
            ("perm_task_time", &self.perm_task_time),
            ("whether", &self.whether),
        ] {
            if let Some(row) = matrix.iter().find(|r| r.len() != d) {
                return Err(PlanError::InvalidInput(format!(
                    "{name} row has length {}, expected {d} days",
                    row.len()
                )));
            }
        }
        Ok(())
    }

    /// Builds the complete constraint system and objective.
    fn build(&self) -> (LpModel, Vec<Vec<Variable>>) {
        let n = self.num_tasks();
        let d = self.num_days;
        let weeks = d / 7;
        let mut model = LpModel::new();

        let x: Vec<Vec<Variable>> = (0..n)
            .map(|_| (0..d).map(|_| model.add_var()).collect())
            .collect();
        let abval1: Vec<Variable> = (0..d.saturating_sub(1)).map(|_| model.add_var()).collect();
        let abval2: Vec<Vec<Variable>> = (0..n)
            .map(|_| (0..d).map(|_| model.add_var()).collect())
            .collect();
        let abval3: Vec<Vec<Variable>> = (0..d)
            .map(|_| (0..NUM_SCORES).map(|_| model.add_var()).collect())
            .collect();
        let abval4: Vec<Vec<Variable>> = (0..n)
            .map(|_| (0..weeks).map(|_| model.add_var()).collect())
            .collect();

        let mut objective = LinExpr::new();
        for &v in &abval1 {
            objective.add_term(v, self.unsmooth_cost);
        }
        for i in 0..n {
            for j in 0..d {
                objective.add_term(x[i][j], self.time_cost * self.whether[i][j]);
                objective.add_term(abval2[i][j], self.shift_cost);
            }
        }
        for j in 0..d {
            for m in 0..NUM_SCORES {
                objective.add_term(abval3[j][m], self.miss_daily_target_costs[m]);
            }
        }
        for i in 0..n {
            for w in 0..weeks {
                objective.add_term(abval4[i][w], self.miss_weekly_target_costs[i]);
            }
        }
        model.set_objective(objective);

        // Deadline floor: due tasks accumulate their horizon-proportional
        // share of total hours before the deadline.
        for i in 0..n {
            let due = self.dues[i];
            if due > 0 {
                let window = (due as usize).min(d);
                let mut expr = LinExpr::new();
                for (j, &xij) in x[i].iter().enumerate().take(window) {
                    expr.add_term(xij, self.whether[i][j]);
                }
                let rhs = self.total_hours[i] * window as f64 / due as f64;
                model.add_constraint(expr, CmpOp::Ge, rhs);
            }
        }

        // Completion ceiling: never schedule more work than a finite task
        // has left.
        for i in 0..n {
            if self.completable[i] {
                let mut expr = LinExpr::new();
                for (j, &xij) in x[i].iter().enumerate() {
                    expr.add_term(xij, self.whether[i][j]);
                }
                model.add_constraint(expr, CmpOp::Le, self.total_hours[i]);
            }
        }

        // Per-task daily cap and fixed-commitment floor.
        for i in 0..n {
            for j in 0..d {
                let gated = LinExpr::new().term(x[i][j], self.whether[i][j]);
                model.add_constraint(gated.clone(), CmpOp::Le, self.max_day_hours[i]);
                model.add_constraint(gated, CmpOp::Ge, self.perm_task_time[i][j]);
            }
        }

        // Day-to-day volatility of total scheduled hours.
        for j in 0..d.saturating_sub(1) {
            let mut diff = LinExpr::new();
            for (i, xi) in x.iter().enumerate() {
                diff.add_term(xi[j], self.whether[i][j]);
                diff.add_term(xi[j + 1], -self.whether[i][j + 1]);
            }
            model.bound_abs(diff, abval1[j]);
        }

        // Deviation from the prior solution.
        for i in 0..n {
            for j in 0..d {
                let diff = LinExpr::new()
                    .term(x[i][j], self.whether[i][j])
                    .with_constant(-self.x_prime[i][j]);
                model.bound_abs(diff, abval2[i][j]);
            }
        }

        // Daily score-target deviation per category.
        for j in 0..d {
            for m in 0..NUM_SCORES {
                let mut diff = LinExpr::new();
                for (i, xi) in x.iter().enumerate() {
                    diff.add_term(xi[j], self.hour_scores[i][m] * self.whether[i][j]);
                }
                diff.add_constant(-self.daily_score_targets[m]);
                model.bound_abs(diff, abval3[j][m]);
            }
        }

        // Weekly-target deviation per 7-day window.
        for i in 0..n {
            for w in 0..weeks {
                let mut diff = LinExpr::new().with_constant(self.week_hours[i]);
                for day in 0..7 {
                    let j = 7 * w + day;
                    diff.add_term(x[i][j], -self.whether[i][j]);
                }
                model.bound_abs(diff, abval4[i][w]);
            }
        }

        // Daily capacity.
        for j in 0..d {
            let mut total = LinExpr::new();
            for (i, xi) in x.iter().enumerate() {
                total.add_term(xi[j], self.whether[i][j]);
            }
            model.add_constraint(total, CmpOp::Le, self.max_daily_hours);
        }

        (model, x)
    }

    /// Formulates, solves, and decodes the allocation.
    ///
    /// Decoding re-applies the whether mask so ineligible cells come back as
    /// exactly zero regardless of solver round-off.
    pub fn optimize<S: LpSolver>(
        &self,
        lp_solver: &S,
        config: &SolverConfig,
    ) -> Result<Solved, PlanError> {
        self.validate()?;
        let (model, x) = self.build();
        debug!(
            tasks = self.num_tasks(),
            days = self.num_days,
            vars = model.num_vars(),
            constraints = model.constraint_count(),
            "formulated allocation LP"
        );

        let solution = lp_solver.solve(&model, config)?;

        let hours = x
            .iter()
            .enumerate()
            .map(|(i, row)| {
                row.iter()
                    .enumerate()
                    .map(|(j, &var)| self.whether[i][j] * solution.value(var))
                    .collect()
            })
            .collect();
        Ok(Solved {
            hours,
            objective: solution.objective(),
        })
    }
}
