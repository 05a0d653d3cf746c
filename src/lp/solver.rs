//! LP solving backend contract and the `microlp` implementation.
//!
//! The solving algorithm (simplex/interior-point) is an external capability:
//! the engine only depends on the [`LpSolver`] trait. [`MicrolpSolver`] is
//! the default backend, a pure-Rust simplex implementation.

use std::time::{Duration, Instant};

use tracing::debug;

use super::model::{CmpOp, LpModel, Variable};

/// Solver tuning knobs.
#[derive(Debug, Clone, Default)]
pub struct SolverConfig {
    /// Wall-clock budget for one solve. `None` = unlimited.
    ///
    /// `microlp` cannot be interrupted mid-solve, so the default backend
    /// checks elapsed time after the blocking call and reports
    /// [`SolveError::TimedOut`] rather than returning a late result.
    pub time_limit: Option<Duration>,
}

impl SolverConfig {
    /// Config with a wall-clock limit.
    pub fn with_time_limit(limit: Duration) -> Self {
        Self {
            time_limit: Some(limit),
        }
    }
}

/// Why a solve produced no usable solution.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SolveError {
    /// The constraint system has no feasible point.
    #[error("linear program is infeasible")]
    Infeasible,
    /// The objective can decrease without bound.
    #[error("linear program is unbounded")]
    Unbounded,
    /// The solve finished after the configured wall-clock budget.
    #[error("solver exceeded time limit: took {elapsed_ms} ms of {limit_ms} ms")]
    TimedOut { limit_ms: u128, elapsed_ms: u128 },
    /// The backend failed internally.
    #[error("solver failure: {0}")]
    Solver(String),
}

/// Solved variable values, retrievable only on an optimal outcome.
#[derive(Debug, Clone)]
pub struct LpSolution {
    values: Vec<f64>,
    objective: f64,
}

impl LpSolution {
    /// Value of a decision variable at the optimum.
    pub fn value(&self, var: Variable) -> f64 {
        self.values[var.index()]
    }

    /// Objective value at the optimum (including any objective constant).
    pub fn objective(&self) -> f64 {
        self.objective
    }
}

/// An external linear-program solving capability.
pub trait LpSolver {
    /// Solves `model` to optimality or reports why it could not.
    fn solve(&self, model: &LpModel, config: &SolverConfig) -> Result<LpSolution, SolveError>;
}

/// Default backend: the `microlp` simplex solver.
#[derive(Debug, Clone, Copy, Default)]
pub struct MicrolpSolver;

impl LpSolver for MicrolpSolver {
    fn solve(&self, model: &LpModel, config: &SolverConfig) -> Result<LpSolution, SolveError> {
        let started = Instant::now();
        let mut problem = microlp::Problem::new(microlp::OptimizationDirection::Minimize);

        // microlp takes objective coefficients at variable creation.
        let mut objective = vec![0.0; model.num_vars()];
        for &(var, coefficient) in model.objective().terms() {
            objective[var.index()] += coefficient;
        }
        let vars: Vec<microlp::Variable> = objective
            .iter()
            .map(|&c| problem.add_var(c, (0.0, f64::INFINITY)))
            .collect();

        for constraint in model.constraints() {
            let terms: Vec<(microlp::Variable, f64)> = constraint
                .expr
                .terms()
                .iter()
                .map(|&(var, coefficient)| (vars[var.index()], coefficient))
                .collect();
            let op = match constraint.op {
                CmpOp::Le => microlp::ComparisonOp::Le,
                CmpOp::Ge => microlp::ComparisonOp::Ge,
                CmpOp::Eq => microlp::ComparisonOp::Eq,
            };
            // Constants live on the rhs in microlp's form.
            let rhs = constraint.rhs - constraint.expr.constant();
            problem.add_constraint(&terms[..], op, rhs);
        }

        debug!(
            vars = model.num_vars(),
            constraints = model.constraint_count(),
            "submitting LP to microlp"
        );

        let outcome = match problem.solve() {
            Ok(solution) => {
                let values = vars.iter().map(|&v| solution[v]).collect();
                Ok(LpSolution {
                    values,
                    objective: solution.objective() + model.objective().constant(),
                })
            }
            Err(microlp::Error::Infeasible) => Err(SolveError::Infeasible),
            Err(microlp::Error::Unbounded) => Err(SolveError::Unbounded),
            Err(other) => Err(SolveError::Solver(other.to_string())),
        };

        if let Some(limit) = config.time_limit {
            let elapsed = started.elapsed();
            if elapsed > limit {
                return Err(SolveError::TimedOut {
                    limit_ms: limit.as_millis(),
                    elapsed_ms: elapsed.as_millis(),
                });
            }
        }
        outcome
    }
}
