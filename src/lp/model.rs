//! Linear program model.
//!
//! The narrow contract this crate demands from a solving backend, expressed
//! as plain data: continuous variables with implicit lower bound 0 and no
//! upper bound, linear expressions as (coefficient, variable) sums plus an
//! optional constant, ≤/≥/= constraints, and one minimization objective.
//! A backend implements [`LpSolver`](super::LpSolver) over this model.

/// Handle to a decision variable.
///
/// Continuous, lower bound 0, no upper bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Variable(pub(crate) usize);

impl Variable {
    /// Position of this variable in the model (and the solution vector).
    #[inline]
    pub fn index(&self) -> usize {
        self.0
    }
}

/// A linear expression: `Σ coefficient·variable + constant`.
#[derive(Debug, Clone, Default)]
pub struct LinExpr {
    terms: Vec<(Variable, f64)>,
    constant: f64,
}

impl LinExpr {
    /// Creates an empty expression.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a `coefficient·variable` term.
    pub fn add_term(&mut self, var: Variable, coefficient: f64) {
        self.terms.push((var, coefficient));
    }

    /// Builder form of [`add_term`](Self::add_term).
    pub fn term(mut self, var: Variable, coefficient: f64) -> Self {
        self.add_term(var, coefficient);
        self
    }

    /// Adds to the constant part.
    pub fn add_constant(&mut self, constant: f64) {
        self.constant += constant;
    }

    /// Builder form of [`add_constant`](Self::add_constant).
    pub fn with_constant(mut self, constant: f64) -> Self {
        self.add_constant(constant);
        self
    }

    /// The expression with every term and the constant negated.
    pub fn negated(&self) -> Self {
        Self {
            terms: self.terms.iter().map(|&(v, c)| (v, -c)).collect(),
            constant: -self.constant,
        }
    }

    /// The (coefficient, variable) terms.
    pub fn terms(&self) -> &[(Variable, f64)] {
        &self.terms
    }

    /// The constant part.
    pub fn constant(&self) -> f64 {
        self.constant
    }
}

/// Constraint comparison operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CmpOp {
    /// Expression ≤ rhs.
    Le,
    /// Expression ≥ rhs.
    Ge,
    /// Expression = rhs.
    Eq,
}

/// A registered constraint: `expr op rhs`.
#[derive(Debug, Clone)]
pub struct LpConstraint {
    pub expr: LinExpr,
    pub op: CmpOp,
    pub rhs: f64,
}

/// A linear program in minimization form.
#[derive(Debug, Clone, Default)]
pub struct LpModel {
    num_vars: usize,
    objective: LinExpr,
    constraints: Vec<LpConstraint>,
}

impl LpModel {
    /// Creates an empty model.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a continuous variable with lower bound 0 and no upper bound.
    pub fn add_var(&mut self) -> Variable {
        let var = Variable(self.num_vars);
        self.num_vars += 1;
        var
    }

    /// Number of variables.
    pub fn num_vars(&self) -> usize {
        self.num_vars
    }

    /// Number of constraints.
    pub fn constraint_count(&self) -> usize {
        self.constraints.len()
    }

    /// Registers `expr op rhs`.
    pub fn add_constraint(&mut self, expr: LinExpr, op: CmpOp, rhs: f64) {
        self.constraints.push(LpConstraint { expr, op, rhs });
    }

    /// Sets the minimization objective.
    pub fn set_objective(&mut self, objective: LinExpr) {
        self.objective = objective;
    }

    /// The minimization objective.
    pub fn objective(&self) -> &LinExpr {
        &self.objective
    }

    /// The registered constraints.
    pub fn constraints(&self) -> &[LpConstraint] {
        &self.constraints
    }

    /// Binds `bound ≥ |expr|` via the standard constraint pair
    /// `expr − bound ≤ 0` and `−expr − bound ≤ 0`.
    ///
    /// With a strictly positive cost on `bound` in a minimization, the
    /// solver drives `bound` down to exactly `|expr|` at optimality.
    pub fn bound_abs(&mut self, expr: LinExpr, bound: Variable) {
        let pos = expr.clone().term(bound, -1.0);
        let neg = expr.negated().term(bound, -1.0);
        self.add_constraint(pos, CmpOp::Le, 0.0);
        self.add_constraint(neg, CmpOp::Le, 0.0);
    }
}
