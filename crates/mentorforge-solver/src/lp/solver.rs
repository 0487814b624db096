//! The capability every integer-programming backend provides.

use super::error::Result;
use super::expr::{LinearConstraint, LinearExpr, VarId};
use super::program::{LinearProgram, Solution};
use super::status::SolverStatus;

/// A backend that maximizes a linear objective over boolean variables.
///
/// The model is recorded in a [`LinearProgram`]; implementors provide
/// access to it and the `solve` step. Building against this trait keeps
/// model code independent of the backend.
///
/// # Example
///
/// ```
/// use mentorforge_solver::lp::{BranchAndBoundSolver, ConstraintSolver, LinearConstraint, LinearExpr, SolverStatus};
///
/// let mut solver = BranchAndBoundSolver::new();
/// let a = solver.add_bool_var("a");
/// let b = solver.add_bool_var("b");
/// solver.add_constraint(LinearConstraint::less_or_equal("pick one", LinearExpr::sum([a, b]), 1.0));
/// solver.set_objective(LinearExpr::new().with_term(a, 2.0).with_term(b, 3.0));
///
/// assert_eq!(solver.solve().unwrap(), SolverStatus::Optimal);
/// assert_eq!(solver.value(b), Some(1.0));
/// assert_eq!(solver.objective_value(), Some(3.0));
/// ```
pub trait ConstraintSolver {
    /// Short backend name for logs and reports.
    fn name(&self) -> &'static str;

    fn program(&self) -> &LinearProgram;

    fn program_mut(&mut self) -> &mut LinearProgram;

    /// Solves the recorded program.
    ///
    /// An infeasible program is `Ok(SolverStatus::Infeasible)`.
    fn solve(&mut self) -> Result<SolverStatus>;

    /// Status of the most recent solve.
    fn status(&self) -> SolverStatus;

    /// Best solution of the most recent solve, if one was found.
    fn solution(&self) -> Option<&Solution>;

    fn add_bool_var(&mut self, name: &str) -> VarId {
        self.program_mut().add_variable(name)
    }

    fn add_constraint(&mut self, constraint: LinearConstraint) {
        self.program_mut().add_constraint(constraint);
    }

    /// Sets the expression to maximize.
    fn set_objective(&mut self, objective: LinearExpr) {
        self.program_mut().set_objective(objective);
    }

    fn value(&self, var: VarId) -> Option<f64> {
        self.solution().and_then(|solution| solution.value(var))
    }

    fn objective_value(&self) -> Option<f64> {
        self.solution().map(Solution::objective_value)
    }
}

impl<S: ConstraintSolver + ?Sized> ConstraintSolver for Box<S> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn program(&self) -> &LinearProgram {
        (**self).program()
    }

    fn program_mut(&mut self) -> &mut LinearProgram {
        (**self).program_mut()
    }

    fn solve(&mut self) -> Result<SolverStatus> {
        (**self).solve()
    }

    fn status(&self) -> SolverStatus {
        (**self).status()
    }

    fn solution(&self) -> Option<&Solution> {
        (**self).solution()
    }
}
