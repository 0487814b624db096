//! MILP backend driven through `good_lp` and the pure-Rust `microlp` solver.

use good_lp::solvers::microlp::microlp;
use good_lp::{constraint, variable, Expression, ProblemVariables, ResolutionError, Solution as _, SolverModel, Variable};
use tracing::debug;

use super::error::{Result, SolverError};
use super::expr::{LinearExpr, Sense};
use super::program::{LinearProgram, Solution};
use super::solver::ConstraintSolver;
use super::status::SolverStatus;

/// `microlp` backend.
///
/// `microlp` runs to completion; time and node limits do not apply.
#[derive(Debug, Clone, Default)]
pub struct MicroLpSolver {
    program: LinearProgram,
    status: SolverStatus,
    solution: Option<Solution>,
}

impl MicroLpSolver {
    pub fn new() -> Self {
        Self::default()
    }
}

fn expression(expr: &LinearExpr, vars: &[Variable]) -> Expression {
    expr.terms()
        .iter()
        .map(|&(var, coefficient)| coefficient * vars[var.index()])
        .sum::<Expression>()
        + expr.constant()
}

impl ConstraintSolver for MicroLpSolver {
    fn name(&self) -> &'static str {
        "microlp"
    }

    fn program(&self) -> &LinearProgram {
        &self.program
    }

    fn program_mut(&mut self) -> &mut LinearProgram {
        &mut self.program
    }

    fn solve(&mut self) -> Result<SolverStatus> {
        self.program.check()?;
        self.solution = None;

        let mut problem_vars = ProblemVariables::new();
        let vars: Vec<Variable> = (0..self.program.variable_count())
            .map(|_| problem_vars.add(variable().binary()))
            .collect();

        let objective = expression(self.program.objective(), &vars);
        let mut model = problem_vars.maximise(objective).using(microlp);
        for c in self.program.constraints() {
            let lhs = expression(c.expr(), &vars);
            let lp_constraint = match c.sense() {
                Sense::LessOrEqual => constraint::leq(lhs, c.rhs()),
                Sense::GreaterOrEqual => constraint::geq(lhs, c.rhs()),
                Sense::Equal => constraint::eq(lhs, c.rhs()),
            };
            model = model.with(lp_constraint);
        }

        self.status = match model.solve() {
            Ok(lp_solution) => {
                let values: Vec<f64> = vars
                    .iter()
                    .map(|&var| lp_solution.value(var).round())
                    .collect();
                let objective_value = self
                    .program
                    .objective()
                    .evaluate(|var| values[var.index()]);
                self.solution = Some(Solution::new(values, objective_value));
                SolverStatus::Optimal
            }
            Err(ResolutionError::Infeasible) => SolverStatus::Infeasible,
            Err(ResolutionError::Unbounded) => SolverStatus::Unbounded,
            Err(other) => {
                return Err(SolverError::Backend {
                    backend: "microlp",
                    message: other.to_string(),
                })
            }
        };

        debug!(
            event = "microlp_end",
            status = %self.status,
            variables = vars.len(),
            constraints = self.program.constraints().len(),
        );
        Ok(self.status)
    }

    fn status(&self) -> SolverStatus {
        self.status
    }

    fn solution(&self) -> Option<&Solution> {
        self.solution.as_ref()
    }
}
