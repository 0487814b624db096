//! Backend-independent storage for a boolean linear program.

use super::error::{Result, SolverError};
use super::expr::{LinearConstraint, LinearExpr, VarId};

/// Boolean variables, linear constraints and a linear objective to maximize.
///
/// Every backend records the model here and translates it when solving.
#[derive(Debug, Clone, Default)]
pub struct LinearProgram {
    variable_names: Vec<String>,
    constraints: Vec<LinearConstraint>,
    objective: LinearExpr,
}

impl LinearProgram {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_variable(&mut self, name: &str) -> VarId {
        let var = VarId::new(self.variable_names.len());
        self.variable_names.push(name.to_string());
        var
    }

    pub fn add_constraint(&mut self, constraint: LinearConstraint) {
        self.constraints.push(constraint);
    }

    pub fn set_objective(&mut self, objective: LinearExpr) {
        self.objective = objective.normalized();
    }

    pub fn variable_count(&self) -> usize {
        self.variable_names.len()
    }

    pub fn variable_name(&self, var: VarId) -> Option<&str> {
        self.variable_names.get(var.index()).map(String::as_str)
    }

    pub fn constraints(&self) -> &[LinearConstraint] {
        &self.constraints
    }

    pub fn objective(&self) -> &LinearExpr {
        &self.objective
    }

    /// Checks the program can be handed to a backend.
    ///
    /// # Errors
    ///
    /// [`SolverError::EmptyModel`] without variables,
    /// [`SolverError::UnknownVariable`] for a dangling handle.
    pub fn check(&self) -> Result<()> {
        if self.variable_names.is_empty() {
            return Err(SolverError::EmptyModel);
        }
        let count = self.variable_count();
        for constraint in &self.constraints {
            if let Some(&(var, _)) = constraint
                .expr()
                .terms()
                .iter()
                .find(|(var, _)| var.index() >= count)
            {
                return Err(SolverError::UnknownVariable {
                    constraint: constraint.name().to_string(),
                    index: var.index(),
                });
            }
        }
        if let Some(&(var, _)) = self
            .objective
            .terms()
            .iter()
            .find(|(var, _)| var.index() >= count)
        {
            return Err(SolverError::UnknownVariable {
                constraint: "objective".to_string(),
                index: var.index(),
            });
        }
        Ok(())
    }
}

/// Variable values and objective value of a solved program.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    values: Vec<f64>,
    objective_value: f64,
}

impl Solution {
    pub fn new(values: Vec<f64>, objective_value: f64) -> Self {
        Self {
            values,
            objective_value,
        }
    }

    pub fn value(&self, var: VarId) -> Option<f64> {
        self.values.get(var.index()).copied()
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn objective_value(&self) -> f64 {
        self.objective_value
    }
}
