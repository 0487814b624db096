//! Wires entities, scoring, model and backend into one matching run.

use std::fmt;
use std::time::Instant;

use mentorforge_config::{Parameters, ValidationError};
use mentorforge_core::{EntityName, Mentor, Team};
use mentorforge_scoring::CompatibilityScorer;
use thiserror::Error;
use tracing::{info, warn};

use crate::constraints::{ConstraintBuilder, ConstraintCounts};
use crate::lp::{ConstraintSolver, SolverError, SolverStatus};
use crate::model::{AssignmentKind, AssignmentModel};
use crate::objective::ObjectiveBuilder;

/// Values at or above this read as set.
const SET_THRESHOLD: f64 = 0.5;

/// Errors from building or solving a matching.
#[derive(Debug, Error)]
pub enum MatchError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("solver error: {0}")]
    Solver(#[from] SolverError),

    #[error("inconsistent solution: mentor '{mentor}' {problem}")]
    InconsistentSolution { mentor: String, problem: String },

    #[error("cannot {action}: engine is {state}")]
    InvalidState {
        state: EngineState,
        action: &'static str,
    },
}

/// Lifecycle of a [`MatchEngine`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    /// Model, constraints and objective handed to the backend.
    Built,
    /// The backend has run.
    Solved,
}

impl fmt::Display for EngineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineState::Built => write!(f, "built"),
            EngineState::Solved => write!(f, "solved"),
        }
    }
}

/// Result of a solve.
#[derive(Debug, Clone, PartialEq)]
pub enum MatchOutcome {
    Success(Matching),
    /// No feasible matching was found; carries the backend status.
    Infeasible { status: SolverStatus },
}

impl MatchOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, MatchOutcome::Success(_))
    }

    pub fn matching(&self) -> Option<&Matching> {
        match self {
            MatchOutcome::Success(matching) => Some(matching),
            MatchOutcome::Infeasible { .. } => None,
        }
    }

    pub fn into_matching(self) -> Option<Matching> {
        match self {
            MatchOutcome::Success(matching) => Some(matching),
            MatchOutcome::Infeasible { .. } => None,
        }
    }

    pub fn status(&self) -> SolverStatus {
        match self {
            MatchOutcome::Success(matching) => matching.status(),
            MatchOutcome::Infeasible { status } => *status,
        }
    }
}

/// One mentor's placement as reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement<'a> {
    pub mentor: &'a EntityName,
    pub team: &'a EntityName,
    pub kind: AssignmentKind,
}

/// A mentor→team assignment read back from a solved model.
///
/// Mentors and teams keep input order.
#[derive(Debug, Clone, PartialEq)]
pub struct Matching {
    mentor_names: Vec<EntityName>,
    team_names: Vec<EntityName>,
    team_of: Vec<usize>,
    kind_of: Vec<AssignmentKind>,
    rosters: Vec<Vec<usize>>,
    objective_value: f64,
    status: SolverStatus,
}

impl Matching {
    pub fn mentor_count(&self) -> usize {
        self.mentor_names.len()
    }

    pub fn team_count(&self) -> usize {
        self.team_names.len()
    }

    /// Index of the team mentor `mentor` was placed on.
    pub fn team_index(&self, mentor: usize) -> usize {
        self.team_of[mentor]
    }

    pub fn kind(&self, mentor: usize) -> AssignmentKind {
        self.kind_of[mentor]
    }

    /// Team of the mentor named `mentor`, compared by name key.
    pub fn team_of(&self, mentor: &str) -> Option<&EntityName> {
        let i = self.mentor_names.iter().position(|name| name.matches(mentor))?;
        Some(&self.team_names[self.team_of[i]])
    }

    /// Mentor indices on `team`, in mentor order.
    pub fn roster(&self, team: usize) -> &[usize] {
        &self.rosters[team]
    }

    /// Names of everyone sharing a team with mentor `mentor`.
    pub fn co_mentors(&self, mentor: usize) -> impl Iterator<Item = &EntityName> + '_ {
        self.rosters[self.team_of[mentor]]
            .iter()
            .filter(move |&&other| other != mentor)
            .map(|&other| &self.mentor_names[other])
    }

    /// Every placement in mentor order.
    pub fn placements(&self) -> impl Iterator<Item = Placement<'_>> + '_ {
        (0..self.mentor_names.len()).map(|i| Placement {
            mentor: &self.mentor_names[i],
            team: &self.team_names[self.team_of[i]],
            kind: self.kind_of[i],
        })
    }

    pub fn mentor_names(&self) -> &[EntityName] {
        &self.mentor_names
    }

    pub fn team_names(&self) -> &[EntityName] {
        &self.team_names
    }

    pub fn objective_value(&self) -> f64 {
        self.objective_value
    }

    /// Backend status; a limit status means the matching may not be optimal.
    pub fn status(&self) -> SolverStatus {
        self.status
    }
}

/// Builds the assignment program on construction and solves it once.
///
/// # Example
///
/// ```
/// use mentorforge_config::{ParameterFile, Parameters};
/// use mentorforge_core::{Mentor, RecordLayout, Team, WeeklyAvailability};
/// use mentorforge_solver::{lp::BranchAndBoundSolver, MatchEngine};
///
/// let parameters = Parameters::try_from(ParameterFile::default()).unwrap();
/// let layout = RecordLayout::default();
/// let mentors = vec![Mentor::new("Ash", WeeklyAvailability::always(&layout))];
/// let teams = vec![Team::new("Pallet", WeeklyAvailability::always(&layout))];
///
/// let mut engine = MatchEngine::new(BranchAndBoundSolver::new(), &mentors, &teams, &parameters).unwrap();
/// let outcome = engine.solve().unwrap();
/// let matching = outcome.matching().unwrap();
/// assert_eq!(matching.team_of("ash").unwrap().display(), "Pallet");
/// ```
pub struct MatchEngine<'a, S> {
    solver: S,
    model: AssignmentModel,
    mentors: &'a [Mentor],
    teams: &'a [Team],
    constraint_counts: ConstraintCounts,
    state: EngineState,
}

impl<'a, S: ConstraintSolver> MatchEngine<'a, S> {
    /// Validates references, then builds model, constraints and objective.
    ///
    /// # Errors
    ///
    /// [`MatchError::Validation`] with every reference that names an
    /// unknown mentor or team.
    pub fn new(
        mut solver: S,
        mentors: &'a [Mentor],
        teams: &'a [Team],
        parameters: &'a Parameters,
    ) -> Result<Self, MatchError> {
        parameters.validate_references(mentors, teams)?;

        let model = AssignmentModel::new(&mut solver, mentors, teams);
        let constraint_counts =
            ConstraintBuilder::new(&model, mentors, teams, parameters).build(&mut solver);
        ObjectiveBuilder::new(&model, mentors, teams, CompatibilityScorer::new(parameters))
            .build(&mut solver);

        info!(
            event = "model_built",
            backend = solver.name(),
            mentors = mentors.len(),
            teams = teams.len(),
            variables = model.variable_count(),
            constraints = constraint_counts.total(),
        );

        Ok(Self {
            solver,
            model,
            mentors,
            teams,
            constraint_counts,
            state: EngineState::Built,
        })
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn model(&self) -> &AssignmentModel {
        &self.model
    }

    pub fn solver(&self) -> &S {
        &self.solver
    }

    pub fn constraint_counts(&self) -> ConstraintCounts {
        self.constraint_counts
    }

    /// Runs the backend and reads the matching back.
    ///
    /// # Errors
    ///
    /// [`MatchError::InvalidState`] when called a second time,
    /// [`MatchError::Solver`] when the backend fails, and
    /// [`MatchError::InconsistentSolution`] when the values do not place
    /// every mentor on exactly one team.
    pub fn solve(&mut self) -> Result<MatchOutcome, MatchError> {
        if self.state != EngineState::Built {
            return Err(MatchError::InvalidState {
                state: self.state,
                action: "solve",
            });
        }

        info!(event = "solve_start", backend = self.solver.name());
        let start = Instant::now();
        let status = self.solver.solve()?;
        self.state = EngineState::Solved;
        let elapsed_ms = start.elapsed().as_millis() as u64;

        let Some(objective_value) = self.solver.objective_value() else {
            warn!(event = "solve_end", status = %status, elapsed_ms, "no feasible matching");
            return Ok(MatchOutcome::Infeasible { status });
        };

        let matching = self.extract(status, objective_value)?;
        info!(
            event = "solve_end",
            status = %status,
            objective = objective_value,
            elapsed_ms,
        );
        Ok(MatchOutcome::Success(matching))
    }

    fn extract(&self, status: SolverStatus, objective_value: f64) -> Result<Matching, MatchError> {
        let mut placed: Vec<Option<(usize, AssignmentKind)>> = vec![None; self.mentors.len()];

        for (var, assignment) in self.model.iter() {
            if self.solver.value(var).unwrap_or(0.0) < SET_THRESHOLD {
                continue;
            }
            let slot = &mut placed[assignment.mentor];
            let current = *slot;
            match current {
                None => *slot = Some((assignment.team, assignment.kind)),
                Some((team, _)) if team == assignment.team => {
                    *slot = Some((team, AssignmentKind::Group));
                }
                Some((team, _)) => {
                    return Err(self.inconsistent(
                        assignment.mentor,
                        format!(
                            "is placed on both '{}' and '{}'",
                            self.teams[team].name(),
                            self.teams[assignment.team].name()
                        ),
                    ));
                }
            }
        }

        let mut team_of = Vec::with_capacity(placed.len());
        let mut kind_of = Vec::with_capacity(placed.len());
        let mut rosters = vec![Vec::new(); self.teams.len()];
        for (mentor, slot) in placed.into_iter().enumerate() {
            let Some((team, kind)) = slot else {
                return Err(self.inconsistent(mentor, "is not placed on any team".to_string()));
            };
            team_of.push(team);
            kind_of.push(kind);
            rosters[team].push(mentor);
        }
        // Kind follows the roster, not which variable the backend chose.
        for roster in rosters.iter().filter(|roster| roster.len() > 1) {
            for &mentor in roster {
                kind_of[mentor] = AssignmentKind::Group;
            }
        }

        Ok(Matching {
            mentor_names: self.mentors.iter().map(|m| m.name().clone()).collect(),
            team_names: self.teams.iter().map(|t| t.name().clone()).collect(),
            team_of,
            kind_of,
            rosters,
            objective_value,
            status,
        })
    }

    fn inconsistent(&self, mentor: usize, problem: String) -> MatchError {
        MatchError::InconsistentSolution {
            mentor: self.mentors[mentor].name().display().to_string(),
            problem,
        }
    }
}

#[cfg(test)]
mod tests;
