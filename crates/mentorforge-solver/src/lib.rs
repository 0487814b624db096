//! Assignment model and solver engine for MentorForge.
//!
//! This crate turns mentors, teams and parameters into a boolean linear
//! program and reads a matching back:
//! - [`AssignmentModel`]: one Solo and one Group variable per mentor/team pair
//! - [`ConstraintBuilder`]: staffing, pairing and pinning rules
//! - [`ObjectiveBuilder`]: compatibility-weighted objective
//! - [`MatchEngine`]: build, solve, extract
//! - [`lp`]: the backend trait and its implementations

pub mod constraints;
pub mod engine;
pub mod lp;
pub mod model;
pub mod objective;

pub use constraints::{ConstraintBuilder, ConstraintCounts};
pub use engine::{EngineState, MatchEngine, MatchError, MatchOutcome, Matching, Placement};
pub use lp::{BranchAndBoundSolver, ConstraintSolver, SolverError, SolverStatus};
#[cfg(feature = "microlp")]
pub use lp::MicroLpSolver;
pub use model::{Assignment, AssignmentKind, AssignmentModel};
pub use objective::ObjectiveBuilder;
