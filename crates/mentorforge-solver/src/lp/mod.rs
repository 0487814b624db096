//! Boolean linear programs and the backends that solve them.
//!
//! Model code talks only to [`ConstraintSolver`]. Two backends implement it:
//!
//! - [`MicroLpSolver`]: the `microlp` MILP solver through `good_lp`
//!   (feature `microlp`, on by default); the default backend
//! - [`BranchAndBoundSolver`]: native exact depth-first search for small
//!   instances, honoring time and node limits

mod branch_and_bound;
mod error;
mod expr;
#[cfg(feature = "microlp")]
mod microlp;
mod program;
mod solver;
mod status;

pub use branch_and_bound::{BranchAndBoundConfig, BranchAndBoundSolver, DEFAULT_TIME_LIMIT};
pub use error::{Result, SolverError};
pub use expr::{LinearConstraint, LinearExpr, Sense, VarId};
#[cfg(feature = "microlp")]
pub use microlp::MicroLpSolver;
pub use program::{LinearProgram, Solution};
pub use solver::ConstraintSolver;
pub use status::SolverStatus;
