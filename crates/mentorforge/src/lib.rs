//! MentorForge - Mentor-to-team matching by integer programming
//!
//! Read mentors and teams, load parameters, call [`run_match`].
//!
//! # Example
//!
//! ```rust
//! use mentorforge::prelude::*;
//!
//! let parameters = Parameters::try_from(ParameterFile::default()).unwrap();
//! let layout = RecordLayout::default();
//! let mentors = vec![Mentor::new("Ash", WeeklyAvailability::always(&layout))];
//! let teams = vec![Team::new("Pallet", WeeklyAvailability::always(&layout))];
//!
//! let outcome = run_match(&mentors, &teams, &parameters, &SolverConfig::default()).unwrap();
//! assert_eq!(outcome.matching().unwrap().team_of("Ash").unwrap().display(), "Pallet");
//! ```

// Entities
pub use mentorforge_core::{
    ComfortLevel, EntityName, Mentor, NameKey, RecordError, RecordLayout, SkillConfidence,
    SkillRequest, Team, TransitConvenience, WeeklyAvailability,
};

// Configuration
pub use mentorforge_config::{
    ConfigError, ParameterFile, Parameters, SolverBackend, SolverConfig, ValidationError,
};

// Scoring
pub use mentorforge_scoring::{CompatibilityMatrix, CompatibilityScorer};

// Model and engine
pub use mentorforge_solver::{
    lp, BranchAndBoundSolver, ConstraintSolver, MatchEngine, MatchError, MatchOutcome, Matching,
    SolverStatus,
};
#[cfg(feature = "microlp")]
pub use mentorforge_solver::MicroLpSolver;

// Files
pub use mentorforge_io as io;

#[cfg(feature = "console")]
pub use mentorforge_console as console;

mod solver;
pub use solver::{backend_for, run_match};

pub mod prelude {
    pub use super::{
        CompatibilityMatrix, CompatibilityScorer, Matching, MatchError, MatchOutcome, Mentor,
        ParameterFile, Parameters, RecordLayout, SolverBackend, SolverConfig, SolverStatus, Team,
        WeeklyAvailability,
    };
    pub use super::{backend_for, run_match};
}
