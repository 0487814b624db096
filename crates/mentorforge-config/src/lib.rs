//! Configuration for MentorForge.
//!
//! Two documents drive a run:
//!
//! - [`Parameters`]: scoring weights, staffing bounds, required mentor groups
//!   and required team assignments, loaded from YAML or a flat CSV table.
//! - [`SolverConfig`]: which backend to use and when to stop, loaded from
//!   TOML or YAML.
//!
//! # Examples
//!
//! ```
//! use mentorforge_config::{ParameterFile, Parameters};
//! use mentorforge_core::NameKey;
//!
//! let mut file = ParameterFile::default();
//! file.required_mentor_groups = vec![vec!["Seadra".into(), "Lapras".into()]];
//! let parameters = Parameters::try_from(file).unwrap();
//!
//! assert!(parameters.must_pair(&NameKey::new("seadra"), &NameKey::new("LAPRAS")));
//! assert_eq!(parameters.required_pair_count(), 1);
//! ```
//!
//! Use default solver config when file is missing:
//!
//! ```
//! use mentorforge_config::SolverConfig;
//!
//! let config = SolverConfig::load("solver.toml").unwrap_or_default();
//! // Proceeds with defaults if file doesn't exist
//! ```

pub mod error;
pub mod groups;
pub mod parameters;
pub mod solver;

pub use error::{ConfigError, ValidationError};
pub use groups::RequiredGroups;
pub use parameters::{ParameterFile, Parameters};
pub use solver::{SolverBackend, SolverConfig, TerminationConfig};
