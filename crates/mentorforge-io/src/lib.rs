//! CSV input and report output for MentorForge.
//!
//! - [`read_mentors`] / [`read_teams`]: record files in a [`RecordLayout`](mentorforge_core::RecordLayout)
//! - [`save_matching`]: `Mentor Name,Team Name,Other Mentor(s)` report
//! - [`save_matrix`]: mentor by team compatibility scores

pub mod error;
pub mod reader;
pub mod writer;

pub use error::{IoError, Result};
pub use reader::{read_mentors, read_mentors_from, read_teams, read_teams_from};
pub use writer::{save_matching, save_matrix, write_matching, write_matrix};
