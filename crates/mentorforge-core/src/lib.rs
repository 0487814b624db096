//! MentorForge Core - Entity types for mentor-to-team matching
//!
//! This crate provides the immutable value objects every other crate reads:
//! - [`Mentor`] and [`Team`] records and their parsers
//! - [`RecordLayout`] describing the column layout and ordinal vocabularies
//! - [`NameKey`] canonical identity for case/whitespace-insensitive names
//! - Ordinal levels for comfort, skills and transit convenience

pub mod availability;
pub mod error;
pub mod layout;
pub mod mentor;
pub mod name;
pub mod ordinal;
mod record;
pub mod team;

pub use availability::WeeklyAvailability;
pub use error::{RecordError, Result};
pub use layout::{RecordLayout, Vocabulary};
pub use mentor::Mentor;
pub use name::{EntityName, NameKey};
pub use ordinal::{ComfortLevel, SkillConfidence, SkillRequest, TransitConvenience};
pub use team::Team;
