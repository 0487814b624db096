//! Compatibility scoring for MentorForge.
//!
//! Scores are plain integers built from:
//! - availability overlap after travel time, best over transit modes
//! - a flat team-type match bonus
//! - required/requested team bonuses
//!
//! [`CompatibilityScorer`] also derives the solo and group objective weights
//! and the bonus for two mentors sharing a team.
//!
//! # Example
//!
//! ```
//! use mentorforge_config::{ParameterFile, Parameters};
//! use mentorforge_core::{Mentor, RecordLayout, Team, TransitConvenience, WeeklyAvailability};
//! use mentorforge_scoring::CompatibilityScorer;
//!
//! let parameters = Parameters::try_from(ParameterFile {
//!     team_overlap_value: 1.0,
//!     ..ParameterFile::default()
//! })
//! .unwrap();
//! let scorer = CompatibilityScorer::new(&parameters);
//!
//! let layout = RecordLayout::default();
//! let mentor = Mentor::new("Ash", WeeklyAvailability::always(&layout))
//!     .with_transit_conveniences(vec![TransitConvenience::Convenient]);
//! let team = Team::new("Pallet", WeeklyAvailability::always(&layout))
//!     .with_transit_times(vec![0]);
//!
//! // 7 days of 24 half-hour slots.
//! assert_eq!(scorer.compatibility(&mentor, &team), 7 * 24 * 30);
//! ```

pub mod matrix;
pub mod overlap;
pub mod scorer;

pub use matrix::CompatibilityMatrix;
pub use overlap::{usable_overlap_minutes, OverlapRules};
pub use scorer::{CompatibilityBreakdown, CompatibilityScorer};
