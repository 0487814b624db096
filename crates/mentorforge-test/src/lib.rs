//! Shared test fixtures for MentorForge crates.
//!
//! This crate provides entity and parameter builders for testing.
//! It does NOT depend on the scoring or solver crates so they can use it as
//! a dev-dependency.
//!
//! - [`entity`] - Mentor and team fixtures with uniform defaults
//! - [`params`] - Parameter documents with zeroed weights
//! - [`records`] - Raw CSV rows in the default record layout
//!
//! # Usage
//!
//! Add as a dev-dependency in your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! mentorforge-test = { workspace = true }
//! ```
//!
//! Then import the fixtures you need:
//!
//! ```ignore
//! use mentorforge_test::entity::{mentor, team};
//! use mentorforge_test::params::parameters;
//! ```

pub mod entity;
pub mod params;
pub mod records;

pub use entity::{available_during, mentor, team};
pub use params::{parameter_file, parameters};
pub use records::{csv_text, mentor_requests_column, mentor_row, team_row};
