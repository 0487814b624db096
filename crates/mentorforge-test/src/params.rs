//! Parameter fixtures.

use mentorforge_config::{ParameterFile, Parameters};

/// A parameter document with every weight zeroed.
///
/// Staffing is zero to one mentor per team and alone costs rise `0..5` with
/// comfort level, so tests override only the fields they exercise.
pub fn parameter_file() -> ParameterFile {
    ParameterFile {
        min_num_mentors: 0,
        max_num_mentors: 1,
        comfort_alone_costs: (0..5).collect(),
        ..ParameterFile::default()
    }
}

/// Validated [`parameter_file`].
///
/// # Panics
///
/// Panics if the fixture document is invalid.
pub fn parameters() -> Parameters {
    Parameters::try_from(parameter_file()).expect("fixture parameters are valid")
}
