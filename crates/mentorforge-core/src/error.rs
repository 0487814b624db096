//! Error types for record parsing

use thiserror::Error;

/// Error raised while constructing a mentor or team from an input record.
///
/// Column numbers are 1-based positions within the record, matching what a
/// spreadsheet shows.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    /// A cell holds a value outside the vocabulary of its field.
    #[error("invalid {field} mark {value:?} for {entity} in column {column}")]
    InvalidMark {
        entity: String,
        field: &'static str,
        column: usize,
        value: String,
    },

    /// A cell that must hold an integer does not.
    #[error("invalid {field} number {value:?} for {entity} in column {column}")]
    InvalidNumber {
        entity: String,
        field: &'static str,
        column: usize,
        value: String,
    },

    /// A field does not have the number of entries the layout requires.
    #[error("{entity} has {found} {field} entries, expected {expected}")]
    WrongLength {
        entity: String,
        field: &'static str,
        expected: usize,
        found: usize,
    },

    /// The record ended before all columns were read.
    #[error("record for {entity} has {found} columns, expected {expected}")]
    TooShort {
        entity: String,
        expected: usize,
        found: usize,
    },

    /// The name cell is empty.
    #[error("record has an empty name")]
    EmptyName,

    /// Two records share a name once case and whitespace are ignored.
    #[error("{entity} in row {row} has the same name as row {first_row}")]
    DuplicateName {
        entity: String,
        first_row: u64,
        row: u64,
    },
}

/// Result type alias for record parsing
pub type Result<T> = std::result::Result<T, RecordError>;
