//! Backend errors.

use thiserror::Error;

/// A backend could not run or produced no usable answer.
///
/// Infeasibility is reported through [`SolverStatus`](super::SolverStatus),
/// not here.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SolverError {
    #[error("model has no variables")]
    EmptyModel,

    #[error("constraint '{constraint}' references unknown variable x{index}")]
    UnknownVariable { constraint: String, index: usize },

    #[error("{backend} backend failed: {message}")]
    Backend {
        backend: &'static str,
        message: String,
    },
}

pub type Result<T> = std::result::Result<T, SolverError>;
