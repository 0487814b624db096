//! CLI error types.

use mentorforge::io::IoError;
use mentorforge::{ConfigError, MatchError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("configuration: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Io(#[from] IoError),

    #[error(transparent)]
    Match(#[from] MatchError),
}
