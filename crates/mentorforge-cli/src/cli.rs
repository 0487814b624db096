//! Command-line arguments.

use std::path::PathBuf;

use clap::{ArgAction, Parser};
use mentorforge::SolverBackend;
use tracing::level_filters::LevelFilter;

use crate::run::RunArgs;

#[derive(Debug, Parser)]
#[command(
    name = "mentorforge",
    version,
    about = "Assign mentors to teams by integer programming",
    long_about = "Reads mentor and team records and a parameter file, solves the \
                  assignment program and writes one row per mentor."
)]
pub struct Cli {
    /// Mentor records (CSV).
    #[arg(long = "mentor-data", value_name = "PATH")]
    pub mentor_data: PathBuf,

    /// Team records (CSV).
    #[arg(long = "team-data", value_name = "PATH")]
    pub team_data: PathBuf,

    /// Matching parameters (`.csv` key/value table, otherwise YAML).
    #[arg(long = "parameters", value_name = "PATH")]
    pub parameters: PathBuf,

    /// Where to write the matching report.
    #[arg(long = "matching-output", value_name = "PATH", default_value = "matching.csv")]
    pub matching_output: PathBuf,

    /// Also write the mentor by team compatibility matrix.
    #[arg(long = "compatibility-output", value_name = "PATH")]
    pub compatibility_output: Option<PathBuf>,

    /// Solver configuration (TOML or YAML). Defaults apply when omitted.
    #[arg(long = "solver-config", value_name = "PATH")]
    pub solver_config: Option<PathBuf>,

    /// Backend, overriding the solver configuration.
    #[arg(long = "backend", value_name = "NAME")]
    pub backend: Option<SolverBackend>,

    /// Time limit in seconds, overriding the solver configuration.
    #[arg(long = "time-limit", value_name = "SECONDS")]
    pub time_limit: Option<u64>,

    /// More output (-v debug, -vv trace).
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, conflicts_with = "quiet")]
    pub verbose: u8,

    /// Only warnings and errors.
    #[arg(short = 'q', long = "quiet")]
    pub quiet: bool,
}

impl Cli {
    pub fn level_filter(&self) -> LevelFilter {
        if self.quiet {
            return LevelFilter::WARN;
        }
        match self.verbose {
            0 => LevelFilter::INFO,
            1 => LevelFilter::DEBUG,
            _ => LevelFilter::TRACE,
        }
    }

    pub fn run_args(&self) -> RunArgs {
        RunArgs {
            mentor_data: self.mentor_data.clone(),
            team_data: self.team_data.clone(),
            parameters: self.parameters.clone(),
            matching_output: self.matching_output.clone(),
            compatibility_output: self.compatibility_output.clone(),
            solver_config: self.solver_config.clone(),
            backend: self.backend,
            time_limit: self.time_limit,
        }
    }
}
