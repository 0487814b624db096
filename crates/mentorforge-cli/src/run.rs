//! One matching run: load, fold, score, solve, write.

use std::path::PathBuf;

use mentorforge::io::{read_mentors, read_teams, save_matching, save_matrix};
use mentorforge::{
    run_match, CompatibilityMatrix, CompatibilityScorer, MatchOutcome, Parameters, SolverBackend,
    SolverConfig, SolverStatus,
};
use tracing::info;

use crate::error::CliError;

/// Inputs and outputs of a run.
#[derive(Debug, Clone)]
pub struct RunArgs {
    pub mentor_data: PathBuf,
    pub team_data: PathBuf,
    pub parameters: PathBuf,
    pub matching_output: PathBuf,
    pub compatibility_output: Option<PathBuf>,
    pub solver_config: Option<PathBuf>,
    pub backend: Option<SolverBackend>,
    pub time_limit: Option<u64>,
}

/// What a run produced.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub matched: bool,
    pub status: SolverStatus,
    pub mentors: usize,
    pub teams: usize,
    pub matching_output: PathBuf,
    pub compatibility_output: Option<PathBuf>,
}

/// Runs one matching. The report is written only when a matching exists.
pub fn run(args: &RunArgs) -> Result<RunSummary, CliError> {
    let parameters = Parameters::load(&args.parameters)?;
    let mentors = read_mentors(&args.mentor_data, parameters.layout())?;
    let teams = read_teams(&args.team_data, parameters.layout())?;
    let parameters = parameters.with_mentor_requirements(&mentors)?;

    if let Some(path) = &args.compatibility_output {
        let scorer = CompatibilityScorer::new(&parameters);
        save_matrix(path, &CompatibilityMatrix::build(&scorer, &mentors, &teams))?;
    }

    let config = solver_config(args)?;
    let outcome = run_match(&mentors, &teams, &parameters, &config)?;
    let status = outcome.status();
    let matched = match &outcome {
        MatchOutcome::Success(matching) => {
            save_matching(&args.matching_output, matching)?;
            true
        }
        MatchOutcome::Infeasible { .. } => false,
    };
    info!(event = "run_end", status = %status, matched);

    Ok(RunSummary {
        matched,
        status,
        mentors: mentors.len(),
        teams: teams.len(),
        matching_output: args.matching_output.clone(),
        compatibility_output: args.compatibility_output.clone(),
    })
}

fn solver_config(args: &RunArgs) -> Result<SolverConfig, CliError> {
    let mut config = match &args.solver_config {
        Some(path) => SolverConfig::load(path)?,
        None => SolverConfig::default(),
    };
    if let Some(backend) = args.backend {
        config = config.with_backend(backend);
    }
    if let Some(seconds) = args.time_limit {
        config = config.with_termination_seconds(seconds);
    }
    Ok(config)
}
