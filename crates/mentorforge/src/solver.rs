//! Matching entry point that picks the backend from configuration.

use mentorforge_config::{Parameters, SolverBackend, SolverConfig};
use mentorforge_core::{Mentor, Team};
use mentorforge_solver::{
    BranchAndBoundSolver, ConstraintSolver, MatchEngine, MatchError, MatchOutcome,
};
use tracing::debug;

/// Creates the backend named by `config`, with its termination limits.
///
/// # Errors
///
/// [`MatchError::Solver`] when `microlp` is requested but this build has no
/// `microlp` feature.
pub fn backend_for(config: &SolverConfig) -> Result<Box<dyn ConstraintSolver>, MatchError> {
    match config.backend {
        SolverBackend::BranchAndBound => {
            let mut solver = BranchAndBoundSolver::new();
            if let Some(limit) = config.time_limit() {
                solver = solver.with_time_limit(limit);
            }
            if let Some(nodes) = config.node_count_limit() {
                solver = solver.with_node_limit(nodes);
            }
            Ok(Box::new(solver))
        }
        SolverBackend::Microlp => microlp_backend(config),
    }
}

#[cfg(feature = "microlp")]
fn microlp_backend(config: &SolverConfig) -> Result<Box<dyn ConstraintSolver>, MatchError> {
    if config.termination.is_some() {
        debug!(event = "termination_ignored", backend = "microlp");
    }
    Ok(Box::new(mentorforge_solver::MicroLpSolver::new()))
}

#[cfg(not(feature = "microlp"))]
fn microlp_backend(_config: &SolverConfig) -> Result<Box<dyn ConstraintSolver>, MatchError> {
    Err(MatchError::Solver(mentorforge_solver::SolverError::Backend {
        backend: "microlp",
        message: "built without the `microlp` feature".to_string(),
    }))
}

/// Builds and solves one matching with the configured backend.
///
/// `parameters` should already carry requirements folded from the mentor
/// records (see [`Parameters::with_mentor_requirements`]).
///
/// # Errors
///
/// Any [`MatchError`]; an infeasible instance is
/// [`MatchOutcome::Infeasible`], not an error.
pub fn run_match(
    mentors: &[Mentor],
    teams: &[Team],
    parameters: &Parameters,
    config: &SolverConfig,
) -> Result<MatchOutcome, MatchError> {
    let solver = backend_for(config)?;
    debug!(event = "backend_selected", backend = solver.name());
    MatchEngine::new(solver, mentors, teams, parameters)?.solve()
}

#[cfg(test)]
mod tests {
    use super::*;
    use mentorforge_config::ParameterFile;
    use mentorforge_solver::SolverStatus;
    use mentorforge_test::{mentor, parameter_file, team};

    fn one_per_team() -> Parameters {
        Parameters::try_from(ParameterFile {
            min_num_mentors: 1,
            max_num_mentors: 1,
            ..parameter_file()
        })
        .unwrap()
    }

    #[cfg(feature = "microlp")]
    #[test]
    fn test_backend_for_default_config() {
        let solver = backend_for(&SolverConfig::default()).unwrap();
        assert_eq!(solver.name(), "microlp");
    }

    #[test]
    fn test_backend_for_branch_and_bound() {
        let config = SolverConfig::new().with_backend(SolverBackend::BranchAndBound);
        assert_eq!(backend_for(&config).unwrap().name(), "branch_and_bound");
    }

    #[cfg(feature = "microlp")]
    #[test]
    fn test_default_backend_at_full_scale() {
        use mentorforge_core::{RecordLayout, TransitConvenience, WeeklyAvailability};
        use mentorforge_test::available_during;

        // Deterministic pseudo-random weekly windows.
        let mut seed: u64 = 0x9e37_79b9_7f4a_7c15;
        let mut next = |range: usize| {
            seed ^= seed << 13;
            seed ^= seed >> 7;
            seed ^= seed << 17;
            (seed % range as u64) as usize
        };
        let mut windows = |count: usize| -> WeeklyAvailability {
            let spans: Vec<_> = (0..count)
                .map(|_| {
                    let start = 8 + next(12);
                    (next(7), start, start + 2 + next(4))
                })
                .collect();
            available_during(&spans)
        };

        let layout = RecordLayout::default();
        let mentors: Vec<Mentor> = (0..36)
            .map(|i| {
                Mentor::new(&format!("Mentor {i}"), windows(6)).with_transit_conveniences(vec![
                    TransitConvenience::Convenient;
                    layout.transit_mode_count
                ])
            })
            .collect();
        let teams: Vec<Team> = (0..16)
            .map(|i| {
                Team::new(&format!("Team {i}"), windows(8))
                    .with_transit_times(vec![30; layout.transit_mode_count])
            })
            .collect();
        let parameters = Parameters::try_from(ParameterFile {
            min_num_mentors: 2,
            max_num_mentors: 3,
            team_overlap_value: 1.0,
            no_overlap_cost: 1_000,
            ..parameter_file()
        })
        .unwrap();

        let outcome = run_match(&mentors, &teams, &parameters, &SolverConfig::default()).unwrap();
        let matching = outcome.matching().unwrap();
        assert_eq!(matching.status(), SolverStatus::Optimal);
        for t in 0..teams.len() {
            assert!((2..=3).contains(&matching.roster(t).len()));
        }
        let placed: usize = (0..teams.len()).map(|t| matching.roster(t).len()).sum();
        assert_eq!(placed, mentors.len());
    }

    #[test]
    fn test_run_match_places_every_mentor() {
        let mentors = vec![mentor("Ash"), mentor("Misty")];
        let teams = vec![team("Pallet"), team("Cerulean")];
        let outcome = run_match(&mentors, &teams, &one_per_team(), &SolverConfig::default()).unwrap();

        let matching = outcome.matching().unwrap();
        assert_eq!(matching.status(), SolverStatus::Optimal);
        assert_eq!(matching.roster(0).len(), 1);
        assert_eq!(matching.roster(1).len(), 1);
    }

    #[test]
    fn test_run_match_infeasible() {
        let mentors = vec![mentor("Ash"), mentor("Misty"), mentor("Brock")];
        let teams = vec![team("Pallet"), team("Cerulean")];
        let outcome = run_match(&mentors, &teams, &one_per_team(), &SolverConfig::default()).unwrap();

        assert!(!outcome.is_success());
        assert_eq!(outcome.status(), SolverStatus::Infeasible);
    }

    #[test]
    fn test_run_match_rejects_unknown_reference() {
        let mut file = ParameterFile {
            min_num_mentors: 1,
            max_num_mentors: 1,
            ..parameter_file()
        };
        file.required_team_assignments
            .insert("Gary".to_string(), "Pallet".to_string());
        let parameters = Parameters::try_from(file).unwrap();

        let err = run_match(&[mentor("Ash")], &[team("Pallet")], &parameters, &SolverConfig::default())
            .unwrap_err();
        assert!(matches!(err, MatchError::Validation(_)));
    }

    #[cfg(feature = "microlp")]
    #[test]
    fn test_backends_agree() {
        let mentors = vec![mentor("Ash"), mentor("Misty")];
        let teams = vec![team("Pallet"), team("Cerulean")];
        let parameters = one_per_team();

        let config = SolverConfig::new().with_backend(SolverBackend::BranchAndBound);
        let native = run_match(&mentors, &teams, &parameters, &config).unwrap();
        let milp = run_match(&mentors, &teams, &parameters, &SolverConfig::default()).unwrap();

        let native = native.matching().unwrap().objective_value();
        let milp = milp.matching().unwrap().objective_value();
        assert!((native - milp).abs() < 1e-6);
    }
}
