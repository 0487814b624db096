//! Tests for the matching engine.

use super::*;
use crate::lp::BranchAndBoundSolver;
use mentorforge_config::ParameterFile;
use mentorforge_core::{ComfortLevel, TransitConvenience};
use mentorforge_test::{available_during, mentor, parameter_file, team};

fn params(file: ParameterFile) -> Parameters {
    Parameters::try_from(file).unwrap()
}

fn staffed(min: usize, max: usize) -> ParameterFile {
    ParameterFile {
        min_num_mentors: min,
        max_num_mentors: max,
        ..parameter_file()
    }
}

fn run<S: ConstraintSolver>(
    solver: S,
    mentors: &[Mentor],
    teams: &[Team],
    parameters: &Parameters,
) -> MatchOutcome {
    MatchEngine::new(solver, mentors, teams, parameters)
        .unwrap()
        .solve()
        .unwrap()
}

fn assert_well_formed(matching: &Matching, min: usize, max: usize) {
    let mut seen = vec![0; matching.mentor_count()];
    for team in 0..matching.team_count() {
        let roster = matching.roster(team);
        assert!(
            (min..=max).contains(&roster.len()),
            "team {team} has {} mentors",
            roster.len()
        );
        for &mentor in roster {
            seen[mentor] += 1;
            assert_eq!(matching.team_index(mentor), team);
        }
    }
    assert!(seen.iter().all(|&count| count == 1));
}

#[test]
fn test_two_by_two_perfect_matching() {
    let parameters = params(ParameterFile {
        team_requested_value: 100,
        team_type_match_value: 7,
        ..staffed(1, 1)
    });
    let mentors = vec![
        mentor("Ash").with_teams_requested(["Cerulean"]),
        mentor("Misty").with_teams_requested(["Pallet"]),
    ];
    let teams = vec![team("Pallet"), team("Cerulean")];

    let outcome = run(BranchAndBoundSolver::new(), &mentors, &teams, &parameters);
    let matching = outcome.matching().unwrap();
    assert_eq!(matching.status(), SolverStatus::Optimal);
    assert_well_formed(matching, 1, 1);
    assert_eq!(matching.team_of("Ash").unwrap().display(), "Cerulean");
    assert_eq!(matching.team_of("Misty").unwrap().display(), "Pallet");
    assert!(matching.placements().all(|p| p.kind == AssignmentKind::Solo));

    let scorer = CompatibilityScorer::new(&parameters);
    let swapped = scorer.solo_weight(&mentors[0], &teams[0]) + scorer.solo_weight(&mentors[1], &teams[1]);
    let chosen = scorer.solo_weight(&mentors[0], &teams[1]) + scorer.solo_weight(&mentors[1], &teams[0]);
    assert!(chosen > swapped);
    assert_eq!(matching.objective_value(), chosen as f64);
}

#[test]
fn test_required_pair_without_room_is_infeasible() {
    let mut file = staffed(1, 1);
    file.required_mentor_groups = vec![vec!["Ash".to_string(), "Misty".to_string()]];
    let parameters = params(file);
    let mentors = vec![mentor("Ash"), mentor("Misty")];
    let teams = vec![team("Pallet"), team("Cerulean")];

    let outcome = run(BranchAndBoundSolver::new(), &mentors, &teams, &parameters);
    assert_eq!(
        outcome,
        MatchOutcome::Infeasible {
            status: SolverStatus::Infeasible
        }
    );
    assert!(outcome.matching().is_none());
}

#[test]
fn test_required_group_shares_a_team() {
    let mut file = ParameterFile {
        team_requested_value: 500,
        ..staffed(1, 3)
    };
    file.required_mentor_groups = vec![vec!["Ash".to_string(), "Misty".to_string()]];
    let parameters = params(file);
    let mentors = vec![
        mentor("Ash").with_teams_requested(["Pallet"]),
        mentor("Misty").with_teams_requested(["Cerulean"]),
        mentor("Brock"),
        mentor("Gary"),
    ];
    let teams = vec![team("Pallet"), team("Cerulean")];

    let outcome = run(BranchAndBoundSolver::new(), &mentors, &teams, &parameters);
    let matching = outcome.matching().unwrap();
    assert_well_formed(matching, 1, 3);
    assert_eq!(matching.team_index(0), matching.team_index(1));
    assert_eq!(matching.kind(0), AssignmentKind::Group);
    assert_eq!(matching.kind(1), AssignmentKind::Group);
}

#[test]
fn test_pin_honored_against_preference() {
    let mut file = ParameterFile {
        team_requested_value: 5_000,
        team_required_value: 10,
        ..staffed(1, 2)
    };
    file.required_team_assignments
        .insert("Misty".to_string(), "Cerulean".to_string());
    let parameters = params(file);
    let mentors = vec![
        mentor("Ash"),
        mentor("Misty").with_teams_requested(["Pallet"]),
        mentor("Brock"),
    ];
    let teams = vec![team("Pallet"), team("Cerulean")];

    let outcome = run(BranchAndBoundSolver::new(), &mentors, &teams, &parameters);
    let matching = outcome.matching().unwrap();
    assert_well_formed(matching, 1, 2);
    assert_eq!(matching.team_of("misty").unwrap().display(), "Cerulean");
}

#[test]
fn test_conflicting_pins_are_infeasible() {
    let mut file = staffed(1, 1);
    file.required_team_assignments
        .insert("Ash".to_string(), "Pallet".to_string());
    file.required_team_assignments
        .insert("Misty".to_string(), "Pallet".to_string());
    let parameters = params(file);
    let mentors = vec![mentor("Ash"), mentor("Misty")];
    let teams = vec![team("Pallet"), team("Cerulean")];

    let outcome = run(BranchAndBoundSolver::new(), &mentors, &teams, &parameters);
    assert_eq!(outcome.status(), SolverStatus::Infeasible);
    assert!(!outcome.is_success());
}

#[test]
fn test_objective_subtracts_requirement_offset() {
    let mut file = ParameterFile {
        team_required_value: 1_000,
        ..staffed(1, 1)
    };
    file.required_team_assignments
        .insert("Ash".to_string(), "Pallet".to_string());
    let parameters = params(file);
    let mentors = vec![mentor("Ash")];
    let teams = vec![team("Pallet")];

    let outcome = run(BranchAndBoundSolver::new(), &mentors, &teams, &parameters);
    // The pin bonus in the weight cancels against the offset.
    let scorer = CompatibilityScorer::new(&parameters);
    let expected = scorer.solo_weight(&mentors[0], &teams[0]) - 1_000;
    assert_eq!(outcome.matching().unwrap().objective_value(), expected as f64);
}

#[test]
fn test_every_mentor_on_exactly_one_team() {
    let parameters = params(staffed(2, 3));
    let mentors: Vec<Mentor> = ["Ash", "Misty", "Brock", "Gary", "Tracey"]
        .into_iter()
        .map(|name| mentor(name).with_comfort_alone(ComfortLevel::new(2)))
        .collect();
    let teams = vec![team("Pallet"), team("Cerulean")];

    let outcome = run(BranchAndBoundSolver::new(), &mentors, &teams, &parameters);
    let matching = outcome.matching().unwrap();
    assert_well_formed(matching, 2, 3);
    assert!(matching.placements().all(|p| p.kind == AssignmentKind::Group));

    let co_mentors: Vec<_> = matching.co_mentors(0).collect();
    assert_eq!(co_mentors.len(), matching.roster(matching.team_index(0)).len() - 1);
    assert!(!co_mentors.iter().any(|name| name.matches("Ash")));
}

#[test]
fn test_lone_mentor_reported_solo() {
    let parameters = params(staffed(1, 2));
    let mentors = vec![
        mentor("Ash").with_comfort_alone(ComfortLevel::new(1)),
        mentor("Misty").with_comfort_alone(ComfortLevel::new(1)),
        mentor("Brock").with_comfort_alone(ComfortLevel::new(1)),
    ];
    let teams = vec![team("Pallet"), team("Cerulean")];

    let outcome = run(BranchAndBoundSolver::new(), &mentors, &teams, &parameters);
    let matching = outcome.matching().unwrap();
    assert_well_formed(matching, 1, 2);
    for team in 0..2 {
        let roster = matching.roster(team);
        let expected = if roster.len() == 1 {
            AssignmentKind::Solo
        } else {
            AssignmentKind::Group
        };
        for &mentor in roster {
            assert_eq!(matching.kind(mentor), expected);
        }
    }
}

#[test]
fn test_shared_team_reported_group_when_alone_is_free() {
    // Level 0 costs nothing alone, so Solo and Group weigh the same.
    let parameters = params(staffed(0, 2));
    let mentors = vec![mentor("Ash"), mentor("Misty")];
    let teams = vec![team("Pallet")];

    let outcome = run(BranchAndBoundSolver::new(), &mentors, &teams, &parameters);
    let matching = outcome.matching().unwrap();
    assert_eq!(matching.roster(0), [0, 1]);
    assert_eq!(matching.kind(0), AssignmentKind::Group);
    assert_eq!(matching.kind(1), AssignmentKind::Group);
    assert_eq!(matching.objective_value(), 0.0);
}

#[test]
fn test_solve_twice_is_rejected() {
    let parameters = params(staffed(1, 1));
    let mentors = vec![mentor("Ash")];
    let teams = vec![team("Pallet")];
    let mut engine = MatchEngine::new(BranchAndBoundSolver::new(), &mentors, &teams, &parameters).unwrap();
    assert_eq!(engine.state(), EngineState::Built);

    engine.solve().unwrap();
    assert_eq!(engine.state(), EngineState::Solved);
    assert!(matches!(
        engine.solve(),
        Err(MatchError::InvalidState {
            state: EngineState::Solved,
            action: "solve"
        })
    ));
}

#[test]
fn test_unknown_references_fail_validation() {
    let mut file = staffed(1, 1);
    file.required_team_assignments
        .insert("Ash".to_string(), "Viridian".to_string());
    file.required_mentor_groups = vec![vec!["Ash".to_string(), "Gary".to_string()]];
    let parameters = params(file);
    let mentors = vec![mentor("Ash")];
    let teams = vec![team("Pallet")];

    let result = MatchEngine::new(BranchAndBoundSolver::new(), &mentors, &teams, &parameters);
    match result {
        Err(MatchError::Validation(error)) => assert_eq!(error.violations.len(), 2),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("expected a validation error"),
    }
}

#[test]
fn test_empty_input_is_solver_error() {
    let parameters = params(staffed(1, 1));
    let mut engine = MatchEngine::new(BranchAndBoundSolver::new(), &[], &[], &parameters).unwrap();
    assert!(matches!(
        engine.solve(),
        Err(MatchError::Solver(SolverError::EmptyModel))
    ));
}

#[test]
fn test_node_limit_without_incumbent_is_infeasible_outcome() {
    let parameters = params(staffed(1, 1));
    let mentors = vec![mentor("Ash"), mentor("Misty")];
    let teams = vec![team("Pallet"), team("Cerulean")];

    let outcome = run(
        BranchAndBoundSolver::new().with_node_limit(1),
        &mentors,
        &teams,
        &parameters,
    );
    assert_eq!(
        outcome,
        MatchOutcome::Infeasible {
            status: SolverStatus::ReachedNodeLimit
        }
    );
}

#[test]
fn test_boxed_backend() {
    let parameters = params(staffed(1, 1));
    let mentors = vec![mentor("Ash")];
    let teams = vec![team("Pallet")];
    let solver: Box<dyn ConstraintSolver> = Box::new(BranchAndBoundSolver::new());

    let outcome = run(solver, &mentors, &teams, &parameters);
    assert!(outcome.is_success());
}

#[cfg(feature = "microlp")]
#[test]
fn test_backends_agree() {
    use crate::lp::MicroLpSolver;

    let mut file = ParameterFile {
        team_overlap_value: 1.0,
        no_overlap_cost: 1_000,
        partial_overlap_cost: 50,
        min_meeting_time: 60,
        total_meeting_time: 120,
        team_type_match_value: 40,
        team_requested_value: 200,
        ..staffed(1, 2)
    };
    file.required_mentor_groups = vec![vec!["Brock".to_string(), "Tracey".to_string()]];
    let parameters = params(file);

    let convenient = vec![TransitConvenience::Convenient; 5];
    let mentors = vec![
        Mentor::new("Ash", available_during(&[(0, 10, 16), (2, 10, 14)]))
            .with_transit_conveniences(convenient.clone())
            .with_comfort_alone(ComfortLevel::new(1)),
        Mentor::new("Misty", available_during(&[(1, 8, 20)]))
            .with_transit_conveniences(convenient.clone())
            .with_teams_requested(["Cerulean"]),
        Mentor::new("Brock", available_during(&[(0, 12, 18), (1, 12, 18)]))
            .with_transit_conveniences(convenient.clone())
            .with_comfort_alone(ComfortLevel::new(3)),
        Mentor::new("Tracey", available_during(&[(2, 8, 16)]))
            .with_transit_conveniences(convenient)
            .with_comfort_alone(ComfortLevel::new(4)),
    ];
    let teams = vec![
        Team::new("Pallet", available_during(&[(0, 10, 18), (2, 10, 14)])).with_transit_times(vec![15; 5]),
        Team::new("Cerulean", available_during(&[(1, 10, 20)])).with_transit_times(vec![30; 5]),
        Team::new("Viridian", available_during(&[(0, 12, 16), (1, 12, 16), (2, 8, 12)]))
            .with_transit_times(vec![0; 5]),
    ];

    let native = run(BranchAndBoundSolver::new(), &mentors, &teams, &parameters);
    let milp = run(MicroLpSolver::new(), &mentors, &teams, &parameters);

    let native = native.matching().unwrap();
    let milp = milp.matching().unwrap();
    assert_well_formed(native, 1, 2);
    assert_well_formed(milp, 1, 2);
    assert!((native.objective_value() - milp.objective_value()).abs() < 1e-6);
    assert_eq!(native.team_index(2), native.team_index(3));
    assert_eq!(milp.team_index(2), milp.team_index(3));
}
