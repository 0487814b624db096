//! Tests for the branch-and-bound backend.

use super::*;
use crate::lp::{LinearConstraint, LinearExpr, SolverError, VarId};

fn vars(solver: &mut BranchAndBoundSolver, count: usize) -> Vec<VarId> {
    (0..count)
        .map(|i| solver.add_bool_var(&format!("x{i}")))
        .collect()
}

/// Best objective by enumerating every assignment.
fn brute_force(program: &LinearProgram) -> Option<f64> {
    let n = program.variable_count();
    let mut best: Option<f64> = None;
    for mask in 0u32..(1 << n) {
        let value_of = |var: VarId| f64::from((mask >> var.index()) & 1);
        if program
            .constraints()
            .iter()
            .all(|c| c.is_satisfied(value_of, 1e-9))
        {
            let value = program.objective().evaluate(value_of);
            if best.map_or(true, |b| value > b) {
                best = Some(value);
            }
        }
    }
    best
}

#[test]
fn test_knapsack_prefers_two_small_items() {
    let mut solver = BranchAndBoundSolver::new();
    let x = vars(&mut solver, 3);
    solver.add_constraint(LinearConstraint::less_or_equal(
        "capacity",
        LinearExpr::new()
            .with_term(x[0], 2.0)
            .with_term(x[1], 1.0)
            .with_term(x[2], 1.0),
        2.0,
    ));
    solver.set_objective(
        LinearExpr::new()
            .with_term(x[0], 3.0)
            .with_term(x[1], 2.0)
            .with_term(x[2], 2.0),
    );

    assert_eq!(solver.solve().unwrap(), SolverStatus::Optimal);
    assert_eq!(solver.objective_value(), Some(4.0));
    assert_eq!(solver.value(x[0]), Some(0.0));
    assert_eq!(solver.value(x[1]), Some(1.0));
    assert_eq!(solver.value(x[2]), Some(1.0));
}

#[test]
fn test_assignment_gives_up_greedy_choice() {
    // Two workers, two slots; both like slot 0 best.
    let mut solver = BranchAndBoundSolver::new();
    let x = vars(&mut solver, 4);
    let (a0, a1, b0, b1) = (x[0], x[1], x[2], x[3]);
    solver.add_constraint(LinearConstraint::equal("a", LinearExpr::sum([a0, a1]), 1.0));
    solver.add_constraint(LinearConstraint::equal("b", LinearExpr::sum([b0, b1]), 1.0));
    solver.add_constraint(LinearConstraint::less_or_equal("slot0", LinearExpr::sum([a0, b0]), 1.0));
    solver.add_constraint(LinearConstraint::less_or_equal("slot1", LinearExpr::sum([a1, b1]), 1.0));
    solver.set_objective(
        LinearExpr::new()
            .with_term(a0, 5.0)
            .with_term(a1, 4.0)
            .with_term(b0, 5.0)
            .with_term(b1, 1.0),
    );

    assert_eq!(solver.solve().unwrap(), SolverStatus::Optimal);
    assert_eq!(solver.objective_value(), Some(9.0));
    assert_eq!(solver.value(a1), Some(1.0));
    assert_eq!(solver.value(b0), Some(1.0));
}

#[test]
fn test_negative_choice_still_made() {
    let mut solver = BranchAndBoundSolver::new();
    let x = vars(&mut solver, 2);
    solver.add_constraint(LinearConstraint::equal("one", LinearExpr::sum(x.clone()), 1.0));
    let mut objective = LinearExpr::new().with_term(x[0], -5.0).with_term(x[1], -3.0);
    objective.add_constant(10.0);
    solver.set_objective(objective);

    assert_eq!(solver.solve().unwrap(), SolverStatus::Optimal);
    assert_eq!(solver.objective_value(), Some(7.0));
    assert_eq!(solver.value(x[1]), Some(1.0));
}

#[test]
fn test_infeasible() {
    let mut solver = BranchAndBoundSolver::new();
    let x = vars(&mut solver, 2);
    solver.add_constraint(LinearConstraint::equal("one", LinearExpr::sum(x.clone()), 1.0));
    solver.add_constraint(LinearConstraint::greater_or_equal("two", LinearExpr::sum(x), 2.0));

    assert_eq!(solver.solve().unwrap(), SolverStatus::Infeasible);
    assert!(solver.solution().is_none());
    assert_eq!(solver.objective_value(), None);
}

#[test]
fn test_empty_row_checked_up_front() {
    let mut solver = BranchAndBoundSolver::new();
    vars(&mut solver, 1);
    solver.add_constraint(LinearConstraint::greater_or_equal("nothing", LinearExpr::new(), 1.0));

    assert_eq!(solver.solve().unwrap(), SolverStatus::Infeasible);
    assert_eq!(solver.nodes_explored(), 0);
}

#[test]
fn test_empty_model_is_an_error() {
    let mut solver = BranchAndBoundSolver::new();
    assert_eq!(solver.solve(), Err(SolverError::EmptyModel));
    assert_eq!(solver.status(), SolverStatus::NotSolved);
}

#[test]
fn test_node_limit_stops_search() {
    let mut solver = BranchAndBoundSolver::new().with_node_limit(1);
    let x = vars(&mut solver, 6);
    solver.set_objective(LinearExpr::sum(x));

    assert_eq!(solver.solve().unwrap(), SolverStatus::ReachedNodeLimit);
    assert_eq!(solver.nodes_explored(), 1);
    assert!(solver.solution().is_none());
}

#[test]
fn test_node_limit_keeps_incumbent() {
    // The first dive reaches a leaf after one node per variable.
    let mut solver = BranchAndBoundSolver::new().with_node_limit(5);
    let x = vars(&mut solver, 4);
    solver.add_constraint(LinearConstraint::less_or_equal("cap", LinearExpr::sum(x.clone()), 2.0));
    solver.set_objective(
        LinearExpr::new()
            .with_term(x[0], 1.0)
            .with_term(x[1], 2.0)
            .with_term(x[2], 3.0)
            .with_term(x[3], 4.0),
    );

    let status = solver.solve().unwrap();
    assert_eq!(status, SolverStatus::ReachedNodeLimit);
    assert!(status.may_have_solution());
    assert_eq!(solver.objective_value(), Some(3.0));
}

#[test]
fn test_default_search_is_time_limited() {
    let solver = BranchAndBoundSolver::new();
    assert_eq!(solver.config().time_limit, Some(DEFAULT_TIME_LIMIT));
    assert_eq!(solver.config().node_limit, None);
}

#[test]
fn test_time_limit_zero_still_reports_limit() {
    let mut solver = BranchAndBoundSolver::new().with_time_limit(Duration::ZERO);
    let x = vars(&mut solver, 3);
    solver.set_objective(LinearExpr::sum(x));

    assert_eq!(solver.solve().unwrap(), SolverStatus::ReachedTimeLimit);
}

#[test]
fn test_matches_brute_force() {
    // Deterministic pseudo-random instances.
    let mut seed: u64 = 0x2545_f491_4f6c_dd1d;
    let mut next = |range: i64| {
        seed ^= seed << 13;
        seed ^= seed >> 7;
        seed ^= seed << 17;
        (seed % range as u64) as i64
    };

    for instance in 0..20 {
        let mut solver = BranchAndBoundSolver::new();
        let x = vars(&mut solver, 9);
        // Three choose-one groups plus two mixed rows.
        for g in 0..3 {
            solver.add_constraint(LinearConstraint::equal(
                format!("group{g}"),
                LinearExpr::sum(x[g * 3..g * 3 + 3].iter().copied()),
                1.0,
            ));
        }
        for r in 0..2 {
            let mut expr = LinearExpr::new();
            for &var in &x {
                expr.add_term(var, (next(5) - 2) as f64);
            }
            solver.add_constraint(LinearConstraint::less_or_equal(
                format!("mixed{r}"),
                expr,
                next(4) as f64,
            ));
        }
        let mut objective = LinearExpr::new();
        for &var in &x {
            objective.add_term(var, (next(41) - 20) as f64);
        }
        solver.set_objective(objective);

        let expected = brute_force(solver.program());
        let status = solver.solve().unwrap();
        assert_eq!(solver.objective_value(), expected, "instance {instance}");
        let expected_status = if expected.is_some() {
            SolverStatus::Optimal
        } else {
            SolverStatus::Infeasible
        };
        assert_eq!(status, expected_status, "instance {instance}");
    }
}
