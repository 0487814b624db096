//! Hard rules of a valid matching.

use std::collections::HashMap;

use mentorforge_config::Parameters;
use mentorforge_core::{Mentor, NameKey, Team};
use tracing::debug;

use crate::lp::{ConstraintSolver, LinearConstraint, LinearExpr};
use crate::model::AssignmentKind::{Group, Solo};
use crate::model::AssignmentModel;

/// Number of constraints added per family.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConstraintCounts {
    pub type_consistency: usize,
    pub one_team_per_mentor: usize,
    pub staffing: usize,
    pub group_cohesion: usize,
    pub required_assignment: usize,
}

impl ConstraintCounts {
    pub fn total(&self) -> usize {
        self.type_consistency
            + self.one_team_per_mentor
            + self.staffing
            + self.group_cohesion
            + self.required_assignment
    }
}

/// Adds every constraint family to a solver.
///
/// Names in required groups and pins are resolved against the given
/// mentors and teams; names that resolve to nothing are skipped, so
/// references should be validated first.
pub struct ConstraintBuilder<'a> {
    model: &'a AssignmentModel,
    mentors: &'a [Mentor],
    teams: &'a [Team],
    parameters: &'a Parameters,
}

impl<'a> ConstraintBuilder<'a> {
    pub fn new(
        model: &'a AssignmentModel,
        mentors: &'a [Mentor],
        teams: &'a [Team],
        parameters: &'a Parameters,
    ) -> Self {
        Self {
            model,
            mentors,
            teams,
            parameters,
        }
    }

    pub fn build<S: ConstraintSolver + ?Sized>(&self, solver: &mut S) -> ConstraintCounts {
        let counts = ConstraintCounts {
            type_consistency: self.type_consistency(solver),
            one_team_per_mentor: self.one_team_per_mentor(solver),
            staffing: self.staffing_bounds(solver),
            group_cohesion: self.group_cohesion(solver),
            required_assignment: self.required_assignments(solver),
        };
        debug!(
            event = "constraints_built",
            type_consistency = counts.type_consistency,
            one_team_per_mentor = counts.one_team_per_mentor,
            staffing = counts.staffing,
            group_cohesion = counts.group_cohesion,
            required_assignment = counts.required_assignment,
        );
        counts
    }

    /// Per team: `ΣGroup + 2·ΣSolo ≥ 2`.
    ///
    /// A lone mentor must use a Solo variable; Group variables only count
    /// when at least two are set.
    pub fn type_consistency<S: ConstraintSolver + ?Sized>(&self, solver: &mut S) -> usize {
        let m = self.model;
        for (t, team) in self.teams.iter().enumerate() {
            let mut expr = LinearExpr::sum(m.by_team(Group, t));
            expr.add_all(m.by_team(Solo, t), 2.0);
            solver.add_constraint(LinearConstraint::greater_or_equal(
                format!("type_consistency[{}]", team.name()),
                expr,
                2.0,
            ));
        }
        self.teams.len()
    }

    /// Per mentor: `ΣSolo + ΣGroup = 1`.
    pub fn one_team_per_mentor<S: ConstraintSolver + ?Sized>(&self, solver: &mut S) -> usize {
        let m = self.model;
        for (i, mentor) in self.mentors.iter().enumerate() {
            let expr = LinearExpr::sum(
                m.by_mentor(Solo, i)
                    .iter()
                    .chain(m.by_mentor(Group, i))
                    .copied(),
            );
            solver.add_constraint(LinearConstraint::equal(
                format!("one_team[{}]", mentor.name()),
                expr,
                1.0,
            ));
        }
        self.mentors.len()
    }

    /// Per team: `min ≤ ΣSolo + ΣGroup ≤ max`.
    pub fn staffing_bounds<S: ConstraintSolver + ?Sized>(&self, solver: &mut S) -> usize {
        let m = self.model;
        let min = self.parameters.min_num_mentors() as f64;
        let max = self.parameters.max_num_mentors() as f64;
        for (t, team) in self.teams.iter().enumerate() {
            let expr = LinearExpr::sum(m.by_team(Solo, t).chain(m.by_team(Group, t)));
            solver.add_constraint(LinearConstraint::greater_or_equal(
                format!("min_mentors[{}]", team.name()),
                expr.clone(),
                min,
            ));
            solver.add_constraint(LinearConstraint::less_or_equal(
                format!("max_mentors[{}]", team.name()),
                expr,
                max,
            ));
        }
        2 * self.teams.len()
    }

    /// Per unordered pair in a required group: no Solo variable for either,
    /// and `Group[m1,t] = Group[m2,t]` for every team.
    pub fn group_cohesion<S: ConstraintSolver + ?Sized>(&self, solver: &mut S) -> usize {
        let m = self.model;
        let index: HashMap<&NameKey, usize> = self
            .mentors
            .iter()
            .enumerate()
            .map(|(i, mentor)| (mentor.name().key(), i))
            .collect();

        let mut added = 0;
        for (first, second) in self.parameters.required_groups().pairs() {
            let (Some(&a), Some(&b)) = (index.get(first.key()), index.get(second.key())) else {
                continue;
            };
            let pair = format!("{},{}", self.mentors[a].name(), self.mentors[b].name());

            let no_solo = LinearExpr::sum(
                m.by_mentor(Solo, a)
                    .iter()
                    .chain(m.by_mentor(Solo, b))
                    .copied(),
            );
            solver.add_constraint(LinearConstraint::equal(
                format!("no_solo[{pair}]"),
                no_solo,
                0.0,
            ));
            added += 1;

            for (t, team) in self.teams.iter().enumerate() {
                let together = LinearExpr::new()
                    .with_term(m.var(Group, a, t), 1.0)
                    .with_term(m.var(Group, b, t), -1.0);
                solver.add_constraint(LinearConstraint::equal(
                    format!("together[{pair},{}]", team.name()),
                    together,
                    0.0,
                ));
                added += 1;
            }
        }
        added
    }

    /// Per pin: `Solo[m,t] + Group[m,t] = 1`.
    pub fn required_assignments<S: ConstraintSolver + ?Sized>(&self, solver: &mut S) -> usize {
        let m = self.model;
        let team_index: HashMap<&NameKey, usize> = self
            .teams
            .iter()
            .enumerate()
            .map(|(i, team)| (team.name().key(), i))
            .collect();

        let mut added = 0;
        for (i, mentor) in self.mentors.iter().enumerate() {
            let Some(team) = self.parameters.required_team_for(mentor.name().key()) else {
                continue;
            };
            let Some(&t) = team_index.get(team.key()) else {
                continue;
            };
            solver.add_constraint(LinearConstraint::equal(
                format!("required[{},{}]", mentor.name(), self.teams[t].name()),
                LinearExpr::sum([m.var(Solo, i, t), m.var(Group, i, t)]),
                1.0,
            ));
            added += 1;
        }
        added
    }
}
