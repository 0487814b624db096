//! The expression the matching maximizes.

use mentorforge_core::{Mentor, Team};
use mentorforge_scoring::CompatibilityScorer;
use tracing::debug;

use crate::lp::{ConstraintSolver, LinearExpr};
use crate::model::AssignmentKind::{Group, Solo};
use crate::model::AssignmentModel;

/// Builds `Σ Solo·(compatibility − alone cost) + Σ Group·compatibility − offset`.
///
/// The offset is `pins × teamRequiredValue + required pairs × mentorRequiredValue`:
/// the bonus every valid matching collects from its hard requirements.
pub struct ObjectiveBuilder<'a> {
    model: &'a AssignmentModel,
    mentors: &'a [Mentor],
    teams: &'a [Team],
    scorer: CompatibilityScorer<'a>,
}

impl<'a> ObjectiveBuilder<'a> {
    pub fn new(
        model: &'a AssignmentModel,
        mentors: &'a [Mentor],
        teams: &'a [Team],
        scorer: CompatibilityScorer<'a>,
    ) -> Self {
        Self {
            model,
            mentors,
            teams,
            scorer,
        }
    }

    /// Constant subtracted from the weighted sum.
    pub fn offset(&self) -> i64 {
        let p = self.scorer.parameters();
        p.pin_count() as i64 * p.team_required_value()
            + p.required_pair_count() as i64 * p.mentor_required_value()
    }

    pub fn expression(&self) -> LinearExpr {
        let mut expr = LinearExpr::new();
        for (i, mentor) in self.mentors.iter().enumerate() {
            let alone_cost = self.scorer.alone_cost(mentor);
            for (t, team) in self.teams.iter().enumerate() {
                let compatibility = self.scorer.compatibility(mentor, team);
                expr.add_term(self.model.var(Solo, i, t), (compatibility - alone_cost) as f64);
                expr.add_term(self.model.var(Group, i, t), compatibility as f64);
            }
        }
        expr.add_constant(-(self.offset() as f64));
        expr
    }

    /// Sets the objective on `solver` and returns it.
    pub fn build<S: ConstraintSolver + ?Sized>(&self, solver: &mut S) -> LinearExpr {
        let expr = self.expression();
        debug!(
            event = "objective_built",
            terms = expr.terms().len(),
            offset = self.offset(),
        );
        solver.set_objective(expr.clone());
        expr
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lp::BranchAndBoundSolver;
    use mentorforge_config::{ParameterFile, Parameters};
    use mentorforge_core::ComfortLevel;
    use mentorforge_test::{mentor, parameter_file, team};

    #[test]
    fn test_weights_and_offset() {
        let mut file = ParameterFile {
            team_type_match_value: 50,
            team_required_value: 1_000,
            mentor_required_value: 300,
            ..parameter_file()
        };
        file.required_mentor_groups = vec![vec!["Ash".to_string(), "Misty".to_string()]];
        file.required_team_assignments
            .insert("Ash".to_string(), "Pallet".to_string());
        let parameters = Parameters::try_from(file).unwrap();
        let scorer = CompatibilityScorer::new(&parameters);

        let mentors = vec![
            mentor("Ash").with_comfort_alone(ComfortLevel::new(4)),
            mentor("Misty"),
        ];
        let teams = vec![team("Pallet")];
        let mut solver = BranchAndBoundSolver::new();
        let model = AssignmentModel::new(&mut solver, &mentors, &teams);
        let builder = ObjectiveBuilder::new(&model, &mentors, &teams, scorer);

        assert_eq!(builder.offset(), 1_000 + 300);
        let expr = builder.build(&mut solver);
        assert_eq!(expr.constant(), -1_300.0);

        let weight = |var| {
            expr.terms()
                .iter()
                .find(|(v, _)| *v == var)
                .map(|&(_, w)| w)
        };
        let ash_compat = scorer.compatibility(&mentors[0], &teams[0]) as f64;
        assert_eq!(weight(model.var(Group, 0, 0)), Some(ash_compat));
        assert_eq!(weight(model.var(Solo, 0, 0)), Some(ash_compat - 4.0));
        assert_eq!(solver.program().objective(), &expr.normalized());
    }

    #[test]
    fn test_group_never_worse_than_solo() {
        let parameters = Parameters::try_from(parameter_file()).unwrap();
        let scorer = CompatibilityScorer::new(&parameters);
        let mentors = vec![
            mentor("Ash").with_comfort_alone(ComfortLevel::new(0)),
            mentor("Misty").with_comfort_alone(ComfortLevel::new(4)),
        ];
        let teams = vec![team("Pallet"), team("Cerulean")];
        let mut solver = BranchAndBoundSolver::new();
        let model = AssignmentModel::new(&mut solver, &mentors, &teams);
        let expr = ObjectiveBuilder::new(&model, &mentors, &teams, scorer).expression();

        let weight = |var| {
            expr.terms()
                .iter()
                .find(|(v, _)| *v == var)
                .map_or(0.0, |&(_, w)| w)
        };
        for m in 0..2 {
            for t in 0..2 {
                assert!(weight(model.var(Group, m, t)) >= weight(model.var(Solo, m, t)));
            }
        }
    }
}
