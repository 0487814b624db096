//! Mentor by team compatibility table.

use mentorforge_core::{Mentor, Team};

use crate::scorer::CompatibilityScorer;

/// Pairwise compatibility of every mentor with every team.
///
/// Rows follow the mentor order, columns the team order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompatibilityMatrix {
    mentor_names: Vec<String>,
    team_names: Vec<String>,
    scores: Vec<Vec<i64>>,
}

impl CompatibilityMatrix {
    pub fn build(scorer: &CompatibilityScorer<'_>, mentors: &[Mentor], teams: &[Team]) -> Self {
        let scores = mentors
            .iter()
            .map(|mentor| {
                teams
                    .iter()
                    .map(|team| scorer.compatibility(mentor, team))
                    .collect()
            })
            .collect();
        Self {
            mentor_names: mentors.iter().map(|m| m.name().display().to_string()).collect(),
            team_names: teams.iter().map(|t| t.name().display().to_string()).collect(),
            scores,
        }
    }

    pub fn mentor_names(&self) -> &[String] {
        &self.mentor_names
    }

    pub fn team_names(&self) -> &[String] {
        &self.team_names
    }

    /// Score of mentor `row` with team `column`.
    pub fn score(&self, row: usize, column: usize) -> i64 {
        self.scores[row][column]
    }

    /// Iterates `(mentor name, scores by team)`.
    pub fn rows(&self) -> impl Iterator<Item = (&str, &[i64])> {
        self.mentor_names
            .iter()
            .map(String::as_str)
            .zip(self.scores.iter().map(Vec::as_slice))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mentorforge_config::{ParameterFile, Parameters};
    use mentorforge_test::{mentor, parameter_file, team};

    #[test]
    fn test_matrix_shape_and_values() {
        let parameters = Parameters::try_from(ParameterFile {
            team_type_match_value: 7,
            team_requested_value: 100,
            ..parameter_file()
        })
        .unwrap();
        let scorer = CompatibilityScorer::new(&parameters);
        let mentors = vec![mentor("Ash").with_teams_requested(["Viridian"]), mentor("Misty")];
        let teams = vec![team("Pallet"), team("Viridian"), team("Cerulean")];

        let matrix = CompatibilityMatrix::build(&scorer, &mentors, &teams);
        assert_eq!(matrix.mentor_names(), &["Ash", "Misty"]);
        assert_eq!(matrix.team_names().len(), 3);
        assert_eq!(matrix.score(0, 1), matrix.score(0, 0) + 100);
        assert_eq!(matrix.score(1, 2), scorer.compatibility(&mentors[1], &teams[2]));

        let rows: Vec<_> = matrix.rows().collect();
        assert_eq!(rows[1].0, "Misty");
        assert_eq!(rows[1].1.len(), 3);
    }
}
