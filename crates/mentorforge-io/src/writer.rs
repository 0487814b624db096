//! Matching and compatibility reports.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use mentorforge_scoring::CompatibilityMatrix;
use mentorforge_solver::Matching;
use tracing::debug;

use crate::error::{IoError, Result};

/// Header of the matching report.
pub const MATCHING_HEADER: [&str; 3] = ["Mentor Name", "Team Name", "Other Mentor(s)"];

/// Written in place of co-mentors for a mentor alone on a team.
pub const NO_CO_MENTORS: &str = "N/A";

/// Writes one row per mentor, in input order: name, team, co-mentors.
///
/// Co-mentors are joined with `;`.
pub fn write_matching<W: Write>(writer: W, matching: &Matching) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(MATCHING_HEADER)?;
    for (i, placement) in matching.placements().enumerate() {
        let others: Vec<&str> = matching.co_mentors(i).map(|name| name.display()).collect();
        let others = if others.is_empty() {
            NO_CO_MENTORS.to_string()
        } else {
            others.join(";")
        };
        wtr.write_record([placement.mentor.display(), placement.team.display(), others.as_str()])?;
    }
    wtr.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// Writes the compatibility matrix: header `Name,<team...>`, one row per mentor.
pub fn write_matrix<W: Write>(writer: W, matrix: &CompatibilityMatrix) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    let header = std::iter::once("Name").chain(matrix.team_names().iter().map(String::as_str));
    wtr.write_record(header)?;
    for (mentor, scores) in matrix.rows() {
        let row = std::iter::once(mentor.to_string()).chain(scores.iter().map(i64::to_string));
        wtr.write_record(row)?;
    }
    wtr.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// [`write_matching`] to a new file at `path`.
pub fn save_matching(path: impl AsRef<Path>, matching: &Matching) -> Result<()> {
    let path = path.as_ref();
    write_matching(create(path)?, matching)?;
    debug!(event = "matching_written", path = %path.display(), rows = matching.mentor_count());
    Ok(())
}

/// [`write_matrix`] to a new file at `path`.
pub fn save_matrix(path: impl AsRef<Path>, matrix: &CompatibilityMatrix) -> Result<()> {
    let path = path.as_ref();
    write_matrix(create(path)?, matrix)?;
    debug!(event = "matrix_written", path = %path.display(), rows = matrix.mentor_names().len());
    Ok(())
}

fn create(path: &Path) -> Result<File> {
    File::create(path).map_err(|source| IoError::Create {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use mentorforge_config::{ParameterFile, Parameters};
    use mentorforge_core::{Mentor, Team};
    use mentorforge_scoring::CompatibilityScorer;
    use mentorforge_solver::{BranchAndBoundSolver, MatchEngine};
    use mentorforge_test::{mentor, parameter_file, team};

    fn solved(mentors: &[Mentor], teams: &[Team], parameters: &Parameters) -> Matching {
        MatchEngine::new(BranchAndBoundSolver::new(), mentors, teams, parameters)
            .unwrap()
            .solve()
            .unwrap()
            .into_matching()
            .unwrap()
    }

    #[test]
    fn test_matching_report() {
        let mut file = ParameterFile {
            min_num_mentors: 1,
            max_num_mentors: 2,
            ..parameter_file()
        };
        file.required_mentor_groups = vec![vec!["Ash".to_string(), "Brock".to_string()]];
        file.required_team_assignments
            .insert("Misty".to_string(), "Cerulean".to_string());
        let parameters = Parameters::try_from(file).unwrap();
        let mentors = vec![mentor("Ash"), mentor("Misty"), mentor("Brock")];
        let teams = vec![team("Pallet"), team("Cerulean")];
        let matching = solved(&mentors, &teams, &parameters);

        let mut out = Vec::new();
        write_matching(&mut out, &matching).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            "Mentor Name,Team Name,Other Mentor(s)\n\
             Ash,Pallet,Brock\n\
             Misty,Cerulean,N/A\n\
             Brock,Pallet,Ash\n"
        );
    }

    #[test]
    fn test_co_mentors_joined_with_semicolon() {
        let parameters = Parameters::try_from(ParameterFile {
            min_num_mentors: 1,
            max_num_mentors: 3,
            ..parameter_file()
        })
        .unwrap();
        let mentors = vec![mentor("Ash"), mentor("Misty"), mentor("Brock")];
        let teams = vec![team("Pallet")];
        let matching = solved(&mentors, &teams, &parameters);

        let mut out = Vec::new();
        write_matching(&mut out, &matching).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Ash,Pallet,Misty;Brock\n"));
        assert!(text.contains("Brock,Pallet,Ash;Misty\n"));
    }

    #[test]
    fn test_matrix_report() {
        let parameters = Parameters::try_from(ParameterFile {
            team_type_match_value: 5,
            ..parameter_file()
        })
        .unwrap();
        let scorer = CompatibilityScorer::new(&parameters);
        let mentors = vec![mentor("Ash"), mentor("Misty")];
        let teams = vec![team("Pallet"), team("Cerulean")];
        let matrix = CompatibilityMatrix::build(&scorer, &mentors, &teams);

        let mut out = Vec::new();
        write_matrix(&mut out, &matrix).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines[0], "Name,Pallet,Cerulean");
        assert_eq!(lines[1], format!("Ash,{},{}", matrix.score(0, 0), matrix.score(0, 1)));
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn test_save_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("matching.csv");
        let parameters = Parameters::try_from(ParameterFile {
            min_num_mentors: 1,
            ..parameter_file()
        })
        .unwrap();
        let mentors = vec![mentor("Ash")];
        let teams = vec![team("Pallet")];
        save_matching(&path, &solved(&mentors, &teams, &parameters)).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text.lines().nth(1), Some("Ash,Pallet,N/A"));
    }

    #[test]
    fn test_save_into_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("matrix.csv");
        let parameters = Parameters::try_from(parameter_file()).unwrap();
        let scorer = CompatibilityScorer::new(&parameters);
        let matrix = CompatibilityMatrix::build(&scorer, &[], &[]);

        assert!(matches!(save_matrix(&path, &matrix), Err(IoError::Create { .. })));
    }
}
