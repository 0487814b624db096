//! Mentor and team record files.

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use mentorforge_core::{EntityName, Mentor, NameKey, RecordError, RecordLayout, Team};
use tracing::debug;

use crate::error::{IoError, Result};

/// Reads every mentor from a CSV file, skipping the layout's header rows.
///
/// # Errors
///
/// [`IoError::Open`] if the file cannot be opened, [`IoError::CsvRead`] if
/// it is not CSV, [`IoError::Record`] for the first malformed row or the
/// first row repeating an earlier name.
pub fn read_mentors(path: impl AsRef<Path>, layout: &RecordLayout) -> Result<Vec<Mentor>> {
    let path = path.as_ref();
    let mentors = read_mentors_from(open(path)?, layout, &path.display().to_string())?;
    debug!(event = "mentors_read", path = %path.display(), count = mentors.len());
    Ok(mentors)
}

/// Reads every team from a CSV file, skipping the layout's header rows.
///
/// # Errors
///
/// As [`read_mentors`].
pub fn read_teams(path: impl AsRef<Path>, layout: &RecordLayout) -> Result<Vec<Team>> {
    let path = path.as_ref();
    let teams = read_teams_from(open(path)?, layout, &path.display().to_string())?;
    debug!(event = "teams_read", path = %path.display(), count = teams.len());
    Ok(teams)
}

/// Reads mentors from any CSV source; `origin` names it in errors.
pub fn read_mentors_from<R: Read>(reader: R, layout: &RecordLayout, origin: &str) -> Result<Vec<Mentor>> {
    read_records(
        reader,
        layout.mentor_header_rows,
        origin,
        |fields| Mentor::from_record(fields, layout),
        Mentor::name,
    )
}

/// Reads teams from any CSV source; `origin` names it in errors.
pub fn read_teams_from<R: Read>(reader: R, layout: &RecordLayout, origin: &str) -> Result<Vec<Team>> {
    read_records(
        reader,
        layout.team_header_rows,
        origin,
        |fields| Team::from_record(fields, layout),
        Team::name,
    )
}

fn open(path: &Path) -> Result<File> {
    File::open(path).map_err(|source| IoError::Open {
        path: path.to_path_buf(),
        source,
    })
}

fn read_records<R, T, F>(
    reader: R,
    header_rows: usize,
    origin: &str,
    parse: F,
    name: fn(&T) -> &EntityName,
) -> Result<Vec<T>>
where
    R: Read,
    F: Fn(&[&str]) -> mentorforge_core::Result<T>,
{
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut records = Vec::new();
    let mut first_rows: HashMap<NameKey, u64> = HashMap::new();
    for (index, result) in csv_reader.records().enumerate() {
        let record = result.map_err(|source| IoError::CsvRead {
            origin: origin.to_string(),
            source,
        })?;
        if index < header_rows {
            continue;
        }
        let fields: Vec<&str> = record.iter().collect();
        if fields.iter().all(|field| field.trim().is_empty()) {
            continue;
        }
        let row = record.position().map_or(index as u64 + 1, |p| p.line());
        let to_io = |source| IoError::Record {
            origin: origin.to_string(),
            row,
            source,
        };
        let entity = parse(&fields).map_err(to_io)?;
        let entity_name = name(&entity);
        if let Some(&first_row) = first_rows.get(entity_name.key()) {
            return Err(to_io(RecordError::DuplicateName {
                entity: entity_name.display().to_string(),
                first_row,
                row,
            }));
        }
        first_rows.insert(entity_name.key().clone(), row);
        records.push(entity);
    }
    Ok(records)
}
