//! Flat CSV key/value tables.
//!
//! Rows are turned into a YAML mapping so the CSV and YAML formats share one
//! deserializer.

use csv::{ReaderBuilder, StringRecord};
use mentorforge_core::RecordLayout;
use serde_yaml::{Mapping, Value};

use crate::error::ConfigError;

const GROUP_KEY: &str = "requiredMentorGroup";
const ASSIGNMENT_KEY: &str = "requiredTeamAssignment";
const MATRIX_KEY: &str = "skillMatchValues";
const VECTOR_KEYS: [&str; 2] = ["comfortAloneCosts", "transitConvenienceWeights"];

pub(super) fn parse(s: &str) -> Result<Value, ConfigError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .comment(Some(b'#'))
        .from_reader(s.as_bytes());

    let mut fields = Mapping::new();
    let mut groups = Vec::new();
    let mut assignments = Mapping::new();

    for row in reader.records() {
        let row = row?;
        let Some((key, values)) = split_row(&row) else {
            continue;
        };

        match key {
            GROUP_KEY => groups.push(Value::Sequence(
                values.into_iter().map(|v| Value::String(v.to_string())).collect(),
            )),
            ASSIGNMENT_KEY => match values.as_slice() {
                [mentor, team] => {
                    assignments.insert(
                        Value::String(mentor.to_string()),
                        Value::String(team.to_string()),
                    );
                }
                _ => {
                    return Err(ConfigError::Invalid(format!(
                        "{ASSIGNMENT_KEY} needs a mentor and a team, got {values:?}"
                    )));
                }
            },
            MATRIX_KEY => {
                fields.insert(key.into(), matrix(&values)?);
            }
            _ if VECTOR_KEYS.contains(&key) => {
                fields.insert(
                    key.into(),
                    Value::Sequence(values.iter().map(|v| scalar(v)).collect()),
                );
            }
            _ => match values.as_slice() {
                [value] => {
                    fields.insert(key.into(), scalar(value));
                }
                _ => {
                    return Err(ConfigError::Invalid(format!(
                        "can't parse line for {key}: expected one value, got {values:?}"
                    )));
                }
            },
        }
    }

    if !groups.is_empty() {
        fields.insert("requiredMentorGroups".into(), Value::Sequence(groups));
    }
    if !assignments.is_empty() {
        fields.insert("requiredTeamAssignments".into(), Value::Mapping(assignments));
    }
    Ok(Value::Mapping(fields))
}

/// Returns the key and its non-empty values, or `None` for a blank row.
fn split_row(row: &StringRecord) -> Option<(&str, Vec<&str>)> {
    let mut cells = row.iter().map(str::trim);
    let key = cells.next().filter(|k| !k.is_empty())?;
    let values: Vec<&str> = cells.filter(|v| !v.is_empty()).collect();
    if values.is_empty() {
        return None;
    }
    Some((key, values))
}

fn scalar(cell: &str) -> Value {
    if let Ok(n) = cell.parse::<i64>() {
        Value::Number(n.into())
    } else if let Ok(x) = cell.parse::<f64>() {
        Value::Number(x.into())
    } else {
        Value::String(cell.to_string())
    }
}

/// Reshapes a row-major flattened matrix, one row per skill request level.
fn matrix(values: &[&str]) -> Result<Value, ConfigError> {
    let width = RecordLayout::default().skill_confidence_levels.len();
    if values.len() % width != 0 {
        return Err(ConfigError::Invalid(format!(
            "{MATRIX_KEY} has {} values, not a multiple of {width}",
            values.len()
        )));
    }
    Ok(Value::Sequence(
        values
            .chunks(width)
            .map(|row| Value::Sequence(row.iter().map(|v| scalar(v)).collect()))
            .collect(),
    ))
}
