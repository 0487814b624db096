//! Positional reading of raw records.

use crate::availability::WeeklyAvailability;
use crate::error::{RecordError, Result};
use crate::layout::{RecordLayout, Vocabulary};
use crate::name::EntityName;

/// Reads a record left to right, tracking the column for error messages.
pub(crate) struct RecordCursor<'a, S> {
    fields: &'a [S],
    position: usize,
    entity: String,
}

impl<'a, S: AsRef<str>> RecordCursor<'a, S> {
    /// Checks the record length and reads the name from column 1.
    pub(crate) fn open(fields: &'a [S], expected: usize) -> Result<(Self, EntityName)> {
        let raw_name = fields.first().map(|f| f.as_ref()).unwrap_or("");
        let name = EntityName::new(raw_name);
        if name.key().is_empty() {
            return Err(RecordError::EmptyName);
        }
        if fields.len() < expected {
            return Err(RecordError::TooShort {
                entity: name.display().to_string(),
                expected,
                found: fields.len(),
            });
        }
        let cursor = Self {
            fields,
            position: 1,
            entity: name.display().to_string(),
        };
        Ok((cursor, name))
    }

    fn take(&mut self, count: usize) -> (usize, &'a [S]) {
        let start = self.position;
        self.position += count;
        (start, &self.fields[start..self.position])
    }

    fn next_cell(&mut self) -> (usize, &'a str) {
        let (start, cells) = self.take(1);
        (start, cells[0].as_ref().trim())
    }

    pub(crate) fn availability(&mut self, layout: &RecordLayout) -> Result<WeeklyAvailability> {
        let (start, marks) = self.take(layout.total_slots());
        WeeklyAvailability::from_marks(marks, start, &self.entity, layout)
    }

    pub(crate) fn flags(
        &mut self,
        count: usize,
        yes: &str,
        no: &str,
        field: &'static str,
    ) -> Result<Vec<bool>> {
        let (start, cells) = self.take(count);
        cells
            .iter()
            .enumerate()
            .map(|(i, cell)| {
                let mark = cell.as_ref().trim();
                if mark == yes {
                    Ok(true)
                } else if mark == no {
                    Ok(false)
                } else {
                    Err(self.invalid_mark(field, start + i, mark))
                }
            })
            .collect()
    }

    pub(crate) fn levels(
        &mut self,
        count: usize,
        vocabulary: &Vocabulary,
        field: &'static str,
    ) -> Result<Vec<usize>> {
        let (start, cells) = self.take(count);
        cells
            .iter()
            .enumerate()
            .map(|(i, cell)| {
                let mark = cell.as_ref().trim();
                vocabulary
                    .level_of(mark)
                    .ok_or_else(|| self.invalid_mark(field, start + i, mark))
            })
            .collect()
    }

    pub(crate) fn level(&mut self, vocabulary: &Vocabulary, field: &'static str) -> Result<usize> {
        let (column, mark) = self.next_cell();
        vocabulary
            .level_of(mark)
            .ok_or_else(|| self.invalid_mark(field, column, mark))
    }

    pub(crate) fn numbers(&mut self, count: usize, field: &'static str) -> Result<Vec<u32>> {
        let (start, cells) = self.take(count);
        cells
            .iter()
            .enumerate()
            .map(|(i, cell)| {
                let value = cell.as_ref().trim();
                value.parse::<u32>().map_err(|_| RecordError::InvalidNumber {
                    entity: self.entity.clone(),
                    field,
                    column: start + i + 1,
                    value: value.to_string(),
                })
            })
            .collect()
    }

    /// Splits a multi-name cell; empty items are dropped.
    pub(crate) fn names(&mut self, delimiter: char) -> Vec<EntityName> {
        let (_, cell) = self.next_cell();
        cell.split(delimiter)
            .map(EntityName::new)
            .filter(|name| !name.key().is_empty())
            .collect()
    }

    fn invalid_mark(&self, field: &'static str, index: usize, value: &str) -> RecordError {
        RecordError::InvalidMark {
            entity: self.entity.clone(),
            field,
            column: index + 1,
            value: value.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_rejects_short_record() {
        let fields = ["Ash", "1"];
        let err = RecordCursor::open(&fields[..], 5).err().unwrap();
        assert_eq!(
            err,
            RecordError::TooShort {
                entity: "Ash".to_string(),
                expected: 5,
                found: 2
            }
        );
    }

    #[test]
    fn test_open_rejects_blank_name() {
        let fields = ["   ", "1"];
        assert_eq!(
            RecordCursor::open(&fields[..], 2).err(),
            Some(RecordError::EmptyName)
        );
    }

    #[test]
    fn test_names_split_and_drop_blanks() {
        let fields = ["Ash", "Arroyo; ;Skyline HS;"];
        let (mut cursor, _) = RecordCursor::open(&fields[..], 2).unwrap();
        let names = cursor.names(';');
        assert_eq!(names.len(), 2);
        assert_eq!(names[1].display(), "Skyline HS");
    }

    #[test]
    fn test_numbers_report_column() {
        let fields = ["Ash", "12", "soon"];
        let (mut cursor, _) = RecordCursor::open(&fields[..], 3).unwrap();
        let err = cursor.numbers(2, "transit time").unwrap_err();
        assert!(matches!(err, RecordError::InvalidNumber { column: 3, .. }));
    }
}
