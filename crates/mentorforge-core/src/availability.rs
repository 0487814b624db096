//! Weekly availability grids.

use crate::error::{RecordError, Result};
use crate::layout::RecordLayout;

/// Availability over a week, one boolean per slot, grouped by day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeeklyAvailability {
    days: Vec<Vec<bool>>,
}

impl WeeklyAvailability {
    /// Creates availability from per-day slot flags.
    pub fn new(days: Vec<Vec<bool>>) -> Self {
        Self { days }
    }

    /// Available in every slot of the layout.
    pub fn always(layout: &RecordLayout) -> Self {
        Self::filled(layout, true)
    }

    /// Available in no slot of the layout.
    pub fn never(layout: &RecordLayout) -> Self {
        Self::filled(layout, false)
    }

    fn filled(layout: &RecordLayout, value: bool) -> Self {
        Self {
            days: layout.slots_per_day.iter().map(|&n| vec![value; n]).collect(),
        }
    }

    /// Parses a flattened availability bitmap.
    ///
    /// `first_column` is the 0-based record position of `marks[0]`; errors
    /// report 1-based columns.
    ///
    /// # Example
    ///
    /// ```
    /// use mentorforge_core::{RecordLayout, WeeklyAvailability};
    ///
    /// let layout = RecordLayout {
    ///     slots_per_day: vec![2, 1, 1],
    ///     ..RecordLayout::default()
    /// };
    /// let availability =
    ///     WeeklyAvailability::from_marks(&["1", "0", "0", "1"], 1, "Dustox", &layout).unwrap();
    /// assert_eq!(availability.day(0), &[true, false][..]);
    /// assert_eq!(availability.day(2), &[true][..]);
    /// ```
    pub fn from_marks<S: AsRef<str>>(
        marks: &[S],
        first_column: usize,
        entity: &str,
        layout: &RecordLayout,
    ) -> Result<Self> {
        let expected = layout.total_slots();
        if marks.len() != expected {
            return Err(RecordError::WrongLength {
                entity: entity.to_string(),
                field: "availability",
                expected,
                found: marks.len(),
            });
        }

        let mut days = Vec::with_capacity(layout.slots_per_day.len());
        let mut position = 0;
        for &slot_count in &layout.slots_per_day {
            let mut day = Vec::with_capacity(slot_count);
            for mark in &marks[position..position + slot_count] {
                let mark = mark.as_ref().trim();
                let available = if mark == layout.available_mark {
                    true
                } else if mark == layout.unavailable_mark {
                    false
                } else {
                    return Err(RecordError::InvalidMark {
                        entity: entity.to_string(),
                        field: "availability",
                        column: first_column + position + day.len() + 1,
                        value: mark.to_string(),
                    });
                };
                day.push(available);
            }
            position += slot_count;
            days.push(day);
        }

        Ok(Self { days })
    }

    /// Number of days.
    pub fn day_count(&self) -> usize {
        self.days.len()
    }

    /// Slots for one day.
    pub fn day(&self, day: usize) -> &[bool] {
        &self.days[day]
    }

    /// Iterates over days.
    pub fn days(&self) -> impl Iterator<Item = &[bool]> {
        self.days.iter().map(Vec::as_slice)
    }

    /// Returns true if free in the given slot; out-of-range slots are busy.
    pub fn is_available(&self, day: usize, slot: usize) -> bool {
        self.days
            .get(day)
            .and_then(|d| d.get(slot))
            .copied()
            .unwrap_or(false)
    }

    /// Returns true if the grid matches the layout's day/slot shape.
    pub fn matches_layout(&self, layout: &RecordLayout) -> bool {
        self.days.len() == layout.slots_per_day.len()
            && self
                .days
                .iter()
                .zip(&layout.slots_per_day)
                .all(|(day, &n)| day.len() == n)
    }
}
