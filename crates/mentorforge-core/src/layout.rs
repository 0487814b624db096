//! Record layout and ordinal vocabularies.
//!
//! A [`RecordLayout`] describes how mentor and team records are laid out
//! (slot counts, marks, how many team types/transit modes/skills) and which
//! labels each ordinal column accepts. It is threaded through every parser
//! instead of living in module-level constants, and is validated once when
//! the parameters are loaded.

use serde::{Deserialize, Serialize};

/// Ordered set of labels an ordinal column accepts.
///
/// The position of a label is its level: index 0 is the lowest level.
///
/// # Example
///
/// ```
/// use mentorforge_core::Vocabulary;
///
/// let levels = Vocabulary::new(["Not at all", "Somewhat", "Very"]);
/// assert_eq!(levels.level_of("Somewhat"), Some(1));
/// assert_eq!(levels.level_of("Extremely"), None);
/// assert_eq!(levels.len(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Vocabulary(Vec<String>);

impl Vocabulary {
    /// Creates a vocabulary from labels ordered lowest to highest.
    pub fn new<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Vocabulary(labels.into_iter().map(Into::into).collect())
    }

    /// Returns the level of a label, comparing after trimming whitespace.
    pub fn level_of(&self, mark: &str) -> Option<usize> {
        let mark = mark.trim();
        self.0.iter().position(|label| label == mark)
    }

    /// Returns the label for a level.
    pub fn label(&self, level: usize) -> Option<&str> {
        self.0.get(level).map(String::as_str)
    }

    /// Number of levels.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if there are no levels.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn has_duplicates(&self) -> bool {
        self.0
            .iter()
            .enumerate()
            .any(|(i, label)| self.0[i + 1..].contains(label))
    }
}

/// Column layout of mentor and team records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RecordLayout {
    /// Minutes covered by one availability slot.
    pub minutes_per_slot: u32,
    /// Slots per day, in the order days appear in the record.
    pub slots_per_day: Vec<usize>,
    pub available_mark: String,
    pub unavailable_mark: String,

    pub team_type_count: usize,
    pub team_type_yes_mark: String,
    pub team_type_no_mark: String,

    pub transit_mode_count: usize,
    pub skill_count: usize,

    /// Separator for cells holding several names. Must not be a comma.
    pub multi_item_delimiter: char,
    pub mentor_header_rows: usize,
    pub team_header_rows: usize,

    /// Comfort mentoring alone, least to most comfortable.
    pub comfort_levels: Vocabulary,
    /// Skill confidence, least to most confident.
    pub skill_confidence_levels: Vocabulary,
    /// How much a team wants a skill, least to most.
    pub skill_request_levels: Vocabulary,
    /// Labels for not possible / inconvenient / convenient, in that order.
    pub transit_convenience_levels: Vocabulary,
}

impl Default for RecordLayout {
    fn default() -> Self {
        Self {
            minutes_per_slot: 30,
            slots_per_day: vec![24; 7],
            available_mark: "1".to_string(),
            unavailable_mark: "0".to_string(),
            team_type_count: 4,
            team_type_yes_mark: "1".to_string(),
            team_type_no_mark: "0".to_string(),
            transit_mode_count: 5,
            skill_count: 2,
            multi_item_delimiter: ';',
            mentor_header_rows: 1,
            team_header_rows: 1,
            comfort_levels: Vocabulary::new(["1", "2", "3", "4", "5"]),
            skill_confidence_levels: Vocabulary::new([
                "Not Confident",
                "Somewhat",
                "Neutral",
                "Confident",
                "Very Confident",
            ]),
            skill_request_levels: Vocabulary::new(["5", "4", "3", "2", "1"]),
            transit_convenience_levels: Vocabulary::new([
                "Not possible",
                "Inconvenient",
                "Convenient",
            ]),
        }
    }
}

impl RecordLayout {
    /// Total number of availability slots in a week.
    pub fn total_slots(&self) -> usize {
        self.slots_per_day.iter().sum()
    }

    /// Number of columns in a mentor record.
    ///
    /// Name, availability, team types, requested teams, required teams,
    /// required mentors, comfort alone, transit conveniences, skills.
    pub fn mentor_column_count(&self) -> usize {
        1 + self.total_slots() + self.team_type_count + 3 + 1 + self.transit_mode_count
            + self.skill_count
    }

    /// Number of columns in a team record.
    ///
    /// Name, availability, team types, transit times, skill requests.
    pub fn team_column_count(&self) -> usize {
        1 + self.total_slots() + self.team_type_count + self.transit_mode_count + self.skill_count
    }

    /// Checks internal consistency, returning every problem found.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut problems = Vec::new();

        if self.minutes_per_slot == 0 {
            problems.push("minutesPerSlot must be positive".to_string());
        }
        if self.slots_per_day.is_empty() {
            problems.push("slotsPerDay must list at least one day".to_string());
        }
        if self.available_mark == self.unavailable_mark {
            problems.push("availableMark and unavailableMark must differ".to_string());
        }
        if self.team_type_yes_mark == self.team_type_no_mark {
            problems.push("teamTypeYesMark and teamTypeNoMark must differ".to_string());
        }
        if self.multi_item_delimiter == ',' {
            problems.push("multiItemDelimiter cannot be a comma".to_string());
        }
        if self.transit_convenience_levels.len() != 3 {
            problems.push(format!(
                "transitConvenienceLevels must have 3 labels, found {}",
                self.transit_convenience_levels.len()
            ));
        }
        for (field, vocabulary) in [
            ("comfortLevels", &self.comfort_levels),
            ("skillConfidenceLevels", &self.skill_confidence_levels),
            ("skillRequestLevels", &self.skill_request_levels),
            ("transitConvenienceLevels", &self.transit_convenience_levels),
        ] {
            if vocabulary.is_empty() {
                problems.push(format!("{field} must not be empty"));
            } else if vocabulary.has_duplicates() {
                problems.push(format!("{field} contains duplicate labels"));
            }
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(problems)
        }
    }
}
