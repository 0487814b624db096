//! Team entity.

use crate::availability::WeeklyAvailability;
use crate::error::Result;
use crate::layout::RecordLayout;
use crate::name::EntityName;
use crate::ordinal::SkillRequest;
use crate::record::RecordCursor;

/// A team (school or project) that receives mentors.
#[derive(Debug, Clone)]
pub struct Team {
    name: EntityName,
    availability: WeeklyAvailability,
    team_types: Vec<bool>,
    transit_times: Vec<u32>,
    skill_requests: Vec<SkillRequest>,
}

impl Team {
    /// Creates a team with no types, no transit data and no skill requests.
    pub fn new(name: &str, availability: WeeklyAvailability) -> Self {
        Self {
            name: EntityName::new(name),
            availability,
            team_types: Vec::new(),
            transit_times: Vec::new(),
            skill_requests: Vec::new(),
        }
    }

    pub fn with_team_types(mut self, team_types: Vec<bool>) -> Self {
        self.team_types = team_types;
        self
    }

    /// Sets travel minutes per transit mode.
    pub fn with_transit_times(mut self, minutes: Vec<u32>) -> Self {
        self.transit_times = minutes;
        self
    }

    pub fn with_skill_requests(mut self, requests: Vec<SkillRequest>) -> Self {
        self.skill_requests = requests;
        self
    }

    /// Parses a team from one record.
    ///
    /// Columns, in order: name, availability, team types, transit times in
    /// minutes, skill requests.
    pub fn from_record<S: AsRef<str>>(record: &[S], layout: &RecordLayout) -> Result<Self> {
        let (mut cursor, name) = RecordCursor::open(record, layout.team_column_count())?;

        let availability = cursor.availability(layout)?;
        let team_types = cursor.flags(
            layout.team_type_count,
            &layout.team_type_yes_mark,
            &layout.team_type_no_mark,
            "team type",
        )?;
        let transit_times = cursor.numbers(layout.transit_mode_count, "transit time")?;
        let skill_requests = cursor
            .levels(
                layout.skill_count,
                &layout.skill_request_levels,
                "skill request",
            )?
            .into_iter()
            .map(SkillRequest::new)
            .collect();

        Ok(Self {
            name,
            availability,
            team_types,
            transit_times,
            skill_requests,
        })
    }

    pub fn name(&self) -> &EntityName {
        &self.name
    }

    pub fn availability(&self) -> &WeeklyAvailability {
        &self.availability
    }

    pub fn team_types(&self) -> &[bool] {
        &self.team_types
    }

    /// Travel minutes for a transit mode; unknown modes take no time.
    pub fn transit_time(&self, mode: usize) -> u32 {
        self.transit_times.get(mode).copied().unwrap_or(0)
    }

    pub fn transit_times(&self) -> &[u32] {
        &self.transit_times
    }

    pub fn skill_requests(&self) -> &[SkillRequest] {
        &self.skill_requests
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RecordError;

    fn small_layout() -> RecordLayout {
        RecordLayout {
            slots_per_day: vec![3],
            team_type_count: 2,
            transit_mode_count: 3,
            skill_count: 1,
            ..RecordLayout::default()
        }
    }

    #[test]
    fn test_from_record() {
        let layout = small_layout();
        let record = ["Pinole Valley High", "0", "1", "1", "0", "1", "15", "45", "90", "2"];
        let team = Team::from_record(&record, &layout).unwrap();

        assert_eq!(team.name().display(), "Pinole Valley High");
        assert_eq!(team.availability().day(0), &[false, true, true][..]);
        assert_eq!(team.team_types(), &[false, true]);
        assert_eq!(team.transit_times(), &[15, 45, 90]);
        assert_eq!(team.transit_time(7), 0);
        assert_eq!(team.skill_requests(), &[SkillRequest::new(3)]);
    }

    #[test]
    fn test_bad_transit_time() {
        let layout = small_layout();
        let record = ["Arroyo", "1", "1", "1", "0", "0", "15", "an hour", "90", "5"];
        let err = Team::from_record(&record, &layout).unwrap_err();
        assert_eq!(
            err,
            RecordError::InvalidNumber {
                entity: "Arroyo".to_string(),
                field: "transit time",
                column: 8,
                value: "an hour".to_string(),
            }
        );
    }

    #[test]
    fn test_bad_team_type_mark() {
        let layout = small_layout();
        let record = ["Arroyo", "1", "1", "1", "yes", "0", "15", "30", "90", "5"];
        let err = Team::from_record(&record, &layout).unwrap_err();
        assert!(matches!(
            err,
            RecordError::InvalidMark { field: "team type", column: 5, .. }
        ));
    }
}
