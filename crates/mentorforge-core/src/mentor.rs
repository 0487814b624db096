//! Mentor entity.

use crate::availability::WeeklyAvailability;
use crate::error::Result;
use crate::layout::RecordLayout;
use crate::name::EntityName;
use crate::ordinal::{ComfortLevel, SkillConfidence, TransitConvenience};
use crate::record::RecordCursor;

/// A volunteer mentor.
///
/// Built once from an input record (or with the `with_*` builders in tests)
/// and never modified afterwards.
#[derive(Debug, Clone)]
pub struct Mentor {
    name: EntityName,
    availability: WeeklyAvailability,
    team_type_requests: Vec<bool>,
    teams_requested: Vec<EntityName>,
    teams_required: Vec<EntityName>,
    mentors_required: Vec<EntityName>,
    comfort_alone: ComfortLevel,
    transit_conveniences: Vec<TransitConvenience>,
    skill_confidences: Vec<SkillConfidence>,
}

impl Mentor {
    /// Creates a mentor with no preferences, least comfortable alone.
    pub fn new(name: &str, availability: WeeklyAvailability) -> Self {
        Self {
            name: EntityName::new(name),
            availability,
            team_type_requests: Vec::new(),
            teams_requested: Vec::new(),
            teams_required: Vec::new(),
            mentors_required: Vec::new(),
            comfort_alone: ComfortLevel::new(0),
            transit_conveniences: Vec::new(),
            skill_confidences: Vec::new(),
        }
    }

    pub fn with_team_type_requests(mut self, requests: Vec<bool>) -> Self {
        self.team_type_requests = requests;
        self
    }

    pub fn with_teams_requested<'a>(mut self, names: impl IntoIterator<Item = &'a str>) -> Self {
        self.teams_requested = names.into_iter().map(EntityName::new).collect();
        self
    }

    pub fn with_teams_required<'a>(mut self, names: impl IntoIterator<Item = &'a str>) -> Self {
        self.teams_required = names.into_iter().map(EntityName::new).collect();
        self
    }

    pub fn with_mentors_required<'a>(mut self, names: impl IntoIterator<Item = &'a str>) -> Self {
        self.mentors_required = names.into_iter().map(EntityName::new).collect();
        self
    }

    pub fn with_comfort_alone(mut self, comfort: ComfortLevel) -> Self {
        self.comfort_alone = comfort;
        self
    }

    pub fn with_transit_conveniences(mut self, conveniences: Vec<TransitConvenience>) -> Self {
        self.transit_conveniences = conveniences;
        self
    }

    pub fn with_skill_confidences(mut self, confidences: Vec<SkillConfidence>) -> Self {
        self.skill_confidences = confidences;
        self
    }

    /// Parses a mentor from one record.
    ///
    /// Columns, in order: name, availability, team type requests, requested
    /// teams, required teams, required mentors, comfort alone, transit
    /// conveniences, skill confidences. Trailing columns are ignored.
    pub fn from_record<S: AsRef<str>>(record: &[S], layout: &RecordLayout) -> Result<Self> {
        let (mut cursor, name) = RecordCursor::open(record, layout.mentor_column_count())?;

        let availability = cursor.availability(layout)?;
        let team_type_requests = cursor.flags(
            layout.team_type_count,
            &layout.team_type_yes_mark,
            &layout.team_type_no_mark,
            "team type",
        )?;
        let teams_requested = cursor.names(layout.multi_item_delimiter);
        let teams_required = cursor.names(layout.multi_item_delimiter);
        let mentors_required = cursor.names(layout.multi_item_delimiter);
        let comfort_alone = ComfortLevel::new(cursor.level(&layout.comfort_levels, "comfort alone")?);
        let transit_conveniences = cursor
            .levels(
                layout.transit_mode_count,
                &layout.transit_convenience_levels,
                "transit convenience",
            )?
            .into_iter()
            .filter_map(TransitConvenience::from_level)
            .collect();
        let skill_confidences = cursor
            .levels(
                layout.skill_count,
                &layout.skill_confidence_levels,
                "skill confidence",
            )?
            .into_iter()
            .map(SkillConfidence::new)
            .collect();

        Ok(Self {
            name,
            availability,
            team_type_requests,
            teams_requested,
            teams_required,
            mentors_required,
            comfort_alone,
            transit_conveniences,
            skill_confidences,
        })
    }

    pub fn name(&self) -> &EntityName {
        &self.name
    }

    pub fn availability(&self) -> &WeeklyAvailability {
        &self.availability
    }

    pub fn team_type_requests(&self) -> &[bool] {
        &self.team_type_requests
    }

    /// Teams the mentor would like to work with.
    pub fn teams_requested(&self) -> &[EntityName] {
        &self.teams_requested
    }

    /// Teams the mentor must work with.
    pub fn teams_required(&self) -> &[EntityName] {
        &self.teams_required
    }

    /// Mentors this mentor must be placed with.
    pub fn mentors_required(&self) -> &[EntityName] {
        &self.mentors_required
    }

    pub fn comfort_alone(&self) -> ComfortLevel {
        self.comfort_alone
    }

    pub fn transit_conveniences(&self) -> &[TransitConvenience] {
        &self.transit_conveniences
    }

    pub fn skill_confidences(&self) -> &[SkillConfidence] {
        &self.skill_confidences
    }

    /// Returns true if this mentor declared `other` as a required partner.
    pub fn requires_mentor(&self, other: &Mentor) -> bool {
        self.mentors_required
            .iter()
            .any(|name| name.key() == other.name.key())
    }
}
