//! Matching parameters.
//!
//! [`ParameterFile`] is the raw document as written on disk (camelCase keys,
//! YAML or flat CSV). [`Parameters`] is the validated, read-only form every
//! later stage consumes.

mod csv_table;

use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::Path;

use mentorforge_core::{
    ComfortLevel, EntityName, Mentor, NameKey, RecordLayout, SkillConfidence, SkillRequest, Team,
    TransitConvenience,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ConfigError, ValidationError};
use crate::groups::RequiredGroups;

fn default_transit_convenience_weights() -> Vec<f64> {
    vec![0.0, 0.6, 1.0]
}

/// Parameters document as written by operators.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterFile {
    pub min_num_mentors: usize,
    pub max_num_mentors: usize,

    /// Shortest overlap, in minutes, that counts at all.
    pub min_meeting_time: u32,
    /// Weekly minutes below which a partial-overlap penalty applies.
    pub total_meeting_time: u32,

    /// Value of one minute of usable overlap.
    pub team_overlap_value: f64,
    pub no_overlap_cost: i64,
    pub partial_overlap_cost: i64,
    pub team_type_match_value: i64,
    pub team_requested_value: i64,
    pub team_required_value: i64,
    #[serde(default)]
    pub mentor_required_value: i64,

    /// Indexed `[request level][confidence level]`.
    pub skill_match_values: Vec<Vec<i64>>,
    /// Indexed by comfort level.
    pub comfort_alone_costs: Vec<i64>,
    /// Indexed by transit convenience level.
    #[serde(default = "default_transit_convenience_weights")]
    pub transit_convenience_weights: Vec<f64>,

    #[serde(default, alias = "required_mentor_groups")]
    pub required_mentor_groups: Vec<Vec<String>>,
    /// Mentor name to team name.
    #[serde(default, alias = "required_team_assignments")]
    pub required_team_assignments: BTreeMap<String, String>,

    #[serde(default)]
    pub layout: RecordLayout,
}

impl Default for ParameterFile {
    /// Zero weights sized for the default layout, one or two mentors per team.
    fn default() -> Self {
        let layout = RecordLayout::default();
        Self {
            min_num_mentors: 1,
            max_num_mentors: 2,
            min_meeting_time: 0,
            total_meeting_time: 0,
            team_overlap_value: 0.0,
            no_overlap_cost: 0,
            partial_overlap_cost: 0,
            team_type_match_value: 0,
            team_requested_value: 0,
            team_required_value: 0,
            mentor_required_value: 0,
            skill_match_values: vec![
                vec![0; layout.skill_confidence_levels.len()];
                layout.skill_request_levels.len()
            ],
            comfort_alone_costs: vec![0; layout.comfort_levels.len()],
            transit_convenience_weights: default_transit_convenience_weights(),
            required_mentor_groups: Vec::new(),
            required_team_assignments: BTreeMap::new(),
            layout,
        }
    }
}

/// Validated scoring weights, staffing bounds and relational tables.
#[derive(Debug, Clone)]
pub struct Parameters {
    file: ParameterFile,
    groups: RequiredGroups,
    pins: Vec<(EntityName, EntityName)>,
    pin_of: HashMap<NameKey, usize>,
}

impl TryFrom<ParameterFile> for Parameters {
    type Error = ConfigError;

    fn try_from(file: ParameterFile) -> Result<Self, ConfigError> {
        check_invariants(&file)?;

        let groups = RequiredGroups::new(&file.required_mentor_groups)?;

        let mut pins: Vec<(EntityName, EntityName)> = Vec::new();
        let mut pin_of: HashMap<NameKey, usize> = HashMap::new();
        for (mentor, team) in &file.required_team_assignments {
            let mentor = EntityName::new(mentor);
            let team = EntityName::new(team);
            if let Some(&existing) = pin_of.get(mentor.key()) {
                let other = &pins[existing].1;
                if other != &team {
                    return Err(ConfigError::Invalid(format!(
                        "mentor {mentor} is required on both {other} and {team}"
                    )));
                }
                continue;
            }
            pin_of.insert(mentor.key().clone(), pins.len());
            pins.push((mentor, team));
        }

        Ok(Self {
            file,
            groups,
            pins,
            pin_of,
        })
    }
}

fn check_invariants(file: &ParameterFile) -> Result<(), ConfigError> {
    let mut problems = Vec::new();
    let layout = &file.layout;

    if file.min_num_mentors > file.max_num_mentors {
        problems.push(format!(
            "minNumMentors ({}) cannot be greater than maxNumMentors ({})",
            file.min_num_mentors, file.max_num_mentors
        ));
    }
    if file.comfort_alone_costs.len() != layout.comfort_levels.len() {
        problems.push(format!(
            "comfortAloneCosts has {} entries but there are {} comfort levels",
            file.comfort_alone_costs.len(),
            layout.comfort_levels.len()
        ));
    }
    if let Some(cost) = file.comfort_alone_costs.iter().find(|&&cost| cost < 0) {
        problems.push(format!("comfortAloneCosts cannot be negative (found {cost})"));
    }
    if file.transit_convenience_weights.len() != layout.transit_convenience_levels.len() {
        problems.push(format!(
            "transitConvenienceWeights has {} entries but there are {} convenience levels",
            file.transit_convenience_weights.len(),
            layout.transit_convenience_levels.len()
        ));
    }
    if file.skill_match_values.len() != layout.skill_request_levels.len() {
        problems.push(format!(
            "skillMatchValues has {} rows but there are {} skill request levels",
            file.skill_match_values.len(),
            layout.skill_request_levels.len()
        ));
    }
    for (i, row) in file.skill_match_values.iter().enumerate() {
        if row.len() != layout.skill_confidence_levels.len() {
            problems.push(format!(
                "skillMatchValues row {} has {} entries but there are {} confidence levels",
                i + 1,
                row.len(),
                layout.skill_confidence_levels.len()
            ));
        }
    }
    if let Err(layout_problems) = layout.validate() {
        problems.extend(layout_problems);
    }

    if problems.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::Invalid(problems.join("; ")))
    }
}

impl Parameters {
    /// Loads parameters, choosing the format from the file extension.
    ///
    /// `.csv` files are read as a flat key/value table; anything else as YAML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let is_csv = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
        debug!(event = "parameters_load", path = %path.display(), csv = is_csv);
        if is_csv {
            Self::from_csv_file(path)
        } else {
            Self::from_yaml_file(path)
        }
    }

    /// Loads parameters from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses parameters from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        let file: ParameterFile = serde_yaml::from_str(s)?;
        Self::try_from(file)
    }

    /// Loads parameters from a CSV key/value file.
    pub fn from_csv_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_csv_str(&contents)
    }

    /// Parses parameters from a CSV key/value table.
    ///
    /// One key per row followed by its values. Blank rows, rows starting with
    /// `#` and empty cells are skipped. `skillMatchValues` is the matrix
    /// flattened row by row; `requiredMentorGroup` (one group per row) and
    /// `requiredTeamAssignment` (mentor, team) may repeat.
    pub fn from_csv_str(s: &str) -> Result<Self, ConfigError> {
        let value = csv_table::parse(s)?;
        let file: ParameterFile = serde_yaml::from_value(value)?;
        Self::try_from(file)
    }

    /// Folds requirements declared in mentor records into the tables.
    ///
    /// Required partners are joined into one group with the mentor; groups
    /// that become connected are merged. A single required team becomes a
    /// pin. More than one required team, or one that contradicts an existing
    /// pin, is rejected.
    pub fn with_mentor_requirements(mut self, mentors: &[Mentor]) -> Result<Self, ConfigError> {
        for mentor in mentors {
            let team = match mentor.teams_required() {
                [] => continue,
                [team] => team,
                many => {
                    let names: Vec<&str> = many.iter().map(EntityName::display).collect();
                    return Err(ConfigError::Invalid(format!(
                        "mentor {} requires more than one team: {}",
                        mentor.name(),
                        names.join(", ")
                    )));
                }
            };
            let existing = self.pin_of.get(mentor.name().key()).copied();
            match existing {
                Some(i) if &self.pins[i].1 != team => {
                    return Err(ConfigError::Invalid(format!(
                        "mentor {} requires {} but is assigned to {}",
                        mentor.name(),
                        team,
                        self.pins[i].1
                    )));
                }
                Some(_) => {}
                None => {
                    self.pin_of
                        .insert(mentor.name().key().clone(), self.pins.len());
                    self.pins.push((mentor.name().clone(), team.clone()));
                }
            }
        }

        let links = mentors.iter().flat_map(|mentor| {
            mentor
                .mentors_required()
                .iter()
                .map(move |partner| (mentor.name(), partner))
        });
        self.groups = self.groups.merged_with(links);

        debug!(
            event = "mentor_requirements_folded",
            group_count = self.groups.groups().len(),
            pin_count = self.pins.len(),
        );
        Ok(self)
    }

    /// Checks that every name in the relational tables was loaded.
    ///
    /// Collects all violations before failing.
    pub fn validate_references(
        &self,
        mentors: &[Mentor],
        teams: &[Team],
    ) -> Result<(), ValidationError> {
        let mentor_keys: HashSet<&NameKey> = mentors.iter().map(|m| m.name().key()).collect();
        let team_keys: HashSet<&NameKey> = teams.iter().map(|t| t.name().key()).collect();
        let mentor_known = |name: &EntityName| mentor_keys.contains(name.key());
        let team_known = |name: &EntityName| team_keys.contains(name.key());
        let mut violations = Vec::new();

        for (g, group) in self.groups.groups().iter().enumerate() {
            for member in group.iter().filter(|m| !mentor_known(m)) {
                violations.push(format!(
                    "required mentor group {} references unknown mentor {member}",
                    g + 1
                ));
            }
        }
        for (mentor, team) in &self.pins {
            if !mentor_known(mentor) {
                violations.push(format!(
                    "required team assignment references unknown mentor {mentor}"
                ));
            }
            if !team_known(team) {
                violations.push(format!(
                    "required team assignment for {mentor} references unknown team {team}"
                ));
            }
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(ValidationError { violations })
        }
    }

    /// The document these parameters were built from.
    pub fn file(&self) -> &ParameterFile {
        &self.file
    }

    pub fn min_num_mentors(&self) -> usize {
        self.file.min_num_mentors
    }

    pub fn max_num_mentors(&self) -> usize {
        self.file.max_num_mentors
    }

    pub fn min_meeting_time(&self) -> u32 {
        self.file.min_meeting_time
    }

    pub fn total_meeting_time(&self) -> u32 {
        self.file.total_meeting_time
    }

    pub fn team_overlap_value(&self) -> f64 {
        self.file.team_overlap_value
    }

    pub fn no_overlap_cost(&self) -> i64 {
        self.file.no_overlap_cost
    }

    pub fn partial_overlap_cost(&self) -> i64 {
        self.file.partial_overlap_cost
    }

    pub fn team_type_match_value(&self) -> i64 {
        self.file.team_type_match_value
    }

    pub fn team_requested_value(&self) -> i64 {
        self.file.team_requested_value
    }

    pub fn team_required_value(&self) -> i64 {
        self.file.team_required_value
    }

    pub fn mentor_required_value(&self) -> i64 {
        self.file.mentor_required_value
    }

    /// Value of a mentor's confidence in a skill the team asked for.
    ///
    /// Levels outside the tables score zero.
    pub fn skill_match_value(&self, request: SkillRequest, confidence: SkillConfidence) -> i64 {
        self.file
            .skill_match_values
            .get(request.level())
            .and_then(|row| row.get(confidence.level()))
            .copied()
            .unwrap_or(0)
    }

    /// Cost of a mentor at this comfort level working alone.
    pub fn comfort_alone_cost(&self, comfort: ComfortLevel) -> i64 {
        self.file
            .comfort_alone_costs
            .get(comfort.level())
            .copied()
            .unwrap_or(0)
    }

    /// Weight applied to overlap reached with a transit mode of this convenience.
    pub fn transit_convenience_weight(&self, convenience: TransitConvenience) -> f64 {
        self.file
            .transit_convenience_weights
            .get(convenience.level())
            .copied()
            .unwrap_or(0.0)
    }

    pub fn layout(&self) -> &RecordLayout {
        &self.file.layout
    }

    pub fn required_groups(&self) -> &RequiredGroups {
        &self.groups
    }

    /// Returns true if two distinct mentors must share a team.
    pub fn must_pair(&self, a: &NameKey, b: &NameKey) -> bool {
        self.groups.must_pair(a, b)
    }

    /// The team a mentor is pinned to, if any.
    pub fn required_team_for(&self, mentor: &NameKey) -> Option<&EntityName> {
        self.pin_of.get(mentor).map(|&i| &self.pins[i].1)
    }

    /// Returns true if `mentor` is pinned to `team`.
    pub fn must_assign(&self, mentor: &NameKey, team: &NameKey) -> bool {
        self.required_team_for(mentor)
            .is_some_and(|pinned| pinned.key() == team)
    }

    /// Mentor/team pins in declaration order.
    pub fn required_team_assignments(&self) -> &[(EntityName, EntityName)] {
        &self.pins
    }

    pub fn pin_count(&self) -> usize {
        self.pins.len()
    }

    pub fn required_pair_count(&self) -> usize {
        self.groups.pair_count()
    }
}
