//! Compatibility scores between mentors and teams.

use mentorforge_config::Parameters;
use mentorforge_core::{Mentor, Team};

use crate::overlap::{usable_overlap_minutes, OverlapRules};

/// Per-component view of one mentor/team score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompatibilityBreakdown {
    /// Best overlap value over all transit modes.
    pub overlap: i64,
    /// Transit mode that produced `overlap`, if any beat the no-overlap baseline.
    pub transit_mode: Option<usize>,
    pub team_type: i64,
    pub request: i64,
    /// Skill fit; reported only, not part of [`total`](Self::total).
    pub skill: i64,
    /// What the mentor pays for being the only mentor on the team.
    pub alone_cost: i64,
}

impl CompatibilityBreakdown {
    /// The pairwise compatibility score.
    pub fn total(&self) -> i64 {
        self.overlap + self.team_type + self.request
    }
}

/// Turns mentors and teams into integer scores under one set of parameters.
///
/// Scoring is pure: the same inputs always produce the same score, and no
/// well-formed entity makes it fail.
#[derive(Debug, Clone, Copy)]
pub struct CompatibilityScorer<'a> {
    parameters: &'a Parameters,
}

impl<'a> CompatibilityScorer<'a> {
    pub fn new(parameters: &'a Parameters) -> Self {
        Self { parameters }
    }

    pub fn parameters(&self) -> &'a Parameters {
        self.parameters
    }

    /// Usable overlap in minutes when travelling by `mode`.
    pub fn overlap_minutes(&self, mentor: &Mentor, team: &Team, mode: usize) -> i64 {
        let rules = OverlapRules {
            minutes_per_slot: self.parameters.layout().minutes_per_slot,
            transit_minutes: team.transit_time(mode),
            min_meeting_minutes: self.parameters.min_meeting_time(),
        };
        usable_overlap_minutes(mentor.availability(), team.availability(), rules)
    }

    /// Value of the overlap reachable by `mode`.
    ///
    /// Returns the negated no-overlap cost when the mode is not possible for
    /// the mentor or nothing overlaps; otherwise minutes times the per-minute
    /// value times the convenience weight, less the partial-overlap cost if
    /// the total falls short of the weekly target.
    pub fn overlap_value(&self, mentor: &Mentor, team: &Team, mode: usize) -> i64 {
        let p = self.parameters;
        let weight = mentor
            .transit_conveniences()
            .get(mode)
            .map_or(0.0, |&c| p.transit_convenience_weight(c));
        let minutes = self.overlap_minutes(mentor, team, mode);

        if weight == 0.0 || minutes == 0 {
            return -p.no_overlap_cost();
        }
        let mut value = minutes as f64 * p.team_overlap_value() * weight;
        if minutes < i64::from(p.total_meeting_time()) {
            value -= p.partial_overlap_cost() as f64;
        }
        value.round() as i64
    }

    /// Best overlap value over all transit modes, with the mode that gave it.
    ///
    /// Starts from the no-overlap baseline; a mode must beat it strictly.
    pub fn best_overlap(&self, mentor: &Mentor, team: &Team) -> (i64, Option<usize>) {
        let mut best = (-self.parameters.no_overlap_cost(), None);
        for mode in 0..mentor.transit_conveniences().len() {
            let value = self.overlap_value(mentor, team, mode);
            if value > best.0 {
                best = (value, Some(mode));
            }
        }
        best
    }

    pub fn best_overlap_value(&self, mentor: &Mentor, team: &Team) -> i64 {
        self.best_overlap(mentor, team).0
    }

    /// Flat bonus if any team type is wanted by the mentor and held by the team.
    pub fn team_type_value(&self, mentor: &Mentor, team: &Team) -> i64 {
        let matched = mentor
            .team_type_requests()
            .iter()
            .zip(team.team_types())
            .any(|(&wanted, &held)| wanted && held);
        if matched {
            self.parameters.team_type_match_value()
        } else {
            0
        }
    }

    /// Bonus for a pinned team, or a smaller one for a requested team.
    pub fn request_value(&self, mentor: &Mentor, team: &Team) -> i64 {
        let p = self.parameters;
        if p.must_assign(mentor.name().key(), team.name().key()) {
            p.team_required_value()
        } else if mentor
            .teams_requested()
            .iter()
            .any(|requested| requested == team.name())
        {
            p.team_requested_value()
        } else {
            0
        }
    }

    /// Pairwise compatibility: best overlap + team type value + request value.
    pub fn compatibility(&self, mentor: &Mentor, team: &Team) -> i64 {
        self.best_overlap_value(mentor, team)
            + self.team_type_value(mentor, team)
            + self.request_value(mentor, team)
    }

    pub fn alone_cost(&self, mentor: &Mentor) -> i64 {
        self.parameters.comfort_alone_cost(mentor.comfort_alone())
    }

    /// Objective weight of the mentor being the team's only mentor.
    pub fn solo_weight(&self, mentor: &Mentor, team: &Team) -> i64 {
        self.compatibility(mentor, team) - self.alone_cost(mentor)
    }

    /// Objective weight of the mentor sharing the team with others.
    pub fn group_weight(&self, mentor: &Mentor, team: &Team) -> i64 {
        self.compatibility(mentor, team)
    }

    /// Skill fit of one mentor for a team, summed over skills.
    pub fn skill_value(&self, mentor: &Mentor, team: &Team) -> i64 {
        team.skill_requests()
            .iter()
            .zip(mentor.skill_confidences())
            .map(|(&request, &confidence)| self.parameters.skill_match_value(request, confidence))
            .sum()
    }

    /// Bonus for two mentors sharing a team.
    ///
    /// Sums the required-partner value for each direction in which a
    /// requirement exists (a shared required group counts both ways), the
    /// better of the two mentors' skill values per skill, and both alone
    /// costs, which neither pays when paired.
    pub fn group_bonus(&self, first: &Mentor, second: &Mentor, team: &Team) -> i64 {
        let p = self.parameters;
        let grouped = p.must_pair(first.name().key(), second.name().key());
        let directions = [
            grouped || first.requires_mentor(second),
            grouped || second.requires_mentor(first),
        ];
        let request: i64 = directions
            .iter()
            .filter(|&&declared| declared)
            .map(|_| p.mentor_required_value())
            .sum();

        let skills: i64 = team
            .skill_requests()
            .iter()
            .zip(first.skill_confidences())
            .zip(second.skill_confidences())
            .map(|((&request, &a), &b)| {
                p.skill_match_value(request, a)
                    .max(p.skill_match_value(request, b))
            })
            .sum();

        request + skills + self.alone_cost(first) + self.alone_cost(second)
    }

    /// Every component of the mentor/team score.
    pub fn breakdown(&self, mentor: &Mentor, team: &Team) -> CompatibilityBreakdown {
        let (overlap, transit_mode) = self.best_overlap(mentor, team);
        CompatibilityBreakdown {
            overlap,
            transit_mode,
            team_type: self.team_type_value(mentor, team),
            request: self.request_value(mentor, team),
            skill: self.skill_value(mentor, team),
            alone_cost: self.alone_cost(mentor),
        }
    }
}
