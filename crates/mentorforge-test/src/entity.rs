//! Mentor and team fixtures.
//!
//! Fixtures use the default [`RecordLayout`]: available all week, first team
//! type only, every transit mode convenient (mentor) or five minutes away
//! (team), neutral skill confidence, lowest skill request.
//!
//! # Example
//!
//! ```
//! use mentorforge_test::entity::{mentor, team};
//!
//! let ash = mentor("Ash").with_teams_requested(["Pallet"]);
//! let pallet = team("Pallet");
//! assert!(ash.teams_requested()[0].matches("pallet"));
//! assert!(pallet.availability().is_available(3, 10));
//! ```

use mentorforge_core::{
    ComfortLevel, Mentor, RecordLayout, SkillConfidence, SkillRequest, Team, TransitConvenience,
    WeeklyAvailability,
};

/// Creates a mentor with the default fixture profile.
pub fn mentor(name: &str) -> Mentor {
    let layout = RecordLayout::default();
    Mentor::new(name, WeeklyAvailability::always(&layout))
        .with_team_type_requests(first_type_only(&layout))
        .with_comfort_alone(ComfortLevel::new(0))
        .with_transit_conveniences(vec![
            TransitConvenience::Convenient;
            layout.transit_mode_count
        ])
        .with_skill_confidences(vec![SkillConfidence::new(2); layout.skill_count])
}

/// Creates a team with the default fixture profile.
pub fn team(name: &str) -> Team {
    let layout = RecordLayout::default();
    Team::new(name, WeeklyAvailability::always(&layout))
        .with_team_types(first_type_only(&layout))
        .with_transit_times(vec![5; layout.transit_mode_count])
        .with_skill_requests(vec![SkillRequest::new(0); layout.skill_count])
}

/// Availability in the default layout, free only in the given slot ranges.
///
/// Each window is `(day, first_slot, end_slot)` with `end_slot` exclusive.
pub fn available_during(windows: &[(usize, usize, usize)]) -> WeeklyAvailability {
    let layout = RecordLayout::default();
    let mut days: Vec<Vec<bool>> = layout
        .slots_per_day
        .iter()
        .map(|&n| vec![false; n])
        .collect();
    for &(day, start, end) in windows {
        for slot in &mut days[day][start..end] {
            *slot = true;
        }
    }
    WeeklyAvailability::new(days)
}

fn first_type_only(layout: &RecordLayout) -> Vec<bool> {
    (0..layout.team_type_count).map(|i| i == 0).collect()
}
