//! Raw record fixtures in the default layout.
//!
//! Rows mirror [`entity::mentor`](crate::entity::mentor) and
//! [`entity::team`](crate::entity::team): parsing them yields the same
//! profiles.

use mentorforge_core::RecordLayout;

/// A mentor row: available all week, first team type, no requests, least
/// comfortable alone, every transit mode convenient, neutral skills.
pub fn mentor_row(name: &str) -> Vec<String> {
    let layout = RecordLayout::default();
    let mut row = vec![name.to_string()];
    row.extend(std::iter::repeat(layout.available_mark.clone()).take(layout.total_slots()));
    row.extend(type_marks(&layout));
    row.extend([String::new(), String::new(), String::new()]);
    row.push(label(&layout.comfort_levels, 0));
    row.extend(
        std::iter::repeat(label(&layout.transit_convenience_levels, 2))
            .take(layout.transit_mode_count),
    );
    row.extend(
        std::iter::repeat(label(&layout.skill_confidence_levels, 2)).take(layout.skill_count),
    );
    row
}

/// A team row: available all week, first team type, five minutes by every
/// transit mode, lowest skill request.
pub fn team_row(name: &str) -> Vec<String> {
    let layout = RecordLayout::default();
    let mut row = vec![name.to_string()];
    row.extend(std::iter::repeat(layout.available_mark.clone()).take(layout.total_slots()));
    row.extend(type_marks(&layout));
    row.extend(std::iter::repeat("5".to_string()).take(layout.transit_mode_count));
    row.extend(
        std::iter::repeat(label(&layout.skill_request_levels, 0)).take(layout.skill_count),
    );
    row
}

/// Index of the requested-teams cell in a mentor row.
pub fn mentor_requests_column() -> usize {
    let layout = RecordLayout::default();
    1 + layout.total_slots() + layout.team_type_count
}

/// Joins rows into CSV text behind one header row. Cells must not need quoting.
pub fn csv_text(header: &str, rows: &[Vec<String>]) -> String {
    let mut text = format!("{header}\n");
    for row in rows {
        text.push_str(&row.join(","));
        text.push('\n');
    }
    text
}

fn type_marks(layout: &RecordLayout) -> impl Iterator<Item = String> + '_ {
    (0..layout.team_type_count).map(|i| {
        if i == 0 {
            layout.team_type_yes_mark.clone()
        } else {
            layout.team_type_no_mark.clone()
        }
    })
}

fn label(vocabulary: &mentorforge_core::Vocabulary, level: usize) -> String {
    vocabulary.label(level).unwrap_or_default().to_string()
}
