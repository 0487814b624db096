//! Decision variables of the assignment problem.

use std::collections::HashMap;
use std::fmt;

use mentorforge_core::{Mentor, Team};

use crate::lp::{ConstraintSolver, VarId};

/// How a mentor is placed on a team.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AssignmentKind {
    /// The mentor is the team's only mentor.
    Solo,
    /// The mentor shares the team with at least one other mentor.
    Group,
}

impl AssignmentKind {
    pub const ALL: [AssignmentKind; 2] = [AssignmentKind::Solo, AssignmentKind::Group];

    fn slot(self) -> usize {
        match self {
            AssignmentKind::Solo => 0,
            AssignmentKind::Group => 1,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AssignmentKind::Solo => "solo",
            AssignmentKind::Group => "group",
        }
    }
}

impl fmt::Display for AssignmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What one variable stands for. Mentor and team are input-order indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Assignment {
    pub kind: AssignmentKind,
    pub mentor: usize,
    pub team: usize,
}

/// One Solo and one Group boolean per (mentor, team) pair.
///
/// Variables live in a fixed table indexed by (kind, mentor, team), created
/// once in kind, mentor, team order. Every lookup is O(1).
#[derive(Debug, Clone)]
pub struct AssignmentModel {
    mentor_count: usize,
    team_count: usize,
    table: Vec<VarId>,
    by_var: HashMap<VarId, Assignment>,
}

impl AssignmentModel {
    /// Registers `2 × mentors × teams` variables with `solver`.
    pub fn new<S: ConstraintSolver + ?Sized>(solver: &mut S, mentors: &[Mentor], teams: &[Team]) -> Self {
        let capacity = AssignmentKind::ALL.len() * mentors.len() * teams.len();
        let mut table = Vec::with_capacity(capacity);
        let mut by_var = HashMap::with_capacity(capacity);

        for kind in AssignmentKind::ALL {
            for (m, mentor) in mentors.iter().enumerate() {
                for (t, team) in teams.iter().enumerate() {
                    let name = format!("{kind}[{},{}]", mentor.name(), team.name());
                    let var = solver.add_bool_var(&name);
                    table.push(var);
                    by_var.insert(
                        var,
                        Assignment {
                            kind,
                            mentor: m,
                            team: t,
                        },
                    );
                }
            }
        }

        Self {
            mentor_count: mentors.len(),
            team_count: teams.len(),
            table,
            by_var,
        }
    }

    pub fn mentor_count(&self) -> usize {
        self.mentor_count
    }

    pub fn team_count(&self) -> usize {
        self.team_count
    }

    pub fn variable_count(&self) -> usize {
        self.table.len()
    }

    /// The variable for `kind`, `mentor` and `team`.
    ///
    /// # Panics
    ///
    /// Panics if `mentor` or `team` is out of range.
    pub fn var(&self, kind: AssignmentKind, mentor: usize, team: usize) -> VarId {
        assert!(mentor < self.mentor_count && team < self.team_count);
        self.table[(kind.slot() * self.mentor_count + mentor) * self.team_count + team]
    }

    /// Every variable of one kind.
    pub fn by_kind(&self, kind: AssignmentKind) -> &[VarId] {
        let size = self.mentor_count * self.team_count;
        &self.table[kind.slot() * size..(kind.slot() + 1) * size]
    }

    /// One mentor's variables of `kind`, in team order.
    pub fn by_mentor(&self, kind: AssignmentKind, mentor: usize) -> &[VarId] {
        let start = (kind.slot() * self.mentor_count + mentor) * self.team_count;
        &self.table[start..start + self.team_count]
    }

    /// One team's variables of `kind`, in mentor order.
    pub fn by_team(&self, kind: AssignmentKind, team: usize) -> impl Iterator<Item = VarId> + '_ {
        (0..self.mentor_count).map(move |mentor| self.var(kind, mentor, team))
    }

    /// Reverse lookup.
    pub fn assignment(&self, var: VarId) -> Option<Assignment> {
        self.by_var.get(&var).copied()
    }

    /// Every variable with what it stands for, in table order.
    pub fn iter(&self) -> impl Iterator<Item = (VarId, Assignment)> + '_ {
        self.table.iter().filter_map(|&var| Some((var, self.assignment(var)?)))
    }
}
