//! Solver status types.

/// Outcome of the most recent solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SolverStatus {
    /// Nothing solved yet.
    #[default]
    NotSolved,
    /// Optimal solution found.
    Optimal,
    /// Problem is infeasible.
    Infeasible,
    /// Problem is unbounded.
    Unbounded,
    /// Time limit hit (may have a feasible solution).
    ReachedTimeLimit,
    /// Node limit hit (may have a feasible solution).
    ReachedNodeLimit,
}

impl SolverStatus {
    pub fn is_optimal(self) -> bool {
        matches!(self, SolverStatus::Optimal)
    }

    /// Whether a solution may be available: optimal or stopped at a limit.
    pub fn may_have_solution(self) -> bool {
        matches!(
            self,
            SolverStatus::Optimal | SolverStatus::ReachedTimeLimit | SolverStatus::ReachedNodeLimit
        )
    }

    pub fn is_infeasible(self) -> bool {
        matches!(self, SolverStatus::Infeasible)
    }

    /// Whether the search stopped before proving its answer.
    pub fn is_limit(self) -> bool {
        matches!(
            self,
            SolverStatus::ReachedTimeLimit | SolverStatus::ReachedNodeLimit
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SolverStatus::NotSolved => "not_solved",
            SolverStatus::Optimal => "optimal",
            SolverStatus::Infeasible => "infeasible",
            SolverStatus::Unbounded => "unbounded",
            SolverStatus::ReachedTimeLimit => "time_limit",
            SolverStatus::ReachedNodeLimit => "node_limit",
        }
    }
}

impl std::fmt::Display for SolverStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
