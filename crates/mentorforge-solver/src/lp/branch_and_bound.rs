//! Exact depth-first branch-and-bound over boolean variables.
//!
//! The search fixes one variable per level and keeps, for every constraint,
//! its activity over fixed variables plus the least and greatest amount the
//! free variables can still add. A branch dies as soon as one of the
//! constraints it touched can no longer be satisfied.
//!
//! # Bounding
//!
//! Equality rows of the form `Σ x = 1` with unit coefficients and no
//! variable shared with an earlier such row are *choose-one groups*. Their
//! members are branched on together, best objective coefficient first. The
//! optimistic bound of a node is the current objective plus, per open group,
//! the best coefficient still free in it, plus every positive coefficient of
//! the remaining ungrouped variables. If this optimistic bound is not better
//! than the best complete solution found so far, the branch is pruned.

use std::time::{Duration, Instant};

use tracing::debug;

use super::error::Result;
use super::expr::Sense;
use super::program::{LinearProgram, Solution};
use super::solver::ConstraintSolver;
use super::status::SolverStatus;

const EPSILON: f64 = 1e-9;

/// Nodes between two clock reads.
const TIME_CHECK_INTERVAL: u64 = 1024;

/// Wall-clock limit of a search configured with defaults.
pub const DEFAULT_TIME_LIMIT: Duration = Duration::from_secs(60);

/// Limits for a branch-and-bound search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BranchAndBoundConfig {
    /// Wall-clock limit (None = unlimited).
    pub time_limit: Option<Duration>,
    /// Maximum number of nodes to explore (None = unlimited).
    pub node_limit: Option<u64>,
}

impl Default for BranchAndBoundConfig {
    fn default() -> Self {
        Self {
            time_limit: Some(DEFAULT_TIME_LIMIT),
            node_limit: None,
        }
    }
}

/// Native exact backend for small instances.
///
/// Proves optimality when no limit is hit. The search stops after
/// [`DEFAULT_TIME_LIMIT`] unless configured otherwise. When a limit stops the search,
/// the best solution found so far is kept and the status says which limit
/// was reached.
#[derive(Debug, Clone, Default)]
pub struct BranchAndBoundSolver {
    program: LinearProgram,
    config: BranchAndBoundConfig,
    status: SolverStatus,
    solution: Option<Solution>,
    nodes_explored: u64,
}

impl BranchAndBoundSolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: BranchAndBoundConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.config.time_limit = Some(limit);
        self
    }

    pub fn with_node_limit(mut self, limit: u64) -> Self {
        self.config.node_limit = Some(limit);
        self
    }

    pub fn config(&self) -> &BranchAndBoundConfig {
        &self.config
    }

    /// Nodes visited by the most recent solve.
    pub fn nodes_explored(&self) -> u64 {
        self.nodes_explored
    }
}

impl ConstraintSolver for BranchAndBoundSolver {
    fn name(&self) -> &'static str {
        "branch_and_bound"
    }

    fn program(&self) -> &LinearProgram {
        &self.program
    }

    fn program_mut(&mut self) -> &mut LinearProgram {
        &mut self.program
    }

    fn solve(&mut self) -> Result<SolverStatus> {
        self.program.check()?;
        let start = Instant::now();

        let mut search = Search::new(&self.program, self.config, start);
        search.run();

        let status = search.status();
        let constant = self.program.objective().constant();
        self.nodes_explored = search.nodes;
        self.solution = search
            .best
            .map(|(value, values)| Solution::new(values, value + constant));
        self.status = status;

        debug!(
            event = "branch_and_bound_end",
            status = %status,
            nodes = self.nodes_explored,
            elapsed_ms = start.elapsed().as_millis() as u64,
        );
        Ok(status)
    }

    fn status(&self) -> SolverStatus {
        self.status
    }

    fn solution(&self) -> Option<&Solution> {
        self.solution.as_ref()
    }
}

/// Running state of one constraint.
#[derive(Debug, Clone, Copy)]
struct Row {
    sense: Sense,
    rhs: f64,
    /// Contribution of fixed variables.
    activity: f64,
    /// Sum of negative coefficients over free variables.
    free_min: f64,
    /// Sum of positive coefficients over free variables.
    free_max: f64,
}

impl Row {
    fn can_hold(&self) -> bool {
        let low = self.activity + self.free_min;
        let high = self.activity + self.free_max;
        match self.sense {
            Sense::LessOrEqual => low <= self.rhs + EPSILON,
            Sense::GreaterOrEqual => high >= self.rhs - EPSILON,
            Sense::Equal => low <= self.rhs + EPSILON && high >= self.rhs - EPSILON,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Group {
    row: usize,
    /// First position after the group in the branching order.
    end: usize,
}

struct Search {
    /// Variable index at each depth.
    order: Vec<usize>,
    /// Group of the variable at each depth.
    group_at: Vec<Option<usize>>,
    groups: Vec<Group>,
    /// Optimistic gain of everything from a depth on, groups counted at their start.
    suffix_bound: Vec<f64>,
    objective: Vec<f64>,
    uses: Vec<Vec<(usize, f64)>>,
    rows: Vec<Row>,
    values: Vec<f64>,
    current: f64,
    best: Option<(f64, Vec<f64>)>,
    nodes: u64,
    stopped: Option<SolverStatus>,
    config: BranchAndBoundConfig,
    start: Instant,
}

impl Search {
    fn new(program: &LinearProgram, config: BranchAndBoundConfig, start: Instant) -> Self {
        let n = program.variable_count();

        let mut objective = vec![0.0; n];
        for &(var, coefficient) in program.objective().terms() {
            objective[var.index()] += coefficient;
        }

        let mut uses: Vec<Vec<(usize, f64)>> = vec![Vec::new(); n];
        let mut rows = Vec::with_capacity(program.constraints().len());
        for (r, constraint) in program.constraints().iter().enumerate() {
            let mut row = Row {
                sense: constraint.sense(),
                rhs: constraint.rhs(),
                activity: 0.0,
                free_min: 0.0,
                free_max: 0.0,
            };
            for &(var, coefficient) in constraint.expr().terms() {
                uses[var.index()].push((r, coefficient));
                if coefficient > 0.0 {
                    row.free_max += coefficient;
                } else {
                    row.free_min += coefficient;
                }
            }
            rows.push(row);
        }

        // Choose-one groups, members best first.
        let mut grouped = vec![false; n];
        let mut order = Vec::with_capacity(n);
        let mut group_at = Vec::with_capacity(n);
        let mut groups = Vec::new();
        for (r, constraint) in program.constraints().iter().enumerate() {
            let terms = constraint.expr().terms();
            let choose_one = constraint.sense() == Sense::Equal
                && (constraint.rhs() - 1.0).abs() <= EPSILON
                && !terms.is_empty()
                && terms
                    .iter()
                    .all(|&(var, c)| c == 1.0 && !grouped[var.index()]);
            if !choose_one {
                continue;
            }
            let mut members: Vec<usize> = terms.iter().map(|(var, _)| var.index()).collect();
            members.sort_by(|&a, &b| objective[b].total_cmp(&objective[a]).then(a.cmp(&b)));
            for &m in &members {
                grouped[m] = true;
            }
            let g = groups.len();
            order.extend(&members);
            group_at.extend(std::iter::repeat(Some(g)).take(members.len()));
            groups.push(Group {
                row: r,
                end: order.len(),
            });
        }
        for var in (0..n).filter(|&v| !grouped[v]) {
            order.push(var);
            group_at.push(None);
        }

        let mut suffix_bound = vec![0.0; n + 1];
        for depth in (0..n).rev() {
            let gain = match group_at[depth] {
                None => objective[order[depth]].max(0.0),
                Some(g) if depth == 0 || group_at[depth - 1] != Some(g) => objective[order[depth]],
                Some(_) => 0.0,
            };
            suffix_bound[depth] = suffix_bound[depth + 1] + gain;
        }

        Self {
            order,
            group_at,
            groups,
            suffix_bound,
            objective,
            uses,
            rows,
            values: vec![0.0; n],
            current: 0.0,
            best: None,
            nodes: 0,
            stopped: None,
            config,
            start,
        }
    }

    fn run(&mut self) {
        if self.rows.iter().all(Row::can_hold) {
            self.dfs(0);
        }
    }

    fn status(&self) -> SolverStatus {
        match (self.stopped, &self.best) {
            (Some(limit), _) => limit,
            (None, Some(_)) => SolverStatus::Optimal,
            (None, None) => SolverStatus::Infeasible,
        }
    }

    fn dfs(&mut self, depth: usize) {
        if self.limit_reached() {
            return;
        }
        self.nodes += 1;

        if depth == self.order.len() {
            if self
                .best
                .as_ref()
                .map_or(true, |(best, _)| self.current > best + EPSILON)
            {
                self.best = Some((self.current, self.values.clone()));
            }
            return;
        }

        if let Some((best, _)) = &self.best {
            if self.optimistic_bound(depth) <= best + EPSILON {
                return;
            }
        }

        let var = self.order[depth];
        for &value in self.value_order(depth) {
            if self.fix(var, value) {
                self.dfs(depth + 1);
            }
            self.unfix(var, value);
            if self.stopped.is_some() {
                return;
            }
        }
    }

    fn limit_reached(&mut self) -> bool {
        if self.stopped.is_some() {
            return true;
        }
        if self
            .config
            .node_limit
            .is_some_and(|limit| self.nodes >= limit)
        {
            self.stopped = Some(SolverStatus::ReachedNodeLimit);
        } else if self.nodes % TIME_CHECK_INTERVAL == 0
            && self
                .config
                .time_limit
                .is_some_and(|limit| self.start.elapsed() >= limit)
        {
            self.stopped = Some(SolverStatus::ReachedTimeLimit);
        }
        self.stopped.is_some()
    }

    fn optimistic_bound(&self, depth: usize) -> f64 {
        match self.group_at[depth] {
            None => self.current + self.suffix_bound[depth],
            Some(g) => {
                let group = self.groups[g];
                let open = self.rows[group.row].activity < 0.5;
                let here = if open {
                    self.objective[self.order[depth]]
                } else {
                    0.0
                };
                self.current + here + self.suffix_bound[group.end]
            }
        }
    }

    fn value_order(&self, depth: usize) -> &'static [f64] {
        let var = self.order[depth];
        match self.group_at[depth] {
            Some(g) if self.rows[self.groups[g].row].activity >= 0.5 => &[0.0],
            Some(_) => &[1.0, 0.0],
            None if self.objective[var] > 0.0 => &[1.0, 0.0],
            None => &[0.0, 1.0],
        }
    }

    /// Fixes `var` and reports whether every row it touches can still hold.
    fn fix(&mut self, var: usize, value: f64) -> bool {
        self.values[var] = value;
        self.current += self.objective[var] * value;
        let mut feasible = true;
        for &(r, coefficient) in &self.uses[var] {
            let row = &mut self.rows[r];
            row.activity += coefficient * value;
            if coefficient > 0.0 {
                row.free_max -= coefficient;
            } else {
                row.free_min -= coefficient;
            }
            feasible &= row.can_hold();
        }
        feasible
    }

    fn unfix(&mut self, var: usize, value: f64) {
        self.values[var] = 0.0;
        self.current -= self.objective[var] * value;
        for &(r, coefficient) in &self.uses[var] {
            let row = &mut self.rows[r];
            row.activity -= coefficient * value;
            if coefficient > 0.0 {
                row.free_max += coefficient;
            } else {
                row.free_min += coefficient;
            }
        }
    }
}

#[cfg(test)]
mod tests;
