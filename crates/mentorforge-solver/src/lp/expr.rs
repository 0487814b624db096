//! Linear expressions and constraints over boolean variables.

use std::fmt;

/// Handle to a variable registered with a [`ConstraintSolver`](super::ConstraintSolver).
///
/// Handles are dense: the n-th variable added gets index n.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VarId(usize);

impl VarId {
    pub(crate) fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for VarId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "x{}", self.0)
    }
}

/// `Σ coefficient·variable + constant`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LinearExpr {
    terms: Vec<(VarId, f64)>,
    constant: f64,
}

impl LinearExpr {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sum of `vars`, each with coefficient one.
    pub fn sum(vars: impl IntoIterator<Item = VarId>) -> Self {
        let mut expr = Self::new();
        for var in vars {
            expr.add_term(var, 1.0);
        }
        expr
    }

    pub fn add_term(&mut self, var: VarId, coefficient: f64) -> &mut Self {
        self.terms.push((var, coefficient));
        self
    }

    pub fn with_term(mut self, var: VarId, coefficient: f64) -> Self {
        self.add_term(var, coefficient);
        self
    }

    /// Adds `coefficient` times every variable of `vars`.
    pub fn add_all(&mut self, vars: impl IntoIterator<Item = VarId>, coefficient: f64) -> &mut Self {
        for var in vars {
            self.add_term(var, coefficient);
        }
        self
    }

    pub fn add_constant(&mut self, constant: f64) -> &mut Self {
        self.constant += constant;
        self
    }

    pub fn terms(&self) -> &[(VarId, f64)] {
        &self.terms
    }

    pub fn constant(&self) -> f64 {
        self.constant
    }

    /// Value of the expression under `value_of`.
    pub fn evaluate(&self, mut value_of: impl FnMut(VarId) -> f64) -> f64 {
        self.terms
            .iter()
            .map(|&(var, coefficient)| coefficient * value_of(var))
            .sum::<f64>()
            + self.constant
    }

    /// Merges repeated variables and drops zero coefficients, keeping first-seen order.
    pub fn normalized(&self) -> Self {
        let mut terms: Vec<(VarId, f64)> = Vec::with_capacity(self.terms.len());
        for &(var, coefficient) in &self.terms {
            match terms.iter_mut().find(|(seen, _)| *seen == var) {
                Some((_, total)) => *total += coefficient,
                None => terms.push((var, coefficient)),
            }
        }
        terms.retain(|&(_, coefficient)| coefficient != 0.0);
        Self {
            terms,
            constant: self.constant,
        }
    }
}

/// Comparison between a constraint's expression and its right-hand side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sense {
    LessOrEqual,
    GreaterOrEqual,
    Equal,
}

impl Sense {
    pub fn as_str(self) -> &'static str {
        match self {
            Sense::LessOrEqual => "<=",
            Sense::GreaterOrEqual => ">=",
            Sense::Equal => "=",
        }
    }
}

impl fmt::Display for Sense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named linear constraint `expr (sense) rhs`.
///
/// The expression's constant is folded into the right-hand side on
/// construction.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearConstraint {
    name: String,
    expr: LinearExpr,
    sense: Sense,
    rhs: f64,
}

impl LinearConstraint {
    pub fn new(name: impl Into<String>, expr: LinearExpr, sense: Sense, rhs: f64) -> Self {
        let mut expr = expr.normalized();
        let rhs = rhs - expr.constant;
        expr.constant = 0.0;
        Self {
            name: name.into(),
            expr,
            sense,
            rhs,
        }
    }

    pub fn less_or_equal(name: impl Into<String>, expr: LinearExpr, rhs: f64) -> Self {
        Self::new(name, expr, Sense::LessOrEqual, rhs)
    }

    pub fn greater_or_equal(name: impl Into<String>, expr: LinearExpr, rhs: f64) -> Self {
        Self::new(name, expr, Sense::GreaterOrEqual, rhs)
    }

    pub fn equal(name: impl Into<String>, expr: LinearExpr, rhs: f64) -> Self {
        Self::new(name, expr, Sense::Equal, rhs)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn expr(&self) -> &LinearExpr {
        &self.expr
    }

    pub fn sense(&self) -> Sense {
        self.sense
    }

    pub fn rhs(&self) -> f64 {
        self.rhs
    }

    /// Whether `value_of` satisfies the constraint within `tolerance`.
    pub fn is_satisfied(&self, value_of: impl FnMut(VarId) -> f64, tolerance: f64) -> bool {
        let lhs = self.expr.evaluate(value_of);
        match self.sense {
            Sense::LessOrEqual => lhs <= self.rhs + tolerance,
            Sense::GreaterOrEqual => lhs >= self.rhs - tolerance,
            Sense::Equal => (lhs - self.rhs).abs() <= tolerance,
        }
    }
}

impl fmt::Display for LinearConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: ", self.name)?;
        if self.expr.terms.is_empty() {
            f.write_str("0")?;
        }
        for (i, (var, coefficient)) in self.expr.terms.iter().enumerate() {
            if i > 0 {
                f.write_str(" + ")?;
            }
            write!(f, "{coefficient}·{var}")?;
        }
        write!(f, " {} {}", self.sense, self.rhs)
    }
}
