//! IP model definition.

use super::variables::{BinaryVar, VarId};

/// Relation between a constraint's left-hand side and its right-hand side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sense {
    /// `lhs <= rhs`
    Le,
    /// `lhs >= rhs`
    Ge,
    /// `lhs == rhs`
    Eq,
}

/// A linear constraint `sum(coef * var) <sense> rhs`.
#[derive(Debug, Clone)]
pub struct LinearConstraint {
    /// Constraint name, used in logs and diagnostics.
    pub name: String,
    /// (variable, coefficient) pairs.
    pub terms: Vec<(VarId, f64)>,
    /// Comparison sense.
    pub sense: Sense,
    /// Right-hand side constant.
    pub rhs: f64,
}

impl LinearConstraint {
    /// Left-hand side value under a 0/1 assignment.
    pub fn lhs(&self, values: &[bool]) -> f64 {
        self.terms
            .iter()
            .filter(|(id, _)| values.get(id.index()).copied().unwrap_or(false))
            .map(|&(_, coef)| coef)
            .sum()
    }

    /// Whether a 0/1 assignment satisfies this constraint (within `eps`).
    pub fn is_satisfied(&self, values: &[bool], eps: f64) -> bool {
        let lhs = self.lhs(values);
        match self.sense {
            Sense::Le => lhs <= self.rhs + eps,
            Sense::Ge => lhs >= self.rhs - eps,
            Sense::Eq => (lhs - self.rhs).abs() <= eps,
        }
    }
}

/// Objective function for the IP model.
#[derive(Debug, Clone)]
pub enum Objective {
    /// Maximize a linear combination of binary variables.
    Maximize {
        /// (variable, coefficient) pairs.
        terms: Vec<(VarId, f64)>,
    },

    /// Minimize a linear combination of binary variables.
    Minimize {
        /// (variable, coefficient) pairs.
        terms: Vec<(VarId, f64)>,
    },
}

impl Objective {
    /// The objective's (variable, coefficient) pairs.
    pub fn terms(&self) -> &[(VarId, f64)] {
        match self {
            Objective::Maximize { terms } | Objective::Minimize { terms } => terms,
        }
    }

    /// Whether this is a maximization objective.
    pub fn is_maximize(&self) -> bool {
        matches!(self, Objective::Maximize { .. })
    }
}

/// A 0/1 integer programming model.
///
/// Contains binary variables, linear constraints, and an optional
/// objective function.
///
/// # Examples
///
/// ```
/// use u_squad::ip::{IpModel, Objective};
///
/// let mut model = IpModel::new("example");
/// let a = model.add_binary("a");
/// let b = model.add_binary("b");
/// model.add_le("pick_one", vec![(a, 1.0), (b, 1.0)], 1.0);
/// model.set_objective(Objective::Maximize {
///     terms: vec![(a, 3.0), (b, 5.0)],
/// });
/// assert!(model.validate().is_ok());
/// assert_eq!(model.evaluate(&[false, true]), 5.0);
/// ```
#[derive(Debug, Clone)]
pub struct IpModel {
    /// Model name.
    pub name: String,
    variables: Vec<BinaryVar>,
    constraints: Vec<LinearConstraint>,
    objective: Option<Objective>,
}

impl IpModel {
    /// Creates a new empty model.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            variables: Vec::new(),
            constraints: Vec::new(),
            objective: None,
        }
    }

    /// Declares a binary variable and returns its handle.
    pub fn add_binary(&mut self, name: impl Into<String>) -> VarId {
        let id = VarId(self.variables.len());
        self.variables.push(BinaryVar::new(name));
        id
    }

    /// Pins a variable to a value.
    ///
    /// A fixed variable keeps its handle and appears in solutions with the
    /// pinned value, but backends never branch on it.
    pub fn fix(&mut self, id: VarId, value: bool) {
        if let Some(var) = self.variables.get_mut(id.index()) {
            var.fixed = Some(value);
        }
    }

    /// Adds a constraint.
    pub fn add_constraint(&mut self, constraint: LinearConstraint) {
        self.constraints.push(constraint);
    }

    /// Convenience: add `sum(terms) <= rhs`.
    pub fn add_le(&mut self, name: impl Into<String>, terms: Vec<(VarId, f64)>, rhs: f64) {
        self.push(name, terms, Sense::Le, rhs);
    }

    /// Convenience: add `sum(terms) >= rhs`.
    pub fn add_ge(&mut self, name: impl Into<String>, terms: Vec<(VarId, f64)>, rhs: f64) {
        self.push(name, terms, Sense::Ge, rhs);
    }

    /// Convenience: add `sum(terms) == rhs`.
    pub fn add_eq(&mut self, name: impl Into<String>, terms: Vec<(VarId, f64)>, rhs: f64) {
        self.push(name, terms, Sense::Eq, rhs);
    }

    fn push(&mut self, name: impl Into<String>, terms: Vec<(VarId, f64)>, sense: Sense, rhs: f64) {
        self.constraints.push(LinearConstraint {
            name: name.into(),
            terms,
            sense,
            rhs,
        });
    }

    /// Sets the objective function.
    pub fn set_objective(&mut self, objective: Objective) {
        self.objective = Some(objective);
    }

    /// Declared variables, indexed by [`VarId::index`].
    pub fn variables(&self) -> &[BinaryVar] {
        &self.variables
    }

    /// Declared constraints, in insertion order.
    pub fn constraints(&self) -> &[LinearConstraint] {
        &self.constraints
    }

    /// The objective function, if set.
    pub fn objective(&self) -> Option<&Objective> {
        self.objective.as_ref()
    }

    /// Validates the model for consistency.
    ///
    /// Checks that every referenced variable exists and that every
    /// coefficient and right-hand side is finite.
    pub fn validate(&self) -> Result<(), String> {
        let n = self.variables.len();
        for c in &self.constraints {
            if !c.rhs.is_finite() {
                return Err(format!("constraint {}: non-finite rhs {}", c.name, c.rhs));
            }
            for &(id, coef) in &c.terms {
                if id.index() >= n {
                    return Err(format!("constraint {}: undefined variable {id}", c.name));
                }
                if !coef.is_finite() {
                    return Err(format!(
                        "constraint {}: non-finite coefficient on {id}",
                        c.name
                    ));
                }
            }
        }
        if let Some(objective) = &self.objective {
            for &(id, coef) in objective.terms() {
                if id.index() >= n {
                    return Err(format!("objective: undefined variable {id}"));
                }
                if !coef.is_finite() {
                    return Err(format!("objective: non-finite coefficient on {id}"));
                }
            }
        }
        Ok(())
    }

    /// Objective value of a 0/1 assignment (0.0 when no objective is set).
    pub fn evaluate(&self, values: &[bool]) -> f64 {
        self.objective
            .as_ref()
            .map(|o| {
                o.terms()
                    .iter()
                    .filter(|(id, _)| values.get(id.index()).copied().unwrap_or(false))
                    .map(|&(_, coef)| coef)
                    .sum()
            })
            .unwrap_or(0.0)
    }

    /// Returns the first fixed variable whose value differs from its pin.
    pub fn first_unpinned(&self, values: &[bool]) -> Option<VarId> {
        self.variables
            .iter()
            .enumerate()
            .find(|(i, var)| {
                var.fixed
                    .is_some_and(|pin| values.get(*i).copied().unwrap_or(false) != pin)
            })
            .map(|(i, _)| VarId(i))
    }

    /// Returns the first constraint violated by a 0/1 assignment, if any.
    pub fn first_violation(&self, values: &[bool], eps: f64) -> Option<&LinearConstraint> {
        self.constraints
            .iter()
            .find(|c| !c.is_satisfied(values, eps))
    }

    /// Returns the number of variables.
    pub fn var_count(&self) -> usize {
        self.variables.len()
    }

    /// Returns the number of variables that are not fixed.
    pub fn free_var_count(&self) -> usize {
        self.variables.iter().filter(|v| v.is_free()).count()
    }

    /// Returns the number of constraints.
    pub fn constraint_count(&self) -> usize {
        self.constraints.len()
    }
}
