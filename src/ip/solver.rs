//! IP solver interface.

use super::model::IpModel;
use super::variables::VarId;

/// Status of the solver after execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolverStatus {
    /// Proven optimal solution found.
    Optimal,
    /// No feasible solution exists.
    Infeasible,
    /// Objective is unbounded over the feasible region.
    Unbounded,
    /// Model is invalid or malformed.
    ModelInvalid,
    /// No solution found for unknown reasons.
    Unknown,
}

/// Solution from an IP solver.
#[derive(Debug, Clone)]
pub struct IpSolution {
    /// Solver status.
    pub status: SolverStatus,
    /// Objective function value (if a solution was found).
    pub objective_value: Option<f64>,
    /// Variable assignments, indexed by [`VarId::index`].
    ///
    /// Empty unless `status` is [`SolverStatus::Optimal`].
    pub values: Vec<bool>,
    /// Solve time in milliseconds.
    pub solve_time_ms: i64,
}

impl IpSolution {
    /// Creates an empty solution with the given status.
    pub fn empty(status: SolverStatus) -> Self {
        Self {
            status,
            objective_value: None,
            values: Vec::new(),
            solve_time_ms: 0,
        }
    }

    /// Whether a proven optimum was found.
    pub fn is_optimal(&self) -> bool {
        self.status == SolverStatus::Optimal
    }

    /// Value of a variable; unassigned variables read as `false`.
    pub fn value(&self, id: VarId) -> bool {
        self.values.get(id.index()).copied().unwrap_or(false)
    }
}

/// Trait for exact 0/1 IP solver implementations.
///
/// Implementors must return either a global optimum
/// ([`SolverStatus::Optimal`] with one value per model variable) or a
/// non-optimal status with no assignment. Heuristic engines that may stop
/// at a near-optimal point do not conform.
pub trait IpSolver {
    /// Solves the model and returns a solution.
    fn solve(&self, model: &IpModel) -> IpSolution;
}
