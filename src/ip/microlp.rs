//! `microlp` backend via `good_lp`.

use super::lp::solve_with;
use super::model::IpModel;
use super::solver::{IpSolution, IpSolver};

/// Exact 0/1 solver backed by the pure-Rust `microlp` engine.
///
/// Each free [`BinaryVar`](super::BinaryVar) becomes a binary `good_lp`
/// variable; `microlp` solves the LP relaxation with the simplex method and
/// closes the integrality gap by branch-and-bound with a zero MIP gap, so
/// the result is a global optimum or a proof of infeasibility. Needs no
/// system libraries, but branch-and-bound time grows quickly with the
/// number of free variables; see `HighsSolver` (feature `highs`) for
/// large pools.
///
/// # Examples
///
/// ```
/// use u_squad::ip::{IpModel, IpSolver, MicroLpSolver, Objective};
///
/// let mut model = IpModel::new("knapsack");
/// let a = model.add_binary("a");
/// let b = model.add_binary("b");
/// let c = model.add_binary("c");
/// model.add_le("weight", vec![(a, 3.0), (b, 4.0), (c, 2.0)], 5.0);
/// model.set_objective(Objective::Maximize {
///     terms: vec![(a, 4.0), (b, 5.0), (c, 3.0)],
/// });
///
/// let solution = MicroLpSolver::new().solve(&model);
/// assert!(solution.is_optimal());
/// assert!(solution.value(a) && solution.value(c) && !solution.value(b));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct MicroLpSolver;

impl MicroLpSolver {
    pub fn new() -> Self {
        Self
    }
}

impl IpSolver for MicroLpSolver {
    fn solve(&self, model: &IpModel) -> IpSolution {
        solve_with(model, good_lp::microlp, "microlp")
    }
}
