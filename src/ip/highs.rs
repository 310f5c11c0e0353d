//! HiGHS backend via `good_lp`, enabled by the `highs` feature.

use super::lp::solve_with;
use super::model::IpModel;
use super::solver::{IpSolution, IpSolver};
use good_lp::solvers::highs::HighsProblem;
use good_lp::variable::UnsolvedProblem;

/// Exact 0/1 solver backed by the HiGHS MIP engine.
///
/// HiGHS adds presolve, cutting planes and primal heuristics on top of
/// branch-and-bound, which keeps pools of several hundred players
/// tractable. Both MIP gap tolerances are pinned to zero so the result is a
/// proven optimum, matching [`MicroLpSolver`](super::MicroLpSolver).
/// Building the feature compiles the HiGHS C++ sources, which needs `cmake`
/// and a C++ compiler.
#[derive(Debug, Clone, Copy, Default)]
pub struct HighsSolver {
    threads: Option<u32>,
}

impl HighsSolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Limits the worker threads HiGHS may use.
    pub fn with_threads(mut self, threads: u32) -> Self {
        self.threads = Some(threads);
        self
    }
}

impl IpSolver for HighsSolver {
    fn solve(&self, model: &IpModel) -> IpSolution {
        let threads = self.threads;
        let engine = move |problem: UnsolvedProblem| -> HighsProblem {
            let problem = good_lp::highs(problem)
                .set_option("mip_rel_gap", 0.0)
                .set_option("mip_abs_gap", 0.0);
            match threads {
                Some(n) => problem.set_threads(n),
                None => problem,
            }
        };
        solve_with(model, engine, "highs")
    }
}
