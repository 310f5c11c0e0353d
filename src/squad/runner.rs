//! End-to-end squad selection: prepare, build, solve, assemble.

use super::assemble::{assemble, verify, SquadSelection};
use super::builder::SquadModel;
use super::config::SquadConfig;
use super::prepare::{prepare_pool, RawPlayerRow, RejectedRow};
use super::types::PlayerRecord;
use crate::error::{Result, SquadError};
use crate::ip::{DefaultSolver, IpSolver, SolverStatus};
use tracing::{debug, info};

/// Result of a squad selection run.
#[derive(Debug, Clone)]
pub struct SquadResult {
    /// The optimal squad.
    pub selection: SquadSelection,

    /// Input rows excluded during preparation.
    pub rejected: Vec<RejectedRow>,

    /// Sum of the selected players' adjusted averages.
    pub objective_value: f64,

    /// Time spent inside the solver, in milliseconds.
    pub solve_time_ms: i64,
}

/// Executes one squad selection.
///
/// Each run is a pure function of (rows, config): nothing is cached or
/// shared between runs.
pub struct SquadRunner;

impl SquadRunner {
    /// Runs the full pipeline with the [`DefaultSolver`] backend.
    pub fn run(rows: &[RawPlayerRow], config: &SquadConfig) -> Result<SquadResult> {
        Self::run_with_solver(rows, config, &DefaultSolver::default())
    }

    /// Runs the full pipeline with a caller-supplied solver.
    pub fn run_with_solver<S: IpSolver + ?Sized>(
        rows: &[RawPlayerRow],
        config: &SquadConfig,
        solver: &S,
    ) -> Result<SquadResult> {
        config.validate()?;
        let pool = prepare_pool(rows);
        let mut result = Self::solve_pool(&pool.players, config, solver)?;
        result.rejected = pool.rejected;
        Ok(result)
    }

    /// Builds, solves and assembles over an already prepared pool.
    ///
    /// # Errors
    ///
    /// - [`SquadError::Infeasible`] when no squad satisfies the rules
    /// - [`SquadError::Solver`] when the backend gives no definite answer
    /// - [`SquadError::Invariant`] when the backend returns an assignment
    ///   that breaks an output invariant
    pub fn solve_pool<S: IpSolver + ?Sized>(
        players: &[PlayerRecord],
        config: &SquadConfig,
        solver: &S,
    ) -> Result<SquadResult> {
        let squad = SquadModel::build(players, config)?;
        let solution = solver.solve(squad.model());

        info!(
            status = ?solution.status,
            objective = ?solution.objective_value,
            solve_time_ms = solution.solve_time_ms,
            "squad solve finished"
        );

        match solution.status {
            SolverStatus::Optimal => {}
            SolverStatus::Infeasible => return Err(SquadError::Infeasible),
            SolverStatus::ModelInvalid => {
                return Err(SquadError::Model(
                    "solver rejected the squad model".into(),
                ))
            }
            status => return Err(SquadError::Solver(status)),
        }

        if solution.values.len() != squad.model().var_count() {
            return Err(SquadError::Invariant(format!(
                "solver returned {} values for {} variables",
                solution.values.len(),
                squad.model().var_count()
            )));
        }
        if let Some(v) = squad.model().first_unpinned(&solution.values) {
            return Err(SquadError::Invariant(format!(
                "solver changed fixed variable {}",
                squad.model().variables()[v.index()].name
            )));
        }
        if let Some(c) = squad.model().first_violation(&solution.values, 1e-6) {
            return Err(SquadError::Invariant(format!(
                "solver assignment violates {}",
                c.name
            )));
        }

        let assignments = squad.assignments(&solution);
        verify(players, &assignments, config)?;
        let selection = assemble(players, assignments)?;

        debug!(
            players = selection.len(),
            total_price = selection.total_price(),
            total_adjusted_avg = selection.total_adjusted_avg(),
            "squad assembled"
        );

        Ok(SquadResult {
            objective_value: squad.model().evaluate(&solution.values),
            solve_time_ms: solution.solve_time_ms,
            selection,
            rejected: Vec::new(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ip::{IpModel, IpSolution};

    struct FixedStatus(SolverStatus);

    impl IpSolver for FixedStatus {
        fn solve(&self, _model: &IpModel) -> IpSolution {
            IpSolution::empty(self.0)
        }
    }

    fn rows() -> Vec<RawPlayerRow> {
        vec![RawPlayerRow::new("Solo", "RUC", "300000", 80.0, None)]
    }

    #[test]
    fn test_infeasible_status() {
        let err = SquadRunner::run_with_solver(
            &rows(),
            &SquadConfig::default(),
            &FixedStatus(SolverStatus::Infeasible),
        )
        .unwrap_err();
        assert!(matches!(err, SquadError::Infeasible));
    }

    #[test]
    fn test_unknown_status() {
        let err = SquadRunner::run_with_solver(
            &rows(),
            &SquadConfig::default(),
            &FixedStatus(SolverStatus::Unknown),
        )
        .unwrap_err();
        assert!(matches!(err, SquadError::Solver(SolverStatus::Unknown)));
    }

    #[test]
    fn test_optimal_without_values() {
        let err = SquadRunner::run_with_solver(
            &rows(),
            &SquadConfig::default(),
            &FixedStatus(SolverStatus::Optimal),
        )
        .unwrap_err();
        assert!(matches!(err, SquadError::Invariant(_)));
    }

    /// Returns every variable set to 1, ignoring the model.
    struct AllOnes;

    impl IpSolver for AllOnes {
        fn solve(&self, model: &IpModel) -> IpSolution {
            IpSolution {
                status: SolverStatus::Optimal,
                objective_value: None,
                values: vec![true; model.var_count()],
                solve_time_ms: 0,
            }
        }
    }

    #[test]
    fn test_fixed_variable_override_is_caught() {
        let err =
            SquadRunner::run_with_solver(&rows(), &SquadConfig::default(), &AllOnes).unwrap_err();
        match err {
            SquadError::Invariant(message) => assert!(message.contains("fixed variable")),
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_invalid_config_fails_before_solving() {
        let config = SquadConfig::default().with_squad_size(12);
        let err = SquadRunner::run_with_solver(
            &rows(),
            &config,
            &FixedStatus(SolverStatus::Optimal),
        )
        .unwrap_err();
        assert!(matches!(err, SquadError::Config(_)));
    }
}
