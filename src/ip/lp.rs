//! Translation of an [`IpModel`] into a `good_lp` problem.
//!
//! Shared by every `good_lp` backend. Fixed variables are folded into the
//! constant part of each expression, so the engine only sees free columns;
//! a constraint left with no free terms is checked here and never reaches
//! the engine.

use super::model::{IpModel, LinearConstraint, Sense};
use super::solver::{IpSolution, SolverStatus};
use super::variables::VarId;
use good_lp::{
    constraint, variable, Expression, ProblemVariables, ResolutionError, Solution, Solver,
    SolverModel, Variable,
};
use std::time::Instant;
use tracing::{debug, warn};

/// Column handle for each model variable: a `good_lp` variable when free,
/// the pinned value otherwise.
#[derive(Debug, Clone, Copy)]
enum Column {
    Free(Variable),
    Fixed(bool),
}

fn expression(columns: &[Column], terms: &[(VarId, f64)]) -> (Expression, bool) {
    let mut expr = Expression::with_capacity(terms.len());
    let mut has_free = false;
    for &(id, coef) in terms {
        match columns[id.index()] {
            Column::Free(v) => {
                expr.add_mul(coef, v);
                has_free = true;
            }
            Column::Fixed(true) => expr += coef,
            Column::Fixed(false) => {}
        }
    }
    (expr, has_free)
}

fn constant_holds(c: &LinearConstraint, columns: &[Column]) -> bool {
    let lhs: f64 = c
        .terms
        .iter()
        .filter(|(id, _)| matches!(columns[id.index()], Column::Fixed(true)))
        .map(|&(_, coef)| coef)
        .sum();
    match c.sense {
        Sense::Le => lhs <= c.rhs + 1e-9,
        Sense::Ge => lhs >= c.rhs - 1e-9,
        Sense::Eq => (lhs - c.rhs).abs() <= 1e-9,
    }
}

/// Solves `model` with the `good_lp` engine `solver`.
///
/// `engine` names the backend in logs.
pub(crate) fn solve_with<S>(model: &IpModel, solver: S, engine: &'static str) -> IpSolution
where
    S: Solver,
    S::Model: SolverModel<Error = ResolutionError>,
{
    if let Err(reason) = model.validate() {
        warn!(model = %model.name, engine, %reason, "refusing to solve invalid model");
        return IpSolution::empty(SolverStatus::ModelInvalid);
    }

    let start_time = Instant::now();

    let mut vars = ProblemVariables::new();
    let columns: Vec<Column> = model
        .variables()
        .iter()
        .map(|var| match var.fixed {
            Some(pin) => Column::Fixed(pin),
            None => Column::Free(vars.add(variable().binary())),
        })
        .collect();

    if let Some(c) = model
        .constraints()
        .iter()
        .filter(|c| c.terms.iter().all(|(id, _)| model.variables()[id.index()].fixed.is_some()))
        .find(|c| !constant_holds(c, &columns))
    {
        debug!(model = %model.name, engine, constraint = %c.name, "violated by fixed variables");
        return IpSolution {
            solve_time_ms: start_time.elapsed().as_millis() as i64,
            ..IpSolution::empty(SolverStatus::Infeasible)
        };
    }

    // A model without an objective is a pure feasibility question.
    let (objective, maximize) = match model.objective() {
        Some(o) => (expression(&columns, o.terms()).0, o.is_maximize()),
        None => (Expression::default(), true),
    };
    let unsolved = if maximize {
        vars.maximise(objective)
    } else {
        vars.minimise(objective)
    };
    let mut problem = unsolved.using(solver);

    let mut rows = 0usize;
    for c in model.constraints() {
        let (lhs, has_free) = expression(&columns, &c.terms);
        if !has_free {
            continue;
        }
        let built = match c.sense {
            Sense::Le => constraint::leq(lhs, c.rhs),
            Sense::Ge => constraint::geq(lhs, c.rhs),
            Sense::Eq => constraint::eq(lhs, c.rhs),
        };
        problem.add_constraint(built);
        rows += 1;
    }

    debug!(
        model = %model.name,
        engine,
        variables = model.var_count(),
        free = model.free_var_count(),
        rows,
        "solve started"
    );

    let result = problem.solve();
    let solve_time_ms = start_time.elapsed().as_millis() as i64;

    match result {
        Ok(solution) => {
            let values: Vec<bool> = columns
                .iter()
                .map(|column| match *column {
                    Column::Free(v) => solution.value(v) > 0.5,
                    Column::Fixed(pin) => pin,
                })
                .collect();
            IpSolution {
                status: SolverStatus::Optimal,
                objective_value: Some(model.evaluate(&values)),
                values,
                solve_time_ms,
            }
        }
        Err(ResolutionError::Infeasible) => IpSolution {
            solve_time_ms,
            ..IpSolution::empty(SolverStatus::Infeasible)
        },
        Err(ResolutionError::Unbounded) => IpSolution {
            solve_time_ms,
            ..IpSolution::empty(SolverStatus::Unbounded)
        },
        Err(other) => {
            warn!(model = %model.name, engine, error = %other, "solve failed");
            IpSolution {
                solve_time_ms,
                ..IpSolution::empty(SolverStatus::Unknown)
            }
        }
    }
}

/// Checks any [`IpSolver`] against small models with known optima.
///
/// Each backend's test module runs these so they share one contract.
#[cfg(test)]
pub(crate) mod contract {
    use super::*;
    use crate::ip::{IpSolver, Objective};

    pub(crate) fn knapsack_optimum(solver: &dyn IpSolver) {
        let mut model = IpModel::new("knapsack");
        let items: Vec<VarId> = (0..4).map(|i| model.add_binary(format!("x{i}"))).collect();
        let weights = [5.0, 4.0, 6.0, 3.0];
        let values = [10.0, 40.0, 30.0, 50.0];
        model.add_le(
            "weight",
            items.iter().zip(weights).map(|(&v, w)| (v, w)).collect(),
            10.0,
        );
        model.set_objective(Objective::Maximize {
            terms: items.iter().zip(values).map(|(&v, c)| (v, c)).collect(),
        });

        let solution = solver.solve(&model);

        assert!(solution.is_optimal());
        // Best pick is items 1 and 3 (weight 7, value 90).
        assert!(!solution.value(items[0]));
        assert!(solution.value(items[1]));
        assert!(!solution.value(items[2]));
        assert!(solution.value(items[3]));
        assert!((solution.objective_value.unwrap() - 90.0).abs() < 1e-6);
        assert!(model.first_violation(&solution.values, 1e-6).is_none());
    }

    pub(crate) fn minimize(solver: &dyn IpSolver) {
        let mut model = IpModel::new("cover");
        let a = model.add_binary("a");
        let b = model.add_binary("b");
        model.add_ge("cover", vec![(a, 1.0), (b, 1.0)], 1.0);
        model.set_objective(Objective::Minimize {
            terms: vec![(a, 3.0), (b, 2.0)],
        });

        let solution = solver.solve(&model);

        assert!(solution.is_optimal());
        assert!(!solution.value(a));
        assert!(solution.value(b));
    }

    pub(crate) fn integrality_enforced(solver: &dyn IpSolver) {
        // LP relaxation optimum is a = b = 0.5; the integer optimum picks one.
        let mut model = IpModel::new("half");
        let a = model.add_binary("a");
        let b = model.add_binary("b");
        model.add_le("one", vec![(a, 2.0), (b, 2.0)], 2.0);
        model.set_objective(Objective::Maximize {
            terms: vec![(a, 1.0), (b, 1.0)],
        });

        let solution = solver.solve(&model);

        assert!(solution.is_optimal());
        assert_eq!(solution.values.iter().filter(|&&v| v).count(), 1);
    }

    pub(crate) fn fixed_variables(solver: &dyn IpSolver) {
        // Without the pin the optimum would take `b`.
        let mut model = IpModel::new("pinned");
        let a = model.add_binary("a");
        let b = model.add_binary("b");
        let c = model.add_binary("c");
        model.add_le("one", vec![(a, 1.0), (b, 1.0)], 1.0);
        model.add_le("c_needs_a", vec![(c, 1.0), (a, -1.0)], 0.0);
        model.fix(b, false);
        model.fix(c, true);
        model.set_objective(Objective::Maximize {
            terms: vec![(a, 1.0), (b, 5.0), (c, 2.0)],
        });

        let solution = solver.solve(&model);

        assert!(solution.is_optimal());
        assert_eq!(solution.values, vec![true, false, true]);
        assert!((solution.objective_value.unwrap() - 3.0).abs() < 1e-6);
        assert_eq!(model.first_unpinned(&solution.values), None);
    }

    pub(crate) fn fixed_variables_conflict(solver: &dyn IpSolver) {
        let mut model = IpModel::new("pinned_conflict");
        let a = model.add_binary("a");
        let b = model.add_binary("b");
        model.add_le("at_most_one", vec![(a, 1.0), (b, 1.0)], 1.0);
        model.fix(a, true);
        model.fix(b, true);

        let solution = solver.solve(&model);

        assert_eq!(solution.status, SolverStatus::Infeasible);
    }

    pub(crate) fn infeasible(solver: &dyn IpSolver) {
        let mut model = IpModel::new("impossible");
        let a = model.add_binary("a");
        let b = model.add_binary("b");
        model.add_eq("three", vec![(a, 1.0), (b, 1.0)], 3.0);

        let solution = solver.solve(&model);

        assert_eq!(solution.status, SolverStatus::Infeasible);
        assert!(solution.values.is_empty());
    }

    pub(crate) fn invalid_model(solver: &dyn IpSolver) {
        let mut model = IpModel::new("broken");
        model.add_eq("ghost", vec![(VarId(5), 1.0)], 1.0);

        let solution = solver.solve(&model);

        assert_eq!(solution.status, SolverStatus::ModelInvalid);
    }
}
