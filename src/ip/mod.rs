//! 0/1 Integer Programming (IP) modeling layer.
//!
//! Provides a domain-agnostic model for expressing binary linear programs:
//! a flat arena of binary variables, linear constraints over them, and a
//! linear objective.
//!
//! # Key Components
//!
//! - **Variables**: [`BinaryVar`], addressed by dense [`VarId`] handles
//! - **Constraints**: [`LinearConstraint`] with [`Sense`] `<=`, `>=`, `==`
//! - **Model**: [`IpModel`], a container for variables, constraints, objective
//! - **Solver**: [`IpSolver`] trait for exact engines
//!
//! # Design
//!
//! This module defines the modeling layer and the solver seam. The search
//! itself (simplex, branch-and-bound) lives behind [`IpSolver`];
//! [`MicroLpSolver`] adapts the pure-Rust `microlp` engine through
//! `good_lp`, and `HighsSolver` (feature `highs`) adapts HiGHS. Any exact
//! engine that returns a global optimum or reports infeasibility can be
//! plugged in instead. [`DefaultSolver`] is HiGHS when the feature is on
//! and `microlp` otherwise.
//!
//! Variables pinned with [`IpModel::fix`] are substituted as constants
//! before the engine sees the model.
//!
//! # References
//!
//! Wolsey (1998), "Integer Programming"

#[cfg(feature = "highs")]
mod highs;
mod lp;
mod microlp;
mod model;
mod solver;
mod variables;

#[cfg(feature = "highs")]
pub use highs::HighsSolver;
pub use microlp::MicroLpSolver;
pub use model::{IpModel, LinearConstraint, Objective, Sense};
pub use solver::{IpSolution, IpSolver, SolverStatus};
pub use variables::{BinaryVar, VarId};

/// Backend used by [`SquadRunner::run`](crate::squad::SquadRunner::run).
#[cfg(feature = "highs")]
pub type DefaultSolver = HighsSolver;

/// Backend used by [`SquadRunner::run`](crate::squad::SquadRunner::run).
#[cfg(not(feature = "highs"))]
pub type DefaultSolver = MicroLpSolver;
