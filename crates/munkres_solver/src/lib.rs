//! Hungarian (Kuhn–Munkres) solver for the square assignment problem.
//!
//! Given an N×N matrix of non-negative costs, [`solve`] returns the
//! one-to-one pairing of rows to columns with minimum total cost.
//!
//! ```
//! use ndarray::array;
//!
//! let costs = array![[4i32, 1, 3], [2, 0, 5], [3, 2, 2]];
//! let assignment = munkres_solver::solve(costs.view()).unwrap();
//! assert_eq!(assignment.pairs(), &[(0, 1), (1, 0), (2, 2)]);
//! assert_eq!(assignment.total_cost(costs.view()), 5);
//! ```
//!
//! The phases are exposed individually so callers can drive or inspect the
//! algorithm step by step; [`Solver`] runs them in order.

pub mod adjust;
pub mod assignment;
pub mod cost;
pub mod cover;
pub mod error;
pub mod line_cover;
pub mod matrix;
pub mod reduce;
pub mod slack;
pub mod solver;

#[cfg(test)]
mod test_utils;

pub use assignment::Assignment;
pub use cost::Cost;
pub use error::{InvalidValueError, ShapeError, SolverError, SolverResult};
pub use solver::{Solver, SolverConfig, solve, solve_rows};
pub use tokio_util::sync::CancellationToken;
