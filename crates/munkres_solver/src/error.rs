use thiserror::Error;

#[derive(Debug, Error)]
pub enum SolverError {
    #[error(transparent)]
    Shape(#[from] ShapeError),

    #[error(transparent)]
    InvalidValue(#[from] InvalidValueError),

    #[error("solver cancelled after {iterations} iterations")]
    Cancelled { iterations: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShapeError {
    #[error("cost matrix is empty")]
    Empty,

    #[error("ragged cost matrix: row {row} has {actual} entries (expected: {expected})")]
    Ragged {
        row: usize,
        expected: usize,
        actual: usize,
    },

    #[error("cost matrix is not square (nrows={nrows}, ncols={ncols})")]
    NotSquare { nrows: usize, ncols: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidValueError {
    #[error("negative cost at (row={row}, col={col})")]
    Negative { row: usize, col: usize },

    #[error("NaN cost at (row={row}, col={col})")]
    NotANumber { row: usize, col: usize },

    #[error("infinite cost at (row={row}, col={col})")]
    Infinite { row: usize, col: usize },
}

pub type SolverResult<T> = Result<T, SolverError>;
