use std::fmt;

use ndarray::{Array2, ArrayView1, ArrayView2};

use crate::cost::{Cost, Inadmissible};
use crate::error::{InvalidValueError, ShapeError, SolverError};

/// One entry of the working matrix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CostCell<T> {
    pub value: T,
    pub starred: bool,
    pub primed: bool,
}

impl<T: Cost> CostCell<T> {
    pub fn new(value: T) -> Self {
        Self {
            value,
            starred: false,
            primed: false,
        }
    }
}

/// Square working copy of the caller's costs.
///
/// The grid is a single owned array; row and column views are plain index
/// ranges over it. Covering lines are kept outside in a
/// [`CoverState`](crate::cover::CoverState).
///
/// Cell values are only ever lowered, by the row and column reductions.
/// Later adjustments move the row and column potentials instead, so the
/// reduced value of a cell is
///
/// ```text
/// reduced(i, j) = value(i, j) + row_potential[i] - column_potential[j]
/// ```
///
/// computed in [`Cost::Wide`]. Stars and primes always sit on reduced zeros.
#[derive(Debug, Clone)]
pub struct CostMatrix<T: Cost> {
    cells: Array2<CostCell<T>>,
    row_potential: Vec<T::Wide>,
    column_potential: Vec<T::Wide>,
}

/// Collect rows into a dense array, rejecting empty and ragged input.
pub fn array_from_rows<T: Cost, R: AsRef<[T]>>(rows: &[R]) -> Result<Array2<T>, ShapeError> {
    let Some(first) = rows.first() else {
        return Err(ShapeError::Empty);
    };
    let ncols = first.as_ref().len();
    for (row, r) in rows.iter().enumerate() {
        let actual = r.as_ref().len();
        if actual != ncols {
            return Err(ShapeError::Ragged {
                row,
                expected: ncols,
                actual,
            });
        }
    }
    Ok(Array2::from_shape_fn((rows.len(), ncols), |(i, j)| {
        rows[i].as_ref()[j]
    }))
}

/// Check that `costs` is a non-empty square matrix of admissible values.
pub fn validate<T: Cost>(costs: ArrayView2<'_, T>) -> Result<(), SolverError> {
    let (nrows, ncols) = costs.dim();
    if nrows == 0 || ncols == 0 {
        return Err(ShapeError::Empty.into());
    }
    if nrows != ncols {
        return Err(ShapeError::NotSquare { nrows, ncols }.into());
    }
    for ((row, col), &value) in costs.indexed_iter() {
        if let Err(reason) = value.check() {
            let err = match reason {
                Inadmissible::Negative => InvalidValueError::Negative { row, col },
                Inadmissible::NotANumber => InvalidValueError::NotANumber { row, col },
                Inadmissible::Infinite => InvalidValueError::Infinite { row, col },
            };
            return Err(err.into());
        }
    }
    Ok(())
}

pub(crate) fn min_value<'a, T: Cost + 'a>(
    cells: impl IntoIterator<Item = &'a CostCell<T>>,
) -> Option<T> {
    cells
        .into_iter()
        .map(|c| c.value)
        .reduce(|a, b| if b < a { b } else { a })
}

impl<T: Cost> CostMatrix<T> {
    pub fn from_array(costs: ArrayView2<'_, T>) -> Result<Self, SolverError> {
        validate(costs)?;
        let n = costs.nrows();
        let origin = T::ZERO.widen();
        Ok(Self {
            cells: costs.map(|&v| CostCell::new(v)),
            row_potential: vec![origin; n],
            column_potential: vec![origin; n],
        })
    }

    pub fn from_rows<R: AsRef<[T]>>(rows: &[R]) -> Result<Self, SolverError> {
        let costs = array_from_rows(rows)?;
        Self::from_array(costs.view())
    }

    /// Side length N.
    pub fn dim(&self) -> usize {
        self.cells.nrows()
    }

    pub fn value(&self, row: usize, col: usize) -> T {
        self.cells[[row, col]].value
    }

    pub fn cells(&self) -> ArrayView2<'_, CostCell<T>> {
        self.cells.view()
    }

    pub(crate) fn cells_mut(&mut self) -> &mut Array2<CostCell<T>> {
        &mut self.cells
    }

    pub fn row(&self, row: usize) -> ArrayView1<'_, CostCell<T>> {
        self.cells.row(row)
    }

    pub fn column(&self, col: usize) -> ArrayView1<'_, CostCell<T>> {
        self.cells.column(col)
    }

    /// Stored values without marks or potentials.
    pub fn values(&self) -> Array2<T> {
        self.cells.map(|c| c.value)
    }

    pub fn reduced(&self, row: usize, col: usize) -> T::Wide {
        self.cells[[row, col]].value.widen() + self.row_potential[row]
            - self.column_potential[col]
    }

    /// Reduced values of every cell.
    pub fn reduced_values(&self) -> Array2<T::Wide> {
        Array2::from_shape_fn(self.cells.dim(), |(row, col)| self.reduced(row, col))
    }

    pub fn is_zero(&self, row: usize, col: usize) -> bool {
        self.reduced(row, col) <= T::ZERO.widen()
    }

    /// Add `by` to every reduced value in `row`.
    pub fn raise_row(&mut self, row: usize, by: T::Wide) {
        self.row_potential[row] = self.row_potential[row] + by;
    }

    /// Subtract `by` from every reduced value in `col`.
    pub fn lower_column(&mut self, col: usize, by: T::Wide) {
        self.column_potential[col] = self.column_potential[col] + by;
    }

    pub fn star(&mut self, row: usize, col: usize) {
        let cell = &mut self.cells[[row, col]];
        cell.starred = true;
        cell.primed = false;
    }

    pub fn unstar(&mut self, row: usize, col: usize) {
        self.cells[[row, col]].starred = false;
    }

    pub fn prime(&mut self, row: usize, col: usize) {
        self.cells[[row, col]].primed = true;
    }

    pub fn star_in_row(&self, row: usize) -> Option<usize> {
        self.cells.row(row).iter().position(|c| c.starred)
    }

    pub fn star_in_column(&self, col: usize) -> Option<usize> {
        self.cells.column(col).iter().position(|c| c.starred)
    }

    pub fn prime_in_row(&self, row: usize) -> Option<usize> {
        self.cells.row(row).iter().position(|c| c.primed)
    }

    pub fn clear_primes(&mut self) {
        self.cells.iter_mut().for_each(|c| c.primed = false);
    }

    pub fn star_count(&self) -> usize {
        self.cells.iter().filter(|c| c.starred).count()
    }

    /// Starred cells in row-major order.
    pub fn starred_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.cells
            .indexed_iter()
            .filter_map(|(idx, c)| c.starred.then_some(idx))
    }
}

/// Aligned grid of reduced values, `*` after starred and `'` after primed
/// ones.
impl<T: Cost> fmt::Display for CostMatrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered = self.reduced_values().map(ToString::to_string);
        let width = rendered.iter().map(String::len).max().unwrap_or(0);
        for (i, row) in rendered.rows().into_iter().enumerate() {
            for (j, text) in row.iter().enumerate() {
                let cell = &self.cells[[i, j]];
                let mark = if cell.starred {
                    '*'
                } else if cell.primed {
                    '\''
                } else {
                    ' '
                };
                if j > 0 {
                    f.write_str(" ")?;
                }
                write!(f, "{text:>width$}{mark}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
