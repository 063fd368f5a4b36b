use ndarray::ArrayView2;

use crate::cost::Cost;
use crate::matrix::CostMatrix;

/// One `(row, column)` pair per row, ordered by row.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Assignment {
    pairs: Vec<(usize, usize)>,
}

impl Assignment {
    pub fn pairs(&self) -> &[(usize, usize)] {
        &self.pairs
    }

    pub fn into_pairs(self) -> Vec<(usize, usize)> {
        self.pairs
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.pairs.iter().copied()
    }

    pub fn column_for_row(&self, row: usize) -> Option<usize> {
        self.pairs
            .binary_search_by_key(&row, |&(r, _)| r)
            .ok()
            .map(|i| self.pairs[i].1)
    }

    pub fn row_for_column(&self, col: usize) -> Option<usize> {
        self.pairs.iter().find(|&&(_, c)| c == col).map(|&(r, _)| r)
    }

    /// Sum of `costs` over the assigned cells. Pass the caller's original
    /// matrix, not a reduced one. Summed in [`Cost::Wide`], so a total
    /// past the element type's maximum is still exact.
    pub fn total_cost<T: Cost>(&self, costs: ArrayView2<'_, T>) -> T::Wide {
        self.pairs
            .iter()
            .fold(T::ZERO.widen(), |acc, &(row, col)| acc + costs[[row, col]].widen())
    }
}

impl<'a> IntoIterator for &'a Assignment {
    type Item = &'a (usize, usize);
    type IntoIter = std::slice::Iter<'a, (usize, usize)>;

    fn into_iter(self) -> Self::IntoIter {
        self.pairs.iter()
    }
}

/// Collect the starred cells. With N covered columns there is exactly one
/// star per row and per column.
pub fn extract_assignment<T: Cost>(matrix: &CostMatrix<T>) -> Assignment {
    let pairs: Vec<(usize, usize)> = matrix.starred_cells().collect();
    debug_assert_eq!(pairs.len(), matrix.dim(), "incomplete assignment");
    Assignment { pairs }
}
