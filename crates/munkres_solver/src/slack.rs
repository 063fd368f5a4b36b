//! Per-row slack over the uncovered columns.
//!
//! Between two augmentations rows only ever get covered and columns only ever
//! get uncovered. For every uncovered row it is therefore enough to remember
//! the smallest reduced value over the uncovered columns and where it sits:
//! uncovering a column folds that column in with one pass over the rows, and
//! an adjustment lowers every tracked minimum by the same amount. Finding an
//! uncovered zero and finding the uncovered minimum are both O(N).

use crate::cost::Cost;
use crate::cover::CoverState;
use crate::matrix::CostMatrix;

#[derive(Debug, Clone)]
pub struct Slack<T: Cost> {
    /// Smallest reduced value in the row over uncovered columns, and its
    /// column. `None` for rows not tracked since the last rebuild.
    best: Vec<Option<(T::Wide, usize)>>,
    ready: bool,
}

impl<T: Cost> Slack<T> {
    pub fn new(n: usize) -> Self {
        Self {
            best: vec![None; n],
            ready: false,
        }
    }

    /// Whether the slack has been built since construction.
    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// Recompute every uncovered row from scratch. O(N²).
    ///
    /// Needed whenever `cover` was changed by anything other than
    /// [`Slack::column_uncovered`] and [`Slack::lower`].
    pub fn rebuild(&mut self, matrix: &CostMatrix<T>, cover: &CoverState) {
        let columns: Vec<usize> = cover.uncovered_columns().collect();
        for (row, best) in self.best.iter_mut().enumerate() {
            *best = None;
            if cover.is_row_covered(row) {
                continue;
            }
            for &col in &columns {
                let value = matrix.reduced(row, col);
                if best.is_none_or(|(min, _)| value < min) {
                    *best = Some((value, col));
                }
            }
        }
        self.ready = true;
    }

    /// Fold a column that just became uncovered into every uncovered row.
    pub fn column_uncovered(&mut self, matrix: &CostMatrix<T>, cover: &CoverState, col: usize) {
        for row in cover.uncovered_rows() {
            let value = matrix.reduced(row, col);
            let best = &mut self.best[row];
            if best.is_none_or(|(min, _)| value < min) {
                *best = Some((value, col));
            }
        }
    }

    /// First uncovered row, top to bottom, whose minimum is a zero.
    pub fn zero(&self, cover: &CoverState) -> Option<(usize, usize)> {
        let origin = T::ZERO.widen();
        cover.uncovered_rows().find_map(|row| match self.best[row] {
            Some((value, col)) if value <= origin => Some((row, col)),
            _ => None,
        })
    }

    /// Smallest reduced value over the uncovered cells.
    pub fn minimum(&self, cover: &CoverState) -> Option<T::Wide> {
        cover
            .uncovered_rows()
            .filter_map(|row| self.best[row].map(|(value, _)| value))
            .reduce(|a, b| if b < a { b } else { a })
    }

    /// Every uncovered cell dropped by `by`.
    pub fn lower(&mut self, cover: &CoverState, by: T::Wide) {
        for row in cover.uncovered_rows() {
            if let Some((value, _)) = &mut self.best[row] {
                *value = *value - by;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rebuild_tracks_uncovered_rows_only() {
        let m = CostMatrix::<i32>::from_rows(&[[0, 4, 9], [3, 1, 6], [2, 5, 0]]).unwrap();
        let mut cover = CoverState::new(3);
        cover.cover_row(0);
        cover.cover_column(2);

        let mut slack = Slack::new(3);
        assert!(!slack.is_ready());
        slack.rebuild(&m, &cover);
        assert!(slack.is_ready());

        assert_eq!(slack.minimum(&cover), Some(1));
        assert_eq!(slack.zero(&cover), None);
        slack.lower(&cover, 1);
        assert_eq!(slack.zero(&cover), Some((1, 1)));
        assert_eq!(slack.minimum(&cover), Some(0));
    }

    #[test]
    fn uncovered_column_is_folded_in() {
        let m = CostMatrix::<i32>::from_rows(&[[0, 0, 1], [0, 1, 1], [1, 1, 0]]).unwrap();
        let mut cover = CoverState::new(3);
        cover.cover_column(0);
        cover.cover_column(2);

        let mut slack = Slack::new(3);
        slack.rebuild(&m, &cover);
        assert_eq!(slack.zero(&cover), Some((0, 1)));

        cover.cover_row(0);
        cover.uncover_column(0);
        slack.column_uncovered(&m, &cover, 0);
        assert_eq!(slack.zero(&cover), Some((1, 0)));
        // row 2 keeps the earlier column on a tie
        assert_eq!(slack.best[2], Some((1, 1)));
    }

    #[test]
    fn nothing_to_track_with_every_column_covered() {
        let m = CostMatrix::from_rows(&[[0.0, 2.0], [3.0, 0.0]]).unwrap();
        let mut cover = CoverState::new(2);
        cover.cover_column(0);
        cover.cover_column(1);

        let mut slack = Slack::new(2);
        slack.rebuild(&m, &cover);
        assert_eq!(slack.minimum(&cover), None);
        assert_eq!(slack.zero(&cover), None);
    }
}
