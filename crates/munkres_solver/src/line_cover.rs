//! Minimum line cover by star/prime marking.
//!
//! Starred zeros form an independent set (no two share a row or column). The
//! columns holding a star are covered; uncovered zeros are then primed one at a
//! time. A prime in a row that already holds a star swaps the star's column
//! line for a row line. A prime in a row without a star starts an augmenting
//! path, which grows the star set by one.
//!
//! Uncovered zeros are looked up through a [`Slack`], so each prime costs
//! O(N) and each augmentation adds one O(N²) rebuild. With at most N primes
//! between augmentations and N augmentations overall the marking is O(N³).
//!
//! Once N columns are covered the stars form a perfect zero-cost matching.

use tracing::{debug, trace};

use crate::cost::Cost;
use crate::cover::CoverState;
use crate::matrix::CostMatrix;
use crate::slack::Slack;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineCover {
    /// N columns are covered; the stars are a complete assignment.
    Complete,
    /// No uncovered zero is left. Primes and lines stay in place so the scan
    /// can resume once the uncovered minimum has been redistributed.
    NeedsAdjustment,
}

/// Greedy initial stars, scanning rows top to bottom and columns left to
/// right. Existing stars are kept. Returns the total number of stars.
pub fn star_independent_zeros<T: Cost>(matrix: &mut CostMatrix<T>) -> usize {
    let n = matrix.dim();
    let mut row_has_star = vec![false; n];
    let mut column_has_star = vec![false; n];
    let existing: Vec<(usize, usize)> = matrix.starred_cells().collect();
    for &(row, col) in &existing {
        row_has_star[row] = true;
        column_has_star[col] = true;
    }

    let mut starred = existing.len();
    for row in 0..n {
        if row_has_star[row] {
            continue;
        }
        let free_zero =
            (0..n).find(|&col| !column_has_star[col] && matrix.is_zero(row, col));
        if let Some(col) = free_zero {
            matrix.star(row, col);
            row_has_star[row] = true;
            column_has_star[col] = true;
            starred += 1;
        }
    }

    debug!(starred, n, "initial stars");
    starred
}

pub fn cover_starred_columns<T: Cost>(matrix: &CostMatrix<T>, cover: &mut CoverState) {
    for (_, col) in matrix.starred_cells() {
        cover.cover_column(col);
    }
}

/// Zero whose row and column are both uncovered: the tracked minimum of the
/// topmost uncovered row that has reached zero.
pub fn find_uncovered_zero<T: Cost>(
    slack: &Slack<T>,
    cover: &CoverState,
) -> Option<(usize, usize)> {
    slack.zero(cover)
}

/// Walk the alternating path that starts at the primed zero `start`:
/// prime → star in the same column → prime in the star's row → ...
/// until a column without a star is reached. Every star on the path is
/// removed and every prime becomes a star. Returns the path length.
pub fn augment<T: Cost>(matrix: &mut CostMatrix<T>, start: (usize, usize)) -> usize {
    let mut path = vec![start];
    let mut col = start.1;
    while let Some(star_row) = matrix.star_in_column(col) {
        path.push((star_row, col));
        // the star's column was uncovered by priming a zero in its row
        let Some(prime_col) = matrix.prime_in_row(star_row) else {
            unreachable!("starred row {star_row} on an augmenting path has no prime");
        };
        path.push((star_row, prime_col));
        col = prime_col;
    }

    for (i, &(row, col)) in path.iter().enumerate() {
        if i % 2 == 0 {
            matrix.star(row, col);
        } else {
            matrix.unstar(row, col);
        }
    }
    path.len()
}

/// Cover every zero with as few lines as the current stars allow.
///
/// A clear `cover` starts from the starred columns; a non-clear one resumes
/// the scan where a previous call returned [`LineCover::NeedsAdjustment`],
/// reusing `slack` as the adjustment left it.
pub fn cover_zeros_minimally<T: Cost>(
    matrix: &mut CostMatrix<T>,
    cover: &mut CoverState,
    slack: &mut Slack<T>,
) -> LineCover {
    let n = matrix.dim();
    if cover.is_clear() {
        cover_starred_columns(matrix, cover);
        slack.rebuild(matrix, cover);
    } else if !slack.is_ready() {
        slack.rebuild(matrix, cover);
    }

    loop {
        if cover.covered_column_count() == n {
            return LineCover::Complete;
        }

        let Some((row, col)) = find_uncovered_zero(slack, cover) else {
            trace!(lines = cover.line_total(), "no uncovered zero");
            return LineCover::NeedsAdjustment;
        };
        matrix.prime(row, col);

        match matrix.star_in_row(row) {
            Some(star_col) => {
                cover.cover_row(row);
                cover.uncover_column(star_col);
                slack.column_uncovered(matrix, cover, star_col);
                trace!(row, col, star_col, "primed zero, swapped star column for row");
            }
            None => {
                let path_len = augment(matrix, (row, col));
                matrix.clear_primes();
                cover.clear();
                cover_starred_columns(matrix, cover);
                slack.rebuild(matrix, cover);
                debug!(
                    row,
                    col,
                    path_len,
                    stars = cover.covered_column_count(),
                    "augmented"
                );
            }
        }
    }
}
