use ndarray::Axis;
use tracing::debug;

use crate::cost::Cost;
use crate::matrix::{CostMatrix, min_value};

/// Subtract each row's minimum from every cell of that row.
pub fn reduce_rows<T: Cost>(matrix: &mut CostMatrix<T>) {
    reduce_lanes(matrix, Axis(0));
}

/// Subtract each column's minimum from every cell of that column.
pub fn reduce_columns<T: Cost>(matrix: &mut CostMatrix<T>) {
    reduce_lanes(matrix, Axis(1));
}

// Axis(0) walks rows, Axis(1) walks columns.
fn reduce_lanes<T: Cost>(matrix: &mut CostMatrix<T>, axis: Axis) {
    let mut reduced = 0usize;
    for mut lane in matrix.cells_mut().axis_iter_mut(axis) {
        let Some(min) = min_value(lane.iter()) else {
            continue;
        };
        if min.is_zero() {
            continue;
        }
        lane.iter_mut().for_each(|c| c.value = c.value - min);
        reduced += 1;
    }
    debug!(axis = axis.index(), reduced, "reduced lanes");
}
