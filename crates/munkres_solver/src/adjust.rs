use tracing::debug;

use crate::cost::Cost;
use crate::cover::CoverState;
use crate::matrix::CostMatrix;
use crate::slack::Slack;

/// Move the smallest uncovered value onto the lines.
///
/// The minimum over uncovered cells is subtracted from every uncovered cell
/// and added to every cell lying on both a row line and a column line. Cells
/// on exactly one line keep their value, so starred and primed zeros survive.
///
/// The shift is applied to the potentials: covered rows are raised and
/// uncovered columns lowered by the minimum, which is O(N) and leaves the
/// stored values untouched. An unbuilt `slack` is rebuilt from `cover` first.
///
/// Returns the applied minimum, or `None` (matrix untouched) when every cell
/// is covered.
pub fn adjust_uncovered_minimum<T: Cost>(
    matrix: &mut CostMatrix<T>,
    cover: &CoverState,
    slack: &mut Slack<T>,
) -> Option<T::Wide> {
    if !slack.is_ready() {
        slack.rebuild(matrix, cover);
    }
    let min = slack.minimum(cover)?;

    for row in cover.covered_rows() {
        matrix.raise_row(row, min);
    }
    for col in cover.uncovered_columns() {
        matrix.lower_column(col, min);
    }
    slack.lower(cover, min);

    debug!(
        %min,
        raised_rows = cover.covered_row_count(),
        lowered_columns = matrix.dim() - cover.covered_column_count(),
        "adjusted uncovered minimum"
    );
    Some(min)
}
