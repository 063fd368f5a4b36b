/// Covering lines drawn over the matrix.
///
/// Lines always span a full row or a full column; a cell is covered iff its
/// row or its column is covered. The state is owned by a single solve and
/// passed explicitly into every phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoverState {
    rows: Vec<bool>,
    columns: Vec<bool>,
}

impl CoverState {
    pub fn new(n: usize) -> Self {
        Self {
            rows: vec![false; n],
            columns: vec![false; n],
        }
    }

    pub fn dim(&self) -> usize {
        self.rows.len()
    }

    pub fn cover_row(&mut self, row: usize) {
        self.rows[row] = true;
    }

    pub fn cover_column(&mut self, col: usize) {
        self.columns[col] = true;
    }

    pub fn uncover_column(&mut self, col: usize) {
        self.columns[col] = false;
    }

    pub fn is_row_covered(&self, row: usize) -> bool {
        self.rows[row]
    }

    pub fn is_column_covered(&self, col: usize) -> bool {
        self.columns[col]
    }

    pub fn is_covered(&self, row: usize, col: usize) -> bool {
        self.rows[row] || self.columns[col]
    }

    pub fn covered_row_count(&self) -> usize {
        self.rows.iter().filter(|&&c| c).count()
    }

    pub fn covered_column_count(&self) -> usize {
        self.columns.iter().filter(|&&c| c).count()
    }

    pub fn line_total(&self) -> usize {
        self.covered_row_count() + self.covered_column_count()
    }

    pub fn is_clear(&self) -> bool {
        !self.rows.iter().chain(self.columns.iter()).any(|&c| c)
    }

    pub fn clear(&mut self) {
        self.rows.fill(false);
        self.columns.fill(false);
    }

    pub fn covered_rows(&self) -> impl Iterator<Item = usize> + '_ {
        self.rows
            .iter()
            .enumerate()
            .filter_map(|(i, &c)| c.then_some(i))
    }

    pub fn uncovered_rows(&self) -> impl Iterator<Item = usize> + '_ {
        self.rows
            .iter()
            .enumerate()
            .filter_map(|(i, &c)| (!c).then_some(i))
    }

    pub fn uncovered_columns(&self) -> impl Iterator<Item = usize> + '_ {
        self.columns
            .iter()
            .enumerate()
            .filter_map(|(j, &c)| (!c).then_some(j))
    }
}
