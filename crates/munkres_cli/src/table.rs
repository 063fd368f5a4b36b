use std::collections::HashSet;

use ndarray::{Array2, s};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TableError {
    #[error("table has no header line")]
    MissingHeader,

    #[error("table has no worker rows")]
    NoRows,

    #[error("line {line}: expected {expected} costs for '{worker}' (actual: {actual})")]
    RowLength {
        line: usize,
        worker: String,
        expected: usize,
        actual: usize,
    },

    #[error("line {line}: header names {jobs} jobs but rows carry {costs} costs")]
    HeaderMismatch {
        line: usize,
        jobs: usize,
        costs: usize,
    },

    #[error("line {line}: invalid cost '{text}' for '{worker}'")]
    InvalidCost {
        line: usize,
        worker: String,
        text: String,
    },

    #[error("duplicate {kind} label '{label}'")]
    DuplicateLabel { kind: &'static str, label: String },
}

/// Costs addressed by worker (row) and job (column) labels.
#[derive(Debug, Clone, PartialEq)]
pub struct CostTable {
    pub workers: Vec<String>,
    pub jobs: Vec<String>,
    pub costs: Array2<f64>,
}

impl CostTable {
    pub fn is_square(&self) -> bool {
        self.workers.len() == self.jobs.len()
    }

    /// Square copy of the costs; missing rows or columns become zero-cost
    /// dummies at the high indices.
    pub fn padded(&self) -> Array2<f64> {
        let (nrows, ncols) = self.costs.dim();
        let n = nrows.max(ncols);
        let mut padded = Array2::zeros((n, n));
        padded.slice_mut(s![..nrows, ..ncols]).assign(&self.costs);
        padded
    }

    pub fn worker(&self, row: usize) -> Option<&str> {
        self.workers.get(row).map(String::as_str)
    }

    pub fn job(&self, col: usize) -> Option<&str> {
        self.jobs.get(col).map(String::as_str)
    }
}

fn fields(line: &str) -> impl Iterator<Item = &str> {
    line.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|f| !f.is_empty())
}

fn check_unique(kind: &'static str, labels: &[String]) -> Result<(), TableError> {
    let mut seen = HashSet::new();
    for label in labels {
        if !seen.insert(label.as_str()) {
            return Err(TableError::DuplicateLabel {
                kind,
                label: label.clone(),
            });
        }
    }
    Ok(())
}

/// Parse a labelled cost table.
///
/// ```text
/// # comment
/// worker   job0 job1 job2
/// jeff     80   40   50
/// jill     40   70   20
/// ```
///
/// The header lists the job labels, optionally preceded by a corner label.
/// Every other line is a worker label followed by its costs. Fields are
/// separated by commas and/or whitespace.
pub fn parse_table(input: &str) -> Result<CostTable, TableError> {
    let mut lines = input
        .lines()
        .enumerate()
        .map(|(i, l)| (i + 1, l.trim()))
        .filter(|(_, l)| !l.is_empty() && !l.starts_with('#'));

    let (header_line, header) = lines.next().ok_or(TableError::MissingHeader)?;
    let mut jobs: Vec<String> = fields(header).map(str::to_string).collect();

    let mut workers = Vec::new();
    let mut values = Vec::new();
    let mut width: Option<usize> = None;
    for (line, text) in lines {
        let mut parts = fields(text);
        let Some(worker) = parts.next() else {
            continue;
        };
        let row = parts
            .map(|t| {
                t.parse::<f64>().map_err(|_| TableError::InvalidCost {
                    line,
                    worker: worker.to_string(),
                    text: t.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let expected = *width.get_or_insert(row.len());
        if row.len() != expected {
            return Err(TableError::RowLength {
                line,
                worker: worker.to_string(),
                expected,
                actual: row.len(),
            });
        }
        workers.push(worker.to_string());
        values.extend(row);
    }

    let Some(width) = width else {
        return Err(TableError::NoRows);
    };
    if jobs.len() == width + 1 {
        jobs.remove(0);
    } else if jobs.len() != width {
        return Err(TableError::HeaderMismatch {
            line: header_line,
            jobs: jobs.len(),
            costs: width,
        });
    }
    check_unique("worker", &workers)?;
    check_unique("job", &jobs)?;

    // rows were length-checked above
    let costs = Array2::from_shape_vec((workers.len(), width), values)
        .map_err(|_| TableError::NoRows)?;
    Ok(CostTable {
        workers,
        jobs,
        costs,
    })
}
