use std::fmt;

use munkres_solver::Assignment;
use serde::Serialize;

use crate::table::CostTable;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Pairing {
    pub worker: String,
    pub job: String,
    pub row: usize,
    pub column: usize,
    pub cost: f64,
}

/// Assignment mapped back onto the table's labels. Pairings with a dummy
/// row or column are reported as unassigned labels instead.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub pairings: Vec<Pairing>,
    pub total_cost: f64,
    pub unassigned_workers: Vec<String>,
    pub unassigned_jobs: Vec<String>,
}

pub fn build_report(table: &CostTable, assignment: &Assignment) -> Report {
    let mut report = Report {
        pairings: Vec::with_capacity(assignment.len()),
        total_cost: 0.0,
        unassigned_workers: Vec::new(),
        unassigned_jobs: Vec::new(),
    };

    for (row, column) in assignment.iter() {
        match (table.worker(row), table.job(column)) {
            (Some(worker), Some(job)) => {
                let cost = table.costs[[row, column]];
                report.total_cost += cost;
                report.pairings.push(Pairing {
                    worker: worker.to_string(),
                    job: job.to_string(),
                    row,
                    column,
                    cost,
                });
            }
            (Some(worker), None) => report.unassigned_workers.push(worker.to_string()),
            (None, Some(job)) => report.unassigned_jobs.push(job.to_string()),
            (None, None) => {}
        }
    }
    report
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self
            .pairings
            .iter()
            .map(|p| p.worker.len())
            .max()
            .unwrap_or(0);
        for p in &self.pairings {
            writeln!(f, "{:<width$} -> {} ({})", p.worker, p.job, p.cost)?;
        }
        if !self.unassigned_workers.is_empty() {
            writeln!(f, "unassigned workers: {}", self.unassigned_workers.join(", "))?;
        }
        if !self.unassigned_jobs.is_empty() {
            writeln!(f, "unassigned jobs: {}", self.unassigned_jobs.join(", "))?;
        }
        writeln!(f, "total cost: {}", self.total_cost)
    }
}
