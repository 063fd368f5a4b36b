use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use clap::{Parser, ValueEnum};
use munkres_solver::{Solver, SolverConfig};
use ndarray::Array2;
use tracing_subscriber::EnvFilter;

mod report;
mod table;

use crate::report::build_report;
use crate::table::{CostTable, parse_table};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

#[derive(Parser, Debug)]
#[command(
    name = "munkres",
    about = "Solves a labelled worker/job cost table with the Hungarian algorithm.",
    after_help = "Table format:\n  first line: job labels (optionally preceded by a corner label)\n  other lines: worker label followed by one cost per job\n  fields are separated by commas and/or whitespace; '#' starts a comment line",
    version
)]
struct Args {
    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Reject non-square tables instead of padding them with zero-cost dummies
    #[arg(long)]
    strict: bool,

    /// Log the working matrix after every phase (needs -vv)
    #[arg(long)]
    dump_matrices: bool,

    /// Raise log verbosity (-v debug, -vv trace); RUST_LOG takes precedence
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Cost table, or '-' for stdin
    #[arg(value_name = "TABLE")]
    path: PathBuf,
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(io::stderr)
        .init();
}

/// Read the table from `path`, or from `stdin` when the path is `-`.
fn read_input(path: &Path, mut stdin: impl Read) -> io::Result<String> {
    if path == Path::new("-") {
        let mut input = String::new();
        stdin.read_to_string(&mut input)?;
        Ok(input)
    } else {
        fs::read_to_string(path)
    }
}

/// Square cost matrix for the solver. Non-square tables are rejected when
/// `strict`, otherwise padded with zero-cost dummies.
fn prepare_costs(table: &CostTable, strict: bool) -> anyhow::Result<Array2<f64>> {
    if !table.is_square() {
        if strict {
            bail!(
                "table is not square ({} workers, {} jobs)",
                table.workers.len(),
                table.jobs.len()
            );
        }
        tracing::info!(
            workers = table.workers.len(),
            jobs = table.jobs.len(),
            "padding table with zero-cost dummies"
        );
    }
    Ok(table.padded())
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let input = read_input(&args.path, io::stdin())
        .with_context(|| format!("failed to read {}", args.path.display()))?;
    let table = parse_table(&input)
        .with_context(|| format!("failed to parse {}", args.path.display()))?;
    let costs = prepare_costs(&table, args.strict)?;

    let solver = Solver::new(SolverConfig {
        dump_matrices: args.dump_matrices,
        ..Default::default()
    });
    let assignment = solver
        .calculate(costs.view())
        .context("failed to solve assignment")?;

    let report = build_report(&table, &assignment);
    match args.format {
        Format::Text => print!("{report}"),
        Format::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }
    Ok(())
}
