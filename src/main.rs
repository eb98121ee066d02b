//! SalesQL - evaluate a query over a product-by-day sales matrix

use anyhow::{Context, Result};
use clap::Parser as ClapParser;
use log::{debug, info};
use salesql::expression::{Environment, Query, QueryChecker, QueryEvaluator};
use salesql::SalesMatrix;
use std::fs;
use std::path::{Path, PathBuf};

/// SalesQL - evaluate a query over a product-by-day sales matrix
#[derive(ClapParser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Sales matrix file (.json array of rows, or whitespace-separated text)
    #[arg(short, long)]
    matrix: PathBuf,

    /// Query AST file (JSON)
    #[arg(short, long)]
    query: PathBuf,

    /// Reject queries with unbound variables or out-of-range literal indices before evaluating
    #[arg(long)]
    check: bool,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let log_level = if args.debug { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let matrix = SalesMatrix::load(&args.matrix)
        .with_context(|| format!("Failed to load sales matrix {}", args.matrix.display()))?;
    info!(
        "Sales matrix: {} products x {} days",
        matrix.products(),
        matrix.days()
    );

    let query = load_query(&args.query)?;
    debug!("Query: {}", query);

    let mut env = Environment::new();
    if args.check {
        QueryChecker::new(&matrix)
            .check(&query, &env)
            .context("Query check failed")?;
    }

    let value = QueryEvaluator::new(&matrix)
        .evaluate(&query, &mut env)
        .with_context(|| format!("Failed to evaluate {} query", query.category()))?;

    if args.json {
        println!(
            "{}",
            serde_json::to_string(&value).context("Failed to serialize result")?
        );
    } else {
        println!("{}", value);
    }

    Ok(())
}

/// Reads a query AST produced by an external parser
fn load_query(path: &Path) -> Result<Query> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read query file {}", path.display()))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse query AST in {}", path.display()))
}
