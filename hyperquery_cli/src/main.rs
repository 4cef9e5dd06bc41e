//! Hyperquery CLI
//!
//! Entry point for the hyperquery command-line tool. Loads a hypergraph
//! dataset, samples random walks over it and writes them as query files for
//! the external subhypergraph matcher.

#[global_allocator]
/// Global allocator using jemalloc for better performance in parallel workloads.
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

/// Command-line arguments.
mod args;

use std::path::{Path, PathBuf};

use clap::Parser;
use hyperquery_common::parse_query_name;
use hyperquery_driver::Driver;
use hyperquery_walk::QueryHypergraph;
use tracing::{info, warn};
use walkdir::WalkDir;

use args::{Args, Command, GenerateArgs, InspectArgs};

/// Parses arguments and runs the selected subcommand.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_thread_ids(true)
        .init();

    let args = Args::parse();
    match args.command {
        Command::Generate(generate) => run_generate(&generate),
        Command::Inspect(inspect) => run_inspect(&inspect),
    }
}

/// Generates the queries of one dataset and prints per-length counts.
fn run_generate(args: &GenerateArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = args.to_config()?;
    let driver = Driver::new(&args.dataset.root)?;
    let key = driver.dataset(&args.dataset.dataset);

    info!("Generating queries for {:?}", key);
    let report = driver.generate(&key, &config)?;

    println!("\n=== Generated Queries (seed {}) ===", report.seed);
    for (length, count) in &report.counts {
        println!("length {length}: {count}/{}", config.samples_per_length);
    }
    println!("{} written to {}", report.written.len(), key.query_dir().display());
    if !report.is_complete() {
        println!("{} failed", report.failures.len());
    }
    Ok(())
}

/// Query files under `dir`, ordered by length then index.
fn query_files(dir: &Path) -> Result<Vec<((usize, usize), PathBuf)>, walkdir::Error> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
        let entry = entry?;
        let path = entry.path();
        if !entry.file_type().is_file() || path.extension().is_none_or(|ext| ext != "txt") {
            continue;
        }
        if let Some(id) = path.file_stem().and_then(|s| s.to_str()).and_then(parse_query_name) {
            files.push((id, path.to_path_buf()));
        }
    }
    files.sort();
    Ok(files)
}

/// Prints the statistics of every query file in a directory.
fn run_inspect(args: &InspectArgs) -> Result<(), Box<dyn std::error::Error>> {
    let dir = args.query_dir();
    let files = query_files(&dir)?;
    info!("Found {} query files in {}", files.len(), dir.display());

    let mut failed = 0;
    for ((length, index), path) in &files {
        match QueryHypergraph::read(path) {
            Ok(query) => {
                if query.num_hyperedges() != *length {
                    warn!("query_{length}_{index} holds {} hyperedges", query.num_hyperedges());
                }
                if !query.is_walk_connected() {
                    warn!("query_{length}_{index} is not a connected walk");
                }
                println!("query_{length}_{index}: {query}");
            }
            Err(e) => {
                warn!("{e}");
                failed += 1;
            }
        }
    }
    if failed > 0 {
        return Err(format!("{failed} of {} query files are malformed", files.len()).into());
    }
    Ok(())
}
