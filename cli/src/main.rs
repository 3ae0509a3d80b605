//! mapsearch CLI: load a JSON map and print the shortest path between two
//! nodes.
//!
//! Usage:
//!   mapsearch [--map mapinfo.json] [--start 2] [--goal 3] [--format text|json]

use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Instant;

use clap::{Parser, ValueEnum};
use mapsearch_core::{GraphError, NodeKey, SearchOptions, SearchOutcome, SearchResult};
use tracing::debug;
use tracing::level_filters::LevelFilter;

#[derive(Parser)]
#[command(
    name = "mapsearch",
    version,
    about = "Breadth-first shortest path over a JSON map"
)]
struct Cli {
    /// Path to the map file
    #[arg(long, default_value = "mapinfo.json")]
    map: PathBuf,
    /// Key of the node to start from
    #[arg(long, default_value_t = 2, allow_negative_numbers = true)]
    start: NodeKey,
    /// Key of the node to reach
    #[arg(long, default_value_t = 3, allow_negative_numbers = true)]
    goal: NodeKey,
    /// Give up after expanding this many nodes
    #[arg(long)]
    max_expansions: Option<usize>,
    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: &Cli) -> Result<SearchOutcome, GraphError> {
    let graph = mapsearch_core::load_map_file(&cli.map)?;

    let options = SearchOptions {
        max_expansions: cli.max_expansions,
    };
    let t = Instant::now();
    let outcome = mapsearch_core::search_with(&graph, cli.start, cli.goal, &options)?;
    debug!(
        elapsed_us = t.elapsed().as_micros() as u64,
        "search {} -> {} finished", cli.start, cli.goal
    );
    Ok(outcome)
}

fn render_text(out: &mut impl Write, result: &SearchResult) -> io::Result<()> {
    match result {
        SearchResult::Found(path) => {
            writeln!(
                out,
                "The following shortest path was found at the cost of {}:",
                path.cost
            )?;
            for step in &path.steps {
                writeln!(out, "{}:{}", step.key, step.label)?;
            }
        }
        SearchResult::NotFound => writeln!(out, "No path to goal was found")?,
    }
    Ok(())
}

fn render_json(out: &mut impl Write, result: &SearchResult) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, result)?;
    writeln!(out)
}

/// Load, search and render. Returns the process exit code: 0 whether or not
/// a path exists, 1 if the map cannot be loaded or the search fails.
fn execute(cli: &Cli, out: &mut impl Write, err: &mut impl Write) -> i32 {
    let outcome = match run(cli) {
        Ok(o) => o,
        Err(e) => {
            let _ = writeln!(err, "Error: {}", e);
            return 1;
        }
    };

    let rendered = match cli.format {
        Format::Text => render_text(out, &outcome.result),
        Format::Json => render_json(out, &outcome.result),
    };
    match rendered.and_then(|()| out.flush()) {
        Ok(()) => 0,
        Err(e) => {
            let _ = writeln!(err, "Error: cannot write output: {}", e);
            1
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let code = execute(&cli, &mut io::stdout().lock(), &mut io::stderr().lock());
    std::process::exit(code);
}
