use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use log::{debug, info};
use maze::{GridMap, MazeSolver};

use crate::report::Report;

mod report;

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

/// Find a path through a text maze with depth-first search
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Maze file: `*` wall, ` ` empty, `A` start, `B` goal
    maze: PathBuf,

    /// How to print the result
    #[arg(short, long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,
}

fn main() -> Result<(), anyhow::Error> {
    let args = Args::parse();

    // MAZE_LOG overrides the level picked with -v/-q
    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .parse_env(
            env_logger::Env::new()
                .filter("MAZE_LOG")
                .write_style("MAZE_LOG_STYLE"),
        )
        .init();
    debug!("{:?}", args);

    let map = GridMap::from_file(&args.maze)
        .with_context(|| format!("Could not open file {}", args.maze.display()))?;
    info!(
        "loaded {}x{} maze from {}",
        map.rows(),
        map.columns(),
        args.maze.display()
    );

    let mut solver = MazeSolver::new(&map)?;
    let solved = solver.solve();
    let stats = solver.stats();
    info!(
        "search finished: solved={} steps={} backtracks={}",
        solved, stats.steps, stats.backtracks
    );

    let report = Report::new(solved, &solver);
    match args.format {
        Format::Text => print!("{}", report.to_text()),
        Format::Json => println!("{}", report.to_json()?),
    }

    Ok(())
}
