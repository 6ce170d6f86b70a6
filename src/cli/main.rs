#![warn(clippy::all, clippy::pedantic)]
use std::error::Error;
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::PathBuf;

use bounded_flow::{
    BoundedFlowSolver, EdmondsKarp, MaxFlow, Network, PushRelabel, Report, SolverConfig,
};
use clap::{Parser, ValueEnum};
use log::LevelFilter;
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Algo {
    PushRelabel,
    EdmondsKarp,
}

/// Maximum flow with edge lower bounds, node caps and fixed source supplies.
///
/// Reads a JSON network (`edges`, `sources`, `sink`, optional `node_caps`) and writes either the
/// flow assignment or an infeasibility certificate as JSON.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Input JSON file, stdin if omitted
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Output JSON file, stdout if omitted
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Max flow algorithm used by both phases
    #[arg(long, value_enum, default_value_t = Algo::PushRelabel)]
    algo: Algo,

    /// Slack for capacity, demand and residual comparisons
    #[arg(long, default_value_t = bounded_flow::config::DEFAULT_TOLERANCE)]
    tolerance: f64,

    /// Slack for saturation checks in infeasibility certificates
    #[arg(long, default_value_t = bounded_flow::config::DEFAULT_SATURATION_TOLERANCE)]
    saturation_tolerance: f64,

    /// Write single-line JSON instead of pretty-printing
    #[arg(long)]
    compact: bool,

    /// Log level (off, error, warn, info, debug, trace), logs go to stderr
    #[arg(long, default_value = "warn")]
    log_level: LevelFilter,
}

// Function to read the network from a JSON file or stdin
fn read_network(path: Option<&PathBuf>) -> Result<Network, Box<dyn Error>> {
    let mut input = String::new();
    match path {
        Some(path) => BufReader::new(File::open(path)?).read_to_string(&mut input)?,
        None => io::stdin().read_to_string(&mut input)?,
    };
    Ok(serde_json::from_str(&input)?)
}

// Function to write the solve report
fn write_report(
    report: &Report,
    path: Option<&PathBuf>,
    compact: bool,
) -> Result<(), Box<dyn Error>> {
    let mut wtr: Box<dyn Write> = match path {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(io::stdout().lock()),
    };
    if compact {
        serde_json::to_writer(&mut wtr, report)?;
    } else {
        serde_json::to_writer_pretty(&mut wtr, report)?;
    }
    writeln!(wtr)?;
    wtr.flush()?;
    Ok(())
}

fn solve_with<A: MaxFlow<f64>>(
    algo: A,
    config: SolverConfig,
    network: &Network,
) -> Result<Report, Box<dyn Error>> {
    Ok(BoundedFlowSolver::new(algo, config).solve(network)?)
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    TermLogger::init(
        args.log_level,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )?;

    let network = read_network(args.input.as_ref())?;
    log::debug!(
        "read network: {} edges, {} sources, sink `{}`",
        network.edges().len(),
        network.sources().len(),
        network.sink()
    );

    let config = SolverConfig {
        tolerance: args.tolerance,
        saturation_tolerance: args.saturation_tolerance,
    };
    let report = match args.algo {
        Algo::PushRelabel => solve_with(PushRelabel, config, &network)?,
        Algo::EdmondsKarp => solve_with(EdmondsKarp, config, &network)?,
    };

    write_report(&report, args.output.as_ref(), args.compact)
}
