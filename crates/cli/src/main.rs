//! Netlist simulator CLI.
//!
//! This binary runs a netlist interactively. It performs:
//! 1. **Loading:** Reads the netlist description, the optional configuration and the
//!    optional ROM image, and compiles the netlist.
//! 2. **Stepping:** Prompts for every input pin, runs one step and prints every output
//!    pin, until input ends or the step limit is reached.
//!
//! Logs go to stderr so stdout carries only the protocol. Warnings and errors are shown
//! unless `RUST_LOG` says otherwise.

mod protocol;

use std::env;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use thiserror::Error;
use tracing::info;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

use nlsim_core::common::{ConfigError, NetlistError, RomError, StepError};
use nlsim_core::sim::loader;
use nlsim_core::{Config, NetlistGraph, RomStore, Simulator};

use crate::protocol::Tokens;

#[derive(Parser, Debug)]
#[command(
    name = "nlsim",
    author,
    version,
    about = "Deterministic step-based netlist simulator",
    long_about = "Run a compiled netlist one step at a time.\n\nEach step prompts `name[width]:=` for every input pin (hexadecimal) and prints `name=hex, ` for every output pin.\n\nExamples:\n  nlsim cpu.json program.rom\n  nlsim adder.json --steps 4 < vectors.txt\n  RUST_LOG=debug nlsim cpu.json program.rom --config sim.json"
)]
struct Cli {
    /// Netlist description (JSON).
    netlist: PathBuf,

    /// ROM image (hexadecimal words) for the netlist's ROM blocks.
    rom: Option<PathBuf>,

    /// Configuration file (JSON).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Stop after this many steps.
    #[arg(short = 'n', long)]
    steps: Option<u64>,

    /// Print simulation statistics to stderr on exit.
    #[arg(long)]
    stats: bool,
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Netlist(#[from] NetlistError),
    #[error(transparent)]
    Rom(#[from] RomError),
    #[error(transparent)]
    Step(#[from] StepError),
    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),
}

fn main() -> ExitCode {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(log_filter(env::var("RUST_LOG").ok().as_deref()))
        .with_writer(io::stderr)
        .try_init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let _ = report(&e, &mut io::stderr());
            ExitCode::FAILURE
        }
    }
}

/// Log filter from `RUST_LOG`-style directives, showing warnings when none are given.
fn log_filter(directives: Option<&str>) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .parse_lossy(directives.unwrap_or_default())
}

/// Prints a fatal error once.
fn report<W: Write>(err: &CliError, out: &mut W) -> io::Result<()> {
    writeln!(out, "nlsim: {err}")
}

/// Loads everything named on the command line, then steps until input ends.
fn run(cli: &Cli) -> Result<(), CliError> {
    let config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };

    let desc = loader::load_netlist(&cli.netlist)?;
    let graph = NetlistGraph::build(&desc, &config)?;
    let mut rom = RomStore::for_graph(&graph, &config);
    if let Some(path) = &cli.rom {
        loader::load_rom_into(path, &mut rom)?;
    }
    let mut sim = Simulator::new(graph, rom, &config);

    let stdin = io::stdin();
    let mut tokens = Tokens::new(stdin.lock());
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let mut steps = 0u64;
    while cli.steps.is_none_or(|limit| steps < limit) {
        let Some(inputs) = protocol::prompt_inputs(sim.graph().inputs(), &mut tokens, &mut out)? else {
            writeln!(out)?;
            break;
        };
        let outputs = sim.step(&inputs)?;
        protocol::print_outputs(&outputs, &mut out)?;
        steps += 1;
    }
    info!(steps, "simulation finished");

    if cli.stats {
        eprintln!("{}", sim.stats());
    }
    Ok(())
}
