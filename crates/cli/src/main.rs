//! Cache simulator CLI.
//!
//! Replays a memory trace against a set-associative cache and prints the totals:
//! 1. **Geometry:** `-s`, `-E`, `-b` (or a JSON file via `--config`, which the flags override).
//! 2. **Trace:** `-t <file>`, one `L`/`S`/`M` record per line; `I` lines are ignored.
//! 3. **Output:** `hits:<H> misses:<M> evictions:<E>` on stdout, optional per-record lines with `-v`.

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cachesim_core::{CacheConfig, SimError, Simulator};

#[derive(Parser, Debug)]
#[command(
    name = "csim",
    author,
    version,
    about = "Trace-driven set-associative cache simulator",
    override_usage = "csim [-hv] -s <num> -E <num> -b <num> -t <file>",
    after_help = "Examples:\n  linux>  csim -s 4 -E 1 -b 4 -t traces/yi.trace\n  linux>  csim -v -s 8 -E 2 -b 4 -t traces/yi.trace"
)]
struct Cli {
    /// Optional verbose flag.
    #[arg(short, long)]
    verbose: bool,

    /// Number of set index bits.
    #[arg(short = 's', value_name = "num", required_unless_present = "config")]
    set_index_bits: Option<u32>,

    /// Number of lines per set.
    #[arg(short = 'E', value_name = "num", required_unless_present = "config")]
    lines_per_set: Option<usize>,

    /// Number of block offset bits.
    #[arg(short = 'b', value_name = "num", required_unless_present = "config")]
    block_offset_bits: Option<u32>,

    /// Trace file.
    #[arg(short = 't', value_name = "file")]
    trace: PathBuf,

    /// JSON file with cache geometry; -s/-E/-b override its fields.
    #[arg(long, value_name = "file")]
    config: Option<PathBuf>,

    /// Print the totals as JSON instead of the summary line.
    #[arg(long)]
    json: bool,

    /// Print a detailed statistics breakdown after the summary.
    #[arg(long)]
    report: bool,
}

impl Cli {
    /// Builds the cache geometry from the optional config file and the flags.
    fn cache_config(&self) -> Result<CacheConfig, SimError> {
        let mut config = match &self.config {
            Some(path) => {
                let json = fs::read_to_string(path).map_err(|e| {
                    SimError::Config(format!("cannot read {}: {e}", path.display()))
                })?;
                CacheConfig::from_json(&json)?
            }
            None => CacheConfig::default(),
        };
        if let Some(s) = self.set_index_bits {
            config.set_index_bits = s;
        }
        if let Some(e) = self.lines_per_set {
            config.lines_per_set = e;
        }
        if let Some(b) = self.block_offset_bits {
            config.block_offset_bits = b;
        }
        config.validate()?;
        Ok(config)
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: &Cli) -> Result<(), SimError> {
    let config = cli.cache_config()?;
    tracing::debug!(?config, trace = %cli.trace.display(), "starting simulation");
    let mut sim = Simulator::new(config)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let stats = if cli.verbose {
        sim.run_file(&cli.trace, Some(&mut out))?
    } else {
        sim.run_file(&cli.trace, None)?
    };

    if cli.json {
        let json = serde_json::to_string(stats)
            .map_err(|e| SimError::Output(io::Error::other(e)))?;
        writeln!(out, "{json}").map_err(SimError::Output)?;
    } else {
        writeln!(out, "{stats}").map_err(SimError::Output)?;
    }
    out.flush().map_err(SimError::Output)?;

    if cli.report {
        stats.print();
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("csim: {e}");
            ExitCode::FAILURE
        }
    }
}
