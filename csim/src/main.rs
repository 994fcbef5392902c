use std::io::{self, BufWriter};
use std::process::ExitCode;
use std::time::Instant;
use clap::Parser;
use log::{debug, error, LevelFilter};
use csimlib::config::CacheConfig;
use csimlib::error::SimError;
use csimlib::io::open_trace;
use csimlib::simulator::Simulator;

#[cfg(debug_assertions)]
const DEBUG_DEFAULT: bool = true;

#[cfg(not(debug_assertions))]
const DEBUG_DEFAULT: bool = false;

#[derive(Parser, Debug)]
#[command(
    about = String::from("Simulates a set-associative LRU cache over a valgrind memory trace"),
    after_help = "Examples:\n  \
                  csim -s 4 -E 1 -b 4 -t traces/yi.trace\n  \
                  csim -v -s 8 -E 2 -b 4 -t traces/yi.trace"
)]
struct Args {
    /// Number of set index bits
    #[arg(short = 's', value_name = "NUM", allow_negative_numbers = true)]
    set_bits: Option<i64>,

    /// Number of lines per set
    #[arg(short = 'E', value_name = "NUM", allow_negative_numbers = true)]
    lines_per_set: Option<i64>,

    /// Number of block offset bits
    #[arg(short = 'b', value_name = "NUM", allow_negative_numbers = true)]
    block_bits: Option<i64>,

    /// Trace file
    #[arg(short, long, value_name = "FILE")]
    trace: String,

    /// Print the outcome of every access
    #[arg(short, long)]
    verbose: bool,

    /// JSON file providing any of the cache parameters. Flags take precedence
    #[arg(short, long, value_name = "FILE")]
    config: Option<String>,

    /// Print the summary as JSON
    #[arg(long)]
    json: bool,

    #[arg(short, long)]
    performance: bool,

    #[arg(short, long, default_value_t = DEBUG_DEFAULT)]
    debug: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();
    let level = if args.debug { LevelFilter::Debug } else { LevelFilter::Info };
    env_logger::Builder::new().filter_level(level).parse_default_env().init();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), SimError> {
    let start = Instant::now();
    let flags = CacheConfig {
        set_bits: args.set_bits,
        lines_per_set: args.lines_per_set,
        block_bits: args.block_bits,
    };
    let config = match &args.config {
        Some(path) => CacheConfig::from_file(path)?.merge(&flags),
        None => flags,
    };
    let params = config.to_params()?;
    let mut simulator = Simulator::new(&params)?;
    let trace_reader = open_trace(&args.trace)?;
    let summary = if args.verbose {
        simulator.simulate_verbose(trace_reader, BufWriter::new(io::stdout().lock()))?
    } else {
        simulator.simulate(trace_reader)?
    };
    if args.json {
        let json = serde_json::to_string_pretty(&summary).map_err(io::Error::from)?;
        println!("{json}");
    } else {
        println!("{summary}");
    }
    if args.performance {
        let simulation_time = simulator.get_execution_time();
        let total_time = start.elapsed();
        println!("Simulation time: {}s", simulation_time.as_nanos() as f64 / 1e9);
        println!(
            "Total execution time (includes initial parsing, configuration, and output): {}s",
            total_time.as_nanos() as f64 / 1e9
        );
    }
    if args.debug {
        #[cfg(debug_assertions)]
        debug!(
            "Running the debug binary, debug mode is enabled by default. \
             If benchmarking, do not use this binary, re-compile with the --release argument \
             when using cargo run"
        );
        debug!("Parsed cache parameters: {params:?}");
        debug!(
            "Uninitialised cache lines: {} of {}",
            simulator.get_uninitialised_line_count(),
            params.num_lines()
        );
    }
    Ok(())
}
