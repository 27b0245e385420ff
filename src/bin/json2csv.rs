//! json2csv: Convert a JSON array of objects into a CSV file
//!
//! Usage:
//!   json2csv in.json out.csv
//!
//!   # Use a dot for composite column names (user.name instead of user¤name)
//!   json2csv --separator . in.json out.csv
//!
//!   # Flatten two levels of nested objects
//!   json2csv --max-depth 2 in.json out.csv

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use anyhow::Result;
use clap::Parser;
use json2csv::{convert_file, FlattenConfig, DEFAULT_SEPARATOR};
use std::path::PathBuf;
use tracing::{debug, error, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "json2csv")]
#[command(about = "Convert a JSON array of objects into CSV", long_about = None)]
struct Args {
    /// JSON file holding a single array of objects
    #[arg(value_name = "IN_JSON")]
    input: PathBuf,

    /// CSV file to create or overwrite
    #[arg(value_name = "OUT_CSV")]
    output: PathBuf,

    /// Character joining a field and a nested key in composite column names
    #[arg(long, default_value_t = DEFAULT_SEPARATOR)]
    separator: char,

    /// Levels of nested objects to flatten (0 keeps objects as JSON text)
    #[arg(long, default_value_t = 1)]
    max_depth: usize,

    /// Fail when a field or nested key name contains the separator
    #[arg(long)]
    strict_separator: bool,

    /// Log each conversion stage
    #[arg(long, short = 'v', conflicts_with = "quiet")]
    verbose: bool,

    /// Only log errors
    #[arg(long, short = 'q')]
    quiet: bool,
}

impl Args {
    fn flatten_config(&self) -> FlattenConfig {
        FlattenConfig::default()
            .with_separator(self.separator)
            .with_max_depth(self.max_depth)
            .strict(self.strict_separator)
    }
}

fn setup_logging(verbose: bool, quiet: bool) {
    let level = if quiet {
        Level::ERROR
    } else if verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
    }
}

fn run(args: Args) -> Result<()> {
    let config = args.flatten_config();
    debug!(?config, "starting conversion");

    convert_file(&args.input, &args.output, &config)?;

    println!("Done");
    Ok(())
}

fn main() {
    // Exits with a usage message before any file is touched
    let args = Args::parse();
    setup_logging(args.verbose, args.quiet);

    if let Err(e) = run(args) {
        error!("Error: {:#}", e);
        std::process::exit(1);
    }
}
