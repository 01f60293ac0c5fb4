//! Crossbook - replay an order stream through the matching engine.
//!
//! Reads `TRADER SIDE QTY PRICE` lines from a file or stdin and prints one
//! trade report line per order that traded. Logs and summaries go to stderr.

mod replay;

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::PathBuf;
use anyhow::{Context, Result};
use clap::Parser;
use log::LevelFilter;

#[derive(Debug, Parser)]
#[command(name = "crossbook", version, about = "Price-time priority order matching")]
struct Args {
    /// Order file; reads stdin when omitted.
    input: Option<PathBuf>,

    /// Abort on the first malformed line instead of skipping it.
    #[arg(long)]
    strict: bool,

    /// Print order and latency statistics on exit.
    #[arg(long)]
    stats: bool,

    /// Print the final book on exit.
    #[arg(long)]
    show_book: bool,

    /// Price levels per side shown by --show-book.
    #[arg(long, default_value_t = 5)]
    depth: usize,

    /// Log level (overrides RUST_LOG).
    #[arg(long)]
    log_level: Option<LevelFilter>,
}

fn init_logging(level: Option<LevelFilter>) {
    let env = env_logger::Env::default().default_filter_or("warn");
    let mut builder = env_logger::Builder::from_env(env);
    if let Some(level) = level {
        builder.filter_level(level);
    }
    builder.target(env_logger::Target::Stderr).init();
}

fn open_input(path: Option<&PathBuf>) -> Result<Box<dyn BufRead>> {
    Ok(match path {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("failed to open {}", path.display()))?;
            Box::new(BufReader::new(file))
        }
        None => Box::new(BufReader::new(io::stdin())),
    })
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.log_level);

    let input = open_input(args.input.as_ref())?;
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    let replay = replay::run(input, &mut out, args.strict)?;
    out.flush().context("failed to flush trade reports")?;

    let stderr = io::stderr();
    let mut err = stderr.lock();

    if args.show_book {
        replay::write_book(&mut err, &replay.engine, args.depth)?;
    }

    if args.stats {
        writeln!(err, "{}", replay.stats)?;
        if replay.skipped > 0 {
            writeln!(err, "skipped {} malformed lines", replay.skipped)?;
        }
    }

    Ok(())
}
