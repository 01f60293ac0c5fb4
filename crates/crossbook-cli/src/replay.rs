//! Order stream replay through one matching engine.

use std::io::{BufRead, Write};
use anyhow::{Context, Result};
use crossbook_core::{LevelSummary, MatchingEngine};
use crossbook_metrics::SubmitStats;
use crossbook_text::{write_report, OrderReader, ReadError};
use log::{debug, info, warn};

/// State left after a replay.
pub struct Replay {
    pub engine: MatchingEngine,
    pub stats: SubmitStats,
    /// Malformed lines skipped (always 0 in strict mode).
    pub skipped: usize,
}

/// Submit every order line from `input`, writing one report line per order
/// that traded to `out`.
///
/// Malformed lines are logged and skipped unless `strict` is set, in which
/// case the first one aborts the replay.
pub fn run<R: BufRead, W: Write>(input: R, out: &mut W, strict: bool) -> Result<Replay> {
    let mut engine = MatchingEngine::new();
    let mut stats = SubmitStats::new().context("failed to create latency histogram")?;
    let mut skipped = 0;

    for result in OrderReader::new(input) {
        let (line, order) = match result {
            Ok(entry) => entry,
            Err(ReadError::Parse { line, source }) if !strict => {
                warn!("line {}: {}, skipping", line, source);
                skipped += 1;
                continue;
            }
            Err(e) => return Err(e).context("failed to read orders"),
        };

        debug!("line {}: {:?}", line, order);
        let trades = stats.observe(|| engine.submit(order));
        write_report(out, &trades).context("failed to write trade report")?;
    }

    info!(
        "replayed {} orders ({} skipped): {} traded, {} resting bids, {} resting asks",
        stats.orders(),
        skipped,
        stats.orders_traded(),
        engine.bids().len(),
        engine.asks().len(),
    );

    Ok(Replay { engine, stats, skipped })
}

/// Print the top `depth` levels of each side, asks above bids.
pub fn write_book<W: Write>(out: &mut W, engine: &MatchingEngine, depth: usize) -> Result<()> {
    let asks = engine.asks().depth(depth);
    let bids = engine.bids().depth(depth);

    writeln!(out, "asks:")?;
    for level in asks.iter().rev() {
        write_level(out, level)?;
    }
    writeln!(out, "bids:")?;
    for level in &bids {
        write_level(out, level)?;
    }
    Ok(())
}

fn write_level<W: Write>(out: &mut W, level: &LevelSummary) -> Result<()> {
    writeln!(
        out,
        "  {:>10} x {:<10} ({} orders)",
        level.price, level.quantity, level.orders
    )?;
    Ok(())
}
