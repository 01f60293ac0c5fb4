//! Submit latency and fill counters.
//!
//! Latencies are recorded in nanoseconds into an HdrHistogram; timing uses
//! a `quanta::Clock` so the hot loop never touches `SystemTime`.

use std::fmt;
use crossbook_core::{Side, Trade};
use hdrhistogram::{CreationError, Histogram};

/// High-precision latency histogram.
pub struct LatencyHistogram {
    histogram: Histogram<u64>,
}

impl LatencyHistogram {
    /// Create a new histogram with 3 significant digits.
    pub fn new() -> Result<Self, CreationError> {
        Self::with_precision(3)
    }

    /// Create with custom precision (1-5 significant digits).
    pub fn with_precision(sigfig: u8) -> Result<Self, CreationError> {
        Ok(Self {
            histogram: Histogram::new(sigfig)?,
        })
    }

    /// Record a latency value in nanoseconds.
    #[inline(always)]
    pub fn record(&mut self, nanos: u64) {
        self.histogram.saturating_record(nanos);
    }

    /// Get value at percentile (0.0 - 100.0).
    pub fn value_at_percentile(&self, percentile: f64) -> u64 {
        self.histogram.value_at_quantile(percentile / 100.0)
    }

    /// Get maximum latency.
    pub fn max(&self) -> u64 {
        self.histogram.max()
    }

    /// Get minimum latency.
    pub fn min(&self) -> u64 {
        self.histogram.min()
    }

    /// Get mean latency.
    pub fn mean(&self) -> f64 {
        self.histogram.mean()
    }

    /// Get total count of recorded values.
    pub fn count(&self) -> u64 {
        self.histogram.len()
    }

    /// Snapshot of the usual percentiles.
    pub fn summary(&self) -> LatencySummary {
        LatencySummary {
            count: self.count(),
            p50: self.value_at_percentile(50.0),
            p90: self.value_at_percentile(90.0),
            p99: self.value_at_percentile(99.0),
            p999: self.value_at_percentile(99.9),
            max: self.max(),
        }
    }
}

/// Percentile snapshot, in nanoseconds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LatencySummary {
    pub count: u64,
    pub p50: u64,
    pub p90: u64,
    pub p99: u64,
    pub p999: u64,
    pub max: u64,
}

impl fmt::Display for LatencySummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "n={} p50={} p90={} p99={} p99.9={} max={}",
            self.count,
            format_nanos(self.p50),
            format_nanos(self.p90),
            format_nanos(self.p99),
            format_nanos(self.p999),
            format_nanos(self.max),
        )
    }
}

/// Format latency with appropriate units.
pub fn format_nanos(nanos: u64) -> String {
    if nanos < 1_000 {
        format!("{} ns", nanos)
    } else if nanos < 1_000_000 {
        format!("{:.2} μs", nanos as f64 / 1_000.0)
    } else if nanos < 1_000_000_000 {
        format!("{:.2} ms", nanos as f64 / 1_000_000.0)
    } else {
        format!("{:.2} s", nanos as f64 / 1_000_000_000.0)
    }
}

/// Counters for a run of submit calls.
pub struct SubmitStats {
    clock: quanta::Clock,
    latency: LatencyHistogram,
    orders: u64,
    orders_traded: u64,
    trades: u64,
    filled: u64,
}

impl SubmitStats {
    /// Create empty stats.
    pub fn new() -> Result<Self, CreationError> {
        Ok(Self {
            clock: quanta::Clock::new(),
            latency: LatencyHistogram::new()?,
            orders: 0,
            orders_traded: 0,
            trades: 0,
            filled: 0,
        })
    }

    /// Time one submit call and count its report.
    #[inline]
    pub fn observe<F>(&mut self, submit: F) -> Vec<Trade>
    where
        F: FnOnce() -> Vec<Trade>,
    {
        let start = self.clock.raw();
        let trades = submit();
        let end = self.clock.raw();

        self.latency.record(self.clock.delta_as_nanos(start, end));
        self.count(&trades);
        trades
    }

    /// Count a report without timing it.
    pub fn count(&mut self, trades: &[Trade]) {
        self.orders += 1;
        if !trades.is_empty() {
            self.orders_traded += 1;
        }
        self.trades += trades.len() as u64;
        // Every fill appears once on each side; count the buy half.
        self.filled += trades
            .iter()
            .filter(|t| t.side == Side::Buy)
            .map(|t| t.quantity.as_raw())
            .sum::<u64>();
    }

    /// Orders observed.
    pub fn orders(&self) -> u64 {
        self.orders
    }

    /// Orders that produced at least one trade.
    pub fn orders_traded(&self) -> u64 {
        self.orders_traded
    }

    /// Trade records reported.
    pub fn trades(&self) -> u64 {
        self.trades
    }

    /// Total quantity that changed hands.
    pub fn filled(&self) -> u64 {
        self.filled
    }

    /// Submit latency histogram.
    pub fn latency(&self) -> &LatencyHistogram {
        &self.latency
    }
}

impl fmt::Display for SubmitStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "orders={} traded={} trades={} filled={} latency: {}",
            self.orders,
            self.orders_traded,
            self.trades,
            self.filled,
            self.latency.summary(),
        )
    }
}
