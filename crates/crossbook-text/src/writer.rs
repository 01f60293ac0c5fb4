//! Trade report rendering.

use std::fmt;
use std::io::{self, Write};
use crossbook_core::{Side, Trade};

/// Symbol printed between trader and quantity.
#[inline(always)]
pub const fn side_symbol(side: Side) -> char {
    match side {
        Side::Buy => '+',
        Side::Sell => '-',
    }
}

/// One trade as `TRADER{+|-}QTY@PRICE`.
pub struct TradeDisplay<'a>(pub &'a Trade);

impl fmt::Display for TradeDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let trade = self.0;
        write!(
            f,
            "{}{}{}@{}",
            trade.trader_id,
            side_symbol(trade.side),
            trade.quantity,
            trade.price
        )
    }
}

/// A full report line, every trade followed by a space. No newline.
pub struct ReportLine<'a>(pub &'a [Trade]);

impl fmt::Display for ReportLine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for trade in self.0 {
            write!(f, "{} ", TradeDisplay(trade))?;
        }
        Ok(())
    }
}

/// Write the report for one order. Writes nothing when `trades` is empty.
///
/// Returns whether a line was written.
pub fn write_report<W: Write>(out: &mut W, trades: &[Trade]) -> io::Result<bool> {
    if trades.is_empty() {
        return Ok(false);
    }
    writeln!(out, "{}", ReportLine(trades))?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbook_core::{Price, Quantity, TradeFragment};

    fn trade(trader: &str, side: Side, qty: u64, price: u64) -> Trade {
        TradeFragment::new(trader, side, Quantity(qty), Price(price))
    }

    #[test]
    fn test_trade_display() {
        let t = trade("Alice", Side::Sell, 4, 100);
        assert_eq!(TradeDisplay(&t).to_string(), "Alice-4@100");

        let t = trade("Bob", Side::Buy, 4, 100);
        assert_eq!(TradeDisplay(&t).to_string(), "Bob+4@100");
    }

    #[test]
    fn test_report_line_has_trailing_spaces() {
        let trades = vec![trade("Alice", Side::Sell, 4, 100), trade("Bob", Side::Buy, 4, 100)];

        let mut out = Vec::new();
        assert!(write_report(&mut out, &trades).unwrap());
        assert_eq!(String::from_utf8(out).unwrap(), "Alice-4@100 Bob+4@100 \n");
    }

    #[test]
    fn test_empty_report_writes_nothing() {
        let mut out = Vec::new();
        assert!(!write_report(&mut out, &[]).unwrap());
        assert!(out.is_empty());
    }
}
