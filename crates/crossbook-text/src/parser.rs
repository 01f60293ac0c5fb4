//! Order line parser.
//!
//! Validation happens here, at the boundary: the engine assumes every
//! order it sees has a two-valued side and in-range integers.

use std::io::{self, BufRead};
use std::num::ParseIntError;
use std::str::{self, Utf8Error};
use crossbook_core::{IncomingOrder, Price, Quantity, Side};
use thiserror::Error;

/// Parse error types.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Line bytes are not UTF-8.
    #[error("line is not valid UTF-8")]
    InvalidUtf8(#[source] Utf8Error),
    /// Line ended before all four fields were read.
    #[error("missing {0} field")]
    MissingField(&'static str),
    /// Side token is not `B` or `S`.
    #[error("invalid side {0:?}, expected B or S")]
    InvalidSide(String),
    /// Quantity is not an unsigned integer.
    #[error("invalid quantity {value:?}")]
    InvalidQuantity {
        value: String,
        #[source]
        source: ParseIntError,
    },
    /// Price is not an unsigned integer.
    #[error("invalid price {value:?}")]
    InvalidPrice {
        value: String,
        #[source]
        source: ParseIntError,
    },
    /// Extra token after the price.
    #[error("unexpected trailing field {0:?}")]
    TrailingField(String),
}

/// Errors surfaced while reading an order stream.
#[derive(Debug, Error)]
pub enum ReadError {
    /// Underlying reader failed.
    #[error("failed to read order stream")]
    Io(#[from] io::Error),
    /// A line did not parse.
    #[error("line {line}")]
    Parse {
        line: usize,
        #[source]
        source: ParseError,
    },
}

/// Parse a side token.
pub fn parse_side(token: &str) -> Result<Side, ParseError> {
    match token {
        "B" => Ok(Side::Buy),
        "S" => Ok(Side::Sell),
        other => Err(ParseError::InvalidSide(other.to_string())),
    }
}

/// Parse one order line.
///
/// Returns `Ok(None)` for a blank line, which ends the stream.
pub fn parse_line(line: &str) -> Result<Option<IncomingOrder>, ParseError> {
    let mut fields = line.split_whitespace();

    let Some(trader_id) = fields.next() else {
        return Ok(None);
    };

    let side = parse_side(fields.next().ok_or(ParseError::MissingField("side"))?)?;

    let qty = fields.next().ok_or(ParseError::MissingField("quantity"))?;
    let quantity = qty.parse::<u64>().map_err(|source| ParseError::InvalidQuantity {
        value: qty.to_string(),
        source,
    })?;

    let px = fields.next().ok_or(ParseError::MissingField("price"))?;
    let price = px.parse::<u64>().map_err(|source| ParseError::InvalidPrice {
        value: px.to_string(),
        source,
    })?;

    if let Some(extra) = fields.next() {
        return Err(ParseError::TrailingField(extra.to_string()));
    }

    Ok(Some(IncomingOrder::new(trader_id, side, Quantity(quantity), Price(price))))
}

/// Streaming order reader.
///
/// Yields `(line_number, order)` pairs, 1-based. Stops at EOF or the first
/// blank line. A malformed line, including one that is not UTF-8, yields a
/// [`ReadError::Parse`] and reading may continue. Only I/O errors end the
/// stream early.
pub struct OrderReader<R> {
    reader: R,
    line: usize,
    buffer: Vec<u8>,
    done: bool,
}

impl<R: BufRead> OrderReader<R> {
    /// Wrap a buffered reader.
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line: 0,
            buffer: Vec::new(),
            done: false,
        }
    }

    /// Lines consumed so far.
    #[inline]
    pub fn line(&self) -> usize {
        self.line
    }
}

impl<R: BufRead> Iterator for OrderReader<R> {
    type Item = Result<(usize, IncomingOrder), ReadError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        self.buffer.clear();
        match self.reader.read_until(b'\n', &mut self.buffer) {
            Ok(0) => {
                self.done = true;
                return None;
            }
            Ok(_) => self.line += 1,
            Err(e) => {
                self.done = true;
                return Some(Err(ReadError::Io(e)));
            }
        }

        let parsed = str::from_utf8(&self.buffer)
            .map_err(ParseError::InvalidUtf8)
            .and_then(parse_line);

        match parsed {
            Ok(Some(order)) => Some(Ok((self.line, order))),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(source) => Some(Err(ReadError::Parse { line: self.line, source })),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_buy_and_sell() {
        let buy = parse_line("Bob B 4 101\n").unwrap().unwrap();
        assert_eq!(buy, IncomingOrder::buy("Bob", Quantity(4), Price(101)));

        let sell = parse_line("  Alice\tS 10   100").unwrap().unwrap();
        assert_eq!(sell, IncomingOrder::sell("Alice", Quantity(10), Price(100)));
    }

    #[test]
    fn test_blank_line_ends_stream() {
        assert_eq!(parse_line(""), Ok(None));
        assert_eq!(parse_line("   \r\n"), Ok(None));
    }

    #[test]
    fn test_missing_fields() {
        assert_eq!(parse_line("Bob"), Err(ParseError::MissingField("side")));
        assert_eq!(parse_line("Bob B"), Err(ParseError::MissingField("quantity")));
        assert_eq!(parse_line("Bob B 4"), Err(ParseError::MissingField("price")));
    }

    #[test]
    fn test_rejects_bad_side() {
        assert_eq!(parse_line("Bob X 4 101"), Err(ParseError::InvalidSide("X".into())));
        assert_eq!(parse_line("Bob b 4 101"), Err(ParseError::InvalidSide("b".into())));
    }

    #[test]
    fn test_rejects_negative_and_overflowing_numbers() {
        assert!(matches!(
            parse_line("Bob B -4 101"),
            Err(ParseError::InvalidQuantity { ref value, .. }) if value == "-4"
        ));
        assert!(matches!(
            parse_line("Bob B 4 18446744073709551616"),
            Err(ParseError::InvalidPrice { .. })
        ));
    }

    #[test]
    fn test_rejects_trailing_field() {
        assert_eq!(
            parse_line("Bob B 4 101 GTC"),
            Err(ParseError::TrailingField("GTC".into()))
        );
    }

    #[test]
    fn test_reader_stops_at_blank_line() {
        let input = "Alice S 10 100\nBob B 4 101\n\nCarol B 1 1\n";
        let mut reader = OrderReader::new(input.as_bytes());

        let orders: Vec<_> = reader.by_ref().map(|r| r.unwrap()).collect();
        assert_eq!(orders.len(), 2);
        assert_eq!(orders[1].0, 2);
        assert_eq!(orders[1].1.trader_id, "Bob");
        assert_eq!(reader.line(), 3);
        assert!(reader.next().is_none());
    }

    #[test]
    fn test_reader_reports_line_numbers() {
        let input = "Alice S 10 100\nBob Q 4 101\nCarol B 1 1";
        let results: Vec<_> = OrderReader::new(input.as_bytes()).collect();

        assert_eq!(results.len(), 3);
        assert!(results[0].is_ok());
        match &results[1] {
            Err(ReadError::Parse { line, source }) => {
                assert_eq!(*line, 2);
                assert_eq!(*source, ParseError::InvalidSide("Q".into()));
            }
            other => panic!("Expected parse error, got {:?}", other),
        }
        assert_eq!(results[2].as_ref().map(|(line, _)| *line).ok(), Some(3));
    }

    #[test]
    fn test_reader_continues_past_invalid_utf8() {
        let input: &[u8] = b"Alice S 10 100\nBo\xffb B 4 101\nCarol B 4 101\n";
        let results: Vec<_> = OrderReader::new(input).collect();

        assert_eq!(results.len(), 3);
        assert!(matches!(
            results[1],
            Err(ReadError::Parse { line: 2, source: ParseError::InvalidUtf8(_) })
        ));
        match &results[2] {
            Ok((line, order)) => {
                assert_eq!(*line, 3);
                assert_eq!(*order, IncomingOrder::buy("Carol", Quantity(4), Price(101)));
            }
            other => panic!("Expected Carol's order, got {:?}", other),
        }
    }

    #[test]
    fn test_error_messages_leave_cause_to_source() {
        use std::error::Error;

        let err = parse_line("Bob B four 101").unwrap_err();
        assert_eq!(err.to_string(), "invalid quantity \"four\"");
        assert!(err.source().is_some());

        let err = ReadError::Parse { line: 7, source: err };
        assert_eq!(err.to_string(), "line 7");
    }
}
