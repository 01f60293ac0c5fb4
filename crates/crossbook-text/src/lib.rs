//! Line-oriented text codec for order entry and trade reports.
//!
//! Inbound: one order per line, `TRADER SIDE QTY PRICE`, ended by a blank
//! line or EOF. Outbound: one line per order that traded, each trade
//! rendered as `TRADER{+|-}QTY@PRICE` followed by a space.

pub mod parser;
pub mod writer;

pub use parser::*;
pub use writer::*;
