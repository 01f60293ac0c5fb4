//! # Crossbook Core
//!
//! Order book and price-time priority matching for a continuous
//! double auction.
//!
//! ## Design Principles
//! - One engine per instrument, owning both book sides
//! - Integer prices and quantities (no floats)
//! - Single-threaded and synchronous: `submit` runs to completion
//! - No I/O; logging goes through the `log` facade only

#![no_std]

extern crate alloc;

pub mod fixed;
pub mod order;
pub mod priority;
pub mod level;
pub mod book;
pub mod aggregate;
pub mod engine;

pub use fixed::{Price, Quantity, Volume};
pub use order::{IncomingOrder, RestingOrder, Side, Trade, TradeFragment};
pub use priority::{crosses, AskOrder, BidOrder, Priority};
pub use level::PriceLevel;
pub use book::{AskBook, BidBook, BookSide, LevelSummary};
pub use aggregate::aggregate;
pub use engine::MatchingEngine;
