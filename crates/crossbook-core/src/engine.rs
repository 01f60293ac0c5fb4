//! Matching engine core.
//!
//! The matching algorithm implements price-time priority: an incoming
//! order walks the opposite side from its best price, trading at each
//! resting order's price until it is filled or the next price no longer
//! crosses. Whatever is left rests on its own side.

use alloc::vec::Vec;
use core::ops::ControlFlow;
use log::{debug, trace};
use crate::aggregate::aggregate;
use crate::book::{AskBook, BidBook, BookSide};
use crate::fixed::{Price, Quantity};
use crate::order::{IncomingOrder, RestingOrder, Side, Trade, TradeFragment};
use crate::priority::Priority;

/// The matching engine for one instrument.
///
/// Owns both sides of the book. Instruments do not share engines.
#[derive(Clone, Debug, Default)]
pub struct MatchingEngine {
    /// Bid side (buyers).
    bids: BidBook,
    /// Ask side (sellers).
    asks: AskBook,
    /// Orders submitted so far.
    submitted: u64,
}

impl MatchingEngine {
    /// Create an engine with an empty book.
    pub fn new() -> Self {
        Self::default()
    }

    /// Submit an order and get the aggregated trade report.
    ///
    /// The report is grouped by trader, side and price; see
    /// [`aggregate`](crate::aggregate::aggregate). Empty when nothing traded.
    pub fn submit(&mut self, order: IncomingOrder) -> Vec<Trade> {
        aggregate(self.match_order(order))
    }

    /// Submit an order and get the raw fragments in execution order.
    ///
    /// Two fragments per match step: aggressor first, then the resting
    /// counterparty.
    pub fn match_order(&mut self, order: IncomingOrder) -> Vec<TradeFragment> {
        self.submitted += 1;

        let mut fragments = Vec::new();
        match order.side {
            Side::Buy => execute(&mut self.asks, &mut self.bids, order, &mut fragments),
            Side::Sell => execute(&mut self.bids, &mut self.asks, order, &mut fragments),
        };
        fragments
    }

    /// Bid side of the book.
    #[inline(always)]
    pub fn bids(&self) -> &BidBook {
        &self.bids
    }

    /// Ask side of the book.
    #[inline(always)]
    pub fn asks(&self) -> &AskBook {
        &self.asks
    }

    /// Get best bid price.
    #[inline(always)]
    pub fn best_bid(&self) -> Option<Price> {
        self.bids.best_price()
    }

    /// Get best ask price.
    #[inline(always)]
    pub fn best_ask(&self) -> Option<Price> {
        self.asks.best_price()
    }

    /// Get the spread (best ask - best bid).
    ///
    /// Between submit calls the book is never crossed, so this is only
    /// `None` when a side is empty.
    pub fn spread(&self) -> Option<Price> {
        match (self.best_bid(), self.best_ask()) {
            (Some(bid), Some(ask)) if ask > bid => Some(ask.saturating_sub(bid)),
            _ => None,
        }
    }

    /// Number of orders submitted.
    #[inline(always)]
    pub fn submitted(&self) -> u64 {
        self.submitted
    }

    /// Check if book is empty.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.bids.is_empty() && self.asks.is_empty()
    }
}

/// Cross `order` against `opposing`, then rest its remainder on `same_side`.
///
/// `S` ranks the incoming order's own side and decides which resting prices
/// it accepts. Returns the number of resting orders filled and removed.
fn execute<O, S>(
    opposing: &mut BookSide<O>,
    same_side: &mut BookSide<S>,
    mut order: IncomingOrder,
    fragments: &mut Vec<TradeFragment>,
) -> usize
where
    O: Priority,
    S: Priority,
{
    debug_assert_eq!(order.side, S::SIDE);
    debug_assert_eq!(order.side.opposite(), O::SIDE);

    if order.is_exhausted() {
        return 0;
    }
    let quantity = order.quantity;

    let removed = if opposing.is_empty() {
        0
    } else {
        opposing.consume_front_while(|resting| {
            if order.is_exhausted() || !S::accepts(resting.price, order.price) {
                return ControlFlow::Break(());
            }

            let overlap = resting.quantity.min(order.quantity);
            order.quantity -= overlap;
            resting.fill(overlap);

            trace!(
                "{} {:?} {} against {} @{} (resting left {})",
                order.trader_id,
                order.side,
                overlap,
                resting.trader_id,
                resting.price,
                resting.quantity,
            );

            fragments.push(fill(&order.trader_id, order.side, overlap, resting));
            fragments.push(fill(&resting.trader_id, order.side.opposite(), overlap, resting));
            ControlFlow::Continue(())
        })
    };

    debug!(
        "{} {:?} {}@{}: filled {}, {} resting orders removed, {} left",
        order.trader_id,
        order.side,
        quantity,
        order.price,
        quantity - order.quantity,
        removed,
        order.quantity,
    );

    if !order.is_exhausted() {
        same_side.insert(order.into_resting());
    }

    removed
}

#[inline(always)]
fn fill(trader_id: &str, side: Side, quantity: Quantity, resting: &RestingOrder) -> TradeFragment {
    TradeFragment::new(trader_id, side, quantity, resting.price)
}
