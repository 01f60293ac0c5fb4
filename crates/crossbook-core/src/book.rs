//! Order book data structures.
//!
//! Each side keeps its price levels in a `BTreeMap` keyed by the side's
//! [`Priority`] key, so the first entry is always the best price. Orders
//! within a level are FIFO.

use alloc::collections::BTreeMap;
use alloc::vec::Vec;
use core::marker::PhantomData;
use core::ops::ControlFlow;
use crate::fixed::{Price, Volume};
use crate::level::PriceLevel;
use crate::order::{RestingOrder, Side};
use crate::priority::{AskOrder, BidOrder, Priority};

/// Aggregated view of one price level.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LevelSummary {
    /// Level price.
    pub price: Price,
    /// Sum of resting quantity.
    pub quantity: Volume,
    /// Number of resting orders.
    pub orders: usize,
}

/// One side of the order book (Bids or Asks).
#[derive(Clone, Debug)]
pub struct BookSide<P: Priority> {
    /// Price levels, best first.
    levels: BTreeMap<P::Key, PriceLevel>,
    /// Total order count on this side.
    order_count: usize,
    /// Total quantity on this side.
    total_qty: Volume,
    _priority: PhantomData<P>,
}

/// Buy side, best (highest) bid first.
pub type BidBook = BookSide<BidOrder>;

/// Sell side, best (lowest) ask first.
pub type AskBook = BookSide<AskOrder>;

impl<P: Priority> BookSide<P> {
    /// Create an empty book side.
    pub fn new() -> Self {
        Self {
            levels: BTreeMap::new(),
            order_count: 0,
            total_qty: Volume::ZERO,
            _priority: PhantomData,
        }
    }

    /// Side this book holds.
    #[inline(always)]
    pub fn side(&self) -> Side {
        P::SIDE
    }

    /// Highest-priority resting order.
    #[inline]
    pub fn best(&self) -> Option<&RestingOrder> {
        self.levels.values().next().and_then(PriceLevel::front)
    }

    /// Best price on this side.
    #[inline]
    pub fn best_price(&self) -> Option<Price> {
        self.levels.values().next().map(PriceLevel::price)
    }

    /// Add an order behind everything already resting at its price.
    pub fn insert(&mut self, order: RestingOrder) {
        debug_assert!(!order.is_filled(), "Resting order with zero quantity");

        let price = order.price;
        self.order_count += 1;
        self.total_qty += order.quantity;
        self.levels
            .entry(P::key(price))
            .or_insert_with(|| PriceLevel::new(price))
            .push_back(order);
    }

    /// Walk resting orders in priority order until `visit` breaks, then
    /// erase the fully consumed ones.
    ///
    /// Consumption is strictly front to back, so the filled orders always
    /// form a prefix of the book and come off in one erase. Returns the
    /// number of orders removed.
    pub fn consume_front_while<F>(&mut self, mut visit: F) -> usize
    where
        F: FnMut(&mut RestingOrder) -> ControlFlow<()>,
    {
        let mut exhausted = 0;

        for level in self.levels.values_mut() {
            let scan = level.consume_front_while(&mut visit);
            self.total_qty -= scan.filled;
            exhausted += scan.exhausted;
            if scan.stopped {
                break;
            }
        }

        self.erase_prefix(exhausted);
        exhausted
    }

    /// Remove the first `count` orders in priority order.
    fn erase_prefix(&mut self, count: usize) {
        let mut remaining = count;

        while remaining > 0 {
            let Some(mut entry) = self.levels.first_entry() else {
                break;
            };
            remaining -= entry.get_mut().erase_front(remaining);
            if entry.get().is_empty() {
                entry.remove();
            }
        }

        debug_assert_eq!(remaining, 0, "Prefix erase ran past the end of the book");
        self.order_count -= count - remaining;
    }

    /// Resting orders in priority order.
    pub fn iter(&self) -> impl Iterator<Item = &RestingOrder> + '_ {
        self.levels.values().flat_map(|level| level.iter())
    }

    /// Top `depth` levels, best first.
    pub fn depth(&self, depth: usize) -> Vec<LevelSummary> {
        self.levels
            .values()
            .take(depth)
            .map(|level| LevelSummary {
                price: level.price(),
                quantity: level.total_qty(),
                orders: level.len(),
            })
            .collect()
    }

    /// Check if side is empty.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Get order count.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.order_count
    }

    /// Number of distinct prices.
    #[inline(always)]
    pub fn level_count(&self) -> usize {
        self.levels.len()
    }

    /// Get total quantity.
    #[inline(always)]
    pub fn total_quantity(&self) -> Volume {
        self.total_qty
    }
}

impl<P: Priority> Default for BookSide<P> {
    fn default() -> Self {
        Self::new()
    }
}
