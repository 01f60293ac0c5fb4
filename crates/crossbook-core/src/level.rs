//! Price level queue management.
//!
//! A price level contains all resting orders at one price,
//! organized as a FIFO queue (price-time priority).

use alloc::collections::VecDeque;
use core::ops::ControlFlow;
use crate::fixed::{Price, Volume};
use crate::order::RestingOrder;

/// Outcome of scanning one level from the front.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LevelScan {
    /// Quantity taken out of this level.
    pub filled: Volume,
    /// Leading orders left at zero quantity.
    pub exhausted: usize,
    /// The visitor asked to stop inside this level.
    pub stopped: bool,
}

/// A single price level in the order book.
#[derive(Clone, Debug)]
pub struct PriceLevel {
    /// Price shared by every order here.
    price: Price,
    /// Total quantity at this level.
    total_qty: Volume,
    /// Orders in arrival order.
    orders: VecDeque<RestingOrder>,
}

impl PriceLevel {
    /// Create a new empty price level.
    pub fn new(price: Price) -> Self {
        Self {
            price,
            total_qty: Volume::ZERO,
            orders: VecDeque::new(),
        }
    }

    /// Price of this level.
    #[inline(always)]
    pub const fn price(&self) -> Price {
        self.price
    }

    /// Total resting quantity.
    #[inline(always)]
    pub const fn total_qty(&self) -> Volume {
        self.total_qty
    }

    /// Check if level is empty.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    /// Number of orders at this level.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.orders.len()
    }

    /// Add order to back of queue.
    #[inline]
    pub fn push_back(&mut self, order: RestingOrder) {
        debug_assert_eq!(order.price, self.price, "Order placed on wrong level");
        self.total_qty += order.quantity;
        self.orders.push_back(order);
    }

    /// Front order (next to match).
    #[inline(always)]
    pub fn front(&self) -> Option<&RestingOrder> {
        self.orders.front()
    }

    /// Orders in time priority.
    pub fn iter(&self) -> impl Iterator<Item = &RestingOrder> + '_ {
        self.orders.iter()
    }

    /// Visit orders front to back until `visit` breaks.
    ///
    /// The visitor may only reduce the quantity of the order it is handed,
    /// and must leave it untouched when it breaks.
    pub fn consume_front_while<F>(&mut self, visit: &mut F) -> LevelScan
    where
        F: FnMut(&mut RestingOrder) -> ControlFlow<()>,
    {
        let mut scan = LevelScan::default();

        for order in self.orders.iter_mut() {
            let before = order.quantity;
            if visit(order).is_break() {
                debug_assert_eq!(order.quantity, before, "Visitor changed an order it stopped at");
                scan.stopped = true;
                break;
            }
            debug_assert!(order.quantity <= before, "Visitor increased a resting quantity");
            scan.filled += before - order.quantity;
            if order.is_filled() {
                scan.exhausted += 1;
            }
        }

        self.total_qty -= scan.filled;
        scan
    }

    /// Drop up to `count` orders from the front. All of them must be filled.
    ///
    /// Returns how many were removed.
    pub fn erase_front(&mut self, count: usize) -> usize {
        let count = count.min(self.orders.len());
        for order in self.orders.drain(..count) {
            debug_assert!(order.is_filled(), "Erased a live order: {:?}", order);
        }
        count
    }
}
