//! Price-level comparators.
//!
//! Each book side ranks its resting orders by price only: bids best-first
//! from the highest price, asks best-first from the lowest. Time priority
//! among equal prices is kept by the level queue, not here.
//!
//! The same ordering, negated, decides whether an incoming order crosses:
//! a resting order is acceptable unless the incoming side's comparator
//! would rank it ahead of the incoming price.

use core::cmp::Reverse;
use crate::fixed::Price;
use crate::order::Side;

/// Ranking of one book side.
pub trait Priority {
    /// Map key whose ascending order is best-price-first.
    type Key: Ord + Copy + core::fmt::Debug;

    /// Side whose orders this ranks.
    const SIDE: Side;

    /// Key under which a price level is stored.
    fn key(price: Price) -> Self::Key;

    /// `a` ranks strictly ahead of `b`.
    fn before(a: Price, b: Price) -> bool;

    /// Whether an incoming order on this side at `incoming` may trade
    /// against a resting order on the other side at `resting`.
    #[inline(always)]
    fn accepts(resting: Price, incoming: Price) -> bool {
        !Self::before(resting, incoming)
    }
}

/// Bid ranking: higher price first.
#[derive(Clone, Copy, Debug, Default)]
pub struct BidOrder;

impl Priority for BidOrder {
    type Key = Reverse<Price>;
    const SIDE: Side = Side::Buy;

    #[inline(always)]
    fn key(price: Price) -> Self::Key {
        Reverse(price)
    }

    #[inline(always)]
    fn before(a: Price, b: Price) -> bool {
        a > b
    }
}

/// Ask ranking: lower price first.
#[derive(Clone, Copy, Debug, Default)]
pub struct AskOrder;

impl Priority for AskOrder {
    type Key = Price;
    const SIDE: Side = Side::Sell;

    #[inline(always)]
    fn key(price: Price) -> Self::Key {
        price
    }

    #[inline(always)]
    fn before(a: Price, b: Price) -> bool {
        a < b
    }
}

/// Runtime-sided crossing test.
///
/// Buy crosses if `incoming >= resting`, sell crosses if `incoming <= resting`.
#[inline(always)]
pub fn crosses(incoming_side: Side, incoming: Price, resting: Price) -> bool {
    match incoming_side {
        Side::Buy => BidOrder::accepts(resting, incoming),
        Side::Sell => AskOrder::accepts(resting, incoming),
    }
}
