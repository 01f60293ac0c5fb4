//! Order and trade records.
//!
//! An [`IncomingOrder`] lives for one submit call. Whatever it does not
//! fill becomes a [`RestingOrder`] in the book for its side; the side itself
//! is implied by which book holds it.

use alloc::string::String;
use crate::fixed::{Price, Quantity};

/// Side of the order book.
///
/// The declaration order is significant: trade reports sort sells before
/// buys for the same trader.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Side {
    /// Ask side (sellers).
    Sell = 0,
    /// Bid side (buyers).
    Buy = 1,
}

impl Side {
    /// Get the opposite side.
    #[inline(always)]
    pub const fn opposite(self) -> Self {
        match self {
            Side::Buy => Side::Sell,
            Side::Sell => Side::Buy,
        }
    }

    /// Check if this is the buy side.
    #[inline(always)]
    pub const fn is_buy(self) -> bool {
        matches!(self, Side::Buy)
    }

    /// Check if this is the sell side.
    #[inline(always)]
    pub const fn is_sell(self) -> bool {
        matches!(self, Side::Sell)
    }
}

/// An order being submitted (the aggressor).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IncomingOrder {
    /// Submitting trader.
    pub trader_id: String,
    /// Buy or sell.
    pub side: Side,
    /// Quantity still to fill.
    pub quantity: Quantity,
    /// Limit price.
    pub price: Price,
}

impl IncomingOrder {
    /// Create a new order.
    pub fn new(trader_id: impl Into<String>, side: Side, quantity: Quantity, price: Price) -> Self {
        Self {
            trader_id: trader_id.into(),
            side,
            quantity,
            price,
        }
    }

    /// Create a buy order.
    pub fn buy(trader_id: impl Into<String>, quantity: Quantity, price: Price) -> Self {
        Self::new(trader_id, Side::Buy, quantity, price)
    }

    /// Create a sell order.
    pub fn sell(trader_id: impl Into<String>, quantity: Quantity, price: Price) -> Self {
        Self::new(trader_id, Side::Sell, quantity, price)
    }

    /// Check if nothing is left to fill.
    #[inline(always)]
    pub const fn is_exhausted(&self) -> bool {
        self.quantity.is_zero()
    }

    /// Convert the unfilled remainder into a book entry.
    #[inline]
    pub fn into_resting(self) -> RestingOrder {
        RestingOrder {
            trader_id: self.trader_id,
            price: self.price,
            quantity: self.quantity,
        }
    }
}

/// An order sitting in one side of the book.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RestingOrder {
    /// Owning trader.
    pub trader_id: String,
    /// Limit price; also the execution price for anyone trading against it.
    pub price: Price,
    /// Remaining quantity. Non-zero between submit calls.
    pub quantity: Quantity,
}

impl RestingOrder {
    /// Create a new resting order.
    pub fn new(trader_id: impl Into<String>, price: Price, quantity: Quantity) -> Self {
        Self {
            trader_id: trader_id.into(),
            price,
            quantity,
        }
    }

    /// Check if completely filled.
    #[inline(always)]
    pub const fn is_filled(&self) -> bool {
        self.quantity.is_zero()
    }

    /// Fill by the given quantity.
    ///
    /// # Panics
    /// Debug-panics if qty > quantity.
    #[inline(always)]
    pub fn fill(&mut self, qty: Quantity) {
        debug_assert!(qty <= self.quantity, "Fill quantity exceeds remaining");
        self.quantity = self.quantity.saturating_sub(qty);
    }
}

/// One party's half of a match step.
///
/// Every match produces two fragments at the resting order's price: one for
/// the aggressor on its own side, one for the resting trader on the other.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TradeFragment {
    /// Trader this fragment is attributed to.
    pub trader_id: String,
    /// Side this trader was on.
    pub side: Side,
    /// Executed quantity.
    pub quantity: Quantity,
    /// Execution price.
    pub price: Price,
}

/// A reported trade. Same shape as a fragment, possibly with merged quantity.
pub type Trade = TradeFragment;

impl TradeFragment {
    /// Create a new fragment.
    pub fn new(trader_id: impl Into<String>, side: Side, quantity: Quantity, price: Price) -> Self {
        Self {
            trader_id: trader_id.into(),
            side,
            quantity,
            price,
        }
    }

    /// Identity used for report ordering and merging.
    #[inline]
    pub fn key(&self) -> (&str, Side, Price) {
        (self.trader_id.as_str(), self.side, self.price)
    }
}
