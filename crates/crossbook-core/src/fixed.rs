//! Integer prices and quantities.
//!
//! Both are plain non-negative integers; the book never scales or rounds
//! them, so matching is exact and deterministic across platforms.

use core::fmt;
use core::ops::{Add, AddAssign, Sub, SubAssign};

/// Limit or execution price, in whatever integer unit the feed uses.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct Price(pub u64);

impl Price {
    /// Zero price.
    pub const ZERO: Self = Self(0);

    /// Get raw internal value.
    #[inline(always)]
    pub const fn as_raw(self) -> u64 {
        self.0
    }

    /// Check if price is zero.
    #[inline(always)]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Saturating subtraction.
    #[inline(always)]
    pub const fn saturating_sub(self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl From<u64> for Price {
    #[inline(always)]
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

/// Quantity in base units (shares, contracts, lots).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct Quantity(pub u64);

impl Quantity {
    /// Zero quantity.
    pub const ZERO: Self = Self(0);

    /// Check if quantity is zero.
    #[inline(always)]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Get raw value.
    #[inline(always)]
    pub const fn as_raw(self) -> u64 {
        self.0
    }

    /// Saturating addition.
    #[inline(always)]
    pub const fn saturating_add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }

    /// Saturating subtraction.
    #[inline(always)]
    pub const fn saturating_sub(self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }

    /// Minimum of two quantities.
    #[inline(always)]
    pub const fn min(self, other: Self) -> Self {
        if self.0 < other.0 { self } else { other }
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl From<u64> for Quantity {
    #[inline(always)]
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

impl Add for Quantity {
    type Output = Self;

    #[inline(always)]
    fn add(self, other: Self) -> Self {
        Self(self.0 + other.0)
    }
}

impl AddAssign for Quantity {
    #[inline(always)]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Quantity {
    type Output = Self;

    #[inline(always)]
    fn sub(self, other: Self) -> Self {
        Self(self.0 - other.0)
    }
}

impl SubAssign for Quantity {
    #[inline(always)]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Sum of many quantities.
///
/// Wide enough that a level or side total never saturates, so it always
/// equals the sum of the orders it covers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct Volume(pub u128);

impl Volume {
    /// Zero volume.
    pub const ZERO: Self = Self(0);

    /// Check if volume is zero.
    #[inline(always)]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Get raw value.
    #[inline(always)]
    pub const fn as_raw(self) -> u128 {
        self.0
    }
}

impl fmt::Display for Volume {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl From<Quantity> for Volume {
    #[inline(always)]
    fn from(qty: Quantity) -> Self {
        Self(u128::from(qty.0))
    }
}

impl AddAssign<Quantity> for Volume {
    #[inline(always)]
    fn add_assign(&mut self, qty: Quantity) {
        self.0 += u128::from(qty.0);
    }
}

impl SubAssign for Volume {
    #[inline(always)]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

impl SubAssign<Quantity> for Volume {
    #[inline(always)]
    fn sub_assign(&mut self, qty: Quantity) {
        self.0 -= u128::from(qty.0);
    }
}
