//! # Money Module
//!
//! Provides the `Money` type for handling Brazilian real amounts safely.
//!
//! ## Why Integer Centavos?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  A jersey listed at R$ 199,90 sells for 30% of list:                   │
//! │    199.90 * 0.30 = 59.970000000000006  ❌ WRONG!                        │
//! │                                                                         │
//! │  Summing nine of those and subtracting one free unit drifts further.   │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Centavos                                         │
//! │    19990 centavos * 3000 bps = 5997 centavos (rounded once, upstream)  │
//! │    Every cart sum after that is exact                                   │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use malha_core::money::Money;
//!
//! let list_price = Money::from_cents(19990);     // R$ 199,90
//! let unit_price = list_price.percentage_of(3000); // 30% of list
//! assert_eq!(unit_price.cents(), 5997);
//!
//! let three: Money = unit_price * 3;
//! assert_eq!(three.cents(), 17991);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in centavos (the smallest BRL unit).
///
/// ## Design Decisions
/// - **i64 (signed)**: the engine does not validate prices, so negative
///   inputs must still be representable
/// - **Single field tuple struct**: zero-cost over i64
/// - **Serialized as a bare integer**: the wire carries centavos
///
/// ## Where Money Flows
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Team.list_price ──► percentage_of(30%) ──► CartItem.unit_price         │
/// │                                                    │                    │
/// │                                                    ▼                    │
/// │                              CartLine ──► compute_totals()              │
/// │                                                    │                    │
/// │                          subtotal / discount / total ──► OrderDraft     │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from centavos.
    ///
    /// ## Example
    /// ```rust
    /// use malha_core::money::Money;
    ///
    /// let price = Money::from_cents(5997); // R$ 59,97
    /// assert_eq!(price.cents(), 5997);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Returns the value in centavos.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the whole reais portion (truncated toward zero).
    #[inline]
    pub const fn reais(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the centavos portion (always 0-99).
    #[inline]
    pub const fn centavos_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Returns the absolute value.
    #[inline]
    pub const fn abs(&self) -> Self {
        Money(self.0.abs())
    }

    /// Multiplies money by a unit count, saturating at the `i64` range.
    ///
    /// ```rust
    /// use malha_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(5997);
    /// assert_eq!(unit_price.multiply_quantity(2).cents(), 11994);
    /// assert_eq!(unit_price.multiply_quantity(i64::MAX), Money::MAX);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0.saturating_mul(qty))
    }

    /// Largest representable amount.
    pub const MAX: Money = Money(i64::MAX);

    /// Smallest representable amount.
    pub const MIN: Money = Money(i64::MIN);

    /// Narrows a widened centavo amount, clamping to [`Money::MIN`, `Money::MAX`].
    ///
    /// The pricing engine accumulates in `i128` and narrows once at the end.
    #[inline]
    pub const fn saturating_from_wide(cents: i128) -> Self {
        if cents > i64::MAX as i128 {
            Money::MAX
        } else if cents < i64::MIN as i128 {
            Money::MIN
        } else {
            Money(cents as i64)
        }
    }

    /// Returns `bps` basis points of this amount, rounded half-up to the centavo.
    ///
    /// This is how the storefront derives the selling price from the list
    /// price (3000 bps = 30% of list). It is the only rounding step in the
    /// pricing path and happens before the promotion engine runs.
    ///
    /// ```rust
    /// use malha_core::money::Money;
    ///
    /// // R$ 199,90 at 30% = R$ 59,97
    /// assert_eq!(Money::from_cents(19990).percentage_of(3000).cents(), 5997);
    /// // R$ 0,05 at 30% = 1,5 centavos → 2
    /// assert_eq!(Money::from_cents(5).percentage_of(3000).cents(), 2);
    /// ```
    pub fn percentage_of(&self, bps: u32) -> Money {
        // i128 keeps large catalog prices from overflowing during the product
        let cents = (self.0 as i128 * bps as i128 + 5000) / 10000;
        Money::saturating_from_wide(cents)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Debug-friendly rendering (`R$12.34`).
///
/// Storefront display (`R$ 12,34`) is formatted by the app configuration.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}R${}.{:02}", sign, self.reais().abs(), self.centavos_part())
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        self.multiply_quantity(qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
