//! # Cart Pricing Engine
//!
//! Turns cart lines into totals and applies the "Leve 3, Pague 2" bundle
//! promotion.
//!
//! ## Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     compute_totals(lines)                               │
//! │                                                                         │
//! │  [ (R$30 × 2), (R$20 × 1) ]                                            │
//! │       │                                                                 │
//! │       ▼  drop quantity ≤ 0, keep (unit_price, units) pairs              │
//! │  [ (30, 2), (20, 1) ]                                                  │
//! │       │                                                                 │
//! │       ├──► subtotal = 30·2 + 20·1 = 80      total_quantity = 3          │
//! │       │                                                                 │
//! │       ▼  sort pairs ascending by price                                  │
//! │  [ (20, 1), (30, 2) ]                                                  │
//! │       │                                                                 │
//! │       ▼  total_quantity ≥ 3 → 1 free unit                               │
//! │  take cheapest 1 unit → discount = 20                                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  total = 80 - 20 = 60                                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Units are never materialized: a line of 500 jerseys is one pair, so the
//! work is O(lines · log lines) regardless of quantities.
//!
//! The engine is pure. It does not validate prices or quantities and never
//! rounds; callers format the exact centavo results. Sums are accumulated in
//! `i128` and narrowed once, so amounts beyond the `Money` range saturate at
//! [`Money::MAX`] / [`Money::MIN`] instead of overflowing.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::types::Size;

// =============================================================================
// Input / Output
// =============================================================================

/// One (product, size) pairing as the engine sees it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    /// Price of one unit, already marked down from list.
    pub unit_price: Money,

    /// Units on this line. Zero or negative contributes nothing.
    pub quantity: i64,

    /// Display-only identity; ignored by pricing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_id: Option<i64>,

    /// Display-only identity; ignored by pricing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<Size>,
}

impl CartLine {
    /// A line with no identity fields.
    pub fn new(unit_price: Money, quantity: i64) -> Self {
        CartLine {
            unit_price,
            quantity,
            team_id: None,
            size: None,
        }
    }

    /// Attaches the (team, size) identity the caller displays.
    pub fn for_product(mut self, team_id: i64, size: Size) -> Self {
        self.team_id = Some(team_id);
        self.size = Some(size);
        self
    }

    /// Units this line contributes to the cart.
    #[inline]
    fn units(&self) -> i64 {
        self.quantity.max(0)
    }
}

/// Computed cart totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PricingResult {
    /// Sum of every unit price.
    pub subtotal: Money,
    /// Promotional credit (sum of the free units' prices).
    pub discount: Money,
    /// `subtotal - discount`.
    pub total: Money,
    /// Units across all lines.
    pub total_quantity: i64,
    /// Units given away by the promotion.
    pub number_of_free_items: i64,
}

impl PricingResult {
    /// Whether the promotion kicked in.
    pub fn has_free_items(&self) -> bool {
        self.number_of_free_items > 0
    }
}

// =============================================================================
// Promotion Rule
// =============================================================================

/// A "buy N, get some free" rule.
///
/// Once the cart holds `threshold` units, the `free_units` cheapest units are
/// free. The count does not scale with cart size: 9 units under
/// [`BundlePromotion::TAKE_THREE_PAY_TWO`] still earn a single free unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct BundlePromotion {
    /// Units required before anything is free.
    pub threshold: i64,
    /// Units given away once the threshold is met.
    pub free_units: i64,
}

impl BundlePromotion {
    /// The storefront's live rule: 3 or more units, cheapest one free.
    pub const TAKE_THREE_PAY_TWO: BundlePromotion = BundlePromotion {
        threshold: 3,
        free_units: 1,
    };

    /// How many units are free in a cart of `total_quantity` units.
    pub fn free_items_for(&self, total_quantity: i64) -> i64 {
        if total_quantity >= self.threshold {
            self.free_units.clamp(0, total_quantity)
        } else {
            0
        }
    }
}

impl Default for BundlePromotion {
    fn default() -> Self {
        BundlePromotion::TAKE_THREE_PAY_TWO
    }
}

// =============================================================================
// Engine
// =============================================================================

/// Prices a cart under the live "Leve 3, Pague 2" rule.
///
/// ## Example
/// ```rust
/// use malha_core::money::Money;
/// use malha_core::pricing::{compute_totals, CartLine};
///
/// let lines = [
///     CartLine::new(Money::from_cents(2000), 1),
///     CartLine::new(Money::from_cents(3000), 2),
/// ];
/// let totals = compute_totals(&lines);
///
/// assert_eq!(totals.subtotal.cents(), 8000);
/// assert_eq!(totals.discount.cents(), 2000); // the R$ 20 unit is free
/// assert_eq!(totals.total.cents(), 6000);
/// assert_eq!(totals.number_of_free_items, 1);
/// ```
pub fn compute_totals(lines: &[CartLine]) -> PricingResult {
    compute_totals_with(lines, &BundlePromotion::TAKE_THREE_PAY_TWO)
}

/// Prices a cart under an arbitrary bundle rule.
pub fn compute_totals_with(lines: &[CartLine], promotion: &BundlePromotion) -> PricingResult {
    let mut priced: Vec<(Money, i64)> = lines
        .iter()
        .filter(|line| line.units() > 0)
        .map(|line| (line.unit_price, line.units()))
        .collect();

    let subtotal = priced
        .iter()
        .fold(0i128, |acc, &(price, units)| acc.saturating_add(wide(price, units)));
    let total_quantity = priced
        .iter()
        .fold(0i64, |acc, &(_, units)| acc.saturating_add(units));

    let number_of_free_items = promotion.free_items_for(total_quantity);
    let discount = cheapest_units(&mut priced, number_of_free_items);

    PricingResult {
        subtotal: Money::saturating_from_wide(subtotal),
        discount: Money::saturating_from_wide(discount),
        total: Money::saturating_from_wide(subtotal.saturating_sub(discount)),
        total_quantity,
        number_of_free_items,
    }
}

/// `price × units` in centavos, widened so it cannot overflow.
fn wide(price: Money, units: i64) -> i128 {
    price.cents() as i128 * units as i128
}

/// Sum of the `count` globally cheapest units across `priced` pairs.
///
/// Equal prices are interchangeable, so the unstable sort is fine.
fn cheapest_units(priced: &mut [(Money, i64)], count: i64) -> i128 {
    if count <= 0 {
        return 0;
    }

    priced.sort_unstable_by_key(|&(price, _)| price);

    let mut remaining = count;
    let mut sum = 0i128;
    for &(price, units) in priced.iter() {
        if remaining == 0 {
            break;
        }
        let taken = units.min(remaining);
        sum = sum.saturating_add(wide(price, taken));
        remaining -= taken;
    }
    sum
}

// =============================================================================
// Unit Tests
// =============================================================================
