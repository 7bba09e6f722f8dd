//! # Cart
//!
//! The customer's cart: one line per (team, size) pairing.
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Lifecycle                                       │
//! │                                                                         │
//! │  ┌──────────┐     ┌──────────┐     ┌──────────┐     ┌──────────┐       │
//! │  │  Empty   │────►│ In Cart  │────►│ Checkout │────►│  Order   │       │
//! │  │  Cart    │     │          │     │   form   │     │  placed  │       │
//! │  └──────────┘     └──────────┘     └──────────┘     └──────────┘       │
//! │                        │                                                │
//! │                   add_item (size picker, +1)                            │
//! │                   update_quantity (≤ 0 removes)                         │
//! │                   remove_item                                           │
//! │                        │                                                │
//! │                        ▼                                                │
//! │                   totals() ──► pricing::compute_totals                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::pricing::{compute_totals_with, BundlePromotion, CartLine, PricingResult};
use crate::types::{OrderItem, Size, Team};
use crate::{MAX_CART_ITEMS, MAX_ITEM_QUANTITY};

/// A line in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub team_id: i64,

    /// Team name at time of adding, for display.
    pub team_name: String,

    pub size: Size,

    pub quantity: i64,

    /// Selling price frozen when the line was created.
    pub unit_price: Money,
}

impl CartItem {
    /// Unit price × quantity, before the bundle promotion.
    pub fn line_total(&self) -> Money {
        self.unit_price.multiply_quantity(self.quantity)
    }

    /// The engine's view of this line.
    pub fn to_line(&self) -> CartLine {
        CartLine::new(self.unit_price, self.quantity).for_product(self.team_id, self.size)
    }

    fn matches(&self, team_id: i64, size: Size) -> bool {
        self.team_id == team_id && self.size == size
    }
}

impl From<&CartItem> for OrderItem {
    fn from(item: &CartItem) -> Self {
        OrderItem {
            team_id: item.team_id,
            name: item.team_name.clone(),
            size: item.size,
            quantity: item.quantity,
            unit_price: item.unit_price,
        }
    }
}

/// The shopping cart.
///
/// ## Invariants
/// - Lines are unique by `(team_id, size)`
/// - Every quantity is in `1..=MAX_ITEM_QUANTITY`
/// - At most `MAX_CART_ITEMS` lines
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Cart {
    pub items: Vec<CartItem>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart::default()
    }

    /// Adds one unit of `team` in `size`, the size picker's confirm action.
    pub fn add_item(&mut self, team: &Team, size: Size, factor_bps: u32) -> CoreResult<()> {
        self.add_units(team, size, 1, factor_bps)
    }

    /// Adds `quantity` units of `team` in `size`.
    ///
    /// ## Behavior
    /// - Size with no stock: `OutOfStock`
    /// - Pair already in cart: quantity increases, price stays frozen
    /// - New pair: pushed at `factor_bps` of the team's list price
    pub fn add_units(
        &mut self,
        team: &Team,
        size: Size,
        quantity: i64,
        factor_bps: u32,
    ) -> CoreResult<()> {
        crate::validation::validate_quantity(quantity)?;

        if !team.is_available(size) {
            return Err(CoreError::OutOfStock {
                team: team.name.clone(),
                size: size.to_string(),
            });
        }

        if let Some(item) = self.items.iter_mut().find(|i| i.matches(team.id, size)) {
            let new_qty = item.quantity + quantity;
            if new_qty > MAX_ITEM_QUANTITY {
                return Err(CoreError::QuantityTooLarge {
                    requested: new_qty,
                    max: MAX_ITEM_QUANTITY,
                });
            }
            item.quantity = new_qty;
            return Ok(());
        }

        if self.items.len() >= MAX_CART_ITEMS {
            return Err(CoreError::CartTooLarge {
                max: MAX_CART_ITEMS,
            });
        }

        self.items.push(CartItem {
            team_id: team.id,
            team_name: team.name.clone(),
            size,
            quantity,
            unit_price: team.unit_price(factor_bps),
        });
        Ok(())
    }

    /// Sets the quantity of a line. Zero or less removes it.
    pub fn update_quantity(&mut self, team_id: i64, size: Size, quantity: i64) -> CoreResult<()> {
        if quantity <= 0 {
            return self.remove_item(team_id, size);
        }

        if quantity > MAX_ITEM_QUANTITY {
            return Err(CoreError::QuantityTooLarge {
                requested: quantity,
                max: MAX_ITEM_QUANTITY,
            });
        }

        let item = self
            .items
            .iter_mut()
            .find(|i| i.matches(team_id, size))
            .ok_or_else(|| CoreError::ItemNotInCart {
                team_id,
                size: size.to_string(),
            })?;
        item.quantity = quantity;
        Ok(())
    }

    /// Removes a line.
    pub fn remove_item(&mut self, team_id: i64, size: Size) -> CoreResult<()> {
        let initial_len = self.items.len();
        self.items.retain(|i| !i.matches(team_id, size));

        if self.items.len() == initial_len {
            Err(CoreError::ItemNotInCart {
                team_id,
                size: size.to_string(),
            })
        } else {
            Ok(())
        }
    }

    /// Empties the cart (after an order is placed).
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Number of distinct lines.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The engine's input for this cart.
    pub fn lines(&self) -> Vec<CartLine> {
        self.items.iter().map(CartItem::to_line).collect()
    }

    /// Totals under the live promotion.
    pub fn totals(&self) -> PricingResult {
        self.totals_with(&BundlePromotion::TAKE_THREE_PAY_TWO)
    }

    /// Totals under a specific promotion.
    pub fn totals_with(&self, promotion: &BundlePromotion) -> PricingResult {
        compute_totals_with(&self.lines(), promotion)
    }
}
