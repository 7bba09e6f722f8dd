//! # malha-core: Pure Business Logic for the Malha Storefront
//!
//! This crate is the **heart** of the storefront. It contains the cart
//! pricing engine and every business rule as pure functions with zero I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Malha Storefront Architecture                      │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Web frontend                                 │   │
//! │  │    Catalog ──► Size picker ──► Cart ──► Checkout ──► My orders  │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    apps/storefront                              │   │
//! │  │    teams, quote, checkout                                       │   │
//! │  └──────────────┬──────────────────────────────┬───────────────────┘   │
//! │                 │                              │                        │
//! │  ┌──────────────▼──────────────────┐  ┌────────▼───────────────────┐   │
//! │  │  ★ malha-core (THIS CRATE) ★    │  │  malha-store               │   │
//! │  │                                 │  │  hosted backend boundary   │   │
//! │  │  money   pricing   cart         │  │  catalog, orders, CEP      │   │
//! │  │  types   checkout  validation   │  └────────────────────────────┘   │
//! │  │                                 │                                   │
//! │  │  NO I/O • NO NETWORK • PURE     │                                   │
//! │  └─────────────────────────────────┘                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`pricing`] - The cart pricing and "Leve 3, Pague 2" bundle engine
//! - [`money`] - Money type in integer centavos
//! - [`cart`] - Cart lines keyed by (team, size)
//! - [`checkout`] - Minimum-quantity gate and order payload
//! - [`types`] - Catalog and order types
//! - [`validation`] - Form and cart input rules
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use malha_core::{compute_totals, CartLine, Money};
//!
//! let lines = [CartLine::new(Money::from_cents(3000), 9)];
//! let totals = compute_totals(&lines);
//!
//! // Nine jerseys still earn exactly one free unit
//! assert_eq!(totals.number_of_free_items, 1);
//! assert_eq!(totals.total.cents(), 24000);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod checkout;
pub mod error;
pub mod money;
pub mod pricing;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{Cart, CartItem};
pub use checkout::{build_order_draft, CheckoutForm, CheckoutPolicy};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use pricing::{compute_totals, compute_totals_with, BundlePromotion, CartLine, PricingResult};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Jerseys sell at 30% of list price (a flat 70% markdown), in basis points.
pub const LIST_PRICE_FACTOR_BPS: u32 = 3000;

/// Fewest units a cart must hold before checkout is allowed.
pub const MIN_ITEMS_FOR_CHECKOUT: i64 = 5;

/// Maximum distinct lines in a single cart.
pub const MAX_CART_ITEMS: usize = 100;

/// Maximum quantity on a single line.
///
/// Guards against a stuck "+" button or a typo like 1000 instead of 10.
pub const MAX_ITEM_QUANTITY: i64 = 999;
