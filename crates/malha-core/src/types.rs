//! # Domain Types
//!
//! Catalog and order types shared by every layer of the storefront.
//!
//! ## Type Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │     League      │   │      Team       │   │  ProductStock   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │◄──│  league_id      │──►│  team_id        │       │
//! │  │  name           │   │  list_price     │   │  size (P..XG)   │       │
//! │  └─────────────────┘   │  images         │   │  stock_quantity │       │
//! │                        └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │   OrderDraft    │──►│      Order      │   │  OrderStatus    │       │
//! │  │  customer       │   │  id             │   │  PendingPayment │       │
//! │  │  address        │   │  created_at     │   │  Pending ...    │       │
//! │  │  items, totals  │   │  + draft fields │   └─────────────────┘       │
//! │  └─────────────────┘   └─────────────────┘                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Wire names are camelCase so the web frontend can consume them as-is.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Money;

// =============================================================================
// Catalog
// =============================================================================

/// A football league (Brasileirão, Premier League, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct League {
    pub id: i64,
    pub name: String,
}

/// Jersey sizes offered by the store, in the Brazilian lettering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "UPPERCASE")]
pub enum Size {
    P,
    M,
    G,
    GG,
    XG,
}

impl Size {
    /// Every size in display order.
    pub const ALL: [Size; 5] = [Size::P, Size::M, Size::G, Size::GG, Size::XG];

    /// The size code as printed on the tag.
    pub const fn code(&self) -> &'static str {
        match self {
            Size::P => "P",
            Size::M => "M",
            Size::G => "G",
            Size::GG => "GG",
            Size::XG => "XG",
        }
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Size {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().to_ascii_uppercase();
        Size::ALL
            .into_iter()
            .find(|size| size.code() == code)
            .ok_or_else(|| ValidationError::NotAllowed {
                field: "size".to_string(),
                allowed: Size::ALL.iter().map(|s| s.code().to_string()).collect(),
            })
    }
}

/// Stock level of one team's jersey in one size.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ProductStock {
    pub team_id: i64,
    pub size: Size,
    pub stock_quantity: i64,
}

/// A team jersey listed in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    pub id: i64,
    pub name: String,
    pub league_id: i64,

    /// Joined from the leagues table for display.
    #[serde(default)]
    pub league_name: Option<String>,

    /// Front image URL.
    #[serde(default)]
    pub image1: String,

    /// Back image URL (the product card alternates between the two).
    #[serde(default)]
    pub image2: String,

    /// Catalog price before the storefront's flat markdown.
    pub list_price: Money,

    #[serde(default)]
    pub stock: Vec<ProductStock>,
}

impl Team {
    /// The price one unit actually sells for: `factor_bps` of the list price.
    ///
    /// ```rust
    /// use malha_core::{Money, Team, LIST_PRICE_FACTOR_BPS};
    ///
    /// let team = Team {
    ///     id: 1,
    ///     name: "Flamengo 2024".into(),
    ///     league_id: 1,
    ///     league_name: None,
    ///     image1: String::new(),
    ///     image2: String::new(),
    ///     list_price: Money::from_cents(19990),
    ///     stock: vec![],
    /// };
    /// assert_eq!(team.unit_price(LIST_PRICE_FACTOR_BPS).cents(), 5997);
    /// ```
    pub fn unit_price(&self, factor_bps: u32) -> Money {
        self.list_price.percentage_of(factor_bps)
    }

    /// Units on hand for `size`; a missing stock row means zero.
    pub fn stock_for(&self, size: Size) -> i64 {
        self.stock
            .iter()
            .find(|s| s.size == size)
            .map(|s| s.stock_quantity)
            .unwrap_or(0)
    }

    /// Whether at least one unit of `size` can be sold.
    pub fn is_available(&self, size: Size) -> bool {
        self.stock_for(size) > 0
    }
}

// =============================================================================
// Checkout Types
// =============================================================================

/// How the customer pays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Brazilian instant payment (QR code).
    #[default]
    Pix,
    /// Shown at checkout but not accepted yet.
    CreditCard,
}

impl PaymentMethod {
    /// Whether checkout currently accepts this method.
    pub const fn is_available(&self) -> bool {
        matches!(self, PaymentMethod::Pix)
    }
}

/// Order status as stored by the backend.
///
/// Transitions happen outside this application; the storefront only ever
/// writes `PendingPayment`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    PendingPayment,
    Pending,
    Shipped,
    Delivered,
    Cancelled,
}

/// Who is buying.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CustomerInfo {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
}

/// Where the order ships. `cep` holds the 8 bare digits once validated.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DeliveryAddress {
    pub cep: String,
    #[serde(default)]
    pub street: String,
    #[serde(default)]
    pub number: String,
    #[serde(default)]
    pub complement: String,
    #[serde(default)]
    pub neighborhood: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
}

/// An order line, frozen at checkout time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub team_id: i64,
    pub name: String,
    pub size: Size,
    pub quantity: i64,
    /// Discounted unit price actually charged.
    pub unit_price: Money,
}

/// Everything checkout submits to the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct OrderDraft {
    /// None for guests.
    pub user_id: Option<String>,
    pub customer: CustomerInfo,
    pub delivery_address: DeliveryAddress,
    pub items: Vec<OrderItem>,
    pub subtotal: Money,
    pub discount: Money,
    pub total_amount: Money,
    pub status: OrderStatus,
    pub payment_method: PaymentMethod,
}

/// A persisted order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: i64,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[serde(flatten)]
    pub draft: OrderDraft,
}

impl Order {
    /// Total unit count across all lines.
    pub fn total_quantity(&self) -> i64 {
        self.draft.items.iter().fold(0i64, |acc, i| acc.saturating_add(i.quantity))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn team_with_stock(stock: &[(Size, i64)]) -> Team {
        Team {
            id: 7,
            name: "Palmeiras 2024".to_string(),
            league_id: 1,
            league_name: Some("Brasileirão".to_string()),
            image1: String::new(),
            image2: String::new(),
            list_price: Money::from_cents(10000),
            stock: stock
                .iter()
                .map(|&(size, stock_quantity)| ProductStock {
                    team_id: 7,
                    size,
                    stock_quantity,
                })
                .collect(),
        }
    }

    #[test]
    fn test_size_parse() {
        assert_eq!("gg".parse::<Size>().unwrap(), Size::GG);
        assert_eq!(" XG ".parse::<Size>().unwrap(), Size::XG);
        assert!("XXL".parse::<Size>().is_err());
    }

    #[test]
    fn test_size_serde_uses_codes() {
        assert_eq!(serde_json::to_string(&Size::GG).unwrap(), "\"GG\"");
        let size: Size = serde_json::from_str("\"P\"").unwrap();
        assert_eq!(size, Size::P);
    }

    #[test]
    fn test_team_stock_lookup() {
        let team = team_with_stock(&[(Size::M, 4), (Size::G, 0)]);
        assert_eq!(team.stock_for(Size::M), 4);
        assert!(team.is_available(Size::M));
        assert!(!team.is_available(Size::G));
        assert!(!team.is_available(Size::XG));
    }

    #[test]
    fn test_team_unit_price() {
        let team = team_with_stock(&[]);
        assert_eq!(team.unit_price(3000).cents(), 3000);
    }

    #[test]
    fn test_payment_method_availability() {
        assert!(PaymentMethod::Pix.is_available());
        assert!(!PaymentMethod::CreditCard.is_available());
        assert_eq!(PaymentMethod::default(), PaymentMethod::Pix);
    }

    #[test]
    fn test_order_status_wire_name() {
        let json = serde_json::to_string(&OrderStatus::PendingPayment).unwrap();
        assert_eq!(json, "\"pending_payment\"");
    }
}
