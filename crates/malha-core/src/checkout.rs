//! # Checkout
//!
//! Turns a cart and the checkout form into the order payload the store
//! receives.
//!
//! ## Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Cart ──► compute totals ──► minimum-quantity gate ──► validate form    │
//! │                                    │                        │           │
//! │                      BelowMinimumQuantity         ValidationError       │
//! │                                                             │           │
//! │                                                             ▼           │
//! │                                           OrderDraft { PendingPayment } │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The minimum-quantity gate belongs to checkout, not to pricing: the cart
//! display still shows totals for a 2-unit cart, it just cannot be submitted.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::cart::Cart;
use crate::error::{CoreError, CoreResult};
use crate::pricing::PricingResult;
use crate::types::{CustomerInfo, DeliveryAddress, OrderDraft, OrderItem, OrderStatus, PaymentMethod};
use crate::validation::{
    normalize_cep, validate_email, validate_payment_method, validate_required, validate_state,
    validate_user_id,
};
use crate::MIN_ITEMS_FOR_CHECKOUT;

/// Caller-side rules applied before an order may be placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutPolicy {
    /// Fewest units a cart must hold to check out.
    pub min_items: i64,
}

impl Default for CheckoutPolicy {
    fn default() -> Self {
        CheckoutPolicy {
            min_items: MIN_ITEMS_FOR_CHECKOUT,
        }
    }
}

impl CheckoutPolicy {
    pub fn new(min_items: i64) -> Self {
        CheckoutPolicy { min_items }
    }

    /// Whether the checkout button is enabled for these totals.
    pub fn can_checkout(&self, totals: &PricingResult) -> bool {
        totals.total_quantity > 0 && totals.total_quantity >= self.min_items
    }

    /// Units still missing before checkout unlocks.
    pub fn items_missing(&self, totals: &PricingResult) -> i64 {
        (self.min_items - totals.total_quantity).max(0)
    }

    /// Errors unless the cart may be submitted.
    pub fn ensure_can_checkout(&self, totals: &PricingResult) -> CoreResult<()> {
        if totals.total_quantity == 0 {
            return Err(CoreError::EmptyCart);
        }
        if !self.can_checkout(totals) {
            return Err(CoreError::BelowMinimumQuantity {
                required: self.min_items,
                actual: totals.total_quantity,
            });
        }
        Ok(())
    }
}

/// What the customer typed into the checkout form.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutForm {
    pub customer: CustomerInfo,
    pub address: DeliveryAddress,
    #[serde(default)]
    pub payment_method: PaymentMethod,
}

impl CheckoutForm {
    /// Validates every field and returns the cleaned-up form.
    ///
    /// Phone and complement are optional; the CEP is reduced to its digits
    /// and the state is uppercased.
    pub fn validated(&self) -> CoreResult<CheckoutForm> {
        validate_payment_method(self.payment_method)?;

        let customer = CustomerInfo {
            name: validate_required("name", &self.customer.name)?,
            email: validate_email(&self.customer.email)?,
            phone: self.customer.phone.trim().to_string(),
        };

        let address = DeliveryAddress {
            cep: normalize_cep(&self.address.cep)?,
            street: validate_required("street", &self.address.street)?,
            number: validate_required("number", &self.address.number)?,
            complement: self.address.complement.trim().to_string(),
            neighborhood: validate_required("neighborhood", &self.address.neighborhood)?,
            city: validate_required("city", &self.address.city)?,
            state: validate_state(&self.address.state)?,
        };

        Ok(CheckoutForm {
            customer,
            address,
            payment_method: self.payment_method,
        })
    }
}

/// Builds the order payload for `cart`.
///
/// Totals come from the same engine the cart display uses, so the amount
/// submitted always matches what the customer saw.
pub fn build_order_draft(
    user_id: Option<&str>,
    cart: &Cart,
    form: &CheckoutForm,
    policy: &CheckoutPolicy,
) -> CoreResult<OrderDraft> {
    let totals = cart.totals();
    policy.ensure_can_checkout(&totals)?;

    if let Some(id) = user_id {
        validate_user_id(id)?;
    }
    let form = form.validated()?;

    Ok(OrderDraft {
        user_id: user_id.map(|id| id.trim().to_string()),
        customer: form.customer,
        delivery_address: form.address,
        items: cart.items.iter().map(OrderItem::from).collect(),
        subtotal: totals.subtotal,
        discount: totals.discount,
        total_amount: totals.total,
        status: OrderStatus::PendingPayment,
        payment_method: form.payment_method,
    })
}
