//! Storefront services.

pub mod checkout;

pub use checkout::{camisas, free_items_message, CartRequest, CheckoutService, Quote, QuoteLine};
