//! # Checkout Service
//!
//! Runs the cart drawer and checkout page flows against an injected store.
//!
//! ## Order Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  [{teamId, size, quantity}, ...]                                        │
//! │         │                                                               │
//! │         ▼  build_cart()     ── catalog lookup, stock check, 30% price   │
//! │       Cart                                                              │
//! │         │                                                               │
//! │         ├──► quote()        ── engine totals, "Leve 3, Pague 2" banner, │
//! │         │                      checkout button state                   │
//! │         │                                                               │
//! │         ▼  place_order()    ── minimum gate, CEP autofill, validation,  │
//! │       Order                    insert into the store                   │
//! │         │                                                               │
//! │         ▼  order_history()  ── "my orders", newest first               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::StorefrontConfig;
use crate::error::ApiResult;
use malha_core::validation::{normalize_cep, validate_user_id};
use malha_core::{
    build_order_draft, Cart, CheckoutForm, League, Money, Order, PricingResult, Size,
};
use malha_store::{AddressLookup, CatalogRepository, OrderRepository, StoreError};

/// One line of a cart as submitted by the frontend or a cart file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartRequest {
    pub team_id: i64,
    pub size: Size,
    #[serde(default = "one")]
    pub quantity: i64,
}

fn one() -> i64 {
    1
}

/// A cart line ready for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteLine {
    pub team_id: i64,
    pub team_name: String,
    pub size: Size,
    pub quantity: i64,
    pub unit_price: Money,
    pub line_total: Money,
    pub line_total_display: String,
}

/// What the cart drawer shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub lines: Vec<QuoteLine>,
    pub totals: PricingResult,
    pub subtotal_display: String,
    pub discount_display: String,
    pub total_display: String,

    /// Whether the checkout button is enabled.
    pub can_checkout: bool,

    /// Units still needed to reach the checkout minimum.
    pub items_missing: i64,

    /// "Você ganhou 1 camisa de graça!" once the promotion applies.
    pub free_items_message: Option<String>,
}

/// Cart pricing and order placement over an injected store.
pub struct CheckoutService<S, A> {
    store: Arc<S>,
    addresses: Arc<A>,
    config: StorefrontConfig,
}

impl<S, A> CheckoutService<S, A>
where
    S: CatalogRepository + OrderRepository,
    A: AddressLookup,
{
    pub fn new(store: Arc<S>, addresses: Arc<A>, config: StorefrontConfig) -> Self {
        CheckoutService {
            store,
            addresses,
            config,
        }
    }

    pub fn config(&self) -> &StorefrontConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn addresses(&self) -> &A {
        &self.addresses
    }

    /// Leagues for the catalog filter, by name.
    pub async fn leagues(&self) -> ApiResult<Vec<League>> {
        Ok(self.store.list_leagues().await?)
    }

    /// Builds a cart from requested lines, pricing each team from the catalog.
    ///
    /// Repeated `(team, size)` pairs merge into one line.
    pub async fn build_cart(&self, requests: &[CartRequest]) -> ApiResult<Cart> {
        debug!(lines = requests.len(), "build_cart");

        let mut cart = Cart::new();
        for request in requests {
            let team = self
                .store
                .get_team(request.team_id)
                .await?
                .ok_or_else(|| StoreError::not_found("Team", request.team_id))?;

            cart.add_units(
                &team,
                request.size,
                request.quantity,
                self.config.list_price_factor_bps,
            )?;
        }
        Ok(cart)
    }

    /// Prices `cart` for display.
    pub fn quote(&self, cart: &Cart) -> Quote {
        let totals = cart.totals();
        let policy = self.config.checkout_policy();
        debug!(
            quantity = totals.total_quantity,
            total = totals.total.cents(),
            "quote"
        );

        let lines = cart
            .items
            .iter()
            .map(|item| QuoteLine {
                team_id: item.team_id,
                team_name: item.team_name.clone(),
                size: item.size,
                quantity: item.quantity,
                unit_price: item.unit_price,
                line_total: item.line_total(),
                line_total_display: self.config.format_currency(item.line_total()),
            })
            .collect();

        Quote {
            lines,
            totals,
            subtotal_display: self.config.format_currency(totals.subtotal),
            discount_display: self.config.format_currency(totals.discount),
            total_display: self.config.format_currency(totals.total),
            can_checkout: policy.can_checkout(&totals),
            items_missing: policy.items_missing(&totals),
            free_items_message: free_items_message(&totals),
        }
    }

    /// Submits `cart` as an order.
    ///
    /// Blank street, neighborhood, city and state are filled from the CEP
    /// lookup first. A failing lookup is logged and the form goes on as typed.
    pub async fn place_order(
        &self,
        user_id: Option<&str>,
        cart: &Cart,
        mut form: CheckoutForm,
    ) -> ApiResult<Order> {
        debug!(user_id = ?user_id, lines = cart.item_count(), "place_order");

        let policy = self.config.checkout_policy();
        if let Err(err) = policy.ensure_can_checkout(&cart.totals()) {
            warn!(error = %err, "Checkout rejected");
            return Err(err.into());
        }

        if let Ok(cep) = normalize_cep(&form.address.cep) {
            match self.addresses.lookup(&cep).await {
                Ok(Some(hint)) => hint.fill_blanks(&mut form.address),
                Ok(None) => debug!(cep = %cep, "CEP not found"),
                Err(err) => warn!(cep = %cep, error = %err, "CEP lookup failed"),
            }
        }

        let draft = build_order_draft(user_id, cart, &form, &policy)?;
        let order = self.store.insert_order(draft).await?;

        info!(
            order_id = order.id,
            total = order.draft.total_amount.cents(),
            quantity = order.total_quantity(),
            "Order placed"
        );
        Ok(order)
    }

    /// Orders placed by `user_id`, newest first.
    pub async fn order_history(&self, user_id: &str) -> ApiResult<Vec<Order>> {
        validate_user_id(user_id)?;
        let orders = self.store.orders_for_user(user_id.trim()).await?;
        debug!(user_id, orders = orders.len(), "order_history");
        Ok(orders)
    }
}

/// The promotion banner, if any units are free.
pub fn free_items_message(totals: &PricingResult) -> Option<String> {
    totals
        .has_free_items()
        .then(|| format!("Você ganhou {} de graça!", camisas(totals.number_of_free_items)))
}

/// "1 camisa", "2 camisas".
pub fn camisas(count: i64) -> String {
    match count {
        1 => "1 camisa".to_string(),
        n => format!("{} camisas", n),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use malha_core::{
        CustomerInfo, DeliveryAddress, League, OrderStatus, PaymentMethod, ProductStock, Team,
    };
    use malha_store::{AddressHint, Catalog, InMemoryStore, StaticAddressBook, StoreResult};

    const USER_ID: &str = "550e8400-e29b-41d4-a716-446655440000";

    fn team(id: i64, name: &str, list_cents: i64) -> Team {
        Team {
            id,
            name: name.to_string(),
            league_id: 1,
            league_name: None,
            image1: String::new(),
            image2: String::new(),
            list_price: Money::from_cents(list_cents),
            stock: Size::ALL
                .iter()
                .map(|&size| ProductStock {
                    team_id: id,
                    size,
                    stock_quantity: 10,
                })
                .collect(),
        }
    }

    fn service() -> CheckoutService<InMemoryStore, StaticAddressBook> {
        let catalog = Catalog {
            leagues: vec![League {
                id: 1,
                name: "Brasileirão".to_string(),
            }],
            // 30% of 10000 = R$ 30,00; 30% of 6667 = R$ 20,00
            teams: vec![team(1, "Flamengo 2024", 10000), team(2, "Santos 2024", 6667)],
            stock: vec![],
        };
        let addresses = StaticAddressBook::new().with_entry(
            "20271130",
            AddressHint {
                street: "Rua Professor Eurico Rabelo".to_string(),
                neighborhood: "Maracanã".to_string(),
                city: "Rio de Janeiro".to_string(),
                state: "RJ".to_string(),
            },
        );
        CheckoutService::new(
            Arc::new(InMemoryStore::new(catalog)),
            Arc::new(addresses),
            StorefrontConfig::default(),
        )
    }

    fn request(team_id: i64, size: Size, quantity: i64) -> CartRequest {
        CartRequest {
            team_id,
            size,
            quantity,
        }
    }

    fn form() -> CheckoutForm {
        CheckoutForm {
            customer: CustomerInfo {
                name: "Ana Souza".to_string(),
                email: "ana@example.com".to_string(),
                phone: String::new(),
            },
            address: DeliveryAddress {
                cep: "20271-130".to_string(),
                number: "500".to_string(),
                ..DeliveryAddress::default()
            },
            payment_method: PaymentMethod::Pix,
        }
    }

    #[tokio::test]
    async fn test_build_cart_prices_at_factor_and_merges() {
        let service = service();
        let cart = service
            .build_cart(&[
                request(1, Size::M, 1),
                request(1, Size::M, 2),
                request(1, Size::G, 1),
            ])
            .await
            .unwrap();

        assert_eq!(cart.item_count(), 2);
        assert_eq!(cart.items[0].quantity, 3);
        assert_eq!(cart.items[0].unit_price.cents(), 3000);
    }

    #[tokio::test]
    async fn test_build_cart_unknown_team() {
        let err = service()
            .build_cart(&[request(99, Size::M, 1)])
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn test_quote_mixed_cart() {
        let service = service();
        let cart = service
            .build_cart(&[request(2, Size::P, 1), request(1, Size::M, 2)])
            .await
            .unwrap();

        let quote = service.quote(&cart);
        assert_eq!(quote.totals.subtotal.cents(), 8000);
        assert_eq!(quote.totals.discount.cents(), 2000);
        assert_eq!(quote.total_display, "R$ 60,00");
        assert_eq!(
            quote.free_items_message.as_deref(),
            Some("Você ganhou 1 camisa de graça!")
        );
        assert!(!quote.can_checkout);
        assert_eq!(quote.items_missing, 2);
        assert_eq!(quote.lines[1].line_total_display, "R$ 60,00");
    }

    #[tokio::test]
    async fn test_quote_nine_units_one_free() {
        let service = service();
        let cart = service.build_cart(&[request(1, Size::GG, 9)]).await.unwrap();

        let quote = service.quote(&cart);
        assert_eq!(quote.totals.number_of_free_items, 1);
        assert_eq!(quote.totals.total.cents(), 24000);
        assert!(quote.can_checkout);
        assert_eq!(quote.items_missing, 0);
    }

    #[tokio::test]
    async fn test_place_order_fills_address_and_stores() {
        let service = service();
        let cart = service.build_cart(&[request(1, Size::M, 5)]).await.unwrap();

        let order = service
            .place_order(Some(USER_ID), &cart, form())
            .await
            .unwrap();

        assert_eq!(order.id, 1);
        assert_eq!(order.draft.status, OrderStatus::PendingPayment);
        assert_eq!(order.draft.total_amount.cents(), 12000);
        assert_eq!(order.draft.delivery_address.cep, "20271130");
        assert_eq!(order.draft.delivery_address.city, "Rio de Janeiro");
        assert_eq!(order.draft.delivery_address.state, "RJ");

        let mine = service.order_history(USER_ID).await.unwrap();
        assert_eq!(mine, vec![order]);
    }

    #[tokio::test]
    async fn test_order_history_only_lists_own_orders() {
        let service = service();
        let cart = service.build_cart(&[request(2, Size::P, 5)]).await.unwrap();
        service.place_order(None, &cart, form()).await.unwrap();
        service
            .place_order(Some(USER_ID), &cart, form())
            .await
            .unwrap();

        let mine = service.order_history(USER_ID).await.unwrap();
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].id, 2);

        let stranger = "6ba7b810-9dad-11d1-80b4-00c04fd430c8";
        assert!(service.order_history(stranger).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_order_history_rejects_malformed_user_id() {
        let err = service().order_history("ana").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[tokio::test]
    async fn test_leagues() {
        let leagues = service().leagues().await.unwrap();
        assert_eq!(leagues.len(), 1);
        assert_eq!(leagues[0].name, "Brasileirão");
    }

    #[tokio::test]
    async fn test_place_order_below_minimum() {
        let service = service();
        let cart = service.build_cart(&[request(1, Size::M, 4)]).await.unwrap();

        let err = service.place_order(None, &cart, form()).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::CheckoutBlocked);
        assert!(service.store.get_order(1).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_place_order_unknown_cep_needs_full_address() {
        let service = service();
        let cart = service.build_cart(&[request(1, Size::M, 5)]).await.unwrap();
        let mut form = form();
        form.address.cep = "01001000".to_string();

        let err = service.place_order(None, &cart, form).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    struct BrokenLookup;

    #[async_trait::async_trait]
    impl AddressLookup for BrokenLookup {
        async fn lookup(&self, _cep: &str) -> StoreResult<Option<AddressHint>> {
            Err(malha_store::StoreError::Unavailable("timeout".to_string()))
        }
    }

    #[tokio::test]
    async fn test_place_order_survives_lookup_failure() {
        let base = service();
        let service = CheckoutService::new(
            Arc::clone(&base.store),
            Arc::new(BrokenLookup),
            StorefrontConfig::default(),
        );
        let cart = service.build_cart(&[request(1, Size::M, 5)]).await.unwrap();

        let mut form = form();
        form.address.street = "Rua A".to_string();
        form.address.neighborhood = "Centro".to_string();
        form.address.city = "Niterói".to_string();
        form.address.state = "rj".to_string();

        let order = service.place_order(None, &cart, form).await.unwrap();
        assert_eq!(order.draft.delivery_address.state, "RJ");
    }

    #[test]
    fn test_free_items_message() {
        let mut totals = malha_core::compute_totals(&[]);
        assert_eq!(free_items_message(&totals), None);

        totals.number_of_free_items = 2;
        assert_eq!(
            free_items_message(&totals).as_deref(),
            Some("Você ganhou 2 camisas de graça!")
        );
    }

    #[test]
    fn test_camisas_pluralizes() {
        assert_eq!(camisas(1), "1 camisa");
        assert_eq!(camisas(0), "0 camisas");
        assert_eq!(camisas(3), "3 camisas");
    }

    #[test]
    fn test_cart_request_quantity_defaults_to_one() {
        let req: CartRequest = serde_json::from_str(r#"{"teamId": 3, "size": "XG"}"#).unwrap();
        assert_eq!(req, request(3, Size::XG, 1));
    }
}
