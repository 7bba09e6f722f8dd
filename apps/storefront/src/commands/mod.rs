//! # Commands
//!
//! One module per CLI subcommand. Each loads its inputs from disk, runs the
//! [`CheckoutService`] and returns the text to print.
//!
//! ```text
//! commands/
//! ├── mod.rs     ◄─── File loading shared by commands
//! ├── catalog.rs ◄─── `malha teams`, `malha leagues`
//! ├── quote.rs   ◄─── `malha quote`
//! └── order.rs   ◄─── `malha checkout`, `malha orders`
//! ```

pub mod catalog;
pub mod order;
pub mod quote;

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use serde::de::DeserializeOwned;

use crate::cli::CartSource;
use crate::config::StorefrontConfig;
use crate::services::{CartRequest, CheckoutService};
use malha_core::Order;
use malha_store::{AddressHint, Catalog, InMemoryStore, StaticAddressBook};

/// The service every command runs against.
pub type LocalCheckout = CheckoutService<InMemoryStore, StaticAddressBook>;

fn load_json<T: DeserializeOwned>(path: &Path, what: &str) -> anyhow::Result<T> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read {} file {}", what, path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("invalid {} file {}", what, path.display()))
}

/// Loads the catalog, the CEP table and earlier orders into a fresh service.
fn open_service(
    catalog: &Path,
    addresses: Option<&Path>,
    orders: Vec<Order>,
    config: StorefrontConfig,
) -> anyhow::Result<LocalCheckout> {
    let catalog = Catalog::from_path(catalog)
        .with_context(|| format!("cannot load catalog file {}", catalog.display()))?;

    let book = match addresses {
        Some(path) => {
            let table: HashMap<String, AddressHint> = load_json(path, "address")?;
            table
                .into_iter()
                .fold(StaticAddressBook::new(), |book, (cep, hint)| {
                    book.with_entry(&cep, hint)
                })
        }
        None => StaticAddressBook::new(),
    };

    Ok(CheckoutService::new(
        Arc::new(InMemoryStore::new(catalog).with_orders(orders)),
        Arc::new(book),
        config,
    ))
}

/// Orders from earlier runs. A missing log means none yet.
fn load_orders(path: &Path) -> anyhow::Result<Vec<Order>> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    load_json(path, "order log")
}

fn save_orders(path: &Path, orders: &[Order]) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(orders)?;
    std::fs::write(path, json)
        .with_context(|| format!("cannot write order log {}", path.display()))
}

fn load_cart(source: &CartSource) -> anyhow::Result<Vec<CartRequest>> {
    load_json(&source.cart, "cart")
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_names_path() {
        let err = load_json::<Catalog>(Path::new("/nonexistent/catalog.json"), "catalog")
            .unwrap_err();
        assert!(err.to_string().contains("/nonexistent/catalog.json"));
    }

    #[test]
    fn test_invalid_json_is_reported() {
        let (_dir, paths) = fixtures::write(&[("cart.json", "[{\"teamId\": ")]);
        let err = load_json::<Vec<CartRequest>>(&paths[0], "cart").unwrap_err();
        assert!(err.to_string().starts_with("invalid cart file"));
    }

    #[tokio::test]
    async fn test_open_service_with_addresses() {
        use malha_store::AddressLookup;

        let (_dir, paths) = fixtures::write(&[
            ("catalog.json", fixtures::CATALOG),
            ("addresses.json", fixtures::ADDRESSES),
        ]);
        let service = open_service(
            &paths[0],
            Some(&paths[1]),
            Vec::new(),
            StorefrontConfig::default(),
        )
        .unwrap();

        let hint = service.addresses().lookup("20271130").await.unwrap();
        assert_eq!(hint.map(|h| h.city).as_deref(), Some("Rio de Janeiro"));
    }

    #[test]
    fn test_open_service_missing_catalog() {
        let err = open_service(
            Path::new("/nonexistent/catalog.json"),
            None,
            Vec::new(),
            StorefrontConfig::default(),
        )
        .err()
        .unwrap();
        assert_eq!(
            err.to_string(),
            "cannot load catalog file /nonexistent/catalog.json"
        );
    }

    #[test]
    fn test_open_service_rejects_negative_price() {
        let (_dir, paths) = fixtures::write(&[(
            "catalog.json",
            r#"{"teams": [{"id": 3, "name": "Vasco 2024", "leagueId": 1, "listPrice": -1}]}"#,
        )]);

        let err = open_service(&paths[0], None, Vec::new(), StorefrontConfig::default())
            .err()
            .unwrap();
        let chain = format!("{:#}", err);
        assert!(chain.contains("team 3 (Vasco 2024)"), "{}", chain);
    }

    #[test]
    fn test_order_log_missing_file_is_empty() {
        let (dir, _) = fixtures::write(&[]);
        let orders = load_orders(&dir.path().join("orders.json")).unwrap();
        assert!(orders.is_empty());
    }
}
