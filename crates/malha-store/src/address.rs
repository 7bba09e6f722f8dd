//! # CEP Lookup
//!
//! Postal-code lookup used to pre-fill the delivery form. The live
//! storefront asks a public CEP service; this module only defines the
//! boundary and a static implementation for development and tests.

use std::collections::HashMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::StoreResult;
use malha_core::DeliveryAddress;

/// Address fields a CEP resolves to.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressHint {
    pub street: String,
    pub neighborhood: String,
    pub city: String,
    pub state: String,
}

impl AddressHint {
    /// Fills the blank fields of `address`; anything the customer typed wins.
    pub fn fill_blanks(&self, address: &mut DeliveryAddress) {
        fn fill(target: &mut String, hint: &str) {
            if target.trim().is_empty() {
                *target = hint.to_string();
            }
        }

        fill(&mut address.street, &self.street);
        fill(&mut address.neighborhood, &self.neighborhood);
        fill(&mut address.city, &self.city);
        fill(&mut address.state, &self.state);
    }
}

/// Resolves a CEP (8 bare digits) to an address.
#[async_trait]
pub trait AddressLookup: Send + Sync {
    /// `Ok(None)` when the CEP is unknown.
    async fn lookup(&self, cep: &str) -> StoreResult<Option<AddressHint>>;
}

/// A fixed CEP table.
#[derive(Debug, Clone, Default)]
pub struct StaticAddressBook {
    entries: HashMap<String, AddressHint>,
}

impl StaticAddressBook {
    pub fn new() -> Self {
        StaticAddressBook::default()
    }

    /// Adds an entry; `cep` may carry punctuation.
    pub fn with_entry(mut self, cep: &str, hint: AddressHint) -> Self {
        self.entries.insert(digits(cep), hint);
        self
    }
}

#[async_trait]
impl AddressLookup for StaticAddressBook {
    async fn lookup(&self, cep: &str) -> StoreResult<Option<AddressHint>> {
        let hit = self.entries.get(&digits(cep)).cloned();
        debug!(cep = %cep, found = hit.is_some(), "CEP lookup");
        Ok(hit)
    }
}

fn digits(cep: &str) -> String {
    cep.chars().filter(char::is_ascii_digit).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn maracana() -> AddressHint {
        AddressHint {
            street: "Rua Professor Eurico Rabelo".to_string(),
            neighborhood: "Maracanã".to_string(),
            city: "Rio de Janeiro".to_string(),
            state: "RJ".to_string(),
        }
    }

    #[tokio::test]
    async fn test_lookup_ignores_punctuation() {
        let book = StaticAddressBook::new().with_entry("20271-130", maracana());

        assert_eq!(book.lookup("20271130").await.unwrap(), Some(maracana()));
        assert_eq!(book.lookup("20271-130").await.unwrap(), Some(maracana()));
        assert_eq!(book.lookup("00000000").await.unwrap(), None);
    }

    #[test]
    fn test_fill_blanks_keeps_typed_values() {
        let mut address = DeliveryAddress {
            cep: "20271130".to_string(),
            street: "Av. Maracanã".to_string(),
            number: "10".to_string(),
            ..DeliveryAddress::default()
        };

        maracana().fill_blanks(&mut address);

        assert_eq!(address.street, "Av. Maracanã");
        assert_eq!(address.neighborhood, "Maracanã");
        assert_eq!(address.city, "Rio de Janeiro");
        assert_eq!(address.state, "RJ");
        assert_eq!(address.number, "10");
    }
}
