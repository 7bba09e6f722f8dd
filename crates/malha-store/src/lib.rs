//! # malha-store: Hosted Store Boundary
//!
//! The storefront keeps its catalog and orders in a hosted backend. This
//! crate is the seam between the pure rules in `malha-core` and that
//! backend.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          malha-store                                    │
//! │                                                                         │
//! │  ┌────────────────────┐   ┌────────────────────┐   ┌────────────────┐  │
//! │  │ CatalogRepository  │   │ OrderRepository    │   │ AddressLookup  │  │
//! │  │ leagues, teams,    │   │ insert, get,       │   │ CEP → street,  │  │
//! │  │ stock              │   │ orders per user    │   │ city, state    │  │
//! │  └─────────┬──────────┘   └─────────┬──────────┘   └───────┬────────┘  │
//! │            └────────────┬───────────┘                      │           │
//! │                         ▼                                  ▼           │
//! │                  InMemoryStore                    StaticAddressBook    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust,ignore
//! use malha_store::{Catalog, InMemoryStore, CatalogRepository};
//!
//! let store = InMemoryStore::new(Catalog::from_path("catalog.json")?);
//! let team = store.get_team(12).await?;
//! ```

pub mod address;
pub mod error;
pub mod memory;
pub mod repository;

pub use address::{AddressHint, AddressLookup, StaticAddressBook};
pub use error::{StoreError, StoreResult};
pub use memory::{Catalog, InMemoryStore};
pub use repository::{CatalogRepository, OrderRepository, Page, TeamQuery, TEAMS_PER_PAGE};
