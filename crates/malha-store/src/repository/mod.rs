//! # Repository Traits
//!
//! The hosted backend seen through two repositories.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  CheckoutService                                                       │
//! │       │                                                                 │
//! │       │  store.get_team(12)             store.insert_order(draft)      │
//! │       ▼                                        ▼                        │
//! │  CatalogRepository                       OrderRepository               │
//! │  ├── list_leagues()                      ├── insert_order(draft)       │
//! │  ├── list_teams(&query)                  ├── get_order(id)             │
//! │  └── get_team(id)                        └── orders_for_user(user_id)  │
//! │       │                                        │                        │
//! │       └──────────────┬─────────────────────────┘                        │
//! │                      ▼                                                  │
//! │        InMemoryStore (dev/tests) or a hosted-backend client             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Services receive their store as an explicit dependency; nothing in the
//! workspace reaches for a global client.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::StoreResult;
use malha_core::{League, Order, OrderDraft, Team};

/// Teams shown per catalog page.
pub const TEAMS_PER_PAGE: u32 = 10;

/// Catalog listing filters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamQuery {
    /// Restrict to one league.
    pub league_id: Option<i64>,

    /// Case-insensitive substring of the team name.
    pub search: Option<String>,

    /// 1-based page number.
    pub page: u32,

    pub per_page: u32,
}

impl Default for TeamQuery {
    fn default() -> Self {
        TeamQuery {
            league_id: None,
            search: None,
            page: 1,
            per_page: TEAMS_PER_PAGE,
        }
    }
}

impl TeamQuery {
    /// Zero-based offset of the first row on this page.
    pub fn offset(&self) -> usize {
        (self.page.max(1) as usize - 1) * self.per_page as usize
    }
}

/// One page of results plus the unpaginated count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: usize,
    pub page: u32,
    pub per_page: u32,
}

impl<T> Page<T> {
    /// Number of pages needed for `total` rows.
    pub fn total_pages(&self) -> usize {
        if self.per_page == 0 {
            return 0;
        }
        self.total.div_ceil(self.per_page as usize)
    }
}

/// Read access to leagues, teams and stock.
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    /// Every league, ordered by name.
    async fn list_leagues(&self) -> StoreResult<Vec<League>>;

    /// Teams matching `query`, ordered by name, with stock attached.
    async fn list_teams(&self, query: &TeamQuery) -> StoreResult<Page<Team>>;

    /// A single team with stock attached.
    async fn get_team(&self, id: i64) -> StoreResult<Option<Team>>;
}

/// Order persistence.
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Persists a draft and returns the stored order.
    async fn insert_order(&self, draft: OrderDraft) -> StoreResult<Order>;

    async fn get_order(&self, id: i64) -> StoreResult<Option<Order>>;

    /// A customer's orders, newest first.
    async fn orders_for_user(&self, user_id: &str) -> StoreResult<Vec<Order>>;
}
