//! # In-Memory Store
//!
//! A process-local stand-in for the hosted backend: seeded from a catalog
//! file, holds orders until the process exits.
//!
//! ## Concurrency
//! One `tokio::sync::RwLock` guards all tables. Catalog reads share the
//! lock; order inserts take it exclusively so ids stay sequential.

use std::path::Path;

use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::error::{StoreError, StoreResult};
use crate::repository::{CatalogRepository, OrderRepository, Page, TeamQuery};
use malha_core::validation::validate_price_cents;
use malha_core::{League, Order, OrderDraft, ProductStock, Team};

/// Seed data for the store.
///
/// Stock may be given inline on each team or as a separate table; both end
/// up attached to the team on read.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Catalog {
    #[serde(default)]
    pub leagues: Vec<League>,
    #[serde(default)]
    pub teams: Vec<Team>,
    #[serde(default)]
    pub stock: Vec<ProductStock>,
}

impl Catalog {
    /// Parses a catalog from JSON and rejects negative list prices.
    pub fn from_json_str(json: &str) -> StoreResult<Self> {
        let catalog: Catalog = serde_json::from_str(json)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Checks every team's list price.
    pub fn validate(&self) -> StoreResult<()> {
        for team in &self.teams {
            validate_price_cents(team.list_price.cents()).map_err(|e| {
                StoreError::InvalidPayload(format!("team {} ({}): {}", team.id, team.name, e))
            })?;
        }
        Ok(())
    }

    /// Reads and parses a catalog file.
    pub fn from_path(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            StoreError::Unavailable(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_json_str(&json)
    }
}

#[derive(Debug, Default)]
struct Tables {
    leagues: Vec<League>,
    teams: Vec<Team>,
    stock: Vec<ProductStock>,
    orders: Vec<Order>,
    next_order_id: i64,
}

impl Tables {
    /// Team row joined with its league name and stock rows.
    fn hydrate(&self, team: &Team) -> Team {
        let mut team = team.clone();

        if team.league_name.is_none() {
            team.league_name = self
                .leagues
                .iter()
                .find(|l| l.id == team.league_id)
                .map(|l| l.name.clone());
        }

        for row in self.stock.iter().filter(|s| s.team_id == team.id) {
            match team.stock.iter_mut().find(|s| s.size == row.size) {
                Some(existing) => existing.stock_quantity = row.stock_quantity,
                None => team.stock.push(row.clone()),
            }
        }
        team
    }
}

/// Hosted-backend stand-in.
#[derive(Debug)]
pub struct InMemoryStore {
    tables: RwLock<Tables>,
}

impl InMemoryStore {
    /// Creates a store seeded with `catalog` and no orders.
    pub fn new(catalog: Catalog) -> Self {
        info!(
            leagues = catalog.leagues.len(),
            teams = catalog.teams.len(),
            "Seeding in-memory store"
        );
        InMemoryStore {
            tables: RwLock::new(Tables {
                leagues: catalog.leagues,
                teams: catalog.teams,
                stock: catalog.stock,
                orders: Vec::new(),
                next_order_id: 1,
            }),
        }
    }

    /// An empty store.
    pub fn empty() -> Self {
        InMemoryStore::new(Catalog::default())
    }

    /// Preloads previously placed orders; new ids continue after the highest.
    pub fn with_orders(mut self, orders: Vec<Order>) -> Self {
        let tables = self.tables.get_mut();
        if let Some(highest) = orders.iter().map(|o| o.id).max() {
            tables.next_order_id = tables.next_order_id.max(highest + 1);
        }
        tables.orders.extend(orders);
        self
    }
}

#[async_trait]
impl CatalogRepository for InMemoryStore {
    async fn list_leagues(&self) -> StoreResult<Vec<League>> {
        let tables = self.tables.read().await;
        let mut leagues = tables.leagues.clone();
        leagues.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(leagues)
    }

    async fn list_teams(&self, query: &TeamQuery) -> StoreResult<Page<Team>> {
        debug!(?query, "Listing teams");

        let needle = query
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase);

        let tables = self.tables.read().await;
        let mut matches: Vec<&Team> = tables
            .teams
            .iter()
            .filter(|t| query.league_id.map_or(true, |id| t.league_id == id))
            .filter(|t| {
                needle
                    .as_ref()
                    .map_or(true, |n| t.name.to_lowercase().contains(n.as_str()))
            })
            .collect();
        matches.sort_by(|a, b| a.name.cmp(&b.name));

        let total = matches.len();
        let items = matches
            .into_iter()
            .skip(query.offset())
            .take(query.per_page as usize)
            .map(|t| tables.hydrate(t))
            .collect();

        Ok(Page {
            items,
            total,
            page: query.page.max(1),
            per_page: query.per_page,
        })
    }

    async fn get_team(&self, id: i64) -> StoreResult<Option<Team>> {
        let tables = self.tables.read().await;
        Ok(tables
            .teams
            .iter()
            .find(|t| t.id == id)
            .map(|t| tables.hydrate(t)))
    }
}

#[async_trait]
impl OrderRepository for InMemoryStore {
    async fn insert_order(&self, draft: OrderDraft) -> StoreResult<Order> {
        if draft.items.is_empty() {
            return Err(StoreError::Rejected("order has no items".to_string()));
        }

        let mut tables = self.tables.write().await;
        let order = Order {
            id: tables.next_order_id,
            created_at: Utc::now(),
            draft,
        };
        tables.next_order_id += 1;
        tables.orders.push(order.clone());

        debug!(order_id = order.id, "Order stored");
        Ok(order)
    }

    async fn get_order(&self, id: i64) -> StoreResult<Option<Order>> {
        let tables = self.tables.read().await;
        Ok(tables.orders.iter().find(|o| o.id == id).cloned())
    }

    async fn orders_for_user(&self, user_id: &str) -> StoreResult<Vec<Order>> {
        let tables = self.tables.read().await;
        let mut orders: Vec<Order> = tables
            .orders
            .iter()
            .filter(|o| o.draft.user_id.as_deref() == Some(user_id))
            .cloned()
            .collect();
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(orders)
    }
}
