//! # Catalog Command
//!
//! `malha teams` pages through the catalog the way the product grid does:
//! optional league filter, name search, ten teams per page. `malha leagues`
//! lists the ids the league filter accepts.

use anyhow::Context;
use tracing::debug;

use super::open_service;
use crate::cli::{LeaguesArgs, TeamsArgs};
use crate::config::StorefrontConfig;
use crate::services::camisas;
use malha_core::validation::validate_search_query;
use malha_core::{League, Size, Team};
use malha_store::{CatalogRepository, Page, TeamQuery};

/// Runs `malha teams` and returns the output.
pub async fn run(args: &TeamsArgs, config: StorefrontConfig) -> anyhow::Result<String> {
    debug!(league = ?args.league, search = ?args.search, page = args.page, "teams command");

    let search = args
        .search
        .as_deref()
        .map(validate_search_query)
        .transpose()
        .context("invalid search")?;

    let service = open_service(&args.catalog, None, Vec::new(), config)?;
    let query = TeamQuery {
        league_id: args.league,
        search,
        page: args.page,
        ..TeamQuery::default()
    };
    let page = service.store().list_teams(&query).await?;

    if args.json {
        return Ok(serde_json::to_string_pretty(&page)?);
    }
    Ok(render(&page, service.config()))
}

/// Runs `malha leagues` and returns the output.
pub async fn run_leagues(args: &LeaguesArgs, config: StorefrontConfig) -> anyhow::Result<String> {
    debug!(catalog = %args.catalog.display(), "leagues command");

    let service = open_service(&args.catalog, None, Vec::new(), config)?;
    let leagues = service.leagues().await?;

    if args.json {
        return Ok(serde_json::to_string_pretty(&leagues)?);
    }
    Ok(render_leagues(&leagues))
}

/// `#id  name`, one league per row.
pub fn render_leagues(leagues: &[League]) -> String {
    if leagues.is_empty() {
        return "Nenhuma liga cadastrada.".to_string();
    }
    leagues
        .iter()
        .map(|league| format!("  #{:<4} {}", league.id, league.name))
        .collect::<Vec<_>>()
        .join("\n")
}

/// One row per team with its selling price and available sizes.
pub fn render(page: &Page<Team>, config: &StorefrontConfig) -> String {
    if page.items.is_empty() {
        return "Nenhuma camisa encontrada.".to_string();
    }

    let mut out: Vec<String> = page
        .items
        .iter()
        .map(|team| {
            let sizes: Vec<&str> = Size::ALL
                .iter()
                .filter(|&&size| team.is_available(size))
                .map(|size| size.code())
                .collect();
            format!(
                "  #{:<4} {:<30} {:>12}  [{}]",
                team.id,
                team.name,
                config.format_currency(team.unit_price(config.list_price_factor_bps)),
                if sizes.is_empty() {
                    "esgotado".to_string()
                } else {
                    sizes.join(" ")
                }
            )
        })
        .collect();
    out.push(format!(
        "  Página {} de {} ({})",
        page.page,
        page.total_pages().max(1),
        camisas(page.total as i64)
    ));
    out.join("\n")
}
