//! # Quote Command
//!
//! `malha quote` prints what the cart drawer would show.
//!
//! ```text
//! ┌────────────────────────────────────────────────┐
//! │  Malha Pro                                     │
//! │  1x Santos 2024 (P)                 R$ 20,00   │
//! │  2x Flamengo 2024 (M)               R$ 60,00   │
//! │  ────────────────────────────────────────────  │
//! │  Subtotal                           R$ 80,00   │
//! │  Desconto                          -R$ 20,00   │
//! │  Total                              R$ 60,00   │
//! │  Você ganhou 1 camisa de graça!                │
//! │  Adicione mais 2 camisas para finalizar.       │
//! └────────────────────────────────────────────────┘
//! ```

use tracing::debug;

use super::{load_cart, open_service};
use crate::cli::QuoteArgs;
use crate::config::StorefrontConfig;
use crate::services::{camisas, Quote};

/// Runs `malha quote` and returns the output.
pub async fn run(args: &QuoteArgs, config: StorefrontConfig) -> anyhow::Result<String> {
    debug!(catalog = %args.source.catalog.display(), cart = %args.source.cart.display(), "quote command");

    let service = open_service(&args.source.catalog, None, Vec::new(), config)?;
    let requests = load_cart(&args.source)?;
    let cart = service.build_cart(&requests).await?;
    let quote = service.quote(&cart);

    if args.source.json {
        return Ok(serde_json::to_string_pretty(&quote)?);
    }
    Ok(render(&quote, service.config()))
}

/// Plain-text cart summary.
pub fn render(quote: &Quote, config: &StorefrontConfig) -> String {
    let mut out = vec![config.store_name.clone()];

    for line in &quote.lines {
        let label = format!("{}x {} ({})", line.quantity, line.team_name, line.size);
        out.push(format!("  {:<34}{:>12}", label, line.line_total_display));
    }
    out.push(format!("  {}", "─".repeat(46)));
    out.push(format!("  {:<34}{:>12}", "Subtotal", quote.subtotal_display));
    if quote.totals.discount.is_positive() {
        out.push(format!("  {:<34}{:>12}", "Desconto", format!("-{}", quote.discount_display)));
    }
    out.push(format!("  {:<34}{:>12}", "Total", quote.total_display));

    if let Some(message) = &quote.free_items_message {
        out.push(format!("  {}", message));
    }
    if !quote.can_checkout {
        out.push(format!(
            "  Adicione mais {} para finalizar.",
            camisas(quote.items_missing)
        ));
    }
    out.join("\n")
}
