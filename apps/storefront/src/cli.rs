//! Command-line interface.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Malha Pro storefront tools.
#[derive(Debug, Parser)]
#[command(name = "malha", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Browse the catalog.
    Teams(TeamsArgs),

    /// List the leagues a catalog offers.
    Leagues(LeaguesArgs),

    /// Price a cart file against a catalog.
    Quote(QuoteArgs),

    /// Place a PIX order for a cart file.
    Checkout(CheckoutArgs),

    /// Show a customer's past orders.
    Orders(OrdersArgs),
}

/// Catalog and cart files for the cart commands.
#[derive(Debug, Clone, Args)]
pub struct CartSource {
    /// Catalog JSON (`{"leagues": [...], "teams": [...]}`).
    #[arg(long)]
    pub catalog: PathBuf,

    /// Cart JSON (`[{"teamId": 1, "size": "M", "quantity": 2}, ...]`).
    #[arg(long)]
    pub cart: PathBuf,

    /// Print JSON instead of text.
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Clone, Args)]
pub struct TeamsArgs {
    #[arg(long)]
    pub catalog: PathBuf,

    /// Only teams from this league id.
    #[arg(long)]
    pub league: Option<i64>,

    /// Case-insensitive name filter.
    #[arg(long)]
    pub search: Option<String>,

    #[arg(long, default_value_t = 1)]
    pub page: u32,

    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Clone, Args)]
pub struct LeaguesArgs {
    #[arg(long)]
    pub catalog: PathBuf,

    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Clone, Args)]
pub struct QuoteArgs {
    #[command(flatten)]
    pub source: CartSource,
}

#[derive(Debug, Clone, Args)]
pub struct CheckoutArgs {
    #[command(flatten)]
    pub source: CartSource,

    /// CEP table JSON (`{"20271130": {"street": ..., "city": ...}}`).
    #[arg(long)]
    pub addresses: Option<PathBuf>,

    /// Signed-in customer id (UUID).
    #[arg(long)]
    pub user_id: Option<String>,

    /// Order log JSON. Earlier orders are loaded from it and the new one is
    /// appended; the file is created if missing.
    #[arg(long)]
    pub orders: Option<PathBuf>,

    #[arg(long)]
    pub name: String,

    #[arg(long)]
    pub email: String,

    #[arg(long, default_value = "")]
    pub phone: String,

    #[arg(long)]
    pub cep: String,

    #[arg(long)]
    pub number: String,

    #[arg(long, default_value = "")]
    pub complement: String,

    /// Address fields below are looked up from the CEP when omitted.
    #[arg(long, default_value = "")]
    pub street: String,

    #[arg(long, default_value = "")]
    pub neighborhood: String,

    #[arg(long, default_value = "")]
    pub city: String,

    #[arg(long, default_value = "")]
    pub state: String,
}

#[derive(Debug, Clone, Args)]
pub struct OrdersArgs {
    /// Order log written by `malha checkout --orders`.
    #[arg(long)]
    pub orders: PathBuf,

    /// Customer id (UUID).
    #[arg(long)]
    pub user_id: String,

    #[arg(long)]
    pub json: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_quote() {
        let cli = Cli::try_parse_from([
            "malha", "quote", "--catalog", "c.json", "--cart", "k.json", "--json",
        ])
        .unwrap();

        match cli.command {
            Command::Quote(args) => {
                assert_eq!(args.source.catalog, PathBuf::from("c.json"));
                assert!(args.source.json);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_teams_defaults_to_first_page() {
        let cli =
            Cli::try_parse_from(["malha", "teams", "--catalog", "c.json", "--search", "fla"])
                .unwrap();

        match cli.command {
            Command::Teams(args) => {
                assert_eq!(args.page, 1);
                assert_eq!(args.search.as_deref(), Some("fla"));
                assert_eq!(args.league, None);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_checkout_requires_contact() {
        let missing_email = Cli::try_parse_from([
            "malha", "checkout", "--catalog", "c.json", "--cart", "k.json", "--name", "Ana",
            "--cep", "20271130", "--number", "1",
        ]);
        assert!(missing_email.is_err());
    }

    #[test]
    fn test_parse_orders_requires_user() {
        let cli = Cli::try_parse_from([
            "malha", "orders", "--orders", "o.json", "--user-id",
            "550e8400-e29b-41d4-a716-446655440000",
        ])
        .unwrap();
        match cli.command {
            Command::Orders(args) => {
                assert_eq!(args.orders, PathBuf::from("o.json"));
                assert!(!args.json);
            }
            other => panic!("unexpected command: {:?}", other),
        }

        assert!(Cli::try_parse_from(["malha", "orders", "--orders", "o.json"]).is_err());
    }

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
