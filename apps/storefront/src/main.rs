//! `malha` binary.

use clap::Parser;
use tracing::info;

use malha_storefront::cli::{Cli, Command};
use malha_storefront::{commands, init_tracing, StorefrontConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let config = StorefrontConfig::from_env()?;
    info!(store = %config.store_name, "Starting Malha storefront");

    let output = match &cli.command {
        Command::Teams(args) => commands::catalog::run(args, config).await?,
        Command::Leagues(args) => commands::catalog::run_leagues(args, config).await?,
        Command::Quote(args) => commands::quote::run(args, config).await?,
        Command::Checkout(args) => commands::order::run(args, config).await?,
        Command::Orders(args) => commands::order::run_history(args, config).await?,
    };
    println!("{}", output);

    Ok(())
}
