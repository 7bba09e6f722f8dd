//! # Malha Storefront
//!
//! Application layer of the Malha Pro jersey store: wires configuration,
//! the hosted store and the pricing rules into the `malha` command.
//!
//! ## Module Organization
//! ```text
//! malha_storefront/
//! ├── lib.rs          ◄─── You are here (logging setup, exports)
//! ├── main.rs         ◄─── `malha` binary entry point
//! ├── cli.rs          ◄─── clap argument definitions
//! ├── config.rs       ◄─── StorefrontConfig (MALHA_* env vars)
//! ├── error.rs        ◄─── ApiError returned by services
//! ├── services/
//! │   └── checkout.rs ◄─── CheckoutService: cart, quote, orders
//! └── commands/
//!     ├── catalog.rs  ◄─── `malha teams`, `malha leagues`
//!     ├── quote.rs    ◄─── `malha quote`
//!     └── order.rs    ◄─── `malha checkout`, `malha orders`
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod services;

use tracing_subscriber::EnvFilter;

pub use config::{ConfigError, StorefrontConfig};
pub use error::{ApiError, ApiResult, ErrorCode};
pub use services::{CartRequest, CheckoutService, Quote};

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `MALHA_LOG=debug` - Show debug messages (checked first)
/// - `RUST_LOG=malha_core=trace` - Standard override
/// - Default: INFO, DEBUG for the malha crates
///
/// Logs go to stderr so command output on stdout stays clean.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_env("MALHA_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("info,malha=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
