//! CLI interface for ipo-cross
//!
//! Provides subcommands for:
//! - `setup`: Deploy the quote token and factory, fund the players
//! - `create`: Create a new IPO cross auction
//! - `submit-orders`: Place random buy orders from every player
//! - `get-price`: Query the current weighted-average clearing price
//! - `finalize`: Finalize the auction and print distribution stats
//! - `config`: Show the resolved configuration

mod create;
mod finalize;
mod get_price;
mod setup;
mod submit_orders;

pub use create::CreateArgs;
pub use finalize::FinalizeArgs;
pub use get_price::GetPriceArgs;
pub use setup::SetupArgs;
pub use submit_orders::SubmitOrdersArgs;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "ipo-cross")]
#[command(about = "Deploy and drive on-chain sealed-bid IPO cross auctions")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Default log level (RUST_LOG overrides)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Deploy the quote token and factory, fund the players
    Setup(SetupArgs),
    /// Create a new IPO cross auction
    Create(CreateArgs),
    /// Place random buy orders from every player
    SubmitOrders(SubmitOrdersArgs),
    /// Query the current weighted-average clearing price
    GetPrice(GetPriceArgs),
    /// Finalize the auction and print distribution stats
    Finalize(FinalizeArgs),
    /// Show the resolved configuration
    Config,
}
