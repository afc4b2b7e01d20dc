//! Submit-orders command: every player places random buy orders

use crate::app::IpoCrossApp;
use crate::config::{Config, Deployment};
use crate::orders::OrderRange;
use alloy::primitives::Address;
use clap::Args;

#[derive(Args, Debug)]
pub struct SubmitOrdersArgs {
    /// Address of the IPO cross auction
    pub auction: Address,

    /// Orders per player
    #[arg(long, default_value = "3")]
    pub num_orders: u32,

    /// Minimum bid price per token, in quote-token units
    #[arg(long, default_value = "100")]
    pub min_price: String,

    /// Maximum bid price per token, in quote-token units
    #[arg(long, default_value = "10000")]
    pub max_price: String,

    /// Minimum bid quantity, in whole tokens
    #[arg(long, default_value = "10")]
    pub min_quantity: u64,

    /// Maximum bid quantity, in whole tokens
    #[arg(long, default_value = "100")]
    pub max_quantity: u64,
}

impl SubmitOrdersArgs {
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let range = OrderRange::from_display_units(
            &self.min_price,
            &self.max_price,
            self.min_quantity,
            self.max_quantity,
        )?;

        let deployment = Deployment::load(&config.deployment_path)?;
        let mut app = IpoCrossApp::connect(config, &deployment).await?;

        let names: Vec<String> = app.players().iter().map(|p| p.name.clone()).collect();
        for name in names {
            let placed = app
                .submit_random_orders(&name, self.auction, self.num_orders, &range)
                .await?;
            for order in placed {
                println!(
                    "Order placed by {name}: {} (tx: {})",
                    order.spec, order.tx_hash
                );
            }
        }

        println!("\nAll orders submitted successfully!");
        Ok(())
    }
}
