//! Get-price command: query the current clearing price

use crate::app::IpoCrossApp;
use crate::config::{Config, Deployment};
use alloy::primitives::{utils::format_ether, Address};
use clap::Args;

#[derive(Args, Debug)]
pub struct GetPriceArgs {
    /// Address of the IPO cross auction
    pub auction: Address,

    /// Acting player (defaults to the first configured)
    #[arg(long)]
    pub player: Option<String>,
}

impl GetPriceArgs {
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let deployment = Deployment::load(&config.deployment_path)?;
        let mut app = IpoCrossApp::connect(config, &deployment).await?;
        let player = match &self.player {
            Some(name) => name.clone(),
            None => app.first_player()?,
        };

        let price = app.clearing_price(&player, self.auction).await?;
        println!("Current clearing price: {} USDC", format_ether(price));
        Ok(())
    }
}
