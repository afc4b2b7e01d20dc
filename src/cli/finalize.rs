//! Finalize command: close the auction and print distribution stats

use crate::app::IpoCrossApp;
use crate::config::{Config, Deployment};
use alloy::primitives::{utils::format_ether, Address};
use clap::Args;

#[derive(Args, Debug)]
pub struct FinalizeArgs {
    /// Address of the IPO cross auction
    pub auction: Address,

    /// Acting player (defaults to the first configured)
    #[arg(long)]
    pub player: Option<String>,
}

impl FinalizeArgs {
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let deployment = Deployment::load(&config.deployment_path)?;
        let mut app = IpoCrossApp::connect(config, &deployment).await?;
        let player = match &self.player {
            Some(name) => name.clone(),
            None => app.first_player()?,
        };

        let summary = app.finalize(&player, self.auction).await?;

        println!("Finalize transaction hash: {}", summary.tx_hash);
        println!("IPO Cross finalized, tokens distributed");
        println!(
            "Final clearing price: {} USDC",
            format_ether(summary.clearing_price)
        );
        println!(
            "Total tokens distributed: {}",
            format_ether(summary.tokens_distributed)
        );
        println!(
            "Total value raised: {} USDC",
            format_ether(summary.value_raised)
        );
        Ok(())
    }
}
