//! Create command: open a new IPO cross auction

use crate::app::IpoCrossApp;
use crate::config::{Config, Deployment};
use alloy::primitives::utils::{format_ether, parse_ether};
use clap::Args;

#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Name of the token being auctioned
    pub token_name: String,

    /// Symbol of the token being auctioned
    pub token_symbol: String,

    /// Tokens offered, in whole tokens
    #[arg(long, default_value = "1000000")]
    pub supply: String,

    /// Reserve price per token, in quote-token units
    #[arg(long, default_value = "1.0")]
    pub reserve_price: String,

    /// Acting player (defaults to the first configured)
    #[arg(long)]
    pub player: Option<String>,
}

impl CreateArgs {
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let supply = parse_ether(&self.supply)?;
        let reserve_price = parse_ether(&self.reserve_price)?;

        let deployment = Deployment::load(&config.deployment_path)?;
        let app = IpoCrossApp::connect(config, &deployment).await?;
        let player = match &self.player {
            Some(name) => name.clone(),
            None => app.first_player()?,
        };

        let (address, tx_hash) = app
            .create_auction(
                &player,
                &self.token_name,
                &self.token_symbol,
                supply,
                reserve_price,
            )
            .await?;

        println!("Transaction hash: {tx_hash}");
        println!(
            "IPO Cross created at address: {address} ({} {} @ reserve {} USDC)",
            self.token_name,
            self.token_symbol,
            format_ether(reserve_price)
        );
        Ok(())
    }
}
