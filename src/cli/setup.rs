//! Setup command: deploy contracts and fund the players

use crate::abi;
use crate::config::{Config, Deployment};
use crate::contract;
use crate::wallet;
use alloy::dyn_abi::DynSolValue;
use alloy::primitives::utils::parse_ether;
use clap::Args;

#[derive(Args, Debug)]
pub struct SetupArgs {
    /// Quote tokens minted to each player, in whole tokens
    #[arg(long, default_value = "200000000")]
    pub mint: String,

    /// Quote token name and symbol
    #[arg(long, default_value = "USDC")]
    pub token_symbol: String,
}

impl SetupArgs {
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let erc20 = abi::load_artifact(&config.abi_path(&config.erc20_abi_path))?;
        let factory_artifact = abi::load_artifact(&config.abi_path(&config.factory_abi_path))?;
        let mint_amount = parse_ether(&self.mint)?;

        // The first configured player acts as deployer.
        let deployer = config
            .players
            .first()
            .ok_or_else(|| anyhow::anyhow!("no players configured"))?;
        let (deployer_address, client) =
            wallet::connect_client(&deployer.private_key, &config.rpc_url, config.chain_id)
                .await?;
        tracing::info!(deployer = %deployer.name, address = %deployer_address, "deploying contracts");

        let usdc_address = contract::deploy(
            &client,
            &erc20,
            &[
                DynSolValue::String(self.token_symbol.clone()),
                DynSolValue::String(self.token_symbol.clone()),
            ],
        )
        .await?;
        tracing::info!(address = %usdc_address, "quote token deployed");

        let factory_address = contract::deploy(&client, &factory_artifact, &[]).await?;
        tracing::info!(address = %factory_address, "factory deployed");

        let factory =
            contract::handle_with_check(&client, &factory_artifact.abi, factory_address).await?;
        factory
            .function("setUSDC", &[DynSolValue::Address(usdc_address)])?
            .send()
            .await?
            .get_receipt()
            .await?;

        let usdc = contract::handle_with_check(&client, &erc20.abi, usdc_address).await?;
        for player in &config.players {
            let address = wallet::signer_address(&player.private_key)?;
            usdc.function(
                "mint",
                &[
                    DynSolValue::Address(address),
                    DynSolValue::Uint(mint_amount, 256),
                ],
            )?
            .send()
            .await?
            .get_receipt()
            .await?;
            tracing::info!(player = %player.name, %address, "minted quote tokens");
        }

        let deployment = Deployment {
            factory_address,
            usdc_address,
        };
        deployment.save(&config.deployment_path)?;

        println!("Setup complete!");
        println!("Factory deployed at: {factory_address}");
        println!("USDC deployed at: {usdc_address}");
        Ok(())
    }
}
