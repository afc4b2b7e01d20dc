use clap::Parser;
use ipo_cross::cli::{Cli, Commands};
use ipo_cross::config::{Config, Deployment};
use ipo_cross::wallet;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    ipo_cross::telemetry::init_logging(&cli.log_level)?;

    let config = Config::from_env()?;

    match cli.command {
        Commands::Setup(args) => {
            tracing::info!("Deploying auction contracts");
            args.execute(&config).await?;
        }
        Commands::Create(args) => {
            tracing::info!("Creating IPO cross auction");
            args.execute(&config).await?;
        }
        Commands::SubmitOrders(args) => {
            tracing::info!("Submitting random orders");
            args.execute(&config).await?;
        }
        Commands::GetPrice(args) => {
            args.execute(&config).await?;
        }
        Commands::Finalize(args) => {
            tracing::info!("Finalizing IPO cross auction");
            args.execute(&config).await?;
        }
        Commands::Config => {
            println!("Current configuration:");
            println!("  Chain: id={} rpc={}", config.chain_id, config.rpc_url);
            println!(
                "  ABIs: factory={} ipocross={} erc20={}",
                config.abi_path(&config.factory_abi_path).display(),
                config.abi_path(&config.ipocross_abi_path).display(),
                config.abi_path(&config.erc20_abi_path).display()
            );
            for player in &config.players {
                println!(
                    "  Player: {} ({})",
                    player.name,
                    wallet::signer_address(&player.private_key)?
                );
            }
            match Deployment::load(&config.deployment_path) {
                Ok(deployment) => {
                    println!("  Factory: {}", deployment.factory_address);
                    println!("  USDC: {}", deployment.usdc_address);
                }
                Err(_) => println!(
                    "  Deployment: not found at {} (run `ipo-cross setup`)",
                    config.deployment_path.display()
                ),
            }
        }
    }

    Ok(())
}
