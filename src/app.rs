//! Auction orchestration across players
//!
//! Holds one signing client per player plus checked contract handles for the
//! factory, the quote token, and any auctions touched during the invocation.
//! Auction handles are cached per (address, player) so a command that loops
//! over players reuses them.

use crate::abi;
use crate::config::{Config, Deployment};
use crate::contract::{self, ContractHandle};
use crate::orders::{draw_order, OrderRange, OrderSpec};
use crate::wallet;
use alloy::dyn_abi::DynSolValue;
use alloy::json_abi::JsonAbi;
use alloy::primitives::{Address, TxHash, U256};
use alloy::providers::DynProvider;
use std::collections::HashMap;

/// A connected player
#[derive(Debug, Clone)]
pub struct Player {
    pub name: String,
    pub address: Address,
}

/// A placed order together with its transaction hash
#[derive(Debug, Clone)]
pub struct PlacedOrder {
    pub spec: OrderSpec,
    pub tx_hash: TxHash,
}

/// Summary printed after finalization
#[derive(Debug, Clone)]
pub struct FinalizeSummary {
    pub tx_hash: TxHash,
    pub clearing_price: U256,
    pub tokens_distributed: U256,
    pub value_raised: U256,
}

/// Per-player clients and contract handles for one CLI invocation.
pub struct IpoCrossApp {
    auction_abi: JsonAbi,
    factory_abi: JsonAbi,
    players: Vec<Player>,
    clients: HashMap<String, DynProvider>,
    factories: HashMap<String, ContractHandle>,
    tokens: HashMap<String, ContractHandle>,
    auctions: HashMap<(Address, String), ContractHandle>,
}

impl IpoCrossApp {
    /// Connect every configured player and build checked handles for the
    /// factory and quote token.
    pub async fn connect(config: &Config, deployment: &Deployment) -> anyhow::Result<Self> {
        let factory_abi = abi::load_abi(&config.abi_path(&config.factory_abi_path))?;
        let auction_abi = abi::load_abi(&config.abi_path(&config.ipocross_abi_path))?;
        let erc20_abi = abi::load_abi(&config.abi_path(&config.erc20_abi_path))?;

        let mut players = Vec::with_capacity(config.players.len());
        let mut clients = HashMap::new();
        let mut factories = HashMap::new();
        let mut tokens = HashMap::new();

        for player in &config.players {
            let (address, client) =
                wallet::connect_client(&player.private_key, &config.rpc_url, config.chain_id)
                    .await?;

            let factory =
                contract::handle_with_check(&client, &factory_abi, deployment.factory_address)
                    .await?;
            let token =
                contract::handle_with_check(&client, &erc20_abi, deployment.usdc_address).await?;

            tracing::debug!(player = %player.name, %address, "player connected");
            players.push(Player {
                name: player.name.clone(),
                address,
            });
            clients.insert(player.name.clone(), client);
            factories.insert(player.name.clone(), factory);
            tokens.insert(player.name.clone(), token);
        }

        Ok(Self {
            auction_abi,
            factory_abi,
            players,
            clients,
            factories,
            tokens,
            auctions: HashMap::new(),
        })
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// The default acting player: the first one configured.
    pub fn first_player(&self) -> anyhow::Result<String> {
        self.players
            .first()
            .map(|p| p.name.clone())
            .ok_or_else(|| anyhow::anyhow!("no players configured"))
    }

    fn factory(&self, player: &str) -> anyhow::Result<&ContractHandle> {
        self.factories
            .get(player)
            .ok_or_else(|| anyhow::anyhow!("unknown player: {player}"))
    }

    fn token(&self, player: &str) -> anyhow::Result<&ContractHandle> {
        self.tokens
            .get(player)
            .ok_or_else(|| anyhow::anyhow!("unknown player: {player}"))
    }

    /// Checked handle for an auction, cached per (address, player).
    async fn auction(&mut self, player: &str, address: Address) -> anyhow::Result<ContractHandle> {
        let key = (address, player.to_string());
        if let Some(handle) = self.auctions.get(&key) {
            return Ok(handle.clone());
        }
        let client = self
            .clients
            .get(player)
            .ok_or_else(|| anyhow::anyhow!("unknown player: {player}"))?;
        let handle = contract::handle_with_check(client, &self.auction_abi, address).await?;
        self.auctions.insert(key, handle.clone());
        Ok(handle)
    }

    /// Create a new auction through the factory.
    ///
    /// Simulates the call first for the predicted address, then sends the
    /// transaction and reads the authoritative address from the
    /// `IPOCrossCreated` event.
    pub async fn create_auction(
        &self,
        player: &str,
        token_name: &str,
        token_symbol: &str,
        token_supply: U256,
        reserve_price: U256,
    ) -> anyhow::Result<(Address, TxHash)> {
        tracing::info!(player, token_name, token_symbol, "creating IPO cross");
        let factory = self.factory(player)?;
        let args = [
            DynSolValue::String(token_name.to_string()),
            DynSolValue::String(token_symbol.to_string()),
            DynSolValue::Uint(token_supply, 256),
            DynSolValue::Uint(reserve_price, 256),
        ];

        // eth_call the creation for the predicted address; not every factory
        // build returns one, so a failure here is non-fatal.
        let predicted = match factory.function("createIPOCross", &args)?.call().await {
            Ok(values) => contract::single_address(&values, "createIPOCross").ok(),
            Err(e) => {
                tracing::debug!(error = %e, "creation simulation did not return an address");
                None
            }
        };

        let receipt = factory
            .function("createIPOCross", &args)?
            .send()
            .await?
            .get_receipt()
            .await?;
        let tx_hash = receipt.transaction_hash;
        tracing::info!(tx = %tx_hash, "creation transaction mined");

        let address = match contract::event_address(&self.factory_abi, &receipt, "IPOCrossCreated")
        {
            Ok(address) => address,
            Err(e) => predicted.ok_or(e)?,
        };
        Ok((address, tx_hash))
    }

    /// Submit `num_orders` random orders for one player, approving the quote
    /// token spend before each bid.
    pub async fn submit_random_orders(
        &mut self,
        player: &str,
        auction_address: Address,
        num_orders: u32,
        range: &OrderRange,
    ) -> anyhow::Result<Vec<PlacedOrder>> {
        tracing::info!(player, num_orders, "submitting random orders");
        let auction = self.auction(player, auction_address).await?;
        let token = self.token(player)?;

        let mut placed = Vec::with_capacity(num_orders as usize);
        for _ in 0..num_orders {
            let spec = draw_order(&mut rand::thread_rng(), range);

            token
                .function(
                    "approve",
                    &[
                        DynSolValue::Address(auction_address),
                        DynSolValue::Uint(spec.cost(), 256),
                    ],
                )?
                .send()
                .await?
                .get_receipt()
                .await?;

            let receipt = auction
                .function(
                    "placeBuyOrder",
                    &[
                        DynSolValue::Uint(spec.price, 256),
                        DynSolValue::Uint(spec.quantity, 256),
                    ],
                )?
                .send()
                .await?
                .get_receipt()
                .await?;

            tracing::debug!(player, tx = %receipt.transaction_hash, order = %spec, "order placed");
            placed.push(PlacedOrder {
                spec,
                tx_hash: receipt.transaction_hash,
            });
        }
        Ok(placed)
    }

    /// Current weighted-average clearing price of a live auction.
    pub async fn clearing_price(
        &mut self,
        player: &str,
        auction_address: Address,
    ) -> anyhow::Result<U256> {
        let auction = self.auction(player, auction_address).await?;
        let values = auction
            .function("calculateWeightedAveragePrice", &[])?
            .call()
            .await?;
        Ok(contract::single_uint(
            &values,
            "calculateWeightedAveragePrice",
        )?)
    }

    /// Finalize the auction and collect the distribution summary.
    pub async fn finalize(
        &mut self,
        player: &str,
        auction_address: Address,
    ) -> anyhow::Result<FinalizeSummary> {
        tracing::info!(player, auction = %auction_address, "finalizing IPO cross");
        let auction = self.auction(player, auction_address).await?;

        let receipt = auction
            .function("finalizeAuction", &[])?
            .send()
            .await?
            .get_receipt()
            .await?;
        let tx_hash = receipt.transaction_hash;
        tracing::info!(tx = %tx_hash, "finalize transaction mined");

        let clearing_price = self.read_uint(&auction, "getClearingPrice").await?;
        let tokens_distributed = self.read_uint(&auction, "getTotalTokensDistributed").await?;
        let value_raised = self.read_uint(&auction, "getTotalValueRaised").await?;

        Ok(FinalizeSummary {
            tx_hash,
            clearing_price,
            tokens_distributed,
            value_raised,
        })
    }

    async fn read_uint(
        &self,
        handle: &ContractHandle,
        function: &'static str,
    ) -> anyhow::Result<U256> {
        let values = handle.function(function, &[])?.call().await?;
        Ok(contract::single_uint(&values, function)?)
    }
}
