//! ipo-cross: command-line client for on-chain sealed-bid IPO cross auctions
//!
//! This library provides the components for:
//! - Environment + JSON deployment-state configuration
//! - One signing RPC client per configured player
//! - Checked dynamic-ABI contract handles (reject addresses with no code)
//! - Auction operations: deploy, create, place orders, query price, finalize
//! - Randomized buy-order generation for demo players
//! - Structured logging
//!
//! The auction mechanism itself (matching, weighted-average clearing price,
//! token distribution) lives in the IPO Cross contracts; everything here is
//! RPC orchestration around them.

pub mod abi;
pub mod app;
pub mod cli;
pub mod config;
pub mod contract;
pub mod orders;
pub mod telemetry;
pub mod wallet;
