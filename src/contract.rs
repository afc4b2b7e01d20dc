//! Checked dynamic-ABI contract handles
//!
//! Wraps address + ABI + client into a callable [`ContractInstance`]. Handles
//! are only constructed after verifying the address actually has code, so a
//! typo'd or not-yet-deployed address fails loudly instead of reverting on
//! the first call.

use crate::abi::{AbiError, Artifact};
use alloy::consensus::TxReceipt as _;
use alloy::contract::{ContractInstance, Interface};
use alloy::dyn_abi::{DynSolValue, JsonAbiExt};
use alloy::json_abi::JsonAbi;
use alloy::network::TransactionBuilder;
use alloy::primitives::{Address, U256};
use alloy::providers::{DynProvider, PendingTransactionError, Provider};
use alloy::rpc::types::{TransactionReceipt, TransactionRequest};
use thiserror::Error;

/// A dynamic-ABI contract handle over a type-erased provider.
pub type ContractHandle = ContractInstance<DynProvider>;

/// Contract interaction errors
#[derive(Debug, Error)]
pub enum ContractError {
    /// No code at the address; the contract has not been deployed
    #[error("no code at {0}; deploy the contract before running this command")]
    NoCode(Address),
    /// Deployment receipt came back without a contract address
    #[error("deployment of {0} produced no contract address")]
    DeployFailed(String),
    /// The ABI does not declare the named event
    #[error("abi does not declare event {0}")]
    UnknownEvent(String),
    /// No log in the receipt matched the event
    #[error("event {0} not found in transaction logs")]
    EventNotFound(String),
    /// A call returned something other than the expected single value
    #[error("unexpected return shape from {0}")]
    BadReturn(&'static str),
    #[error(transparent)]
    Abi(#[from] AbiError),
    #[error("abi encoding: {0}")]
    Encode(#[from] alloy::dyn_abi::Error),
    #[error("rpc: {0}")]
    Rpc(#[from] alloy::transports::TransportError),
    #[error("transaction: {0}")]
    Pending(#[from] PendingTransactionError),
}

/// Build a contract handle, rejecting addresses with no code.
pub async fn handle_with_check(
    client: &DynProvider,
    abi: &JsonAbi,
    address: Address,
) -> Result<ContractHandle, ContractError> {
    let code = client.get_code_at(address).await?;
    if code.is_empty() {
        return Err(ContractError::NoCode(address));
    }
    Ok(ContractInstance::new(
        address,
        client.clone(),
        Interface::new(abi.clone()),
    ))
}

/// Deploy a contract from its artifact: bytecode + ABI-encoded constructor
/// args, wait for the receipt, return the created address.
pub async fn deploy(
    client: &DynProvider,
    artifact: &Artifact,
    args: &[DynSolValue],
) -> Result<Address, ContractError> {
    let name = artifact.path.display().to_string();
    let bytecode = artifact.deploy_code()?;

    let input = match &artifact.abi.constructor {
        Some(constructor) => constructor.abi_encode_input(args)?,
        None => Vec::new(),
    };
    let code = [bytecode.to_vec(), input].concat();

    let tx = TransactionRequest::default().with_deploy_code(code);
    let receipt = client.send_transaction(tx).await?.get_receipt().await?;
    tracing::debug!(tx = %receipt.transaction_hash, artifact = %name, "deploy transaction mined");

    receipt
        .contract_address
        .ok_or(ContractError::DeployFailed(name))
}

/// Extract an address-typed indexed topic from the first receipt log
/// matching `event`.
pub fn event_address(
    abi: &JsonAbi,
    receipt: &TransactionReceipt,
    event: &str,
) -> Result<Address, ContractError> {
    let declared = abi
        .events
        .get(event)
        .and_then(|overloads| overloads.first())
        .ok_or_else(|| ContractError::UnknownEvent(event.to_string()))?;
    let selector = declared.selector();

    for log in receipt.inner.logs() {
        let topics = log.inner.data.topics();
        if topics.first() == Some(&selector) {
            if let Some(topic) = topics.get(1) {
                return Ok(Address::from_word(*topic));
            }
        }
    }
    Err(ContractError::EventNotFound(event.to_string()))
}

/// Decode a single uint256 out of a dynamic call result.
pub fn single_uint(
    values: &[DynSolValue],
    function: &'static str,
) -> Result<U256, ContractError> {
    match values {
        [value] => value
            .as_uint()
            .map(|(v, _)| v)
            .ok_or(ContractError::BadReturn(function)),
        _ => Err(ContractError::BadReturn(function)),
    }
}

/// Decode a single address out of a dynamic call result.
pub fn single_address(
    values: &[DynSolValue],
    function: &'static str,
) -> Result<Address, ContractError> {
    match values {
        [value] => value.as_address().ok_or(ContractError::BadReturn(function)),
        _ => Err(ContractError::BadReturn(function)),
    }
}
