//! Signing RPC clients for players
//!
//! One HTTP provider with a local signer per configured player. Keys from the
//! environment are normalized before parsing: some tooling emits them without
//! the `0x` prefix or with leading zeros stripped.

use alloy::network::EthereumWallet;
use alloy::primitives::Address;
use alloy::providers::{DynProvider, Provider, ProviderBuilder};
use alloy::signers::local::PrivateKeySigner;
use thiserror::Error;

/// Wallet construction errors. None of the variants carry key material.
#[derive(Debug, Error)]
pub enum WalletError {
    /// The key is not a 32-byte hex string (after normalization)
    #[error("invalid private key format; must be a 32-byte hex string")]
    InvalidKey,
    #[error("invalid RPC url: {0}")]
    InvalidRpcUrl(String),
    /// The node answers for a different chain than configured
    #[error("chain id mismatch: node reports {actual}, configured {expected}")]
    ChainIdMismatch { expected: u64, actual: u64 },
    #[error("rpc: {0}")]
    Rpc(#[from] alloy::transports::TransportError),
}

/// Normalize a raw private-key string into `0x` + 64 lowercase hex chars.
///
/// Strips an optional `0x` prefix and left-pads with zeros to 64 chars.
pub fn normalize_key(raw: &str) -> Result<String, WalletError> {
    let stripped = raw.trim().trim_start_matches("0x");
    if stripped.is_empty()
        || stripped.len() > 64
        || !stripped.chars().all(|c| c.is_ascii_hexdigit())
    {
        return Err(WalletError::InvalidKey);
    }
    Ok(format!("0x{:0>64}", stripped.to_ascii_lowercase()))
}

/// Parse a private key into a signer without connecting anywhere.
pub fn signer_from_key(raw: &str) -> Result<PrivateKeySigner, WalletError> {
    normalize_key(raw)?
        .parse::<PrivateKeySigner>()
        .map_err(|_| WalletError::InvalidKey)
}

/// The address a private key signs for.
pub fn signer_address(raw: &str) -> Result<Address, WalletError> {
    Ok(signer_from_key(raw)?.address())
}

/// Build a signing HTTP client and verify the node's chain id.
///
/// Returns the signer address alongside the type-erased provider so callers
/// can store clients for many players in one map.
pub async fn connect_client(
    raw_key: &str,
    rpc_url: &str,
    chain_id: u64,
) -> Result<(Address, DynProvider), WalletError> {
    let signer = signer_from_key(raw_key)?;
    let address = signer.address();

    let url = rpc_url
        .parse()
        .map_err(|e: url::ParseError| WalletError::InvalidRpcUrl(e.to_string()))?;
    let provider = ProviderBuilder::new()
        .wallet(EthereumWallet::from(signer))
        .connect_http(url)
        .erased();

    let actual = provider.get_chain_id().await?;
    if actual != chain_id {
        return Err(WalletError::ChainIdMismatch {
            expected: chain_id,
            actual,
        });
    }

    tracing::debug!(%address, chain_id, "connected signing client");
    Ok((address, provider))
}

#[cfg(test)]
mod tests {
    use super::*;

    // anvil's first well-known dev key
    const ANVIL_KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
    const ANVIL_ADDR: &str = "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266";

    #[test]
    fn test_normalize_key_pads_and_prefixes() {
        let key = normalize_key("1").unwrap();
        assert_eq!(key.len(), 66);
        assert_eq!(
            key,
            "0x0000000000000000000000000000000000000000000000000000000000000001"
        );
    }

    #[test]
    fn test_normalize_key_accepts_prefixed() {
        let key = normalize_key(ANVIL_KEY).unwrap();
        assert_eq!(key, ANVIL_KEY);
    }

    #[test]
    fn test_normalize_key_rejects_garbage() {
        assert!(matches!(normalize_key(""), Err(WalletError::InvalidKey)));
        assert!(matches!(normalize_key("0x"), Err(WalletError::InvalidKey)));
        assert!(matches!(
            normalize_key("not-a-key"),
            Err(WalletError::InvalidKey)
        ));
        // 65 hex chars: too long
        let long = "1".repeat(65);
        assert!(matches!(normalize_key(&long), Err(WalletError::InvalidKey)));
    }

    #[test]
    fn test_signer_address_matches_known_key() {
        let addr = signer_address(ANVIL_KEY).unwrap();
        assert_eq!(addr, ANVIL_ADDR.parse::<Address>().unwrap());
    }

    #[test]
    fn test_error_display_never_contains_key() {
        let err = signer_from_key("zzzz").unwrap_err();
        assert!(!err.to_string().contains("zzzz"));
    }
}
