//! Configuration for ipo-cross
//!
//! Two sources: process environment (chain, ABI paths, players) and a small
//! JSON file holding the addresses written by `setup`.

use alloy::primitives::Address;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default location of the deployment-state file, relative to the CWD.
pub const DEFAULT_DEPLOYMENT_PATH: &str = "contract-config.json";

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required environment variable is unset or empty
    #[error("missing required environment variable: {0}")]
    MissingVar(&'static str),
    /// An environment variable is set but unparseable
    #[error("invalid value for {var}: {reason}")]
    InvalidVar { var: &'static str, reason: String },
    /// PLAYER_NAMES and PLAYER_PRIVATE_KEYS disagree in length
    #[error("number of player names ({names}) must match number of private keys ({keys})")]
    PlayerCountMismatch { names: usize, keys: usize },
    /// The deployment-state file does not exist yet
    #[error("no deployment state at {0}; run `ipo-cross setup` first")]
    NotDeployed(PathBuf),
    #[error("reading {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("parsing {path}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// A configured player: a display name and the raw private key material.
///
/// The key is kept as the raw string from the environment; normalization and
/// parsing happen in [`crate::wallet`]. `Debug` is implemented by hand so the
/// key can never leak through error or log output.
#[derive(Clone)]
pub struct PlayerKey {
    pub name: String,
    pub private_key: String,
}

impl std::fmt::Debug for PlayerKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlayerKey")
            .field("name", &self.name)
            .field("private_key", &"<redacted>")
            .finish()
    }
}

/// Root configuration assembled from the environment
#[derive(Debug, Clone)]
pub struct Config {
    pub chain_id: u64,
    pub rpc_url: String,
    /// Optional directory prefixed to relative ABI paths
    pub contract_dir: Option<PathBuf>,
    pub factory_abi_path: PathBuf,
    pub ipocross_abi_path: PathBuf,
    pub erc20_abi_path: PathBuf,
    pub players: Vec<PlayerKey>,
    pub deployment_path: PathBuf,
}

impl Config {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Load configuration through an arbitrary lookup function.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let require = |var: &'static str| -> Result<String, ConfigError> {
            match lookup(var) {
                Some(v) if !v.trim().is_empty() => Ok(v),
                _ => Err(ConfigError::MissingVar(var)),
            }
        };

        let chain_id = require("CHAIN_ID")?;
        let chain_id = chain_id
            .trim()
            .parse::<u64>()
            .map_err(|e| ConfigError::InvalidVar {
                var: "CHAIN_ID",
                reason: e.to_string(),
            })?;

        let names: Vec<String> = split_csv(&require("PLAYER_NAMES")?);
        let keys: Vec<String> = split_csv(&require("PLAYER_PRIVATE_KEYS")?);
        if names.len() != keys.len() {
            return Err(ConfigError::PlayerCountMismatch {
                names: names.len(),
                keys: keys.len(),
            });
        }
        if names.is_empty() {
            return Err(ConfigError::MissingVar("PLAYER_NAMES"));
        }
        let players = names
            .into_iter()
            .zip(keys)
            .map(|(name, private_key)| PlayerKey { name, private_key })
            .collect();

        Ok(Self {
            chain_id,
            rpc_url: require("RPC_URL")?,
            contract_dir: lookup("CONTRACT_DIR").map(PathBuf::from),
            factory_abi_path: PathBuf::from(require("FACTORY_ABI_PATH")?),
            ipocross_abi_path: PathBuf::from(require("IPOCROSS_ABI_PATH")?),
            erc20_abi_path: PathBuf::from(require("ERC20_ABI_PATH")?),
            players,
            deployment_path: lookup("DEPLOYMENT_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DEPLOYMENT_PATH)),
        })
    }

    /// Resolve an ABI path against `CONTRACT_DIR` when it is relative.
    pub fn abi_path(&self, path: &Path) -> PathBuf {
        match &self.contract_dir {
            Some(dir) if path.is_relative() => dir.join(path),
            _ => path.to_path_buf(),
        }
    }
}

fn split_csv(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Addresses produced by `setup`, persisted between invocations.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Deployment {
    pub factory_address: Address,
    pub usdc_address: Address,
}

impl Deployment {
    /// Read the deployment-state file written by `setup`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotDeployed(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| ConfigError::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Persist to disk as pretty-printed JSON.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self).expect("deployment is always serializable");
        std::fs::write(path, json).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}
