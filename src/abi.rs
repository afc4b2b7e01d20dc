//! Contract artifact loading
//!
//! Accepts either a Foundry/Hardhat artifact (`{ "abi": [...], "bytecode":
//! ... }`) or a bare ABI array, so ABI paths can point at compiler output
//! directly.

use alloy::json_abi::JsonAbi;
use alloy::primitives::Bytes;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Artifact loading errors
#[derive(Debug, Error)]
pub enum AbiError {
    #[error("reading {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("parsing {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("invalid bytecode hex in {path}")]
    InvalidBytecode { path: PathBuf },
    /// Deployment was requested from an artifact that carries no bytecode
    #[error("artifact {path} has no deploy bytecode")]
    MissingBytecode { path: PathBuf },
}

/// A parsed contract artifact: the ABI plus optional deploy bytecode.
#[derive(Debug, Clone)]
pub struct Artifact {
    pub abi: JsonAbi,
    pub bytecode: Option<Bytes>,
    pub path: PathBuf,
}

impl Artifact {
    /// The deploy bytecode, or an error naming the artifact.
    pub fn deploy_code(&self) -> Result<&Bytes, AbiError> {
        self.bytecode.as_ref().ok_or(AbiError::MissingBytecode {
            path: self.path.clone(),
        })
    }
}

// Foundry nests bytecode under `object`; Hardhat stores it flat.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawBytecode {
    Nested { object: String },
    Flat(String),
}

#[derive(Deserialize)]
struct RawArtifact {
    abi: JsonAbi,
    bytecode: Option<RawBytecode>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ArtifactFile {
    Artifact(RawArtifact),
    Abi(JsonAbi),
}

/// Load an artifact (or bare ABI array) from disk.
pub fn load_artifact(path: &Path) -> Result<Artifact, AbiError> {
    let content = std::fs::read_to_string(path).map_err(|source| AbiError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let parsed: ArtifactFile =
        serde_json::from_str(&content).map_err(|source| AbiError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

    let (abi, raw_bytecode) = match parsed {
        ArtifactFile::Artifact(a) => (a.abi, a.bytecode),
        ArtifactFile::Abi(abi) => (abi, None),
    };

    let bytecode = match raw_bytecode {
        Some(RawBytecode::Nested { object }) | Some(RawBytecode::Flat(object)) => Some(
            object
                .parse::<Bytes>()
                .map_err(|_| AbiError::InvalidBytecode {
                    path: path.to_path_buf(),
                })?,
        ),
        None => None,
    };

    Ok(Artifact {
        abi,
        bytecode,
        path: path.to_path_buf(),
    })
}

/// Load only the ABI from an artifact file.
pub fn load_abi(path: &Path) -> Result<JsonAbi, AbiError> {
    load_artifact(path).map(|a| a.abi)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const BARE_ABI: &str = r#"[
        {
            "type": "function",
            "name": "getCurrentClearingPrice",
            "inputs": [],
            "outputs": [{ "name": "", "type": "uint256" }],
            "stateMutability": "view"
        }
    ]"#;

    fn write_fixture(content: &str) -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("artifact.json");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        (dir, path)
    }

    #[test]
    fn test_load_bare_abi_array() {
        let (_dir, path) = write_fixture(BARE_ABI);
        let artifact = load_artifact(&path).unwrap();
        assert!(artifact.abi.functions.contains_key("getCurrentClearingPrice"));
        assert!(artifact.bytecode.is_none());
        assert!(matches!(
            artifact.deploy_code(),
            Err(AbiError::MissingBytecode { .. })
        ));
    }

    #[test]
    fn test_load_foundry_artifact() {
        let content = format!(
            r#"{{ "abi": {BARE_ABI}, "bytecode": {{ "object": "0x6080604052" }} }}"#
        );
        let (_dir, path) = write_fixture(&content);
        let artifact = load_artifact(&path).unwrap();
        assert_eq!(
            artifact.deploy_code().unwrap().as_ref(),
            &[0x60, 0x80, 0x60, 0x40, 0x52]
        );
    }

    #[test]
    fn test_load_hardhat_artifact() {
        let content = format!(r#"{{ "abi": {BARE_ABI}, "bytecode": "0x00ff" }}"#);
        let (_dir, path) = write_fixture(&content);
        let artifact = load_artifact(&path).unwrap();
        assert_eq!(artifact.deploy_code().unwrap().as_ref(), &[0x00, 0xff]);
    }

    #[test]
    fn test_invalid_bytecode_hex() {
        let content = format!(r#"{{ "abi": {BARE_ABI}, "bytecode": "0xzz" }}"#);
        let (_dir, path) = write_fixture(&content);
        assert!(matches!(
            load_artifact(&path),
            Err(AbiError::InvalidBytecode { .. })
        ));
    }

    #[test]
    fn test_missing_file() {
        let err = load_abi(Path::new("/nonexistent/abi.json")).unwrap_err();
        assert!(matches!(err, AbiError::Io { .. }));
    }

    #[test]
    fn test_not_json() {
        let (_dir, path) = write_fixture("definitely not json");
        assert!(matches!(load_abi(&path), Err(AbiError::Parse { .. })));
    }
}
