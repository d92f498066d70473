//! Deployment records: `deployments/<network>.json` with the deploy script's key names

use std::fs;
use std::path::{Path, PathBuf};

use alloy::primitives::{Address, B256};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::config::Network;
use crate::core::OpsError;

/// Addresses written by `deploy` and read back by every later command
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentRecord {
    pub network: String,
    #[serde(rename = "TheMemeTVContractAddress")]
    pub token: Address,
    #[serde(rename = "AirdropContractAddress")]
    pub airdrop: Address,
    #[serde(rename = "MerkleRoot")]
    pub merkle_root: B256,
}

impl DeploymentRecord {
    pub fn new(network: Network, token: Address, airdrop: Address, merkle_root: B256) -> Self {
        Self {
            network: network.name().to_string(),
            token,
            airdrop,
            merkle_root,
        }
    }

    pub fn path(dir: &Path, network: Network) -> PathBuf {
        dir.join(format!("{}.json", network.name()))
    }

    /// Write `<dir>/<network>.json`, creating the directory if needed
    pub fn save(&self, dir: &Path) -> Result<PathBuf> {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create {}", dir.display()))?;
        let network: Network = self.network.parse()?;
        let path = Self::path(dir, network);
        let json = serde_json::to_string_pretty(self)?;
        fs::write(&path, json).with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(path)
    }

    pub fn load(dir: &Path, network: Network) -> Result<Self> {
        let path = Self::path(dir, network);
        if !path.exists() {
            return Err(OpsError::MissingDeployment {
                network: network.to_string(),
                path: path.display().to_string(),
            }
            .into());
        }
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Invalid deployment record {}", path.display()))
    }
}
