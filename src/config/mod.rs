use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::core::OpsError;

/// Networks the contracts are deployed to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Network {
    Mainnet,
    Sepolia,
    Matic,
    BscTestnet,
    ScrollSepolia,
    /// Local Anvil/Hardhat node
    Localhost,
}

impl Network {
    pub const ALL: [Network; 6] = [
        Network::Mainnet,
        Network::Sepolia,
        Network::Matic,
        Network::BscTestnet,
        Network::ScrollSepolia,
        Network::Localhost,
    ];

    /// Canonical name, also used for the deployment record file name
    pub fn name(&self) -> &'static str {
        match self {
            Network::Mainnet => "mainnet",
            Network::Sepolia => "sepolia",
            Network::Matic => "matic",
            Network::BscTestnet => "BSCTestnet",
            Network::ScrollSepolia => "scrollSepolia",
            Network::Localhost => "localhost",
        }
    }

    pub fn rpc_env_var(&self) -> &'static str {
        match self {
            Network::Mainnet => "MAINNET_RPC_URL",
            Network::Sepolia => "SEPOLIA_RPC_URL",
            Network::Matic => "MATIC_RPC_URL",
            Network::BscTestnet => "BSC_TESTNET_RPC_URL",
            Network::ScrollSepolia => "SCROLL_SEPOLIA_RPC_URL",
            Network::Localhost => "LOCALHOST_RPC_URL",
        }
    }

    /// Chain id the RPC endpoint must report. Local nodes are not checked.
    pub fn chain_id(&self) -> Option<u64> {
        match self {
            Network::Mainnet => Some(1),
            Network::Sepolia => Some(11_155_111),
            Network::Matic => Some(137),
            Network::BscTestnet => Some(97),
            Network::ScrollSepolia => Some(534_351),
            Network::Localhost => None,
        }
    }

    pub fn native_symbol(&self) -> &'static str {
        match self {
            Network::Matic => "MATIC",
            Network::BscTestnet => "tBNB",
            _ => "ETH",
        }
    }

    fn default_rpc_url(&self) -> Option<&'static str> {
        match self {
            Network::Localhost => Some("http://127.0.0.1:8545"),
            _ => None,
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Network {
    type Err = OpsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .collect::<String>()
            .to_lowercase();
        match normalized.as_str() {
            "mainnet" | "ethereum" => Ok(Network::Mainnet),
            "sepolia" => Ok(Network::Sepolia),
            "matic" | "polygon" => Ok(Network::Matic),
            "bsctestnet" => Ok(Network::BscTestnet),
            "scrollsepolia" => Ok(Network::ScrollSepolia),
            "localhost" | "local" | "anvil" | "hardhat" => Ok(Network::Localhost),
            _ => Err(OpsError::InvalidNetwork(s.to_string())),
        }
    }
}

/// File locations and timing, optionally read from `memetv.toml`
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub tree_path: PathBuf,
    pub deployments_dir: PathBuf,
    pub artifacts_dir: PathBuf,
    pub recipients_path: PathBuf,
    /// Pause between submitting a deployment and waiting for its receipt
    pub deploy_delay_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tree_path: PathBuf::from("MerkleTree").join("tree.json"),
            deployments_dir: PathBuf::from("deployments"),
            artifacts_dir: PathBuf::from("artifacts"),
            recipients_path: PathBuf::from("ignition")
                .join("modules")
                .join("airdropAddresses&Amounts.json"),
            deploy_delay_ms: 2000,
        }
    }
}

/// Load the config file if one exists. A malformed file is an error.
pub fn load() -> Result<Config> {
    match config_path() {
        Some(path) => load_file(&path),
        None => Ok(Config::default()),
    }
}

pub fn load_file(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    toml::from_str::<Config>(&content)
        .with_context(|| format!("Invalid config file {}", path.display()))
}

pub fn config_path() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os("MEMETV_CONFIG").map(PathBuf::from) {
        return Some(path);
    }
    let local = PathBuf::from("memetv.toml");
    if local.is_file() {
        return Some(local);
    }
    directories::ProjectDirs::from("io", "memetv", "memetv")
        .map(|dirs| dirs.config_dir().join("config.toml"))
        .filter(|path| path.is_file())
}

/// Everything needed to sign and send transactions on one network
#[derive(Clone)]
pub struct ChainSettings {
    pub network: Network,
    pub rpc_url: String,
    pub token_symbol: String,
    private_key: String,
}

impl ChainSettings {
    /// Read settings from the process environment (after `.env` has been loaded)
    pub fn from_env(network_override: Option<&str>) -> Result<Self, OpsError> {
        Self::from_lookup(network_override, |key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(network_override: Option<&str>, lookup: F) -> Result<Self, OpsError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let private_key = get("PRIVATE_KEY").ok_or(OpsError::MissingEnv("PRIVATE_KEY"))?;

        let network_name = match network_override {
            Some(name) => name.to_string(),
            None => get("NETWORK").ok_or(OpsError::MissingEnv("NETWORK"))?,
        };
        let network: Network = network_name.parse()?;

        let rpc_url = get(network.rpc_env_var())
            .or_else(|| network.default_rpc_url().map(str::to_string))
            .ok_or(OpsError::MissingEnv(network.rpc_env_var()))?;

        let token_symbol =
            get("TOKEN_SYMBOL").unwrap_or_else(|| network.native_symbol().to_string());

        Ok(Self {
            network,
            rpc_url: rpc_url.trim().to_string(),
            token_symbol,
            private_key: private_key.trim().to_string(),
        })
    }

    pub fn private_key(&self) -> &str {
        &self.private_key
    }
}

impl fmt::Debug for ChainSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChainSettings")
            .field("network", &self.network)
            .field("rpc_url", &self.rpc_url)
            .field("token_symbol", &self.token_symbol)
            .field("private_key", &"<redacted>")
            .finish()
    }
}
