//! Signing provider construction for the selected network

use alloy::network::EthereumWallet;
use alloy::providers::{DynProvider, Provider, ProviderBuilder};
use alloy::signers::local::PrivateKeySigner;
use anyhow::{Context, Result};

/// Provider configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderConfig {
    /// HTTP JSON-RPC endpoint
    Http(String),
    /// WebSocket endpoint
    WebSocket(String),
}

impl ProviderConfig {
    /// Pick the transport from the URL scheme
    pub fn from_url(url: &str) -> Self {
        let url = url.trim();
        let lower = url.to_ascii_lowercase();
        if lower.starts_with("ws://") || lower.starts_with("wss://") {
            ProviderConfig::WebSocket(url.to_string())
        } else {
            ProviderConfig::Http(url.to_string())
        }
    }

    /// Get display name for this endpoint, without credentials in the path
    pub fn display(&self) -> String {
        let url = match self {
            ProviderConfig::Http(url) | ProviderConfig::WebSocket(url) => url,
        };
        redact_url(url)
    }

    /// Check if this is a WebSocket endpoint
    pub fn is_websocket(&self) -> bool {
        matches!(self, ProviderConfig::WebSocket(_))
    }
}

/// Hosted RPC URLs embed API keys in the path; keep only scheme and host
fn redact_url(url: &str) -> String {
    let Some((scheme, rest)) = url.split_once("://") else {
        return url.to_string();
    };
    let (authority, path) = rest.split_once('/').unwrap_or((rest, ""));
    let host = authority.rsplit('@').next().unwrap_or(authority);
    if !path.is_empty() {
        format!("{}://{}/…", scheme, host)
    } else {
        format!("{}://{}", scheme, host)
    }
}

pub fn parse_signer(private_key: &str) -> Result<PrivateKeySigner> {
    private_key
        .trim()
        .parse::<PrivateKeySigner>()
        .context("Invalid PRIVATE_KEY: expected a 32-byte hex private key")
}

/// Create a wallet-filled provider (gas, nonce, chain id) for the endpoint
pub async fn create_provider(
    config: &ProviderConfig,
    signer: PrivateKeySigner,
) -> Result<DynProvider> {
    let wallet = EthereumWallet::from(signer);
    match config {
        ProviderConfig::Http(url) => {
            let rpc_url = url.parse().context("Invalid HTTP URL")?;
            let provider = ProviderBuilder::new().wallet(wallet).connect_http(rpc_url);
            Ok(provider.erased())
        }
        ProviderConfig::WebSocket(url) => {
            let provider = ProviderBuilder::new()
                .wallet(wallet)
                .connect(url)
                .await
                .context("Failed to create WebSocket provider")?;
            Ok(provider.erased())
        }
    }
}
