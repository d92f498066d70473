//! Chain access used by the operations
//!
//! `ChainClient` is the seam between orchestration and RPC: everything the
//! commands read or send goes through it, so the command flows can be driven
//! by an in-memory fake in tests.

use std::time::Duration;

use alloy::network::{ReceiptResponse, TransactionBuilder};
use alloy::primitives::{Address, Bytes, B256, U256};
use alloy::providers::{DynProvider, Provider};
use alloy::rpc::types::{TransactionReceipt, TransactionRequest};
use alloy::transports::TransportError;
use anyhow::{anyhow, Context, Result};
use tracing::{debug, info};

use super::calls::ContractCall;
use super::contracts::{IAirdrop, ITheMemeTV};
use super::provider::{create_provider, parse_signer, ProviderConfig};
use super::revert::{contract_revert_reason, transport_revert_reason};
use crate::config::ChainSettings;
use crate::core::OpsError;

/// A mined transaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxOutcome {
    pub tx_hash: B256,
    pub block_number: Option<u64>,
    pub gas_used: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deployed {
    pub address: Address,
    pub outcome: TxOutcome,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenInfo {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
    pub total_supply: U256,
    pub team_supply: U256,
}

#[async_trait::async_trait]
pub trait ChainClient: Send + Sync {
    /// Address transactions are signed with
    fn signer(&self) -> Address;

    fn endpoint_name(&self) -> String;

    async fn chain_id(&self) -> Result<u64>;

    async fn native_balance(&self, account: Address) -> Result<U256>;

    /// Send creation code, wait `delay`, then wait for the receipt
    async fn deploy(&self, code: Bytes, delay: Duration) -> Result<Deployed>;

    // === Token reads ===

    async fn token_info(&self, token: Address) -> Result<TokenInfo>;

    async fn token_owner(&self, token: Address) -> Result<Address>;

    async fn merkle_root(&self, token: Address) -> Result<B256>;

    async fn last_updated_day(&self, token: Address) -> Result<u64>;

    async fn balance_of(&self, token: Address, account: Address) -> Result<U256>;

    async fn allowance(&self, token: Address, owner: Address, spender: Address) -> Result<U256>;

    // === Airdrop reads ===

    async fn airdrop_owner(&self, airdrop: Address) -> Result<Address>;

    async fn airdrop_token(&self, airdrop: Address) -> Result<Address>;

    async fn paused(&self, airdrop: Address) -> Result<bool>;

    async fn check_allowance(&self, airdrop: Address, owner: Address) -> Result<U256>;

    /// Submit a write and wait for it to be mined
    async fn send(&self, call: &ContractCall) -> Result<TxOutcome>;
}

/// `ChainClient` over an alloy wallet provider
pub struct AlloyClient {
    provider: DynProvider,
    signer: Address,
    endpoint: String,
}

impl AlloyClient {
    /// Connect with the configured key and check the endpoint serves the expected chain
    pub async fn connect(settings: &ChainSettings) -> Result<Self> {
        let signer = parse_signer(settings.private_key())?;
        let address = signer.address();
        let config = ProviderConfig::from_url(&settings.rpc_url);
        let provider = create_provider(&config, signer).await?;

        let client = Self {
            provider,
            signer: address,
            endpoint: config.display(),
        };

        let actual = client.chain_id().await?;
        debug!(endpoint = %client.endpoint, chain_id = actual, "connected");
        if let Some(expected) = settings.network.chain_id() {
            if actual != expected {
                return Err(OpsError::ChainIdMismatch {
                    network: settings.network.to_string(),
                    expected,
                    actual,
                }
                .into());
            }
        }

        Ok(client)
    }

    fn token(&self, address: Address) -> ITheMemeTV::ITheMemeTVInstance<DynProvider> {
        ITheMemeTV::new(address, self.provider.clone())
    }

    fn airdrop(&self, address: Address) -> IAirdrop::IAirdropInstance<DynProvider> {
        IAirdrop::new(address, self.provider.clone())
    }
}

fn call_failed(what: &str, err: alloy::contract::Error) -> anyhow::Error {
    let context = format!("{} failed", what);
    match contract_revert_reason(&err) {
        Some(reason) => anyhow::Error::new(OpsError::Reverted(reason)).context(context),
        None => anyhow::Error::new(err).context(context),
    }
}

fn send_failed(what: &str, err: TransportError) -> anyhow::Error {
    let context = format!("Sending {} failed", what);
    match transport_revert_reason(&err) {
        Some(reason) => anyhow::Error::new(OpsError::Reverted(reason)).context(context),
        None => anyhow::Error::new(err).context(context),
    }
}

fn outcome(receipt: &TransactionReceipt, what: &str) -> Result<TxOutcome> {
    if !receipt.status() {
        return Err(OpsError::Reverted(format!(
            "{} reverted in transaction {}",
            what, receipt.transaction_hash
        ))
        .into());
    }
    Ok(TxOutcome {
        tx_hash: receipt.transaction_hash,
        block_number: receipt.block_number,
        gas_used: receipt.gas_used,
    })
}

#[async_trait::async_trait]
impl ChainClient for AlloyClient {
    fn signer(&self) -> Address {
        self.signer
    }

    fn endpoint_name(&self) -> String {
        self.endpoint.clone()
    }

    async fn chain_id(&self) -> Result<u64> {
        self.provider
            .get_chain_id()
            .await
            .context("Failed to fetch chain id. Verify the RPC URL.")
    }

    async fn native_balance(&self, account: Address) -> Result<U256> {
        self.provider
            .get_balance(account)
            .await
            .with_context(|| format!("Failed to fetch balance of {}", account))
    }

    async fn deploy(&self, code: Bytes, delay: Duration) -> Result<Deployed> {
        let tx = TransactionRequest::default()
            .with_from(self.signer)
            .with_deploy_code(code);
        let pending = self
            .provider
            .send_transaction(tx)
            .await
            .map_err(|e| send_failed("deployment", e))?;
        let tx_hash = *pending.tx_hash();
        info!(%tx_hash, "Deployment sent. Waiting for confirmation...");

        tokio::time::sleep(delay).await;

        let receipt = pending
            .get_receipt()
            .await
            .with_context(|| format!("Failed waiting for deployment {}", tx_hash))?;
        let outcome = outcome(&receipt, "deployment")?;
        let address = receipt
            .contract_address
            .ok_or_else(|| anyhow!("Deployment receipt {} has no contract address", tx_hash))?;

        Ok(Deployed { address, outcome })
    }

    async fn token_info(&self, token: Address) -> Result<TokenInfo> {
        let contract = self.token(token);
        let name = contract.name().call().await.map_err(|e| call_failed("name()", e))?;
        let symbol = contract
            .symbol()
            .call()
            .await
            .map_err(|e| call_failed("symbol()", e))?;
        let decimals = contract
            .decimals()
            .call()
            .await
            .map_err(|e| call_failed("decimals()", e))?;
        let total_supply = contract
            .totalSupply()
            .call()
            .await
            .map_err(|e| call_failed("totalSupply()", e))?;
        let team_supply = contract
            .TEAM_SUPPLY()
            .call()
            .await
            .map_err(|e| call_failed("TEAM_SUPPLY()", e))?;

        Ok(TokenInfo {
            name,
            symbol,
            decimals,
            total_supply,
            team_supply,
        })
    }

    async fn token_owner(&self, token: Address) -> Result<Address> {
        self.token(token)
            .owner()
            .call()
            .await
            .map_err(|e| call_failed("owner()", e))
    }

    async fn merkle_root(&self, token: Address) -> Result<B256> {
        self.token(token)
            .merkleRoot()
            .call()
            .await
            .map_err(|e| call_failed("merkleRoot()", e))
    }

    async fn last_updated_day(&self, token: Address) -> Result<u64> {
        let day = self
            .token(token)
            .lastUpdatedDay()
            .call()
            .await
            .map_err(|e| call_failed("lastUpdatedDay()", e))?;
        Ok(day.saturating_to::<u64>())
    }

    async fn balance_of(&self, token: Address, account: Address) -> Result<U256> {
        self.token(token)
            .balanceOf(account)
            .call()
            .await
            .map_err(|e| call_failed("balanceOf()", e))
    }

    async fn allowance(&self, token: Address, owner: Address, spender: Address) -> Result<U256> {
        self.token(token)
            .allowance(owner, spender)
            .call()
            .await
            .map_err(|e| call_failed("allowance()", e))
    }

    async fn airdrop_owner(&self, airdrop: Address) -> Result<Address> {
        self.airdrop(airdrop)
            .owner()
            .call()
            .await
            .map_err(|e| call_failed("owner()", e))
    }

    async fn airdrop_token(&self, airdrop: Address) -> Result<Address> {
        self.airdrop(airdrop)
            .token()
            .call()
            .await
            .map_err(|e| call_failed("token()", e))
    }

    async fn paused(&self, airdrop: Address) -> Result<bool> {
        self.airdrop(airdrop)
            .paused()
            .call()
            .await
            .map_err(|e| call_failed("paused()", e))
    }

    async fn check_allowance(&self, airdrop: Address, owner: Address) -> Result<U256> {
        self.airdrop(airdrop)
            .checkAllowance(owner)
            .call()
            .await
            .map_err(|e| call_failed("checkAllowance()", e))
    }

    async fn send(&self, call: &ContractCall) -> Result<TxOutcome> {
        let tx = TransactionRequest::default()
            .with_from(self.signer)
            .with_to(call.target())
            .with_input(call.calldata());
        let what = call.to_string();

        let pending = self
            .provider
            .send_transaction(tx)
            .await
            .map_err(|e| send_failed(&what, e))?;
        info!(tx_hash = %pending.tx_hash(), "Transaction sent. Waiting for confirmation...");

        let receipt = pending
            .get_receipt()
            .await
            .with_context(|| format!("Failed waiting for {}", what))?;
        outcome(&receipt, call.function_name())
    }
}
