//! Shared context passed to modules

use alloy::primitives::Address;
use anyhow::Result;

use super::OpsError;
use crate::config::{Config, Network};
use crate::infrastructure::ChainClient;
use crate::store::DeploymentRecord;

/// Everything an on-chain command needs for one invocation
pub struct Context<'a> {
    pub client: &'a dyn ChainClient,
    pub network: Network,
    pub config: &'a Config,
    /// Symbol used when logging native balances
    pub native_symbol: String,
    /// Run every check but send nothing
    pub dry_run: bool,
}

impl<'a> Context<'a> {
    pub fn new(client: &'a dyn ChainClient, network: Network, config: &'a Config) -> Self {
        Self {
            client,
            network,
            config,
            native_symbol: network.native_symbol().to_string(),
            dry_run: false,
        }
    }

    pub fn with_native_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.native_symbol = symbol.into();
        self
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn signer(&self) -> Address {
        self.client.signer()
    }

    pub fn deployment(&self) -> Result<DeploymentRecord> {
        DeploymentRecord::load(&self.config.deployments_dir, self.network)
    }

    /// Resolve the token address: explicit override, else the deployment record
    pub fn token_address(&self, explicit: Option<Address>) -> Result<Address> {
        match explicit {
            Some(address) => Ok(address),
            None => Ok(self.deployment()?.token),
        }
    }

    pub fn airdrop_address(&self, explicit: Option<Address>) -> Result<Address> {
        match explicit {
            Some(address) => Ok(address),
            None => Ok(self.deployment()?.airdrop),
        }
    }
}

/// Owner-only entry points are checked before anything is sent
pub fn ensure_owner(owner: Address, signer: Address) -> Result<(), OpsError> {
    if owner != signer {
        return Err(OpsError::NotOwner { owner, signer });
    }
    Ok(())
}
