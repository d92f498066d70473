//! Ethereum infrastructure - Alloy provider, contract bindings and chain client

mod artifact;
mod calls;
mod client;
pub mod contracts;
mod provider;
pub mod revert;

pub use artifact::{Artifact, AIRDROP_CONTRACT, TOKEN_CONTRACT};
pub use calls::{AirdropCall, ContractCall, MintPool, TokenCall};
pub use client::{AlloyClient, ChainClient, Deployed, TokenInfo, TxOutcome};
pub use provider::{create_provider, parse_signer, ProviderConfig};
