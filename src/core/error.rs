//! Typed failures raised before or while talking to the contracts

use alloy::primitives::{Address, B256};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OpsError {
    #[error("{0} not found in environment variables. Please set {0} in your .env file.")]
    MissingEnv(&'static str),

    #[error("Invalid or unsupported network provided: '{0}'. Check the NETWORK variable in your .env file.")]
    InvalidNetwork(String),

    #[error("RPC endpoint for {network} reports chain id {actual}, expected {expected}")]
    ChainIdMismatch {
        network: String,
        expected: u64,
        actual: u64,
    },

    #[error("Ownable: caller is not the owner (owner {owner}, signer {signer})")]
    NotOwner { owner: Address, signer: Address },

    #[error("Recipients and amounts array length mismatch ({recipients} recipients, {amounts} amounts). Ensure both arrays have the same number of entries.")]
    LengthMismatch { recipients: usize, amounts: usize },

    #[error("Recipients array is empty. Provide at least one recipient address.")]
    EmptyRecipients,

    #[error("Invalid recipient address detected: '{0}'. Check that all addresses are valid Ethereum addresses.")]
    InvalidRecipient(String),

    #[error("Duplicate recipient address detected: {0}. Ensure all addresses in the recipients array are unique.")]
    DuplicateRecipient(Address),

    #[error("Amount for recipient {0} is zero")]
    ZeroAmount(Address),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Amount overflows uint256")]
    AmountOverflow,

    #[error("Insufficient allowance. Approve at least {required} tokens to the contract address. Current allowance: {current}.")]
    InsufficientAllowance { required: String, current: String },

    #[error("Insufficient token balance. Required: {required}, current balance: {current}.")]
    InsufficientBalance { required: String, current: String },

    #[error("Merkle root can only be updated once per day (last updated on day {last_updated_day}, today is day {today}). Wait until the next day to update.")]
    RootUpdatedToday { last_updated_day: u64, today: u64 },

    #[error("The new Merkle root {0} is the same as the current one. Provide a different root.")]
    RootUnchanged(B256),

    #[error("Invalid Merkle tree: {0}")]
    InvalidTree(String),

    #[error("No claim entry for {0} in the Merkle tree")]
    ClaimNotFound(Address),

    #[error("Proof for {account} does not match the on-chain Merkle root {root}")]
    ProofRejected { account: Address, root: B256 },

    #[error("Deployment record for {network} not found at {path}. Run the deploy command first.")]
    MissingDeployment { network: String, path: String },

    #[error("Airdrop contract is paused")]
    Paused,

    #[error("Airdrop contract is not paused")]
    NotPaused,

    #[error("Smart contract error: {0}")]
    Reverted(String),
}
