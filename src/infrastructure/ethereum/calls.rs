//! State-changing contract calls, encoded once and sent through one path

use std::fmt;

use alloy::primitives::{Address, Bytes, B256, U256};
use alloy::sol_types::SolCall;

use super::contracts::{IAirdrop, ITheMemeTV};

/// Token mint pools, each capped by the contract
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum MintPool {
    Liquidity,
    Marketing,
    Airdrop,
    ProofOfNothing,
}

impl MintPool {
    pub fn function_name(&self) -> &'static str {
        match self {
            MintPool::Liquidity => "mintLiquidity",
            MintPool::Marketing => "mintMarketing",
            MintPool::Airdrop => "mintAirdrop",
            MintPool::ProofOfNothing => "mintProofOfNothing",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenCall {
    UpdateMerkleRoot { root: B256 },
    DistributeTokens { wallet: Address, amount: U256 },
    Mint { pool: MintPool, to: Address, amount: U256 },
    Claim { proof: Vec<B256>, index: U256, amount: U256 },
    Approve { spender: Address, amount: U256 },
    IncreaseAllowance { spender: Address, amount: U256 },
    DecreaseAllowance { spender: Address, amount: U256 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AirdropCall {
    Pause,
    Unpause,
    BulkTransfer { recipients: Vec<Address>, amounts: Vec<U256> },
    RecoverTokens { token: Address, to: Address },
}

/// A write addressed to a deployed contract
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContractCall {
    Token(Address, TokenCall),
    Airdrop(Address, AirdropCall),
}

impl TokenCall {
    pub fn calldata(&self) -> Bytes {
        let encoded = match self.clone() {
            TokenCall::UpdateMerkleRoot { root } => {
                ITheMemeTV::updateMerkleRootCall { newMerkleRoot: root }.abi_encode()
            }
            TokenCall::DistributeTokens { wallet, amount } => ITheMemeTV::distributeTokensCall {
                distributionWallet: wallet,
                supply: amount,
            }
            .abi_encode(),
            TokenCall::Mint { pool, to, amount } => match pool {
                MintPool::Liquidity => ITheMemeTV::mintLiquidityCall { to, amount }.abi_encode(),
                MintPool::Marketing => ITheMemeTV::mintMarketingCall { to, amount }.abi_encode(),
                MintPool::Airdrop => ITheMemeTV::mintAirdropCall { to, amount }.abi_encode(),
                MintPool::ProofOfNothing => {
                    ITheMemeTV::mintProofOfNothingCall { to, amount }.abi_encode()
                }
            },
            TokenCall::Claim {
                proof,
                index,
                amount,
            } => ITheMemeTV::claimDistributionAirDropCall {
                proof,
                index,
                amount,
            }
            .abi_encode(),
            TokenCall::Approve { spender, amount } => {
                ITheMemeTV::approveCall { spender, amount }.abi_encode()
            }
            TokenCall::IncreaseAllowance { spender, amount } => ITheMemeTV::increaseAllowanceCall {
                spender,
                addedValue: amount,
            }
            .abi_encode(),
            TokenCall::DecreaseAllowance { spender, amount } => ITheMemeTV::decreaseAllowanceCall {
                spender,
                subtractedValue: amount,
            }
            .abi_encode(),
        };
        encoded.into()
    }

    pub fn function_name(&self) -> &'static str {
        match self {
            TokenCall::UpdateMerkleRoot { .. } => "updateMerkleRoot",
            TokenCall::DistributeTokens { .. } => "distributeTokens",
            TokenCall::Mint { pool, .. } => pool.function_name(),
            TokenCall::Claim { .. } => "claimDistributionAirDrop",
            TokenCall::Approve { .. } => "approve",
            TokenCall::IncreaseAllowance { .. } => "increaseAllowance",
            TokenCall::DecreaseAllowance { .. } => "decreaseAllowance",
        }
    }
}

impl AirdropCall {
    pub fn calldata(&self) -> Bytes {
        let encoded = match self.clone() {
            AirdropCall::Pause => IAirdrop::pauseCall {}.abi_encode(),
            AirdropCall::Unpause => IAirdrop::unpauseCall {}.abi_encode(),
            AirdropCall::BulkTransfer {
                recipients,
                amounts,
            } => IAirdrop::bulkTransferCall {
                recipients,
                amounts,
            }
            .abi_encode(),
            AirdropCall::RecoverTokens { token, to } => IAirdrop::recoverTokensCall {
                tokenAddress: token,
                to,
            }
            .abi_encode(),
        };
        encoded.into()
    }

    pub fn function_name(&self) -> &'static str {
        match self {
            AirdropCall::Pause => "pause",
            AirdropCall::Unpause => "unpause",
            AirdropCall::BulkTransfer { .. } => "bulkTransfer",
            AirdropCall::RecoverTokens { .. } => "recoverTokens",
        }
    }
}

impl ContractCall {
    pub fn target(&self) -> Address {
        match self {
            ContractCall::Token(address, _) | ContractCall::Airdrop(address, _) => *address,
        }
    }

    pub fn calldata(&self) -> Bytes {
        match self {
            ContractCall::Token(_, call) => call.calldata(),
            ContractCall::Airdrop(_, call) => call.calldata(),
        }
    }

    pub fn function_name(&self) -> &'static str {
        match self {
            ContractCall::Token(_, call) => call.function_name(),
            ContractCall::Airdrop(_, call) => call.function_name(),
        }
    }
}

impl fmt::Display for ContractCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} on {}", self.function_name(), self.target())
    }
}
