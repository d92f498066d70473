//! Token administration and holder operations

use alloy::primitives::{Address, B256, U256};
use alloy_dyn_abi::DynSolValue;
use anyhow::{bail, Result};
use tracing::info;

use crate::core::{ensure_owner, Context, OpsError};
use crate::domain::merkle::{leaf_hash, verify};
use crate::domain::units::{format_token, format_units, to_base_units};
use crate::domain::StandardMerkleTree;
use crate::infrastructure::ethereum::{ContractCall, MintPool, TokenCall, TokenInfo, TxOutcome};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenStatus {
    pub address: Address,
    pub info: TokenInfo,
    pub owner: Address,
    pub merkle_root: B256,
    pub last_updated_day: u64,
    pub signer_balance: U256,
}

/// `TEAM_SUPPLY` is a whole-token count; render it in the same units as the total supply
pub fn format_team_supply(info: &TokenInfo) -> Result<String, OpsError> {
    Ok(format_units(to_base_units(info.team_supply)?, info.decimals))
}

pub async fn status(ctx: &Context<'_>, token: Option<Address>) -> Result<TokenStatus> {
    let address = ctx.token_address(token)?;
    let info = ctx.client.token_info(address).await?;
    let owner = ctx.client.token_owner(address).await?;
    let merkle_root = ctx.client.merkle_root(address).await?;
    let last_updated_day = ctx.client.last_updated_day(address).await?;
    let signer_balance = ctx.client.balance_of(address, ctx.signer()).await?;

    info!("{} ({}) at {}", info.name, info.symbol, address);
    info!(
        "Total supply: {} (team supply {})",
        format_units(info.total_supply, info.decimals),
        format_team_supply(&info)?
    );
    info!("Owner: {}", owner);
    info!("Merkle root: {} (last updated on day {})", merkle_root, last_updated_day);
    info!(
        "Balance of {}: {}",
        ctx.signer(),
        format_units(signer_balance, info.decimals)
    );

    Ok(TokenStatus {
        address,
        info,
        owner,
        merkle_root,
        last_updated_day,
        signer_balance,
    })
}

/// Balance in base units; defaults to the signer
pub async fn balance(
    ctx: &Context<'_>,
    token: Option<Address>,
    account: Option<Address>,
) -> Result<U256> {
    let token = ctx.token_address(token)?;
    let account = account.unwrap_or_else(|| ctx.signer());
    let balance = ctx.client.balance_of(token, account).await?;
    info!("Balance of {}: {}", account, format_token(balance));
    Ok(balance)
}

/// Allowance in base units; owner defaults to the signer, spender to the airdrop
pub async fn allowance(
    ctx: &Context<'_>,
    token: Option<Address>,
    owner: Option<Address>,
    spender: Option<Address>,
) -> Result<U256> {
    let token = ctx.token_address(token)?;
    let owner = owner.unwrap_or_else(|| ctx.signer());
    let spender = ctx.airdrop_address(spender)?;
    let allowance = ctx.client.allowance(token, owner, spender).await?;
    info!(
        "Allowance of {} for {}: {}",
        owner,
        spender,
        format_token(allowance)
    );
    Ok(allowance)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AllowanceChange {
    Approve,
    Increase,
    Decrease,
}

/// Set or adjust the signer's allowance by a whole-token amount
pub async fn change_allowance(
    ctx: &Context<'_>,
    token: Option<Address>,
    change: AllowanceChange,
    spender: Option<Address>,
    whole_tokens: U256,
) -> Result<Option<TxOutcome>> {
    let token = ctx.token_address(token)?;
    let spender = ctx.airdrop_address(spender)?;
    let amount = to_base_units(whole_tokens)?;

    let call = match change {
        AllowanceChange::Approve => TokenCall::Approve { spender, amount },
        AllowanceChange::Increase => TokenCall::IncreaseAllowance { spender, amount },
        AllowanceChange::Decrease => {
            let current = ctx.client.allowance(token, ctx.signer(), spender).await?;
            if current < amount {
                bail!(
                    "Cannot decrease allowance of {} by {} tokens: current allowance is {}",
                    spender,
                    whole_tokens,
                    format_token(current)
                );
            }
            TokenCall::DecreaseAllowance { spender, amount }
        }
    };

    super::submit(ctx, ContractCall::Token(token, call)).await
}

/// Owner-only: move `supply` whole tokens to the distribution wallet
pub async fn distribute(
    ctx: &Context<'_>,
    token: Option<Address>,
    wallet: Address,
    supply: U256,
) -> Result<Option<TxOutcome>> {
    let token = ctx.token_address(token)?;
    let owner = ctx.client.token_owner(token).await?;
    ensure_owner(owner, ctx.signer())?;

    info!("Distributing {} tokens to {}", supply, wallet);
    super::submit(
        ctx,
        ContractCall::Token(token, TokenCall::DistributeTokens { wallet, amount: supply }),
    )
    .await
}

/// Owner-only: mint whole tokens from one of the capped pools
pub async fn mint(
    ctx: &Context<'_>,
    token: Option<Address>,
    pool: MintPool,
    to: Address,
    amount: U256,
) -> Result<Option<TxOutcome>> {
    let token = ctx.token_address(token)?;
    let owner = ctx.client.token_owner(token).await?;
    ensure_owner(owner, ctx.signer())?;

    info!("{}: {} tokens to {}", pool.function_name(), amount, to);
    super::submit(ctx, ContractCall::Token(token, TokenCall::Mint { pool, to, amount })).await
}

/// Claim the signer's allocation using the local tree, checked against the on-chain root
pub async fn claim(ctx: &Context<'_>, token: Option<Address>) -> Result<Option<TxOutcome>> {
    let token = ctx.token_address(token)?;
    let account = ctx.signer();

    let tree = StandardMerkleTree::load_file(&ctx.config.tree_path)?;
    let entry = tree.claim_for(account)?;

    let root = ctx.client.merkle_root(token).await?;
    let leaf = leaf_hash(&[
        DynSolValue::Address(entry.account),
        DynSolValue::Uint(entry.index, 256),
        DynSolValue::Uint(entry.amount, 256),
    ]);
    if !verify(root, leaf, &entry.proof) {
        return Err(OpsError::ProofRejected { account, root }.into());
    }

    info!(
        "Claiming {} tokens for {} (index {})",
        entry.amount, account, entry.index
    );
    super::submit(
        ctx,
        ContractCall::Token(
            token,
            TokenCall::Claim {
                proof: entry.proof,
                index: entry.index,
                amount: entry.amount,
            },
        ),
    )
    .await
}
