//! Airdrop distributor administration

use alloy::primitives::{Address, U256};
use anyhow::Result;
use tracing::info;

use crate::core::{ensure_owner, Context, OpsError};
use crate::domain::units::format_token;
use crate::infrastructure::ethereum::{AirdropCall, ContractCall, TxOutcome};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AirdropStatus {
    pub address: Address,
    pub owner: Address,
    pub token: Address,
    pub paused: bool,
}

pub async fn status(ctx: &Context<'_>, airdrop: Option<Address>) -> Result<AirdropStatus> {
    let address = ctx.airdrop_address(airdrop)?;
    let owner = ctx.client.airdrop_owner(address).await?;
    let token = ctx.client.airdrop_token(address).await?;
    let paused = ctx.client.paused(address).await?;

    info!("Airdrop at {}", address);
    info!("Owner: {}", owner);
    info!("Token: {}", token);
    info!("Paused: {}", paused);

    Ok(AirdropStatus {
        address,
        owner,
        token,
        paused,
    })
}

pub async fn pause(ctx: &Context<'_>, airdrop: Option<Address>) -> Result<Option<TxOutcome>> {
    let airdrop = owned_airdrop(ctx, airdrop).await?;
    if ctx.client.paused(airdrop).await? {
        return Err(OpsError::Paused.into());
    }
    super::submit(ctx, ContractCall::Airdrop(airdrop, AirdropCall::Pause)).await
}

pub async fn unpause(ctx: &Context<'_>, airdrop: Option<Address>) -> Result<Option<TxOutcome>> {
    let airdrop = owned_airdrop(ctx, airdrop).await?;
    if !ctx.client.paused(airdrop).await? {
        return Err(OpsError::NotPaused.into());
    }
    super::submit(ctx, ContractCall::Airdrop(airdrop, AirdropCall::Unpause)).await
}

/// Allowance `owner` (default: signer) granted to the airdrop, in base units
pub async fn check_allowance(
    ctx: &Context<'_>,
    airdrop: Option<Address>,
    owner: Option<Address>,
) -> Result<U256> {
    let airdrop = ctx.airdrop_address(airdrop)?;
    let owner = owner.unwrap_or_else(|| ctx.signer());
    let allowance = ctx.client.check_allowance(airdrop, owner).await?;
    info!("Allowance of {} for the airdrop: {}", owner, format_token(allowance));
    Ok(allowance)
}

/// Owner-only: sweep the airdrop's balance of `token` (default: the MemeTV token) to `to`
pub async fn recover(
    ctx: &Context<'_>,
    airdrop: Option<Address>,
    token: Option<Address>,
    to: Option<Address>,
) -> Result<Option<TxOutcome>> {
    let airdrop = owned_airdrop(ctx, airdrop).await?;
    let token = ctx.token_address(token)?;
    let to = to.unwrap_or_else(|| ctx.signer());

    info!("Recovering {} held by the airdrop to {}", token, to);
    super::submit(
        ctx,
        ContractCall::Airdrop(airdrop, AirdropCall::RecoverTokens { token, to }),
    )
    .await
}

async fn owned_airdrop(ctx: &Context<'_>, airdrop: Option<Address>) -> Result<Address> {
    let airdrop = ctx.airdrop_address(airdrop)?;
    let owner = ctx.client.airdrop_owner(airdrop).await?;
    ensure_owner(owner, ctx.signer())?;
    Ok(airdrop)
}
