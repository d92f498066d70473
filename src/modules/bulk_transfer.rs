//! Validated bulk transfer through the airdrop contract

use std::path::Path;

use alloy::primitives::Address;
use anyhow::Result;
use tracing::info;

use crate::core::{ensure_owner, Context, OpsError};
use crate::domain::units::{format_token, to_base_units};
use crate::domain::{BulkTransferPlan, ValidatedPlan};
use crate::infrastructure::ethereum::{AirdropCall, ContractCall, TxOutcome};

#[derive(Debug, Clone, Copy, Default)]
pub struct Targets {
    pub airdrop: Option<Address>,
    pub token: Option<Address>,
}

pub async fn run(
    ctx: &Context<'_>,
    plan_path: &Path,
    targets: Targets,
) -> Result<Option<TxOutcome>> {
    let plan = BulkTransferPlan::load(plan_path)?;
    execute(ctx, &plan, targets).await
}

pub async fn execute(
    ctx: &Context<'_>,
    plan: &BulkTransferPlan,
    targets: Targets,
) -> Result<Option<TxOutcome>> {
    let airdrop = ctx.airdrop_address(targets.airdrop)?;
    let token = ctx.token_address(targets.token)?;
    let signer = ctx.signer();

    let owner = ctx.client.airdrop_owner(airdrop).await?;
    ensure_owner(owner, signer)?;

    let plan = plan.validate()?;
    info!(
        "{} recipients, {} tokens in total",
        plan.recipients.len(),
        plan.total
    );

    if ctx.client.paused(airdrop).await? {
        return Err(OpsError::Paused.into());
    }

    check_funds(ctx, token, airdrop, signer, &plan).await?;

    info!("Initiating bulk transfer...");
    let ValidatedPlan {
        recipients,
        amounts,
        ..
    } = plan;
    let outcome = super::submit(
        ctx,
        ContractCall::Airdrop(airdrop, AirdropCall::BulkTransfer { recipients, amounts }),
    )
    .await?;
    if outcome.is_some() {
        info!("Bulk transfer completed successfully.");
    }
    Ok(outcome)
}

/// The airdrop pulls `total * 10^18` from the signer with `transferFrom`
async fn check_funds(
    ctx: &Context<'_>,
    token: Address,
    airdrop: Address,
    signer: Address,
    plan: &ValidatedPlan,
) -> Result<()> {
    let required = to_base_units(plan.total)?;

    let allowance = ctx.client.allowance(token, signer, airdrop).await?;
    if allowance < required {
        return Err(OpsError::InsufficientAllowance {
            required: plan.total.to_string(),
            current: format_token(allowance),
        }
        .into());
    }

    let balance = ctx.client.balance_of(token, signer).await?;
    if balance < required {
        return Err(OpsError::InsufficientBalance {
            required: plan.total.to_string(),
            current: format_token(balance),
        }
        .into());
    }
    Ok(())
}
