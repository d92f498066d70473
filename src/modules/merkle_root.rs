//! Daily Merkle root rotation on the token

use alloy::primitives::Address;
use anyhow::Result;
use tracing::{debug, info};

use crate::core::{ensure_owner, Context};
use crate::domain::schedule::{check_root_update, current_day};
use crate::domain::StandardMerkleTree;
use crate::infrastructure::ethereum::{ContractCall, TokenCall, TxOutcome};

pub async fn run(ctx: &Context<'_>, token: Option<Address>) -> Result<Option<TxOutcome>> {
    run_on_day(ctx, token, current_day()).await
}

/// Same as [`run`] with an explicit UTC day number
pub async fn run_on_day(
    ctx: &Context<'_>,
    token: Option<Address>,
    today: u64,
) -> Result<Option<TxOutcome>> {
    let token = ctx.token_address(token)?;
    let tree = StandardMerkleTree::load_file(&ctx.config.tree_path)?;
    let new_root = tree.root();

    let owner = ctx.client.token_owner(token).await?;
    ensure_owner(owner, ctx.signer())?;

    let current_root = ctx.client.merkle_root(token).await?;
    let last_updated_day = ctx.client.last_updated_day(token).await?;
    debug!(%current_root, last_updated_day, today, "on-chain root state");

    check_root_update(current_root, new_root, last_updated_day, today)?;

    info!("Updating Merkle Root to: {}", new_root);
    let outcome = super::submit(
        ctx,
        ContractCall::Token(token, TokenCall::UpdateMerkleRoot { root: new_root }),
    )
    .await?;
    if outcome.is_some() {
        info!("Merkle Root updated successfully!");
    }
    Ok(outcome)
}
