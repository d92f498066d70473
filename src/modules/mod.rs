//! Command implementations
//!
//! Each module is one operator workflow. On-chain flows take a
//! [`Context`](crate::core::Context), run every precondition check first, and
//! only then submit transactions through the `ChainClient`.

pub mod airdrop;
pub mod bulk_transfer;
pub mod deploy;
pub mod merkle_root;
pub mod token;
pub mod tree;

use anyhow::Result;
use tracing::info;

use crate::core::Context;
use crate::infrastructure::ethereum::{ContractCall, TxOutcome};

/// Send a write unless this is a dry run
pub(crate) async fn submit(ctx: &Context<'_>, call: ContractCall) -> Result<Option<TxOutcome>> {
    if ctx.dry_run {
        info!("Dry run: checks passed, not sending {}", call);
        return Ok(None);
    }
    info!("Sending {}", call);
    let outcome = ctx.client.send(&call).await?;
    log_outcome(&outcome);
    Ok(Some(outcome))
}

pub(crate) fn log_outcome(outcome: &TxOutcome) {
    info!(
        block = ?outcome.block_number,
        gas_used = outcome.gas_used,
        "Transaction Hash: {}",
        outcome.tx_hash
    );
}
