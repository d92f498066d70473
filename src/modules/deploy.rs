//! Deploy the token and the airdrop distributor, then record their addresses

use std::time::Duration;

use alloy_dyn_abi::DynSolValue;
use anyhow::{Context as _, Result};
use tracing::info;

use crate::core::Context;
use crate::domain::units::{format_units, TOKEN_DECIMALS};
use crate::domain::StandardMerkleTree;
use crate::infrastructure::ethereum::{Artifact, AIRDROP_CONTRACT, TOKEN_CONTRACT};
use crate::store::DeploymentRecord;

pub async fn run(ctx: &Context<'_>) -> Result<Option<DeploymentRecord>> {
    let deployer = ctx.signer();
    info!("Deploying contracts with the account: {}", deployer);
    let balance = ctx.client.native_balance(deployer).await?;
    info!(
        "Deployer Balance: {} {}",
        format_units(balance, TOKEN_DECIMALS),
        ctx.native_symbol
    );

    let tree = StandardMerkleTree::load_file(&ctx.config.tree_path)
        .context("Merkle root is missing in the tree JSON")?;
    let merkle_root = tree.root();
    info!("Merkle root: {}", merkle_root);

    let token_artifact = Artifact::find(&ctx.config.artifacts_dir, TOKEN_CONTRACT)?;
    let airdrop_artifact = Artifact::find(&ctx.config.artifacts_dir, AIRDROP_CONTRACT)?;
    let token_code = token_artifact.deploy_code(&[DynSolValue::FixedBytes(merkle_root, 32)])?;

    if ctx.dry_run {
        info!(
            token = %token_artifact.source.display(),
            airdrop = %airdrop_artifact.source.display(),
            "Dry run: artifacts and tree are valid, nothing deployed"
        );
        return Ok(None);
    }

    let delay = Duration::from_millis(ctx.config.deploy_delay_ms);

    let token = ctx.client.deploy(token_code, delay).await?;
    info!("TMTV contract address: {}", token.address);

    let airdrop_code = airdrop_artifact.deploy_code(&[DynSolValue::Address(token.address)])?;
    let airdrop = ctx.client.deploy(airdrop_code, delay).await?;
    info!("Airdrop contract address: {}", airdrop.address);

    let record = DeploymentRecord::new(ctx.network, token.address, airdrop.address, merkle_root);
    let path = record.save(&ctx.config.deployments_dir)?;
    info!("Deployment written to {}", path.display());

    Ok(Some(record))
}
