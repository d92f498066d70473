//! Token holder/admin commands and airdrop administration

mod common;

use alloy::primitives::{Address, B256, U256};
use common::{signer, stranger, whole, FakeChain, Workspace, AIRDROP, TOKEN};
use memetv_ops::config::Network;
use memetv_ops::core::{Context, OpsError};
use memetv_ops::infrastructure::ethereum::{AirdropCall, ContractCall, MintPool, TokenCall};
use memetv_ops::modules::token::AllowanceChange;
use memetv_ops::modules::{airdrop, token};

#[tokio::test]
async fn test_claim_uses_local_proof() {
    let ws = Workspace::new();
    let root = ws.tree.root();
    let chain = FakeChain::owned(whole(0)).with(|s| s.merkle_root = root);
    let ctx = Context::new(&chain, Network::Localhost, &ws.config);

    token::claim(&ctx, None).await.unwrap();

    let entry = ws.tree.claim_for(signer()).unwrap();
    assert_eq!(
        chain.sent(),
        vec![ContractCall::Token(
            TOKEN,
            TokenCall::Claim {
                proof: entry.proof,
                index: U256::ZERO,
                amount: U256::from(500u64),
            }
        )]
    );
}

#[tokio::test]
async fn test_claim_rejected_against_stale_root() {
    let ws = Workspace::new();
    let chain = FakeChain::owned(whole(0)).with(|s| s.merkle_root = B256::repeat_byte(0xee));
    let ctx = Context::new(&chain, Network::Localhost, &ws.config);

    let err = token::claim(&ctx, None).await.unwrap_err();
    assert!(matches!(
        err.downcast_ref::<OpsError>(),
        Some(OpsError::ProofRejected { .. })
    ));
    assert!(chain.sent().is_empty());
}

#[tokio::test]
async fn test_approve_scales_to_base_units() {
    let ws = Workspace::new();
    let chain = FakeChain::owned(whole(0));
    let ctx = Context::new(&chain, Network::Localhost, &ws.config);

    token::change_allowance(&ctx, None, AllowanceChange::Approve, None, U256::from(1_000u64))
        .await
        .unwrap();
    assert_eq!(
        token::allowance(&ctx, None, None, None).await.unwrap(),
        whole(1_000)
    );
    assert_eq!(
        chain.sent(),
        vec![ContractCall::Token(
            TOKEN,
            TokenCall::Approve {
                spender: AIRDROP,
                amount: whole(1_000)
            }
        )]
    );
}

#[tokio::test]
async fn test_decrease_below_zero_rejected() {
    let ws = Workspace::new();
    let chain = FakeChain::owned(whole(3));
    let ctx = Context::new(&chain, Network::Localhost, &ws.config);

    assert!(token::change_allowance(
        &ctx,
        None,
        AllowanceChange::Decrease,
        None,
        U256::from(4u64)
    )
    .await
    .is_err());
    assert!(chain.sent().is_empty());
}

#[tokio::test]
async fn test_mint_and_distribute_are_owner_only() {
    let ws = Workspace::new();
    let chain = FakeChain::owned(whole(0)).with(|s| s.token_owner = stranger());
    let ctx = Context::new(&chain, Network::Localhost, &ws.config);
    let to = Address::repeat_byte(0x42);

    let err = token::mint(&ctx, None, MintPool::Marketing, to, U256::from(10u64))
        .await
        .unwrap_err();
    assert!(err.to_string().starts_with("Ownable: caller is not the owner"));
    assert!(token::distribute(&ctx, None, to, U256::from(10u64))
        .await
        .is_err());
    assert!(chain.sent().is_empty());
}

#[tokio::test]
async fn test_mint_sends_whole_tokens() {
    let ws = Workspace::new();
    let chain = FakeChain::owned(whole(0));
    let ctx = Context::new(&chain, Network::Localhost, &ws.config);
    let to = Address::repeat_byte(0x42);

    token::mint(&ctx, None, MintPool::ProofOfNothing, to, U256::from(10u64))
        .await
        .unwrap();
    assert_eq!(
        chain.sent(),
        vec![ContractCall::Token(
            TOKEN,
            TokenCall::Mint {
                pool: MintPool::ProofOfNothing,
                to,
                amount: U256::from(10u64)
            }
        )]
    );
}

#[tokio::test]
async fn test_token_status() {
    let ws = Workspace::new();
    let chain = FakeChain::owned(whole(12));
    let ctx = Context::new(&chain, Network::Localhost, &ws.config);

    let status = token::status(&ctx, None).await.unwrap();
    assert_eq!(status.address, TOKEN);
    assert_eq!(status.owner, signer());
    assert_eq!(status.signer_balance, whole(12));
    assert_eq!(status.info.team_supply, U256::from(100_000u64));
    assert_eq!(token::format_team_supply(&status.info).unwrap(), "100000.0");
}

#[tokio::test]
async fn test_pause_state_checked() {
    let ws = Workspace::new();
    let chain = FakeChain::owned(whole(0));
    let ctx = Context::new(&chain, Network::Localhost, &ws.config);

    let err = airdrop::unpause(&ctx, None).await.unwrap_err();
    assert!(matches!(err.downcast_ref::<OpsError>(), Some(OpsError::NotPaused)));

    airdrop::pause(&ctx, None).await.unwrap();
    assert!(airdrop::status(&ctx, None).await.unwrap().paused);

    let err = airdrop::pause(&ctx, None).await.unwrap_err();
    assert!(matches!(err.downcast_ref::<OpsError>(), Some(OpsError::Paused)));

    airdrop::unpause(&ctx, None).await.unwrap();
    assert_eq!(
        chain.sent(),
        vec![
            ContractCall::Airdrop(AIRDROP, AirdropCall::Pause),
            ContractCall::Airdrop(AIRDROP, AirdropCall::Unpause),
        ]
    );
}

#[tokio::test]
async fn test_recover_defaults() {
    let ws = Workspace::new();
    let chain = FakeChain::owned(whole(0));
    let ctx = Context::new(&chain, Network::Localhost, &ws.config);

    airdrop::recover(&ctx, None, None, None).await.unwrap();
    assert_eq!(
        chain.sent(),
        vec![ContractCall::Airdrop(
            AIRDROP,
            AirdropCall::RecoverTokens {
                token: TOKEN,
                to: signer()
            }
        )]
    );

    let chain = FakeChain::owned(whole(0)).with(|s| s.airdrop_owner = stranger());
    let ctx = Context::new(&chain, Network::Localhost, &ws.config);
    assert!(airdrop::recover(&ctx, None, None, None).await.is_err());
}

#[tokio::test]
async fn test_check_allowance() {
    let ws = Workspace::new();
    let chain = FakeChain::owned(whole(9));
    let ctx = Context::new(&chain, Network::Localhost, &ws.config);

    assert_eq!(airdrop::check_allowance(&ctx, None, None).await.unwrap(), whole(9));
    assert_eq!(
        airdrop::check_allowance(&ctx, None, Some(stranger()))
            .await
            .unwrap(),
        U256::ZERO
    );
}
