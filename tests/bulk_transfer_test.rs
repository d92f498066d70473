//! Bulk transfer preconditions and the call that reaches the airdrop

mod common;

use alloy::primitives::{Address, U256};
use common::{signer, stranger, whole, FakeChain, Workspace, AIRDROP};
use memetv_ops::config::Network;
use memetv_ops::core::{Context, OpsError};
use memetv_ops::domain::BulkTransferPlan;
use memetv_ops::infrastructure::ethereum::{AirdropCall, ContractCall};
use memetv_ops::modules::bulk_transfer::{self, Targets};

const ALICE: &str = "0x3C44CdDdB6a900fa2b585dd299e03d12FA4293BC";
const BOB: &str = "0x90F79bf6EB2c4f870365E785982E1f101E93b906";

fn plan(json: &str) -> BulkTransferPlan {
    BulkTransferPlan::from_json(json).unwrap()
}

fn two_recipients() -> BulkTransferPlan {
    plan(&format!(
        r#"{{"recipients": ["{}", "{}"], "amounts": [10, "20"]}}"#,
        ALICE, BOB
    ))
}

fn ops_error(err: &anyhow::Error) -> &OpsError {
    err.downcast_ref::<OpsError>()
        .unwrap_or_else(|| panic!("expected OpsError, got {:#}", err))
}

#[tokio::test]
async fn test_sends_whole_token_amounts() {
    let ws = Workspace::new();
    let chain = FakeChain::owned(whole(1_000));
    let ctx = Context::new(&chain, Network::Localhost, &ws.config);

    let outcome = bulk_transfer::execute(&ctx, &two_recipients(), Targets::default())
        .await
        .unwrap();
    assert!(outcome.is_some());

    let alice: Address = ALICE.parse().unwrap();
    let bob: Address = BOB.parse().unwrap();
    assert_eq!(
        chain.sent(),
        vec![ContractCall::Airdrop(
            AIRDROP,
            AirdropCall::BulkTransfer {
                recipients: vec![alice, bob],
                amounts: vec![U256::from(10u64), U256::from(20u64)],
            }
        )]
    );
}

#[tokio::test]
async fn test_reads_plan_file() {
    let ws = Workspace::new();
    let path = ws.write(
        "ignition/modules/airdropAddresses&Amounts.json",
        &format!(r#"{{"recipients": ["{}"], "amounts": [7]}}"#, ALICE),
    );
    let chain = FakeChain::owned(whole(7));
    let ctx = Context::new(&chain, Network::Localhost, &ws.config);

    bulk_transfer::run(&ctx, &path, Targets::default())
        .await
        .unwrap();
    assert_eq!(chain.sent().len(), 1);
}

#[tokio::test]
async fn test_owner_checked_first() {
    let ws = Workspace::new();
    let chain = FakeChain::owned(whole(1_000)).with(|s| s.airdrop_owner = stranger());
    let ctx = Context::new(&chain, Network::Localhost, &ws.config);

    // An invalid plan still reports the ownership problem
    let bad = plan(&format!(r#"{{"recipients": ["{}"], "amounts": []}}"#, ALICE));
    let err = bulk_transfer::execute(&ctx, &bad, Targets::default())
        .await
        .unwrap_err();
    assert!(matches!(ops_error(&err), OpsError::NotOwner { .. }));
    assert!(err.to_string().starts_with("Ownable: caller is not the owner"));
    assert!(chain.sent().is_empty());
}

#[tokio::test]
async fn test_invalid_plans_never_reach_chain() {
    let ws = Workspace::new();
    let chain = FakeChain::owned(whole(1_000));
    let ctx = Context::new(&chain, Network::Localhost, &ws.config);

    let cases = [
        (
            format!(r#"{{"recipients": ["{}"], "amounts": [1, 2]}}"#, ALICE),
            "length",
        ),
        (r#"{"recipients": [], "amounts": []}"#.to_string(), "empty"),
        (
            r#"{"recipients": ["0x1234"], "amounts": [1]}"#.to_string(),
            "invalid",
        ),
        (
            format!(
                r#"{{"recipients": ["{}", "{}"], "amounts": [1, 2]}}"#,
                ALICE,
                ALICE.to_lowercase()
            ),
            "duplicate",
        ),
    ];

    for (json, label) in cases {
        let err = bulk_transfer::execute(&ctx, &plan(&json), Targets::default())
            .await
            .unwrap_err();
        let matched = match ops_error(&err) {
            OpsError::LengthMismatch { .. } => "length",
            OpsError::EmptyRecipients => "empty",
            OpsError::InvalidRecipient(_) => "invalid",
            OpsError::DuplicateRecipient(_) => "duplicate",
            other => panic!("unexpected error {}", other),
        };
        assert_eq!(matched, label);
    }
    assert!(chain.sent().is_empty());
}

#[tokio::test]
async fn test_insufficient_allowance_reports_whole_tokens() {
    let ws = Workspace::new();
    let chain = FakeChain::owned(whole(1_000)).with(|s| {
        s.allowances.insert((signer(), AIRDROP), whole(5));
    });
    let ctx = Context::new(&chain, Network::Localhost, &ws.config);

    let err = bulk_transfer::execute(&ctx, &two_recipients(), Targets::default())
        .await
        .unwrap_err();
    assert!(matches!(ops_error(&err), OpsError::InsufficientAllowance { .. }));
    assert_eq!(
        err.to_string(),
        "Insufficient allowance. Approve at least 30 tokens to the contract address. Current allowance: 5.0."
    );
    assert!(chain.sent().is_empty());
}

#[tokio::test]
async fn test_insufficient_balance() {
    let ws = Workspace::new();
    let chain = FakeChain::owned(whole(1_000)).with(|s| {
        s.balances.insert(signer(), whole(29));
    });
    let ctx = Context::new(&chain, Network::Localhost, &ws.config);

    let err = bulk_transfer::execute(&ctx, &two_recipients(), Targets::default())
        .await
        .unwrap_err();
    assert!(matches!(ops_error(&err), OpsError::InsufficientBalance { .. }));
}

#[tokio::test]
async fn test_paused_airdrop_rejected() {
    let ws = Workspace::new();
    let chain = FakeChain::owned(whole(1_000)).with(|s| s.paused = true);
    let ctx = Context::new(&chain, Network::Localhost, &ws.config);

    let err = bulk_transfer::execute(&ctx, &two_recipients(), Targets::default())
        .await
        .unwrap_err();
    assert!(matches!(ops_error(&err), OpsError::Paused));
}

#[tokio::test]
async fn test_dry_run_sends_nothing() {
    let ws = Workspace::new();
    let chain = FakeChain::owned(whole(1_000));
    let ctx = Context::new(&chain, Network::Localhost, &ws.config).with_dry_run(true);

    let outcome = bulk_transfer::execute(&ctx, &two_recipients(), Targets::default())
        .await
        .unwrap();
    assert!(outcome.is_none());
    assert!(chain.sent().is_empty());
}

#[tokio::test]
async fn test_missing_deployment_record() {
    let ws = Workspace::new();
    let chain = FakeChain::owned(whole(1_000));
    let ctx = Context::new(&chain, Network::Sepolia, &ws.config);

    let err = bulk_transfer::execute(&ctx, &two_recipients(), Targets::default())
        .await
        .unwrap_err();
    assert!(matches!(ops_error(&err), OpsError::MissingDeployment { .. }));
}
