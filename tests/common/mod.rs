//! In-memory chain and scratch workspace shared by the integration tests
#![allow(dead_code)]

use std::collections::HashMap;
use std::fs;
use std::sync::Mutex;
use std::time::Duration;

use alloy::primitives::{Address, Bytes, B256, U256};
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use tempfile::TempDir;

use memetv_ops::config::{Config, Network};
use memetv_ops::domain::StandardMerkleTree;
use memetv_ops::infrastructure::ethereum::{
    AirdropCall, ContractCall, Deployed, TokenCall, TokenInfo, TxOutcome,
};
use memetv_ops::infrastructure::ChainClient;
use memetv_ops::store::DeploymentRecord;

pub const TOKEN: Address = Address::new([0x7a; 20]);
pub const AIRDROP: Address = Address::new([0xad; 20]);

pub fn signer() -> Address {
    "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266".parse().unwrap()
}

pub fn stranger() -> Address {
    "0x70997970C51812dc3A010C7d01b50e0d17dc79C8".parse().unwrap()
}

pub fn whole(tokens: u64) -> U256 {
    U256::from(tokens) * U256::from(10u64).pow(U256::from(18u64))
}

#[derive(Debug, Default)]
pub struct ChainState {
    pub native_balance: U256,
    pub token_owner: Address,
    pub airdrop_owner: Address,
    pub merkle_root: B256,
    pub last_updated_day: u64,
    pub paused: bool,
    pub balances: HashMap<Address, U256>,
    pub allowances: HashMap<(Address, Address), U256>,
    pub sent: Vec<ContractCall>,
    pub deployed: Vec<Bytes>,
}

/// Records every write; reads come from `state`
pub struct FakeChain {
    signer: Address,
    pub state: Mutex<ChainState>,
}

impl FakeChain {
    /// Signer owns both contracts and holds `balance` base units, all approved to the airdrop
    pub fn owned(balance: U256) -> Self {
        let signer = signer();
        let mut state = ChainState {
            native_balance: whole(1),
            token_owner: signer,
            airdrop_owner: signer,
            ..Default::default()
        };
        state.balances.insert(signer, balance);
        state.allowances.insert((signer, AIRDROP), balance);
        Self {
            signer,
            state: Mutex::new(state),
        }
    }

    pub fn with<F: FnOnce(&mut ChainState)>(self, f: F) -> Self {
        f(&mut self.state.lock().unwrap());
        self
    }

    pub fn sent(&self) -> Vec<ContractCall> {
        self.state.lock().unwrap().sent.clone()
    }

    fn outcome(n: usize) -> TxOutcome {
        TxOutcome {
            tx_hash: B256::with_last_byte(n as u8),
            block_number: Some(n as u64),
            gas_used: 21_000,
        }
    }
}

#[async_trait]
impl ChainClient for FakeChain {
    fn signer(&self) -> Address {
        self.signer
    }

    fn endpoint_name(&self) -> String {
        "fake".to_string()
    }

    async fn chain_id(&self) -> Result<u64> {
        Ok(31337)
    }

    async fn native_balance(&self, _account: Address) -> Result<U256> {
        Ok(self.state.lock().unwrap().native_balance)
    }

    async fn deploy(&self, code: Bytes, _delay: Duration) -> Result<Deployed> {
        let mut state = self.state.lock().unwrap();
        state.deployed.push(code);
        let n = state.deployed.len();
        let address = if n == 1 { TOKEN } else { AIRDROP };
        Ok(Deployed {
            address,
            outcome: Self::outcome(n),
        })
    }

    async fn token_info(&self, _token: Address) -> Result<TokenInfo> {
        Ok(TokenInfo {
            name: "TheMemeTV".to_string(),
            symbol: "MEMETV".to_string(),
            decimals: 18,
            total_supply: whole(1_000_000),
            team_supply: U256::from(100_000u64),
        })
    }

    async fn token_owner(&self, _token: Address) -> Result<Address> {
        Ok(self.state.lock().unwrap().token_owner)
    }

    async fn merkle_root(&self, _token: Address) -> Result<B256> {
        Ok(self.state.lock().unwrap().merkle_root)
    }

    async fn last_updated_day(&self, _token: Address) -> Result<u64> {
        Ok(self.state.lock().unwrap().last_updated_day)
    }

    async fn balance_of(&self, _token: Address, account: Address) -> Result<U256> {
        let state = self.state.lock().unwrap();
        Ok(state.balances.get(&account).copied().unwrap_or_default())
    }

    async fn allowance(&self, _token: Address, owner: Address, spender: Address) -> Result<U256> {
        let state = self.state.lock().unwrap();
        Ok(state
            .allowances
            .get(&(owner, spender))
            .copied()
            .unwrap_or_default())
    }

    async fn airdrop_owner(&self, _airdrop: Address) -> Result<Address> {
        Ok(self.state.lock().unwrap().airdrop_owner)
    }

    async fn airdrop_token(&self, _airdrop: Address) -> Result<Address> {
        Ok(TOKEN)
    }

    async fn paused(&self, _airdrop: Address) -> Result<bool> {
        Ok(self.state.lock().unwrap().paused)
    }

    async fn check_allowance(&self, airdrop: Address, owner: Address) -> Result<U256> {
        self.allowance(TOKEN, owner, airdrop).await
    }

    async fn send(&self, call: &ContractCall) -> Result<TxOutcome> {
        let mut state = self.state.lock().unwrap();
        match call {
            ContractCall::Token(_, TokenCall::UpdateMerkleRoot { root }) => {
                state.merkle_root = *root
            }
            ContractCall::Token(_, TokenCall::Approve { spender, amount }) => {
                let key = (self.signer, *spender);
                state.allowances.insert(key, *amount);
            }
            ContractCall::Airdrop(_, AirdropCall::Pause) => state.paused = true,
            ContractCall::Airdrop(_, AirdropCall::Unpause) => state.paused = false,
            ContractCall::Airdrop(_, AirdropCall::BulkTransfer { recipients, .. })
                if recipients.is_empty() =>
            {
                return Err(anyhow!("empty bulk transfer reached the chain"));
            }
            _ => {}
        }
        state.sent.push(call.clone());
        Ok(Self::outcome(state.sent.len()))
    }
}

/// Scratch directory with a deployment record for localhost and a claim tree
pub struct Workspace {
    pub dir: TempDir,
    pub config: Config,
    pub tree: StandardMerkleTree,
}

impl Workspace {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            tree_path: dir.path().join("MerkleTree").join("tree.json"),
            deployments_dir: dir.path().join("deployments"),
            artifacts_dir: dir.path().join("artifacts"),
            recipients_path: dir.path().join("recipients.json"),
            deploy_delay_ms: 0,
        };

        let tree = StandardMerkleTree::claims(&[
            (signer(), U256::from(500u64)),
            (stranger(), U256::from(250u64)),
            (Address::repeat_byte(0x33), U256::from(125u64)),
        ])
        .unwrap();
        tree.save(&config.tree_path).unwrap();

        DeploymentRecord::new(Network::Localhost, TOKEN, AIRDROP, tree.root())
            .save(&config.deployments_dir)
            .unwrap();

        Self { dir, config, tree }
    }

    pub fn write(&self, name: &str, content: &str) -> std::path::PathBuf {
        let path = self.dir.path().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        path
    }
}
