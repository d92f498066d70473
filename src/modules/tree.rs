//! Offline Merkle tree commands

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use alloy::primitives::{Address, B256, U256};
use anyhow::{Context as _, Result};
use serde::Deserialize;
use tracing::info;

use crate::core::OpsError;
use crate::domain::merkle::verify as verify_proof;
use crate::domain::transfer::RawAmount;
use crate::domain::{parse_address, StandardMerkleTree};

/// One row of the allocations file
#[derive(Debug, Clone, Deserialize)]
pub struct Allocation {
    pub address: String,
    pub amount: RawAmount,
}

/// Parse `[{ "address", "amount" }]`; accounts must be unique
pub fn parse_allocations(json: &str) -> Result<Vec<(Address, U256)>> {
    let rows: Vec<Allocation> = serde_json::from_str(json)?;
    let mut seen = HashSet::with_capacity(rows.len());
    rows.iter()
        .map(|row| -> Result<(Address, U256)> {
            let account = parse_address(&row.address)
                .map_err(|_| OpsError::InvalidRecipient(row.address.clone()))?;
            if !seen.insert(account) {
                return Err(OpsError::DuplicateRecipient(account).into());
            }
            let amount = row.amount.to_u256().map_err(OpsError::InvalidAmount)?;
            Ok((account, amount))
        })
        .collect()
}

/// Build a claim tree from an allocations file and write it to `output`
pub fn build(input: &Path, output: &Path) -> Result<StandardMerkleTree> {
    let content = fs::read_to_string(input)
        .with_context(|| format!("Failed to read allocations {}", input.display()))?;
    let allocations = parse_allocations(&content)
        .with_context(|| format!("Invalid allocations file {}", input.display()))?;

    let tree = StandardMerkleTree::claims(&allocations)?;
    tree.save(output)?;
    info!(
        "Wrote {} claims to {} (root {})",
        tree.len(),
        output.display(),
        tree.root()
    );
    Ok(tree)
}

pub fn root(path: &Path) -> Result<B256> {
    Ok(StandardMerkleTree::load_file(path)?.root())
}

/// Proof for the first value containing `account`
pub fn proof(path: &Path, account: Address) -> Result<Vec<B256>> {
    let tree = StandardMerkleTree::load_file(path)?;
    let index = tree
        .find_address(account)
        .ok_or(OpsError::ClaimNotFound(account))?;
    Ok(tree.proof(index)?)
}

/// Re-check the file and every value's proof against the root; returns the value count
pub fn verify(path: &Path) -> Result<usize> {
    let tree = StandardMerkleTree::load_file(path)?;
    let root = tree.root();
    for index in 0..tree.len() {
        let leaf = tree.leaf(index)?;
        let proof = tree.proof(index)?;
        if !verify_proof(root, leaf, &proof) {
            return Err(OpsError::InvalidTree(format!(
                "proof for value {} does not verify",
                index
            ))
            .into());
        }
    }
    info!("{} values verified against root {}", tree.len(), root);
    Ok(tree.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_allocations() {
        let parsed = parse_allocations(
            r#"[
                {"address": "0x70997970C51812dc3A010C7d01b50e0d17dc79C8", "amount": 100},
                {"address": "0x3c44cdddb6a900fa2b585dd299e03d12fa4293bc", "amount": "250"}
            ]"#,
        )
        .unwrap();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[1].1, U256::from(250u64));
    }

    #[test]
    fn test_duplicate_allocation_rejected() {
        let err = parse_allocations(
            r#"[
                {"address": "0x70997970C51812dc3A010C7d01b50e0d17dc79C8", "amount": 1},
                {"address": "0x70997970c51812dc3a010c7d01b50e0d17dc79c8", "amount": 2}
            ]"#,
        )
        .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<OpsError>(),
            Some(OpsError::DuplicateRecipient(_))
        ));
    }

    #[test]
    fn test_build_then_verify() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("allocations.json");
        let output = dir.path().join("MerkleTree").join("tree.json");
        fs::write(
            &input,
            r#"[
                {"address": "0x70997970C51812dc3A010C7d01b50e0d17dc79C8", "amount": 100},
                {"address": "0x3C44CdDdB6a900fa2b585dd299e03d12FA4293BC", "amount": 200},
                {"address": "0x90F79bf6EB2c4f870365E785982E1f101E93b906", "amount": 300}
            ]"#,
        )
        .unwrap();

        let tree = build(&input, &output).unwrap();
        assert_eq!(root(&output).unwrap(), tree.root());
        assert_eq!(verify(&output).unwrap(), 3);

        let account: Address = "0x90F79bf6EB2c4f870365E785982E1f101E93b906".parse().unwrap();
        assert!(!proof(&output, account).unwrap().is_empty());
    }
}
