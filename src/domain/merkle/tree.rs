//! OpenZeppelin-compatible "standard-v1" Merkle tree
//!
//! Layout: a flat array of node hashes with the root at index 0. The
//! children of node `i` live at `2i + 1` and `2i + 2`; leaves occupy the tail
//! of the array in reverse sorted order. Leaves are double-hashed ABI
//! encodings of their values and pairs are hashed in sorted order, so proofs
//! verify with OpenZeppelin's `MerkleProof.verify`.

use std::fs;
use std::path::Path;

use alloy::primitives::{keccak256, Address, B256, U256};
use alloy_dyn_abi::{DynSolType, DynSolValue};
use anyhow::Context;
use serde::{Deserialize, Serialize};

use super::value;
use crate::core::OpsError;

pub const STANDARD_FORMAT: &str = "standard-v1";

/// Leaf encoding of claim trees: (account, index, amount)
pub const CLAIM_ENCODING: [&str; 3] = ["address", "uint256", "uint256"];

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TreeFile {
    format: String,
    leaf_encoding: Vec<String>,
    tree: Vec<String>,
    values: Vec<ValueFile>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ValueFile {
    value: Vec<serde_json::Value>,
    tree_index: usize,
}

#[derive(Debug, Clone, PartialEq)]
struct LeafValue {
    value: Vec<DynSolValue>,
    tree_index: usize,
}

/// What a claimant submits to `claimDistributionAirDrop`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClaimEntry {
    pub index: U256,
    pub account: Address,
    pub amount: U256,
    pub proof: Vec<B256>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StandardMerkleTree {
    leaf_encoding: Vec<String>,
    types: Vec<DynSolType>,
    tree: Vec<B256>,
    values: Vec<LeafValue>,
}

/// `keccak256(keccak256(abi.encode(values)))`
pub fn leaf_hash(values: &[DynSolValue]) -> B256 {
    let encoded = DynSolValue::Tuple(values.to_vec()).abi_encode_params();
    keccak256(keccak256(encoded))
}

/// Commutative node hash: the smaller child comes first
pub fn hash_pair(a: B256, b: B256) -> B256 {
    let (first, second) = if a <= b { (a, b) } else { (b, a) };
    let mut buf = [0u8; 64];
    buf[..32].copy_from_slice(first.as_slice());
    buf[32..].copy_from_slice(second.as_slice());
    keccak256(buf)
}

pub fn process_proof(leaf: B256, proof: &[B256]) -> B256 {
    proof.iter().fold(leaf, |acc, sibling| hash_pair(acc, *sibling))
}

pub fn verify(root: B256, leaf: B256, proof: &[B256]) -> bool {
    process_proof(leaf, proof) == root
}

fn left_child(i: usize) -> usize {
    2 * i + 1
}

fn parent(i: usize) -> usize {
    (i - 1) / 2
}

fn sibling(i: usize) -> usize {
    if i % 2 == 1 {
        i + 1
    } else {
        i - 1
    }
}

fn parse_encoding(encoding: &[String]) -> Result<Vec<DynSolType>, OpsError> {
    encoding
        .iter()
        .map(|ty| {
            DynSolType::parse(ty)
                .map_err(|e| OpsError::InvalidTree(format!("bad leaf type '{}': {}", ty, e)))
        })
        .collect()
}

impl StandardMerkleTree {
    /// Build a tree over `values`, each matching `leaf_encoding`
    pub fn of(values: Vec<Vec<DynSolValue>>, leaf_encoding: &[&str]) -> Result<Self, OpsError> {
        if values.is_empty() {
            return Err(OpsError::InvalidTree(
                "Expected non-zero number of leaves".to_string(),
            ));
        }
        let leaf_encoding: Vec<String> = leaf_encoding.iter().map(|s| s.to_string()).collect();
        let types = parse_encoding(&leaf_encoding)?;

        for (i, value) in values.iter().enumerate() {
            check_shape(&types, value).map_err(|e| {
                OpsError::InvalidTree(format!("value {} does not match leaf encoding: {}", i, e))
            })?;
        }

        let mut hashed: Vec<(usize, B256)> = values
            .iter()
            .enumerate()
            .map(|(i, value)| (i, leaf_hash(value)))
            .collect();
        hashed.sort_by(|a, b| a.1.cmp(&b.1));

        let size = 2 * hashed.len() - 1;
        let mut tree = vec![B256::ZERO; size];
        let mut tree_indices = vec![0usize; values.len()];
        for (leaf_pos, (value_index, hash)) in hashed.iter().enumerate() {
            let tree_index = size - 1 - leaf_pos;
            tree[tree_index] = *hash;
            tree_indices[*value_index] = tree_index;
        }
        for i in (0..size - hashed.len()).rev() {
            tree[i] = hash_pair(tree[left_child(i)], tree[left_child(i) + 1]);
        }

        let values = values
            .into_iter()
            .zip(tree_indices)
            .map(|(value, tree_index)| LeafValue { value, tree_index })
            .collect();

        Ok(Self {
            leaf_encoding,
            types,
            tree,
            values,
        })
    }

    /// Build a claim tree from (account, amount) pairs; the index is the position
    pub fn claims(allocations: &[(Address, U256)]) -> Result<Self, OpsError> {
        let values = allocations
            .iter()
            .enumerate()
            .map(|(i, (account, amount))| {
                vec![
                    DynSolValue::Address(*account),
                    DynSolValue::Uint(U256::from(i), 256),
                    DynSolValue::Uint(*amount, 256),
                ]
            })
            .collect();
        Self::of(values, &CLAIM_ENCODING)
    }

    /// Parse and fully validate a standard-v1 dump
    pub fn load(json: &str) -> Result<Self, OpsError> {
        let file: TreeFile = serde_json::from_str(json)
            .map_err(|e| OpsError::InvalidTree(format!("malformed JSON: {}", e)))?;

        if file.format != STANDARD_FORMAT {
            return Err(OpsError::InvalidTree(format!(
                "Unknown format '{}'",
                file.format
            )));
        }

        let types = parse_encoding(&file.leaf_encoding)?;

        let tree = file
            .tree
            .iter()
            .map(|node| parse_node(node))
            .collect::<Result<Vec<_>, _>>()?;

        let mut values = Vec::with_capacity(file.values.len());
        for (i, entry) in file.values.iter().enumerate() {
            if entry.value.len() != types.len() {
                return Err(OpsError::InvalidTree(format!(
                    "value {} has {} fields, leaf encoding has {}",
                    i,
                    entry.value.len(),
                    types.len()
                )));
            }
            let value = types
                .iter()
                .zip(&entry.value)
                .map(|(ty, raw)| value::parse_json(ty, raw))
                .collect::<Result<Vec<_>, _>>()
                .map_err(|e| OpsError::InvalidTree(format!("value {}: {}", i, e)))?;
            values.push(LeafValue {
                value,
                tree_index: entry.tree_index,
            });
        }

        let loaded = Self {
            leaf_encoding: file.leaf_encoding,
            types,
            tree,
            values,
        };
        loaded.validate()?;
        Ok(loaded)
    }

    pub fn load_file(path: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read Merkle tree {}", path.display()))?;
        Self::load(&content).with_context(|| format!("Failed to load {}", path.display()))
    }

    /// Check every leaf hash and every internal node
    pub fn validate(&self) -> Result<(), OpsError> {
        if self.tree.is_empty() {
            return Err(OpsError::InvalidTree("tree has no nodes".to_string()));
        }
        for (i, leaf) in self.values.iter().enumerate() {
            self.check_leaf_node(leaf.tree_index)?;
            if self.tree[leaf.tree_index] != leaf_hash(&leaf.value) {
                return Err(OpsError::InvalidTree(format!(
                    "Merkle tree does not contain the expected value {}",
                    i
                )));
            }
        }
        let len = self.tree.len();
        for i in 0..len {
            let left = left_child(i);
            let right = left + 1;
            if left >= len {
                continue;
            }
            if right >= len || self.tree[i] != hash_pair(self.tree[left], self.tree[right]) {
                return Err(OpsError::InvalidTree(format!(
                    "Merkle tree is invalid at node {}",
                    i
                )));
            }
        }
        Ok(())
    }

    fn check_leaf_node(&self, tree_index: usize) -> Result<(), OpsError> {
        if tree_index >= self.tree.len() || left_child(tree_index) < self.tree.len() {
            return Err(OpsError::InvalidTree(format!(
                "index {} is not a leaf",
                tree_index
            )));
        }
        Ok(())
    }

    pub fn root(&self) -> B256 {
        self.tree[0]
    }

    pub fn leaf_encoding(&self) -> &[String] {
        &self.leaf_encoding
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Values in input order
    pub fn values(&self) -> impl Iterator<Item = &[DynSolValue]> {
        self.values.iter().map(|leaf| leaf.value.as_slice())
    }

    pub fn leaf(&self, value_index: usize) -> Result<B256, OpsError> {
        let leaf = self.leaf_value(value_index)?;
        Ok(self.tree[leaf.tree_index])
    }

    /// Sibling path from the leaf of value `value_index` up to the root
    pub fn proof(&self, value_index: usize) -> Result<Vec<B256>, OpsError> {
        let leaf = self.leaf_value(value_index)?;
        self.check_leaf_node(leaf.tree_index)?;

        let mut proof = Vec::new();
        let mut i = leaf.tree_index;
        while i > 0 {
            proof.push(self.tree[sibling(i)]);
            i = parent(i);
        }
        Ok(proof)
    }

    fn leaf_value(&self, value_index: usize) -> Result<&LeafValue, OpsError> {
        self.values.get(value_index).ok_or_else(|| {
            OpsError::InvalidTree(format!(
                "value index {} out of bounds ({} values)",
                value_index,
                self.values.len()
            ))
        })
    }

    /// First value with an address field equal to `account`
    pub fn find_address(&self, account: Address) -> Option<usize> {
        self.values.iter().position(|leaf| {
            leaf.value
                .iter()
                .any(|v| matches!(v, DynSolValue::Address(a) if *a == account))
        })
    }

    pub fn is_claim_tree(&self) -> bool {
        self.leaf_encoding.iter().map(String::as_str).eq(CLAIM_ENCODING)
    }

    /// Claim arguments for `account`; requires the claim leaf encoding
    pub fn claim_for(&self, account: Address) -> Result<ClaimEntry, OpsError> {
        if !self.is_claim_tree() {
            return Err(OpsError::InvalidTree(format!(
                "claims need leaf encoding {:?}, tree uses {:?}",
                CLAIM_ENCODING, self.leaf_encoding
            )));
        }
        let value_index = self
            .values
            .iter()
            .position(|leaf| {
                matches!(leaf.value.first(), Some(DynSolValue::Address(a)) if *a == account)
            })
            .ok_or(OpsError::ClaimNotFound(account))?;

        let value = &self.values[value_index].value;
        let (index, amount) = match (&value[1], &value[2]) {
            (DynSolValue::Uint(index, _), DynSolValue::Uint(amount, _)) => (*index, *amount),
            _ => {
                return Err(OpsError::InvalidTree(format!(
                    "claim value {} is malformed",
                    value_index
                )))
            }
        };

        Ok(ClaimEntry {
            index,
            account,
            amount,
            proof: self.proof(value_index)?,
        })
    }

    /// Serialize back to the standard-v1 JSON layout
    pub fn dump(&self) -> String {
        let file = TreeFile {
            format: STANDARD_FORMAT.to_string(),
            leaf_encoding: self.leaf_encoding.clone(),
            tree: self.tree.iter().map(|node| node.to_string()).collect(),
            values: self
                .values
                .iter()
                .map(|leaf| ValueFile {
                    value: leaf.value.iter().map(value::to_json).collect(),
                    tree_index: leaf.tree_index,
                })
                .collect(),
        };
        serde_json::to_string_pretty(&file).unwrap_or_default()
    }

    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        fs::write(path, self.dump())
            .with_context(|| format!("Failed to write Merkle tree {}", path.display()))
    }

    pub fn types(&self) -> &[DynSolType] {
        &self.types
    }
}

fn check_shape(types: &[DynSolType], value: &[DynSolValue]) -> Result<(), String> {
    if types.len() != value.len() {
        return Err(format!("expected {} fields, got {}", types.len(), value.len()));
    }
    for (ty, v) in types.iter().zip(value) {
        if !ty.matches(v) {
            return Err(format!("{:?} is not a {}", v, ty));
        }
    }
    Ok(())
}

fn parse_node(node: &str) -> Result<B256, OpsError> {
    let body = node.strip_prefix("0x").unwrap_or(node);
    if body.len() != 64 {
        return Err(OpsError::InvalidTree(format!(
            "node '{}' is not a 32-byte hex value",
            node
        )));
    }
    body.parse::<B256>()
        .map_err(|e| OpsError::InvalidTree(format!("node '{}': {}", node, e)))
}
