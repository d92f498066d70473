//! Claim-eligibility Merkle trees in the OpenZeppelin standard format

mod tree;
pub mod value;

pub use tree::{
    hash_pair, leaf_hash, process_proof, verify, ClaimEntry, StandardMerkleTree, CLAIM_ENCODING,
    STANDARD_FORMAT,
};
