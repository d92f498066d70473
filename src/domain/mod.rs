//! Off-chain models: Merkle claim trees, bulk transfer plans, day scheduling, token units

pub mod address;
pub mod merkle;
pub mod schedule;
pub mod transfer;
pub mod units;

pub use address::parse_address;
pub use merkle::{ClaimEntry, StandardMerkleTree};
pub use transfer::{BulkTransferPlan, ValidatedPlan};
