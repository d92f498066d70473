//! Infrastructure layer - External service integrations
//!
//! Alloy-based provider construction, contract bindings, Hardhat artifact
//! loading and the `ChainClient` used by every on-chain command.

pub mod ethereum;

pub use ethereum::{AlloyClient, ChainClient};
