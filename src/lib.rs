//! Deployment and operations tooling for the MemeTV token and its airdrop distributor.

pub mod config;
pub mod core;
pub mod domain;
pub mod infrastructure;
pub mod modules;
pub mod store;

pub use crate::core::OpsError;
