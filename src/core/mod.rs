//! Core types shared by every command

mod context;
mod error;

pub use context::{ensure_owner, Context};
pub use error::OpsError;
