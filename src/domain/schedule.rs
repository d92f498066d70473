//! UTC-day bookkeeping for the once-per-day Merkle root update

use alloy::primitives::B256;
use chrono::{DateTime, Utc};

use crate::core::OpsError;

pub const SECONDS_PER_DAY: i64 = 86_400;

/// Days since the Unix epoch, matching `block.timestamp / 1 days`
pub fn day_of(time: DateTime<Utc>) -> u64 {
    time.timestamp().div_euclid(SECONDS_PER_DAY).max(0) as u64
}

pub fn current_day() -> u64 {
    day_of(Utc::now())
}

/// Reject an update the contract would revert: one per day, and never a no-op
pub fn check_root_update(
    current_root: B256,
    new_root: B256,
    last_updated_day: u64,
    today: u64,
) -> Result<(), OpsError> {
    if today <= last_updated_day {
        return Err(OpsError::RootUpdatedToday {
            last_updated_day,
            today,
        });
    }
    if current_root == new_root {
        return Err(OpsError::RootUnchanged(new_root));
    }
    Ok(())
}
