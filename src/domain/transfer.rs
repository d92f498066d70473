//! Recipients/amounts lists for the airdrop's `bulkTransfer`

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use alloy::primitives::{Address, U256};
use anyhow::{Context, Result};
use serde::Deserialize;

use crate::core::OpsError;
use crate::domain::address::parse_address;
use crate::domain::units::parse_amount;

/// An amount as written in the JSON file: a number or a decimal string
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawAmount {
    Number(u64),
    Text(String),
}

impl RawAmount {
    pub fn to_u256(&self) -> Result<U256, String> {
        match self {
            RawAmount::Number(n) => Ok(U256::from(*n)),
            RawAmount::Text(s) => parse_amount(s),
        }
    }
}

/// Unvalidated file contents: `{ "recipients": [...], "amounts": [...] }`
#[derive(Debug, Clone, Deserialize)]
pub struct BulkTransferPlan {
    pub recipients: Vec<String>,
    pub amounts: Vec<RawAmount>,
}

/// A plan that passed every off-chain check. Amounts are whole tokens.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedPlan {
    pub recipients: Vec<Address>,
    pub amounts: Vec<U256>,
    pub total: U256,
}

impl BulkTransferPlan {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read recipients file {}", path.display()))?;
        Self::from_json(&content)
            .with_context(|| format!("Invalid recipients file {}", path.display()))
    }

    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Checks run in a fixed order so the first problem reported is stable:
    /// lengths, emptiness, address syntax, duplicates, then amounts.
    pub fn validate(&self) -> Result<ValidatedPlan, OpsError> {
        if self.recipients.len() != self.amounts.len() {
            return Err(OpsError::LengthMismatch {
                recipients: self.recipients.len(),
                amounts: self.amounts.len(),
            });
        }
        if self.recipients.is_empty() {
            return Err(OpsError::EmptyRecipients);
        }

        let recipients = self
            .recipients
            .iter()
            .map(|raw| parse_address(raw).map_err(|_| OpsError::InvalidRecipient(raw.clone())))
            .collect::<Result<Vec<_>, _>>()?;

        let mut seen = HashSet::with_capacity(recipients.len());
        for recipient in &recipients {
            if !seen.insert(*recipient) {
                return Err(OpsError::DuplicateRecipient(*recipient));
            }
        }

        let mut amounts = Vec::with_capacity(self.amounts.len());
        let mut total = U256::ZERO;
        for (recipient, raw) in recipients.iter().zip(&self.amounts) {
            let amount = raw.to_u256().map_err(OpsError::InvalidAmount)?;
            if amount.is_zero() {
                return Err(OpsError::ZeroAmount(*recipient));
            }
            total = total.checked_add(amount).ok_or(OpsError::AmountOverflow)?;
            amounts.push(amount);
        }

        Ok(ValidatedPlan {
            recipients,
            amounts,
            total,
        })
    }
}
