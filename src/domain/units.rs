//! Whole-token amounts versus on-chain base units
//!
//! The contracts take mint, distribution, claim and bulk-transfer amounts in
//! whole tokens and scale them by `10^18` themselves. Balances and allowances
//! come back in base units.

use alloy::primitives::U256;

use crate::core::OpsError;
use crate::domain::merkle::value::hex_body;

pub const TOKEN_DECIMALS: u8 = 18;

fn scale(decimals: u8) -> U256 {
    U256::from(10u64).pow(U256::from(decimals))
}

/// Whole tokens to base units
pub fn to_base_units(whole: U256) -> Result<U256, OpsError> {
    whole
        .checked_mul(scale(TOKEN_DECIMALS))
        .ok_or(OpsError::AmountOverflow)
}

/// Render a base-unit value as a decimal string, keeping at least one fractional digit
pub fn format_units(value: U256, decimals: u8) -> String {
    if decimals == 0 {
        return value.to_string();
    }
    let unit = scale(decimals);
    let whole = value / unit;
    let frac = value % unit;

    let frac = format!("{:0>width$}", frac.to_string(), width = decimals as usize);
    let frac = frac.trim_end_matches('0');
    let frac = if frac.is_empty() { "0" } else { frac };

    format!("{}.{}", whole, frac)
}

/// Render base units of the token
pub fn format_token(value: U256) -> String {
    format_units(value, TOKEN_DECIMALS)
}

/// Parse a whole-token count given as a decimal or `0x`/`0X` hex string
pub fn parse_amount(input: &str) -> Result<U256, String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err("empty amount".to_string());
    }
    let parsed = if let Some(hex) = hex_body(trimmed) {
        if hex.is_empty() {
            return Err(format!("invalid amount '{}': no hex digits", input));
        }
        U256::from_str_radix(hex, 16)
    } else {
        U256::from_str_radix(trimmed, 10)
    };
    parsed.map_err(|e| format!("invalid amount '{}': {}", input, e))
}
