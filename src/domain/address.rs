//! Ethereum address parsing with EIP-55 checksum enforcement

use alloy::primitives::Address;

/// Parse an address the way wallets do.
///
/// The `0x` prefix is optional. All-lowercase and all-uppercase input is
/// accepted as-is; mixed-case input must carry a valid EIP-55 checksum.
pub fn parse_address(input: &str) -> Result<Address, String> {
    let trimmed = input.trim();
    let body = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);

    if body.len() != 40 || !body.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(format!("'{}' is not 40 hex characters", input));
    }

    let has_lower = body.chars().any(|c| c.is_ascii_lowercase());
    let has_upper = body.chars().any(|c| c.is_ascii_uppercase());
    if has_lower && has_upper {
        return Address::parse_checksummed(format!("0x{}", body), None)
            .map_err(|_| format!("'{}' has an invalid checksum", input));
    }

    body.parse::<Address>()
        .map_err(|e| format!("'{}' is not a valid address: {}", input, e))
}

/// Parser for clap `value_parser`
pub fn parse_address_arg(input: &str) -> Result<Address, String> {
    parse_address(input)
}
