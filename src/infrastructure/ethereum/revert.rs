//! Turn revert data into the message the contract reverted with

use alloy::sol_types::{Panic, Revert, SolError, SolInterface};
use alloy::transports::TransportError;

use super::contracts::IOpenZeppelinErrors::IOpenZeppelinErrorsErrors as OzErrors;

/// Decode revert data: `Error(string)` verbatim, `Panic(uint256)` by code,
/// known custom errors by name, anything else as hex.
pub fn decode_revert(data: &[u8]) -> String {
    if data.is_empty() {
        return "execution reverted without a reason".to_string();
    }
    if let Ok(revert) = Revert::abi_decode(data) {
        return revert.reason;
    }
    if let Ok(panic) = Panic::abi_decode(data) {
        return format!("panic code 0x{:x}", panic.code);
    }
    match OzErrors::abi_decode(data) {
        Ok(OzErrors::EnforcedPause(_)) => "EnforcedPause()".to_string(),
        Ok(OzErrors::ExpectedPause(_)) => "ExpectedPause()".to_string(),
        Ok(OzErrors::OwnableUnauthorizedAccount(e)) => {
            format!("OwnableUnauthorizedAccount({})", e.account)
        }
        Ok(OzErrors::OwnableInvalidOwner(e)) => format!("OwnableInvalidOwner({})", e.owner),
        Ok(OzErrors::ERC20InsufficientBalance(e)) => format!(
            "ERC20InsufficientBalance({}, balance {}, needed {})",
            e.sender, e.balance, e.needed
        ),
        Ok(OzErrors::ERC20InsufficientAllowance(e)) => format!(
            "ERC20InsufficientAllowance({}, allowance {}, needed {})",
            e.spender, e.allowance, e.needed
        ),
        Ok(OzErrors::ERC20InvalidReceiver(e)) => format!("ERC20InvalidReceiver({})", e.receiver),
        Ok(OzErrors::ERC20ExceededCap(e)) => format!(
            "ERC20ExceededCap(increased supply {}, cap {})",
            e.increasedSupply, e.cap
        ),
        Err(_) => format!("unknown revert data 0x{}", hex::encode(data)),
    }
}

/// Revert reason carried by a JSON-RPC error response, if any
pub fn transport_revert_reason(err: &TransportError) -> Option<String> {
    let payload = err.as_error_resp()?;
    if let Some(data) = payload.as_revert_data() {
        return Some(decode_revert(&data));
    }
    let message = payload.message.to_string();
    message
        .contains("revert")
        .then(|| message.trim_start_matches("execution reverted: ").to_string())
}

/// Revert reason for a contract call error, if any
pub fn contract_revert_reason(err: &alloy::contract::Error) -> Option<String> {
    if let Some(data) = err.as_revert_data() {
        return Some(decode_revert(&data));
    }
    match err {
        alloy::contract::Error::TransportError(transport) => transport_revert_reason(transport),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ethereum::contracts::IOpenZeppelinErrors;
    use alloy::primitives::{Address, U256};

    #[test]
    fn test_error_string_verbatim() {
        let data = Revert {
            reason: "Ownable: caller is not the owner".to_string(),
        }
        .abi_encode();
        assert_eq!(decode_revert(&data), "Ownable: caller is not the owner");
    }

    #[test]
    fn test_panic_code() {
        let data = Panic {
            code: U256::from(0x11u64),
        }
        .abi_encode();
        assert_eq!(decode_revert(&data), "panic code 0x11");
    }

    #[test]
    fn test_custom_errors() {
        let data = IOpenZeppelinErrors::EnforcedPause {}.abi_encode();
        assert_eq!(decode_revert(&data), "EnforcedPause()");

        let account = Address::repeat_byte(0xab);
        let data = IOpenZeppelinErrors::OwnableUnauthorizedAccount { account }.abi_encode();
        assert_eq!(
            decode_revert(&data),
            format!("OwnableUnauthorizedAccount({})", account)
        );
    }

    #[test]
    fn test_unknown_and_empty() {
        assert_eq!(decode_revert(&[]), "execution reverted without a reason");
        assert_eq!(decode_revert(&[0xde, 0xad]), "unknown revert data 0xdead");
    }
}
