//! Leaf values: JSON <-> `DynSolValue` according to the tree's leaf encoding

use alloy::primitives::{FixedBytes, I256, U256};
use alloy_dyn_abi::{DynSolType, DynSolValue};
use serde_json::Value;

use crate::domain::address::parse_address;

/// Parse a JSON leaf element according to its Solidity type
pub fn parse_json(ty: &DynSolType, value: &Value) -> Result<DynSolValue, String> {
    match (ty, value) {
        (_, Value::String(s)) => parse_value(ty, s),
        (DynSolType::Uint(_) | DynSolType::Int(_), Value::Number(n)) => {
            parse_value(ty, &n.to_string())
        }
        (DynSolType::Bool, Value::Bool(b)) => Ok(DynSolValue::Bool(*b)),
        (DynSolType::Array(inner_ty), Value::Array(items)) => {
            let values = items
                .iter()
                .map(|item| parse_json(inner_ty, item))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(DynSolValue::Array(values))
        }
        (DynSolType::FixedArray(inner_ty, size), Value::Array(items)) => {
            if items.len() != *size {
                return Err(format!(
                    "Fixed array size mismatch: expected {} elements, got {}",
                    size,
                    items.len()
                ));
            }
            let values = items
                .iter()
                .map(|item| parse_json(inner_ty, item))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(DynSolValue::FixedArray(values))
        }
        (DynSolType::Tuple(types), Value::Array(items)) => {
            if items.len() != types.len() {
                return Err(format!(
                    "Tuple size mismatch: expected {} elements, got {}",
                    types.len(),
                    items.len()
                ));
            }
            let values = types
                .iter()
                .zip(items)
                .map(|(ty, item)| parse_json(ty, item))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(DynSolValue::Tuple(values))
        }
        _ => Err(format!("Cannot read {} as {}", value, ty)),
    }
}

/// Parse a scalar value from its string form
pub fn parse_value(ty: &DynSolType, arg: &str) -> Result<DynSolValue, String> {
    let arg = arg.trim();
    match ty {
        DynSolType::Address => parse_address(arg).map(DynSolValue::Address),

        DynSolType::Bool => {
            let value = match arg.to_lowercase().as_str() {
                "true" | "1" => true,
                "false" | "0" => false,
                _ => return Err(format!("Invalid bool: expected true/false, got '{}'", arg)),
            };
            Ok(DynSolValue::Bool(value))
        }

        DynSolType::Int(size) => {
            let value = if let Some(hex_str) = hex_body(arg) {
                let bytes = parse_hex_to_bytes(hex_str, 32)?;
                let mut array = [0u8; 32];
                array.copy_from_slice(&bytes);
                I256::from_be_bytes(array)
            } else {
                arg.parse::<I256>()
                    .map_err(|e| format!("Invalid integer: {}", e))?
            };
            Ok(DynSolValue::Int(value, *size))
        }

        DynSolType::Uint(size) => {
            let value = if let Some(hex_str) = hex_body(arg) {
                let bytes = parse_hex_to_bytes(hex_str, 32)?;
                let mut array = [0u8; 32];
                array.copy_from_slice(&bytes);
                U256::from_be_bytes(array)
            } else {
                arg.parse::<U256>()
                    .map_err(|e| format!("Invalid unsigned integer: {}", e))?
            };
            if *size < 256 && value >= (U256::from(1u8) << *size) {
                return Err(format!("Value {} does not fit in uint{}", value, size));
            }
            Ok(DynSolValue::Uint(value, *size))
        }

        DynSolType::Bytes => {
            let hex_str = hex_body(arg).unwrap_or(arg);
            let bytes = hex::decode(hex_str).map_err(|e| format!("Invalid hex: {}", e))?;
            Ok(DynSolValue::Bytes(bytes))
        }

        DynSolType::FixedBytes(size) => {
            let hex_str = hex_body(arg).unwrap_or(arg);
            let bytes = hex::decode(hex_str).map_err(|e| format!("Invalid hex: {}", e))?;

            if bytes.len() != *size {
                return Err(format!(
                    "Invalid bytes length: expected {} bytes, got {}",
                    size,
                    bytes.len()
                ));
            }

            let mut word = [0u8; 32];
            word[..*size].copy_from_slice(&bytes);
            Ok(DynSolValue::FixedBytes(FixedBytes::from(word), *size))
        }

        DynSolType::String => Ok(DynSolValue::String(arg.to_string())),

        _ => Err(format!("Unsupported type: {}", ty)),
    }
}

/// JSON form written by `dump`
pub fn to_json(value: &DynSolValue) -> Value {
    match value {
        DynSolValue::Address(addr) => Value::String(addr.to_checksum(None)),
        DynSolValue::Bool(b) => Value::Bool(*b),
        DynSolValue::Uint(v, _) => Value::String(v.to_string()),
        DynSolValue::Int(v, _) => Value::String(v.to_string()),
        DynSolValue::Bytes(bytes) => Value::String(format!("0x{}", hex::encode(bytes))),
        DynSolValue::FixedBytes(word, size) => {
            Value::String(format!("0x{}", hex::encode(&word[..*size])))
        }
        DynSolValue::String(s) => Value::String(s.clone()),
        DynSolValue::Array(items)
        | DynSolValue::FixedArray(items)
        | DynSolValue::Tuple(items) => Value::Array(items.iter().map(to_json).collect()),
        other => Value::String(format!("{:?}", other)),
    }
}

/// Digits after a `0x` or `0X` prefix
pub(crate) fn hex_body(arg: &str) -> Option<&str> {
    arg.strip_prefix("0x").or_else(|| arg.strip_prefix("0X"))
}

/// Parse hex string to bytes with left padding
fn parse_hex_to_bytes(hex_str: &str, expected_size: usize) -> Result<Vec<u8>, String> {
    let padded_hex = if hex_str.len() % 2 == 1 {
        format!("0{}", hex_str)
    } else {
        hex_str.to_string()
    };
    let bytes = hex::decode(&padded_hex).map_err(|e| format!("Invalid hex: {}", e))?;

    if bytes.len() > expected_size {
        return Err(format!(
            "Hex value too large: expected max {} bytes, got {}",
            expected_size,
            bytes.len()
        ));
    }

    let mut padded = vec![0u8; expected_size];
    padded[expected_size - bytes.len()..].copy_from_slice(&bytes);

    Ok(padded)
}
