//! Parsing utilities
//!
//! Helpers for CLI sizes, config name comparison and hex quantities returned
//! by JSON-RPC nodes.

use alloy::primitives::U256;
use byte_unit::Byte;
use std::str::FromStr;

/// Parses a human-readable size ("1GB", "500MB", "1024KiB") into bytes.
pub fn parse_string_to_bytes_size(s: &str) -> Result<u64, String> {
	Byte::from_str(s)
		.map(|byte| byte.as_u64())
		.map_err(|e| format!("Invalid size format: '{}'. Error: {}", s, e))
}

/// Trims whitespace and lowercases, for case-insensitive name comparison.
pub fn normalize_string(input: &str) -> String {
	input.trim().to_lowercase()
}

/// Parses a `0x`-prefixed JSON-RPC hex quantity into a 256-bit integer.
///
/// Quantities are unsigned, so this is exact for any balance a node can report.
pub fn parse_hex_quantity(value: &str) -> Result<U256, String> {
	let digits = value
		.strip_prefix("0x")
		.or_else(|| value.strip_prefix("0X"))
		.ok_or_else(|| format!("Hex quantity must start with 0x: '{}'", value))?;

	if digits.is_empty() {
		return Err(format!("Hex quantity has no digits: '{}'", value));
	}

	U256::from_str_radix(digits, 16)
		.map_err(|e| format!("Invalid hex quantity '{}': {}", value, e))
}
