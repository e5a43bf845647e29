use alloy::primitives::U256;
use balance_monitor::utils::{parse_hex_quantity, parse_string_to_bytes_size};
use proptest::{prelude::*, test_runner::Config};

proptest! {
	#![proptest_config(Config {
		failure_persistence: None,
		..Config::default()
	})]

	#[test]
	fn test_hex_quantity_matches_formatted_value(bytes in any::<[u8; 32]>()) {
		let value = U256::from_be_bytes(bytes);

		prop_assert_eq!(parse_hex_quantity(&format!("{:#x}", value)), Ok(value));
	}

	#[test]
	fn test_hex_quantity_requires_prefix(value in any::<u64>()) {
		let unprefixed = format!("{:x}", value);
		prop_assert!(parse_hex_quantity(&unprefixed).is_err());
	}

	#[test]
	fn test_plain_byte_counts(size in 0u64..1_000_000_000) {
		prop_assert_eq!(parse_string_to_bytes_size(&format!("{}B", size)), Ok(size));
	}
}
