use crate::error::{RegistryError, Result};

/// Length of an EVM address in bytes.
pub const ADDRESS_LEN: usize = 20;

/// Check that `address` is `0x` followed by exactly 40 hex characters.
///
/// Both checksummed and all-lowercase renderings are accepted; the
/// checksum itself is not verified.
pub fn validate(address: &str) -> Result<()> {
	let invalid = |reason: &str| RegistryError::InvalidAddress {
		address: address.to_owned(),
		reason: reason.to_owned(),
	};

	let digits = address
		.strip_prefix("0x")
		.or_else(|| address.strip_prefix("0X"))
		.ok_or_else(|| invalid("missing 0x prefix"))?;

	if digits.len() != ADDRESS_LEN * 2 {
		return Err(invalid(&format!(
			"expected {} hex characters, got {}",
			ADDRESS_LEN * 2,
			digits.len()
		)));
	}

	hex::decode(digits).map_err(|e| invalid(&e.to_string()))?;
	Ok(())
}

/// Two renderings of a well-formed address refer to the same account when
/// they differ only in letter case. Anything else must match exactly.
pub fn same(a: &str, b: &str) -> bool {
	if validate(a).is_ok() && validate(b).is_ok() {
		a.eq_ignore_ascii_case(b)
	} else {
		a == b
	}
}
