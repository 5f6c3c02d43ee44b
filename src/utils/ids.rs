use crate::error::{Error, Result};

/// Parses a decimal, unsigned 32-bit identifier as it arrives at the boundary.
pub fn parse_id(raw: &str, what: &str) -> Result<i64> {
    let invalid = || Error::BadRequest(format!("Invalid {}", what));
    // `u32::from_str` tolerates a leading '+'
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    raw.parse::<u32>().map(i64::from).map_err(|_| invalid())
}
