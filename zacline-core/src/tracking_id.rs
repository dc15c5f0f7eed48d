//! Human-facing tracking identifiers.
//!
//! An order id maps to a token of the form `ZAC` + decimal digits,
//! zero-padded to a minimum width of 3 (`1` -> `ZAC001`,
//! `1000` -> `ZAC1000`). The mapping is injective and reversible.

const PREFIX: &str = "ZAC";

/// Encode an order id as a tracking token.
///
/// Callers are expected to pass ids handed out by the ledger, which
/// start at 1; encoding is total over u64 regardless.
pub fn encode(order_id: u64) -> String {
    format!("{PREFIX}{order_id:03}")
}

/// Decode a tracking token back to its order id.
///
/// Input is trimmed and upper-cased first. Returns `None` for
/// anything that is not `ZAC` followed by one or more decimal digits
/// mapping to a nonzero id, including values that overflow u64.
pub fn decode(text: &str) -> Option<u64> {
    let normalized = text.trim().to_ascii_uppercase();
    let digits = normalized.strip_prefix(PREFIX)?;

    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    match digits.parse::<u64>() {
        Ok(0) => None,
        Ok(id) => Some(id),
        Err(_) => None,
    }
}
