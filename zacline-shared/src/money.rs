/// Monetary value in minor units (cents). Signed so that rejected
/// inputs (zero or negative payments) can be represented and refused
/// rather than silently wrapping.
pub type Amount = i64;
