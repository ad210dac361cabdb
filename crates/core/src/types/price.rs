//! Price normalization using decimal arithmetic.
//!
//! The store API carries prices as strings and expects fixed two-decimal
//! values ("19.90"). Unset or unparseable input normalizes to the empty
//! string, which the API treats as "no price".

use rust_decimal::Decimal;

/// Normalize a raw price string to the store's wire format.
///
/// Parses with [`rust_decimal`] (no float round-tripping), rounds to two
/// decimal places and re-emits with exactly two decimals. Empty, whitespace,
/// or unparseable input yields the empty string.
///
/// # Example
///
/// ```rust
/// # use backroom_core::normalize_price;
/// assert_eq!(normalize_price("19.9"), "19.90");
/// assert_eq!(normalize_price(" 5 "), "5.00");
/// assert_eq!(normalize_price("not a price"), "");
/// ```
#[must_use]
pub fn normalize_price(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return String::new();
    }
    trimmed.parse::<Decimal>().map_or_else(
        |_| String::new(),
        |value| {
            let mut rounded = value.round_dp(2);
            rounded.rescale(2);
            rounded.to_string()
        },
    )
}

/// Normalize the first non-empty of a price and its fallback.
///
/// Variations without an explicit price inherit the parent product's price.
#[must_use]
pub fn normalize_price_or(raw: &str, fallback: &str) -> String {
    if raw.trim().is_empty() {
        normalize_price(fallback)
    } else {
        normalize_price(raw)
    }
}
