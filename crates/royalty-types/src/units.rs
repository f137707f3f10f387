//! Value units.
//!
//! All ledger amounts are integers in the smallest unit (wei). These helpers
//! convert to and from decimal ether strings for configuration and display.

use crate::Amount;

/// Number of decimal places in one ether.
pub const ETHER_DECIMALS: usize = 18;

/// Wei per ether (10^18).
pub const WEI_PER_ETHER: Amount = 1_000_000_000_000_000_000;

/// Errors produced when parsing a decimal ether string.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum UnitsError {
    /// The string is empty or not a decimal number.
    #[error("invalid ether amount: {0:?}")]
    Invalid(String),

    /// More than 18 fractional digits.
    #[error("ether amount {0:?} has more than 18 decimal places")]
    TooPrecise(String),

    /// The value does not fit in an [`Amount`].
    #[error("ether amount {0:?} overflows")]
    Overflow(String),
}

/// Parse a decimal ether string ("5", "0.25") into wei.
///
/// # Errors
///
/// Returns a [`UnitsError`] if the string is not a plain non-negative
/// decimal, has more than 18 fractional digits, or overflows.
pub fn parse_ether(value: &str) -> Result<Amount, UnitsError> {
    let trimmed = value.trim();
    let (whole, frac) = match trimmed.split_once('.') {
        Some((w, f)) => (w, f),
        None => (trimmed, ""),
    };
    let all_digits = |s: &str| s.chars().all(|c| c.is_ascii_digit());
    if (whole.is_empty() && frac.is_empty()) || !all_digits(whole) || !all_digits(frac) {
        return Err(UnitsError::Invalid(value.to_string()));
    }
    if frac.len() > ETHER_DECIMALS {
        return Err(UnitsError::TooPrecise(value.to_string()));
    }

    let overflow = || UnitsError::Overflow(value.to_string());
    let whole_wei = if whole.is_empty() {
        0
    } else {
        whole
            .parse::<Amount>()
            .map_err(|_| overflow())?
            .checked_mul(WEI_PER_ETHER)
            .ok_or_else(overflow)?
    };
    let frac_wei = if frac.is_empty() {
        0
    } else {
        let padded = format!("{frac:0<width$}", width = ETHER_DECIMALS);
        padded.parse::<Amount>().map_err(|_| overflow())?
    };
    whole_wei.checked_add(frac_wei).ok_or_else(overflow)
}

/// Format wei as a decimal ether string, always with at least one
/// fractional digit ("5.0", "0.098").
pub fn format_ether(wei: Amount) -> String {
    let whole = wei / WEI_PER_ETHER;
    let frac = wei % WEI_PER_ETHER;
    let digits = format!("{frac:0width$}", width = ETHER_DECIMALS);
    let digits = digits.trim_end_matches('0');
    if digits.is_empty() {
        format!("{whole}.0")
    } else {
        format!("{whole}.{digits}")
    }
}
