//! Checked proportional arithmetic.
//!
//! Every split rounds down. The remainder ("dust") is reported to the caller
//! instead of being handed to any party, so the sum of the parts never
//! exceeds the whole.

use primitive_types::U256;
use royalty_types::{Amount, Weight, BPS_DENOMINATOR};

/// Result of splitting an amount by weight.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WeightedSplit {
    /// One share per weight, in input order.
    pub shares: Vec<Amount>,
    /// `amount - Σ shares`.
    pub dust: Amount,
}

/// Compute `floor(value * numerator / denominator)`.
///
/// The product is formed in 256 bits, so the call succeeds whenever the
/// quotient itself fits in an [`Amount`].
///
/// Returns `None` if the denominator is zero or the result overflows.
pub fn mul_div_floor(value: Amount, numerator: Amount, denominator: Amount) -> Option<Amount> {
    if denominator == 0 {
        return None;
    }
    if let Some(product) = value.checked_mul(numerator) {
        return Some(product / denominator);
    }
    let product = U256::from(value).checked_mul(U256::from(numerator))?;
    let quotient = product / U256::from(denominator);
    if quotient.bits() > 128 {
        return None;
    }
    Some(quotient.low_u128())
}

/// `floor(amount * bps / 10000)`.
///
/// Returns `None` on overflow.
pub fn bps_share(amount: Amount, bps: u16) -> Option<Amount> {
    mul_div_floor(amount, Amount::from(bps), Amount::from(BPS_DENOMINATOR))
}

/// Sum weights, returning `None` on overflow.
pub fn total_weight(weights: &[Weight]) -> Option<Weight> {
    weights.iter().try_fold(0 as Weight, |acc, w| acc.checked_add(*w))
}

/// Split `amount` as `floor(amount * w_i / Σw)` for every weight.
///
/// Returns `None` if the weights sum to zero or any share overflows.
pub fn split_weighted(amount: Amount, weights: &[Weight]) -> Option<WeightedSplit> {
    let total = Amount::from(total_weight(weights)?);
    let shares = weights
        .iter()
        .map(|w| mul_div_floor(amount, Amount::from(*w), total))
        .collect::<Option<Vec<_>>>()?;
    let paid = shares.iter().try_fold(0 as Amount, |acc, s| acc.checked_add(*s))?;
    Some(WeightedSplit {
        shares,
        dust: amount.checked_sub(paid)?,
    })
}
