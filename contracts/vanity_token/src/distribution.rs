//! Share arithmetic for the post-sale distribution.

use crate::types::{DistributionConfig, TokenError};

/// Tokens credited to one participant: `min(weight, cap) * rate`.
/// Returns the capped weight alongside the amount.
pub fn participant_share(
    config: &DistributionConfig,
    weight: i128,
) -> Result<(i128, i128), TokenError> {
    let capped = weight.clamp(0, config.cap);
    let amount = capped.checked_mul(config.rate).ok_or(TokenError::Overflow)?;
    Ok((capped, amount))
}

/// Reserve allocation for a fully distributed sale:
/// `total_weight * rate * numerator / denominator`, rounded half up.
pub fn reserve_share(config: &DistributionConfig, total_weight: i128) -> Result<i128, TokenError> {
    let scaled = total_weight
        .checked_mul(config.rate)
        .and_then(|minted| minted.checked_mul(config.reserve_numerator))
        .ok_or(TokenError::Overflow)?;

    round_half_up(scaled, config.reserve_denominator)
}

fn round_half_up(numerator: i128, denominator: i128) -> Result<i128, TokenError> {
    let doubled = numerator
        .checked_mul(2)
        .and_then(|n| n.checked_add(denominator))
        .ok_or(TokenError::Overflow)?;
    let divisor = denominator.checked_mul(2).ok_or(TokenError::Overflow)?;
    Ok(doubled / divisor)
}

/// Reject parameters that would make the arithmetic meaningless.
pub fn validate(config: &DistributionConfig) -> Result<(), TokenError> {
    if config.cap <= 0
        || config.rate <= 0
        || config.reserve_numerator < 0
        || config.reserve_denominator <= 0
    {
        return Err(TokenError::InvalidConfig);
    }
    Ok(())
}
