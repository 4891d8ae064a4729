use crate::error::Error;
use crate::types::{
    PresaleConfig, MAX_FRACTION, MIN_INTEREST_RATE, PERCENT, REFINANCE_RATE_STEP,
    REFINANCE_THRESHOLD_PCT, SCALE,
};

/// floor(a × b / d) for non-negative operands without forming a × b.
///
/// a = q·d + r, so a·b/d = q·b + r·b/d and only r·b (< d·b) is ever built.
pub fn mul_div_floor(a: i128, b: i128, d: i128) -> Option<i128> {
    if a < 0 || b < 0 || d <= 0 {
        return None;
    }
    let q = a / d;
    let r = a % d;
    q.checked_mul(b)?.checked_add(r.checked_mul(b)? / d)
}

/// Check presale parameters supplied at deployment.
pub fn validate_presale_config(config: &PresaleConfig) -> Result<(), Error> {
    if config.window_start >= config.window_end {
        return Err(Error::InvalidConfig);
    }
    if config.soft_cap <= 0 || config.hard_cap <= 0 || config.soft_cap > config.hard_cap {
        return Err(Error::InvalidConfig);
    }
    if config.unit_price <= 0 {
        return Err(Error::InvalidConfig);
    }
    if config.min_purchase <= 0 || config.min_purchase > config.max_purchase {
        return Err(Error::InvalidConfig);
    }
    Ok(())
}

/// Tokens credited for a presale payment
///
/// Formula: tokens = amount × SCALE / unit_price
///
/// Example:
/// - amount: 30 (×10^18)
/// - unit_price: 0.03 (×10^18)
/// - tokens: 1,000 (×10^18)
pub fn calculate_tokens_for_payment(amount: i128, unit_price: i128) -> Option<i128> {
    mul_div_floor(amount, SCALE, unit_price)
}

/// Payment required for a fraction of a property
///
/// Formula: required = value × fraction / 100, truncated toward zero
///
/// Example:
/// - value: 1,000 (×10^18)
/// - fraction: 10
/// - required: 100 (×10^18)
pub fn calculate_required_payment(value: i128, fraction: u32) -> Option<i128> {
    value.checked_mul(fraction as i128)?.checked_div(PERCENT)
}

/// Credit ceiling on the collateral path; same formula as the fraction price.
pub fn calculate_max_credit(value: i128, fraction: u32) -> Option<i128> {
    calculate_required_payment(value, fraction)
}

pub fn is_valid_fraction(fraction: u32) -> bool {
    (1..=MAX_FRACTION).contains(&fraction)
}

/// Refinance unlocks once repaid × 100 ≥ principal × 75.
pub fn meets_refinance_threshold(repaid: i128, principal: i128) -> Option<bool> {
    let repaid_scaled = repaid.checked_mul(PERCENT)?;
    let required_scaled = principal.checked_mul(REFINANCE_THRESHOLD_PCT)?;
    Some(repaid_scaled >= required_scaled)
}

/// Rate after one refinance: lowered by one step, never below the floor.
/// A rate already at or below the floor is left untouched.
pub fn next_interest_rate(current: u32) -> u32 {
    if current <= MIN_INTEREST_RATE {
        return current;
    }
    current
        .saturating_sub(REFINANCE_RATE_STEP)
        .max(MIN_INTEREST_RATE)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn presale_config() -> PresaleConfig {
        PresaleConfig {
            soft_cap: 50_000 * SCALE,
            hard_cap: 100_000 * SCALE,
            unit_price: 3 * SCALE / 100,
            window_start: 1_741_132_800,
            window_end: 1_742_860_800,
            min_purchase: 10 * SCALE,
            max_purchase: 5_000 * SCALE,
        }
    }

    #[test]
    fn test_required_payment_ten_percent() {
        let required = calculate_required_payment(1_000 * SCALE, 10).unwrap();

        // Expected: 1,000 × 10% = 100
        assert_eq!(required, 100 * SCALE);
    }

    #[test]
    fn test_required_payment_truncates() {
        // 999 × 15 / 100 = 149.85 -> 149
        assert_eq!(calculate_required_payment(999, 15), Some(149));
        assert_eq!(calculate_required_payment(1, 1), Some(0));
    }

    #[test]
    fn test_tokens_for_payment() {
        let unit_price = 3 * SCALE / 100; // 0.03

        let tokens = calculate_tokens_for_payment(30 * SCALE, unit_price).unwrap();
        assert_eq!(tokens, 1_000 * SCALE);

        // 5,000 × 10^18 × 10^18 does not fit in i128, the split must still be exact
        let tokens = calculate_tokens_for_payment(5_000 * SCALE, unit_price).unwrap();
        assert_eq!(tokens, 166_666 * SCALE + 666_666_666_666_666_666);
    }

    #[test]
    fn test_mul_div_floor_matches_naive() {
        assert_eq!(mul_div_floor(7, 3, 2), Some(10));
        assert_eq!(mul_div_floor(100, 100, 7), Some(1428));
        assert_eq!(mul_div_floor(0, 5, 3), Some(0));
        assert_eq!(mul_div_floor(5, 5, 0), None);
        assert_eq!(mul_div_floor(-1, 5, 3), None);
    }

    #[test]
    fn test_fraction_bounds() {
        assert!(!is_valid_fraction(0));
        assert!(is_valid_fraction(1));
        assert!(is_valid_fraction(100));
        assert!(!is_valid_fraction(101));
    }

    #[test]
    fn test_refinance_threshold() {
        let principal = 1_000 * SCALE;
        assert_eq!(meets_refinance_threshold(750 * SCALE, principal), Some(true));
        assert_eq!(meets_refinance_threshold(750 * SCALE - 1, principal), Some(false));
        assert_eq!(meets_refinance_threshold(principal, principal), Some(true));

        // 3 of 4 is exactly 75%
        assert_eq!(meets_refinance_threshold(3, 4), Some(true));
        assert_eq!(meets_refinance_threshold(2, 4), Some(false));
    }

    #[test]
    fn test_next_interest_rate_floor() {
        assert_eq!(next_interest_rate(10), 8);
        assert_eq!(next_interest_rate(4), 2);
        assert_eq!(next_interest_rate(3), 2);
        assert_eq!(next_interest_rate(2), 2);
        assert_eq!(next_interest_rate(1), 1);
    }

    #[test]
    fn test_presale_config_validation() {
        assert_eq!(validate_presale_config(&presale_config()), Ok(()));

        let mut config = presale_config();
        config.window_end = config.window_start;
        assert_eq!(validate_presale_config(&config), Err(Error::InvalidConfig));

        let mut config = presale_config();
        config.soft_cap = config.hard_cap + 1;
        assert_eq!(validate_presale_config(&config), Err(Error::InvalidConfig));

        let mut config = presale_config();
        config.min_purchase = config.max_purchase + 1;
        assert_eq!(validate_presale_config(&config), Err(Error::InvalidConfig));

        let mut config = presale_config();
        config.unit_price = 0;
        assert_eq!(validate_presale_config(&config), Err(Error::InvalidConfig));
    }
}
