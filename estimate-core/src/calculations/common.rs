//! Common utility functions for cost calculations.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds a decimal value to whole currency units using half-up rounding.
///
/// Values at exactly .5 are rounded away from zero, which is half-up for the
/// non-negative amounts the estimator produces.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use estimate_core::calculations::common::round_whole;
///
/// assert_eq!(round_whole(dec!(1749999.4)), dec!(1749999));
/// assert_eq!(round_whole(dec!(1749999.5)), dec!(1750000));
/// assert_eq!(round_whole(dec!(1750000.0)), dec!(1750000));
/// ```
pub fn round_whole(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn round_whole_rounds_down_below_midpoint() {
        let result = round_whole(dec!(100.49));

        assert_eq!(result, dec!(100));
    }

    #[test]
    fn round_whole_rounds_up_at_midpoint() {
        let result = round_whole(dec!(100.5));

        assert_eq!(result, dec!(101));
    }

    #[test]
    fn round_whole_rounds_up_above_midpoint() {
        let result = round_whole(dec!(100.51));

        assert_eq!(result, dec!(101));
    }

    #[test]
    fn round_whole_drops_trailing_zero_scale() {
        let result = round_whole(dec!(2970000.000));

        assert_eq!(result, dec!(2970000));
        assert_eq!(result.scale(), 0);
    }

    #[test]
    fn round_whole_handles_zero() {
        let result = round_whole(Decimal::ZERO);

        assert_eq!(result, dec!(0));
    }
}
