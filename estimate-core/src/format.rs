//! Currency text for estimates.
//!
//! Only one locale/currency pair is supported: Russian grouping with the
//! ruble sign, no fraction digits.
//!
//! ```
//! use estimate_core::CurrencyFormat;
//! use rust_decimal_macros::dec;
//!
//! assert_eq!(CurrencyFormat::RU_RUB.format(dec!(1750000)), "1\u{a0}750\u{a0}000\u{a0}₽");
//! ```

use rust_decimal::Decimal;

use crate::calculations::common::round_whole;
use crate::models::EstimateResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrencyFormat {
    pub group_separator: char,
    pub group_size: usize,
    /// Integers with fewer digits than `group_size + min_grouping_digits` are
    /// not grouped.
    pub min_grouping_digits: usize,
    pub symbol: &'static str,
    pub symbol_separator: char,
}

impl CurrencyFormat {
    /// ru-RU, RUB: `1 750 000 ₽` with no-break spaces.
    pub const RU_RUB: CurrencyFormat = CurrencyFormat {
        group_separator: '\u{a0}',
        group_size: 3,
        min_grouping_digits: 1,
        symbol: "₽",
        symbol_separator: '\u{a0}',
    };

    /// Formats an amount, rounding it half-up to whole units first.
    pub fn format(
        &self,
        amount: Decimal,
    ) -> String {
        let rounded = round_whole(amount);
        let digits = rounded.abs().trunc().to_string();

        let mut out = String::with_capacity(digits.len() * 2 + self.symbol.len() + 2);
        if rounded.is_sign_negative() && !rounded.is_zero() {
            out.push('-');
        }
        out.push_str(&self.group(&digits));
        out.push(self.symbol_separator);
        out.push_str(self.symbol);
        out
    }

    pub fn format_result(
        &self,
        result: &EstimateResult,
    ) -> String {
        self.format(result.amount())
    }

    fn group(
        &self,
        digits: &str,
    ) -> String {
        if self.group_size == 0 || digits.len() < self.group_size + self.min_grouping_digits {
            return digits.to_string();
        }

        let mut grouped = String::with_capacity(digits.len() * 2);
        let lead = digits.len() % self.group_size;
        for (idx, ch) in digits.chars().enumerate() {
            if idx > 0 && (idx + self.group_size - lead) % self.group_size == 0 {
                grouped.push(self.group_separator);
            }
            grouped.push(ch);
        }
        grouped
    }
}

impl Default for CurrencyFormat {
    fn default() -> Self {
        Self::RU_RUB
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    const NBSP: char = '\u{a0}';

    fn ru(amount: Decimal) -> String {
        CurrencyFormat::RU_RUB.format(amount)
    }

    #[test]
    fn groups_millions_with_no_break_spaces() {
        assert_eq!(ru(dec!(1750000)), format!("1{NBSP}750{NBSP}000{NBSP}₽"));
    }

    #[test]
    fn groups_billions() {
        assert_eq!(
            ru(dec!(1092000000)),
            format!("1{NBSP}092{NBSP}000{NBSP}000{NBSP}₽")
        );
    }

    #[test]
    fn four_digit_amounts_are_grouped() {
        assert_eq!(ru(dec!(1000)), format!("1{NBSP}000{NBSP}₽"));
        assert_eq!(ru(dec!(5000)), format!("5{NBSP}000{NBSP}₽"));
    }

    #[test]
    fn two_digit_minimum_skips_four_digit_grouping() {
        let format = CurrencyFormat {
            min_grouping_digits: 2,
            ..CurrencyFormat::RU_RUB
        };

        assert_eq!(format.format(dec!(1000)), format!("1000{NBSP}₽"));
        assert_eq!(format.format(dec!(10000)), format!("10{NBSP}000{NBSP}₽"));
    }

    #[test]
    fn five_digit_amounts_are_grouped() {
        assert_eq!(ru(dec!(12345)), format!("12{NBSP}345{NBSP}₽"));
    }

    #[test]
    fn small_amounts_are_not_grouped() {
        assert_eq!(ru(dec!(0)), format!("0{NBSP}₽"));
        assert_eq!(ru(dec!(999)), format!("999{NBSP}₽"));
    }

    #[test]
    fn fractions_are_rounded_half_up() {
        assert_eq!(ru(dec!(12344.5)), format!("12{NBSP}345{NBSP}₽"));
        assert_eq!(ru(dec!(12345.49)), format!("12{NBSP}345{NBSP}₽"));
    }

    #[test]
    fn negative_amounts_keep_sign() {
        assert_eq!(ru(dec!(-54321)), format!("-54{NBSP}321{NBSP}₽"));
    }
}
