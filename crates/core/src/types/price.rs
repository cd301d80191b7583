//! Type-safe price representation using decimal arithmetic.

use core::fmt;
use core::iter::Sum;
use core::ops::Add;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A product price.
///
/// The remote catalog sends prices either as JSON numbers or numeric
/// strings; both deserialize into the same decimal amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    /// A price of zero.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Get the underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Price of `quantity` units, saturating at the largest representable
    /// amount.
    #[must_use]
    pub fn times(self, quantity: u32) -> Self {
        self.0
            .checked_mul(Decimal::from(quantity))
            .map_or_else(|| Self::saturated(self.0.is_sign_negative()), Self)
    }

    const fn saturated(negative: bool) -> Self {
        if negative {
            Self(Decimal::MIN)
        } else {
            Self(Decimal::MAX)
        }
    }

    /// Format for display, e.g. `$12.345,50`.
    ///
    /// Uses `.` to group thousands and `,` before the two decimal places.
    #[must_use]
    pub fn display(&self) -> String {
        let rounded = self.0.round_dp(2);
        let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
            "-"
        } else {
            ""
        };
        let text = format!("{:.2}", rounded.abs());
        let (whole, cents) = text.split_once('.').unwrap_or((text.as_str(), "00"));

        let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
        for (i, digit) in whole.chars().enumerate() {
            if i > 0 && (whole.len() - i) % 3 == 0 {
                grouped.push('.');
            }
            grouped.push(digit);
        }

        format!("{sign}${grouped},{cents}")
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

impl From<Decimal> for Price {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}

impl Add for Price {
    type Output = Self;

    /// Saturates instead of overflowing.
    fn add(self, rhs: Self) -> Self {
        self.0
            .checked_add(rhs.0)
            .map_or_else(|| Self::saturated(rhs.0.is_sign_negative()), Self)
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn price(s: &str) -> Price {
        Price::new(s.parse().unwrap())
    }

    #[test]
    fn test_display_groups_thousands() {
        assert_eq!(price("12345.5").display(), "$12.345,50");
        assert_eq!(price("1234567").display(), "$1.234.567,00");
    }

    #[test]
    fn test_display_small_amounts() {
        assert_eq!(price("0").display(), "$0,00");
        assert_eq!(price("999.999").display(), "$1.000,00");
        assert_eq!(price("42.1").display(), "$42,10");
    }

    #[test]
    fn test_display_negative() {
        assert_eq!(price("-1500").display(), "-$1.500,00");
    }

    #[test]
    fn test_deserialize_number_and_string() {
        let from_number: Price = serde_json::from_str("1500.25").unwrap();
        let from_string: Price = serde_json::from_str("\"1500.25\"").unwrap();
        assert_eq!(from_number, from_string);
        assert_eq!(from_number.display(), "$1.500,25");
    }

    #[test]
    fn test_times_and_sum() {
        let total: Price = [price("10.5").times(2), price("4")].into_iter().sum();
        assert_eq!(total, price("25"));
    }

    #[test]
    fn test_arithmetic_saturates() {
        let huge = price("50000000000000000000000000000");
        assert_eq!(huge.times(2), Price::new(Decimal::MAX));
        assert_eq!(huge + huge, Price::new(Decimal::MAX));
        assert_eq!(
            price("-50000000000000000000000000000").times(3),
            Price::new(Decimal::MIN)
        );

        let total: Price = [huge, huge, price("1")].into_iter().sum();
        assert_eq!(total, Price::new(Decimal::MAX));
        assert!(total.display().starts_with("$79.228"));
    }
}
