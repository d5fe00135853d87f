//! Money type for representing monetary values.
//!
//! Uses an integer count of minor units (halalas, paise, cents) so cart
//! totals and checkout fees stay exact.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Supported currencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Currency {
    /// Saudi riyal.
    #[default]
    SAR,
    INR,
    USD,
    EUR,
}

impl Currency {
    /// Get the currency code (e.g., "SAR").
    pub fn code(&self) -> &'static str {
        match self {
            Currency::SAR => "SAR",
            Currency::INR => "INR",
            Currency::USD => "USD",
            Currency::EUR => "EUR",
        }
    }

    /// Get the currency symbol.
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::SAR => "SR",
            Currency::INR => "\u{20b9}",
            Currency::USD => "$",
            Currency::EUR => "\u{20ac}",
        }
    }

    /// Whether the symbol is written after the amount ("25.00 SR").
    pub fn symbol_trails(&self) -> bool {
        matches!(self, Currency::SAR)
    }

    /// Number of decimal places in the minor unit.
    pub fn decimal_places(&self) -> u32 {
        2
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A monetary value with currency.
///
/// Amounts are stored in the smallest unit of the currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Money {
    /// Amount in smallest currency unit.
    pub amount_cents: i64,
    /// The currency.
    pub currency: Currency,
}

impl Money {
    /// Create a new Money value from minor units.
    pub const fn new(amount_cents: i64, currency: Currency) -> Self {
        Self {
            amount_cents,
            currency,
        }
    }

    /// Create a Money value from whole major units.
    ///
    /// ```
    /// use storefront_commerce::money::{Money, Currency};
    /// assert_eq!(Money::whole(25, Currency::SAR).amount_cents, 2500);
    /// ```
    pub const fn whole(units: i64, currency: Currency) -> Self {
        Self::new(units * 100, currency)
    }

    /// Create a Money value from a decimal amount.
    ///
    /// ```
    /// use storefront_commerce::money::{Money, Currency};
    /// let price = Money::from_decimal(49.99, Currency::SAR);
    /// assert_eq!(price.amount_cents, 4999);
    /// ```
    pub fn from_decimal(amount: f64, currency: Currency) -> Self {
        let multiplier = 10_i64.pow(currency.decimal_places());
        let amount_cents = (amount * multiplier as f64).round() as i64;
        Self::new(amount_cents, currency)
    }

    /// Create a zero amount in the given currency.
    pub const fn zero(currency: Currency) -> Self {
        Self::new(0, currency)
    }

    /// Check if this is zero.
    pub fn is_zero(&self) -> bool {
        self.amount_cents == 0
    }

    /// Check if this is positive.
    pub fn is_positive(&self) -> bool {
        self.amount_cents > 0
    }

    /// Format as a display string (e.g., "25.00 SR", "$49.99").
    pub fn display(&self) -> String {
        if self.currency.symbol_trails() {
            format!("{} {}", self.display_amount(), self.currency.symbol())
        } else {
            format!("{}{}", self.currency.symbol(), self.display_amount())
        }
    }

    /// Format without symbol (e.g., "49.99").
    ///
    /// Built from the integer amount so no float rounding leaks into output.
    pub fn display_amount(&self) -> String {
        let places = self.currency.decimal_places();
        let divisor = 10_i64.pow(places);
        let sign = if self.amount_cents < 0 { "-" } else { "" };
        let abs = self.amount_cents.unsigned_abs();
        format!(
            "{}{}.{:0width$}",
            sign,
            abs / divisor as u64,
            abs % divisor as u64,
            width = places as usize
        )
    }

    /// Add an amount in the same currency, saturating at the numeric bounds.
    ///
    /// The other value's currency is ignored; callers keep a single
    /// currency per cart.
    pub fn saturating_add(&self, other: &Money) -> Money {
        Money::new(
            self.amount_cents.saturating_add(other.amount_cents),
            self.currency,
        )
    }

    /// Multiply by a scalar, saturating at the numeric bounds.
    pub fn saturating_mul(&self, factor: i64) -> Money {
        Money::new(self.amount_cents.saturating_mul(factor), self.currency)
    }

    /// Take a fraction expressed in basis points (1/100 of a percent),
    /// rounding half away from zero to the nearest minor unit.
    ///
    /// ```
    /// use storefront_commerce::money::{Money, Currency};
    /// // 5% of 45.00
    /// assert_eq!(Money::whole(45, Currency::SAR).basis_points(500).amount_cents, 225);
    /// ```
    pub fn basis_points(&self, bps: u32) -> Money {
        let product = self.amount_cents as i128 * bps as i128;
        let half = 5_000_i128;
        let rounded = if product >= 0 {
            (product + half) / 10_000
        } else {
            (product - half) / 10_000
        };
        let clamped = rounded.clamp(i64::MIN as i128, i64::MAX as i128) as i64;
        Money::new(clamped, self.currency)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_from_decimal() {
        let m = Money::from_decimal(49.99, Currency::USD);
        assert_eq!(m.amount_cents, 4999);
        assert_eq!(Money::from_decimal(2.25, Currency::SAR).amount_cents, 225);
    }

    #[test]
    fn test_money_display() {
        assert_eq!(Money::new(4999, Currency::USD).display(), "$49.99");
        assert_eq!(Money::whole(25, Currency::SAR).display(), "25.00 SR");
        assert_eq!(Money::new(5, Currency::INR).display(), "\u{20b9}0.05");
        assert_eq!(Money::new(-250, Currency::USD).display_amount(), "-2.50");
    }

    #[test]
    fn test_saturating_mul() {
        let m = Money::new(1000, Currency::SAR);
        assert_eq!(m.saturating_mul(3).amount_cents, 3000);
        assert_eq!(Money::new(i64::MAX, Currency::SAR).saturating_mul(2).amount_cents, i64::MAX);
    }

    #[test]
    fn test_basis_points_rounds_half_up() {
        // 0.05 * 0.10 = 0.005 -> 0.01
        assert_eq!(Money::new(10, Currency::SAR).basis_points(500).amount_cents, 1);
        // 0.05 * 0.09 = 0.0045 -> 0.00
        assert_eq!(Money::new(9, Currency::SAR).basis_points(500).amount_cents, 0);
        assert_eq!(Money::whole(60, Currency::SAR).basis_points(500).amount_cents, 300);
    }
}
