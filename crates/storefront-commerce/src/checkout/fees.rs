//! Delivery and service fees.

use crate::cart::CartState;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Fee schedule, in minor units of the cart currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckoutPolicy {
    /// Delivery is free when the subtotal is strictly above this.
    pub free_delivery_above_cents: i64,
    /// Flat delivery fee otherwise.
    pub delivery_fee_cents: i64,
    /// Service fee rate in basis points (500 = 5%).
    pub service_fee_bps: u32,
}

impl Default for CheckoutPolicy {
    fn default() -> Self {
        Self {
            free_delivery_above_cents: 5_000,
            delivery_fee_cents: 500,
            service_fee_bps: 500,
        }
    }
}

impl CheckoutPolicy {
    /// Delivery fee for a subtotal.
    pub fn delivery_fee(&self, subtotal: Money) -> Money {
        if subtotal.amount_cents > self.free_delivery_above_cents {
            Money::zero(subtotal.currency)
        } else {
            Money::new(self.delivery_fee_cents, subtotal.currency)
        }
    }

    /// Service fee for a subtotal, rounded half up to the minor unit.
    pub fn service_fee(&self, subtotal: Money) -> Money {
        subtotal.basis_points(self.service_fee_bps)
    }

    /// Full breakdown for a subtotal.
    pub fn totals(&self, subtotal: Money) -> CheckoutTotals {
        let delivery_fee = self.delivery_fee(subtotal);
        let service_fee = self.service_fee(subtotal);
        CheckoutTotals {
            subtotal,
            delivery_fee,
            service_fee,
            final_total: subtotal.saturating_add(&delivery_fee).saturating_add(&service_fee),
            free_delivery_remaining: Money::new(
                self.free_delivery_above_cents
                    .saturating_sub(subtotal.amount_cents)
                    .max(0),
                subtotal.currency,
            ),
        }
    }

    /// Full breakdown for a cart.
    pub fn totals_for(&self, cart: &CartState) -> CheckoutTotals {
        self.totals(cart.total_price())
    }
}

/// Price breakdown shown at checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutTotals {
    pub subtotal: Money,
    pub delivery_fee: Money,
    pub service_fee: Money,
    pub final_total: Money,
    /// How much more the customer needs to add to reach the free-delivery
    /// threshold; zero once it is reached.
    pub free_delivery_remaining: Money,
}

impl CheckoutTotals {
    /// Whether delivery is free.
    pub fn free_delivery(&self) -> bool {
        self.delivery_fee.is_zero()
    }

    /// Whether to show the "add more for free delivery" hint.
    pub fn show_free_delivery_hint(&self) -> bool {
        self.free_delivery_remaining.is_positive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Currency;

    fn sar(cents: i64) -> Money {
        Money::new(cents, Currency::SAR)
    }

    #[test]
    fn test_below_threshold() {
        let totals = CheckoutPolicy::default().totals(sar(4_500));
        assert_eq!(totals.delivery_fee, sar(500));
        assert_eq!(totals.service_fee, sar(225));
        assert_eq!(totals.final_total, sar(5_225));
        assert!(!totals.free_delivery());
        assert_eq!(totals.free_delivery_remaining, sar(500));
        assert!(totals.show_free_delivery_hint());
    }

    #[test]
    fn test_above_threshold() {
        let totals = CheckoutPolicy::default().totals(sar(6_000));
        assert_eq!(totals.delivery_fee, sar(0));
        assert_eq!(totals.service_fee, sar(300));
        assert_eq!(totals.final_total, sar(6_300));
        assert!(totals.free_delivery());
        assert!(!totals.show_free_delivery_hint());
    }

    #[test]
    fn test_threshold_is_strict() {
        let totals = CheckoutPolicy::default().totals(sar(5_000));
        assert_eq!(totals.delivery_fee, sar(500));
        assert!(!totals.show_free_delivery_hint());

        let just_over = CheckoutPolicy::default().totals(sar(5_001));
        assert!(just_over.free_delivery());
    }

    #[test]
    fn test_service_fee_rounding() {
        // 5% of 12.34 = 0.617 -> 0.62
        assert_eq!(CheckoutPolicy::default().service_fee(sar(1_234)), sar(62));
        // 5% of 0.50 = 0.025 -> 0.03
        assert_eq!(CheckoutPolicy::default().service_fee(sar(50)), sar(3));
    }

    #[test]
    fn test_empty_cart_still_charges_delivery() {
        let totals = CheckoutPolicy::default().totals_for(&CartState::default());
        assert_eq!(totals.delivery_fee, sar(500));
        assert_eq!(totals.final_total, sar(500));
    }

    #[test]
    fn test_custom_policy() {
        let policy = CheckoutPolicy {
            free_delivery_above_cents: 10_000,
            delivery_fee_cents: 1_000,
            service_fee_bps: 0,
        };
        let totals = policy.totals(sar(6_000));
        assert_eq!(totals.delivery_fee, sar(1_000));
        assert_eq!(totals.service_fee, sar(0));
        assert_eq!(totals.final_total, sar(7_000));
    }
}
