//! Checkout module.
//!
//! Fees and totals a customer sees before placing an order. These are pure
//! functions of the cart subtotal and are never stored in the cart.

mod fees;

pub use fees::{CheckoutPolicy, CheckoutTotals};
