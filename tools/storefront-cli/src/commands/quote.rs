//! Checkout quote for an arbitrary subtotal.

use anyhow::{bail, Context as _, Result};
use storefront_commerce::money::Money;

use super::QuoteArgs;
use crate::context::Context;

/// Run the quote command.
pub fn run(args: QuoteArgs, ctx: &Context) -> Result<()> {
    let amount: f64 = args
        .amount
        .trim()
        .parse()
        .with_context(|| format!("Invalid amount: {}", args.amount))?;
    if !amount.is_finite() || amount < 0.0 {
        bail!("Amount must be a non-negative number, got {}", args.amount);
    }

    let subtotal = Money::from_decimal(amount, ctx.config.currency);
    let totals = ctx.config.checkout.totals(subtotal);

    if ctx.output.is_json() {
        ctx.output.json(&totals);
    } else {
        ctx.output.totals(&totals);
    }

    Ok(())
}
