//! Show the mirrored cart.

use anyhow::Result;
use serde::Serialize;
use storefront_commerce::cart::{CartAction, CartLineItem, CartState};
use storefront_commerce::checkout::CheckoutTotals;
use storefront_commerce::mirror::read_mirrored;

use super::CartArgs;
use crate::context::Context;

#[derive(Serialize)]
struct MirroredCart<'a> {
    items: &'a [CartLineItem],
    #[serde(skip_serializing_if = "Option::is_none")]
    totals: Option<CheckoutTotals>,
}

/// Run the cart command.
pub fn run(args: CartArgs, ctx: &Context) -> Result<()> {
    if ctx.config.mirror.dir.is_none() {
        ctx.output
            .warn("mirror.dir is not configured; nothing is kept between runs");
    }

    let cache = ctx.mirror_cache()?;
    let items = read_mirrored(&cache, &ctx.config.mirror.key);

    let totals = if args.totals {
        // Rebuild the aggregates from the snapshot; the mirror stores items only.
        let state = items
            .iter()
            .cloned()
            .fold(CartState::new(ctx.config.currency), |state, item| {
                state.reduce(CartAction::AddItem { item })
            });
        Some(ctx.config.checkout.totals_for(&state))
    } else {
        None
    };

    if ctx.output.is_json() {
        ctx.output.json(&MirroredCart {
            items: &items,
            totals,
        });
        return Ok(());
    }

    ctx.output.header("Mirrored cart");
    ctx.output.line_items(&items);
    if let Some(totals) = totals {
        ctx.output.totals(&totals);
    }

    Ok(())
}
