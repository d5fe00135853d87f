//! Scripted cart sessions.
//!
//! A replay file is a JSON array of steps, each tagged with `op`:
//!
//! ```json
//! [
//!   { "op": "add", "product_id": 1, "quantity": 2,
//!     "selections": { "sauce": ["garlic"] }, "related_items": ["drink1"] },
//!   { "op": "quick_add", "product_id": 6 },
//!   { "op": "quick_remove", "product_id": 6 },
//!   { "op": "update", "product_id": 1, "quantity": 1 },
//!   { "op": "remove", "product_id": 3 },
//!   { "op": "clear_last_added" },
//!   { "op": "clear" },
//!   { "op": "action", "action": { "type": "clear_cart" } }
//! ]
//! ```

use std::collections::{BTreeMap, BTreeSet};
use std::fs;

use anyhow::{Context as _, Result};
use serde::{Deserialize, Serialize};
use storefront_commerce::cart::{
    quick_add, CartAction, CartState, CartStore, ProductConfigurator, QuantityLimits,
};
use storefront_commerce::catalog::Menu;
use storefront_commerce::checkout::CheckoutTotals;
use storefront_commerce::ids::{GroupId, OptionId, ProductId, RelatedItemId};
use storefront_commerce::CommerceError;
use tracing::{debug, info};

use super::ReplayArgs;
use crate::context::Context;

/// One customer interaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Step {
    /// Configure a product and add it, as the customization view does.
    Add {
        product_id: ProductId,
        #[serde(default = "default_quantity")]
        quantity: i64,
        #[serde(default)]
        selections: BTreeMap<GroupId, Vec<OptionId>>,
        #[serde(default)]
        related_items: BTreeSet<RelatedItemId>,
    },
    /// Grid "+" button.
    QuickAdd { product_id: ProductId },
    /// Grid "−" button.
    QuickRemove { product_id: ProductId },
    Remove { product_id: ProductId },
    Update { product_id: ProductId, quantity: i64 },
    ClearLastAdded,
    Clear,
    /// A raw reducer action.
    Action { action: CartAction },
}

fn default_quantity() -> i64 {
    1
}

impl Step {
    fn name(&self) -> &'static str {
        match self {
            Step::Add { .. } => "add",
            Step::QuickAdd { .. } => "quick_add",
            Step::QuickRemove { .. } => "quick_remove",
            Step::Remove { .. } => "remove",
            Step::Update { .. } => "update",
            Step::ClearLastAdded => "clear_last_added",
            Step::Clear => "clear",
            Step::Action { .. } => "action",
        }
    }
}

/// A step that could not be applied.
#[derive(Debug, Serialize)]
pub struct Rejected {
    pub index: usize,
    pub op: &'static str,
    pub reason: String,
}

#[derive(Serialize)]
struct ReplayReport<'a> {
    cart: &'a CartState,
    totals: CheckoutTotals,
    rejected: &'a [Rejected],
}

/// Run the replay command.
pub fn run(args: ReplayArgs, ctx: &Context) -> Result<()> {
    let path = ctx.resolve_path(&args.file);
    let content = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let steps: Vec<Step> = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse steps in {}", path.display()))?;

    let menu = ctx.menu();
    let mut store = CartStore::with_currency(ctx.config.currency);
    if !args.no_mirror {
        if let Some(mirror) = ctx.mirror()? {
            debug!(key = mirror.key(), "mirroring cart");
            store = store.with_mirror(mirror);
        }
    }

    let mut rejected = Vec::new();
    for (index, step) in steps.into_iter().enumerate() {
        let op = step.name();
        if let Err(e) = apply_step(&mut store, &menu, ctx.config.ordering, step) {
            ctx.output.warn(&format!("Step {} ({}) rejected: {}", index + 1, op, e));
            rejected.push(Rejected {
                index,
                op,
                reason: e.to_string(),
            });
            continue;
        }
        if args.trace_steps {
            ctx.output.header(&format!("After step {} ({})", index + 1, op));
            ctx.output.cart(store.state());
        }
    }

    let state = store.state();
    let totals = ctx.config.checkout.totals_for(state);
    info!(
        entries = state.unique_item_count(),
        total_items = state.total_items(),
        rejected = rejected.len(),
        "replay finished"
    );

    if ctx.output.is_json() {
        ctx.output.json(&ReplayReport {
            cart: state,
            totals,
            rejected: &rejected,
        });
        return Ok(());
    }

    ctx.output.header("Cart");
    ctx.output.cart(state);
    if let Some(last) = state.last_added_product_id() {
        if let Some(product) = menu.product(last) {
            ctx.output.success(&format!("Last added: {}", product.name));
        }
    }
    ctx.output.totals(&totals);

    Ok(())
}

/// Apply one step to the store.
///
/// Only configuration errors fail a step; store operations themselves
/// never fail.
pub fn apply_step(
    store: &mut CartStore,
    menu: &Menu,
    limits: QuantityLimits,
    step: Step,
) -> Result<(), CommerceError> {
    match step {
        Step::Add {
            product_id,
            quantity,
            selections,
            related_items,
        } => {
            let product = menu.require_product(product_id)?;
            let mut configurator = ProductConfigurator::new(product).with_limits(limits);
            for (group, options) in &selections {
                for option in options {
                    configurator.select(group, option)?;
                }
            }
            for item in &related_items {
                configurator.toggle_related_item(item)?;
            }
            configurator.set_quantity(quantity);
            store.add_item(configurator.build()?);
        }
        Step::QuickAdd { product_id } => {
            let product = menu.require_product(product_id)?;
            store.add_item(quick_add(product));
        }
        Step::QuickRemove { product_id } => {
            store.quick_remove(product_id);
        }
        Step::Remove { product_id } => {
            store.remove_item(product_id);
        }
        Step::Update {
            product_id,
            quantity,
        } => {
            store.update_quantity(product_id, quantity);
        }
        Step::ClearLastAdded => {
            store.clear_last_added();
        }
        Step::Clear => {
            store.clear_cart();
        }
        Step::Action { action } => {
            store.dispatch(action);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use storefront_commerce::money::{Currency, Money};

    fn replay(json: &str) -> (CartStore, Vec<Result<(), CommerceError>>) {
        let steps: Vec<Step> = serde_json::from_str(json).unwrap();
        let menu = Menu::sample();
        let mut store = CartStore::new();
        let results = steps
            .into_iter()
            .map(|step| apply_step(&mut store, &menu, QuantityLimits::default(), step))
            .collect();
        (store, results)
    }

    #[test]
    fn test_add_with_selections() {
        let (store, results) = replay(
            r#"[
                { "op": "add", "product_id": 1, "quantity": 2,
                  "selections": { "sauce": ["garlic"] }, "related_items": ["drink1"] },
                { "op": "add", "product_id": 1,
                  "selections": { "sauce": ["garlic"] }, "related_items": ["drink1"] }
            ]"#,
        );
        assert!(results.iter().all(Result::is_ok));
        assert_eq!(store.state().unique_item_count(), 1);
        assert_eq!(store.state().total_items(), 3);
        assert_eq!(store.state().total_price(), Money::whole(96, Currency::SAR));
    }

    #[test]
    fn test_rejected_step_leaves_cart_alone() {
        let (store, results) = replay(
            r#"[
                { "op": "quick_add", "product_id": 6 },
                { "op": "add", "product_id": 2 },
                { "op": "add", "product_id": 6, "quantity": 11 },
                { "op": "quick_add", "product_id": 42 }
            ]"#,
        );
        assert!(results[0].is_ok());
        assert!(matches!(
            results[1],
            Err(CommerceError::MissingRequiredSelection(_))
        ));
        assert!(matches!(
            results[2],
            Err(CommerceError::QuantityExceedsLimit(11, 10))
        ));
        assert!(matches!(results[3], Err(CommerceError::ProductNotFound(_))));
        assert_eq!(store.state().total_items(), 1);
    }

    #[test]
    fn test_grid_and_raw_actions() {
        let (store, results) = replay(
            r#"[
                { "op": "quick_add", "product_id": 3 },
                { "op": "quick_add", "product_id": 3 },
                { "op": "quick_remove", "product_id": 3 },
                { "op": "quick_add", "product_id": 5 },
                { "op": "action", "action": { "type": "remove_item", "product_id": 5 } },
                { "op": "clear_last_added" }
            ]"#,
        );
        assert!(results.iter().all(Result::is_ok));
        assert_eq!(store.product_quantity(ProductId::new(3)), 1);
        assert_eq!(store.product_quantity(ProductId::new(5)), 0);
        assert_eq!(store.state().last_added_product_id(), None);
    }

    #[test]
    fn test_repeated_add_on_counts_once() {
        let (store, results) = replay(
            r#"[
                { "op": "add", "product_id": 1, "related_items": ["drink1", "drink1"] }
            ]"#,
        );
        assert!(results.iter().all(Result::is_ok));
        assert_eq!(store.state().total_price(), Money::whole(30, Currency::SAR));
        assert_eq!(store.state().items()[0].configuration.related_items().len(), 1);
    }
}
