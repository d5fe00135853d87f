//! Property-based tests for the cart reducer.
//!
//! Random action sequences must never let the aggregates drift from the
//! items, and must never leave an entry with a non-positive quantity.

use proptest::prelude::*;
use storefront_commerce::prelude::*;

fn sar(cents: i64) -> Money {
    Money::new(cents, Currency::SAR)
}

fn item_strategy() -> impl Strategy<Value = CartLineItem> {
    (
        1u32..5,
        prop::collection::vec(
            prop::sample::select(vec!["garlic", "cocktail", "spicy"]),
            0..3,
        ),
        prop::option::of(prop::sample::select(vec!["drink1", "side1"])),
        -1i64..6,
        0i64..500,
    )
        .prop_map(|(id, sauces, add_on, quantity, surcharge)| {
            let mut configuration = Configuration::new();
            if !sauces.is_empty() {
                configuration = configuration
                    .with_selection("sauce", sauces.into_iter().map(OptionId::new));
            }
            if let Some(add_on) = add_on {
                configuration = configuration.with_related_item(add_on);
            }
            let base = sar(1_000 + i64::from(id) * 250);
            CartLineItem::new(ProductId::new(id), format!("Product {}", id), base, quantity)
                .with_configuration(configuration, sar(base.amount_cents + surcharge))
        })
}

fn action_strategy() -> impl Strategy<Value = CartAction> {
    prop_oneof![
        4 => item_strategy().prop_map(|item| CartAction::AddItem { item }),
        1 => (1u32..5).prop_map(|id| CartAction::RemoveItem {
            product_id: ProductId::new(id),
        }),
        2 => (1u32..5, -2i64..8).prop_map(|(id, quantity)| CartAction::UpdateQuantity {
            product_id: ProductId::new(id),
            quantity,
        }),
        1 => Just(CartAction::ClearLastAdded),
        1 => Just(CartAction::ClearCart),
    ]
}

fn check_aggregates(state: &CartState) -> Result<(), TestCaseError> {
    let items: i64 = state.items().iter().map(|i| i.quantity).sum();
    let cents: i64 = state
        .items()
        .iter()
        .map(|i| i.effective_unit_price.amount_cents * i.quantity)
        .sum();
    prop_assert_eq!(state.total_items(), items);
    prop_assert_eq!(state.total_price().amount_cents, cents);
    prop_assert!(state.items().iter().all(|i| i.quantity > 0));
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn aggregates_match_items(actions in prop::collection::vec(action_strategy(), 0..40)) {
        let mut state = CartState::default();
        for action in actions {
            state = state.reduce(action);
            check_aggregates(&state)?;
        }
    }

    #[test]
    fn entries_stay_distinct(actions in prop::collection::vec(action_strategy(), 0..40)) {
        let mut store = CartStore::new();
        for action in actions {
            let state = store.dispatch(action);
            for (i, a) in state.items().iter().enumerate() {
                for b in &state.items()[i + 1..] {
                    prop_assert!(!a.same_entry(b));
                }
            }
        }
    }

    #[test]
    fn add_then_remove_leaves_no_entries(item in item_strategy()) {
        prop_assume!(item.quantity > 0);
        let product_id = item.product_id;

        let state = CartState::default()
            .reduce(CartAction::AddItem { item })
            .reduce(CartAction::RemoveItem { product_id });
        prop_assert!(state.is_empty());
        prop_assert_eq!(state.total_price(), sar(0));
    }

    #[test]
    fn service_fee_is_half_up_five_percent(cents in 0i64..10_000_000) {
        let totals = CheckoutPolicy::default().totals(sar(cents));
        // round(cents * 5 / 100) with halves going up
        let expected = (cents * 5 + 50) / 100;
        prop_assert_eq!(totals.service_fee.amount_cents, expected);
        prop_assert_eq!(
            totals.final_total.amount_cents,
            cents + totals.delivery_fee.amount_cents + expected
        );
    }
}
