//! Cart state and its reducer.
//!
//! [`CartState::reduce`] is a pure function of the current state and a
//! [`CartAction`]. Every transition recomputes the aggregates from the full
//! item list, so `total_items` and `total_price` can never drift from the
//! items they summarize.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::cart::CartLineItem;
use crate::ids::ProductId;
use crate::money::{Currency, Money};

/// A mutation of the cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CartAction {
    /// Merge into the matching entry, or append a new one.
    AddItem { item: CartLineItem },
    /// Remove every entry of a product, whatever its configuration.
    RemoveItem { product_id: ProductId },
    /// Set the quantity of the first entry of a product; `<= 0` removes it.
    UpdateQuantity { product_id: ProductId, quantity: i64 },
    /// Forget the last-added pointer.
    ClearLastAdded,
    /// Reset to the empty cart.
    ClearCart,
}

impl CartAction {
    /// Short name for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            CartAction::AddItem { .. } => "add_item",
            CartAction::RemoveItem { .. } => "remove_item",
            CartAction::UpdateQuantity { .. } => "update_quantity",
            CartAction::ClearLastAdded => "clear_last_added",
            CartAction::ClearCart => "clear_cart",
        }
    }
}

/// The aggregate root: line items plus derived totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartState {
    items: Vec<CartLineItem>,
    total_items: i64,
    total_price: Money,
    last_added_product_id: Option<ProductId>,
}

impl CartState {
    /// Create an empty cart priced in `currency`.
    pub fn new(currency: Currency) -> Self {
        Self {
            items: Vec::new(),
            total_items: 0,
            total_price: Money::zero(currency),
            last_added_product_id: None,
        }
    }

    /// Line items in insertion order.
    pub fn items(&self) -> &[CartLineItem] {
        &self.items
    }

    /// Sum of all quantities.
    pub fn total_items(&self) -> i64 {
        self.total_items
    }

    /// Sum of `effective_unit_price × quantity` over all items.
    pub fn total_price(&self) -> Money {
        self.total_price
    }

    /// Product most recently added, until cleared.
    pub fn last_added_product_id(&self) -> Option<ProductId> {
        self.last_added_product_id
    }

    pub fn currency(&self) -> Currency {
        self.total_price.currency
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of distinct entries.
    pub fn unique_item_count(&self) -> usize {
        self.items.len()
    }

    /// Total quantity of a product across all of its configurations.
    pub fn product_quantity(&self, product_id: ProductId) -> i64 {
        self.items
            .iter()
            .filter(|i| i.product_id == product_id)
            .fold(0_i64, |sum, i| sum.saturating_add(i.quantity))
    }

    /// Entries of a product, in cart order.
    pub fn entries_for(&self, product_id: ProductId) -> impl Iterator<Item = &CartLineItem> {
        self.items.iter().filter(move |i| i.product_id == product_id)
    }

    /// Apply `action` and return the resulting state, leaving `self` as is.
    pub fn reduce(&self, action: CartAction) -> CartState {
        let mut next = self.clone();
        next.apply(action);
        next
    }

    /// Apply `action` in place. Returns whether the state changed.
    pub(crate) fn apply(&mut self, action: CartAction) -> bool {
        let kind = action.kind();
        let changed = match action {
            CartAction::AddItem { item } => self.add_item(item),
            CartAction::RemoveItem { product_id } => self.remove_item(product_id),
            CartAction::UpdateQuantity {
                product_id,
                quantity,
            } => self.update_quantity(product_id, quantity),
            CartAction::ClearLastAdded => self.last_added_product_id.take().is_some(),
            CartAction::ClearCart => {
                let was_empty = self.items.is_empty() && self.last_added_product_id.is_none();
                *self = CartState::new(self.currency());
                !was_empty
            }
        };
        debug!(
            action = kind,
            changed,
            entries = self.items.len(),
            total_items = self.total_items,
            total_cents = self.total_price.amount_cents,
            "cart reduced"
        );
        changed
    }

    fn add_item(&mut self, candidate: CartLineItem) -> bool {
        if candidate.quantity <= 0 {
            warn!(
                product_id = %candidate.product_id,
                quantity = candidate.quantity,
                "ignoring add with non-positive quantity"
            );
            return false;
        }
        if candidate.effective_unit_price.currency != self.currency() {
            warn!(
                product_id = %candidate.product_id,
                expected = %self.currency(),
                got = %candidate.effective_unit_price.currency,
                "ignoring add priced in another currency"
            );
            return false;
        }

        let product_id = candidate.product_id;
        match self.items.iter_mut().find(|i| i.same_entry(&candidate)) {
            // The first price snapshot wins; only the quantity grows.
            Some(existing) => {
                existing.quantity = existing.quantity.saturating_add(candidate.quantity)
            }
            None => self.items.push(candidate),
        }

        self.recompute();
        self.last_added_product_id = Some(product_id);
        true
    }

    fn remove_item(&mut self, product_id: ProductId) -> bool {
        let before = self.items.len();
        self.items.retain(|i| i.product_id != product_id);
        if self.items.len() == before {
            return false;
        }
        self.recompute();
        true
    }

    fn update_quantity(&mut self, product_id: ProductId, quantity: i64) -> bool {
        let Some(index) = self.items.iter().position(|i| i.product_id == product_id) else {
            return false;
        };
        if quantity <= 0 {
            self.items.remove(index);
        } else {
            self.items[index].quantity = quantity;
        }
        self.recompute();
        true
    }

    fn recompute(&mut self) {
        let currency = self.currency();
        self.total_items = self
            .items
            .iter()
            .fold(0_i64, |sum, i| sum.saturating_add(i.quantity));
        self.total_price = self
            .items
            .iter()
            .fold(Money::zero(currency), |sum, i| sum.saturating_add(&i.line_total()));
    }
}

impl Default for CartState {
    fn default() -> Self {
        Self::new(Currency::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::Configuration;

    fn sar(units: i64) -> Money {
        Money::whole(units, Currency::SAR)
    }

    fn plain(id: u32, price: i64, quantity: i64) -> CartLineItem {
        CartLineItem::new(ProductId::new(id), format!("Product {}", id), sar(price), quantity)
    }

    fn add(item: CartLineItem) -> CartAction {
        CartAction::AddItem { item }
    }

    #[test]
    fn test_reduce_is_pure() {
        let empty = CartState::default();
        let next = empty.reduce(add(plain(1, 25, 2)));

        assert!(empty.is_empty());
        assert_eq!(next.total_items(), 2);
        assert_eq!(next.total_price(), sar(50));
        assert_eq!(next.last_added_product_id(), Some(ProductId::new(1)));
    }

    #[test]
    fn test_merge_keeps_first_price() {
        let mut first = plain(1, 25, 1);
        first.effective_unit_price = sar(27);
        let mut second = plain(1, 25, 2);
        second.effective_unit_price = sar(99);

        let state = CartState::default().reduce(add(first)).reduce(add(second));
        assert_eq!(state.unique_item_count(), 1);
        assert_eq!(state.items()[0].quantity, 3);
        assert_eq!(state.items()[0].effective_unit_price, sar(27));
        assert_eq!(state.total_price(), sar(81));
    }

    #[test]
    fn test_non_positive_add_is_noop() {
        let state = CartState::default().reduce(add(plain(1, 25, 1)));
        let after_zero = state.reduce(add(plain(2, 10, 0)));
        let after_negative = state.reduce(add(plain(1, 25, -3)));

        assert_eq!(after_zero, state);
        assert_eq!(after_negative, state);
    }

    #[test]
    fn test_foreign_currency_add_is_noop() {
        let mut item = plain(1, 25, 1);
        item.effective_unit_price = Money::whole(25, Currency::USD);
        let state = CartState::default().reduce(add(item));
        assert!(state.is_empty());
        assert_eq!(state.last_added_product_id(), None);
    }

    #[test]
    fn test_new_entries_append_in_order() {
        let state = CartState::default()
            .reduce(add(plain(2, 25, 1)))
            .reduce(add(plain(1, 25, 1)))
            .reduce(add(plain(2, 25, 1)));

        let ids: Vec<u32> = state.items().iter().map(|i| i.product_id.get()).collect();
        assert_eq!(ids, vec![2, 1]);
        assert_eq!(state.items()[0].quantity, 2);
        assert_eq!(state.last_added_product_id(), Some(ProductId::new(2)));
    }

    #[test]
    fn test_unknown_product_is_noop() {
        let state = CartState::default().reduce(add(plain(1, 25, 1)));
        assert_eq!(state.reduce(CartAction::RemoveItem { product_id: ProductId::new(9) }), state);
        assert_eq!(
            state.reduce(CartAction::UpdateQuantity { product_id: ProductId::new(9), quantity: 4 }),
            state
        );
    }

    #[test]
    fn test_update_quantity_is_absolute() {
        let state = CartState::default()
            .reduce(add(plain(1, 25, 3)))
            .reduce(CartAction::UpdateQuantity { product_id: ProductId::new(1), quantity: 1 });
        assert_eq!(state.total_items(), 1);
        assert_eq!(state.total_price(), sar(25));
    }

    #[test]
    fn test_update_negative_removes_first_entry() {
        let variant = plain(1, 25, 1)
            .with_configuration(Configuration::new().with_related_item("drink1"), sar(30));
        let state = CartState::default()
            .reduce(add(plain(1, 25, 2)))
            .reduce(add(variant))
            .reduce(CartAction::UpdateQuantity { product_id: ProductId::new(1), quantity: -1 });

        assert_eq!(state.unique_item_count(), 1);
        assert_eq!(state.items()[0].effective_unit_price, sar(30));
        assert_eq!(state.total_items(), 1);
    }

    #[test]
    fn test_remove_keeps_last_added() {
        let state = CartState::default()
            .reduce(add(plain(1, 25, 1)))
            .reduce(CartAction::RemoveItem { product_id: ProductId::new(1) });
        assert!(state.is_empty());
        assert_eq!(state.total_price(), sar(0));
        assert_eq!(state.last_added_product_id(), Some(ProductId::new(1)));
    }

    #[test]
    fn test_clear_last_added() {
        let state = CartState::default()
            .reduce(add(plain(1, 25, 1)))
            .reduce(CartAction::ClearLastAdded);
        assert_eq!(state.last_added_product_id(), None);
        assert_eq!(state.total_items(), 1);
    }

    #[test]
    fn test_clear_cart_resets_everything() {
        let state = CartState::new(Currency::INR)
            .reduce(add(CartLineItem::new(ProductId::new(1), "Thali", Money::whole(250, Currency::INR), 2)))
            .reduce(CartAction::ClearCart);
        assert_eq!(state, CartState::new(Currency::INR));
    }

    #[test]
    fn test_product_quantity_spans_configurations() {
        let variant = plain(1, 25, 4)
            .with_configuration(Configuration::new().with_related_item("side1"), sar(33));
        let state = CartState::default()
            .reduce(add(plain(1, 25, 1)))
            .reduce(add(variant))
            .reduce(add(plain(3, 22, 5)));
        assert_eq!(state.product_quantity(ProductId::new(1)), 5);
        assert_eq!(state.entries_for(ProductId::new(1)).count(), 2);
        assert_eq!(state.product_quantity(ProductId::new(7)), 0);
    }

    #[test]
    fn test_action_json() {
        let action: CartAction =
            serde_json::from_str(r#"{"type":"update_quantity","product_id":3,"quantity":0}"#).unwrap();
        assert_eq!(
            action,
            CartAction::UpdateQuantity { product_id: ProductId::new(3), quantity: 0 }
        );
        let clear: CartAction = serde_json::from_str(r#"{"type":"clear_cart"}"#).unwrap();
        assert_eq!(clear.kind(), "clear_cart");
    }
}
