//! The cart store: the single owner of a session's [`CartState`].

use chrono::Utc;
use tracing::{debug, info};

use crate::cart::{CartAction, CartLineItem, CartState};
use crate::ids::ProductId;
use crate::mirror::CartMirror;
use crate::money::Currency;

/// Owns the cart state and applies every mutation to it.
///
/// The store is constructed explicitly and passed by reference to whatever
/// needs it; there is no global instance. Every operation is total: invalid
/// input is a no-op and the current state is always returned.
///
/// An optional [`CartMirror`] receives the item list after each successful
/// add. Mirror failures are logged and discarded.
#[derive(Default)]
pub struct CartStore {
    state: CartState,
    mirror: Option<Box<dyn CartMirror>>,
}

impl CartStore {
    /// Create an empty store priced in the default currency.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty store priced in `currency`.
    pub fn with_currency(currency: Currency) -> Self {
        Self {
            state: CartState::new(currency),
            mirror: None,
        }
    }

    /// Attach a best-effort mirror.
    pub fn with_mirror(mut self, mirror: impl CartMirror + 'static) -> Self {
        self.mirror = Some(Box::new(mirror));
        self
    }

    /// Current state.
    pub fn state(&self) -> &CartState {
        &self.state
    }

    /// Consume the store, keeping its state.
    pub fn into_state(self) -> CartState {
        self.state
    }

    /// Add a configured line item, merging with an identical entry.
    ///
    /// The candidate is stamped with the current time; the stamp is only
    /// kept when it becomes a new entry.
    pub fn add_item(&mut self, mut candidate: CartLineItem) -> &CartState {
        candidate.added_at = Utc::now().timestamp_millis();
        let product_id = candidate.product_id;
        let quantity = candidate.quantity;

        if self.state.apply(CartAction::AddItem { item: candidate }) {
            info!(
                %product_id,
                quantity,
                total_items = self.state.total_items(),
                "added to cart"
            );
            self.mirror_items();
        }
        &self.state
    }

    /// Remove every entry of a product.
    pub fn remove_item(&mut self, product_id: ProductId) -> &CartState {
        self.state.apply(CartAction::RemoveItem { product_id });
        &self.state
    }

    /// Set the quantity of the first entry of a product.
    ///
    /// Only the first entry is touched, unlike [`remove_item`](Self::remove_item)
    /// which clears every configuration of the product.
    pub fn update_quantity(&mut self, product_id: ProductId, quantity: i64) -> &CartState {
        self.state.apply(CartAction::UpdateQuantity {
            product_id,
            quantity,
        });
        &self.state
    }

    /// Reset to the empty cart.
    pub fn clear_cart(&mut self) -> &CartState {
        self.state.apply(CartAction::ClearCart);
        &self.state
    }

    /// Consume the last-added pointer.
    pub fn clear_last_added(&mut self) -> &CartState {
        self.state.apply(CartAction::ClearLastAdded);
        &self.state
    }

    /// Decrement a product by one, as the grid's "−" button does.
    ///
    /// The new quantity is the product's total across configurations minus
    /// one, written to its first entry.
    pub fn quick_remove(&mut self, product_id: ProductId) -> &CartState {
        let current = self.state.product_quantity(product_id);
        if current > 0 {
            self.update_quantity(product_id, current - 1);
        }
        &self.state
    }

    /// Total quantity of a product across all of its configurations.
    pub fn product_quantity(&self, product_id: ProductId) -> i64 {
        self.state.product_quantity(product_id)
    }

    /// Apply a serialized action.
    pub fn dispatch(&mut self, action: CartAction) -> &CartState {
        match action {
            CartAction::AddItem { item } => self.add_item(item),
            CartAction::RemoveItem { product_id } => self.remove_item(product_id),
            CartAction::UpdateQuantity {
                product_id,
                quantity,
            } => self.update_quantity(product_id, quantity),
            CartAction::ClearLastAdded => self.clear_last_added(),
            CartAction::ClearCart => self.clear_cart(),
        }
    }

    fn mirror_items(&self) {
        let Some(mirror) = &self.mirror else {
            return;
        };
        if let Err(e) = mirror.mirror(self.state.items()) {
            debug!(error = %e, "cart mirror failed, ignoring");
        }
    }
}

impl std::fmt::Debug for CartStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartStore")
            .field("state", &self.state)
            .field("mirrored", &self.mirror.is_some())
            .finish()
    }
}
