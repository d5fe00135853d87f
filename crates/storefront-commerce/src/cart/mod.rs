//! Shopping cart module.
//!
//! Contains the cart state and reducer, the store that owns it, line item
//! identity, and the product configurator that builds line items.

mod configurator;
mod line_item;
mod selection;
mod state;
mod store;

pub use configurator::{quick_add, ProductConfigurator, QuantityLimits};
pub use line_item::{CartLineItem, Configuration};
pub use selection::SelectionQueue;
pub use state::{CartAction, CartState};
pub use store::CartStore;
