//! Restaurant storefront domain types and cart logic.
//!
//! - **Catalog**: menu categories, products, customization groups, add-ons
//! - **Cart**: line item identity, the cart reducer and store, the product
//!   configurator that turns choices into line items
//! - **Checkout**: delivery and service fees
//! - **Mirror**: best-effort persistence of cart contents (`storage` feature)
//!
//! # Example
//!
//! ```rust
//! use storefront_commerce::prelude::*;
//!
//! let menu = Menu::sample();
//! let product = menu.require_product(ProductId::new(1)).unwrap();
//!
//! let mut configurator = ProductConfigurator::new(product);
//! configurator
//!     .select(&GroupId::new("sauce"), &OptionId::new("garlic"))
//!     .unwrap();
//! configurator.set_quantity(2);
//!
//! let mut store = CartStore::new();
//! store.add_item(configurator.build().unwrap());
//!
//! let totals = CheckoutPolicy::default().totals_for(store.state());
//! assert_eq!(totals.subtotal.display(), "54.00 SR");
//! assert!(totals.free_delivery());
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod mirror;

pub use error::CommerceError;
pub use ids::*;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money};

    // Catalog
    pub use crate::catalog::{
        Category, CustomizationGroup, CustomizationOption, Menu, MenuProduct, ProductBadges,
        RelatedItem,
    };

    // Cart
    pub use crate::cart::{
        quick_add, CartAction, CartLineItem, CartState, CartStore, Configuration,
        ProductConfigurator, QuantityLimits, SelectionQueue,
    };

    // Checkout
    pub use crate::checkout::{CheckoutPolicy, CheckoutTotals};

    pub use crate::config::{MirrorConfig, StorefrontConfig};
    pub use crate::mirror::CartMirror;
    #[cfg(feature = "storage")]
    pub use crate::mirror::CacheMirror;
}
