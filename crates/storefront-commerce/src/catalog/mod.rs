//! Menu catalog module.
//!
//! Contains the products a customer can browse, their customization groups
//! and add-ons, and the categories they are listed under.

mod category;
mod menu;
mod product;

pub use category::Category;
pub use menu::Menu;
pub use product::{
    parse_max_selections, CustomizationGroup, CustomizationOption, MenuProduct, ProductBadges,
    RelatedItem,
};
