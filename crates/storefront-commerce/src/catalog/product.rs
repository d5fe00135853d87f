//! Menu product, customization group and add-on types.

use crate::ids::{CategoryId, GroupId, OptionId, ProductId, RelatedItemId};
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Display badges shown on a product card.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductBadges {
    pub popular: bool,
    pub spicy: bool,
    pub new: bool,
}

/// A product on the menu.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MenuProduct {
    /// Unique product identifier.
    pub id: ProductId,
    /// Product name.
    pub name: String,
    /// Short description shown on the card.
    #[serde(default)]
    pub description: String,
    /// Long description shown in the customization view.
    #[serde(default)]
    pub full_description: String,
    /// Base price before customization surcharges.
    pub price: Money,
    /// Energy content in kcal.
    #[serde(default)]
    pub calories: u32,
    /// Category the product is listed under.
    pub category: CategoryId,
    /// Average rating out of 5.
    #[serde(default)]
    pub rating: Option<f32>,
    #[serde(default)]
    pub badges: ProductBadges,
    /// Allergen labels.
    #[serde(default)]
    pub allergens: Vec<String>,
    /// Customization groups, in display order.
    #[serde(default)]
    pub customizations: Vec<CustomizationGroup>,
    /// Add-ons that can be attached to this product.
    #[serde(default)]
    pub related_items: Vec<RelatedItem>,
}

impl MenuProduct {
    /// Create a plain product with no customizations or add-ons.
    pub fn new(
        id: ProductId,
        name: impl Into<String>,
        price: Money,
        category: impl Into<CategoryId>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            description: String::new(),
            full_description: String::new(),
            price,
            calories: 0,
            category: category.into(),
            rating: None,
            badges: ProductBadges::default(),
            allergens: Vec::new(),
            customizations: Vec::new(),
            related_items: Vec::new(),
        }
    }

    /// Add a customization group.
    pub fn with_group(mut self, group: CustomizationGroup) -> Self {
        self.customizations.push(group);
        self
    }

    /// Add a related item.
    pub fn with_related_item(mut self, item: RelatedItem) -> Self {
        self.related_items.push(item);
        self
    }

    /// Look up a customization group.
    pub fn group(&self, id: &GroupId) -> Option<&CustomizationGroup> {
        self.customizations.iter().find(|g| &g.id == id)
    }

    /// Look up an add-on.
    pub fn related_item(&self, id: &RelatedItemId) -> Option<&RelatedItem> {
        self.related_items.iter().find(|r| &r.id == id)
    }

    /// Groups that need at least one selection before adding to the cart.
    pub fn required_groups(&self) -> impl Iterator<Item = &CustomizationGroup> {
        self.customizations.iter().filter(|g| g.required)
    }

    /// Whether tapping the product should open the customization view
    /// instead of adding it directly.
    pub fn is_customizable(&self) -> bool {
        !self.customizations.is_empty() || !self.related_items.is_empty()
    }
}

/// A named set of options on a product (e.g. spice level).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CustomizationGroup {
    /// Group identifier.
    pub id: GroupId,
    /// Heading, e.g. "Extra Sauce".
    pub title: String,
    /// Human-readable hint that also carries the selection cap,
    /// e.g. "choose up to 2".
    #[serde(default)]
    pub subtitle: String,
    /// Whether at least one option must be chosen.
    #[serde(default)]
    pub required: bool,
    /// Available options.
    pub options: Vec<CustomizationOption>,
}

impl CustomizationGroup {
    /// Create an empty group.
    pub fn new(
        id: impl Into<GroupId>,
        title: impl Into<String>,
        subtitle: impl Into<String>,
        required: bool,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            subtitle: subtitle.into(),
            required,
            options: Vec::new(),
        }
    }

    /// Add an option.
    pub fn with_option(
        mut self,
        id: impl Into<OptionId>,
        name: impl Into<String>,
        price: Money,
    ) -> Self {
        self.options.push(CustomizationOption {
            id: id.into(),
            name: name.into(),
            price,
        });
        self
    }

    /// Look up an option.
    pub fn option(&self, id: &OptionId) -> Option<&CustomizationOption> {
        self.options.iter().find(|o| &o.id == id)
    }

    /// Maximum number of options that can be selected at once.
    pub fn max_selections(&self) -> usize {
        parse_max_selections(&self.subtitle)
    }
}

/// One option in a customization group.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CustomizationOption {
    pub id: OptionId,
    pub name: String,
    /// Surcharge added to the unit price when selected.
    pub price: Money,
}

/// An add-on that can be attached to a product (drink, side).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RelatedItem {
    pub id: RelatedItemId,
    pub name: String,
    pub price: Money,
}

impl RelatedItem {
    /// Create an add-on.
    pub fn new(id: impl Into<RelatedItemId>, name: impl Into<String>, price: Money) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
        }
    }
}

/// Extract a selection cap from a subtitle such as "choose up to 2".
///
/// Uses the first run of digits in the text. Falls back to 1 when there is
/// none, when it is zero, or when it does not fit in `usize`.
pub fn parse_max_selections(subtitle: &str) -> usize {
    let digits: String = subtitle
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(|c| c.is_ascii_digit())
        .collect();

    match digits.parse::<usize>() {
        Ok(n) if n > 0 => n,
        _ => 1,
    }
}
