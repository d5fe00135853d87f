//! Cart line items and their configuration identity.

use std::collections::{BTreeMap, BTreeSet};

use crate::ids::{GroupId, OptionId, ProductId, RelatedItemId};
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// The customer's choices for one product, in canonical form.
///
/// Groups are keyed in sorted order and groups without a selection are
/// dropped, so two configurations compare equal exactly when they would
/// produce the same dish. Option order inside a group is kept: it records
/// selection order, which decides what gets evicted when a group is full.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "ConfigurationRepr")]
pub struct Configuration {
    customizations: BTreeMap<GroupId, Vec<OptionId>>,
    related_items: BTreeSet<RelatedItemId>,
}

#[derive(Deserialize)]
struct ConfigurationRepr {
    #[serde(default)]
    customizations: BTreeMap<GroupId, Vec<OptionId>>,
    #[serde(default)]
    related_items: BTreeSet<RelatedItemId>,
}

impl From<ConfigurationRepr> for Configuration {
    fn from(repr: ConfigurationRepr) -> Self {
        Configuration::from_parts(repr.customizations, repr.related_items)
    }
}

impl Configuration {
    /// An empty configuration (no customizations, no add-ons).
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a configuration from raw parts, canonicalizing them.
    ///
    /// Empty groups are dropped and repeated options within a group keep
    /// only their first occurrence.
    pub fn from_parts(
        customizations: impl IntoIterator<Item = (GroupId, Vec<OptionId>)>,
        related_items: impl IntoIterator<Item = RelatedItemId>,
    ) -> Self {
        let mut config = Self {
            customizations: BTreeMap::new(),
            related_items: related_items.into_iter().collect(),
        };
        for (group, options) in customizations {
            config = config.with_selection(group, options);
        }
        config
    }

    /// Set the ordered selection for a group.
    pub fn with_selection(
        mut self,
        group: impl Into<GroupId>,
        options: impl IntoIterator<Item = OptionId>,
    ) -> Self {
        let group = group.into();
        let mut selected: Vec<OptionId> = Vec::new();
        for option in options {
            if !selected.contains(&option) {
                selected.push(option);
            }
        }
        if selected.is_empty() {
            self.customizations.remove(&group);
        } else {
            self.customizations.insert(group, selected);
        }
        self
    }

    /// Attach an add-on.
    pub fn with_related_item(mut self, item: impl Into<RelatedItemId>) -> Self {
        self.related_items.insert(item.into());
        self
    }

    /// Selections per group.
    pub fn customizations(&self) -> &BTreeMap<GroupId, Vec<OptionId>> {
        &self.customizations
    }

    /// Ordered selection for one group (empty if none).
    pub fn selection(&self, group: &GroupId) -> &[OptionId] {
        self.customizations
            .get(group)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Selected add-ons.
    pub fn related_items(&self) -> &BTreeSet<RelatedItemId> {
        &self.related_items
    }

    /// True when nothing is customized and no add-on is attached.
    pub fn is_plain(&self) -> bool {
        self.customizations.is_empty() && self.related_items.is_empty()
    }
}

/// One configured quantity of a product in the cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartLineItem {
    /// Catalog product.
    pub product_id: ProductId,
    /// Product name (denormalized for display).
    #[serde(default)]
    pub name: String,
    /// Base price before surcharges.
    pub unit_price: Money,
    /// Quantity. The cart never stores a non-positive quantity.
    pub quantity: i64,
    /// Customizations and add-ons.
    #[serde(flatten)]
    pub configuration: Configuration,
    /// Unit price including every surcharge, fixed when configured.
    pub effective_unit_price: Money,
    /// Unix timestamp in milliseconds when the entry was inserted.
    #[serde(default)]
    pub added_at: i64,
}

impl CartLineItem {
    /// Create a plain line item priced at its base price.
    pub fn new(
        product_id: ProductId,
        name: impl Into<String>,
        unit_price: Money,
        quantity: i64,
    ) -> Self {
        Self {
            product_id,
            name: name.into(),
            unit_price,
            quantity,
            configuration: Configuration::new(),
            effective_unit_price: unit_price,
            added_at: 0,
        }
    }

    /// Attach a configuration and the unit price it was computed at.
    pub fn with_configuration(mut self, configuration: Configuration, effective_unit_price: Money) -> Self {
        self.configuration = configuration;
        self.effective_unit_price = effective_unit_price;
        self
    }

    /// Whether `other` is the same cart entry: same product and an equal
    /// configuration. Quantity, price and timestamp do not count.
    pub fn same_entry(&self, other: &CartLineItem) -> bool {
        self.product_id == other.product_id && self.configuration == other.configuration
    }

    /// `effective_unit_price × quantity`.
    pub fn line_total(&self) -> Money {
        self.effective_unit_price.saturating_mul(self.quantity)
    }

    /// Surcharge over the base price per unit.
    pub fn surcharge(&self) -> Money {
        Money::new(
            self.effective_unit_price
                .amount_cents
                .saturating_sub(self.unit_price.amount_cents),
            self.unit_price.currency,
        )
    }
}
