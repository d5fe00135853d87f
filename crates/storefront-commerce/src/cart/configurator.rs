//! Turning a menu product plus the customer's choices into a cart line item.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cart::{CartLineItem, Configuration, SelectionQueue};
use crate::catalog::{CustomizationGroup, MenuProduct};
use crate::error::CommerceError;
use crate::ids::{GroupId, OptionId, RelatedItemId};
use crate::money::Money;

/// Bounds on the quantity a customer can add in one go.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuantityLimits {
    pub min: i64,
    pub max: i64,
}

impl Default for QuantityLimits {
    fn default() -> Self {
        Self { min: 1, max: 10 }
    }
}

impl QuantityLimits {
    /// Check a quantity against the bounds.
    pub fn check(&self, quantity: i64) -> Result<(), CommerceError> {
        if quantity < self.min.max(1) {
            return Err(CommerceError::InvalidQuantity(quantity));
        }
        if quantity > self.max {
            return Err(CommerceError::QuantityExceedsLimit(quantity, self.max));
        }
        Ok(())
    }
}

/// Collects choices for one product and prices them.
#[derive(Debug, Clone)]
pub struct ProductConfigurator<'a> {
    product: &'a MenuProduct,
    selections: BTreeMap<GroupId, SelectionQueue>,
    related_items: BTreeSet<RelatedItemId>,
    quantity: i64,
    limits: QuantityLimits,
}

impl<'a> ProductConfigurator<'a> {
    /// Start configuring `product` with nothing selected and quantity 1.
    pub fn new(product: &'a MenuProduct) -> Self {
        let selections = product
            .customizations
            .iter()
            .map(|g| (g.id.clone(), SelectionQueue::new(g.max_selections())))
            .collect();
        Self {
            product,
            selections,
            related_items: BTreeSet::new(),
            quantity: 1,
            limits: QuantityLimits::default(),
        }
    }

    /// Use different quantity bounds.
    pub fn with_limits(mut self, limits: QuantityLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn product(&self) -> &'a MenuProduct {
        self.product
    }

    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    /// Select an option, evicting the group's oldest selection when full.
    ///
    /// Returns the evicted option, if any.
    pub fn select(
        &mut self,
        group: &GroupId,
        option: &OptionId,
    ) -> Result<Option<OptionId>, CommerceError> {
        let queue = self.queue_for(group, option)?;
        let evicted = queue.select(option.clone());
        if let Some(old) = &evicted {
            debug!(group = %group, evicted = %old, selected = %option, "selection evicted");
        }
        Ok(evicted)
    }

    /// Deselect an option. Returns whether it was selected.
    pub fn deselect(&mut self, group: &GroupId, option: &OptionId) -> Result<bool, CommerceError> {
        let queue = self.queue_for(group, option)?;
        Ok(queue.deselect(option))
    }

    /// Apply a checkbox change.
    pub fn set_option(
        &mut self,
        group: &GroupId,
        option: &OptionId,
        checked: bool,
    ) -> Result<(), CommerceError> {
        if checked {
            self.select(group, option)?;
        } else {
            self.deselect(group, option)?;
        }
        Ok(())
    }

    /// Options currently selected in a group, oldest first.
    pub fn selection(&self, group: &GroupId) -> Vec<OptionId> {
        self.selections
            .get(group)
            .map(SelectionQueue::to_vec)
            .unwrap_or_default()
    }

    /// Toggle an add-on. Returns whether it is now selected.
    pub fn toggle_related_item(&mut self, item: &RelatedItemId) -> Result<bool, CommerceError> {
        if self.product.related_item(item).is_none() {
            return Err(CommerceError::RelatedItemNotFound(item.to_string()));
        }
        if self.related_items.remove(item) {
            Ok(false)
        } else {
            self.related_items.insert(item.clone());
            Ok(true)
        }
    }

    /// Set the quantity as typed; [`validate`](Self::validate) checks it.
    pub fn set_quantity(&mut self, quantity: i64) {
        self.quantity = quantity;
    }

    /// "+" button: one more, capped at the maximum.
    pub fn increment(&mut self) -> i64 {
        self.quantity = (self.quantity + 1).min(self.limits.max);
        self.quantity
    }

    /// "−" button: one less, never below the minimum.
    pub fn decrement(&mut self) -> i64 {
        self.quantity = (self.quantity - 1).max(self.limits.min.max(1));
        self.quantity
    }

    /// The canonical configuration for the current choices.
    pub fn configuration(&self) -> Configuration {
        Configuration::from_parts(
            self.selections
                .iter()
                .map(|(group, queue)| (group.clone(), queue.to_vec())),
            self.related_items.iter().cloned(),
        )
    }

    /// Base price plus every selected option surcharge and add-on price.
    pub fn effective_unit_price(&self) -> Money {
        let options = self.product.customizations.iter().flat_map(|group| {
            let queue = self.selections.get(&group.id);
            queue
                .into_iter()
                .flat_map(|q| q.iter())
                .filter_map(move |option| group.option(option))
                .map(|option| option.price)
        });
        let add_ons = self
            .related_items
            .iter()
            .filter_map(|id| self.product.related_item(id))
            .map(|item| item.price);

        options
            .chain(add_ons)
            .fold(self.product.price, |total, price| total.saturating_add(&price))
    }

    /// Effective unit price times quantity.
    pub fn line_total(&self) -> Money {
        self.effective_unit_price().saturating_mul(self.quantity)
    }

    /// Check required groups and quantity bounds.
    ///
    /// A missing selection is reported for every required group at once,
    /// by title.
    pub fn validate(&self) -> Result<(), CommerceError> {
        let missing: Vec<String> = self
            .product
            .required_groups()
            .filter(|g| self.selections.get(&g.id).map_or(true, SelectionQueue::is_empty))
            .map(|g| g.title.clone())
            .collect();
        if !missing.is_empty() {
            return Err(CommerceError::MissingRequiredSelection(missing));
        }
        self.limits.check(self.quantity)
    }

    /// Validate and produce the cart candidate.
    pub fn build(&self) -> Result<CartLineItem, CommerceError> {
        self.validate()?;
        let price = self.effective_unit_price();
        Ok(CartLineItem::new(
            self.product.id,
            self.product.name.clone(),
            self.product.price,
            self.quantity,
        )
        .with_configuration(self.configuration(), price))
    }

    fn queue_for(
        &mut self,
        group: &GroupId,
        option: &OptionId,
    ) -> Result<&mut SelectionQueue, CommerceError> {
        let product: &'a MenuProduct = self.product;
        let definition: &'a CustomizationGroup = product
            .group(group)
            .ok_or_else(|| CommerceError::GroupNotFound(group.to_string()))?;
        if definition.option(option).is_none() {
            return Err(CommerceError::OptionNotFound {
                group: group.to_string(),
                option: option.to_string(),
            });
        }
        Ok(self
            .selections
            .entry(group.clone())
            .or_insert_with(|| SelectionQueue::new(definition.max_selections())))
    }
}

/// One-tap add from the product grid: quantity 1, nothing customized.
pub fn quick_add(product: &MenuProduct) -> CartLineItem {
    CartLineItem::new(product.id, product.name.clone(), product.price, 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Menu;
    use crate::ids::ProductId;
    use crate::money::Currency;

    fn sar(units: i64) -> Money {
        Money::whole(units, Currency::SAR)
    }

    fn g(id: &str) -> GroupId {
        GroupId::new(id)
    }

    fn o(id: &str) -> OptionId {
        OptionId::new(id)
    }

    #[test]
    fn test_price_includes_options_and_add_ons() {
        let menu = Menu::sample();
        let product = menu.product(ProductId::new(1)).unwrap();
        let mut config = ProductConfigurator::new(product);

        config.select(&g("sauce"), &o("spicy")).unwrap();
        config.select(&g("spices"), &o("extra-spices")).unwrap();
        config.toggle_related_item(&RelatedItemId::new("side1")).unwrap();

        // 25 + 3 + 3 + 8
        assert_eq!(config.effective_unit_price(), sar(39));
        config.set_quantity(2);
        assert_eq!(config.line_total(), sar(78));
    }

    #[test]
    fn test_fifo_eviction_changes_configuration() {
        let menu = Menu::sample();
        let product = menu.product(ProductId::new(1)).unwrap();
        let mut config = ProductConfigurator::new(product);

        config.select(&g("sauce"), &o("garlic")).unwrap();
        config.select(&g("sauce"), &o("cocktail")).unwrap();
        let evicted = config.select(&g("sauce"), &o("spicy")).unwrap();

        assert_eq!(evicted, Some(o("garlic")));
        assert_eq!(config.selection(&g("sauce")), vec![o("cocktail"), o("spicy")]);
        // Evicted surcharge no longer counts: 25 + 2 + 3
        assert_eq!(config.effective_unit_price(), sar(30));
    }

    #[test]
    fn test_single_choice_group_replaces() {
        let menu = Menu::sample();
        let product = menu.product(ProductId::new(2)).unwrap();
        let mut config = ProductConfigurator::new(product);

        config.select(&g("spice-level"), &o("mild")).unwrap();
        config.select(&g("spice-level"), &o("hot")).unwrap();
        assert_eq!(config.selection(&g("spice-level")), vec![o("hot")]);
        assert_eq!(config.effective_unit_price(), sar(27));
    }

    #[test]
    fn test_required_group_must_be_selected() {
        let menu = Menu::sample();
        let product = menu.product(ProductId::new(2)).unwrap();
        let mut config = ProductConfigurator::new(product);

        match config.build() {
            Err(CommerceError::MissingRequiredSelection(groups)) => {
                assert_eq!(groups, vec!["Spice Level".to_string()])
            }
            other => panic!("expected missing selection, got {:?}", other),
        }

        config.set_option(&g("spice-level"), &o("medium"), true).unwrap();
        let item = config.build().unwrap();
        assert_eq!(item.quantity, 1);
        assert_eq!(item.unit_price, sar(25));
        assert_eq!(item.effective_unit_price, sar(25));
    }

    #[test]
    fn test_deselect_then_build_is_plain() {
        let menu = Menu::sample();
        let product = menu.product(ProductId::new(1)).unwrap();
        let mut config = ProductConfigurator::new(product);

        config.set_option(&g("sauce"), &o("garlic"), true).unwrap();
        config.set_option(&g("sauce"), &o("garlic"), false).unwrap();

        let item = config.build().unwrap();
        assert!(item.configuration.is_plain());
        assert!(item.same_entry(&quick_add(product)));
    }

    #[test]
    fn test_quantity_bounds() {
        let menu = Menu::sample();
        let product = menu.product(ProductId::new(3)).unwrap();
        let mut config = ProductConfigurator::new(product);

        assert_eq!(config.decrement(), 1);
        for _ in 0..20 {
            config.increment();
        }
        assert_eq!(config.quantity(), 10);

        config.set_quantity(11);
        assert!(matches!(config.validate(), Err(CommerceError::QuantityExceedsLimit(11, 10))));
        config.set_quantity(0);
        assert!(matches!(config.validate(), Err(CommerceError::InvalidQuantity(0))));

        let mut wide = ProductConfigurator::new(product)
            .with_limits(QuantityLimits { min: 1, max: 50 });
        wide.set_quantity(40);
        assert!(wide.validate().is_ok());
    }

    #[test]
    fn test_unknown_ids_are_errors() {
        let menu = Menu::sample();
        let product = menu.product(ProductId::new(1)).unwrap();
        let mut config = ProductConfigurator::new(product);

        assert!(matches!(
            config.select(&g("toppings"), &o("olives")),
            Err(CommerceError::GroupNotFound(_))
        ));
        assert!(matches!(
            config.select(&g("sauce"), &o("ketchup")),
            Err(CommerceError::OptionNotFound { .. })
        ));
        assert!(matches!(
            config.toggle_related_item(&RelatedItemId::new("side2")),
            Err(CommerceError::RelatedItemNotFound(_))
        ));
    }

    #[test]
    fn test_toggle_related_item() {
        let menu = Menu::sample();
        let product = menu.product(ProductId::new(2)).unwrap();
        let mut config = ProductConfigurator::new(product);
        let drink = RelatedItemId::new("drink1");

        assert!(config.toggle_related_item(&drink).unwrap());
        assert!(!config.toggle_related_item(&drink).unwrap());
        assert!(config.configuration().related_items().is_empty());
    }

    #[test]
    fn test_quick_add() {
        let menu = Menu::sample();
        let product = menu.product(ProductId::new(5)).unwrap();
        let item = quick_add(product);
        assert_eq!(item.quantity, 1);
        assert_eq!(item.effective_unit_price, sar(45));
        assert!(item.configuration.is_plain());
    }
}
