//! The menu: categories plus the products listed under them.

use crate::catalog::{Category, CustomizationGroup, MenuProduct, ProductBadges, RelatedItem};
use crate::error::CommerceError;
use crate::ids::{CategoryId, ProductId};
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// A complete menu.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Menu {
    /// Categories in navigation order.
    #[serde(default)]
    pub categories: Vec<Category>,
    /// Products in display order.
    #[serde(default)]
    pub products: Vec<MenuProduct>,
}

impl Menu {
    /// Look up a product.
    pub fn product(&self, id: ProductId) -> Option<&MenuProduct> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Look up a product, failing with [`CommerceError::ProductNotFound`].
    pub fn require_product(&self, id: ProductId) -> Result<&MenuProduct, CommerceError> {
        self.product(id)
            .ok_or_else(|| CommerceError::ProductNotFound(id.to_string()))
    }

    /// Look up a category.
    pub fn category(&self, id: &CategoryId) -> Option<&Category> {
        self.categories.iter().find(|c| &c.id == id)
    }

    /// Products listed under a category, in display order.
    pub fn products_in<'a>(
        &'a self,
        category: &'a CategoryId,
    ) -> impl Iterator<Item = &'a MenuProduct> + 'a {
        self.products.iter().filter(move |p| &p.category == category)
    }

    /// Categories sorted by position, each with its product count.
    pub fn category_counts(&self) -> Vec<(&Category, usize)> {
        let mut categories: Vec<&Category> = self.categories.iter().collect();
        categories.sort_by_key(|c| c.position);
        categories
            .into_iter()
            .map(|c| (c, self.products_in(&c.id).count()))
            .collect()
    }

    /// Check internal consistency: unique product ids, known categories,
    /// and a single currency across every price.
    pub fn validate(&self, currency: Currency) -> Result<(), CommerceError> {
        for (i, product) in self.products.iter().enumerate() {
            if self.products[..i].iter().any(|p| p.id == product.id) {
                return Err(CommerceError::ConfigError(format!(
                    "duplicate product id {}",
                    product.id
                )));
            }
            if self.category(&product.category).is_none() {
                return Err(CommerceError::ConfigError(format!(
                    "product {} references unknown category {}",
                    product.id, product.category
                )));
            }

            let prices = std::iter::once(&product.price)
                .chain(
                    product
                        .customizations
                        .iter()
                        .flat_map(|g| g.options.iter().map(|o| &o.price)),
                )
                .chain(product.related_items.iter().map(|r| &r.price));
            for price in prices {
                if price.currency != currency {
                    return Err(CommerceError::CurrencyMismatch {
                        expected: currency.code().to_string(),
                        got: price.currency.code().to_string(),
                    });
                }
            }
        }
        Ok(())
    }

    /// The built-in demo menu.
    pub fn sample() -> Self {
        let sar = |units: i64| Money::whole(units, Currency::SAR);

        let categories = vec![
            Category::new("bestsellers", "Bestsellers", 0),
            Category::new("special", "Special Offers", 1),
            Category::new("main", "Main Course", 2),
            Category::new("sandwiches", "Sandwiches", 3),
            Category::new("sides", "Side Dishes", 4),
            Category::new("pizza", "Pizza", 5),
            Category::new("drinks", "Drinks", 6),
        ];

        let drink = |id: &str, name: &str| RelatedItem::new(id, name, sar(5));

        let mut regular = MenuProduct::new(ProductId::new(1), "Regular Broasted", sar(25), "main")
            .with_group(
                CustomizationGroup::new("spices", "Extra Spices Powder For Fries", "up to 1 selection", false)
                    .with_option("extra-spices", "Add Extra Spices Powder For Fries", sar(3)),
            )
            .with_group(
                CustomizationGroup::new("sauce", "Extra Sauce", "choose up to 2", false)
                    .with_option("garlic", "Extra Garlic Sauce", sar(2))
                    .with_option("cocktail", "Extra Cocktail Sauce", sar(2))
                    .with_option("spicy", "Spicy Mayo", sar(3)),
            )
            .with_related_item(drink("drink1", "Coca Cola"))
            .with_related_item(drink("drink2", "Pepsi"))
            .with_related_item(RelatedItem::new("side1", "Extra Fries", sar(8)));
        regular.description = "4 pieces of chicken + fries + garlic sauce + coleslaw".into();
        regular.full_description =
            "4 pieces of chicken + fries + garlic sauce + cocktail sauce + bread".into();
        regular.calories = 1215;
        regular.rating = Some(4.8);
        regular.badges.popular = true;
        regular.allergens = vec!["Gluten".into(), "Dairy".into()];

        let mut spicy = MenuProduct::new(ProductId::new(2), "Spicy Broasted", sar(25), "main")
            .with_group(
                CustomizationGroup::new("spice-level", "Spice Level", "choose 1 (required)", true)
                    .with_option("mild", "Mild Spice", sar(0))
                    .with_option("medium", "Medium Spice", sar(0))
                    .with_option("hot", "Extra Hot", sar(2)),
            )
            .with_related_item(drink("drink1", "Coca Cola"))
            .with_related_item(RelatedItem::new("side2", "Coleslaw", sar(6)));
        spicy.description = "4 pieces of chicken + fries + garlic sauce + coleslaw".into();
        spicy.full_description =
            "4 pieces of spicy chicken + fries + garlic sauce + cocktail sauce + bread".into();
        spicy.calories = 1370;
        spicy.rating = Some(4.7);
        spicy.badges.spicy = true;
        spicy.allergens = vec!["Gluten".into(), "Dairy".into(), "Spicy".into()];

        let plain = |id: u32,
                     name: &str,
                     price: i64,
                     category: &str,
                     description: &str,
                     calories: u32,
                     rating: f32,
                     badges: ProductBadges| {
            let mut p = MenuProduct::new(ProductId::new(id), name, sar(price), category);
            p.description = description.into();
            p.calories = calories;
            p.rating = Some(rating);
            p.badges = badges;
            p
        };

        let products = vec![
            regular,
            spicy,
            plain(
                3,
                "Stripes Alreef",
                22,
                "main",
                "Marinated and fried chicken slices with garlic sauce",
                980,
                4.6,
                ProductBadges::default(),
            ),
            plain(
                4,
                "Broasted Extra Spicy",
                28,
                "main",
                "4 pieces of spicy broasted chicken covered in special sauce",
                1450,
                4.9,
                ProductBadges {
                    spicy: true,
                    new: true,
                    ..ProductBadges::default()
                },
            ),
            plain(
                5,
                "Family Feast",
                45,
                "special",
                "8 pieces of chicken + large fries + 4 garlic sauce + coleslaw",
                2400,
                4.8,
                ProductBadges {
                    popular: true,
                    ..ProductBadges::default()
                },
            ),
            plain(
                6,
                "Chicken Burger Deluxe",
                18,
                "sandwiches",
                "Crispy chicken breast + lettuce + tomato + special sauce",
                650,
                4.5,
                ProductBadges::default(),
            ),
        ];

        Self {
            categories,
            products,
        }
    }
}
