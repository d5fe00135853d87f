//! Menu listing.

use anyhow::{bail, Result};
use console::style;
use storefront_commerce::catalog::{Menu, MenuProduct};
use storefront_commerce::ids::{CategoryId, ProductId};

use super::MenuArgs;
use crate::context::Context;
use crate::output::badge;

/// Run the menu command.
pub fn run(args: MenuArgs, ctx: &Context) -> Result<()> {
    let menu = ctx.menu();

    if let Some(id) = args.product {
        let product = menu.require_product(ProductId::new(id))?;
        return show_product(product, ctx);
    }

    match args.category {
        Some(category) => list_category(&menu, &CategoryId::new(category), ctx),
        None => list_menu(&menu, ctx),
    }
}

fn list_menu(menu: &Menu, ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(menu);
        return Ok(());
    }

    for (category, count) in menu.category_counts() {
        if count == 0 {
            continue;
        }
        ctx.output.header(&format!("{} ({})", category.name, count));
        for product in menu.products_in(&category.id) {
            product_row(product, ctx);
        }
    }

    Ok(())
}

fn list_category(menu: &Menu, category: &CategoryId, ctx: &Context) -> Result<()> {
    let Some(found) = menu.category(category) else {
        bail!("Unknown category: {}", category);
    };
    let products: Vec<&MenuProduct> = menu.products_in(category).collect();

    if ctx.output.is_json() {
        ctx.output.json(&products);
        return Ok(());
    }

    ctx.output.header(&found.name);
    if products.is_empty() {
        ctx.output.info("No products in this category");
    }
    for product in products {
        product_row(product, ctx);
    }

    Ok(())
}

fn product_row(product: &MenuProduct, ctx: &Context) {
    let id = product.id.to_string();
    let price = product.price.display();
    let mut badges = Vec::new();
    if product.badges.popular {
        badges.push(badge("popular"));
    }
    if product.badges.spicy {
        badges.push(badge("spicy"));
    }
    if product.badges.new {
        badges.push(badge("new"));
    }
    let customizable = if product.is_customizable() { "customizable" } else { "" };
    ctx.output.table_row(
        &[&id, &product.name, &price, customizable, &badges.join(" ")],
        &[4, 26, 10, 12, 0],
    );
}

fn show_product(product: &MenuProduct, ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(product);
        return Ok(());
    }

    ctx.output.header(&product.name);
    ctx.output.kv("id", &product.id.to_string());
    ctx.output.kv("price", &product.price.display());
    if !product.full_description.is_empty() {
        ctx.output.kv("description", &product.full_description);
    } else if !product.description.is_empty() {
        ctx.output.kv("description", &product.description);
    }
    if product.calories > 0 {
        ctx.output.kv("calories", &format!("{} kcal", product.calories));
    }
    if let Some(rating) = product.rating {
        ctx.output.kv("rating", &format!("{:.1}", rating));
    }
    if !product.allergens.is_empty() {
        ctx.output.kv("allergens", &product.allergens.join(", "));
    }

    for group in &product.customizations {
        let required = if group.required {
            style(" required").red().to_string()
        } else {
            String::new()
        };
        ctx.output.info(&format!(
            "{} [{}] {}{}",
            style(&group.title).bold(),
            group.id,
            style(&group.subtitle).dim(),
            required
        ));
        for option in &group.options {
            ctx.output
                .list_item(&format!("{} [{}] +{}", option.name, option.id, option.price.display()));
        }
    }

    if !product.related_items.is_empty() {
        ctx.output.info(&style("Add-ons").bold().to_string());
        for item in &product.related_items {
            ctx.output
                .list_item(&format!("{} [{}] +{}", item.name, item.id, item.price.display()));
        }
    }

    Ok(())
}
