//! Configuration management commands.

use std::path::PathBuf;

use anyhow::{bail, Result};
use storefront_commerce::config::StorefrontConfig;

use super::{ConfigArgs, ConfigCommand, ConfigFormat};
use crate::context::{Context, CONFIG_NAMES};

/// Run the config command.
pub fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx),
        ConfigCommand::Init {
            force,
            format,
            with_menu,
        } => init_config(force, format, with_menu, ctx),
        ConfigCommand::Validate => validate_config(ctx),
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    ctx.output.header("Current Configuration");
    match &ctx.config_path {
        Some(path) => ctx.output.kv("file", &path.display().to_string()),
        None => ctx.output.kv("file", "(none, using defaults)"),
    }

    let config = &ctx.config;
    ctx.output.kv("currency", config.currency.code());

    ctx.output.info("[checkout]");
    ctx.output.kv(
        "free_delivery_above_cents",
        &config.checkout.free_delivery_above_cents.to_string(),
    );
    ctx.output
        .kv("delivery_fee_cents", &config.checkout.delivery_fee_cents.to_string());
    ctx.output
        .kv("service_fee_bps", &config.checkout.service_fee_bps.to_string());

    ctx.output.info("[ordering]");
    ctx.output.kv("min", &config.ordering.min.to_string());
    ctx.output.kv("max", &config.ordering.max.to_string());

    ctx.output.info("[mirror]");
    ctx.output.kv("enabled", &config.mirror.enabled.to_string());
    ctx.output.kv("key", &config.mirror.key);
    match &config.mirror.dir {
        Some(dir) => ctx.output.kv("dir", &dir.display().to_string()),
        None => ctx.output.kv("dir", "(in-memory)"),
    }

    let menu = ctx.menu();
    let source = if config.menu.is_some() { "config" } else { "built-in sample" };
    ctx.output.info(&format!(
        "menu: {} categories, {} products ({})",
        menu.categories.len(),
        menu.products.len(),
        source
    ));

    Ok(())
}

fn init_config(force: bool, format: ConfigFormat, with_menu: bool, ctx: &Context) -> Result<()> {
    let config_path = ctx.cwd.join(format.file_name());

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    let mut config = StorefrontConfig::default();
    config.mirror.dir = Some(PathBuf::from(".storefront").join("cache"));
    if with_menu {
        config.menu = Some(config.menu());
    }
    config.save(&config_path)?;

    ctx.output.success(&format!("Created: {}", config_path.display()));

    Ok(())
}

fn validate_config(ctx: &Context) -> Result<()> {
    ctx.output.header("Validating configuration");

    let path = ctx.config_path.clone().or_else(|| {
        CONFIG_NAMES
            .iter()
            .map(|name| ctx.cwd.join(name))
            .find(|path| path.exists())
    });
    let Some(path) = path else {
        ctx.output
            .warn("No config file found. Run `storefront config init` to create one.");
        return Ok(());
    };
    ctx.output.kv("file", &path.display().to_string());

    let config = match StorefrontConfig::load(&path) {
        Ok(config) => config,
        Err(e) => {
            ctx.output.error(&format!("Error: {}", e));
            bail!("Configuration is invalid");
        }
    };

    let mut warnings: Vec<String> = Vec::new();

    if config.checkout.service_fee_bps > 2_000 {
        warnings.push(format!(
            "checkout.service_fee_bps is {} ({}%), which is unusually high",
            config.checkout.service_fee_bps,
            config.checkout.service_fee_bps / 100
        ));
    }
    if config.mirror.enabled && config.mirror.dir.is_none() {
        warnings.push("mirror.dir is unset; the mirrored cart will not outlive a run".to_string());
    }
    for product in &config.menu().products {
        for group in &product.customizations {
            if !group.options.is_empty() {
                continue;
            }
            if group.required {
                warnings.push(format!(
                    "product {} can never be added: required group '{}' is empty",
                    product.id, group.id
                ));
            } else {
                warnings.push(format!(
                    "product {} group '{}' has no options",
                    product.id, group.id
                ));
            }
        }
    }

    if warnings.is_empty() {
        ctx.output.success("Configuration is valid");
        return Ok(());
    }

    for warning in &warnings {
        ctx.output.warn(&format!("Warning: {}", warning));
    }
    ctx.output.success("Configuration is valid (with warnings)");

    Ok(())
}
