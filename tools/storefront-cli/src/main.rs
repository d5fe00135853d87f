//! Storefront CLI - browse the menu and exercise the cart from a terminal.
//!
//! Commands:
//! - `storefront menu` - List categories and products
//! - `storefront replay` - Run a scripted customer session against a fresh cart
//! - `storefront cart` - Show the last mirrored cart
//! - `storefront quote` - Checkout totals for a subtotal
//! - `storefront config` - Manage configuration

mod commands;
mod context;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{CartArgs, ConfigArgs, MenuArgs, QuoteArgs, ReplayArgs};

/// Storefront CLI - inspect the menu, replay cart sessions, quote checkouts
#[derive(Parser)]
#[command(name = "storefront")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the menu
    Menu(MenuArgs),

    /// Replay a scripted cart session
    Replay(ReplayArgs),

    /// Show the mirrored cart
    Cart(CartArgs),

    /// Checkout totals for a subtotal
    Quote(QuoteArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_tracing(cli.verbose);

    let output = output::Output::new(cli.verbose, cli.json);

    let config_path = cli.config.as_deref();
    let ctx = match context::Context::load(config_path, output.clone()) {
        Ok(ctx) => ctx,
        Err(e) => {
            output.error(&format!("{:#}", e));
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Commands::Menu(args) => commands::menu::run(args, &ctx),
        Commands::Replay(args) => commands::replay::run(args, &ctx),
        Commands::Cart(args) => commands::cart::run(args, &ctx),
        Commands::Quote(args) => commands::quote::run(args, &ctx),
        Commands::Config(args) => commands::config::run(args, &ctx),
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}

/// Logs go to stderr, filtered by `RUST_LOG`; `-v` lowers the default to debug.
fn setup_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use commands::{ConfigCommand, ConfigFormat};

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_config_init_format_is_separate_from_json_output() {
        let cli = Cli::try_parse_from(["storefront", "config", "init", "--format", "json"]).unwrap();
        assert!(!cli.json);
        match cli.command {
            Commands::Config(args) => assert!(matches!(
                args.command,
                ConfigCommand::Init {
                    format: ConfigFormat::Json,
                    ..
                }
            )),
            _ => panic!("expected config command"),
        }

        let cli = Cli::try_parse_from(["storefront", "--json", "config", "init"]).unwrap();
        assert!(cli.json);
        match cli.command {
            Commands::Config(args) => assert!(matches!(
                args.command,
                ConfigCommand::Init {
                    format: ConfigFormat::Toml,
                    ..
                }
            )),
            _ => panic!("expected config command"),
        }
    }
}
