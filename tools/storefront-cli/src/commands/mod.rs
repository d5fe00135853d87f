//! CLI command implementations.

pub mod cart;
pub mod config;
pub mod menu;
pub mod quote;
pub mod replay;

use clap::{Args, Subcommand, ValueEnum};

/// Arguments for the menu command.
#[derive(Args)]
pub struct MenuArgs {
    /// Only list this category.
    #[arg(short = 'C', long)]
    pub category: Option<String>,

    /// Show a single product with its customization groups.
    #[arg(short, long)]
    pub product: Option<u32>,
}

/// Arguments for the replay command.
#[derive(Args)]
pub struct ReplayArgs {
    /// JSON file with the list of steps.
    pub file: String,

    /// Do not mirror the resulting cart.
    #[arg(long)]
    pub no_mirror: bool,

    /// Print the cart after every step.
    #[arg(long)]
    pub trace_steps: bool,
}

/// Arguments for the cart command.
#[derive(Args)]
pub struct CartArgs {
    /// Also show checkout totals.
    #[arg(short, long)]
    pub totals: bool,
}

/// Arguments for the quote command.
#[derive(Args)]
pub struct QuoteArgs {
    /// Subtotal in major units, e.g. `45` or `12.34`.
    pub amount: String,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Initialize a new config file.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,

        /// File format to write.
        #[arg(long, value_enum, default_value_t = ConfigFormat::Toml)]
        format: ConfigFormat,

        /// Include the sample menu so it can be edited.
        #[arg(long)]
        with_menu: bool,
    },
    /// Validate the config file.
    Validate,
}

/// On-disk format for `config init`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ConfigFormat {
    Toml,
    Json,
}

impl ConfigFormat {
    /// Default file name for this format.
    pub fn file_name(self) -> &'static str {
        match self {
            ConfigFormat::Toml => "storefront.toml",
            ConfigFormat::Json => "storefront.json",
        }
    }
}
