//! Output formatting for the CLI.

use console::{style, Term};
use storefront_commerce::cart::{CartLineItem, CartState};
use storefront_commerce::checkout::CheckoutTotals;

#[derive(Clone, Copy)]
enum Tone {
    Info,
    Success,
    Warn,
    Error,
    Detail,
}

/// Output handler for CLI messages.
#[derive(Clone)]
pub struct Output {
    verbose: bool,
    json: bool,
    term: Term,
}

impl Output {
    /// Create a new output handler.
    pub fn new(verbose: bool, json: bool) -> Self {
        Self {
            verbose,
            json,
            term: Term::stdout(),
        }
    }

    /// Print an info message.
    pub fn info(&self, msg: &str) {
        self.emit(Tone::Info, msg);
    }

    /// Print a success message.
    pub fn success(&self, msg: &str) {
        self.emit(Tone::Success, msg);
    }

    /// Print a warning message.
    pub fn warn(&self, msg: &str) {
        self.emit(Tone::Warn, msg);
    }

    /// Print an error message. Errors are still reported in JSON mode.
    pub fn error(&self, msg: &str) {
        if self.json {
            eprintln!("{}", serde_json::json!({ "error": msg }));
            return;
        }
        self.emit(Tone::Error, msg);
    }

    /// Print a detail line (only in verbose mode).
    pub fn debug(&self, msg: &str) {
        if self.verbose {
            self.emit(Tone::Detail, msg);
        }
    }

    fn emit(&self, tone: Tone, msg: &str) {
        if self.json {
            return;
        }
        match tone {
            Tone::Info => println!("{} {}", style("ℹ").blue(), msg),
            Tone::Success => println!("{} {}", style("✓").green(), msg),
            Tone::Warn => eprintln!("{} {}", style("⚠").yellow(), msg),
            Tone::Error => eprintln!("{} {}", style("✗").red(), style(msg).red()),
            Tone::Detail => println!("    {}", style(msg).dim()),
        }
    }

    /// Print a header/title.
    pub fn header(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("\n{}", style(msg).bold().underlined());
    }

    /// Print JSON output.
    pub fn json<T: serde::Serialize>(&self, value: &T) {
        if let Ok(json) = serde_json::to_string_pretty(value) {
            println!("{}", json);
        }
    }

    /// Print a key-value pair.
    pub fn kv(&self, key: &str, value: &str) {
        if self.json {
            return;
        }
        println!("  {}: {}", style(key).dim(), value);
    }

    /// Print a list item.
    pub fn list_item(&self, item: &str) {
        if self.json {
            return;
        }
        println!("  {} {}", style("•").dim(), item);
    }

    /// Print a table row.
    pub fn table_row(&self, cols: &[&str], widths: &[usize]) {
        if self.json {
            return;
        }
        let formatted: Vec<String> = cols
            .iter()
            .zip(widths.iter())
            .map(|(col, width)| format!("{:width$}", col, width = width))
            .collect();
        let line = formatted.join("  ");
        println!("  {}", console::truncate_str(&line, self.term_width().saturating_sub(2), "…"));
    }

    /// Print the cart contents.
    pub fn cart(&self, state: &CartState) {
        self.line_items(state.items());
        if self.json || state.is_empty() {
            return;
        }
        self.kv("Items", &state.total_items().to_string());
        self.kv("Subtotal", &state.total_price().display());
    }

    /// Print a list of line items as a table.
    pub fn line_items(&self, items: &[CartLineItem]) {
        if self.json {
            return;
        }
        if items.is_empty() {
            self.info("Your cart is empty");
            return;
        }
        let widths = [4, 26, 4, 12, 12];
        self.table_row(&["ID", "NAME", "QTY", "UNIT", "TOTAL"], &widths);
        for item in items {
            let unit = item.effective_unit_price.display();
            let total = item.line_total().display();
            let id = item.product_id.to_string();
            let quantity = item.quantity.to_string();
            self.table_row(&[&id, &item.name, &quantity, &unit, &total], &widths);
            for (group, options) in item.configuration.customizations() {
                let names: Vec<&str> = options.iter().map(|o| o.as_str()).collect();
                self.debug(&format!("{}: {}", group, names.join(", ")));
            }
            for add_on in item.configuration.related_items() {
                self.debug(&format!("+ {}", add_on));
            }
        }
    }

    /// Print a checkout breakdown.
    pub fn totals(&self, totals: &CheckoutTotals) {
        if self.json {
            return;
        }
        self.header("Order summary");
        self.kv("Subtotal", &totals.subtotal.display());
        let delivery = if totals.free_delivery() {
            style("Free").green().to_string()
        } else {
            totals.delivery_fee.display()
        };
        self.kv("Delivery fee", &delivery);
        self.kv("Service fee", &totals.service_fee.display());
        self.kv("Total", &style(totals.final_total.display()).bold().to_string());
        if totals.show_free_delivery_hint() {
            self.info(&format!(
                "Add {} more for free delivery",
                totals.free_delivery_remaining.display()
            ));
        }
    }

    /// Check if JSON mode is enabled.
    pub fn is_json(&self) -> bool {
        self.json
    }

    /// Get terminal width.
    pub fn term_width(&self) -> usize {
        match self.term.size_checked() {
            Some((_, cols)) => cols as usize,
            None => 120,
        }
    }
}

/// Badge for a product flag.
pub fn badge(label: &str) -> String {
    match label {
        "popular" => style(label).yellow().to_string(),
        "spicy" => style(label).red().to_string(),
        "new" => style(label).green().to_string(),
        _ => style(label).dim().to_string(),
    }
}
