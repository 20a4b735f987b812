//! Output formatting for the CLI.

use console::style;
use store_core::cart::CartSnapshot;
use store_core::catalog::Product;

/// Output handler for CLI messages.
#[derive(Clone)]
pub struct Output {
    verbose: bool,
    json: bool,
}

impl Output {
    /// Create a new output handler.
    pub fn new(verbose: bool, json: bool) -> Self {
        Self { verbose, json }
    }

    /// Print a success message.
    pub fn success(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("✓").green(), msg);
    }

    /// Print a warning message.
    pub fn warn(&self, msg: &str) {
        if self.json {
            return;
        }
        eprintln!("{} {}", style("⚠").yellow(), msg);
    }

    /// Print an error message.
    pub fn error(&self, msg: &str) {
        if self.json {
            eprintln!("{}", serde_json::json!({ "error": msg }));
            return;
        }
        eprintln!("{} {}", style("✗").red(), style(msg).red());
    }

    /// Print a debug message (only in verbose mode).
    pub fn debug(&self, msg: &str) {
        if !self.verbose || self.json {
            return;
        }
        eprintln!("{} {}", style("→").dim(), style(msg).dim());
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
        println!("  {}", formatted.join("  "));
    }

    /// Print a catalog listing.
    pub fn products(&self, products: &[Product]) {
        if self.json {
            self.json(&products);
            return;
        }
        let widths = [4, 24, 10, 10, 24];
        self.table_row(&["ID", "NAME", "PRICE", "COMPANY", "COLORS"], &widths);
        for product in products {
            let price = product.price.display();
            let colors = product.colors.join(", ");
            self.table_row(
                &[
                    product.id.as_str(),
                    &product.name,
                    &price,
                    product.company.as_deref().unwrap_or("-"),
                    &colors,
                ],
                &widths,
            );
        }
    }

    /// Print a cart snapshot: lines, view state and totals.
    pub fn snapshot(&self, snapshot: &CartSnapshot) {
        if self.json {
            self.json(snapshot);
            return;
        }

        if snapshot.cart.is_empty() {
            println!("  {}", style("cart is empty").dim());
        } else {
            let widths = [4, 24, 6, 10];
            for line in &snapshot.cart {
                let count = format!("x{}", line.count);
                let total = line.total.display();
                self.table_row(&[line.id.as_str(), &line.name, &count, &total], &widths);
            }
        }

        self.kv("subtotal", &snapshot.totals.subtotal.display());
        self.kv("tax", &snapshot.totals.tax.display());
        self.kv("total", &style(snapshot.totals.total.display()).bold().to_string());
        self.kv("items", &snapshot.item_count.to_string());
        self.kv("detail", &snapshot.detail_product.name);
        if snapshot.modal_open {
            self.kv("modal", &snapshot.modal_product.name);
        }
    }

    /// Check if JSON mode is enabled.
    pub fn is_json(&self) -> bool {
        self.json
    }
}
