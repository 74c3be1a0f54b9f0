//! Output formatting for the CLI.

use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use shopfront_commerce::cart::CartTotals;
use shopfront_commerce::notify::{Level, Notification, Notifier};

/// Output handler for CLI messages.
#[derive(Debug, Clone)]
pub struct Output {
    verbose: bool,
    json: bool,
}

impl Output {
    /// Create a new output handler.
    pub fn new(verbose: bool, json: bool) -> Self {
        Self { verbose, json }
    }

    /// Print an info message.
    pub fn info(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("ℹ").blue(), msg);
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

    /// Print a step in a process.
    pub fn step(&self, num: usize, total: usize, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style(format!("[{}/{}]", num, total)).dim(), msg);
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
        println!("  {}", formatted.join("  ").trim_end());
    }

    /// Print the order summary block.
    pub fn totals(&self, totals: &CartTotals) {
        if self.json {
            return;
        }
        self.kv("Subtotal", &totals.subtotal.to_string());
        if totals.has_discount() {
            let label = match &totals.coupon_code {
                Some(code) => format!("Discount ({code})"),
                None => "Discount".to_string(),
            };
            self.kv(&label, &format!("-{}", totals.discount));
        }
        let shipping = if totals.shipping.is_zero() {
            "FREE".to_string()
        } else {
            totals.shipping.to_string()
        };
        self.kv("Shipping", &shipping);
        println!("  {}: {}", style("Total").bold(), style(totals.total).bold());
    }

    /// Create a spinner for indeterminate progress.
    pub fn spinner(&self, msg: &str) -> ProgressBar {
        if self.json {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.set_message(msg.to_string());
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        pb
    }

    /// Check if JSON mode is enabled.
    pub fn is_json(&self) -> bool {
        self.json
    }
}

/// Routes cart store notifications to the terminal.
///
/// Errors are left to the command's own error report, so they only show up
/// here in verbose mode.
#[derive(Debug, Clone)]
pub struct OutputNotifier {
    output: Output,
}

impl OutputNotifier {
    pub fn new(output: Output) -> Self {
        Self { output }
    }
}

impl Notifier for OutputNotifier {
    fn notify(&self, notification: Notification) {
        let message = notification.message.as_str();
        match notification.level {
            Level::Success => self.output.success(message),
            Level::Info => self.output.info(message),
            Level::Warning => self.output.warn(message),
            Level::Error => self.output.debug(message),
        }
    }
}

/// Colour a stock count by how many are left.
pub fn stock_badge(stock: i64) -> String {
    match stock {
        s if s <= 0 => style("out of stock").red().to_string(),
        s if s <= 5 => style(format!("only {s} left")).yellow().to_string(),
        s => style(format!("{s} in stock")).green().to_string(),
    }
}

/// Shorten text to `max` characters, marking the cut with an ellipsis.
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(1)).collect();
    format!("{kept}…")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Wireless Headphones", 40), "Wireless Headphones");
        assert_eq!(truncate("Wireless Headphones", 8), "Wireles…");
        assert_eq!(truncate("₹₹₹₹", 3), "₹₹…");
    }
}
