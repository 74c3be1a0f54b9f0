//! CLI command implementations.

pub mod cart;
pub mod checkout;
pub mod config;
pub mod coupon;
pub mod products;
pub mod saved;
pub mod shipping;

use clap::{Args, Subcommand};

/// Arguments for the products command.
#[derive(Args)]
pub struct ProductsArgs {
    /// Only list products in this category.
    #[arg(short, long)]
    pub category: Option<String>,

    /// Show a single product in detail.
    pub id: Option<String>,
}

/// Arguments for the add command.
#[derive(Args)]
pub struct AddArgs {
    /// Product ID.
    pub id: String,

    /// Quantity to add.
    #[arg(short, long, default_value = "1")]
    pub quantity: i64,

    /// Mark the add as the first step of a buy-now checkout.
    #[arg(long)]
    pub buy_now: bool,
}

/// Arguments for commands that act on one product.
#[derive(Args)]
pub struct ItemArgs {
    /// Product ID.
    pub id: String,
}

/// Arguments for the qty command.
#[derive(Args)]
pub struct QuantityArgs {
    /// Product ID.
    pub id: String,

    /// New quantity. Zero removes the item.
    #[arg(allow_negative_numbers = true)]
    pub quantity: i64,
}

/// Arguments for the coupon command.
#[derive(Args)]
pub struct CouponArgs {
    #[command(subcommand)]
    pub command: CouponCommand,
}

#[derive(Subcommand)]
pub enum CouponCommand {
    /// Apply a coupon code to the cart.
    Apply {
        /// Coupon code (case-insensitive).
        code: String,
    },
    /// Remove the applied coupon.
    Remove,
    /// List available coupons.
    List,
}

/// Arguments for the shipping command.
#[derive(Args)]
pub struct ShippingArgs {
    /// Shipping option to select. Omit to list the options.
    pub id: Option<String>,
}

/// Arguments for the checkout command.
#[derive(Args)]
pub struct CheckoutArgs {
    /// Shipping details (JSON file).
    #[arg(short, long)]
    pub shipping: String,

    /// Payment details (JSON file).
    #[arg(short, long)]
    pub payment: String,

    /// Check out a single product instead of the cart.
    #[arg(long, value_name = "ID")]
    pub buy_now: Option<String>,

    /// Quantity for --buy-now.
    #[arg(short, long, default_value = "1", requires = "buy_now")]
    pub quantity: i64,

    /// Stop at the review step without placing the order.
    #[arg(long)]
    pub dry_run: bool,
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
    },
    /// Validate the config file.
    Validate,
}
