//! Shop CLI - Terminal storefront for the Shopfront cart and checkout core.
//!
//! Commands:
//! - `shop products` - Browse the catalog
//! - `shop show` - Show the cart, saved items and totals
//! - `shop add` / `remove` / `qty` / `clear` - Edit the cart
//! - `shop save` / `restore` / `unsave` - Manage saved-for-later items
//! - `shop coupon` - Apply, remove or list coupons
//! - `shop shipping` - List or select shipping options
//! - `shop checkout` - Place an order
//! - `shop config` - Manage configuration

mod commands;
mod config;
mod context;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use commands::{
    AddArgs, CheckoutArgs, ConfigArgs, CouponArgs, ItemArgs, ProductsArgs, QuantityArgs,
    ShippingArgs,
};
use context::GlobalOptions;

/// Shop CLI - Browse products, fill a cart and check out
#[derive(Parser)]
#[command(name = "shop")]
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

    /// Directory the cart is stored in
    #[arg(long, global = true)]
    data_dir: Option<String>,

    /// Product catalog JSON file
    #[arg(long, global = true)]
    catalog: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List products, or show one
    Products(ProductsArgs),

    /// Show the cart
    Show,

    /// Add a product to the cart
    Add(AddArgs),

    /// Remove a product from the cart
    Remove(ItemArgs),

    /// Change the quantity of a cart item
    Qty(QuantityArgs),

    /// Move a cart item to saved for later
    Save(ItemArgs),

    /// Move a saved item back to the cart
    Restore(ItemArgs),

    /// Remove a saved item
    Unsave(ItemArgs),

    /// Empty the cart
    Clear,

    /// Manage the coupon
    Coupon(CouponArgs),

    /// List or select shipping options
    Shipping(ShippingArgs),

    /// Check out the cart or a single product
    Checkout(CheckoutArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(verbose);

    // A second init (tests, embedding) keeps the first subscriber.
    let _ = tracing_subscriber::registry()
        .with(fmt_layer)
        .with(filter)
        .try_init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    // Setup output formatting
    let output = output::Output::new(cli.verbose, cli.json);

    // Load config
    let options = GlobalOptions {
        config: cli.config.as_deref(),
        data_dir: cli.data_dir.as_deref(),
        catalog: cli.catalog.as_deref(),
    };
    let ctx = match context::Context::load(options, output.clone()) {
        Ok(ctx) => ctx,
        Err(e) => {
            output.error(&format!("{:#}", e));
            std::process::exit(1);
        }
    };

    // Execute command
    let result = match cli.command {
        Commands::Products(args) => commands::products::run(args, &ctx).await,
        Commands::Show => commands::cart::show(&ctx).await,
        Commands::Add(args) => commands::cart::add(args, &ctx).await,
        Commands::Remove(args) => commands::cart::remove(args, &ctx).await,
        Commands::Qty(args) => commands::cart::quantity(args, &ctx).await,
        Commands::Save(args) => commands::saved::save(args, &ctx).await,
        Commands::Restore(args) => commands::saved::restore(args, &ctx).await,
        Commands::Unsave(args) => commands::saved::unsave(args, &ctx).await,
        Commands::Clear => commands::cart::clear(&ctx).await,
        Commands::Coupon(args) => commands::coupon::run(args, &ctx).await,
        Commands::Shipping(args) => commands::shipping::run(args, &ctx).await,
        Commands::Checkout(args) => commands::checkout::run(args, &ctx).await,
        Commands::Config(args) => commands::config::run(args, &ctx).await,
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
