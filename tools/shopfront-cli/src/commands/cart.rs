//! Cart commands: show, add, remove, change quantity, clear.

use anyhow::Result;
use serde::Serialize;
use shopfront_commerce::cart::{CartStore, CartTotals, Coupon, LineItem};
use shopfront_commerce::checkout::ShippingOption;
use shopfront_commerce::ids::ProductId;

use super::{AddArgs, ItemArgs, QuantityArgs};
use crate::context::Context;
use crate::output::truncate;

/// Everything `shop show --json` prints.
#[derive(Serialize)]
struct CartView<'a> {
    items: &'a [LineItem],
    saved_for_later: &'a [LineItem],
    coupon: Option<&'a Coupon>,
    shipping: &'a ShippingOption,
    totals: &'a CartTotals,
}

/// Show the cart, saved items and totals.
pub async fn show(ctx: &Context) -> Result<()> {
    let mut store = ctx.open_store()?;
    let totals = store.totals()?;

    if ctx.output.is_json() {
        ctx.output.json(&CartView {
            items: store.items(),
            saved_for_later: store.saved_for_later(),
            coupon: store.applied_coupon(),
            shipping: store.shipping(),
            totals: &totals,
        });
        return Ok(());
    }

    ctx.output.header(&format!("Cart ({} items)", store.item_count()));
    if store.is_empty() {
        ctx.output.info("Your cart is empty");
    } else {
        print_lines(ctx, store.items())?;
    }

    if !store.saved_for_later().is_empty() {
        ctx.output
            .header(&format!("Saved for later ({})", store.saved_for_later().len()));
        for item in store.saved_for_later() {
            ctx.output.list_item(&format!(
                "{} {} ({})",
                item.product_id,
                item.name,
                item.unit_price
            ));
        }
    }

    ctx.output.header("Order summary");
    let shipping = store.shipping();
    ctx.output.kv(
        "Delivery",
        &format!("{} ({})", shipping.label, shipping.estimated_window),
    );
    ctx.output.totals(&totals);
    Ok(())
}

fn print_lines(ctx: &Context, items: &[LineItem]) -> Result<()> {
    let widths = [4, 32, 10, 4, 10];
    ctx.output
        .table_row(&["ID", "NAME", "PRICE", "QTY", "TOTAL"], &widths);
    for item in items {
        let name = truncate(&item.name, 32);
        let price = item.unit_price.to_string();
        let quantity = item.quantity.to_string();
        let line_total = item.line_total()?.to_string();
        ctx.output.table_row(
            &[item.product_id.as_str(), &name, &price, &quantity, &line_total],
            &widths,
        );
    }
    Ok(())
}

/// Add a product from the catalog.
pub async fn add(args: AddArgs, ctx: &Context) -> Result<()> {
    let product = ctx.product(&args.id)?;
    let mut store = ctx.open_store()?;
    store.add_to_cart(&product, args.quantity, args.buy_now)?;

    if args.buy_now {
        ctx.output.info(&format!(
            "Continue with: shop checkout --buy-now {} -q {} --shipping <file> --payment <file>",
            product.id, args.quantity
        ));
    }
    print_summary(ctx, &mut store)
}

/// Remove a product from the cart.
pub async fn remove(args: ItemArgs, ctx: &Context) -> Result<()> {
    let mut store = ctx.open_store()?;
    if !store.remove_from_cart(&ProductId::new(args.id.as_str()))? {
        ctx.output.warn(&format!("{} is not in your cart", args.id));
    }
    print_summary(ctx, &mut store)
}

/// Change a line item's quantity.
pub async fn quantity(args: QuantityArgs, ctx: &Context) -> Result<()> {
    let mut store = ctx.open_store()?;
    let id = ProductId::new(args.id.as_str());
    if store.update_quantity(&id, args.quantity)? {
        if let Some(item) = store.get_item(&id) {
            ctx.output
                .success(&format!("{} quantity set to {}", item.name, item.quantity));
        }
    } else if store.get_item(&id).is_none() && args.quantity > 0 {
        ctx.output.warn(&format!("{} is not in your cart", args.id));
    }
    print_summary(ctx, &mut store)
}

/// Empty the cart. Saved items stay.
pub async fn clear(ctx: &Context) -> Result<()> {
    let mut store = ctx.open_store()?;
    store.clear_cart()?;
    print_summary(ctx, &mut store)
}

/// One-line cart summary after a change, or the totals in JSON mode.
pub(crate) fn print_summary(ctx: &Context, store: &mut CartStore) -> Result<()> {
    let totals = store.totals()?;
    if ctx.output.is_json() {
        ctx.output.json(&totals);
        return Ok(());
    }
    ctx.output.kv(
        "Cart",
        &format!("{} items, total {}", store.item_count(), totals.total),
    );
    Ok(())
}
