//! Shipping option commands.

use anyhow::Result;

use super::cart::print_summary;
use super::ShippingArgs;
use crate::context::Context;

/// List shipping options, or select one.
pub async fn run(args: ShippingArgs, ctx: &Context) -> Result<()> {
    let mut store = ctx.open_store()?;

    let Some(id) = args.id else {
        if ctx.output.is_json() {
            ctx.output.json(&store.shipping_options());
            return Ok(());
        }

        ctx.output.header("Shipping options");
        let selected = store.shipping().id.clone();
        for option in store.shipping_options() {
            let marker = if option.id == selected { "*" } else { " " };
            ctx.output.list_item(&format!(
                "{marker} {:<10} {:<20} {:<8} {}",
                option.id,
                option.label,
                option.price_label(store.currency()),
                option.estimated_window
            ));
        }
        return Ok(());
    };

    let option = store.select_shipping(&id)?;
    ctx.output
        .success(&format!("{} selected ({})", option.label, option.estimated_window));
    print_summary(ctx, &mut store)
}
