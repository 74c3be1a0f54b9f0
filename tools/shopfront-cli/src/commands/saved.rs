//! Saved-for-later commands.

use anyhow::Result;
use shopfront_commerce::ids::ProductId;

use super::cart::print_summary;
use super::ItemArgs;
use crate::context::Context;

/// Move a cart item to the saved list.
pub async fn save(args: ItemArgs, ctx: &Context) -> Result<()> {
    let mut store = ctx.open_store()?;
    if !store.move_to_saved_for_later(&ProductId::new(args.id.as_str()))? {
        ctx.output.warn(&format!("{} is not in your cart", args.id));
    }
    print_summary(ctx, &mut store)
}

/// Move a saved item back into the cart.
pub async fn restore(args: ItemArgs, ctx: &Context) -> Result<()> {
    let mut store = ctx.open_store()?;
    if !store.move_to_cart(&ProductId::new(args.id.as_str()))? {
        ctx.output.warn(&format!("{} is not in your saved items", args.id));
    }
    print_summary(ctx, &mut store)
}

/// Drop a saved item.
pub async fn unsave(args: ItemArgs, ctx: &Context) -> Result<()> {
    let mut store = ctx.open_store()?;
    if !store.remove_saved(&ProductId::new(args.id.as_str()))? {
        ctx.output.warn(&format!("{} is not in your saved items", args.id));
    }
    print_summary(ctx, &mut store)
}
