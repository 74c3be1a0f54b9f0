//! Coupon commands.

use anyhow::Result;
use serde::Serialize;
use shopfront_commerce::cart::Coupon;

use super::cart::print_summary;
use super::{CouponArgs, CouponCommand};
use crate::context::Context;

/// Run the coupon command.
pub async fn run(args: CouponArgs, ctx: &Context) -> Result<()> {
    match args.command {
        CouponCommand::Apply { code } => apply(&code, ctx),
        CouponCommand::Remove => remove(ctx),
        CouponCommand::List => list(ctx),
    }
}

fn apply(code: &str, ctx: &Context) -> Result<()> {
    let mut store = ctx.open_store()?;
    let coupon = store.apply_coupon(code)?;
    ctx.output.kv(
        &coupon.code,
        &coupon.describe(store.currency()),
    );
    print_summary(ctx, &mut store)
}

fn remove(ctx: &Context) -> Result<()> {
    let mut store = ctx.open_store()?;
    if store.applied_coupon().is_none() {
        ctx.output.info("No coupon applied");
        return Ok(());
    }
    store.remove_coupon()?;
    print_summary(ctx, &mut store)
}

#[derive(Serialize)]
struct CouponRow<'a> {
    #[serde(flatten)]
    coupon: &'a Coupon,
    applied: bool,
    eligible: bool,
}

fn list(ctx: &Context) -> Result<()> {
    let store = ctx.open_store()?;
    let subtotal = store.subtotal()?;
    let applied = store.applied_coupon().map(|c| c.code.as_str());

    let rows: Vec<CouponRow<'_>> = store
        .coupons()
        .iter()
        .map(|coupon| CouponRow {
            coupon,
            applied: applied == Some(coupon.code.as_str()),
            eligible: coupon.is_eligible(&subtotal),
        })
        .collect();

    if ctx.output.is_json() {
        ctx.output.json(&rows);
        return Ok(());
    }

    ctx.output.header("Available coupons");
    for row in &rows {
        let minimum = row.coupon.minimum(&subtotal);
        let mut line = format!(
            "{} {}",
            row.coupon.code,
            row.coupon.describe(store.currency())
        );
        if minimum.is_positive() {
            line.push_str(&format!(" on orders of {minimum} or more"));
        }
        if row.applied {
            line.push_str(" (applied)");
        } else if !row.eligible {
            line.push_str(" (not eligible yet)");
        }
        ctx.output.list_item(&line);
    }
    Ok(())
}
