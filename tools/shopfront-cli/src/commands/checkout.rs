//! Checkout: shipping details, payment, review, place order.

use std::path::Path;

use anyhow::{bail, Context as _, Result};
use serde::de::DeserializeOwned;
use shopfront_commerce::checkout::{
    CheckoutFlow, CheckoutSource, PaymentDetails, PaymentMethod, ShippingInfo,
    SimulatedGateway,
};
use shopfront_commerce::error::CommerceError;

use super::CheckoutArgs;
use crate::context::Context;

const STEPS: usize = 4;

/// Run the checkout command.
pub async fn run(args: CheckoutArgs, ctx: &Context) -> Result<()> {
    let mut store = ctx.open_store()?;
    let session = ctx.session();

    let source = match &args.buy_now {
        Some(id) => CheckoutSource::buy_now(&ctx.product(id)?, args.quantity)?,
        None => CheckoutSource::Cart,
    };
    let mut flow = CheckoutFlow::for_session(source, &session);

    // Step 1: shipping details, on top of whatever the session prefilled
    ctx.output.step(1, STEPS, "Shipping details");
    let info: ShippingInfo = read_json(&ctx.resolve_path(&args.shipping))?;
    merge_shipping_info(flow.shipping_info_mut(), info);
    advance(&mut flow, ctx)?;
    ctx.output.kv("Deliver to", &flow.shipping_info().one_line());

    // Step 2: payment
    ctx.output.step(2, STEPS, "Payment");
    let payment: PaymentDetails = read_json(&ctx.resolve_path(&args.payment))?;
    flow.set_payment(payment);
    advance(&mut flow, ctx)?;
    let summary = flow.payment().summary();
    let method = match (&summary.method, &summary.card_last4) {
        (PaymentMethod::Card, Some(last4)) => format!("Card ending {last4}"),
        (method, _) => method.display_name().to_string(),
    };
    ctx.output.kv("Paying by", &method);

    // Step 3: review
    ctx.output.step(3, STEPS, "Review");
    let items = flow.items(&store);
    if items.is_empty() {
        bail!(CommerceError::EmptyCart);
    }
    for item in &items {
        ctx.output
            .list_item(&format!("{} x{} {}", item.name, item.quantity, item.unit_price));
    }
    let totals = match flow.source() {
        CheckoutSource::Cart => store.totals()?,
        CheckoutSource::BuyNow(_) => store.quote_items(&items)?,
    };
    ctx.output.totals(&totals);

    if args.dry_run {
        ctx.output.info("Dry run: order not placed");
        return Ok(());
    }

    // Step 4: place the order
    ctx.output.step(4, STEPS, "Placing order");
    let gateway = SimulatedGateway::new(ctx.config.store.checkout.simulated_delay());
    let spinner = ctx.output.spinner("Processing payment...");
    let result = flow.submit(&mut store, &gateway, &session).await;
    spinner.finish_and_clear();
    let confirmation = result?;

    if ctx.output.is_json() {
        ctx.output.json(&confirmation);
        return Ok(());
    }

    ctx.output.header("Order confirmed");
    ctx.output.kv("Order ID", confirmation.order_id.as_str());
    ctx.output.kv("Items", &confirmation.item_count.to_string());
    ctx.output.kv("Total", &confirmation.total.to_string());
    ctx.output
        .kv("Estimated delivery", &confirmation.estimated_delivery);
    Ok(())
}

/// Validate the current step, listing every field problem on failure.
fn advance(flow: &mut CheckoutFlow, ctx: &Context) -> Result<()> {
    match flow.advance() {
        Ok(_) => Ok(()),
        Err(CommerceError::ValidationFailed(errors)) => {
            for error in errors.iter() {
                ctx.output
                    .list_item(&format!("{}: {}", error.field, error.message));
            }
            bail!("{} field(s) need attention", errors.len())
        }
        Err(e) => Err(e.into()),
    }
}

/// Fields left blank in the file keep their prefilled value.
fn merge_shipping_info(target: &mut ShippingInfo, from_file: ShippingInfo) {
    let ShippingInfo {
        full_name,
        email,
        phone,
        address,
        city,
        state,
        postal_code,
    } = from_file;

    for (slot, value) in [
        (&mut target.full_name, full_name),
        (&mut target.email, email),
        (&mut target.phone, phone),
        (&mut target.address, address),
        (&mut target.city, city),
        (&mut target.state, state),
        (&mut target.postal_code, postal_code),
    ] {
        if !value.trim().is_empty() {
            *slot = value;
        }
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_values_override_prefill() {
        let mut info = ShippingInfo {
            full_name: "Asha Rao".to_string(),
            email: "asha@example.com".to_string(),
            ..ShippingInfo::default()
        };
        merge_shipping_info(
            &mut info,
            ShippingInfo {
                email: "orders@example.com".to_string(),
                phone: "9876543210".to_string(),
                ..ShippingInfo::default()
            },
        );

        assert_eq!(info.full_name, "Asha Rao");
        assert_eq!(info.email, "orders@example.com");
        assert_eq!(info.phone, "9876543210");
    }
}
