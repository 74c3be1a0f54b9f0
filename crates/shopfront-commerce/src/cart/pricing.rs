//! Cart pricing calculations.
//!
//! Everything here is a pure function of line items, an optional coupon and
//! a shipping option. The cart store calls into it; nothing here touches
//! state or the cache.

use crate::cart::{Coupon, LineItem};
use crate::checkout::ShippingOption;
use crate::error::CommerceError;
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// Pricing breakdown for a cart or a buy-now item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CartTotals {
    /// Sum of unit price times quantity.
    pub subtotal: Money,
    /// Coupon discount actually granted (zero when none applies).
    pub discount: Money,
    /// Shipping cost.
    pub shipping: Money,
    /// `max(0, subtotal - discount + shipping)`.
    pub total: Money,
    /// Code of the coupon that contributed the discount.
    pub coupon_code: Option<String>,
}

impl CartTotals {
    /// Check if a discount was granted.
    pub fn has_discount(&self) -> bool {
        self.discount.is_positive()
    }
}

/// Sum of `unit_price * quantity` over all items.
pub fn subtotal(items: &[LineItem], currency: Currency) -> Result<Money, CommerceError> {
    items.iter().try_fold(Money::zero(currency), |acc, item| {
        acc.checked_add(&item.line_total()?)
    })
}

/// Discount a coupon grants on `subtotal`, ignoring its minimum.
pub fn discount(subtotal: &Money, coupon: Option<&Coupon>) -> Result<Money, CommerceError> {
    match coupon {
        Some(coupon) => coupon.discount_on(subtotal),
        None => Ok(Money::zero(subtotal.currency)),
    }
}

/// Flat price of the shipping option.
pub fn shipping_cost(option: &ShippingOption, currency: Currency) -> Money {
    option.cost(currency)
}

/// `max(0, subtotal - discount + shipping)`.
pub fn final_total(
    subtotal: &Money,
    discount: &Money,
    shipping: &Money,
) -> Result<Money, CommerceError> {
    let total = subtotal.checked_sub(discount)?.checked_add(shipping)?;
    Ok(total.clamp_non_negative())
}

/// Price a set of items. A coupon whose minimum the subtotal does not reach
/// contributes nothing.
pub fn quote(
    items: &[LineItem],
    coupon: Option<&Coupon>,
    shipping: &ShippingOption,
    currency: Currency,
) -> Result<CartTotals, CommerceError> {
    let subtotal = subtotal(items, currency)?;
    let coupon = coupon.filter(|c| c.is_eligible(&subtotal));
    let discount = discount(&subtotal, coupon)?;
    let shipping = shipping_cost(shipping, currency);
    let total = final_total(&subtotal, &discount, &shipping)?;

    Ok(CartTotals {
        subtotal,
        discount,
        shipping,
        total,
        coupon_code: coupon.map(|c| c.code.clone()),
    })
}
