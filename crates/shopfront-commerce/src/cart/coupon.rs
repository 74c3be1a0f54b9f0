//! Coupon types.

use crate::error::CommerceError;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// How a coupon reduces the subtotal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiscountType {
    /// `discount_value` percent of the subtotal.
    Percentage,
    /// `discount_value` whole currency units off.
    Fixed,
}

impl DiscountType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiscountType::Percentage => "percentage",
            DiscountType::Fixed => "fixed",
        }
    }
}

/// A discount rule identified by a code.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Coupon {
    /// Code customers type in. Matched case-insensitively.
    pub code: String,
    /// Percentage or fixed.
    pub discount_type: DiscountType,
    /// Percent (0-100) or amount, depending on `discount_type`.
    pub discount_value: i64,
    /// Subtotal the cart must reach for the coupon to apply.
    #[serde(default)]
    pub minimum_order_amount: i64,
}

impl Coupon {
    /// Create a percentage coupon.
    pub fn percentage(code: impl Into<String>, percent: i64, minimum_order_amount: i64) -> Self {
        Self {
            code: code.into(),
            discount_type: DiscountType::Percentage,
            discount_value: percent,
            minimum_order_amount,
        }
    }

    /// Create a fixed-amount coupon.
    pub fn fixed(code: impl Into<String>, amount: i64, minimum_order_amount: i64) -> Self {
        Self {
            code: code.into(),
            discount_type: DiscountType::Fixed,
            discount_value: amount,
            minimum_order_amount,
        }
    }

    /// Case-insensitive code comparison, ignoring surrounding whitespace.
    pub fn matches_code(&self, code: &str) -> bool {
        self.code.eq_ignore_ascii_case(code.trim())
    }

    /// Minimum order amount in the subtotal's currency.
    pub fn minimum(&self, subtotal: &Money) -> Money {
        Money::new(self.minimum_order_amount, subtotal.currency)
    }

    /// Whether `subtotal` reaches the minimum order amount.
    pub fn is_eligible(&self, subtotal: &Money) -> bool {
        subtotal.amount >= self.minimum_order_amount
    }

    /// Raw discount on `subtotal`. Not clamped to the subtotal.
    pub fn discount_on(&self, subtotal: &Money) -> Result<Money, CommerceError> {
        match self.discount_type {
            DiscountType::Percentage => {
                let percent =
                    u32::try_from(self.discount_value).map_err(|_| CommerceError::Overflow)?;
                subtotal.percentage(percent)
            }
            DiscountType::Fixed => Ok(Money::new(self.discount_value, subtotal.currency)),
        }
    }

    /// Short human description, e.g. "10% off" or "₹500 off".
    pub fn describe(&self, currency: crate::money::Currency) -> String {
        match self.discount_type {
            DiscountType::Percentage => format!("{}% off", self.discount_value),
            DiscountType::Fixed => format!("{} off", Money::new(self.discount_value, currency)),
        }
    }
}
