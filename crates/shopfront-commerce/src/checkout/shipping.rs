//! Shipping option types.

use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// A delivery tier with a flat price.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ShippingOption {
    /// Unique identifier (e.g., "express").
    pub id: String,
    /// Display name.
    pub label: String,
    /// Flat price in whole store-currency units.
    pub price: i64,
    /// Delivery estimate (e.g., "1-2 business days").
    pub estimated_window: String,
}

impl ShippingOption {
    /// Create a new shipping option.
    pub fn new(
        id: impl Into<String>,
        label: impl Into<String>,
        price: i64,
        estimated_window: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            price,
            estimated_window: estimated_window.into(),
        }
    }

    /// Price as money in the store currency.
    pub fn cost(&self, currency: Currency) -> Money {
        Money::new(self.price, currency)
    }

    /// Check if this is free shipping.
    pub fn is_free(&self) -> bool {
        self.price == 0
    }

    /// Price label for display ("Free" or the formatted amount).
    pub fn price_label(&self, currency: Currency) -> String {
        if self.is_free() {
            "Free".to_string()
        } else {
            self.cost(currency).display()
        }
    }
}

/// The cheapest option; the first one wins a tie.
pub fn cheapest_option(options: &[ShippingOption]) -> Option<&ShippingOption> {
    options.iter().reduce(|best, o| if o.price < best.price { o } else { best })
}
