//! Cart and line item types.

use crate::cart::{pricing, Coupon};
use crate::catalog::Product;
use crate::checkout::ShippingOption;
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// A shopping cart with its saved-for-later list and selections.
///
/// Each product appears at most once in `items` and at most once in
/// `saved_for_later`, and never in both.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Cart {
    /// Cart currency. Every line item is priced in it.
    pub currency: Currency,
    /// Items in the cart.
    pub items: Vec<LineItem>,
    /// Items parked outside the cart.
    pub saved_for_later: Vec<LineItem>,
    /// The single applied coupon, if any.
    pub applied_coupon: Option<Coupon>,
    /// Selected shipping option.
    pub shipping: ShippingOption,
}

impl Cart {
    /// Create an empty cart.
    pub fn new(currency: Currency, shipping: ShippingOption) -> Self {
        Self {
            currency,
            items: Vec::new(),
            saved_for_later: Vec::new(),
            applied_coupon: None,
            shipping,
        }
    }

    /// Add `quantity` units of a product.
    ///
    /// A saved-for-later entry for the same product is dropped: a product
    /// lives in the cart or the saved list, never both.
    ///
    /// Returns an error if:
    /// - Quantity is not positive
    /// - The product is priced in another currency
    /// - The resulting quantity would exceed the product's stock
    ///
    /// On error the cart is unchanged.
    pub fn add_item(&mut self, product: &Product, quantity: i64) -> Result<(), CommerceError> {
        if quantity < 1 {
            return Err(CommerceError::InvalidQuantity(quantity));
        }
        self.merge_line(LineItem::from_product(product, quantity))?;
        self.saved_for_later.retain(|i| i.product_id != product.id);
        Ok(())
    }

    /// Remove a product from the cart.
    pub fn remove_item(&mut self, product_id: &ProductId) -> bool {
        let len_before = self.items.len();
        self.items.retain(|i| &i.product_id != product_id);
        self.items.len() < len_before
    }

    /// Set a line item's quantity.
    ///
    /// A quantity below 1 removes the item. Returns whether anything changed.
    pub fn update_quantity(
        &mut self,
        product_id: &ProductId,
        quantity: i64,
    ) -> Result<bool, CommerceError> {
        if quantity < 1 {
            return Ok(self.remove_item(product_id));
        }

        let Some(item) = self.items.iter_mut().find(|i| &i.product_id == product_id) else {
            return Ok(false);
        };

        if quantity > item.stock {
            return Err(CommerceError::StockExceeded {
                product_id: product_id.to_string(),
                requested: quantity,
                available: item.stock,
            });
        }

        item.quantity = quantity;
        Ok(true)
    }

    /// Move a line item from the cart to the saved list.
    ///
    /// An existing saved entry for the same product is replaced.
    pub fn save_for_later(&mut self, product_id: &ProductId) -> bool {
        let Some(pos) = self.items.iter().position(|i| &i.product_id == product_id) else {
            return false;
        };
        let item = self.items.remove(pos);
        self.saved_for_later.retain(|i| &i.product_id != product_id);
        self.saved_for_later.push(item);
        true
    }

    /// Move a saved item back into the cart, merging with any quantity
    /// already there.
    ///
    /// Runs the same stock check as [`Cart::add_item`]; if it fails nothing
    /// moves.
    pub fn move_to_cart(&mut self, product_id: &ProductId) -> Result<bool, CommerceError> {
        let Some(pos) = self
            .saved_for_later
            .iter()
            .position(|i| &i.product_id == product_id)
        else {
            return Ok(false);
        };

        let line = self.saved_for_later[pos].clone();
        self.merge_line(line)?;
        self.saved_for_later.remove(pos);
        Ok(true)
    }

    /// Drop an entry from the saved list.
    pub fn remove_saved(&mut self, product_id: &ProductId) -> bool {
        let len_before = self.saved_for_later.len();
        self.saved_for_later.retain(|i| &i.product_id != product_id);
        self.saved_for_later.len() < len_before
    }

    /// Empty the cart and drop the coupon. Saved items stay.
    pub fn clear(&mut self) {
        self.items.clear();
        self.applied_coupon = None;
    }

    /// Sum of line totals.
    pub fn subtotal(&self) -> Result<Money, CommerceError> {
        pricing::subtotal(&self.items, self.currency)
    }

    /// Get total item count (sum of quantities).
    pub fn item_count(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Check if cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Get a cart item by product ID.
    pub fn get_item(&self, product_id: &ProductId) -> Option<&LineItem> {
        self.items.iter().find(|i| &i.product_id == product_id)
    }

    /// Get a saved item by product ID.
    pub fn get_saved(&self, product_id: &ProductId) -> Option<&LineItem> {
        self.saved_for_later
            .iter()
            .find(|i| &i.product_id == product_id)
    }

    fn merge_line(&mut self, line: LineItem) -> Result<(), CommerceError> {
        if line.unit_price.currency != self.currency {
            return Err(CommerceError::CurrencyMismatch {
                expected: self.currency.code().to_string(),
                got: line.unit_price.currency.code().to_string(),
            });
        }

        let existing = self.items.iter().position(|i| i.product_id == line.product_id);
        let current = existing.map(|pos| self.items[pos].quantity).unwrap_or(0);
        let requested = current
            .checked_add(line.quantity)
            .ok_or(CommerceError::Overflow)?;

        if requested > line.stock {
            return Err(CommerceError::StockExceeded {
                product_id: line.product_id.to_string(),
                requested,
                available: line.stock,
            });
        }

        match existing {
            Some(pos) => {
                // Refresh price and stock from the newer snapshot.
                self.items[pos] = LineItem {
                    quantity: requested,
                    ..line
                };
            }
            None => self.items.push(line),
        }
        Ok(())
    }
}

/// A product entry in the cart or the saved list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LineItem {
    /// Product ID.
    pub product_id: ProductId,
    /// Product name (denormalized for display).
    pub name: String,
    /// Unit price at the time the item was added.
    pub unit_price: Money,
    /// Quantity, at least 1.
    pub quantity: i64,
    /// Image URL.
    #[serde(default)]
    pub image: String,
    /// Stock reported by the catalog when the item was added.
    pub stock: i64,
}

impl LineItem {
    /// Snapshot a product into a line item.
    pub fn from_product(product: &Product, quantity: i64) -> Self {
        Self {
            product_id: product.id.clone(),
            name: product.name.clone(),
            unit_price: product.price,
            quantity,
            image: product.image.clone(),
            stock: product.stock,
        }
    }

    /// `unit_price * quantity`.
    pub fn line_total(&self) -> Result<Money, CommerceError> {
        self.unit_price.checked_mul(self.quantity)
    }
}
