//! Product snapshot type.

use crate::ids::ProductId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// A product as last fetched from the catalog.
///
/// `stock` is advisory: it is whatever the catalog reported when the
/// snapshot was taken and is not reserved by adding to a cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    /// Unique product identifier.
    pub id: ProductId,
    /// Product name.
    pub name: String,
    /// Unit price.
    pub price: Money,
    /// Units in stock at snapshot time.
    pub stock: i64,
    /// Image URL.
    #[serde(default)]
    pub image: String,
    /// Display category (e.g., "Electronics").
    #[serde(default)]
    pub category: Option<String>,
    /// Short description for listings.
    #[serde(default)]
    pub description: Option<String>,
}

impl Product {
    /// Create a new product with no image, category or description.
    pub fn new(id: impl Into<ProductId>, name: impl Into<String>, price: Money, stock: i64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            stock,
            image: String::new(),
            category: None,
            description: None,
        }
    }

    /// Set the image URL.
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }

    /// Set the category.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Check if any units are in stock.
    pub fn is_in_stock(&self) -> bool {
        self.stock > 0
    }
}
