//! Catalog lookup seam.

use std::path::Path;

use serde::Deserialize;

use crate::catalog::Product;
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::{Currency, Money};

/// Source of product snapshots.
///
/// The cart core never writes to the catalog; it only reads price and stock
/// at the moment a product is added.
pub trait CatalogStore {
    /// All products, in catalog order.
    fn list_products(&self) -> Vec<Product>;

    /// A single product by id.
    fn get_product(&self, id: &ProductId) -> Result<Product, CommerceError>;
}

/// Catalog held in memory, typically loaded from a JSON file.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    products: Vec<Product>,
}

/// On-disk product record: prices are bare numbers in the store currency.
#[derive(Debug, Deserialize)]
struct ProductRecord {
    id: ProductId,
    name: String,
    price: i64,
    stock: i64,
    #[serde(default)]
    image: String,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    description: Option<String>,
}

impl StaticCatalog {
    /// Create a catalog from products.
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// Parse a JSON array of product records.
    pub fn from_json(json: &str, currency: Currency) -> Result<Self, CommerceError> {
        let records: Vec<ProductRecord> = serde_json::from_str(json)?;
        let products = records
            .into_iter()
            .map(|r| Product {
                id: r.id,
                name: r.name,
                price: Money::new(r.price, currency),
                stock: r.stock,
                image: r.image,
                category: r.category,
                description: r.description,
            })
            .collect();
        Ok(Self { products })
    }

    /// Load a JSON catalog file.
    pub fn load(path: impl AsRef<Path>, currency: Currency) -> Result<Self, CommerceError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            CommerceError::Config(format!("Failed to read catalog {}: {}", path.display(), e))
        })?;
        Self::from_json(&content, currency)
    }

    /// Number of products.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Check if the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

impl CatalogStore for StaticCatalog {
    fn list_products(&self) -> Vec<Product> {
        self.products.clone()
    }

    fn get_product(&self, id: &ProductId) -> Result<Product, CommerceError> {
        self.products
            .iter()
            .find(|p| &p.id == id)
            .cloned()
            .ok_or_else(|| CommerceError::ProductNotFound(id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CATALOG: &str = r#"[
        {"id": "1", "name": "Premium Wireless Headphones", "price": 24999, "stock": 50,
         "category": "Electronics"},
        {"id": "2", "name": "Smart Fitness Watch", "price": 15999, "stock": 75}
    ]"#;

    #[test]
    fn test_from_json() {
        let catalog = StaticCatalog::from_json(CATALOG, Currency::INR).unwrap();
        assert_eq!(catalog.len(), 2);

        let watch = catalog.get_product(&ProductId::new("2")).unwrap();
        assert_eq!(watch.price, Money::inr(15999));
        assert_eq!(watch.stock, 75);
        assert!(watch.image.is_empty());
    }

    #[test]
    fn test_get_missing_product() {
        let catalog = StaticCatalog::from_json(CATALOG, Currency::INR).unwrap();
        let result = catalog.get_product(&ProductId::new("99"));
        assert!(matches!(result, Err(CommerceError::ProductNotFound(id)) if id == "99"));
    }

    #[test]
    fn test_malformed_json() {
        let result = StaticCatalog::from_json("{not json", Currency::INR);
        assert!(matches!(result, Err(CommerceError::SerializationError(_))));
    }
}
