//! Product catalog module.
//!
//! The catalog itself lives outside this crate; here are the product
//! snapshot type and the lookup trait the cart reads through.

mod product;
mod store;

pub use product::Product;
pub use store::{CatalogStore, StaticCatalog};
