//! Cart, pricing and checkout core for the Shopfront storefront.
//!
//! - **Catalog**: product snapshots and the read-only catalog seam
//! - **Cart**: cart store, saved-for-later list, coupons, pricing engine
//! - **Checkout**: shipping options, the three-step checkout wizard, order
//!   submission
//! - **Config**: coupon and shipping catalogs shared by cart and pricing
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use shopfront_cache::Cache;
//! use shopfront_commerce::prelude::*;
//!
//! let mut store = CartStore::open(
//!     Cache::in_memory(),
//!     StoreConfig::default(),
//!     Arc::new(TracingNotifier),
//! )?;
//!
//! let headphones = Product::new("1", "Premium Wireless Headphones", Money::inr(1000), 10);
//! store.add_to_cart(&headphones, 2, false)?;
//! store.apply_coupon("FLAT500")?;
//!
//! let totals = store.totals()?;
//! assert_eq!(totals.total.display(), "\u{20b9}1,500");
//! # Ok::<(), CommerceError>(())
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod notify;
pub mod session;

pub use error::CommerceError;
pub use ids::*;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money};

    // Catalog
    pub use crate::catalog::{CatalogStore, Product, StaticCatalog};

    // Cart
    pub use crate::cart::{Cart, CartStore, CartTotals, Coupon, DiscountType, LineItem};

    // Checkout
    pub use crate::checkout::{
        CheckoutFlow, CheckoutSource, CheckoutStep, OrderConfirmation, OrderRequest,
        OrderSubmitter, PaymentDetails, PaymentMethod, ShippingInfo, ShippingOption,
        SimulatedGateway, SubmissionError, ValidationErrors,
    };

    pub use crate::config::StoreConfig;
    pub use crate::notify::{Notification, Notifier, RecordingNotifier, TracingNotifier};
    pub use crate::session::{Identity, Role, Session};
}
