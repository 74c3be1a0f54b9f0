//! Shopping cart module.
//!
//! Contains the cart aggregate, coupons, the pricing engine and the store
//! that owns and persists cart state.

mod cart;
mod coupon;
pub mod pricing;
mod store;

pub use cart::{Cart, LineItem};
pub use coupon::{Coupon, DiscountType};
pub use pricing::CartTotals;
pub use store::{CartStore, CART_KEY, SAVED_KEY, SELECTIONS_KEY};
