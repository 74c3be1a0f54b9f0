//! Commerce error types.

use crate::checkout::{SubmissionError, ValidationErrors};
use crate::money::Money;
use thiserror::Error;

/// Errors that can occur in cart, pricing and checkout operations.
///
/// None of these are fatal: every variant leaves the store in the state it
/// was in before the failing call, so the user can simply retry.
#[derive(Error, Debug)]
pub enum CommerceError {
    /// Product not found in the catalog.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Requested quantity exceeds the known stock.
    #[error("Only {available} units available for {product_id} (requested {requested})")]
    StockExceeded {
        product_id: String,
        requested: i64,
        available: i64,
    },

    /// Invalid quantity.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(i64),

    /// No coupon with this code exists.
    #[error("Invalid coupon code: {0}")]
    CouponNotFound(String),

    /// The cart subtotal is below the coupon's minimum order amount.
    #[error("Minimum order amount for coupon {code} is {minimum} (subtotal is {subtotal})")]
    CouponMinimumNotMet {
        code: String,
        minimum: Money,
        subtotal: Money,
    },

    /// Shipping option id is not in the configured catalog.
    #[error("Unknown shipping option: {0}")]
    UnknownShippingOption(String),

    /// One or more checkout fields are missing or malformed.
    #[error("Validation failed: {0}")]
    ValidationFailed(ValidationErrors),

    /// Checkout was attempted with nothing to buy.
    #[error("Cannot check out an empty cart")]
    EmptyCart,

    /// Invalid checkout state transition.
    #[error("Invalid checkout transition from {from} to {to}")]
    InvalidCheckoutTransition { from: String, to: String },

    /// The order submission collaborator reported failure.
    #[error("Order submission failed: {0}")]
    OrderSubmissionFailed(#[from] SubmissionError),

    /// Currency mismatch.
    #[error("Currency mismatch: expected {expected}, got {got}")]
    CurrencyMismatch { expected: String, got: String },

    /// Arithmetic overflow.
    #[error("Arithmetic overflow in money calculation")]
    Overflow,

    /// Store configuration is invalid or unreadable.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Cache error.
    #[error("Cache error: {0}")]
    CacheError(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<shopfront_cache::CacheError> for CommerceError {
    fn from(e: shopfront_cache::CacheError) -> Self {
        CommerceError::CacheError(e.to_string())
    }
}

impl From<serde_json::Error> for CommerceError {
    fn from(e: serde_json::Error) -> Self {
        CommerceError::SerializationError(e.to_string())
    }
}

impl From<ValidationErrors> for CommerceError {
    fn from(e: ValidationErrors) -> Self {
        CommerceError::ValidationFailed(e)
    }
}
