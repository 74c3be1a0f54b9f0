//! Checkout module.
//!
//! Contains the checkout wizard, its forms, shipping options and the order
//! submission seam.

mod flow;
mod info;
mod order;
mod payment;
mod shipping;
mod validation;

pub use flow::{CheckoutFlow, CheckoutSource, CheckoutStep};
pub use info::ShippingInfo;
pub use order::{OrderConfirmation, OrderRequest, OrderSubmitter, SimulatedGateway, SubmissionError};
pub use payment::{CardDetails, PaymentDetails, PaymentMethod, PaymentSummary};
pub use shipping::{cheapest_option, ShippingOption};
pub use validation::{FieldError, ValidationErrors};
