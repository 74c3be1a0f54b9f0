//! Order types and the submission seam.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::cart::{CartTotals, LineItem};
use crate::checkout::{PaymentSummary, ShippingInfo, ShippingOption};
use crate::ids::{OrderId, UserId};
use crate::money::Money;

/// Everything the order backend receives when a checkout is submitted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderRequest {
    /// Customer-facing order number.
    pub order_id: OrderId,
    /// Items being bought.
    pub items: Vec<LineItem>,
    /// Delivery details.
    pub shipping_info: ShippingInfo,
    /// Payment method, without card secrets.
    pub payment: PaymentSummary,
    /// Chosen shipping tier.
    pub shipping_option: ShippingOption,
    /// Price breakdown.
    pub totals: CartTotals,
    /// Signed-in customer, None for guests.
    pub customer_id: Option<UserId>,
    /// When the customer pressed "place order".
    pub placed_at: DateTime<Utc>,
}

impl OrderRequest {
    /// Sum of item quantities.
    pub fn item_count(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// What the customer sees once the order went through.
    pub fn confirmation(&self) -> OrderConfirmation {
        OrderConfirmation {
            order_id: self.order_id.clone(),
            total: self.totals.total,
            item_count: self.item_count(),
            estimated_delivery: self.shipping_option.estimated_window.clone(),
            placed_at: self.placed_at,
        }
    }
}

/// Returned from a successful checkout.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderConfirmation {
    pub order_id: OrderId,
    pub total: Money,
    pub item_count: i64,
    /// Delivery estimate of the chosen shipping option.
    pub estimated_delivery: String,
    pub placed_at: DateTime<Utc>,
}

/// Why the backend did not accept an order.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmissionError {
    /// The backend refused the order (e.g., payment declined).
    #[error("order rejected: {0}")]
    Rejected(String),

    /// The backend could not be reached.
    #[error("order service unavailable: {0}")]
    Unavailable(String),
}

/// Accepts orders on behalf of the store.
#[async_trait]
pub trait OrderSubmitter: Send + Sync {
    /// Submit an order. There is no timeout and no cancellation.
    async fn submit_order(&self, order: &OrderRequest) -> Result<(), SubmissionError>;
}

/// Stand-in gateway: waits a fixed delay, then accepts every order.
#[derive(Debug, Clone)]
pub struct SimulatedGateway {
    delay: Duration,
}

impl SimulatedGateway {
    /// Default processing delay.
    pub const DEFAULT_DELAY: Duration = Duration::from_millis(2000);

    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    /// Accept orders immediately.
    pub fn instant() -> Self {
        Self::new(Duration::ZERO)
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

impl Default for SimulatedGateway {
    fn default() -> Self {
        Self::new(Self::DEFAULT_DELAY)
    }
}

#[async_trait]
impl OrderSubmitter for SimulatedGateway {
    async fn submit_order(&self, order: &OrderRequest) -> Result<(), SubmissionError> {
        debug!(
            order_id = %order.order_id,
            delay_ms = self.delay.as_millis() as u64,
            "processing order"
        );
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        info!(order_id = %order.order_id, total = %order.totals.total, "order accepted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Product;
    use crate::checkout::PaymentDetails;
    use crate::money::Currency;

    fn request() -> OrderRequest {
        let product = Product::new("1", "Premium Wireless Headphones", Money::inr(24999), 5);
        let shipping = ShippingOption::new("express", "Express", 199, "1-2 business days");
        let items = vec![LineItem::from_product(&product, 2)];
        let totals =
            crate::cart::pricing::quote(&items, None, &shipping, Currency::INR).unwrap();

        OrderRequest {
            order_id: OrderId::generate(),
            items,
            shipping_info: ShippingInfo::default(),
            payment: PaymentDetails::cash_on_delivery().summary(),
            shipping_option: shipping,
            totals,
            customer_id: None,
            placed_at: Utc::now(),
        }
    }

    #[test]
    fn test_confirmation() {
        let request = request();
        let confirmation = request.confirmation();
        assert_eq!(confirmation.order_id, request.order_id);
        assert_eq!(confirmation.item_count, 2);
        assert_eq!(confirmation.total.amount, 50197);
        assert_eq!(confirmation.estimated_delivery, "1-2 business days");
    }

    #[tokio::test(start_paused = true)]
    async fn test_simulated_gateway_waits_then_accepts() {
        let gateway = SimulatedGateway::default();
        let started = tokio::time::Instant::now();

        gateway.submit_order(&request()).await.unwrap();
        assert!(started.elapsed() >= Duration::from_millis(2000));
    }

    #[tokio::test]
    async fn test_instant_gateway() {
        let gateway = SimulatedGateway::instant();
        assert!(gateway.delay().is_zero());
        assert!(gateway.submit_order(&request()).await.is_ok());
    }
}
