//! Checkout flow state machine.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use crate::cart::{CartStore, LineItem};
use crate::catalog::Product;
use crate::checkout::{
    OrderConfirmation, OrderRequest, OrderSubmitter, PaymentDetails, ShippingInfo,
};
use crate::ids::OrderId;
use crate::notify::Notification;
use crate::session::Session;
use crate::CommerceError;

/// Steps in the checkout flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CheckoutStep {
    /// Delivery details.
    Shipping,
    /// Payment method and card details.
    Payment,
    /// Order review before submission.
    Review,
    /// Order accepted. Terminal.
    Submitted,
}

impl CheckoutStep {
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckoutStep::Shipping => "shipping",
            CheckoutStep::Payment => "payment",
            CheckoutStep::Review => "review",
            CheckoutStep::Submitted => "submitted",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            CheckoutStep::Shipping => "Shipping",
            CheckoutStep::Payment => "Payment",
            CheckoutStep::Review => "Review",
            CheckoutStep::Submitted => "Submitted",
        }
    }

    /// Get the step number (1-indexed).
    pub fn number(&self) -> u8 {
        match self {
            CheckoutStep::Shipping => 1,
            CheckoutStep::Payment => 2,
            CheckoutStep::Review => 3,
            CheckoutStep::Submitted => 4,
        }
    }
}

/// What is being bought.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutSource {
    /// Everything in the cart. The cart is cleared once the order goes
    /// through.
    Cart,
    /// A single item bought directly. The cart is never touched.
    BuyNow(LineItem),
}

impl CheckoutSource {
    /// Buy `quantity` units of `product` directly.
    pub fn buy_now(product: &Product, quantity: i64) -> Result<Self, CommerceError> {
        if quantity < 1 {
            return Err(CommerceError::InvalidQuantity(quantity));
        }
        if quantity > product.stock {
            return Err(CommerceError::StockExceeded {
                product_id: product.id.to_string(),
                requested: quantity,
                available: product.stock,
            });
        }
        Ok(CheckoutSource::BuyNow(LineItem::from_product(product, quantity)))
    }

    pub fn is_buy_now(&self) -> bool {
        matches!(self, CheckoutSource::BuyNow(_))
    }
}

/// Checkout wizard: `Shipping -> Payment -> Review -> Submitted`.
///
/// Each forward step validates the form behind it. Going back keeps
/// everything entered so far.
#[derive(Debug, Clone)]
pub struct CheckoutFlow {
    step: CheckoutStep,
    source: CheckoutSource,
    shipping_info: ShippingInfo,
    payment: PaymentDetails,
    confirmation: Option<OrderConfirmation>,
}

impl CheckoutFlow {
    /// Start a checkout with an empty form.
    pub fn new(source: CheckoutSource) -> Self {
        Self {
            step: CheckoutStep::Shipping,
            source,
            shipping_info: ShippingInfo::default(),
            payment: PaymentDetails::default(),
            confirmation: None,
        }
    }

    /// Start a checkout with name and email taken from the session.
    pub fn for_session(source: CheckoutSource, session: &Session) -> Self {
        let mut flow = Self::new(source);
        flow.shipping_info = ShippingInfo::prefilled(session);
        flow
    }

    pub fn step(&self) -> CheckoutStep {
        self.step
    }

    pub fn source(&self) -> &CheckoutSource {
        &self.source
    }

    pub fn shipping_info(&self) -> &ShippingInfo {
        &self.shipping_info
    }

    pub fn shipping_info_mut(&mut self) -> &mut ShippingInfo {
        &mut self.shipping_info
    }

    pub fn set_shipping_info(&mut self, info: ShippingInfo) {
        self.shipping_info = info;
    }

    pub fn payment(&self) -> &PaymentDetails {
        &self.payment
    }

    pub fn payment_mut(&mut self) -> &mut PaymentDetails {
        &mut self.payment
    }

    pub fn set_payment(&mut self, payment: PaymentDetails) {
        self.payment = payment;
    }

    /// Confirmation of the submitted order.
    pub fn confirmation(&self) -> Option<&OrderConfirmation> {
        self.confirmation.as_ref()
    }

    pub fn is_submitted(&self) -> bool {
        self.step == CheckoutStep::Submitted
    }

    /// Items this checkout would order.
    pub fn items(&self, store: &CartStore) -> Vec<LineItem> {
        match &self.source {
            CheckoutSource::Cart => store.items().to_vec(),
            CheckoutSource::BuyNow(item) => vec![item.clone()],
        }
    }

    /// Validate the current step and move to the next one.
    ///
    /// Leaving `Review` happens through [`CheckoutFlow::submit`].
    pub fn advance(&mut self) -> Result<CheckoutStep, CommerceError> {
        let next = match self.step {
            CheckoutStep::Shipping => {
                self.shipping_info.validate()?;
                CheckoutStep::Payment
            }
            CheckoutStep::Payment => {
                self.payment.validate()?;
                CheckoutStep::Review
            }
            CheckoutStep::Review | CheckoutStep::Submitted => {
                return Err(self.invalid_transition(CheckoutStep::Submitted));
            }
        };

        debug!(from = self.step.as_str(), to = next.as_str(), "checkout advanced");
        self.step = next;
        Ok(next)
    }

    /// Go back one step.
    pub fn go_back(&mut self) -> Result<CheckoutStep, CommerceError> {
        let prev = match self.step {
            CheckoutStep::Payment => CheckoutStep::Shipping,
            CheckoutStep::Review => CheckoutStep::Payment,
            CheckoutStep::Shipping | CheckoutStep::Submitted => {
                return Err(CommerceError::InvalidCheckoutTransition {
                    from: self.step.as_str().to_string(),
                    to: "previous".to_string(),
                });
            }
        };

        self.step = prev;
        Ok(prev)
    }

    /// Place the order.
    ///
    /// Only valid at `Review`. Payment details are checked again, the order
    /// is handed to `submitter`, and on success a cart checkout empties the
    /// cart. On any failure the flow stays at `Review` with the cart
    /// untouched, so the customer can try again.
    pub async fn submit(
        &mut self,
        store: &mut CartStore,
        submitter: &dyn OrderSubmitter,
        session: &Session,
    ) -> Result<OrderConfirmation, CommerceError> {
        if self.step != CheckoutStep::Review {
            return Err(self.invalid_transition(CheckoutStep::Submitted));
        }

        if let Err(errors) = self.payment.validate() {
            store.notify(Notification::error(errors.to_string()));
            return Err(errors.into());
        }

        let items = self.items(store);
        if items.is_empty() {
            store.notify(Notification::error("Your cart is empty"));
            return Err(CommerceError::EmptyCart);
        }

        let totals = match &self.source {
            CheckoutSource::Cart => store.totals()?,
            CheckoutSource::BuyNow(_) => store.quote_items(&items)?,
        };

        let request = OrderRequest {
            order_id: OrderId::generate(),
            items,
            shipping_info: self.shipping_info.clone(),
            payment: self.payment.summary(),
            shipping_option: store.shipping().clone(),
            totals,
            customer_id: session.user_id().cloned(),
            placed_at: Utc::now(),
        };

        info!(
            order_id = %request.order_id,
            total = %request.totals.total,
            buy_now = self.source.is_buy_now(),
            "submitting order"
        );
        store.notify(Notification::info("Processing your order..."));

        if let Err(e) = submitter.submit_order(&request).await {
            warn!(order_id = %request.order_id, error = %e, "order submission failed");
            store.notify(Notification::error("Failed to process order. Please try again."));
            return Err(e.into());
        }

        if let CheckoutSource::Cart = self.source {
            if let Err(e) = store.clear_cart() {
                // The order already went through; report success regardless.
                error!(order_id = %request.order_id, error = %e, "failed to clear cart after order");
            }
        }

        let confirmation = request.confirmation();
        self.step = CheckoutStep::Submitted;
        self.confirmation = Some(confirmation.clone());

        info!(order_id = %confirmation.order_id, "order placed");
        store.notify(Notification::success("Order placed successfully!"));
        Ok(confirmation)
    }

    fn invalid_transition(&self, to: CheckoutStep) -> CommerceError {
        CommerceError::InvalidCheckoutTransition {
            from: self.step.as_str().to_string(),
            to: to.as_str().to_string(),
        }
    }
}
