//! Checkout confirmation.
//!
//! The flow object gates the steps; this service owns the final transition.
//! On success the cart is cleared and the flow marked complete. On failure
//! both are left untouched so the user can retry without re-entering
//! anything.

use crate::context::ShopContext;
use crate::error::ShopError;
use crate::orders::{OrderReceipt, OrderService};
use vdc_commerce::cart::Cart;
use vdc_commerce::checkout::{CheckoutFlow, CheckoutStep};
use vdc_commerce::money::{Currency, Money};

/// Flat delivery fee charged on every order.
pub fn standard_shipping_fee() -> Money {
    Money::new(50_000, Currency::KES) // KSh 500
}

/// Drives checkout confirmation against the order service.
#[derive(Debug, Clone)]
pub struct CheckoutService {
    orders: OrderService,
    shipping_fee: Money,
}

impl CheckoutService {
    /// Create a checkout service with the standard shipping fee.
    pub fn new(ctx: ShopContext) -> Self {
        Self {
            orders: OrderService::new(ctx),
            shipping_fee: standard_shipping_fee(),
        }
    }

    /// Override the shipping fee.
    pub fn with_shipping_fee(mut self, fee: Money) -> Self {
        self.shipping_fee = fee;
        self
    }

    /// Confirm the order from the review step.
    ///
    /// Validates both accumulated records, computes the subtotal from the
    /// cart, submits, and only then mutates: the cart is cleared and the
    /// flow completed. Every early return leaves cart and flow exactly as
    /// they were.
    pub async fn confirm(
        &self,
        cart: &mut Cart,
        flow: &mut CheckoutFlow,
    ) -> Result<OrderReceipt, ShopError> {
        if flow.step != CheckoutStep::Review {
            return Err(ShopError::NotAtReview(flow.step.as_str().to_string()));
        }
        if cart.is_empty() {
            return Err(ShopError::EmptyCart);
        }
        flow.shipping.validate().map_err(ShopError::Validation)?;
        flow.payment.validate().map_err(ShopError::Validation)?;

        let subtotal = cart.cart_total()?;
        let receipt = self
            .orders
            .create_order(
                &flow.shipping,
                &flow.payment,
                &cart.lines,
                subtotal,
                self.shipping_fee,
            )
            .await?;

        cart.clear();
        flow.complete();
        Ok(receipt)
    }
}
