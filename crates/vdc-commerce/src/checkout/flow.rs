//! Checkout step machine.
//!
//! Three ordered steps (Shipping, Payment, Review) plus the terminal
//! Complete state. Forward progress is gated on the active step's record
//! validating; going back is unconditional. Validation is derived state,
//! recomputed from the current record on every call, so the "can advance"
//! gate is always current.

use crate::checkout::payment::{PaymentInfo, PaymentMethod};
use crate::checkout::shipping::ShippingInfo;
use crate::checkout::validate::ValidationErrors;
use crate::error::CommerceError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Steps in the checkout flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CheckoutStep {
    /// Shipping details.
    #[default]
    Shipping,
    /// Payment details.
    Payment,
    /// Read-only review before submission.
    Review,
    /// Order placed.
    Complete,
}

impl CheckoutStep {
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckoutStep::Shipping => "shipping",
            CheckoutStep::Payment => "payment",
            CheckoutStep::Review => "review",
            CheckoutStep::Complete => "complete",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            CheckoutStep::Shipping => "Shipping",
            CheckoutStep::Payment => "Payment",
            CheckoutStep::Review => "Review",
            CheckoutStep::Complete => "Complete",
        }
    }

    /// Get the step index (0-indexed).
    pub fn index(&self) -> u8 {
        match self {
            CheckoutStep::Shipping => 0,
            CheckoutStep::Payment => 1,
            CheckoutStep::Review => 2,
            CheckoutStep::Complete => 3,
        }
    }
}

/// Checkout flow state.
///
/// Accumulates the two form records across steps. Neither record is
/// discarded by navigation; only a payment method switch resets data, and
/// then only the payment record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CheckoutFlow {
    /// Current step.
    pub step: CheckoutStep,
    /// Shipping details, accumulated in step 0.
    pub shipping: ShippingInfo,
    /// Payment details, accumulated in step 1.
    pub payment: PaymentInfo,
    /// Fields the user has blurred. Gates error display, not validation.
    touched: BTreeSet<String>,
    /// Unix timestamp of creation.
    pub created_at: i64,
    /// Unix timestamp of last update.
    pub updated_at: i64,
}

impl CheckoutFlow {
    /// Create a new flow at the Shipping step with empty records.
    pub fn new() -> Self {
        let now = current_timestamp();
        Self {
            step: CheckoutStep::Shipping,
            shipping: ShippingInfo::default(),
            payment: PaymentInfo::default(),
            touched: BTreeSet::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Live error map for the active step.
    ///
    /// Recomputed from the current record on every call; Review and
    /// Complete have no fields of their own.
    pub fn errors(&self) -> ValidationErrors {
        let result = match self.step {
            CheckoutStep::Shipping => self.shipping.validate(),
            CheckoutStep::Payment => self.payment.validate(),
            CheckoutStep::Review | CheckoutStep::Complete => Ok(()),
        };
        result.err().unwrap_or_default()
    }

    /// Whether the active step's record passes validation.
    pub fn can_advance(&self) -> bool {
        self.errors().is_empty()
    }

    /// Whether both accumulated records are valid, i.e. the order may be
    /// submitted from Review.
    pub fn can_submit(&self) -> bool {
        self.shipping.validate().is_ok() && self.payment.validate().is_ok()
    }

    /// Advance one step.
    ///
    /// Fails with the active step's error map if validation does not pass.
    /// Review does not advance through here: submission owns the
    /// Review-to-Complete transition via [`CheckoutFlow::complete`].
    pub fn advance(&mut self) -> Result<CheckoutStep, CommerceError> {
        let next = match self.step {
            CheckoutStep::Shipping => CheckoutStep::Payment,
            CheckoutStep::Payment => CheckoutStep::Review,
            CheckoutStep::Review | CheckoutStep::Complete => {
                return Err(CommerceError::InvalidCheckoutTransition {
                    from: self.step.as_str().to_string(),
                    to: "next".to_string(),
                })
            }
        };

        let errors = self.errors();
        if !errors.is_empty() {
            return Err(CommerceError::CheckoutIncomplete(errors));
        }

        self.step = next;
        self.updated_at = current_timestamp();
        Ok(next)
    }

    /// Retreat one step unconditionally.
    pub fn back(&mut self) -> Result<CheckoutStep, CommerceError> {
        let prev = match self.step {
            CheckoutStep::Payment => CheckoutStep::Shipping,
            CheckoutStep::Review => CheckoutStep::Payment,
            CheckoutStep::Shipping | CheckoutStep::Complete => {
                return Err(CommerceError::InvalidCheckoutTransition {
                    from: self.step.as_str().to_string(),
                    to: "back".to_string(),
                })
            }
        };

        self.step = prev;
        self.updated_at = current_timestamp();
        Ok(prev)
    }

    /// Jump from Review back to the Shipping step without losing the
    /// payment record.
    pub fn edit_shipping(&mut self) -> Result<(), CommerceError> {
        self.jump_from_review(CheckoutStep::Shipping)
    }

    /// Jump from Review back to the Payment step without losing the
    /// shipping record.
    pub fn edit_payment(&mut self) -> Result<(), CommerceError> {
        self.jump_from_review(CheckoutStep::Payment)
    }

    fn jump_from_review(&mut self, target: CheckoutStep) -> Result<(), CommerceError> {
        if self.step != CheckoutStep::Review {
            return Err(CommerceError::InvalidCheckoutTransition {
                from: self.step.as_str().to_string(),
                to: target.as_str().to_string(),
            });
        }
        self.step = target;
        self.updated_at = current_timestamp();
        Ok(())
    }

    /// Switch the payment method.
    ///
    /// Replaces the payment record wholesale with the empty form of the new
    /// variant and forgets touched marks for the old variant's fields.
    /// No-op when the method is unchanged.
    pub fn set_payment_method(&mut self, method: PaymentMethod) {
        let current = self.payment.method();
        if current == method {
            return;
        }
        for field in PaymentInfo::fields_of(current) {
            self.touched.remove(*field);
        }
        self.payment = PaymentInfo::empty(method);
        self.updated_at = current_timestamp();
    }

    /// Mark a field as blurred, enabling its error display.
    pub fn touch(&mut self, field: impl Into<String>) {
        self.touched.insert(field.into());
    }

    /// Whether a field has been blurred.
    pub fn is_touched(&self, field: &str) -> bool {
        self.touched.contains(field)
    }

    /// The active step's errors, filtered to touched fields.
    ///
    /// Untouched required fields stay quiet until the user has interacted
    /// with them, while still blocking [`CheckoutFlow::can_advance`].
    pub fn visible_errors(&self) -> ValidationErrors {
        let mut errors = self.errors();
        errors.retain_fields(|field| self.touched.contains(field));
        errors
    }

    /// Mark the flow complete. Called after a successful submission.
    pub fn complete(&mut self) {
        self.step = CheckoutStep::Complete;
        self.updated_at = current_timestamp();
    }

    /// Check if the flow has reached the terminal step.
    pub fn is_complete(&self) -> bool {
        self.step == CheckoutStep::Complete
    }
}

impl Default for CheckoutFlow {
    fn default() -> Self {
        Self::new()
    }
}

/// Get current Unix timestamp.
fn current_timestamp() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}
