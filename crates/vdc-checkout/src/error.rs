//! Service error types.

use thiserror::Error;
use vdc_commerce::checkout::ValidationErrors;
use vdc_commerce::CommerceError;
use vdc_data::StoreError;

/// Errors surfaced by the storefront services.
///
/// Store failures are retryable from the caller's point of view: the
/// services never discard accumulated cart or checkout state on failure.
#[derive(Error, Debug)]
pub enum ShopError {
    /// Requested product is not in the catalog.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Confirmation attempted with an empty cart.
    #[error("Cart is empty")]
    EmptyCart,

    /// Confirmation attempted away from the review step.
    #[error("Checkout is at {0}, not review")]
    NotAtReview(String),

    /// One of the accumulated records does not validate.
    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),

    /// Domain-level failure (totals, transitions).
    #[error(transparent)]
    Commerce(#[from] CommerceError),

    /// Hosted store or auth failure.
    #[error(transparent)]
    Store(#[from] StoreError),
}
