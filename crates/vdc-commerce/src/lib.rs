//! Commerce domain types and logic for the VDC Toolkit storefront.
//!
//! This crate holds the pure, in-memory side of the shop:
//!
//! - **Catalog**: sellable products as the cart sees them
//! - **Cart**: session-scoped line items with derived totals
//! - **Checkout**: the three-step wizard, its form records, and validation
//! - **Orders**: the submission payload captured at confirmation time
//!
//! Nothing in here performs I/O. Persistence and auth live behind the
//! `vdc-data` collaborator traits, and the services that tie the two
//! together live in `vdc-checkout`.
//!
//! # Example
//!
//! ```rust,ignore
//! use vdc_commerce::prelude::*;
//!
//! let mut cart = Cart::new();
//! cart.add(product, 2)?;
//!
//! let total = cart.cart_total()?;
//! println!("Subtotal: {}", total.display());
//! ```

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod error;
pub mod ids;
pub mod money;
pub mod order;

pub use error::CommerceError;
pub use ids::*;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money};

    // Catalog
    pub use crate::catalog::Product;

    // Cart
    pub use crate::cart::{Cart, CartLine};

    // Checkout
    pub use crate::checkout::{
        CheckoutFlow, CheckoutStep, PaymentInfo, PaymentMethod, ShippingInfo, ValidationErrors,
    };

    // Orders
    pub use crate::order::{Order, OrderItem, OrderStatus};
}
