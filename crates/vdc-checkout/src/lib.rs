//! Catalog, checkout, and order submission services for the VDC Toolkit.
//!
//! These services tie the pure domain state in `vdc-commerce` to the hosted
//! collaborators in `vdc-data`. Dependencies come in through an explicit
//! [`ShopContext`] passed at construction; there are no ambient singletons.
//!
//! Data flow: [`Catalog`] reads sellable products, the UI accumulates a
//! `Cart` and drives a `CheckoutFlow`, and [`CheckoutService::confirm`]
//! turns the two into durable order rows via [`OrderService`].

pub mod catalog;
pub mod context;
pub mod error;
pub mod orders;
pub mod service;

pub use catalog::Catalog;
pub use context::ShopContext;
pub use error::ShopError;
pub use orders::{OrderReceipt, OrderService};
pub use service::CheckoutService;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::catalog::Catalog;
    pub use crate::context::ShopContext;
    pub use crate::error::ShopError;
    pub use crate::orders::{OrderReceipt, OrderService};
    pub use crate::service::CheckoutService;
}
