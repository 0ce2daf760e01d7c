//! Hosted backend collaborator surface for the VDC Toolkit.
//!
//! The storefront delegates persistence and authentication to an external
//! hosted platform. This crate defines the narrow surface the commerce core
//! consumes:
//!
//! - [`TableStore`]: async select/insert/update/delete over JSON rows
//! - [`AuthProvider`]: resolve the current user, if any
//! - [`MemoryStore`]: an in-memory implementation for local development and
//!   tests, with insert fault injection
//!
//! # Example
//!
//! ```rust,ignore
//! use vdc_data::{MemoryStore, TableStore};
//!
//! let store = MemoryStore::new();
//! let inserted = store.insert("products", row).await?;
//! let rows = store.select("products").await?;
//! ```

mod auth;
mod error;
mod memory;
mod store;

pub use auth::{AuthProvider, AuthUser, StaticAuth};
pub use error::StoreError;
pub use memory::MemoryStore;
pub use store::{get_bool, get_f64, get_i64, get_str, opt_str, Match, Row, TableStore};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{
        AuthProvider, AuthUser, Match, MemoryStore, Row, StaticAuth, StoreError, TableStore,
    };
}
