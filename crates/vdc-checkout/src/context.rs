//! Shared service context.

use std::sync::Arc;
use vdc_data::{AuthProvider, TableStore};

/// Table holding the sellable catalog.
pub const PRODUCTS_TABLE: &str = "products";
/// Table holding order headers.
pub const ORDERS_TABLE: &str = "orders";
/// Table holding order line items.
pub const ORDER_ITEMS_TABLE: &str = "order_items";

/// Explicit dependency bundle for the storefront services.
///
/// Built once at the composition root and cloned into each service, so
/// every collaborator is visible at construction time.
#[derive(Clone)]
pub struct ShopContext {
    /// The hosted table store.
    pub store: Arc<dyn TableStore>,
    /// The hosted auth provider.
    pub auth: Arc<dyn AuthProvider>,
}

impl ShopContext {
    /// Create a context from its collaborators.
    pub fn new(store: Arc<dyn TableStore>, auth: Arc<dyn AuthProvider>) -> Self {
        Self { store, auth }
    }
}

impl std::fmt::Debug for ShopContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShopContext").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vdc_data::{MemoryStore, StaticAuth};

    #[test]
    fn test_context_is_cloneable() {
        let ctx = ShopContext::new(
            Arc::new(MemoryStore::new()),
            Arc::new(StaticAuth::anonymous()),
        );
        let _clone = ctx.clone();
    }
}
