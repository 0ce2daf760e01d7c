//! Catalog types.
//!
//! The cart treats products as immutable snapshots; the catalog itself is
//! owned by the admin back office and read through `vdc-checkout::catalog`.

use crate::ids::ProductId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// A sellable product as the storefront sees it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    /// Stable unique identifier.
    pub id: ProductId,
    /// Product name.
    pub name: String,
    /// Full description.
    pub description: String,
    /// Unit price. Non-negative.
    pub price: Money,
    /// Units in stock. Non-negative.
    pub stock: i64,
    /// URL of the product image.
    pub image_url: String,
}

impl Product {
    /// Create a new product.
    pub fn new(id: impl Into<ProductId>, name: impl Into<String>, price: Money) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            price,
            stock: 0,
            image_url: String::new(),
        }
    }

    /// Check whether any units are in stock.
    pub fn is_in_stock(&self) -> bool {
        self.stock > 0
    }

    /// Check whether the requested quantity is available.
    pub fn has_stock_for(&self, quantity: i64) -> bool {
        quantity > 0 && self.stock >= quantity
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Currency;

    fn product(stock: i64) -> Product {
        let mut p = Product::new("prod-1", "Affirmation Cards", Money::new(50000, Currency::KES));
        p.stock = stock;
        p
    }

    #[test]
    fn test_in_stock() {
        assert!(product(3).is_in_stock());
        assert!(!product(0).is_in_stock());
    }

    #[test]
    fn test_has_stock_for() {
        let p = product(3);
        assert!(p.has_stock_for(3));
        assert!(!p.has_stock_for(4));
        assert!(!p.has_stock_for(0));
    }
}
