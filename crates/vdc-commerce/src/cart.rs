//! Cart store and line item types.
//!
//! The cart is session-scoped, in-memory state: it holds product snapshots
//! with quantities and exposes derived totals. Totals are always recomputed
//! from the line list, never stored, so they cannot drift. No network calls
//! originate here.

use crate::catalog::Product;
use crate::error::CommerceError;
use crate::ids::{LineId, ProductId};
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// A line item in the cart.
///
/// Holds a snapshot of the product at the time it was added; later catalog
/// price changes do not affect lines already in the cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartLine {
    /// Unique line identifier.
    pub id: LineId,
    /// Product snapshot.
    pub product: Product,
    /// Quantity. Always positive for a retained line.
    pub quantity: i64,
    /// Unix timestamp when the line was first added.
    pub added_at: i64,
}

impl CartLine {
    /// Create a new line item.
    pub fn new(product: Product, quantity: i64) -> Self {
        Self {
            id: LineId::generate(),
            product,
            quantity,
            added_at: current_timestamp(),
        }
    }

    /// Line total (unit price times quantity).
    pub fn line_total(&self) -> Result<Money, CommerceError> {
        self.product
            .price
            .try_multiply(self.quantity)
            .ok_or(CommerceError::Overflow)
    }
}

/// A shopping cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Cart {
    /// Items in the cart, in insertion order.
    pub lines: Vec<CartLine>,
    /// Whether the cart drawer is open. Presentation-only flag.
    pub is_open: bool,
    /// Cart currency.
    pub currency: Currency,
    /// Unix timestamp of creation.
    pub created_at: i64,
    /// Unix timestamp of last line mutation.
    pub updated_at: i64,
}

impl Cart {
    /// Create a new empty cart.
    pub fn new() -> Self {
        let now = current_timestamp();
        Self {
            lines: Vec::new(),
            is_open: false,
            currency: Currency::KES,
            created_at: now,
            updated_at: now,
        }
    }

    /// Add a product to the cart.
    ///
    /// If a line for the same product id already exists, its quantity is
    /// incremented; otherwise a new line is appended. The cart never holds
    /// more than one line per product id. Stock is not checked here; stock
    /// gating happens at the presentation edge.
    ///
    /// Returns an error if quantity is not positive or the increment would
    /// overflow.
    pub fn add(&mut self, product: Product, quantity: i64) -> Result<LineId, CommerceError> {
        if quantity <= 0 {
            return Err(CommerceError::InvalidQuantity(quantity));
        }

        if let Some(existing) = self.lines.iter_mut().find(|l| l.product.id == product.id) {
            existing.quantity = existing
                .quantity
                .checked_add(quantity)
                .ok_or(CommerceError::Overflow)?;
            self.updated_at = current_timestamp();
            return Ok(existing.id.clone());
        }

        let line = CartLine::new(product, quantity);
        let id = line.id.clone();
        self.lines.push(line);
        self.updated_at = current_timestamp();
        Ok(id)
    }

    /// Add a single unit of a product.
    pub fn add_one(&mut self, product: Product) -> Result<LineId, CommerceError> {
        self.add(product, 1)
    }

    /// Remove a line from the cart.
    ///
    /// Removing an absent line is a no-op, not an error. Returns whether a
    /// line was removed.
    pub fn remove_line(&mut self, line_id: &LineId) -> bool {
        let len_before = self.lines.len();
        self.lines.retain(|l| &l.id != line_id);
        let removed = self.lines.len() < len_before;
        if removed {
            self.updated_at = current_timestamp();
        }
        removed
    }

    /// Update a line's quantity.
    ///
    /// A quantity of zero or less removes the line. Returns whether a line
    /// was found.
    pub fn update_quantity(&mut self, line_id: &LineId, quantity: i64) -> bool {
        if quantity <= 0 {
            return self.remove_line(line_id);
        }

        if let Some(line) = self.lines.iter_mut().find(|l| &l.id == line_id) {
            line.quantity = quantity;
            self.updated_at = current_timestamp();
            true
        } else {
            false
        }
    }

    /// Clear all lines. Used once, after order placement succeeds.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.updated_at = current_timestamp();
    }

    /// Total item count (sum of quantities).
    pub fn item_count(&self) -> i64 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Cart subtotal: sum of price times quantity over all lines.
    pub fn cart_total(&self) -> Result<Money, CommerceError> {
        let mut total = Money::zero(self.currency);
        for line in &self.lines {
            let line_total = line.line_total()?;
            if line_total.currency != self.currency {
                return Err(CommerceError::CurrencyMismatch {
                    expected: self.currency.code().to_string(),
                    got: line_total.currency.code().to_string(),
                });
            }
            total = total.try_add(&line_total).ok_or(CommerceError::Overflow)?;
        }
        Ok(total)
    }

    /// Check if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Get a line by ID.
    pub fn line(&self, line_id: &LineId) -> Option<&CartLine> {
        self.lines.iter().find(|l| &l.id == line_id)
    }

    /// Get the line holding a given product, if any.
    pub fn line_for_product(&self, product_id: &ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|l| &l.product.id == product_id)
    }

    /// Open the cart drawer.
    pub fn open(&mut self) {
        self.is_open = true;
    }

    /// Close the cart drawer.
    pub fn close(&mut self) {
        self.is_open = false;
    }

    /// Toggle the cart drawer.
    pub fn toggle(&mut self) {
        self.is_open = !self.is_open;
    }
}

impl Default for Cart {
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

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: &str, price_cents: i64) -> Product {
        let mut p = Product::new(id, format!("Product {}", id), Money::new(price_cents, Currency::KES));
        p.stock = 100;
        p
    }

    #[test]
    fn test_cart_starts_empty_and_closed() {
        let cart = Cart::new();
        assert!(cart.is_empty());
        assert!(!cart.is_open);
        assert_eq!(cart.item_count(), 0);
    }

    #[test]
    fn test_add_new_line() {
        let mut cart = Cart::new();
        cart.add(product("a", 50000), 2).unwrap();

        assert_eq!(cart.lines.len(), 1);
        assert_eq!(cart.item_count(), 2);
    }

    #[test]
    fn test_repeated_add_accumulates_quantity() {
        let mut cart = Cart::new();
        cart.add(product("a", 50000), 1).unwrap();
        cart.add(product("a", 50000), 2).unwrap();

        // One line per product id, quantity accumulated
        assert_eq!(cart.lines.len(), 1);
        assert_eq!(cart.item_count(), 3);
    }

    #[test]
    fn test_add_rejects_non_positive_quantity() {
        let mut cart = Cart::new();
        assert!(matches!(
            cart.add(product("a", 50000), 0),
            Err(CommerceError::InvalidQuantity(0))
        ));
        assert!(cart.add(product("a", 50000), -3).is_err());
        assert!(cart.is_empty());
    }

    #[test]
    fn test_add_overflow_checked() {
        let mut cart = Cart::new();
        cart.add(product("a", 1), i64::MAX).unwrap();
        assert!(matches!(
            cart.add(product("a", 1), 1),
            Err(CommerceError::Overflow)
        ));
    }

    #[test]
    fn test_remove_line() {
        let mut cart = Cart::new();
        let id = cart.add(product("a", 50000), 1).unwrap();

        assert!(cart.remove_line(&id));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_remove_absent_line_is_noop() {
        let mut cart = Cart::new();
        assert!(!cart.remove_line(&LineId::new("missing")));
    }

    #[test]
    fn test_update_quantity_replaces_value() {
        let mut cart = Cart::new();
        let id = cart.add(product("a", 50000), 1).unwrap();

        assert!(cart.update_quantity(&id, 5));
        assert_eq!(cart.item_count(), 5);
    }

    #[test]
    fn test_update_quantity_zero_removes_line() {
        let mut cart = Cart::new();
        let id = cart.add(product("a", 50000), 3).unwrap();

        assert!(cart.update_quantity(&id, 0));
        assert!(cart.is_empty());

        let id = cart.add(product("a", 50000), 3).unwrap();
        assert!(cart.update_quantity(&id, -2));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_derived_totals() {
        let mut cart = Cart::new();
        cart.add(product("a", 50000), 2).unwrap();
        cart.add(product("b", 30000), 1).unwrap();

        assert_eq!(cart.item_count(), 3);
        // 2 * 500.00 + 1 * 300.00 = 1300.00
        assert_eq!(cart.cart_total().unwrap().amount_cents, 130000);
    }

    #[test]
    fn test_totals_track_interleaved_mutations() {
        let mut cart = Cart::new();
        let a = cart.add(product("a", 10000), 2).unwrap();
        let b = cart.add(product("b", 20000), 1).unwrap();
        cart.update_quantity(&a, 4);
        cart.remove_line(&b);
        cart.add(product("c", 5000), 3).unwrap();

        assert_eq!(cart.item_count(), 7);
        assert_eq!(cart.cart_total().unwrap().amount_cents, 4 * 10000 + 3 * 5000);
    }

    #[test]
    fn test_clear_is_idempotent() {
        let mut cart = Cart::new();
        cart.clear();
        assert_eq!(cart.item_count(), 0);

        cart.add(product("a", 50000), 2).unwrap();
        cart.clear();
        assert_eq!(cart.item_count(), 0);
        cart.clear();
        assert!(cart.is_empty());
    }

    #[test]
    fn test_price_snapshot_survives_catalog_change() {
        let mut cart = Cart::new();
        cart.add(product("a", 50000), 1).unwrap();

        // A later catalog price change must not affect the line snapshot.
        let _repriced = product("a", 99900);
        assert_eq!(cart.cart_total().unwrap().amount_cents, 50000);
    }

    #[test]
    fn test_open_close_toggle() {
        let mut cart = Cart::new();
        cart.add(product("a", 50000), 1).unwrap();
        let before = cart.lines.clone();

        cart.open();
        assert!(cart.is_open);
        cart.close();
        assert!(!cart.is_open);
        cart.toggle();
        assert!(cart.is_open);

        // Visibility transitions never touch line data
        assert_eq!(cart.lines, before);
    }
}
