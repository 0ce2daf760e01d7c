//! Order submission payload types.
//!
//! Orders are composed at confirmation time from the cart's contents plus
//! the accumulated checkout records. Item prices are snapshotted from the
//! cart lines, never re-read from the catalog.

use crate::cart::CartLine;
use crate::ids::{OrderId, ProductId, UserId};
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Order fulfilment status as persisted on the order header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Order placed, awaiting processing.
    #[default]
    Pending,
    /// Order being prepared.
    Processing,
    /// Order shipped.
    Shipped,
    /// Order delivered.
    Delivered,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Processing => "processing",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Delivered => "delivered",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Processing => "Processing",
            OrderStatus::Shipped => "Shipped",
            OrderStatus::Delivered => "Delivered",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "pending" => Some(OrderStatus::Pending),
            "processing" => Some(OrderStatus::Processing),
            "shipped" => Some(OrderStatus::Shipped),
            "delivered" => Some(OrderStatus::Delivered),
            _ => None,
        }
    }
}

/// An order header.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Order {
    /// Unique order identifier, assigned by the store on insert.
    pub id: OrderId,
    /// Customer user ID. None for anonymous checkout.
    pub user_id: Option<UserId>,
    /// Serialized shipping record.
    pub delivery_address: String,
    /// Whether payment has completed. Always false at submission time.
    pub is_paid: bool,
    /// Fulfilment status.
    pub status: OrderStatus,
    /// Unix timestamp of creation.
    pub created_at: i64,
}

/// A line item on an order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderItem {
    /// Owning order.
    pub order_id: OrderId,
    /// Product purchased.
    pub product_id: ProductId,
    /// Quantity ordered.
    pub quantity: i64,
    /// Unit price captured at submission time.
    pub unit_price: Money,
}

impl OrderItem {
    /// Snapshot an order item from a cart line.
    pub fn from_line(order_id: OrderId, line: &CartLine) -> Self {
        Self {
            order_id,
            product_id: line.product.id.clone(),
            quantity: line.quantity,
            unit_price: line.product.price,
        }
    }
}
