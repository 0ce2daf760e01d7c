//! Order submission.
//!
//! Turns a confirmed checkout into durable rows: one order header, then one
//! item row per cart line. The header write strictly precedes the item
//! writes, so items never reference a nonexistent order. The hosted store
//! offers no cross-table transaction; if an item insert fails, the service
//! compensates by deleting the rows already written for that order.

use crate::context::{ShopContext, ORDERS_TABLE, ORDER_ITEMS_TABLE};
use crate::error::ShopError;
use serde_json::{json, Value};
use vdc_commerce::cart::CartLine;
use vdc_commerce::checkout::{PaymentInfo, ShippingInfo};
use vdc_commerce::money::Money;
use vdc_commerce::order::{OrderItem, OrderStatus};
use vdc_commerce::{CommerceError, OrderId, UserId};
use vdc_data::{get_str, AuthUser, Match, Row};

/// The outcome of a successful submission.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderReceipt {
    /// Store-assigned order id.
    pub order_id: OrderId,
    /// Cart subtotal at submission time.
    pub subtotal: Money,
    /// Shipping fee charged.
    pub shipping_fee: Money,
    /// Total order value.
    pub grand_total: Money,
}

/// Writes confirmed orders to the hosted store.
#[derive(Debug, Clone)]
pub struct OrderService {
    ctx: ShopContext,
}

impl OrderService {
    /// Create an order service.
    pub fn new(ctx: ShopContext) -> Self {
        Self { ctx }
    }

    /// Submit an order composed from the cart lines and checkout records.
    ///
    /// Any store failure is reported as an error and the caller may retry;
    /// user-entered state is never consumed by this call.
    pub async fn create_order(
        &self,
        shipping: &ShippingInfo,
        payment: &PaymentInfo,
        lines: &[CartLine],
        cart_total: Money,
        shipping_fee: Money,
    ) -> Result<OrderReceipt, ShopError> {
        let grand_total = add_checked(&cart_total, &shipping_fee)?;

        // An auth hiccup must not block checkout; fall back to anonymous.
        let user = match self.ctx.auth.current_user().await {
            Ok(user) => user,
            Err(e) => {
                tracing::warn!(error = %e, "current user unavailable, submitting anonymously");
                None
            }
        };

        let delivery_address = shipping
            .delivery_address()
            .map_err(CommerceError::from)?;

        let inserted = self
            .ctx
            .store
            .insert(ORDERS_TABLE, header_row(user.as_ref(), &delivery_address))
            .await?;
        let order_id = OrderId::new(get_str(&inserted, ORDERS_TABLE, "id")?);

        for line in lines {
            let item = OrderItem::from_line(order_id.clone(), line);
            if let Err(e) = self.ctx.store.insert(ORDER_ITEMS_TABLE, item_row(&item)).await {
                tracing::warn!(
                    order_id = %order_id,
                    error = %e,
                    "item insert failed, rolling back order header"
                );
                self.compensate(&order_id).await;
                return Err(e.into());
            }
        }

        self.initiate_payment(payment, &order_id, &grand_total);

        tracing::info!(
            order_id = %order_id,
            items = lines.len(),
            total = %grand_total,
            "order placed"
        );

        Ok(OrderReceipt {
            order_id,
            subtotal: cart_total,
            shipping_fee,
            grand_total,
        })
    }

    /// Delete the header and any items already written for an order whose
    /// submission failed partway.
    async fn compensate(&self, order_id: &OrderId) {
        let items = Match::eq("order_id", order_id.as_str());
        if let Err(e) = self.ctx.store.delete(ORDER_ITEMS_TABLE, &items).await {
            tracing::error!(order_id = %order_id, error = %e, "compensating item delete failed");
        }
        let header = Match::eq("id", order_id.as_str());
        if let Err(e) = self.ctx.store.delete(ORDERS_TABLE, &header).await {
            tracing::error!(order_id = %order_id, error = %e, "compensating header delete failed");
        }
    }

    /// Payment initiation stub.
    ///
    /// Logs the intent only; no gateway is called and `is_paid` stays false
    /// until the back office marks the order.
    fn initiate_payment(&self, payment: &PaymentInfo, order_id: &OrderId, amount: &Money) {
        match payment {
            PaymentInfo::Visa { card_number, .. } => {
                let last4 = card_number
                    .get(card_number.len().saturating_sub(4)..)
                    .unwrap_or_default();
                tracing::info!(
                    order_id = %order_id,
                    method = "visa",
                    card = %format!("****{}", last4),
                    amount = %amount,
                    "initiating payment"
                );
            }
            PaymentInfo::Mpesa { mpesa_phone_number } => {
                tracing::info!(
                    order_id = %order_id,
                    method = "mpesa",
                    phone = %mpesa_phone_number,
                    amount = %amount,
                    "initiating payment"
                );
            }
        }
    }
}

fn add_checked(a: &Money, b: &Money) -> Result<Money, ShopError> {
    match a.try_add(b) {
        Some(sum) => Ok(sum),
        None if a.currency != b.currency => Err(CommerceError::CurrencyMismatch {
            expected: a.currency.code().to_string(),
            got: b.currency.code().to_string(),
        }
        .into()),
        None => Err(CommerceError::Overflow.into()),
    }
}

/// Encode the order header row. `user_id` is omitted for anonymous
/// checkout.
fn header_row(user: Option<&AuthUser>, delivery_address: &str) -> Row {
    let mut row = Row::new();
    if let Some(user) = user {
        row.insert(
            "user_id".to_string(),
            Value::String(UserId::new(user.id.clone()).into_inner()),
        );
    }
    row.insert(
        "delivery_address".to_string(),
        Value::String(delivery_address.to_string()),
    );
    row.insert("is_paid".to_string(), Value::Bool(false));
    row.insert(
        "status".to_string(),
        Value::String(OrderStatus::Pending.as_str().to_string()),
    );
    row
}

/// Encode an order item row.
fn item_row(item: &OrderItem) -> Row {
    json!({
        "order_id": item.order_id.as_str(),
        "product_id": item.product_id.as_str(),
        "quantity": item.quantity,
        "unit_price": item.unit_price.to_decimal(),
    })
    .as_object()
    .cloned()
    .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::PRODUCTS_TABLE;
    use std::sync::Arc;
    use vdc_commerce::catalog::Product;
    use vdc_commerce::money::Currency;
    use vdc_data::{MemoryStore, StaticAuth, TableStore};

    fn shipping() -> ShippingInfo {
        ShippingInfo {
            first_name: "Wanjiru".to_string(),
            last_name: "Kamau".to_string(),
            email: "wanjiru@example.com".to_string(),
            county: "Nairobi".to_string(),
            subcounty: "Westlands".to_string(),
            ward: "Parklands".to_string(),
            street_address: "12 School Lane".to_string(),
            phone_number: "712345678".to_string(),
            ..ShippingInfo::default()
        }
    }

    fn mpesa() -> PaymentInfo {
        PaymentInfo::Mpesa {
            mpesa_phone_number: "712345678".to_string(),
        }
    }

    fn product(id: &str, price_cents: i64) -> Product {
        let mut p = Product::new(id, format!("Product {}", id), Money::new(price_cents, Currency::KES));
        p.stock = 100;
        p
    }

    fn lines() -> Vec<CartLine> {
        vec![
            CartLine::new(product("prod-a", 50000), 2),
            CartLine::new(product("prod-b", 30000), 1),
        ]
    }

    fn kes(cents: i64) -> Money {
        Money::new(cents, Currency::KES)
    }

    fn service(store: Arc<MemoryStore>) -> OrderService {
        OrderService::new(ShopContext::new(store, Arc::new(StaticAuth::anonymous())))
    }

    #[tokio::test]
    async fn test_one_header_and_one_item_per_line() {
        let store = Arc::new(MemoryStore::new());
        let svc = service(store.clone());

        let receipt = svc
            .create_order(&shipping(), &mpesa(), &lines(), kes(130000), kes(50000))
            .await
            .unwrap();

        assert_eq!(store.row_count(ORDERS_TABLE), 1);
        assert_eq!(store.row_count(ORDER_ITEMS_TABLE), 2);
        assert_eq!(receipt.grand_total.amount_cents, 180000);

        let items = store
            .select_where(
                ORDER_ITEMS_TABLE,
                &Match::eq("order_id", receipt.order_id.as_str()),
            )
            .await
            .unwrap();
        assert_eq!(items.len(), 2);
    }

    #[tokio::test]
    async fn test_unit_price_is_snapshotted() {
        let store = Arc::new(MemoryStore::new());
        store.seed(
            PRODUCTS_TABLE,
            vec![serde_json::json!({
                "id": "prod-a",
                "name": "Product prod-a",
                "description": "",
                "price": 500.0,
                "stock": 100,
                "image_url": "",
            })
            .as_object()
            .cloned()
            .unwrap()],
        );
        let svc = service(store.clone());
        let cart_lines = lines();

        // Catalog repricing after the cart was built must not leak into
        // the order items.
        store
            .update(
                PRODUCTS_TABLE,
                &Match::eq("id", "prod-a"),
                serde_json::json!({ "price": 999.0 }).as_object().cloned().unwrap(),
            )
            .await
            .unwrap();

        svc.create_order(&shipping(), &mpesa(), &cart_lines, kes(130000), kes(50000))
            .await
            .unwrap();

        let items = store.select(ORDER_ITEMS_TABLE).await.unwrap();
        let prices: Vec<f64> = items
            .iter()
            .map(|r| r.get("unit_price").and_then(Value::as_f64).unwrap())
            .collect();
        assert!(prices.contains(&500.0));
        assert!(prices.contains(&300.0));
    }

    #[tokio::test]
    async fn test_anonymous_header_omits_user_id() {
        let store = Arc::new(MemoryStore::new());
        let svc = service(store.clone());

        svc.create_order(&shipping(), &mpesa(), &lines(), kes(130000), kes(50000))
            .await
            .unwrap();

        let headers = store.select(ORDERS_TABLE).await.unwrap();
        assert!(!headers[0].contains_key("user_id"));
        assert_eq!(headers[0].get("status").and_then(Value::as_str), Some("pending"));
        assert_eq!(headers[0].get("is_paid").and_then(Value::as_bool), Some(false));
    }

    #[tokio::test]
    async fn test_signed_in_header_carries_user_id() {
        let store = Arc::new(MemoryStore::new());
        let auth = StaticAuth::signed_in(AuthUser {
            id: "user-7".to_string(),
            email: "wanjiru@example.com".to_string(),
        });
        let svc = OrderService::new(ShopContext::new(store.clone(), Arc::new(auth)));

        svc.create_order(&shipping(), &mpesa(), &lines(), kes(130000), kes(50000))
            .await
            .unwrap();

        let headers = store.select(ORDERS_TABLE).await.unwrap();
        assert_eq!(headers[0].get("user_id").and_then(Value::as_str), Some("user-7"));
    }

    #[tokio::test]
    async fn test_header_failure_writes_nothing() {
        let store = Arc::new(MemoryStore::new());
        store.fail_next_insert(ORDERS_TABLE);
        let svc = service(store.clone());

        let err = svc
            .create_order(&shipping(), &mpesa(), &lines(), kes(130000), kes(50000))
            .await
            .unwrap_err();

        assert!(matches!(err, ShopError::Store(_)));
        assert_eq!(store.row_count(ORDERS_TABLE), 0);
        assert_eq!(store.row_count(ORDER_ITEMS_TABLE), 0);
    }

    #[tokio::test]
    async fn test_item_failure_compensates_header() {
        let store = Arc::new(MemoryStore::new());
        store.fail_next_insert(ORDER_ITEMS_TABLE);
        let svc = service(store.clone());

        let err = svc
            .create_order(&shipping(), &mpesa(), &lines(), kes(130000), kes(50000))
            .await
            .unwrap_err();

        assert!(matches!(err, ShopError::Store(_)));
        // No order header is left behind referencing zero items.
        assert_eq!(store.row_count(ORDERS_TABLE), 0);
        assert_eq!(store.row_count(ORDER_ITEMS_TABLE), 0);
    }

    #[tokio::test]
    async fn test_submission_never_marks_paid() {
        let store = Arc::new(MemoryStore::new());
        let svc = service(store.clone());

        svc.create_order(&shipping(), &mpesa(), &lines(), kes(130000), kes(50000))
            .await
            .unwrap();

        let headers = store.select(ORDERS_TABLE).await.unwrap();
        assert_eq!(headers[0].get("is_paid").and_then(Value::as_bool), Some(false));
    }

    #[tokio::test]
    async fn test_currency_mismatch_rejected_before_writes() {
        let store = Arc::new(MemoryStore::new());
        let svc = service(store.clone());

        let err = svc
            .create_order(
                &shipping(),
                &mpesa(),
                &lines(),
                kes(130000),
                Money::new(500, Currency::USD),
            )
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ShopError::Commerce(CommerceError::CurrencyMismatch { .. })
        ));
        assert_eq!(store.row_count(ORDERS_TABLE), 0);
    }
}
