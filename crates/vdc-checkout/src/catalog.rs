//! Catalog reader.
//!
//! Read-only view of the `products` table. Mutation is owned by the admin
//! back office, which is outside this crate.

use crate::context::{ShopContext, PRODUCTS_TABLE};
use crate::error::ShopError;
use vdc_commerce::catalog::Product;
use vdc_commerce::money::{Currency, Money};
use vdc_commerce::ProductId;
use vdc_data::{get_f64, get_i64, get_str, Match, Row};

/// Reads sellable products from the hosted store.
#[derive(Debug, Clone)]
pub struct Catalog {
    ctx: ShopContext,
}

impl Catalog {
    /// Create a catalog reader.
    pub fn new(ctx: ShopContext) -> Self {
        Self { ctx }
    }

    /// Fetch all products.
    pub async fn list_products(&self) -> Result<Vec<Product>, ShopError> {
        let rows = self.ctx.store.select(PRODUCTS_TABLE).await?;
        rows.iter().map(decode_product).collect()
    }

    /// Fetch a single product by id.
    ///
    /// An absent id is a business error, not a store failure; callers
    /// surface it as a redirect or notification.
    pub async fn product(&self, id: &ProductId) -> Result<Product, ShopError> {
        let rows = self
            .ctx
            .store
            .select_where(PRODUCTS_TABLE, &Match::eq("id", id.as_str()))
            .await?;
        match rows.first() {
            Some(row) => decode_product(row),
            None => Err(ShopError::ProductNotFound(id.to_string())),
        }
    }
}

/// Decode a `products` row into a domain product.
///
/// The store persists `price` as decimal major units.
fn decode_product(row: &Row) -> Result<Product, ShopError> {
    Ok(Product {
        id: ProductId::new(get_str(row, PRODUCTS_TABLE, "id")?),
        name: get_str(row, PRODUCTS_TABLE, "name")?,
        description: get_str(row, PRODUCTS_TABLE, "description")?,
        price: Money::from_decimal(get_f64(row, PRODUCTS_TABLE, "price")?, Currency::KES),
        stock: get_i64(row, PRODUCTS_TABLE, "stock")?,
        image_url: get_str(row, PRODUCTS_TABLE, "image_url")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::Arc;
    use vdc_data::{MemoryStore, StaticAuth};

    fn seeded_context() -> ShopContext {
        let store = MemoryStore::new();
        store.seed(
            PRODUCTS_TABLE,
            vec![
                json!({
                    "id": "prod-1",
                    "name": "Affirmation Cards",
                    "description": "Daily values prompts for families",
                    "price": 500.0,
                    "stock": 12,
                    "image_url": "https://cdn.example.com/cards.jpg",
                })
                .as_object()
                .cloned()
                .unwrap(),
                json!({
                    "id": "prod-2",
                    "name": "Storybook",
                    "description": "Values through stories",
                    "price": 300.0,
                    "stock": 0,
                    "image_url": "https://cdn.example.com/book.jpg",
                })
                .as_object()
                .cloned()
                .unwrap(),
            ],
        );
        ShopContext::new(Arc::new(store), Arc::new(StaticAuth::anonymous()))
    }

    #[tokio::test]
    async fn test_list_products() {
        let catalog = Catalog::new(seeded_context());
        let products = catalog.list_products().await.unwrap();

        assert_eq!(products.len(), 2);
        assert_eq!(products[0].price.amount_cents, 50000);
        assert!(products[0].is_in_stock());
        assert!(!products[1].is_in_stock());
    }

    #[tokio::test]
    async fn test_product_by_id() {
        let catalog = Catalog::new(seeded_context());
        let product = catalog.product(&ProductId::new("prod-2")).await.unwrap();
        assert_eq!(product.name, "Storybook");
    }

    #[tokio::test]
    async fn test_missing_product_is_business_error() {
        let catalog = Catalog::new(seeded_context());
        let err = catalog
            .product(&ProductId::new("prod-404"))
            .await
            .unwrap_err();
        assert!(matches!(err, ShopError::ProductNotFound(_)));
    }

    #[tokio::test]
    async fn test_malformed_row_surfaces_store_error() {
        let store = MemoryStore::new();
        store.seed(
            PRODUCTS_TABLE,
            vec![json!({ "id": "prod-1", "name": "No price" })
                .as_object()
                .cloned()
                .unwrap()],
        );
        let catalog = Catalog::new(ShopContext::new(
            Arc::new(store),
            Arc::new(StaticAuth::anonymous()),
        ));

        assert!(matches!(
            catalog.list_products().await.unwrap_err(),
            ShopError::Store(_)
        ));
    }
}
