//! # Product Repository
//!
//! Database operations for products. `supported_incentives` is stored as the
//! raw bitset integer; unknown bits are masked off on load.

use chrono::Utc;
use sqlx::{FromRow, SqlitePool};
use tracing::debug;

use crate::error::DbResult;
use crate::repository::parse_decimal;
use rebate_core::{Money, Product, SupportedIncentives};

/// Raw `products` row.
#[derive(Debug, FromRow)]
struct ProductRow {
    identifier: String,
    price: String,
    uom: String,
    supported_incentives: i64,
}

impl ProductRow {
    fn into_product(self) -> DbResult<Product> {
        // only the low three bits carry meaning
        let bits = (self.supported_incentives & 0xFF) as u8;

        Ok(Product {
            price: Money::new(parse_decimal("products.price", &self.price)?),
            supported_incentives: SupportedIncentives::from_bits(bits),
            identifier: self.identifier,
            uom: self.uom,
        })
    }
}

/// Repository for product database operations.
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Gets a product by its identifier.
    pub async fn get_by_identifier(&self, identifier: &str) -> DbResult<Option<Product>> {
        debug!(identifier = %identifier, "Fetching product");

        let row: Option<ProductRow> = sqlx::query_as(
            r#"
            SELECT identifier, price, uom, supported_incentives
            FROM products
            WHERE identifier = ?1
            "#,
        )
        .bind(identifier)
        .fetch_optional(&self.pool)
        .await?;

        row.map(ProductRow::into_product).transpose()
    }

    /// Inserts the product unless its identifier is already stored.
    ///
    /// Returns `true` when a row was written.
    pub async fn insert_if_absent(&self, product: &Product) -> DbResult<bool> {
        debug!(
            identifier = %product.identifier,
            supported = %product.supported_incentives,
            "Registering product"
        );

        let result = sqlx::query(
            r#"
            INSERT INTO products (identifier, price, uom, supported_incentives, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            ON CONFLICT(identifier) DO NOTHING
            "#,
        )
        .bind(&product.identifier)
        .bind(product.price.amount().to_string())
        .bind(&product.uom)
        .bind(i64::from(product.supported_incentives.bits()))
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }

    /// Counts stored products.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Database, DbConfig};
    use rebate_core::IncentiveType;
    use rust_decimal_macros::dec;

    fn product(identifier: &str) -> Product {
        Product {
            identifier: identifier.to_string(),
            price: Money::new(dec!(19.99)),
            uom: "kg".to_string(),
            supported_incentives: IncentiveType::FixedRateRebate | IncentiveType::FixedCashAmount,
        }
    }

    #[tokio::test]
    async fn test_insert_and_get_product() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.products();
        let stored = product("PROD-1");

        assert!(repo.insert_if_absent(&stored).await.unwrap());

        let loaded = repo.get_by_identifier("PROD-1").await.unwrap().unwrap();
        assert_eq!(loaded, stored);
        assert!(loaded.supports(IncentiveType::FixedCashAmount));
        assert!(!loaded.supports(IncentiveType::AmountPerUom));
    }

    #[tokio::test]
    async fn test_duplicate_product_is_ignored() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.products();

        assert!(repo.insert_if_absent(&product("PROD-1")).await.unwrap());

        let mut changed = product("PROD-1");
        changed.price = Money::new(dec!(1));
        assert!(!repo.insert_if_absent(&changed).await.unwrap());

        let loaded = repo.get_by_identifier("PROD-1").await.unwrap().unwrap();
        assert_eq!(loaded.price, Money::new(dec!(19.99)));
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_unknown_bits_are_masked() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        sqlx::query(
            "INSERT INTO products (identifier, price, uom, supported_incentives, created_at) \
             VALUES ('PROD-X', '5', 'each', 255, '2024-01-01T00:00:00Z')",
        )
        .execute(db.pool())
        .await
        .unwrap();

        let loaded = db.products().get_by_identifier("PROD-X").await.unwrap().unwrap();
        assert_eq!(loaded.supported_incentives, SupportedIncentives::all());
    }
}
