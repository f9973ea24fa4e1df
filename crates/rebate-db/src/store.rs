//! # Data Store Adapters
//!
//! Implements the `rebate-core` store traits over the SQLite repositories.
//! Database errors are boxed into [`StoreError`] at this boundary so the
//! service never sees sqlx types.

use async_trait::async_trait;

use crate::repository::calculation::CalculationRepository;
use crate::repository::product::ProductRepository;
use crate::repository::rebate::RebateRepository;
use rebate_core::{
    IncentiveType, Money, Product, ProductDataStore, Rebate, RebateDataStore, StoreError,
    StoreResult,
};

#[async_trait]
impl RebateDataStore for RebateRepository {
    async fn get_rebate(&self, identifier: &str) -> StoreResult<Option<Rebate>> {
        Ok(self.get_by_identifier(identifier).await?)
    }

    async fn save_rebate_if_absent(&self, rebate: &Rebate) -> StoreResult<bool> {
        Ok(self.insert_if_absent(rebate).await?)
    }

    async fn append_calculation_record(
        &self,
        rebate_identifier: &str,
        incentive: IncentiveType,
        amount: Money,
    ) -> StoreResult<()> {
        CalculationRepository::new(self.pool().clone())
            .append(rebate_identifier, incentive, amount)
            .await
            .map(|_| ())
            .map_err(StoreError::from)
    }
}

#[async_trait]
impl ProductDataStore for ProductRepository {
    async fn get_product(&self, identifier: &str) -> StoreResult<Option<Product>> {
        Ok(self.get_by_identifier(identifier).await?)
    }

    async fn save_product_if_absent(&self, product: &Product) -> StoreResult<bool> {
        Ok(self.insert_if_absent(product).await?)
    }
}

// =============================================================================
// Integration Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use crate::{Database, DbConfig};
    use rebate_core::{
        CalculateRebateRequest, CoreError, IncentiveType, Money, Product, Rate, Rebate,
        SupportedIncentives,
    };
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn rebate(identifier: &str, incentive: IncentiveType) -> Rebate {
        Rebate {
            identifier: identifier.to_string(),
            incentive,
            amount: Money::new(dec!(2.5)),
            percentage: Rate::from_fraction(dec!(0.1)),
        }
    }

    fn product(identifier: &str, supported: SupportedIncentives) -> Product {
        Product {
            identifier: identifier.to_string(),
            price: Money::new(dec!(200)),
            uom: "each".to_string(),
            supported_incentives: supported,
        }
    }

    fn request(rebate: &str, product: &str, volume: Decimal) -> CalculateRebateRequest {
        CalculateRebateRequest {
            rebate_identifier: rebate.to_string(),
            product_identifier: product.to_string(),
            volume,
        }
    }

    #[tokio::test]
    async fn test_register_then_calculate_records_once() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let service = db.rebate_service();

        service
            .register_rebate_and_product(
                &rebate("REB-1", IncentiveType::FixedRateRebate),
                &product("PROD-1", SupportedIncentives::all()),
            )
            .await
            .unwrap();

        let result = service
            .calculate(&request("REB-1", "PROD-1", dec!(5)))
            .await
            .unwrap();

        assert!(result.success);
        assert_eq!(result.rebate_amount, Money::new(dec!(100)));

        let records = db.calculations().list_for_rebate("REB-1").await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].incentive, IncentiveType::FixedRateRebate);
        assert_eq!(records[0].amount, Money::new(dec!(100)));
    }

    #[tokio::test]
    async fn test_identifier_with_inner_space_round_trips() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let service = db.rebate_service();

        service
            .register_rebate_and_product(
                &rebate("SKU 1", IncentiveType::FixedCashAmount),
                &product("Widget 2", SupportedIncentives::all()),
            )
            .await
            .unwrap();

        let result = service
            .calculate(&request("SKU 1", "Widget 2", dec!(1)))
            .await
            .unwrap();

        assert!(result.success);
        assert_eq!(result.rebate_amount, Money::new(dec!(2.5)));
    }

    #[tokio::test]
    async fn test_register_is_idempotent() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let service = db.rebate_service();
        let stored = rebate("REB-1", IncentiveType::AmountPerUom);

        service
            .register_rebate_and_product(&stored, &product("PROD-1", SupportedIncentives::all()))
            .await
            .unwrap();

        let mut replacement = stored.clone();
        replacement.amount = Money::new(dec!(1000));
        service
            .register_rebate_and_product(
                &replacement,
                &product("PROD-1", SupportedIncentives::empty()),
            )
            .await
            .unwrap();

        assert_eq!(db.rebates().count().await.unwrap(), 1);
        assert_eq!(db.products().count().await.unwrap(), 1);
        assert_eq!(
            db.rebates().get_by_identifier("REB-1").await.unwrap(),
            Some(stored)
        );
    }

    #[tokio::test]
    async fn test_failed_calculations_are_not_recorded() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let service = db.rebate_service();

        service
            .register_rebate_and_product(
                &rebate("REB-1", IncentiveType::AmountPerUom),
                &product("PROD-1", IncentiveType::FixedRateRebate.into()),
            )
            .await
            .unwrap();

        // unsupported incentive
        let unsupported = service
            .calculate(&request("REB-1", "PROD-1", dec!(4)))
            .await
            .unwrap();
        // unknown rebate and product
        let missing_rebate = service
            .calculate(&request("nope", "PROD-1", dec!(4)))
            .await
            .unwrap();
        let missing_product = service
            .calculate(&request("REB-1", "nope", dec!(4)))
            .await
            .unwrap();

        for result in [unsupported, missing_rebate, missing_product] {
            assert!(!result.success);
            assert_eq!(result.rebate_amount, Money::zero());
        }
        assert_eq!(db.calculations().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_unrecognized_stored_incentive_is_rejected() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        sqlx::query(
            "INSERT INTO rebates (identifier, incentive, amount, percentage, created_at) \
             VALUES ('REB-X', 9, '10', '0.5', '2024-01-01T00:00:00Z')",
        )
        .execute(db.pool())
        .await
        .unwrap();
        db.products()
            .insert_if_absent(&product("PROD-1", SupportedIncentives::all()))
            .await
            .unwrap();

        let result = db
            .rebate_service()
            .calculate(&request("REB-X", "PROD-1", dec!(1)))
            .await
            .unwrap();

        assert!(!result.success);
        assert_eq!(db.calculations().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_closed_pool_surfaces_store_error() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let service = db.rebate_service();
        db.close().await;

        let err = service
            .calculate(&request("REB-1", "PROD-1", dec!(1)))
            .await
            .unwrap_err();

        assert!(matches!(err, CoreError::Store(_)));
    }
}
