//! # Rebate Repository
//!
//! Database operations for rebates.
//!
//! ## Register-If-Absent
//! ```text
//! INSERT ... ON CONFLICT(identifier) DO NOTHING
//!      │
//!      ├── rows_affected = 1 → new rebate stored
//!      └── rows_affected = 0 → identifier already present, row untouched
//! ```
//! The check and the write are one statement, so two registrations of the
//! same identifier can never both insert.

use chrono::{DateTime, Utc};
use sqlx::{FromRow, SqlitePool};
use tracing::debug;

use crate::error::DbResult;
use crate::repository::parse_decimal;
use rebate_core::{IncentiveType, Money, Rate, Rebate};

/// Raw `rebates` row.
#[derive(Debug, FromRow)]
struct RebateRow {
    identifier: String,
    incentive: i64,
    amount: String,
    percentage: String,
}

impl RebateRow {
    fn into_rebate(self) -> DbResult<Rebate> {
        Ok(Rebate {
            amount: Money::new(parse_decimal("rebates.amount", &self.amount)?),
            percentage: Rate::from_fraction(parse_decimal("rebates.percentage", &self.percentage)?),
            incentive: IncentiveType::from_code(self.incentive),
            identifier: self.identifier,
        })
    }
}

/// Repository for rebate database operations.
#[derive(Debug, Clone)]
pub struct RebateRepository {
    pool: SqlitePool,
}

impl RebateRepository {
    /// Creates a new RebateRepository.
    pub fn new(pool: SqlitePool) -> Self {
        RebateRepository { pool }
    }

    /// Returns the pool this repository runs on.
    pub(crate) fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Gets a rebate by its identifier.
    ///
    /// ## Returns
    /// * `Ok(Some(Rebate))` - Rebate found
    /// * `Ok(None)` - Rebate not found
    pub async fn get_by_identifier(&self, identifier: &str) -> DbResult<Option<Rebate>> {
        debug!(identifier = %identifier, "Fetching rebate");

        let row: Option<RebateRow> = sqlx::query_as(
            r#"
            SELECT identifier, incentive, amount, percentage
            FROM rebates
            WHERE identifier = ?1
            "#,
        )
        .bind(identifier)
        .fetch_optional(&self.pool)
        .await?;

        row.map(RebateRow::into_rebate).transpose()
    }

    /// Inserts the rebate unless its identifier is already stored.
    ///
    /// ## Returns
    /// * `Ok(true)` - Row inserted
    /// * `Ok(false)` - Identifier already present, nothing changed
    pub async fn insert_if_absent(&self, rebate: &Rebate) -> DbResult<bool> {
        debug!(identifier = %rebate.identifier, incentive = %rebate.incentive, "Registering rebate");

        let now: DateTime<Utc> = Utc::now();

        let result = sqlx::query(
            r#"
            INSERT INTO rebates (identifier, incentive, amount, percentage, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            ON CONFLICT(identifier) DO NOTHING
            "#,
        )
        .bind(&rebate.identifier)
        .bind(rebate.incentive.code())
        .bind(rebate.amount.amount().to_string())
        .bind(rebate.percentage.fraction().to_string())
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }

    /// Counts stored rebates (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM rebates")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Database, DbConfig};
    use rust_decimal_macros::dec;

    async fn repo() -> RebateRepository {
        Database::new(DbConfig::in_memory()).await.unwrap().rebates()
    }

    fn rebate(identifier: &str) -> Rebate {
        Rebate {
            identifier: identifier.to_string(),
            incentive: IncentiveType::FixedRateRebate,
            amount: Money::zero(),
            percentage: Rate::from_fraction(dec!(0.075)),
        }
    }

    #[tokio::test]
    async fn test_insert_and_get_round_trips_decimals() {
        let repo = repo().await;
        let stored = rebate("REB-1");

        assert!(repo.insert_if_absent(&stored).await.unwrap());

        let loaded = repo.get_by_identifier("REB-1").await.unwrap();
        assert_eq!(loaded, Some(stored));
    }

    #[tokio::test]
    async fn test_missing_rebate_is_none() {
        let repo = repo().await;
        assert_eq!(repo.get_by_identifier("nope").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_insert_if_absent_keeps_first_version() {
        let repo = repo().await;
        let first = rebate("REB-1");
        let mut second = rebate("REB-1");
        second.incentive = IncentiveType::FixedCashAmount;
        second.amount = Money::new(dec!(99));

        assert!(repo.insert_if_absent(&first).await.unwrap());
        assert!(!repo.insert_if_absent(&second).await.unwrap());

        assert_eq!(repo.count().await.unwrap(), 1);
        assert_eq!(repo.get_by_identifier("REB-1").await.unwrap(), Some(first));
    }

    #[tokio::test]
    async fn test_unknown_incentive_code_loads_as_unrecognized() {
        let repo = repo().await;
        sqlx::query(
            "INSERT INTO rebates (identifier, incentive, amount, percentage, created_at) \
             VALUES ('REB-X', 42, '10', '0', '2024-01-01T00:00:00Z')",
        )
        .execute(repo.pool())
        .await
        .unwrap();

        let loaded = repo.get_by_identifier("REB-X").await.unwrap().unwrap();
        assert_eq!(loaded.incentive, IncentiveType::Unrecognized(42));
    }

    #[tokio::test]
    async fn test_corrupt_decimal_is_invalid_data() {
        let repo = repo().await;
        sqlx::query(
            "INSERT INTO rebates (identifier, incentive, amount, percentage, created_at) \
             VALUES ('REB-BAD', 2, 'ten', '0', '2024-01-01T00:00:00Z')",
        )
        .execute(repo.pool())
        .await
        .unwrap();

        let err = repo.get_by_identifier("REB-BAD").await.unwrap_err();
        assert!(matches!(err, crate::DbError::InvalidData { .. }));
    }
}
