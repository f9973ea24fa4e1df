//! # Calculation Repository
//!
//! Append-only log of successful rebate calculations.
//!
//! Records are never updated or deleted. Each carries a UUID so it can be
//! referenced outside the database.

use chrono::{DateTime, Utc};
use sqlx::{FromRow, SqlitePool};
use tracing::debug;
use uuid::Uuid;

use crate::error::DbResult;
use crate::repository::parse_decimal;
use rebate_core::{CalculationRecord, IncentiveType, Money};

/// Raw `rebate_calculations` row.
#[derive(Debug, FromRow)]
struct CalculationRow {
    id: String,
    rebate_identifier: String,
    incentive: i64,
    amount: String,
    created_at: DateTime<Utc>,
}

impl CalculationRow {
    fn into_record(self) -> DbResult<CalculationRecord> {
        Ok(CalculationRecord {
            amount: Money::new(parse_decimal("rebate_calculations.amount", &self.amount)?),
            incentive: IncentiveType::from_code(self.incentive),
            id: self.id,
            rebate_identifier: self.rebate_identifier,
            created_at: self.created_at,
        })
    }
}

/// Repository for calculation records.
#[derive(Debug, Clone)]
pub struct CalculationRepository {
    pool: SqlitePool,
}

impl CalculationRepository {
    /// Creates a new CalculationRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CalculationRepository { pool }
    }

    /// Appends a record for a successful calculation.
    ///
    /// ## Errors
    /// `DbError::ForeignKeyViolation` if the rebate identifier is not stored.
    pub async fn append(
        &self,
        rebate_identifier: &str,
        incentive: IncentiveType,
        amount: Money,
    ) -> DbResult<CalculationRecord> {
        let record = CalculationRecord {
            id: Uuid::new_v4().to_string(),
            rebate_identifier: rebate_identifier.to_string(),
            incentive,
            amount,
            created_at: Utc::now(),
        };

        debug!(
            id = %record.id,
            rebate = %record.rebate_identifier,
            amount = %record.amount,
            "Appending calculation record"
        );

        sqlx::query(
            r#"
            INSERT INTO rebate_calculations (id, rebate_identifier, incentive, amount, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(&record.id)
        .bind(&record.rebate_identifier)
        .bind(record.incentive.code())
        .bind(record.amount.amount().to_string())
        .bind(record.created_at)
        .execute(&self.pool)
        .await?;

        Ok(record)
    }

    /// Lists the records for one rebate, oldest first.
    pub async fn list_for_rebate(&self, rebate_identifier: &str) -> DbResult<Vec<CalculationRecord>> {
        let rows: Vec<CalculationRow> = sqlx::query_as(
            r#"
            SELECT id, rebate_identifier, incentive, amount, created_at
            FROM rebate_calculations
            WHERE rebate_identifier = ?1
            ORDER BY created_at ASC, rowid ASC
            "#,
        )
        .bind(rebate_identifier)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(CalculationRow::into_record).collect()
    }

    /// Counts all calculation records.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM rebate_calculations")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}
