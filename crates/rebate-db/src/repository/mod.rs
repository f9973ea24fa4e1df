//! # Repository Module
//!
//! Database repository implementations for the rebate engine.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  RebateService                                                          │
//! │       │                                                                 │
//! │       │  rebates.get_rebate("REB-1")                                    │
//! │       ▼                                                                 │
//! │  RebateRepository                                                       │
//! │  ├── get_by_identifier(&self, identifier)                               │
//! │  └── insert_if_absent(&self, rebate)                                    │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`RebateRepository`](rebate::RebateRepository) - Rebate lookup and registration
//! - [`ProductRepository`](product::ProductRepository) - Product lookup and registration
//! - [`CalculationRepository`](calculation::CalculationRepository) - Append-only calculation log

use std::str::FromStr;

use rust_decimal::Decimal;

use crate::error::{DbError, DbResult};

pub mod calculation;
pub mod product;
pub mod rebate;

/// Parses a decimal TEXT column.
pub(crate) fn parse_decimal(column: &str, raw: &str) -> DbResult<Decimal> {
    Decimal::from_str(raw)
        .map_err(|e| DbError::invalid_data(column, format!("'{}' is not a decimal: {}", raw, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_decimal() {
        assert_eq!(parse_decimal("rebates.amount", "19.99").unwrap(), dec!(19.99));
        assert_eq!(parse_decimal("rebates.amount", "0.075").unwrap(), dec!(0.075));
        assert!(matches!(
            parse_decimal("rebates.amount", "abc"),
            Err(DbError::InvalidData { .. })
        ));
    }
}
