//! # Data Store Contracts
//!
//! The storage operations the service depends on. rebate-db implements these
//! over SQLite; tests use the mockall doubles generated here.
//!
//! ```text
//! RebateService ──► RebateDataStore  ──► get_rebate / save_rebate_if_absent
//!               │                        append_calculation_record
//!               └─► ProductDataStore ──► get_product / save_product_if_absent
//! ```

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use crate::error::StoreResult;
use crate::money::Money;
use crate::types::{IncentiveType, Product, Rebate};

/// Rebate lookups plus the calculation audit log.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait RebateDataStore: Send + Sync {
    /// Looks up a rebate by identifier. `Ok(None)` when absent.
    async fn get_rebate(&self, identifier: &str) -> StoreResult<Option<Rebate>>;

    /// Stores the rebate unless one with the same identifier exists.
    ///
    /// Returns `true` if a row was written. An existing rebate is left
    /// untouched.
    async fn save_rebate_if_absent(&self, rebate: &Rebate) -> StoreResult<bool>;

    /// Appends one calculation record.
    async fn append_calculation_record(
        &self,
        rebate_identifier: &str,
        incentive: IncentiveType,
        amount: Money,
    ) -> StoreResult<()>;
}

/// Product lookups.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ProductDataStore: Send + Sync {
    /// Looks up a product by identifier. `Ok(None)` when absent.
    async fn get_product(&self, identifier: &str) -> StoreResult<Option<Product>>;

    /// Stores the product unless one with the same identifier exists.
    async fn save_product_if_absent(&self, product: &Product) -> StoreResult<bool>;
}
