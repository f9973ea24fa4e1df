//! # Rebate Service
//!
//! Orchestrates the data stores around the calculator.
//!
//! ## Calculate Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  calculate(request)                                                     │
//! │       │                                                                 │
//! │       ├── get_rebate(id)   ── None ──► { success: false, amount: 0 }    │
//! │       ├── get_product(id)  ── None ──► { success: false, amount: 0 }    │
//! │       ▼                                                                 │
//! │  calculator::calculate(rebate, product, volume)                        │
//! │       │                                                                 │
//! │       ├── Rejected(reason) ──► log reason, write nothing, fail          │
//! │       ▼                                                                 │
//! │  Approved(amount) ──► append_calculation_record ──► success             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A record is written if and only if the calculator approves. Storage
//! errors are returned as-is; there is no retry.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::calculator::{self, RebateOutcome};
use crate::error::CoreResult;
use crate::store::{ProductDataStore, RebateDataStore};
use crate::types::{CalculateRebateRequest, CalculateRebateResult, Product, Rebate};
use crate::validation::{validate_product, validate_rebate};

/// Application service for rebate calculation.
#[derive(Clone)]
pub struct RebateService {
    rebates: Arc<dyn RebateDataStore>,
    products: Arc<dyn ProductDataStore>,
}

impl std::fmt::Debug for RebateService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RebateService").finish_non_exhaustive()
    }
}

impl RebateService {
    /// Creates a service over the given stores.
    pub fn new(rebates: Arc<dyn RebateDataStore>, products: Arc<dyn ProductDataStore>) -> Self {
        RebateService { rebates, products }
    }

    /// Registers a rebate and a product, skipping any that already exist.
    ///
    /// Both entities are validated before either is written. Calling this
    /// twice with the same identifiers stores each entity once.
    pub async fn register_rebate_and_product(
        &self,
        rebate: &Rebate,
        product: &Product,
    ) -> CoreResult<()> {
        validate_rebate(rebate)?;
        validate_product(product)?;

        let rebate_inserted = self.rebates.save_rebate_if_absent(rebate).await?;
        let product_inserted = self.products.save_product_if_absent(product).await?;

        info!(
            rebate = %rebate.identifier,
            product = %product.identifier,
            rebate_inserted,
            product_inserted,
            "Registered rebate and product"
        );

        Ok(())
    }

    /// Calculates the rebate for a request and records it on success.
    pub async fn calculate(
        &self,
        request: &CalculateRebateRequest,
    ) -> CoreResult<CalculateRebateResult> {
        debug!(
            rebate = %request.rebate_identifier,
            product = %request.product_identifier,
            volume = %request.volume,
            "Calculating rebate"
        );

        let Some(rebate) = self.rebates.get_rebate(&request.rebate_identifier).await? else {
            warn!(rebate = %request.rebate_identifier, "Rebate not found");
            return Ok(CalculateRebateResult::failed());
        };

        let Some(product) = self.products.get_product(&request.product_identifier).await? else {
            warn!(product = %request.product_identifier, "Product not found");
            return Ok(CalculateRebateResult::failed());
        };

        match calculator::calculate(&rebate, &product, request.volume) {
            RebateOutcome::Approved(amount) => {
                self.rebates
                    .append_calculation_record(&rebate.identifier, rebate.incentive, amount)
                    .await?;

                info!(
                    rebate = %rebate.identifier,
                    incentive = %rebate.incentive,
                    amount = %amount,
                    "Rebate calculated"
                );
                Ok(CalculateRebateResult::succeeded(amount))
            }
            RebateOutcome::Rejected(reason) => {
                warn!(
                    rebate = %rebate.identifier,
                    product = %product.identifier,
                    incentive = %rebate.incentive,
                    %reason,
                    "Rebate calculation rejected"
                );
                Ok(CalculateRebateResult::failed())
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
