//! # rebate-core: Pure Business Logic for Rebate Calculation
//!
//! This crate holds the rebate rules as pure functions plus the service that
//! orchestrates them against an abstract data store. It never opens a file,
//! socket or database.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Rebate Engine Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 apps/runner (Console)                           │   │
//! │  │    Product Info ──► Rebate Info ──► Volume ──► Result           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ rebate-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌────────────┐  ┌──────────┐  │   │
//! │  │   │   types   │  │   money   │  │ calculator │  │ service  │  │   │
//! │  │   │  Rebate   │  │   Money   │  │  outcome   │  │  store   │  │   │
//! │  │   │  Product  │  │   Rate    │  │  reasons   │  │  traits  │  │   │
//! │  │   └───────────┘  └───────────┘  └────────────┘  └──────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK                            │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ RebateDataStore / ProductDataStore     │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    rebate-db (Database Layer)                   │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Rebate, Product, IncentiveType, ...)
//! - [`money`] - Decimal `Money` and `Rate` wrappers
//! - [`calculator`] - The three-way incentive rule evaluator
//! - [`store`] - Data store contracts consumed by the service
//! - [`service`] - Fetch, calculate, record
//! - [`validation`] - Input checks before registration
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use rebate_core::calculator::calculate;
//! use rebate_core::money::{Money, Rate};
//! use rebate_core::types::{IncentiveType, Product, Rebate, SupportedIncentives};
//! use rust_decimal::Decimal;
//!
//! let rebate = Rebate {
//!     identifier: "R-10PCT".to_string(),
//!     incentive: IncentiveType::FixedRateRebate,
//!     amount: Money::zero(),
//!     percentage: Rate::from_fraction(Decimal::new(1, 1)), // 0.1
//! };
//! let product = Product {
//!     identifier: "P-100".to_string(),
//!     price: Money::new(Decimal::from(200)),
//!     uom: "each".to_string(),
//!     supported_incentives: SupportedIncentives::from(IncentiveType::FixedRateRebate),
//! };
//!
//! // 200 × 0.1 × 5 = 100
//! let outcome = calculate(&rebate, &product, Decimal::from(5));
//! assert_eq!(outcome.amount(), Money::new(Decimal::from(100)));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod calculator;
pub mod error;
pub mod money;
pub mod service;
pub mod store;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use calculator::{calculate, RebateOutcome, RejectionReason};
pub use error::{CoreError, CoreResult, StoreError, StoreResult, ValidationError};
pub use money::{Money, Rate};
pub use service::RebateService;
pub use store::{ProductDataStore, RebateDataStore};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum length of a rebate or product identifier.
pub const MAX_IDENTIFIER_LEN: usize = 64;

/// Maximum length of a unit-of-measure label.
pub const MAX_UOM_LEN: usize = 32;
