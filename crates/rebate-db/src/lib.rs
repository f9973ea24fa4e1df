//! # rebate-db: Database Layer for the Rebate Engine
//!
//! SQLite storage for rebates, products and calculation records, using sqlx
//! for async access. The repositories implement the data store traits from
//! `rebate-core`, so the service runs unchanged against this crate.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Rebate Engine Data Flow                            │
//! │                                                                         │
//! │  RebateService (rebate-core)                                           │
//! │       │  RebateDataStore / ProductDataStore                             │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     rebate-db (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌──────────────────┐   ┌─────────────┐  │   │
//! │  │   │   Database    │    │   Repositories   │   │ Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │                  │   │ (embedded)  │  │   │
//! │  │   │               │◄───│ RebateRepo       │   │ 001_initial │  │   │
//! │  │   │ SqlitePool    │    │ ProductRepo      │   │             │  │   │
//! │  │   │               │    │ CalculationRepo  │   │             │  │   │
//! │  │   └───────────────┘    └──────────────────┘   └─────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite file (REBATE_DB_PATH, default ./rebate.db)                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Repository implementations
//! - [`store`] - `rebate-core` data store traits over the repositories
//!
//! ## Usage
//!
//! ```rust,ignore
//! use rebate_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("rebate.db")).await?;
//! let service = db.rebate_service();
//! let result = service.calculate(&request).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::DbError;
pub use pool::{Database, DbConfig};

pub use repository::calculation::CalculationRepository;
pub use repository::product::ProductRepository;
pub use repository::rebate::RebateRepository;
