//! # Error Types
//!
//! Domain-specific error types for rebate-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  rebate-core errors (this file)                                        │
//! │  ├── CoreError        - What the service returns                       │
//! │  ├── ValidationError  - Input validation failures                      │
//! │  └── StoreError       - Opaque storage fault from a store impl         │
//! │                                                                         │
//! │  rebate-db errors (separate crate)                                     │
//! │  └── DbError          - Converted into StoreError at the trait seam    │
//! │                                                                         │
//! │  Flow: DbError → StoreError → CoreError → Console                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A rejected calculation is NOT an error: it is a normal
//! `CalculateRebateResult { success: false, .. }`. Errors here are reserved
//! for bad input and storage faults, which propagate unmasked.

use std::error::Error as StdError;

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Errors returned by the application service.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Input failed validation before anything was stored.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// The data store failed; the request is abandoned without retry.
    #[error(transparent)]
    Store(#[from] StoreError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Monetary amount or rate is below zero.
    #[error("{field} must not be negative")]
    MustNotBeNegative { field: String },

    /// Invalid format (e.g., an identifier padded with whitespace).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Store Error
// =============================================================================

/// A failure reported by a data store implementation.
///
/// The core does not know which backend is in use, so the underlying error
/// is kept as a boxed source for display and downcasting.
#[derive(Debug, Error)]
#[error("Data store failure: {source}")]
pub struct StoreError {
    #[source]
    source: Box<dyn StdError + Send + Sync>,
}

impl StoreError {
    /// Wraps a backend error.
    pub fn new(source: impl Into<Box<dyn StdError + Send + Sync>>) -> Self {
        StoreError {
            source: source.into(),
        }
    }
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

/// Result type returned by data store trait methods.
pub type StoreResult<T> = Result<T, StoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
