//! # Domain Types
//!
//! Core domain types used throughout the rebate engine.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌──────────────────────┐   ┌─────────────────┐  │
//! │  │     Rebate      │   │       Product        │   │ CalculationRec. │  │
//! │  │  ─────────────  │   │  ──────────────────  │   │  ─────────────  │  │
//! │  │  identifier     │   │  identifier          │   │  id (UUID)      │  │
//! │  │  incentive      │   │  price (Money)       │   │  rebate ident.  │  │
//! │  │  amount (Money) │   │  uom                 │   │  incentive      │  │
//! │  │  percentage     │   │  supported (bit-set) │   │  amount         │  │
//! │  └─────────────────┘   └──────────────────────┘   └─────────────────┘  │
//! │                                                                         │
//! │  ┌──────────────────────┐   ┌──────────────────────────────────────┐   │
//! │  │   IncentiveType      │   │   SupportedIncentives (u8 bit-set)   │   │
//! │  │  0 FixedRateRebate   │   │   1 << 0  FixedRateRebate            │   │
//! │  │  1 AmountPerUom      │   │   1 << 1  AmountPerUom               │   │
//! │  │  2 FixedCashAmount   │   │   1 << 2  FixedCashAmount            │   │
//! │  └──────────────────────┘   └──────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;
use std::ops::BitOr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::money::{Money, Rate};

// =============================================================================
// Incentive Type
// =============================================================================

/// How a rebate's amount is computed.
///
/// The three named kinds are the closed set the calculator understands.
/// `Unrecognized` carries a stored code outside that set so it can be
/// loaded and then rejected instead of failing the whole lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IncentiveType {
    /// `price × percentage × volume`
    FixedRateRebate,
    /// `amount × volume`
    AmountPerUom,
    /// `amount`, independent of price and volume
    FixedCashAmount,
    /// A stored code with no known meaning.
    Unrecognized(i64),
}

impl IncentiveType {
    /// The known kinds in code order.
    pub const KNOWN: [IncentiveType; 3] = [
        IncentiveType::FixedRateRebate,
        IncentiveType::AmountPerUom,
        IncentiveType::FixedCashAmount,
    ];

    /// Returns the persisted integer code.
    pub const fn code(self) -> i64 {
        match self {
            IncentiveType::FixedRateRebate => 0,
            IncentiveType::AmountPerUom => 1,
            IncentiveType::FixedCashAmount => 2,
            IncentiveType::Unrecognized(code) => code,
        }
    }

    /// Decodes a persisted integer code.
    pub const fn from_code(code: i64) -> Self {
        match code {
            0 => IncentiveType::FixedRateRebate,
            1 => IncentiveType::AmountPerUom,
            2 => IncentiveType::FixedCashAmount,
            other => IncentiveType::Unrecognized(other),
        }
    }

    /// The bit this kind occupies in [`SupportedIncentives`], if any.
    const fn flag(self) -> Option<u8> {
        match self {
            IncentiveType::FixedRateRebate => Some(1 << 0),
            IncentiveType::AmountPerUom => Some(1 << 1),
            IncentiveType::FixedCashAmount => Some(1 << 2),
            IncentiveType::Unrecognized(_) => None,
        }
    }
}

impl fmt::Display for IncentiveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IncentiveType::FixedRateRebate => write!(f, "FixedRateRebate"),
            IncentiveType::AmountPerUom => write!(f, "AmountPerUom"),
            IncentiveType::FixedCashAmount => write!(f, "FixedCashAmount"),
            IncentiveType::Unrecognized(code) => write!(f, "Unrecognized({})", code),
        }
    }
}

// =============================================================================
// Supported Incentives
// =============================================================================

/// The set of incentive kinds a product accepts, stored as a bit-set.
///
/// ## Membership, Not Equality
/// A product flagged `FixedRateRebate | AmountPerUom` supports both; the
/// calculator only ever asks `contains(kind)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SupportedIncentives(u8);

impl SupportedIncentives {
    const ALL_BITS: u8 = 0b111;

    /// No supported incentives.
    #[inline]
    pub const fn empty() -> Self {
        SupportedIncentives(0)
    }

    /// Every known incentive kind.
    #[inline]
    pub const fn all() -> Self {
        SupportedIncentives(Self::ALL_BITS)
    }

    /// Builds a set from raw bits; bits with no known kind are dropped.
    #[inline]
    pub const fn from_bits(bits: u8) -> Self {
        SupportedIncentives(bits & Self::ALL_BITS)
    }

    /// Returns the raw bits.
    #[inline]
    pub const fn bits(&self) -> u8 {
        self.0
    }

    /// Checks if no kind is supported.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Checks if `kind` is in the set. Unrecognized kinds are never members.
    #[inline]
    pub const fn contains(&self, kind: IncentiveType) -> bool {
        match kind.flag() {
            Some(bit) => self.0 & bit != 0,
            None => false,
        }
    }

    /// Adds `kind` to the set. Unrecognized kinds are ignored.
    pub fn insert(&mut self, kind: IncentiveType) {
        if let Some(bit) = kind.flag() {
            self.0 |= bit;
        }
    }

    /// Iterates the member kinds in code order.
    pub fn iter(&self) -> impl Iterator<Item = IncentiveType> + '_ {
        IncentiveType::KNOWN
            .into_iter()
            .filter(move |kind| self.contains(*kind))
    }
}

impl From<IncentiveType> for SupportedIncentives {
    fn from(kind: IncentiveType) -> Self {
        let mut set = SupportedIncentives::empty();
        set.insert(kind);
        set
    }
}

impl BitOr for IncentiveType {
    type Output = SupportedIncentives;

    fn bitor(self, other: Self) -> SupportedIncentives {
        SupportedIncentives::from(self) | other
    }
}

impl BitOr for SupportedIncentives {
    type Output = Self;

    fn bitor(self, other: Self) -> Self {
        SupportedIncentives(self.0 | other.0)
    }
}

impl BitOr<IncentiveType> for SupportedIncentives {
    type Output = Self;

    fn bitor(mut self, kind: IncentiveType) -> Self {
        self.insert(kind);
        self
    }
}

impl FromIterator<IncentiveType> for SupportedIncentives {
    fn from_iter<I: IntoIterator<Item = IncentiveType>>(iter: I) -> Self {
        let mut set = SupportedIncentives::empty();
        for kind in iter {
            set.insert(kind);
        }
        set
    }
}

impl fmt::Display for SupportedIncentives {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "None");
        }
        let names: Vec<String> = self.iter().map(|kind| kind.to_string()).collect();
        write!(f, "{}", names.join(" | "))
    }
}

// =============================================================================
// Rebate
// =============================================================================

/// A rebate agreement, keyed by its business identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rebate {
    /// Unique business identifier.
    pub identifier: String,

    /// Which formula applies.
    pub incentive: IncentiveType,

    /// Used by FixedCashAmount (flat amount) and AmountPerUom (per unit).
    pub amount: Money,

    /// Used by FixedRateRebate.
    pub percentage: Rate,
}

// =============================================================================
// Product
// =============================================================================

/// A product that rebates are calculated against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Unique business identifier.
    pub identifier: String,

    /// Unit price.
    pub price: Money,

    /// Unit of measure label, descriptive only.
    pub uom: String,

    /// Incentive kinds this product accepts.
    pub supported_incentives: SupportedIncentives,
}

impl Product {
    /// Checks if this product accepts the given incentive kind.
    #[inline]
    pub fn supports(&self, kind: IncentiveType) -> bool {
        self.supported_incentives.contains(kind)
    }
}

// =============================================================================
// Calculation Request / Result
// =============================================================================

/// Input to a single rebate calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculateRebateRequest {
    pub rebate_identifier: String,
    pub product_identifier: String,
    /// Units being rebated. Zero is rejected by rate and per-unit rules.
    pub volume: Decimal,
}

/// Outcome of a calculation as seen by callers.
///
/// `rebate_amount` is only meaningful when `success` is true and is zero
/// otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CalculateRebateResult {
    pub success: bool,
    pub rebate_amount: Money,
}

impl CalculateRebateResult {
    /// A failed calculation with a zero amount.
    #[inline]
    pub const fn failed() -> Self {
        CalculateRebateResult {
            success: false,
            rebate_amount: Money::zero(),
        }
    }

    /// A successful calculation.
    #[inline]
    pub const fn succeeded(rebate_amount: Money) -> Self {
        CalculateRebateResult {
            success: true,
            rebate_amount,
        }
    }
}

// =============================================================================
// Calculation Record
// =============================================================================

/// Persisted audit row for one successful calculation. Append-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationRecord {
    /// Unique identifier (UUID v4).
    pub id: String,
    pub rebate_identifier: String,
    pub incentive: IncentiveType,
    pub amount: Money,
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Unit Tests
// =============================================================================
