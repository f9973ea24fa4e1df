//! # Money Module
//!
//! Provides the `Money` and `Rate` types for rebate arithmetic.
//!
//! ## Why Decimal Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In binary floating point:                                              │
//! │    200 × 0.1 × 5 = 100.00000000000001  ❌ WRONG!                        │
//! │                                                                         │
//! │  Rebate rates are fractional (0.1, 0.075, ...), so integer cents       │
//! │  alone cannot express the FixedRateRebate formula.                     │
//! │                                                                         │
//! │  OUR SOLUTION: base-10 Decimal                                          │
//! │    200 × 0.1 × 5 = 100.0 exactly, no rounding policy applied           │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use rebate_core::money::{Money, Rate};
//! use rust_decimal::Decimal;
//!
//! let price = Money::new(Decimal::new(1099, 2)); // 10.99
//! let rate = Rate::from_fraction(Decimal::new(1, 1)); // 10%
//!
//! assert_eq!(price.to_string(), "10.99");
//! assert_eq!(price.checked_apply_rate(rate), Some(Money::new(Decimal::new(1099, 3))));
//! ```

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Minimum number of fractional digits shown when money is displayed.
const DISPLAY_SCALE: u32 = 2;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value held as an exact base-10 decimal.
///
/// ## Design Decisions
/// - **Decimal, not f64**: rate multiplication must not drift
/// - **No implicit rounding**: results keep every digit the inputs produce
/// - **Checked arithmetic**: overflow is reported, never a panic
///
/// ## Where Money is Used
/// ```text
/// Product.price ──┐
///                 ├──► calculator ──► CalculateRebateResult.rebate_amount
/// Rebate.amount ──┘                         │
///                                           ▼
///                                  CalculationRecord.amount
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(Decimal);

impl Money {
    /// Creates a Money value from a decimal amount.
    #[inline]
    pub const fn new(amount: Decimal) -> Self {
        Money(amount)
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(Decimal::ZERO)
    }

    /// Returns the underlying decimal.
    #[inline]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Checks if the value is zero (any scale: `0`, `0.00`).
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Checks if the value is below zero.
    #[inline]
    pub fn is_negative(&self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }

    /// Multiplies by a quantity (volume), or `None` on overflow.
    ///
    /// ## Example
    /// ```rust
    /// use rebate_core::money::Money;
    /// use rust_decimal::Decimal;
    ///
    /// let per_unit = Money::new(Decimal::from(5));
    /// assert_eq!(per_unit.checked_mul_quantity(Decimal::from(10)), Some(Money::new(Decimal::from(50))));
    /// ```
    #[inline]
    pub fn checked_mul_quantity(&self, quantity: Decimal) -> Option<Money> {
        self.0.checked_mul(quantity).map(Money)
    }

    /// Scales by a rate (`amount × fraction`), or `None` on overflow.
    #[inline]
    pub fn checked_apply_rate(&self, rate: Rate) -> Option<Money> {
        self.0.checked_mul(rate.fraction()).map(Money)
    }
}

/// Shows at least two fractional digits; extra precision is kept, not rounded.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut value = self.0.normalize();
        if value.scale() < DISPLAY_SCALE {
            value.rescale(DISPLAY_SCALE);
        }
        write!(f, "{}", value)
    }
}

impl From<Decimal> for Money {
    fn from(amount: Decimal) -> Self {
        Money(amount)
    }
}

// =============================================================================
// Rate Type
// =============================================================================

/// A rebate rate expressed as a fraction of the price (0.1 = 10%).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Rate(Decimal);

impl Rate {
    /// Creates a rate from a fraction (`0.25` is 25%).
    #[inline]
    pub const fn from_fraction(fraction: Decimal) -> Self {
        Rate(fraction)
    }

    /// Returns the rate as a fraction.
    #[inline]
    pub const fn fraction(&self) -> Decimal {
        self.0
    }

    /// Zero rate.
    #[inline]
    pub const fn zero() -> Self {
        Rate(Decimal::ZERO)
    }

    /// Checks if the rate is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Checks if the rate is below zero.
    #[inline]
    pub fn is_negative(&self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }
}

impl fmt::Display for Rate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.normalize())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
