//! # Rebate Calculator
//!
//! The rule table that turns a rebate, a product and a volume into an amount.
//!
//! ## Rule Table
//! ```text
//! ┌──────────────────┬───────────────────────────────────┬─────────────────────────┐
//! │ Incentive        │ Rejected when (first match wins)  │ Amount                  │
//! ├──────────────────┼───────────────────────────────────┼─────────────────────────┤
//! │ FixedCashAmount  │ amount = 0, unsupported           │ amount                  │
//! │ FixedRateRebate  │ percentage = 0, price = 0,        │ price × percentage × vol│
//! │                  │ volume = 0, unsupported           │                         │
//! │ AmountPerUom     │ amount = 0, volume = 0,           │ amount × volume         │
//! │                  │ unsupported                       │                         │
//! │ Unrecognized     │ always                            │ -                       │
//! └──────────────────┴───────────────────────────────────┴─────────────────────────┘
//! ```
//!
//! `calculate` is pure: it reads its three inputs and nothing else.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::money::Money;
use crate::types::{CalculateRebateResult, IncentiveType, Product, Rebate};

// =============================================================================
// Outcome
// =============================================================================

/// Why a calculation was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectionReason {
    /// FixedCashAmount or AmountPerUom with a zero rebate amount.
    ZeroRebateAmount,
    /// FixedRateRebate with a zero percentage.
    ZeroPercentage,
    /// FixedRateRebate against a zero-priced product.
    ZeroPrice,
    /// FixedRateRebate or AmountPerUom with zero volume.
    ZeroVolume,
    /// The product does not list the rebate's incentive kind.
    UnsupportedIncentive,
    /// The rebate carries an incentive code outside the known set.
    UnknownIncentive,
    /// The product of the inputs exceeds the decimal range.
    AmountOverflow,
}

impl fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            RejectionReason::ZeroRebateAmount => "rebate amount is zero",
            RejectionReason::ZeroPercentage => "rebate percentage is zero",
            RejectionReason::ZeroPrice => "product price is zero",
            RejectionReason::ZeroVolume => "volume is zero",
            RejectionReason::UnsupportedIncentive => "product does not support the incentive",
            RejectionReason::UnknownIncentive => "incentive type is not recognized",
            RejectionReason::AmountOverflow => "rebate amount overflows",
        };
        f.write_str(text)
    }
}

/// Result of running the rule table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RebateOutcome {
    Approved(Money),
    Rejected(RejectionReason),
}

impl RebateOutcome {
    /// Checks if the calculation succeeded.
    #[inline]
    pub fn is_approved(&self) -> bool {
        matches!(self, RebateOutcome::Approved(_))
    }

    /// The computed amount, or zero when rejected.
    #[inline]
    pub fn amount(&self) -> Money {
        match self {
            RebateOutcome::Approved(amount) => *amount,
            RebateOutcome::Rejected(_) => Money::zero(),
        }
    }
}

impl From<RebateOutcome> for CalculateRebateResult {
    fn from(outcome: RebateOutcome) -> Self {
        match outcome {
            RebateOutcome::Approved(amount) => CalculateRebateResult::succeeded(amount),
            RebateOutcome::Rejected(_) => CalculateRebateResult::failed(),
        }
    }
}

// =============================================================================
// Calculation
// =============================================================================

/// Evaluates the rule table for one rebate, product and volume.
///
/// Callers must resolve both entities first; a missing rebate or product
/// is the service's concern, not this function's.
pub fn calculate(rebate: &Rebate, product: &Product, volume: Decimal) -> RebateOutcome {
    use RebateOutcome::{Approved, Rejected};

    match rebate.incentive {
        IncentiveType::FixedCashAmount => {
            if rebate.amount.is_zero() {
                return Rejected(RejectionReason::ZeroRebateAmount);
            }
            if !product.supports(IncentiveType::FixedCashAmount) {
                return Rejected(RejectionReason::UnsupportedIncentive);
            }
            Approved(rebate.amount)
        }

        IncentiveType::FixedRateRebate => {
            if rebate.percentage.is_zero() {
                return Rejected(RejectionReason::ZeroPercentage);
            }
            if product.price.is_zero() {
                return Rejected(RejectionReason::ZeroPrice);
            }
            if volume.is_zero() {
                return Rejected(RejectionReason::ZeroVolume);
            }
            if !product.supports(IncentiveType::FixedRateRebate) {
                return Rejected(RejectionReason::UnsupportedIncentive);
            }
            product
                .price
                .checked_apply_rate(rebate.percentage)
                .and_then(|scaled| scaled.checked_mul_quantity(volume))
                .map_or(Rejected(RejectionReason::AmountOverflow), Approved)
        }

        IncentiveType::AmountPerUom => {
            if rebate.amount.is_zero() {
                return Rejected(RejectionReason::ZeroRebateAmount);
            }
            if volume.is_zero() {
                return Rejected(RejectionReason::ZeroVolume);
            }
            if !product.supports(IncentiveType::AmountPerUom) {
                return Rejected(RejectionReason::UnsupportedIncentive);
            }
            rebate
                .amount
                .checked_mul_quantity(volume)
                .map_or(Rejected(RejectionReason::AmountOverflow), Approved)
        }

        IncentiveType::Unrecognized(_) => Rejected(RejectionReason::UnknownIncentive),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Rate;
    use crate::types::SupportedIncentives;
    use rust_decimal_macros::dec;

    fn rebate(incentive: IncentiveType, amount: Decimal, percentage: Decimal) -> Rebate {
        Rebate {
            identifier: "rebate1".to_string(),
            incentive,
            amount: Money::new(amount),
            percentage: Rate::from_fraction(percentage),
        }
    }

    fn product(price: Decimal, supports: impl Into<SupportedIncentives>) -> Product {
        Product {
            identifier: "product1".to_string(),
            price: Money::new(price),
            uom: "each".to_string(),
            supported_incentives: supports.into(),
        }
    }

    #[test]
    fn test_fixed_cash_amount_ignores_price_and_volume() {
        let r = rebate(IncentiveType::FixedCashAmount, dec!(50), dec!(0));
        let p = product(dec!(100), IncentiveType::FixedCashAmount);

        assert_eq!(calculate(&r, &p, dec!(10)), RebateOutcome::Approved(Money::new(dec!(50))));
        assert_eq!(calculate(&r, &p, dec!(0)), RebateOutcome::Approved(Money::new(dec!(50))));
    }

    #[test]
    fn test_fixed_cash_amount_zero_amount_rejected() {
        let r = rebate(IncentiveType::FixedCashAmount, dec!(0), dec!(0));
        let p = product(dec!(100), IncentiveType::FixedCashAmount);

        let outcome = calculate(&r, &p, dec!(10));
        assert_eq!(outcome, RebateOutcome::Rejected(RejectionReason::ZeroRebateAmount));
        assert!(outcome.amount().is_zero());
    }

    #[test]
    fn test_fixed_rate_rebate() {
        let r = rebate(IncentiveType::FixedRateRebate, dec!(0), dec!(0.1));
        let p = product(dec!(200), IncentiveType::FixedRateRebate);

        assert_eq!(calculate(&r, &p, dec!(5)), RebateOutcome::Approved(Money::new(dec!(100))));
    }

    #[test]
    fn test_fixed_rate_rebate_keeps_fractional_cents() {
        let r = rebate(IncentiveType::FixedRateRebate, dec!(0), dec!(0.075));
        let p = product(dec!(19.99), IncentiveType::FixedRateRebate);

        // 19.99 × 0.075 × 3 = 4.497750
        assert_eq!(calculate(&r, &p, dec!(3)).amount(), Money::new(dec!(4.49775)));
    }

    #[test]
    fn test_fixed_rate_rebate_guards() {
        let supported = IncentiveType::FixedRateRebate;

        let zero_pct = rebate(supported, dec!(0), dec!(0));
        assert_eq!(
            calculate(&zero_pct, &product(dec!(200), supported), dec!(5)),
            RebateOutcome::Rejected(RejectionReason::ZeroPercentage)
        );

        let r = rebate(supported, dec!(0), dec!(0.1));
        assert_eq!(
            calculate(&r, &product(dec!(0), supported), dec!(5)),
            RebateOutcome::Rejected(RejectionReason::ZeroPrice)
        );
        assert_eq!(
            calculate(&r, &product(dec!(200), supported), dec!(0)),
            RebateOutcome::Rejected(RejectionReason::ZeroVolume)
        );
        assert_eq!(
            calculate(&r, &product(dec!(200), IncentiveType::AmountPerUom), dec!(5)),
            RebateOutcome::Rejected(RejectionReason::UnsupportedIncentive)
        );
    }

    #[test]
    fn test_amount_per_uom() {
        let r = rebate(IncentiveType::AmountPerUom, dec!(5), dec!(0));
        let p = product(dec!(100), IncentiveType::AmountPerUom);

        assert_eq!(calculate(&r, &p, dec!(10)), RebateOutcome::Approved(Money::new(dec!(50))));
        assert_eq!(
            calculate(&r, &p, dec!(0)),
            RebateOutcome::Rejected(RejectionReason::ZeroVolume)
        );
    }

    #[test]
    fn test_amount_per_uom_ignores_zero_price() {
        let r = rebate(IncentiveType::AmountPerUom, dec!(5), dec!(0));
        let p = product(dec!(0), IncentiveType::AmountPerUom);

        assert_eq!(calculate(&r, &p, dec!(2)).amount(), Money::new(dec!(10)));
    }

    #[test]
    fn test_amount_per_uom_zero_amount_rejected() {
        let r = rebate(IncentiveType::AmountPerUom, dec!(0), dec!(0));
        let p = product(dec!(100), IncentiveType::AmountPerUom);

        let outcome = calculate(&r, &p, dec!(10));
        assert_eq!(outcome, RebateOutcome::Rejected(RejectionReason::ZeroRebateAmount));
        assert!(outcome.amount().is_zero());
    }

    #[test]
    fn test_negative_volume_is_not_rejected() {
        let r = rebate(IncentiveType::AmountPerUom, dec!(5), dec!(0));
        let p = product(dec!(100), IncentiveType::AmountPerUom);

        assert_eq!(calculate(&r, &p, dec!(-2)).amount(), Money::new(dec!(-10)));
    }

    #[test]
    fn test_unsupported_incentive_always_rejected() {
        let none = SupportedIncentives::empty();
        let all = SupportedIncentives::all();

        for kind in IncentiveType::KNOWN {
            let r = rebate(kind, dec!(5), dec!(0.1));
            let outcome = calculate(&r, &product(dec!(100), none), dec!(10));
            assert_eq!(outcome, RebateOutcome::Rejected(RejectionReason::UnsupportedIncentive));

            let others_only: SupportedIncentives = all.iter().filter(|k| *k != kind).collect();
            let outcome = calculate(&r, &product(dec!(100), others_only), dec!(10));
            assert!(!outcome.is_approved(), "{kind} should need its own flag");
        }
    }

    #[test]
    fn test_product_supporting_several_kinds() {
        let p = product(dec!(200), SupportedIncentives::all());

        let cash = rebate(IncentiveType::FixedCashAmount, dec!(50), dec!(0));
        let rate = rebate(IncentiveType::FixedRateRebate, dec!(0), dec!(0.1));
        let per_uom = rebate(IncentiveType::AmountPerUom, dec!(5), dec!(0));

        assert_eq!(calculate(&cash, &p, dec!(5)).amount(), Money::new(dec!(50)));
        assert_eq!(calculate(&rate, &p, dec!(5)).amount(), Money::new(dec!(100)));
        assert_eq!(calculate(&per_uom, &p, dec!(5)).amount(), Money::new(dec!(25)));
    }

    #[test]
    fn test_unrecognized_incentive_rejected() {
        let r = rebate(IncentiveType::Unrecognized(9), dec!(50), dec!(0.1));
        let p = product(dec!(100), SupportedIncentives::all());

        assert_eq!(
            calculate(&r, &p, dec!(10)),
            RebateOutcome::Rejected(RejectionReason::UnknownIncentive)
        );
    }

    #[test]
    fn test_overflow_rejected_not_panicking() {
        let r = rebate(IncentiveType::AmountPerUom, Decimal::MAX, dec!(0));
        let p = product(dec!(1), IncentiveType::AmountPerUom);

        assert_eq!(
            calculate(&r, &p, dec!(2)),
            RebateOutcome::Rejected(RejectionReason::AmountOverflow)
        );
    }

    #[test]
    fn test_outcome_into_result() {
        let ok: CalculateRebateResult = RebateOutcome::Approved(Money::new(dec!(12.5))).into();
        assert_eq!(ok, CalculateRebateResult::succeeded(Money::new(dec!(12.5))));

        let failed: CalculateRebateResult =
            RebateOutcome::Rejected(RejectionReason::ZeroVolume).into();
        assert_eq!(failed, CalculateRebateResult::failed());
    }
}
