//! # Validation Module
//!
//! Input checks applied before rebates and products are registered.
//!
//! ## Validation Layers
//! ```text
//! Console prompt ── re-asks until the value parses (decimal, menu index)
//!       │
//!       ▼
//! THIS MODULE ──── identifier shape, UOM length, non-negative money
//!       │
//!       ▼
//! SQLite ───────── NOT NULL, UNIQUE(identifier)
//! ```
//!
//! Zero amounts, prices and percentages are valid here: the calculator
//! rejects them per incentive kind, so a product priced at zero can still
//! carry an AmountPerUom rebate.

use rust_decimal::Decimal;

use crate::error::ValidationError;
use crate::types::{Product, Rebate};
use crate::{MAX_IDENTIFIER_LEN, MAX_UOM_LEN};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a rebate or product identifier.
///
/// The identifier is checked exactly as it will be stored, so a value that
/// passes here is the value later lookups must match.
///
/// ## Rules
/// - Must not be empty or whitespace only
/// - No leading or trailing whitespace
/// - At most [`MAX_IDENTIFIER_LEN`] characters
///
/// ## Example
/// ```rust
/// use rebate_core::validation::validate_identifier;
///
/// assert!(validate_identifier("rebate identifier", "REB-2024.Q1").is_ok());
/// assert!(validate_identifier("rebate identifier", "SKU 1").is_ok());
/// assert!(validate_identifier("rebate identifier", "  ").is_err());
/// assert!(validate_identifier("rebate identifier", " R1 ").is_err());
/// ```
pub fn validate_identifier(field: &str, identifier: &str) -> ValidationResult<()> {
    if identifier.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if identifier.trim() != identifier {
        return Err(ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: "must not start or end with whitespace".to_string(),
        });
    }

    if identifier.chars().count() > MAX_IDENTIFIER_LEN {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_IDENTIFIER_LEN,
        });
    }

    Ok(())
}

/// Validates a unit-of-measure label. Empty is allowed.
pub fn validate_uom(uom: &str) -> ValidationResult<()> {
    if uom.trim().chars().count() > MAX_UOM_LEN {
        return Err(ValidationError::TooLong {
            field: "uom".to_string(),
            max: MAX_UOM_LEN,
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates that a decimal is zero or positive.
pub fn validate_non_negative(field: &str, value: Decimal) -> ValidationResult<()> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(ValidationError::MustNotBeNegative {
            field: field.to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Entity Validators
// =============================================================================

/// Validates a rebate before it is stored.
pub fn validate_rebate(rebate: &Rebate) -> ValidationResult<()> {
    validate_identifier("rebate identifier", &rebate.identifier)?;
    validate_non_negative("rebate amount", rebate.amount.amount())?;
    validate_non_negative("rebate percentage", rebate.percentage.fraction())?;
    Ok(())
}

/// Validates a product before it is stored.
pub fn validate_product(product: &Product) -> ValidationResult<()> {
    validate_identifier("product identifier", &product.identifier)?;
    validate_non_negative("product price", product.price.amount())?;
    validate_uom(&product.uom)?;
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::{Money, Rate};
    use crate::types::{IncentiveType, SupportedIncentives};
    use rust_decimal_macros::dec;

    #[test]
    fn test_validate_identifier() {
        assert!(validate_identifier("id", "rebate1").is_ok());
        assert!(validate_identifier("id", "P-100_a.b").is_ok());

        assert_eq!(
            validate_identifier("id", ""),
            Err(ValidationError::Required {
                field: "id".to_string()
            })
        );
        assert!(matches!(
            validate_identifier("id", &"X".repeat(MAX_IDENTIFIER_LEN + 1)),
            Err(ValidationError::TooLong { .. })
        ));
        assert!(matches!(
            validate_identifier("id", " R1 "),
            Err(ValidationError::InvalidFormat { .. })
        ));
        assert!(matches!(
            validate_identifier("id", "R1\t"),
            Err(ValidationError::InvalidFormat { .. })
        ));
    }

    #[test]
    fn test_validate_identifier_accepts_any_inner_characters() {
        assert!(validate_identifier("id", "SKU 1").is_ok());
        assert!(validate_identifier("id", "a/b").is_ok());
        assert!(validate_identifier("id", "Crème brûlée #7").is_ok());
        assert!(validate_identifier("id", &"é".repeat(MAX_IDENTIFIER_LEN)).is_ok());
    }

    #[test]
    fn test_validate_uom() {
        assert!(validate_uom("").is_ok());
        assert!(validate_uom("kg").is_ok());
        assert!(validate_uom(&"u".repeat(MAX_UOM_LEN + 1)).is_err());
    }

    #[test]
    fn test_validate_non_negative() {
        assert!(validate_non_negative("price", dec!(0)).is_ok());
        assert!(validate_non_negative("price", dec!(-0.00)).is_ok());
        assert!(validate_non_negative("price", dec!(12.34)).is_ok());
        assert!(validate_non_negative("price", dec!(-0.01)).is_err());
    }

    #[test]
    fn test_validate_entities() {
        let rebate = Rebate {
            identifier: "rebate1".to_string(),
            incentive: IncentiveType::FixedRateRebate,
            amount: Money::zero(),
            percentage: Rate::from_fraction(dec!(-0.1)),
        };
        assert!(matches!(
            validate_rebate(&rebate),
            Err(ValidationError::MustNotBeNegative { .. })
        ));

        let product = Product {
            identifier: "product1".to_string(),
            price: Money::zero(),
            uom: "each".to_string(),
            supported_incentives: SupportedIncentives::empty(),
        };
        assert!(validate_product(&product).is_ok());
    }
}
