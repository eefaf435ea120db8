//! Discount Tiers
//!
//! A promotional offer bundles one or more tiers. Each tier is both a discount
//! rule and the source of the code pattern customers type at checkout: a
//! 20% tier accepts `SPIN20` followed by at least one uppercase letter or
//! digit, a 50 cash tier accepts `CASH50…`.

use std::{
    fmt::{self, Display, Formatter},
    str::FromStr,
};

use regex::Regex;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Code prefix for percentage tiers.
pub const PERCENTAGE_PREFIX: &str = "SPIN";

/// Code prefix for cash tiers.
pub const CASH_PREFIX: &str = "CASH";

/// Tier validation errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TierError {
    /// A percentage tier outside 1 to 100.
    #[error("percentage tier value must be between 1 and 100, got {0}")]
    PercentageOutOfRange(Decimal),

    /// A cash tier of zero or less.
    #[error("cash tier value must be greater than zero, got {0}")]
    CashNotPositive(Decimal),
}

/// One discount rule within a promotional offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum DiscountTier {
    /// Percentage of the order total.
    Percentage(Decimal),

    /// Fixed amount in the cart's currency.
    Cash(Decimal),
}

impl DiscountTier {
    /// Code prefix for this tier type.
    #[must_use]
    pub const fn prefix(&self) -> &'static str {
        match self {
            Self::Percentage(_) => PERCENTAGE_PREFIX,
            Self::Cash(_) => CASH_PREFIX,
        }
    }

    /// Percent points or cash amount.
    #[must_use]
    pub const fn value(&self) -> Decimal {
        match self {
            Self::Percentage(value) | Self::Cash(value) => *value,
        }
    }

    /// Lowercase tier type name.
    #[must_use]
    pub const fn type_as_str(&self) -> &'static str {
        match self {
            Self::Percentage(_) => "percentage",
            Self::Cash(_) => "cash",
        }
    }

    /// The fixed part of every code this tier accepts, e.g. `SPIN20`.
    #[must_use]
    pub fn code_stem(&self) -> String {
        format!("{}{}", self.prefix(), self.value().normalize())
    }

    /// Build the pattern `^{PREFIX}{VALUE}[A-Z0-9]+$` for this tier.
    ///
    /// # Errors
    ///
    /// Returns an error if the regex engine rejects the pattern.
    pub fn pattern(&self) -> Result<CodePattern, regex::Error> {
        let regex = Regex::new(&format!(
            "^{}[A-Z0-9]+$",
            regex::escape(&self.code_stem())
        ))?;

        Ok(CodePattern { regex })
    }

    /// Check the value bounds for this tier's type.
    ///
    /// # Errors
    ///
    /// - [`TierError::PercentageOutOfRange`]: percentage outside `[1, 100]`.
    /// - [`TierError::CashNotPositive`]: cash value of zero or less.
    pub fn validate(&self) -> Result<(), TierError> {
        match *self {
            Self::Percentage(value) if value < Decimal::ONE || value > Decimal::ONE_HUNDRED => {
                Err(TierError::PercentageOutOfRange(value))
            }
            Self::Cash(value) if value <= Decimal::ZERO => Err(TierError::CashNotPositive(value)),
            Self::Percentage(_) | Self::Cash(_) => Ok(()),
        }
    }
}

/// Compiled code pattern for a single tier.
#[derive(Debug, Clone)]
pub struct CodePattern {
    regex: Regex,
}

impl CodePattern {
    /// Test a normalised (trimmed, uppercased) code.
    #[must_use]
    pub fn is_match(&self, code: &str) -> bool {
        self.regex.is_match(code)
    }
}

/// Offer type derived from its tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OfferKind {
    /// Every tier is a percentage.
    Percentage,
    /// Every tier is a cash amount.
    Cash,
    /// Both tier types are present.
    Mixed,
}

impl OfferKind {
    /// Derive the offer type, or `None` for an empty tier list.
    #[must_use]
    pub fn from_tiers(tiers: &[DiscountTier]) -> Option<Self> {
        let has_percentage = tiers
            .iter()
            .any(|tier| matches!(tier, DiscountTier::Percentage(_)));

        let has_cash = tiers
            .iter()
            .any(|tier| matches!(tier, DiscountTier::Cash(_)));

        match (has_percentage, has_cash) {
            (true, true) => Some(Self::Mixed),
            (true, false) => Some(Self::Percentage),
            (false, true) => Some(Self::Cash),
            (false, false) => None,
        }
    }

    /// Lowercase name as stored and sent over the wire.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Percentage => "percentage",
            Self::Cash => "cash",
            Self::Mixed => "mixed",
        }
    }
}

impl Display for OfferKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OfferKind {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "percentage" => Ok(Self::Percentage),
            "cash" => Ok(Self::Cash),
            "mixed" => Ok(Self::Mixed),
            other => Err(format!("unknown offer type: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::dec;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn percentage_pattern_requires_suffix() -> TestResult {
        let pattern = DiscountTier::Percentage(dec!(20)).pattern()?;

        assert!(pattern.is_match("SPIN20AB12"));
        assert!(pattern.is_match("SPIN20X"));
        assert!(!pattern.is_match("SPIN20"));
        assert!(!pattern.is_match("SPIN20ab"));
        assert!(!pattern.is_match("XSPIN20AB"));
        assert!(!pattern.is_match("CASH20AB"));

        Ok(())
    }

    #[test]
    fn stem_drops_trailing_zeros() {
        assert_eq!(DiscountTier::Cash(dec!(50.00)).code_stem(), "CASH50");
        assert_eq!(DiscountTier::Percentage(dec!(12.5)).code_stem(), "SPIN12.5");
    }

    #[test]
    fn fractional_stem_is_matched_literally() -> TestResult {
        let pattern = DiscountTier::Percentage(dec!(12.5)).pattern()?;

        assert!(pattern.is_match("SPIN12.5A"));
        assert!(!pattern.is_match("SPIN1215A"));

        Ok(())
    }

    #[test]
    fn validate_enforces_bounds() {
        assert!(DiscountTier::Percentage(dec!(1)).validate().is_ok());
        assert!(DiscountTier::Percentage(dec!(100)).validate().is_ok());
        assert_eq!(
            DiscountTier::Percentage(dec!(0)).validate(),
            Err(TierError::PercentageOutOfRange(dec!(0)))
        );
        assert_eq!(
            DiscountTier::Percentage(dec!(101)).validate(),
            Err(TierError::PercentageOutOfRange(dec!(101)))
        );
        assert_eq!(
            DiscountTier::Cash(dec!(0)).validate(),
            Err(TierError::CashNotPositive(dec!(0)))
        );
        assert!(DiscountTier::Cash(dec!(0.5)).validate().is_ok());
    }

    #[test]
    fn offer_kind_is_derived_from_tiers() {
        let percentage = DiscountTier::Percentage(dec!(10));
        let cash = DiscountTier::Cash(dec!(25));

        assert_eq!(OfferKind::from_tiers(&[]), None);
        assert_eq!(
            OfferKind::from_tiers(&[percentage]),
            Some(OfferKind::Percentage)
        );
        assert_eq!(OfferKind::from_tiers(&[cash]), Some(OfferKind::Cash));
        assert_eq!(
            OfferKind::from_tiers(&[percentage, cash]),
            Some(OfferKind::Mixed)
        );
    }

    #[test]
    fn tiers_serialize_as_tagged_objects() -> TestResult {
        let tier: DiscountTier = serde_json::from_str(r#"{"type":"cash","value":50}"#)?;

        assert_eq!(tier, DiscountTier::Cash(dec!(50)));

        Ok(())
    }
}
