//! Discount Calculator

use decimal_percentage::Percentage;
use rust_decimal::Decimal;
use rusty_money::{Money, MoneyError, iso::Currency};
use thiserror::Error;

use crate::{
    currency::round_amount,
    tiers::DiscountTier,
    welcome::WelcomeDiscount,
};

/// Errors specific to discount calculations.
#[derive(Debug, Error)]
pub enum DiscountError {
    /// The order total is below zero.
    #[error("order total cannot be negative")]
    NegativeTotal,

    /// A rule value below zero.
    #[error("discount value cannot be negative, got {0}")]
    NegativeValue(Decimal),

    /// Percentage calculation overflowed.
    #[error("percentage calculation overflowed")]
    PercentOverflow,

    /// Wrapped money arithmetic error.
    #[error(transparent)]
    Money(#[from] MoneyError),
}

/// How a discount amount is derived from the order total.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DiscountRule {
    /// Fraction of the total, optionally capped.
    Percentage {
        /// Fraction of the total taken off (`0.2` for 20%).
        percent: Percentage,
        /// Upper bound on the discount amount.
        cap: Option<Decimal>,
    },

    /// Fixed amount, clamped to the total.
    Fixed {
        /// Amount taken off.
        amount: Decimal,
    },
}

impl DiscountRule {
    /// Rule for an offer tier.
    ///
    /// `cap` is the offer's `maximum_order_value` for the cart's currency. It
    /// only bounds percentage tiers.
    #[must_use]
    pub fn for_tier(tier: &DiscountTier, cap: Option<Decimal>) -> Self {
        match *tier {
            DiscountTier::Percentage(points) => Self::Percentage {
                percent: fraction_from_points(points),
                cap,
            },
            DiscountTier::Cash(amount) => Self::Fixed { amount },
        }
    }

    /// Rule for a welcome coupon, capped by its `maximum_discount`.
    #[must_use]
    pub fn for_welcome(discount: &WelcomeDiscount) -> Self {
        match *discount {
            WelcomeDiscount::Flat { amount } => Self::Fixed { amount },
            WelcomeDiscount::Percent {
                percent,
                maximum_discount,
            } => Self::Percentage {
                percent: fraction_from_points(percent),
                cap: Some(maximum_discount),
            },
        }
    }
}

/// Percent points (`20` for 20%) as a fractional [`Percentage`].
#[must_use]
pub fn fraction_from_points(points: Decimal) -> Percentage {
    Percentage::from(points / Decimal::ONE_HUNDRED)
}

/// A fractional [`Percentage`] back as percent points.
#[must_use]
pub fn points_from_fraction(percent: Percentage) -> Decimal {
    (percent * Decimal::ONE) * Decimal::ONE_HUNDRED
}

/// Calculate the discount amount for an order total.
///
/// The result is rounded to two decimal places and always lies in
/// `[0, order_total]`.
///
/// # Errors
///
/// - [`DiscountError::NegativeTotal`]: `order_total` is below zero.
/// - [`DiscountError::NegativeValue`]: the rule carries a negative value or cap.
/// - [`DiscountError::PercentOverflow`]: the percentage product overflowed.
pub fn calculate_discount<'a>(
    rule: &DiscountRule,
    order_total: &Money<'a, Currency>,
) -> Result<Money<'a, Currency>, DiscountError> {
    let total = *order_total.amount();

    if total < Decimal::ZERO {
        return Err(DiscountError::NegativeTotal);
    }

    let amount = match *rule {
        DiscountRule::Percentage { percent, cap } => {
            ensure_not_negative(points_from_fraction(percent))?;

            let raw = percent_of(total, percent)?;

            match cap {
                Some(cap) => {
                    ensure_not_negative(cap)?;
                    raw.min(cap)
                }
                None => raw,
            }
        }
        DiscountRule::Fixed { amount } => {
            ensure_not_negative(amount)?;
            amount
        }
    };

    Ok(Money::from_decimal(
        round_amount(amount.min(total)),
        order_total.currency(),
    ))
}

fn ensure_not_negative(value: Decimal) -> Result<(), DiscountError> {
    if value < Decimal::ZERO {
        Err(DiscountError::NegativeValue(value))
    } else {
        Ok(())
    }
}

fn percent_of(total: Decimal, percent: Percentage) -> Result<Decimal, DiscountError> {
    total
        .checked_mul(percent * Decimal::ONE)
        .ok_or(DiscountError::PercentOverflow)
}
