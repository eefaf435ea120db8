//! Welcome Coupons
//!
//! Named codes that each user can redeem once. Every welcome code starts with
//! [`WELCOME_PREFIX`], which is how the matcher tells them apart from
//! generated offer codes.

use std::{
    fmt::{self, Display, Formatter},
    str::FromStr,
};

use jiff::Timestamp;
use rust_decimal::Decimal;
use thiserror::Error;
use uuid::Uuid;

use crate::{cart::UserType, currency::PerCurrency};

/// Prefix shared by every welcome coupon code.
pub const WELCOME_PREFIX: &str = "WELCOME";

/// Welcome coupon validation errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WelcomeCouponError {
    /// The code lacks the welcome prefix.
    #[error("coupon code must start with {WELCOME_PREFIX}")]
    InvalidCodePrefix,

    /// The code holds characters other than letters and digits.
    #[error("coupon code may only contain letters and digits")]
    InvalidCodeCharacters,

    /// The title is blank.
    #[error("coupon title cannot be empty")]
    MissingTitle,

    /// A percent discount outside 1 to 100.
    #[error("percent discount must be between 1 and 100, got {0}")]
    PercentOutOfRange(Decimal),

    /// A percent discount without a positive cap.
    #[error("percent discounts require a positive maximum discount")]
    MissingMaximumDiscount,

    /// A flat discount of zero or less.
    #[error("flat discount must be greater than zero, got {0}")]
    FlatNotPositive(Decimal),

    /// A minimum purchase below zero.
    #[error("minimum purchase cannot be negative")]
    NegativeMinimumPurchase,

    /// `valid_to` precedes `valid_from`.
    #[error("valid_to is before valid_from")]
    InvalidValidityWindow,
}

/// Who a welcome coupon is offered to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Audience {
    /// Every signed-in customer.
    #[default]
    All,
    /// Only customers in this segment.
    Only(UserType),
}

impl Audience {
    /// Whether a cart with this user type may use the coupon.
    #[must_use]
    pub fn admits(&self, user_type: Option<UserType>) -> bool {
        match self {
            Self::All => true,
            Self::Only(required) => user_type == Some(*required),
        }
    }

    /// `all` or the segment name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Only(user_type) => user_type.as_str(),
        }
    }
}

impl Display for Audience {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Audience {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "all" => Ok(Self::All),
            other => other.parse().map(Self::Only),
        }
    }
}

/// Welcome coupon discount rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WelcomeDiscount {
    /// Fixed amount in the cart's currency.
    Flat {
        /// Amount taken off.
        amount: Decimal,
    },

    /// Percentage of the order total, always bounded by `maximum_discount`.
    Percent {
        /// Percent points, 1 to 100.
        percent: Decimal,
        /// Upper bound on the discount amount.
        maximum_discount: Decimal,
    },
}

impl WelcomeDiscount {
    /// Lowercase discount type name.
    #[must_use]
    pub const fn type_as_str(&self) -> &'static str {
        match self {
            Self::Flat { .. } => "flat",
            Self::Percent { .. } => "percent",
        }
    }

    /// Flat amount or percent points.
    #[must_use]
    pub const fn value(&self) -> Decimal {
        match self {
            Self::Flat { amount } => *amount,
            Self::Percent { percent, .. } => *percent,
        }
    }

    /// Cap on percent discounts, `None` for flat ones.
    #[must_use]
    pub const fn maximum_discount(&self) -> Option<Decimal> {
        match self {
            Self::Flat { .. } => None,
            Self::Percent {
                maximum_discount, ..
            } => Some(*maximum_discount),
        }
    }

    /// Build from the stored type/value/maximum columns.
    ///
    /// # Errors
    ///
    /// Returns [`WelcomeCouponError::MissingMaximumDiscount`] for a percent
    /// discount without a maximum. Any type other than `percent` is flat.
    pub fn from_parts(
        discount_type: &str,
        value: Decimal,
        maximum_discount: Option<Decimal>,
    ) -> Result<Self, WelcomeCouponError> {
        match (discount_type, maximum_discount) {
            ("percent", Some(maximum_discount)) => Ok(Self::Percent {
                percent: value,
                maximum_discount,
            }),
            ("percent", None) => Err(WelcomeCouponError::MissingMaximumDiscount),
            _ => Ok(Self::Flat { amount: value }),
        }
    }

    fn validate(&self) -> Result<(), WelcomeCouponError> {
        match *self {
            Self::Flat { amount } if amount <= Decimal::ZERO => {
                Err(WelcomeCouponError::FlatNotPositive(amount))
            }
            Self::Percent { percent, .. }
                if percent < Decimal::ONE || percent > Decimal::ONE_HUNDRED =>
            {
                Err(WelcomeCouponError::PercentOutOfRange(percent))
            }
            Self::Percent {
                maximum_discount, ..
            } if maximum_discount <= Decimal::ZERO => {
                Err(WelcomeCouponError::MissingMaximumDiscount)
            }
            Self::Flat { .. } | Self::Percent { .. } => Ok(()),
        }
    }
}

/// Admin-editable part of a welcome coupon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WelcomeCouponTerms {
    /// Uppercase code starting with `WELCOME`.
    pub code: String,
    /// Admin-facing title.
    pub title: String,
    /// Optional shopper-facing description.
    pub description: Option<String>,
    /// Discount rule.
    pub discount: WelcomeDiscount,
    /// Smallest order total accepted, per currency.
    pub minimum_purchase: PerCurrency<Decimal>,
    /// Customers the coupon is offered to.
    pub audience: Audience,
    /// Start of the validity window.
    pub valid_from: Option<Timestamp>,
    /// End of the validity window.
    pub valid_to: Option<Timestamp>,
    /// Admin on/off switch.
    pub is_active: bool,
}

impl WelcomeCouponTerms {
    /// Normalise the code to the stored form (trimmed, uppercase).
    #[must_use]
    pub fn normalized(mut self) -> Self {
        self.code = self.code.trim().to_uppercase();
        self
    }

    /// Check the coupon invariants against the normalised code.
    ///
    /// # Errors
    ///
    /// Returns the first violated invariant.
    pub fn validate(&self) -> Result<(), WelcomeCouponError> {
        let code = self.code.trim().to_uppercase();

        if !code.starts_with(WELCOME_PREFIX) {
            return Err(WelcomeCouponError::InvalidCodePrefix);
        }

        if !code.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(WelcomeCouponError::InvalidCodeCharacters);
        }

        if self.title.trim().is_empty() {
            return Err(WelcomeCouponError::MissingTitle);
        }

        self.discount.validate()?;

        if self.minimum_purchase.aed < Decimal::ZERO || self.minimum_purchase.inr < Decimal::ZERO {
            return Err(WelcomeCouponError::NegativeMinimumPurchase);
        }

        if let (Some(from), Some(to)) = (self.valid_from, self.valid_to)
            && to < from
        {
            return Err(WelcomeCouponError::InvalidValidityWindow);
        }

        Ok(())
    }
}

/// Persisted welcome coupon snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WelcomeCoupon {
    /// Coupon id.
    pub uuid: Uuid,
    /// Editable terms.
    pub terms: WelcomeCouponTerms,
    /// Creation time.
    pub created_at: Timestamp,
}
