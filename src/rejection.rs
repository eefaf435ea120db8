//! Rejections
//!
//! Business-rule failures. These are returned to the shopper verbatim and are
//! never treated as errors by the calling service.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::{cart::UserType, currency::Currency};

/// Failure category reported alongside the user-facing message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RejectionKind {
    /// The code or record does not exist.
    NotFound,
    /// The validity window has closed.
    Expired,
    /// The validity window has not opened.
    NotYetValid,
    /// The customer already used the code.
    AlreadyRedeemed,
    /// A usage limit is exhausted.
    LimitExceeded,
    /// The order total is outside the allowed range.
    ThresholdNotMet,
    /// The cart's shop, segment or categories do not qualify.
    ScopeMismatch,
    /// The customer must be signed in.
    Unauthenticated,
    /// The request itself is unusable.
    MalformedInput,
    /// The feature is switched off.
    Disabled,
}

impl RejectionKind {
    /// Stable snake_case name used in logs and metrics.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::NotFound => "not_found",
            Self::Expired => "expired",
            Self::NotYetValid => "not_yet_valid",
            Self::AlreadyRedeemed => "already_redeemed",
            Self::LimitExceeded => "limit_exceeded",
            Self::ThresholdNotMet => "threshold_not_met",
            Self::ScopeMismatch => "scope_mismatch",
            Self::Unauthenticated => "unauthenticated",
            Self::MalformedInput => "malformed_input",
            Self::Disabled => "disabled",
        }
    }
}

/// Why a code was not accepted, or a redemption not recorded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    /// No code was submitted.
    #[error("Please enter a coupon code")]
    MissingCode,

    /// No active welcome coupon has this code.
    #[error("Invalid welcome coupon code")]
    UnknownWelcomeCoupon,

    /// No live offer tier matches this code.
    #[error("Invalid offer code")]
    UnknownOfferCode,

    /// The offer being redeemed does not exist.
    #[error("Offer not found")]
    OfferNotFound,

    /// The welcome coupon being redeemed does not exist.
    #[error("Welcome coupon not found")]
    WelcomeCouponNotFound,

    /// Welcome coupons need a signed-in customer.
    #[error("Please login to use welcome coupons")]
    LoginRequired,

    /// Per-user limits need a user id or email.
    #[error("Please login to use this offer")]
    IdentityRequired,

    /// The customer has already used this welcome coupon.
    #[error("You have already used this welcome coupon")]
    WelcomeCouponAlreadyUsed,

    /// A redemption for this customer and coupon is already recorded.
    #[error("Welcome coupon already redeemed")]
    WelcomeCouponAlreadyRedeemed,

    /// Before the coupon's `valid_from`.
    #[error("This coupon is not yet valid")]
    NotYetValid,

    /// After the coupon's `valid_to`.
    #[error("This coupon has expired")]
    Expired,

    /// The offer is inactive or outside its date window.
    #[error("This offer is not available right now")]
    OfferNotLive,

    /// The coupon or offer is limited to another customer segment.
    #[error("This coupon is only available for {0} customers")]
    UserTypeMismatch(UserType),

    /// The offer is limited to another shop.
    #[error("This offer is not valid for this shop")]
    ShopMismatch,

    /// The cart holds an excluded category.
    #[error("This offer is not valid for some items in your cart")]
    CategoryExcluded,

    /// The cart holds none of the allowed categories.
    #[error("This offer does not apply to the items in your cart")]
    CategoryNotAllowed,

    /// The order total is below the minimum for its currency.
    #[error("Minimum order value of {currency} {required} required")]
    MinimumNotMet {
        /// Minimum order value for the cart's currency.
        required: Decimal,
        /// Cart currency.
        currency: Currency,
    },

    /// The order total is above the maximum for its currency.
    #[error("Maximum order value of {currency} {limit} exceeded")]
    MaximumExceeded {
        /// Maximum order value for the cart's currency.
        limit: Decimal,
        /// Cart currency.
        currency: Currency,
    },

    /// The customer has used the offer as often as allowed.
    #[error("You have reached the usage limit for this offer")]
    PerUserLimitReached,

    /// The offer has reached its total usage limit.
    #[error("This offer has reached its usage limit")]
    TotalLimitReached,

    /// Welcome coupons are switched off in settings.
    #[error("Welcome coupons are currently unavailable")]
    WelcomeCouponsDisabled,

    /// Offers are switched off in settings.
    #[error("Offers are currently unavailable")]
    OffersDisabled,
}

impl Rejection {
    /// Category this rejection is reported under.
    #[must_use]
    pub const fn kind(&self) -> RejectionKind {
        match self {
            Self::MissingCode => RejectionKind::MalformedInput,
            Self::UnknownWelcomeCoupon
            | Self::UnknownOfferCode
            | Self::OfferNotFound
            | Self::WelcomeCouponNotFound => RejectionKind::NotFound,
            Self::LoginRequired | Self::IdentityRequired => RejectionKind::Unauthenticated,
            Self::WelcomeCouponAlreadyUsed
            | Self::WelcomeCouponAlreadyRedeemed
            | Self::PerUserLimitReached => RejectionKind::AlreadyRedeemed,
            Self::NotYetValid => RejectionKind::NotYetValid,
            Self::Expired | Self::OfferNotLive => RejectionKind::Expired,
            Self::UserTypeMismatch(_)
            | Self::ShopMismatch
            | Self::CategoryExcluded
            | Self::CategoryNotAllowed => RejectionKind::ScopeMismatch,
            Self::MinimumNotMet { .. } | Self::MaximumExceeded { .. } => {
                RejectionKind::ThresholdNotMet
            }
            Self::TotalLimitReached => RejectionKind::LimitExceeded,
            Self::WelcomeCouponsDisabled | Self::OffersDisabled => RejectionKind::Disabled,
        }
    }

    /// Amount the shopper has to reach, echoed back for minimum-order failures.
    #[must_use]
    pub const fn required_amount(&self) -> Option<Decimal> {
        match self {
            Self::MinimumNotMet { required, .. } => Some(*required),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::dec;

    use super::*;

    #[test]
    fn minimum_not_met_echoes_required_amount() {
        let rejection = Rejection::MinimumNotMet {
            required: dec!(200),
            currency: Currency::Aed,
        };

        assert_eq!(rejection.kind(), RejectionKind::ThresholdNotMet);
        assert_eq!(rejection.required_amount(), Some(dec!(200)));
        assert_eq!(
            rejection.to_string(),
            "Minimum order value of AED 200 required"
        );
    }

    #[test]
    fn user_type_mismatch_names_segment() {
        let rejection = Rejection::UserTypeMismatch(UserType::Returning);

        assert_eq!(rejection.kind(), RejectionKind::ScopeMismatch);
        assert_eq!(
            rejection.to_string(),
            "This coupon is only available for returning customers"
        );
        assert_eq!(rejection.required_amount(), None);
    }
}
