//! Checkout Data

use jiff::Timestamp;
use rust_decimal::Decimal;
use souq::{
    cart::CartContext, currency::Currency, rejection::Rejection, tiers::DiscountTier,
    validation::Quote,
};
use uuid::Uuid;

use crate::domain::{
    offers::records::{OfferRecord, OfferUuid},
    welcome_coupons::records::{WelcomeCouponRecord, WelcomeCouponUuid},
};

/// A code submitted for a cart.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidateCodeRequest {
    pub code: String,
    pub cart: CartContext,
    pub at: Timestamp,
}

/// What an accepted code matched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchedCode {
    Welcome(WelcomeCouponRecord),
    Offer {
        offer: OfferRecord,
        tier: DiscountTier,
    },
}

impl MatchedCode {
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Welcome(_) => "welcome",
            Self::Offer { .. } => "offer",
        }
    }
}

/// Outcome of validating a code.
#[derive(Debug, Clone, PartialEq)]
pub enum CodeValidation {
    Accepted { matched: MatchedCode, quote: Quote },
    Rejected(Rejection),
}

/// What a redemption is recorded against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedemptionTarget {
    Offer(OfferUuid),
    WelcomeCoupon(WelcomeCouponUuid),
}

impl RedemptionTarget {
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Offer(_) => "offer",
            Self::WelcomeCoupon(_) => "welcome",
        }
    }
}

/// A completed order consuming a discount.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordUsageRequest {
    pub target: RedemptionTarget,
    pub user_id: String,
    pub user_email: Option<String>,
    pub order_total: Decimal,
    pub discount_amount: Decimal,
    pub currency: Currency,
    pub at: Timestamp,
}

/// Outcome of recording a redemption.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RedemptionOutcome {
    Recorded { record_uuid: Uuid, redeemed_at: Timestamp },
    Rejected(Rejection),
}
