//! Usage Records

use jiff::Timestamp;
use rust_decimal::Decimal;
use souq::currency::Currency;

use crate::{
    domain::{offers::records::OfferUuid, welcome_coupons::records::WelcomeCouponUuid},
    uuids::TypedUuid,
};

/// Offer Usage UUID
pub type OfferUsageUuid = TypedUuid<OfferUsageRecord>;

/// Offer Redemption UUID
pub type OfferRedemptionUuid = TypedUuid<OfferRedemptionRecord>;

/// Welcome Coupon Usage UUID
pub type WelcomeCouponUsageUuid = TypedUuid<WelcomeCouponUsageRecord>;

/// Redemption counter for one customer on one offer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OfferUsageRecord {
    pub uuid: OfferUsageUuid,
    pub offer_uuid: OfferUuid,
    pub user_identifier: String,
    pub usage_count: u32,
    pub first_used_at: Timestamp,
    pub last_used_at: Timestamp,
}

/// One logged offer redemption.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OfferRedemptionRecord {
    pub uuid: OfferRedemptionUuid,
    pub offer_usage_uuid: OfferUsageUuid,
    pub user_id: String,
    pub order_total: Decimal,
    pub discount_amount: Decimal,
    pub currency: Currency,
    pub redeemed_at: Timestamp,
}

/// Where a customer stands with a welcome coupon.
///
/// A missing row is the third state: the coupon was never assigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WelcomeUsageState {
    Assigned,
    Redeemed,
}

/// Assignment of a welcome coupon to a customer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WelcomeCouponUsageRecord {
    pub uuid: WelcomeCouponUsageUuid,
    pub user_id: String,
    pub welcome_coupon_uuid: WelcomeCouponUuid,
    pub assigned_at: Timestamp,
    pub redeemed_at: Option<Timestamp>,
}

impl WelcomeCouponUsageRecord {
    #[must_use]
    pub const fn state(&self) -> WelcomeUsageState {
        if self.redeemed_at.is_some() {
            WelcomeUsageState::Redeemed
        } else {
            WelcomeUsageState::Assigned
        }
    }

    #[must_use]
    pub const fn is_redeemed(&self) -> bool {
        matches!(self.state(), WelcomeUsageState::Redeemed)
    }
}
