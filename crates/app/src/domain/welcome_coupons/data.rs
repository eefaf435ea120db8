//! Welcome Coupons Data

use souq::welcome::WelcomeCouponTerms;

use crate::domain::welcome_coupons::records::WelcomeCouponUuid;

/// New Welcome Coupon Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewWelcomeCoupon {
    pub uuid: WelcomeCouponUuid,
    pub terms: WelcomeCouponTerms,
}

/// Welcome Coupon Update Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WelcomeCouponUpdate {
    pub terms: WelcomeCouponTerms,
}
