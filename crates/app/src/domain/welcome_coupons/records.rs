//! Welcome Coupon Records

use jiff::Timestamp;
use souq::welcome::WelcomeCoupon;

use crate::uuids::TypedUuid;

/// Welcome Coupon UUID
pub type WelcomeCouponUuid = TypedUuid<WelcomeCouponRecord>;

/// Stored welcome coupon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WelcomeCouponRecord {
    pub coupon: WelcomeCoupon,
    pub updated_at: Timestamp,
}

impl WelcomeCouponRecord {
    #[must_use]
    pub fn uuid(&self) -> WelcomeCouponUuid {
        WelcomeCouponUuid::from_uuid(self.coupon.uuid)
    }
}
