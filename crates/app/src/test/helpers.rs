//! Test Helpers

use jiff::civil::date;
use rust_decimal::dec;
use souq::{
    currency::PerCurrency,
    offers::{OfferRestrictions, OfferTerms},
    tiers::DiscountTier,
    welcome::{Audience, WelcomeCouponTerms, WelcomeDiscount},
};
use sqlx::{query, query_scalar};

use crate::{domain::welcome_coupons::records::WelcomeCouponUuid, test::TestContext};

/// Active, unrestricted offer running through 2026.
pub(crate) fn offer_terms(tiers: &[DiscountTier]) -> OfferTerms {
    OfferTerms {
        title: "Summer sale".to_string(),
        start_date: date(2026, 1, 1),
        end_date: date(2026, 12, 31),
        tiers: tiers.iter().copied().collect(),
        is_active: true,
        priority: 0,
        restrictions: OfferRestrictions::default(),
    }
}

/// Active flat-discount coupon open to everyone.
pub(crate) fn welcome_terms(code: &str) -> WelcomeCouponTerms {
    WelcomeCouponTerms {
        code: code.to_string(),
        title: "Welcome".to_string(),
        description: None,
        discount: WelcomeDiscount::Flat { amount: dec!(25) },
        minimum_purchase: PerCurrency::new(dec!(0), dec!(0)),
        audience: Audience::All,
        valid_from: None,
        valid_to: None,
        is_active: true,
    }
}

pub(crate) async fn create_user(
    ctx: &TestContext,
    id: &str,
    email: Option<&str>,
) -> Result<(), sqlx::Error> {
    query("INSERT INTO users (id, email) VALUES ($1, $2)")
        .bind(id)
        .bind(email)
        .execute(ctx.db.pool())
        .await?;

    Ok(())
}

pub(crate) async fn count_welcome_assignments(
    ctx: &TestContext,
    coupon: WelcomeCouponUuid,
) -> Result<i64, sqlx::Error> {
    query_scalar("SELECT COUNT(*) FROM welcome_coupon_usages WHERE welcome_coupon_uuid = $1")
        .bind(coupon.into_uuid())
        .fetch_one(ctx.db.pool())
        .await
}
