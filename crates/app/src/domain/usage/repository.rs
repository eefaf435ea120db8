//! Usage Repository

use jiff::Timestamp;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use rust_decimal::Decimal;
use souq::{currency::Currency, restrictions::OfferUsageSnapshot};
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};

use crate::domain::{
    columns::{
        count_column, optional_timestamp_column, parse_column, timestamp_column,
        try_optional_i32_from_u32,
    },
    offers::records::OfferUuid,
    usage::records::{
        OfferRedemptionRecord, OfferRedemptionUuid, OfferUsageRecord, OfferUsageUuid,
        WelcomeCouponUsageRecord, WelcomeCouponUsageUuid,
    },
    welcome_coupons::records::WelcomeCouponUuid,
};

const OFFER_USAGE_SNAPSHOT_SQL: &str = include_str!("sql/offer_usage_snapshot.sql");
const LIST_OFFER_USAGES_SQL: &str = include_str!("sql/list_offer_usages.sql");
const INCREMENT_OFFER_USAGE_SQL: &str = include_str!("sql/increment_offer_usage.sql");
const CREATE_OFFER_REDEMPTION_SQL: &str = include_str!("sql/create_offer_redemption.sql");
const GET_WELCOME_COUPON_USAGE_SQL: &str = include_str!("sql/get_welcome_coupon_usage.sql");
const REDEEM_WELCOME_COUPON_SQL: &str = include_str!("sql/redeem_welcome_coupon.sql");

/// Amounts attached to a redemption.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RedemptionAmounts {
    pub order_total: Decimal,
    pub discount_amount: Decimal,
    pub currency: Currency,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct PgUsageRepository;

impl PgUsageRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Counters for `offer`; `user_count` is zero when `identifier` is unknown.
    pub(crate) async fn offer_usage_snapshot(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        offer: OfferUuid,
        identifier: Option<&str>,
    ) -> Result<OfferUsageSnapshot, sqlx::Error> {
        let row = sqlx::query(OFFER_USAGE_SNAPSHOT_SQL)
            .bind(offer.into_uuid())
            .bind(identifier)
            .fetch_one(&mut **tx)
            .await?;

        Ok(OfferUsageSnapshot {
            user_count: count_column(&row, "user_count")?,
            total_count: count_column(&row, "total_count")?,
        })
    }

    pub(crate) async fn list_offer_usages(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        offer: OfferUuid,
    ) -> Result<Vec<OfferUsageRecord>, sqlx::Error> {
        query_as::<Postgres, OfferUsageRecord>(LIST_OFFER_USAGES_SQL)
            .bind(offer.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    /// Count one more use, unless the per-user limit is already reached.
    ///
    /// Returns `None` when the limit blocked the increment.
    pub(crate) async fn increment_offer_usage(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        offer: OfferUuid,
        identifier: &str,
        per_user_limit: Option<u32>,
        used_at: Timestamp,
    ) -> Result<Option<OfferUsageRecord>, sqlx::Error> {
        query_as::<Postgres, OfferUsageRecord>(INCREMENT_OFFER_USAGE_SQL)
            .bind(OfferUsageUuid::new().into_uuid())
            .bind(offer.into_uuid())
            .bind(identifier)
            .bind(SqlxTimestamp::from(used_at))
            .bind(try_optional_i32_from_u32(
                per_user_limit,
                "usage_limit_per_user",
            )?)
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn create_offer_redemption(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        usage: OfferUsageUuid,
        user_id: &str,
        amounts: RedemptionAmounts,
        redeemed_at: Timestamp,
    ) -> Result<OfferRedemptionRecord, sqlx::Error> {
        query_as::<Postgres, OfferRedemptionRecord>(CREATE_OFFER_REDEMPTION_SQL)
            .bind(OfferRedemptionUuid::new().into_uuid())
            .bind(usage.into_uuid())
            .bind(user_id)
            .bind(amounts.order_total)
            .bind(amounts.discount_amount)
            .bind(amounts.currency.code())
            .bind(SqlxTimestamp::from(redeemed_at))
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_welcome_coupon_usage(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user_id: &str,
        coupon: WelcomeCouponUuid,
    ) -> Result<Option<WelcomeCouponUsageRecord>, sqlx::Error> {
        query_as::<Postgres, WelcomeCouponUsageRecord>(GET_WELCOME_COUPON_USAGE_SQL)
            .bind(user_id)
            .bind(coupon.into_uuid())
            .fetch_optional(&mut **tx)
            .await
    }

    /// Flip the usage row to redeemed, inserting it when it was never assigned.
    ///
    /// Returns `None` when the row was already redeemed.
    pub(crate) async fn redeem_welcome_coupon(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user_id: &str,
        coupon: WelcomeCouponUuid,
        amounts: RedemptionAmounts,
        redeemed_at: Timestamp,
    ) -> Result<Option<WelcomeCouponUsageRecord>, sqlx::Error> {
        query_as::<Postgres, WelcomeCouponUsageRecord>(REDEEM_WELCOME_COUPON_SQL)
            .bind(WelcomeCouponUsageUuid::new().into_uuid())
            .bind(user_id)
            .bind(coupon.into_uuid())
            .bind(SqlxTimestamp::from(redeemed_at))
            .bind(amounts.order_total)
            .bind(amounts.discount_amount)
            .bind(amounts.currency.code())
            .fetch_optional(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for OfferUsageRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: OfferUsageUuid::from_uuid(row.try_get("uuid")?),
            offer_uuid: OfferUuid::from_uuid(row.try_get("offer_uuid")?),
            user_identifier: row.try_get("user_identifier")?,
            usage_count: count_column(row, "usage_count")?,
            first_used_at: timestamp_column(row, "first_used_at")?,
            last_used_at: timestamp_column(row, "last_used_at")?,
        })
    }
}

impl<'r> FromRow<'r, PgRow> for OfferRedemptionRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: OfferRedemptionUuid::from_uuid(row.try_get("uuid")?),
            offer_usage_uuid: OfferUsageUuid::from_uuid(row.try_get("offer_usage_uuid")?),
            user_id: row.try_get("user_id")?,
            order_total: row.try_get("order_total")?,
            discount_amount: row.try_get("discount_amount")?,
            currency: parse_column(row, "currency")?,
            redeemed_at: timestamp_column(row, "redeemed_at")?,
        })
    }
}

impl<'r> FromRow<'r, PgRow> for WelcomeCouponUsageRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: WelcomeCouponUsageUuid::from_uuid(row.try_get("uuid")?),
            user_id: row.try_get("user_id")?,
            welcome_coupon_uuid: WelcomeCouponUuid::from_uuid(
                row.try_get("welcome_coupon_uuid")?,
            ),
            assigned_at: timestamp_column(row, "assigned_at")?,
            redeemed_at: optional_timestamp_column(row, "redeemed_at")?,
        })
    }
}
