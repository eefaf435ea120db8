//! Welcome Coupons Repository

use jiff::Timestamp;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use souq::{
    currency::PerCurrency,
    welcome::{WelcomeCoupon, WelcomeCouponTerms, WelcomeDiscount},
};
use sqlx::{
    FromRow, Postgres, Row, Transaction,
    postgres::{PgArguments, PgRow},
    query, query_as,
    query::QueryAs,
};

use crate::domain::{
    columns::{decode_error, optional_timestamp_column, parse_column, timestamp_column},
    welcome_coupons::records::{WelcomeCouponRecord, WelcomeCouponUuid},
};

const LIST_WELCOME_COUPONS_SQL: &str = include_str!("sql/list_welcome_coupons.sql");
const GET_WELCOME_COUPON_SQL: &str = include_str!("sql/get_welcome_coupon.sql");
const FIND_ACTIVE_WELCOME_COUPON_SQL: &str = include_str!("sql/find_active_welcome_coupon.sql");
const CREATE_WELCOME_COUPON_SQL: &str = include_str!("sql/create_welcome_coupon.sql");
const UPDATE_WELCOME_COUPON_SQL: &str = include_str!("sql/update_welcome_coupon.sql");
const DELETE_WELCOME_COUPON_SQL: &str = include_str!("sql/delete_welcome_coupon.sql");
const ASSIGN_WELCOME_COUPON_SQL: &str = include_str!("sql/assign_welcome_coupon.sql");
const ASSIGN_ACTIVE_WELCOME_COUPONS_SQL: &str =
    include_str!("sql/assign_active_welcome_coupons.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgWelcomeCouponsRepository;

impl PgWelcomeCouponsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_welcome_coupons(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<WelcomeCouponRecord>, sqlx::Error> {
        query_as::<Postgres, WelcomeCouponRecord>(LIST_WELCOME_COUPONS_SQL)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn get_welcome_coupon(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        coupon: WelcomeCouponUuid,
    ) -> Result<WelcomeCouponRecord, sqlx::Error> {
        query_as::<Postgres, WelcomeCouponRecord>(GET_WELCOME_COUPON_SQL)
            .bind(coupon.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    /// Active coupon with this code, compared case-insensitively.
    pub(crate) async fn find_active_welcome_coupon(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        code: &str,
    ) -> Result<Option<WelcomeCouponRecord>, sqlx::Error> {
        query_as::<Postgres, WelcomeCouponRecord>(FIND_ACTIVE_WELCOME_COUPON_SQL)
            .bind(code)
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn create_welcome_coupon(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        coupon: WelcomeCouponUuid,
        terms: &WelcomeCouponTerms,
    ) -> Result<WelcomeCouponRecord, sqlx::Error> {
        bind_terms(query_as(CREATE_WELCOME_COUPON_SQL), coupon, terms)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn update_welcome_coupon(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        coupon: WelcomeCouponUuid,
        terms: &WelcomeCouponTerms,
    ) -> Result<WelcomeCouponRecord, sqlx::Error> {
        bind_terms(query_as(UPDATE_WELCOME_COUPON_SQL), coupon, terms)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn delete_welcome_coupon(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        coupon: WelcomeCouponUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_WELCOME_COUPON_SQL)
            .bind(coupon.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    /// Assign a coupon to every known user. Returns the number of new rows.
    pub(crate) async fn assign_to_all_users(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        coupon: WelcomeCouponUuid,
        assigned_at: Timestamp,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(ASSIGN_WELCOME_COUPON_SQL)
            .bind(coupon.into_uuid())
            .bind(SqlxTimestamp::from(assigned_at))
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    /// Assign every active coupon to every user missing a row for it.
    pub(crate) async fn assign_active_to_all_users(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        assigned_at: Timestamp,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(ASSIGN_ACTIVE_WELCOME_COUPONS_SQL)
            .bind(SqlxTimestamp::from(assigned_at))
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

/// Bind `$1..$13` shared by the create and update statements.
fn bind_terms<'q>(
    statement: QueryAs<'q, Postgres, WelcomeCouponRecord, PgArguments>,
    coupon: WelcomeCouponUuid,
    terms: &WelcomeCouponTerms,
) -> QueryAs<'q, Postgres, WelcomeCouponRecord, PgArguments> {
    statement
        .bind(coupon.into_uuid())
        .bind(terms.code.clone())
        .bind(terms.title.trim().to_string())
        .bind(terms.description.clone())
        .bind(terms.discount.type_as_str())
        .bind(terms.discount.value())
        .bind(terms.discount.maximum_discount())
        .bind(terms.minimum_purchase.aed)
        .bind(terms.minimum_purchase.inr)
        .bind(terms.audience.as_str())
        .bind(terms.valid_from.map(SqlxTimestamp::from))
        .bind(terms.valid_to.map(SqlxTimestamp::from))
        .bind(terms.is_active)
}

impl<'r> FromRow<'r, PgRow> for WelcomeCouponRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let discount_type: String = row.try_get("discount_type")?;

        let discount = WelcomeDiscount::from_parts(
            &discount_type,
            row.try_get("discount_value")?,
            row.try_get("maximum_discount")?,
        )
        .map_err(|error| decode_error("maximum_discount", error))?;

        Ok(Self {
            coupon: WelcomeCoupon {
                uuid: row.try_get("uuid")?,
                terms: WelcomeCouponTerms {
                    code: row.try_get("code")?,
                    title: row.try_get("title")?,
                    description: row.try_get("description")?,
                    discount,
                    minimum_purchase: PerCurrency::new(
                        row.try_get("minimum_purchase_aed")?,
                        row.try_get("minimum_purchase_inr")?,
                    ),
                    audience: parse_column(row, "user_type_restriction")?,
                    valid_from: optional_timestamp_column(row, "valid_from")?,
                    valid_to: optional_timestamp_column(row, "valid_to")?,
                    is_active: row.try_get("is_active")?,
                },
                created_at: timestamp_column(row, "created_at")?,
            },
            updated_at: timestamp_column(row, "updated_at")?,
        })
    }
}
