//! Offers Repository

use jiff::civil::Date;
use jiff_sqlx::Date as SqlxDate;
use rust_decimal::Decimal;
use rustc_hash::FxHashSet;
use souq::{
    currency::PerCurrency,
    offers::{OfferRestrictions, OfferTerms, PromotionalOffer, Tiers},
};
use sqlx::{
    FromRow, Postgres, Row, Transaction,
    postgres::{PgArguments, PgRow},
    query, query_as,
    query::QueryAs,
    types::Json,
};

use crate::domain::{
    columns::{
        optional_count_column, parse_optional_column, timestamp_column, try_optional_i32_from_u32,
    },
    offers::records::{OfferRecord, OfferUuid},
};

const LIST_OFFERS_SQL: &str = include_str!("sql/list_offers.sql");
const LIST_LIVE_OFFERS_SQL: &str = include_str!("sql/list_live_offers.sql");
const GET_OFFER_SQL: &str = include_str!("sql/get_offer.sql");
const LOCK_OFFER_SQL: &str = include_str!("sql/lock_offer.sql");
const CREATE_OFFER_SQL: &str = include_str!("sql/create_offer.sql");
const UPDATE_OFFER_SQL: &str = include_str!("sql/update_offer.sql");
const DELETE_OFFER_SQL: &str = include_str!("sql/delete_offer.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgOffersRepository;

impl PgOffersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_offers(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<OfferRecord>, sqlx::Error> {
        query_as::<Postgres, OfferRecord>(LIST_OFFERS_SQL)
            .fetch_all(&mut **tx)
            .await
    }

    /// Active offers whose inclusive date window contains `on`, unranked.
    pub(crate) async fn list_live_offers(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        on: Date,
    ) -> Result<Vec<OfferRecord>, sqlx::Error> {
        query_as::<Postgres, OfferRecord>(LIST_LIVE_OFFERS_SQL)
            .bind(SqlxDate::from(on))
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn get_offer(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        offer: OfferUuid,
    ) -> Result<OfferRecord, sqlx::Error> {
        query_as::<Postgres, OfferRecord>(GET_OFFER_SQL)
            .bind(offer.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    /// Fetch an offer and hold its row lock until the transaction ends.
    pub(crate) async fn lock_offer(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        offer: OfferUuid,
    ) -> Result<Option<OfferRecord>, sqlx::Error> {
        query_as::<Postgres, OfferRecord>(LOCK_OFFER_SQL)
            .bind(offer.into_uuid())
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn create_offer(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        offer: OfferUuid,
        terms: &OfferTerms,
    ) -> Result<OfferRecord, sqlx::Error> {
        bind_terms(query_as(CREATE_OFFER_SQL), offer, terms)?
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn update_offer(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        offer: OfferUuid,
        terms: &OfferTerms,
    ) -> Result<OfferRecord, sqlx::Error> {
        bind_terms(query_as(UPDATE_OFFER_SQL), offer, terms)?
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn delete_offer(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        offer: OfferUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_OFFER_SQL)
            .bind(offer.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

/// Bind `$1..$18` shared by the create and update statements.
fn bind_terms<'q>(
    statement: QueryAs<'q, Postgres, OfferRecord, PgArguments>,
    offer: OfferUuid,
    terms: &OfferTerms,
) -> Result<QueryAs<'q, Postgres, OfferRecord, PgArguments>, sqlx::Error> {
    let restrictions = &terms.restrictions;

    Ok(statement
        .bind(offer.into_uuid())
        .bind(terms.title.trim().to_string())
        .bind(SqlxDate::from(terms.start_date))
        .bind(SqlxDate::from(terms.end_date))
        .bind(terms.kind().map(|kind| kind.as_str()))
        .bind(Json(terms.tiers.clone()))
        .bind(terms.is_active)
        .bind(terms.priority)
        .bind(restrictions.minimum_order_value.aed)
        .bind(restrictions.minimum_order_value.inr)
        .bind(restrictions.maximum_order_value.aed)
        .bind(restrictions.maximum_order_value.inr)
        .bind(try_optional_i32_from_u32(
            restrictions.usage_limit_per_user,
            "usage_limit_per_user",
        )?)
        .bind(try_optional_i32_from_u32(
            restrictions.total_usage_limit,
            "total_usage_limit",
        )?)
        .bind(restrictions.shop.map(|shop| shop.as_str()))
        .bind(restrictions.user_type.map(|user_type| user_type.as_str()))
        .bind(sorted(&restrictions.allowed_categories))
        .bind(sorted(&restrictions.excluded_categories)))
}

fn sorted(categories: &FxHashSet<String>) -> Vec<String> {
    let mut categories: Vec<String> = categories.iter().cloned().collect();

    categories.sort_unstable();

    categories
}

impl<'r> FromRow<'r, PgRow> for OfferRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let Json(tiers): Json<Tiers> = row.try_get("discount_tiers")?;

        let restrictions = OfferRestrictions {
            minimum_order_value: PerCurrency::new(
                row.try_get::<Option<Decimal>, _>("minimum_order_value_aed")?,
                row.try_get::<Option<Decimal>, _>("minimum_order_value_inr")?,
            ),
            maximum_order_value: PerCurrency::new(
                row.try_get::<Option<Decimal>, _>("maximum_order_value_aed")?,
                row.try_get::<Option<Decimal>, _>("maximum_order_value_inr")?,
            ),
            usage_limit_per_user: optional_count_column(row, "usage_limit_per_user")?,
            total_usage_limit: optional_count_column(row, "total_usage_limit")?,
            shop: parse_optional_column(row, "shop_restriction")?,
            user_type: parse_optional_column(row, "user_type_restriction")?,
            allowed_categories: row
                .try_get::<Vec<String>, _>("allowed_categories")?
                .into_iter()
                .collect(),
            excluded_categories: row
                .try_get::<Vec<String>, _>("excluded_categories")?
                .into_iter()
                .collect(),
        };

        Ok(Self {
            offer: PromotionalOffer {
                uuid: row.try_get("uuid")?,
                terms: OfferTerms {
                    title: row.try_get("title")?,
                    start_date: row.try_get::<SqlxDate, _>("start_date")?.to_jiff(),
                    end_date: row.try_get::<SqlxDate, _>("end_date")?.to_jiff(),
                    tiers,
                    is_active: row.try_get("is_active")?,
                    priority: row.try_get("priority")?,
                    restrictions,
                },
                created_at: timestamp_column(row, "created_at")?,
            },
            updated_at: timestamp_column(row, "updated_at")?,
        })
    }
}
