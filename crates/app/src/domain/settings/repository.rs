//! Settings Repository

use souq::settings::PromotionSettings;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};

use crate::domain::{columns::timestamp_column, settings::records::SettingsRecord};

const GET_SETTINGS_SQL: &str = include_str!("sql/get_settings.sql");
const UPDATE_SETTINGS_SQL: &str = include_str!("sql/update_settings.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgSettingsRepository;

impl PgSettingsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn get_settings(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<SettingsRecord, sqlx::Error> {
        query_as::<Postgres, SettingsRecord>(GET_SETTINGS_SQL)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn update_settings(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        settings: PromotionSettings,
    ) -> Result<SettingsRecord, sqlx::Error> {
        query_as::<Postgres, SettingsRecord>(UPDATE_SETTINGS_SQL)
            .bind(settings.welcome_coupons_enabled)
            .bind(settings.offers_enabled)
            .fetch_one(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for SettingsRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            settings: PromotionSettings {
                welcome_coupons_enabled: row.try_get("welcome_coupons_enabled")?,
                offers_enabled: row.try_get("offers_enabled")?,
            },
            updated_at: timestamp_column(row, "updated_at")?,
        })
    }
}
