//! Settings Service

use async_trait::async_trait;
use mockall::automock;
use souq::settings::PromotionSettings;
use tracing::info;

use crate::{
    database::Db,
    domain::settings::{PgSettingsRepository, SettingsServiceError, records::SettingsRecord},
};

#[derive(Debug, Clone)]
pub struct PgSettingsService {
    db: Db,
    repository: PgSettingsRepository,
}

impl PgSettingsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgSettingsRepository::new(),
        }
    }
}

#[async_trait]
impl SettingsService for PgSettingsService {
    async fn get_settings(&self) -> Result<SettingsRecord, SettingsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let settings = self.repository.get_settings(&mut tx).await?;

        tx.commit().await?;

        Ok(settings)
    }

    #[tracing::instrument(
        name = "settings.service.update_settings",
        skip(self),
        fields(
            welcome_coupons_enabled = settings.welcome_coupons_enabled,
            offers_enabled = settings.offers_enabled
        ),
        err
    )]
    async fn update_settings(
        &self,
        settings: PromotionSettings,
    ) -> Result<SettingsRecord, SettingsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let record = self.repository.update_settings(&mut tx, settings).await?;

        tx.commit().await?;

        info!("updated promotion settings");

        Ok(record)
    }
}

#[automock]
#[async_trait]
pub trait SettingsService: Send + Sync {
    /// Current feature flags.
    async fn get_settings(&self) -> Result<SettingsRecord, SettingsServiceError>;

    /// Replace both feature flags.
    async fn update_settings(
        &self,
        settings: PromotionSettings,
    ) -> Result<SettingsRecord, SettingsServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;
    use crate::test::TestContext;

    #[tokio::test]
    async fn settings_default_to_enabled() -> TestResult {
        let ctx = TestContext::new().await;

        let record = ctx.settings.get_settings().await?;

        assert_eq!(record.settings, PromotionSettings::default());

        Ok(())
    }

    #[tokio::test]
    async fn update_settings_persists_flags() -> TestResult {
        let ctx = TestContext::new().await;

        let updated = ctx
            .settings
            .update_settings(PromotionSettings {
                welcome_coupons_enabled: false,
                offers_enabled: true,
            })
            .await?;

        assert!(!updated.settings.welcome_coupons_enabled);

        let fetched = ctx.settings.get_settings().await?;

        assert_eq!(fetched.settings, updated.settings);

        Ok(())
    }
}
