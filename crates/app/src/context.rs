//! App Context

use std::sync::Arc;

use thiserror::Error;

use crate::{
    database::{self, Db},
    domain::{
        checkout::{CheckoutService, PgCheckoutService},
        offers::{OffersService, PgOffersService},
        settings::{PgSettingsService, SettingsService},
        welcome_coupons::{PgWelcomeCouponsService, WelcomeCouponsService},
    },
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),

    #[error("failed to apply migrations")]
    Migrations(#[source] sqlx::migrate::MigrateError),
}

#[derive(Clone)]
pub struct AppContext {
    pub offers: Arc<dyn OffersService>,
    pub welcome_coupons: Arc<dyn WelcomeCouponsService>,
    pub checkout: Arc<dyn CheckoutService>,
    pub settings: Arc<dyn SettingsService>,
}

impl AppContext {
    /// Build application context from a database URL.
    ///
    /// Pending migrations are applied first when `run_migrations` is set.
    ///
    /// # Errors
    ///
    /// Returns an error when establishing a database connection or applying
    /// migrations fails.
    pub async fn from_database_url(url: &str, run_migrations: bool) -> Result<Self, AppInitError> {
        let pool = database::connect(url)
            .await
            .map_err(AppInitError::Database)?;

        if run_migrations {
            database::migrate(&pool)
                .await
                .map_err(AppInitError::Migrations)?;
        }

        Ok(Self::from_db(&Db::new(pool)))
    }

    #[must_use]
    pub fn from_db(db: &Db) -> Self {
        Self {
            offers: Arc::new(PgOffersService::new(db.clone())),
            welcome_coupons: Arc::new(PgWelcomeCouponsService::new(db.clone())),
            checkout: Arc::new(PgCheckoutService::new(db.clone())),
            settings: Arc::new(PgSettingsService::new(db.clone())),
        }
    }
}
