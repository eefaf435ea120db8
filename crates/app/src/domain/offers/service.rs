//! Offers Service

use async_trait::async_trait;
use jiff::civil::Date;
use mockall::automock;
use souq::offers::compare_offers;
use tracing::{Span, info};

use crate::{
    database::Db,
    domain::{
        offers::{
            OffersServiceError, PgOffersRepository,
            data::{NewOffer, OfferUpdate},
            records::{OfferRecord, OfferUuid},
        },
        usage::{PgUsageRepository, records::OfferUsageRecord},
    },
};

#[derive(Debug, Clone)]
pub struct PgOffersService {
    db: Db,
    offers: PgOffersRepository,
    usage: PgUsageRepository,
}

impl PgOffersService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            offers: PgOffersRepository::new(),
            usage: PgUsageRepository::new(),
        }
    }
}

#[async_trait]
impl OffersService for PgOffersService {
    async fn list_offers(&self) -> Result<Vec<OfferRecord>, OffersServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let offers = self.offers.list_offers(&mut tx).await?;

        tx.commit().await?;

        Ok(offers)
    }

    #[tracing::instrument(
        name = "offers.service.list_active_offers",
        skip(self),
        fields(on = %on, offer_count = tracing::field::Empty),
        err
    )]
    async fn list_active_offers(&self, on: Date) -> Result<Vec<OfferRecord>, OffersServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let mut offers = self.offers.list_live_offers(&mut tx, on).await?;

        tx.commit().await?;

        offers.sort_by(|a, b| compare_offers(&a.offer, &b.offer));

        Span::current().record("offer_count", offers.len());

        Ok(offers)
    }

    async fn get_offer(&self, offer: OfferUuid) -> Result<OfferRecord, OffersServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let offer = self.offers.get_offer(&mut tx, offer).await?;

        tx.commit().await?;

        Ok(offer)
    }

    #[tracing::instrument(
        name = "offers.service.create_offer",
        skip(self, offer),
        fields(
            offer_uuid = %offer.uuid,
            offer_type = tracing::field::Empty,
            tier_count = offer.terms.tiers.len()
        ),
        err
    )]
    async fn create_offer(&self, offer: NewOffer) -> Result<OfferRecord, OffersServiceError> {
        offer.terms.validate()?;

        if let Some(kind) = offer.terms.kind() {
            Span::current().record("offer_type", tracing::field::display(kind));
        }

        let mut tx = self.db.begin_transaction().await?;

        let record = self
            .offers
            .create_offer(&mut tx, offer.uuid, &offer.terms)
            .await?;

        tx.commit().await?;

        info!(offer_uuid = %record.uuid(), "created promotional offer");

        Ok(record)
    }

    #[tracing::instrument(
        name = "offers.service.update_offer",
        skip(self, update),
        fields(offer_uuid = %offer, tier_count = update.terms.tiers.len()),
        err
    )]
    async fn update_offer(
        &self,
        offer: OfferUuid,
        update: OfferUpdate,
    ) -> Result<OfferRecord, OffersServiceError> {
        update.terms.validate()?;

        let mut tx = self.db.begin_transaction().await?;

        let record = self
            .offers
            .update_offer(&mut tx, offer, &update.terms)
            .await?;

        tx.commit().await?;

        info!(offer_uuid = %offer, "updated promotional offer");

        Ok(record)
    }

    #[tracing::instrument(
        name = "offers.service.delete_offer",
        skip(self),
        fields(offer_uuid = %offer),
        err
    )]
    async fn delete_offer(&self, offer: OfferUuid) -> Result<(), OffersServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let rows_affected = self
            .offers
            .delete_offer(&mut tx, offer)
            .await
            .map_err(|error| match OffersServiceError::from(error) {
                OffersServiceError::InvalidReference => OffersServiceError::InUse,
                other => other,
            })?;

        if rows_affected == 0 {
            return Err(OffersServiceError::NotFound);
        }

        tx.commit().await?;

        info!(offer_uuid = %offer, "deleted promotional offer");

        Ok(())
    }

    async fn list_offer_usages(
        &self,
        offer: OfferUuid,
    ) -> Result<Vec<OfferUsageRecord>, OffersServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        self.offers.get_offer(&mut tx, offer).await?;

        let usages = self.usage.list_offer_usages(&mut tx, offer).await?;

        tx.commit().await?;

        Ok(usages)
    }
}

#[automock]
#[async_trait]
pub trait OffersService: Send + Sync {
    /// Every offer, highest priority first.
    async fn list_offers(&self) -> Result<Vec<OfferRecord>, OffersServiceError>;

    /// Offers live on `on`, in the order codes are matched against them.
    async fn list_active_offers(&self, on: Date) -> Result<Vec<OfferRecord>, OffersServiceError>;

    /// Retrieve a single offer.
    async fn get_offer(&self, offer: OfferUuid) -> Result<OfferRecord, OffersServiceError>;

    /// Validate and store a new offer.
    async fn create_offer(&self, offer: NewOffer) -> Result<OfferRecord, OffersServiceError>;

    /// Replace an offer's terms.
    async fn update_offer(
        &self,
        offer: OfferUuid,
        update: OfferUpdate,
    ) -> Result<OfferRecord, OffersServiceError>;

    /// Delete an offer that has never been redeemed.
    async fn delete_offer(&self, offer: OfferUuid) -> Result<(), OffersServiceError>;

    /// Usage ledger rows for an offer, most recent first.
    async fn list_offer_usages(
        &self,
        offer: OfferUuid,
    ) -> Result<Vec<OfferUsageRecord>, OffersServiceError>;
}
