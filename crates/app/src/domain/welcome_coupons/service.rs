//! Welcome Coupons Service

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use tracing::{Span, info};

use crate::{
    database::Db,
    domain::welcome_coupons::{
        PgWelcomeCouponsRepository, WelcomeCouponsServiceError,
        data::{NewWelcomeCoupon, WelcomeCouponUpdate},
        records::{WelcomeCouponRecord, WelcomeCouponUuid},
    },
};

#[derive(Debug, Clone)]
pub struct PgWelcomeCouponsService {
    db: Db,
    repository: PgWelcomeCouponsRepository,
}

impl PgWelcomeCouponsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgWelcomeCouponsRepository::new(),
        }
    }
}

#[async_trait]
impl WelcomeCouponsService for PgWelcomeCouponsService {
    async fn list_welcome_coupons(
        &self,
    ) -> Result<Vec<WelcomeCouponRecord>, WelcomeCouponsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let coupons = self.repository.list_welcome_coupons(&mut tx).await?;

        tx.commit().await?;

        Ok(coupons)
    }

    async fn get_welcome_coupon(
        &self,
        coupon: WelcomeCouponUuid,
    ) -> Result<WelcomeCouponRecord, WelcomeCouponsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let coupon = self.repository.get_welcome_coupon(&mut tx, coupon).await?;

        tx.commit().await?;

        Ok(coupon)
    }

    #[tracing::instrument(
        name = "welcome_coupons.service.create_welcome_coupon",
        skip(self, coupon),
        fields(
            welcome_coupon_uuid = %coupon.uuid,
            discount_type = coupon.terms.discount.type_as_str(),
            assigned_users = tracing::field::Empty
        ),
        err
    )]
    async fn create_welcome_coupon(
        &self,
        coupon: NewWelcomeCoupon,
    ) -> Result<WelcomeCouponRecord, WelcomeCouponsServiceError> {
        let terms = coupon.terms.normalized();

        terms.validate()?;

        let mut tx = self.db.begin_transaction().await?;

        let record = self
            .repository
            .create_welcome_coupon(&mut tx, coupon.uuid, &terms)
            .await?;

        let assigned = self
            .repository
            .assign_to_all_users(&mut tx, coupon.uuid, Timestamp::now())
            .await?;

        tx.commit().await?;

        Span::current().record("assigned_users", assigned);

        info!(
            welcome_coupon_uuid = %coupon.uuid,
            code = %record.coupon.terms.code,
            assigned_users = assigned,
            "created welcome coupon"
        );

        Ok(record)
    }

    #[tracing::instrument(
        name = "welcome_coupons.service.update_welcome_coupon",
        skip(self, update),
        fields(welcome_coupon_uuid = %coupon),
        err
    )]
    async fn update_welcome_coupon(
        &self,
        coupon: WelcomeCouponUuid,
        update: WelcomeCouponUpdate,
    ) -> Result<WelcomeCouponRecord, WelcomeCouponsServiceError> {
        let terms = update.terms.normalized();

        terms.validate()?;

        let mut tx = self.db.begin_transaction().await?;

        let record = self
            .repository
            .update_welcome_coupon(&mut tx, coupon, &terms)
            .await?;

        tx.commit().await?;

        info!(welcome_coupon_uuid = %coupon, "updated welcome coupon");

        Ok(record)
    }

    #[tracing::instrument(
        name = "welcome_coupons.service.delete_welcome_coupon",
        skip(self),
        fields(welcome_coupon_uuid = %coupon),
        err
    )]
    async fn delete_welcome_coupon(
        &self,
        coupon: WelcomeCouponUuid,
    ) -> Result<(), WelcomeCouponsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let rows_affected = self
            .repository
            .delete_welcome_coupon(&mut tx, coupon)
            .await?;

        if rows_affected == 0 {
            return Err(WelcomeCouponsServiceError::NotFound);
        }

        tx.commit().await?;

        info!(welcome_coupon_uuid = %coupon, "deleted welcome coupon");

        Ok(())
    }

    #[tracing::instrument(
        name = "welcome_coupons.service.backfill_assignments",
        skip(self),
        fields(assigned_users = tracing::field::Empty),
        err
    )]
    async fn backfill_assignments(&self) -> Result<u64, WelcomeCouponsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let assigned = self
            .repository
            .assign_active_to_all_users(&mut tx, Timestamp::now())
            .await?;

        tx.commit().await?;

        Span::current().record("assigned_users", assigned);

        info!(assigned_users = assigned, "backfilled welcome coupon assignments");

        Ok(assigned)
    }
}

#[automock]
#[async_trait]
pub trait WelcomeCouponsService: Send + Sync {
    /// Every welcome coupon, newest first.
    async fn list_welcome_coupons(
        &self,
    ) -> Result<Vec<WelcomeCouponRecord>, WelcomeCouponsServiceError>;

    /// Retrieve a single welcome coupon.
    async fn get_welcome_coupon(
        &self,
        coupon: WelcomeCouponUuid,
    ) -> Result<WelcomeCouponRecord, WelcomeCouponsServiceError>;

    /// Validate and store a coupon, then assign it to every existing user.
    async fn create_welcome_coupon(
        &self,
        coupon: NewWelcomeCoupon,
    ) -> Result<WelcomeCouponRecord, WelcomeCouponsServiceError>;

    /// Replace a coupon's terms.
    async fn update_welcome_coupon(
        &self,
        coupon: WelcomeCouponUuid,
        update: WelcomeCouponUpdate,
    ) -> Result<WelcomeCouponRecord, WelcomeCouponsServiceError>;

    /// Delete a coupon and its assignments.
    async fn delete_welcome_coupon(
        &self,
        coupon: WelcomeCouponUuid,
    ) -> Result<(), WelcomeCouponsServiceError>;

    /// Assign active coupons to users that joined after they were created.
    ///
    /// Returns the number of assignments added.
    async fn backfill_assignments(&self) -> Result<u64, WelcomeCouponsServiceError>;
}

#[cfg(test)]
mod tests {
    use rust_decimal::dec;
    use souq::welcome::{WelcomeCouponError, WelcomeDiscount};
    use testresult::TestResult;

    use super::*;
    use crate::test::{
        TestContext,
        helpers::{count_welcome_assignments, create_user, welcome_terms},
    };

    #[tokio::test]
    async fn create_welcome_coupon_normalises_code() -> TestResult {
        let ctx = TestContext::new().await;
        let uuid = WelcomeCouponUuid::new();

        let mut terms = welcome_terms("welcome100");
        terms.discount = WelcomeDiscount::Percent {
            percent: dec!(50),
            maximum_discount: dec!(100),
        };

        let created = ctx
            .welcome_coupons
            .create_welcome_coupon(NewWelcomeCoupon { uuid, terms })
            .await?;

        assert_eq!(created.uuid(), uuid);
        assert_eq!(created.coupon.terms.code, "WELCOME100");
        assert_eq!(
            created.coupon.terms.discount,
            WelcomeDiscount::Percent {
                percent: dec!(50),
                maximum_discount: dec!(100),
            }
        );

        Ok(())
    }

    #[tokio::test]
    async fn create_welcome_coupon_assigns_existing_users() -> TestResult {
        let ctx = TestContext::new().await;

        create_user(&ctx, "1", Some("one@example.com")).await?;
        create_user(&ctx, "2", None).await?;

        let uuid = WelcomeCouponUuid::new();

        ctx.welcome_coupons
            .create_welcome_coupon(NewWelcomeCoupon {
                uuid,
                terms: welcome_terms("WELCOME10"),
            })
            .await?;

        assert_eq!(count_welcome_assignments(&ctx, uuid).await?, 2);

        create_user(&ctx, "3", None).await?;

        let backfilled = ctx.welcome_coupons.backfill_assignments().await?;

        assert_eq!(backfilled, 1);
        assert_eq!(count_welcome_assignments(&ctx, uuid).await?, 3);

        Ok(())
    }

    #[tokio::test]
    async fn codes_are_unique_regardless_of_case() -> TestResult {
        let ctx = TestContext::new().await;

        ctx.welcome_coupons
            .create_welcome_coupon(NewWelcomeCoupon {
                uuid: WelcomeCouponUuid::new(),
                terms: welcome_terms("WELCOME10"),
            })
            .await?;

        let result = ctx
            .welcome_coupons
            .create_welcome_coupon(NewWelcomeCoupon {
                uuid: WelcomeCouponUuid::new(),
                terms: welcome_terms("Welcome10"),
            })
            .await;

        assert!(
            matches!(result, Err(WelcomeCouponsServiceError::AlreadyExists)),
            "expected AlreadyExists, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn create_welcome_coupon_rejects_bad_prefix() {
        let ctx = TestContext::new().await;

        let result = ctx
            .welcome_coupons
            .create_welcome_coupon(NewWelcomeCoupon {
                uuid: WelcomeCouponUuid::new(),
                terms: welcome_terms("HELLO10"),
            })
            .await;

        assert!(
            matches!(
                result,
                Err(WelcomeCouponsServiceError::Invalid(
                    WelcomeCouponError::InvalidCodePrefix
                ))
            ),
            "expected InvalidCodePrefix, got {result:?}"
        );
    }

    #[tokio::test]
    async fn update_and_delete_welcome_coupon() -> TestResult {
        let ctx = TestContext::new().await;
        let uuid = WelcomeCouponUuid::new();

        ctx.welcome_coupons
            .create_welcome_coupon(NewWelcomeCoupon {
                uuid,
                terms: welcome_terms("WELCOME10"),
            })
            .await?;

        let mut terms = welcome_terms("WELCOME20");
        terms.is_active = false;

        let updated = ctx
            .welcome_coupons
            .update_welcome_coupon(uuid, WelcomeCouponUpdate { terms })
            .await?;

        assert_eq!(updated.coupon.terms.code, "WELCOME20");
        assert!(!updated.coupon.terms.is_active);

        ctx.welcome_coupons.delete_welcome_coupon(uuid).await?;

        let result = ctx.welcome_coupons.get_welcome_coupon(uuid).await;

        assert!(
            matches!(result, Err(WelcomeCouponsServiceError::NotFound)),
            "expected NotFound after deletion, got {result:?}"
        );

        Ok(())
    }
}
