//! Checkout Service

use async_trait::async_trait;
use jiff::{Timestamp, tz::TimeZone};
use mockall::automock;
use rust_decimal::Decimal;
use souq::{
    cart::{CartContext, usage_identifier},
    matcher::{Catalog, CodeClass, MatchError, Resolution, classify_code, resolve_code},
    offers::PromotionalOffer,
    rejection::Rejection,
    tiers::DiscountTier,
    validation::{Quote, ValidationError, quote_offer, quote_welcome},
    welcome::WelcomeCoupon,
};
use sqlx::{Postgres, Transaction};
use tracing::{Span, info};

use crate::{
    database::Db,
    domain::{
        checkout::{
            CheckoutServiceError,
            data::{
                CodeValidation, MatchedCode, RecordUsageRequest, RedemptionOutcome,
                RedemptionTarget, ValidateCodeRequest,
            },
        },
        offers::{
            PgOffersRepository,
            records::{OfferRecord, OfferUuid},
        },
        settings::PgSettingsRepository,
        usage::{PgUsageRepository, RedemptionAmounts},
        welcome_coupons::{
            PgWelcomeCouponsRepository,
            records::{WelcomeCouponRecord, WelcomeCouponUuid},
        },
    },
};

#[derive(Debug, Clone)]
pub struct PgCheckoutService {
    db: Db,
    offers: PgOffersRepository,
    welcome_coupons: PgWelcomeCouponsRepository,
    usage: PgUsageRepository,
    settings: PgSettingsRepository,
}

impl PgCheckoutService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            offers: PgOffersRepository::new(),
            welcome_coupons: PgWelcomeCouponsRepository::new(),
            usage: PgUsageRepository::new(),
            settings: PgSettingsRepository::new(),
        }
    }

    async fn quote_welcome_coupon(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        record: WelcomeCouponRecord,
        cart: &CartContext,
        at: Timestamp,
    ) -> Result<CodeValidation, CheckoutServiceError> {
        let Some(user_id) = cart
            .user_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
        else {
            return Ok(CodeValidation::Rejected(Rejection::LoginRequired));
        };

        let already_redeemed = self
            .usage
            .get_welcome_coupon_usage(tx, user_id, record.uuid())
            .await?
            .is_some_and(|usage| usage.is_redeemed());

        let quote = quote_welcome(&record.coupon, cart, already_redeemed, at);

        accept(MatchedCode::Welcome(record), quote)
    }

    async fn quote_offer_tier(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        record: OfferRecord,
        tier: DiscountTier,
        cart: &CartContext,
    ) -> Result<CodeValidation, CheckoutServiceError> {
        let usage = self
            .usage
            .offer_usage_snapshot(tx, record.uuid(), cart.usage_identifier())
            .await?;

        let quote = quote_offer(&record.offer, &tier, cart, usage);

        accept(
            MatchedCode::Offer {
                offer: record,
                tier,
            },
            quote,
        )
    }

    async fn redeem_offer(
        &self,
        offer: OfferUuid,
        request: &RecordUsageRequest,
        amounts: RedemptionAmounts,
    ) -> Result<RedemptionOutcome, CheckoutServiceError> {
        let Some(identifier) =
            usage_identifier(Some(request.user_id.as_str()), request.user_email.as_deref())
        else {
            return Ok(RedemptionOutcome::Rejected(Rejection::IdentityRequired));
        };

        let mut tx = self.db.begin_transaction().await?;

        let Some(record) = self.offers.lock_offer(&mut tx, offer).await? else {
            return Ok(RedemptionOutcome::Rejected(Rejection::OfferNotFound));
        };

        let restrictions = &record.offer.terms.restrictions;

        if let Some(limit) = restrictions.total_usage_limit {
            let snapshot = self
                .usage
                .offer_usage_snapshot(&mut tx, offer, Some(identifier))
                .await?;

            if snapshot.total_count >= limit {
                return Ok(RedemptionOutcome::Rejected(Rejection::TotalLimitReached));
            }
        }

        let Some(usage) = self
            .usage
            .increment_offer_usage(
                &mut tx,
                offer,
                identifier,
                restrictions.usage_limit_per_user,
                request.at,
            )
            .await?
        else {
            return Ok(RedemptionOutcome::Rejected(Rejection::PerUserLimitReached));
        };

        let redemption = self
            .usage
            .create_offer_redemption(&mut tx, usage.uuid, &request.user_id, amounts, request.at)
            .await?;

        tx.commit().await?;

        info!(
            offer_uuid = %offer,
            usage_count = usage.usage_count,
            "recorded offer redemption"
        );

        Ok(RedemptionOutcome::Recorded {
            record_uuid: redemption.uuid.into_uuid(),
            redeemed_at: redemption.redeemed_at,
        })
    }

    async fn redeem_welcome_coupon(
        &self,
        coupon: WelcomeCouponUuid,
        request: &RecordUsageRequest,
        amounts: RedemptionAmounts,
    ) -> Result<RedemptionOutcome, CheckoutServiceError> {
        let user_id = request.user_id.trim();

        if user_id.is_empty() {
            return Ok(RedemptionOutcome::Rejected(Rejection::LoginRequired));
        }

        let mut tx = self.db.begin_transaction().await?;

        match self.welcome_coupons.get_welcome_coupon(&mut tx, coupon).await {
            Ok(_) => {}
            Err(sqlx::Error::RowNotFound) => {
                return Ok(RedemptionOutcome::Rejected(
                    Rejection::WelcomeCouponNotFound,
                ));
            }
            Err(error) => return Err(error.into()),
        }

        let Some(usage) = self
            .usage
            .redeem_welcome_coupon(&mut tx, user_id, coupon, amounts, request.at)
            .await?
        else {
            return Ok(RedemptionOutcome::Rejected(
                Rejection::WelcomeCouponAlreadyRedeemed,
            ));
        };

        tx.commit().await?;

        info!(welcome_coupon_uuid = %coupon, "recorded welcome coupon redemption");

        Ok(RedemptionOutcome::Recorded {
            record_uuid: usage.uuid.into_uuid(),
            redeemed_at: usage.redeemed_at.unwrap_or(request.at),
        })
    }
}

/// Turn a validation result into an outcome, keeping infrastructure failures
/// as errors.
fn accept(
    matched: MatchedCode,
    quote: Result<Quote, ValidationError>,
) -> Result<CodeValidation, CheckoutServiceError> {
    match quote {
        Ok(quote) => Ok(CodeValidation::Accepted { matched, quote }),
        Err(ValidationError::Rejected(rejection)) => Ok(CodeValidation::Rejected(rejection)),
        Err(ValidationError::Discount(error)) => Err(error.into()),
    }
}

#[async_trait]
impl CheckoutService for PgCheckoutService {
    #[tracing::instrument(
        name = "checkout.service.validate_code",
        skip(self, request),
        fields(
            currency = %request.cart.currency,
            guest = request.cart.is_guest(),
            matched = tracing::field::Empty,
            outcome = tracing::field::Empty
        ),
        err
    )]
    async fn validate_code(
        &self,
        request: ValidateCodeRequest,
    ) -> Result<CodeValidation, CheckoutServiceError> {
        let ValidateCodeRequest { code, cart, at } = request;

        let class = match classify_code(&code) {
            Ok(class) => class,
            Err(rejection) => {
                Span::current().record("outcome", rejection.kind().as_str());

                return Ok(CodeValidation::Rejected(rejection));
            }
        };

        let today = at.to_zoned(TimeZone::UTC).date();

        let mut tx = self.db.begin_transaction().await?;

        let settings = self.settings.get_settings(&mut tx).await?.settings;

        let mut coupons: Vec<WelcomeCouponRecord> = Vec::new();
        let mut offers: Vec<OfferRecord> = Vec::new();

        match &class {
            CodeClass::Welcome(code) if !cart.is_guest() && settings.welcome_coupons_enabled => {
                coupons.extend(
                    self.welcome_coupons
                        .find_active_welcome_coupon(&mut tx, code)
                        .await?,
                );
            }
            CodeClass::Offer(_) if settings.offers_enabled => {
                offers = self.offers.list_live_offers(&mut tx, today).await?;
            }
            _ => {}
        }

        let coupon_snapshots: Vec<WelcomeCoupon> =
            coupons.iter().map(|record| record.coupon.clone()).collect();
        let offer_snapshots: Vec<PromotionalOffer> =
            offers.iter().map(|record| record.offer.clone()).collect();

        let catalog = Catalog {
            offers: &offer_snapshots,
            welcome_coupons: &coupon_snapshots,
        };

        let resolved = match resolve_code(&code, &cart, catalog, settings, today) {
            Ok(Resolution::Welcome(coupon)) => Ok((coupon.uuid, None)),
            Ok(Resolution::Offer { offer, tier }) => Ok((offer.uuid, Some(tier))),
            Err(MatchError::Rejected(rejection)) => Err(rejection),
            Err(MatchError::Pattern(error)) => return Err(error.into()),
        };

        let validation = match resolved {
            Err(rejection) => CodeValidation::Rejected(rejection),
            Ok((uuid, None)) => match coupons.into_iter().find(|record| record.coupon.uuid == uuid)
            {
                Some(record) => {
                    self.quote_welcome_coupon(&mut tx, record, &cart, at)
                        .await?
                }
                None => CodeValidation::Rejected(Rejection::UnknownWelcomeCoupon),
            },
            Ok((uuid, Some(tier))) => {
                match offers.into_iter().find(|record| record.offer.uuid == uuid) {
                    Some(record) => self.quote_offer_tier(&mut tx, record, tier, &cart).await?,
                    None => CodeValidation::Rejected(Rejection::UnknownOfferCode),
                }
            }
        };

        tx.commit().await?;

        match &validation {
            CodeValidation::Accepted { matched, quote } => {
                Span::current().record("matched", matched.kind());
                Span::current().record("outcome", "accepted");

                info!(
                    matched = matched.kind(),
                    discount = %quote.discount.amount(),
                    "accepted discount code"
                );
            }
            CodeValidation::Rejected(rejection) => {
                Span::current().record("outcome", rejection.kind().as_str());
            }
        }

        Ok(validation)
    }

    #[tracing::instrument(
        name = "checkout.service.record_usage",
        skip(self, request),
        fields(
            target = request.target.kind(),
            currency = %request.currency,
            outcome = tracing::field::Empty
        ),
        err
    )]
    async fn record_usage(
        &self,
        request: RecordUsageRequest,
    ) -> Result<RedemptionOutcome, CheckoutServiceError> {
        if request.order_total < Decimal::ZERO || request.discount_amount < Decimal::ZERO {
            return Err(CheckoutServiceError::NegativeAmount);
        }

        let amounts = RedemptionAmounts {
            order_total: request.order_total,
            discount_amount: request.discount_amount,
            currency: request.currency,
        };

        let outcome = match request.target {
            RedemptionTarget::Offer(offer) => self.redeem_offer(offer, &request, amounts).await?,
            RedemptionTarget::WelcomeCoupon(coupon) => {
                self.redeem_welcome_coupon(coupon, &request, amounts)
                    .await?
            }
        };

        let outcome_label = match &outcome {
            RedemptionOutcome::Recorded { .. } => "recorded",
            RedemptionOutcome::Rejected(rejection) => rejection.kind().as_str(),
        };

        Span::current().record("outcome", outcome_label);

        Ok(outcome)
    }
}

#[automock]
#[async_trait]
pub trait CheckoutService: Send + Sync {
    /// Match a submitted code, check it against the cart and price it.
    ///
    /// Business-rule failures come back as [`CodeValidation::Rejected`].
    async fn validate_code(
        &self,
        request: ValidateCodeRequest,
    ) -> Result<CodeValidation, CheckoutServiceError>;

    /// Record a completed order's use of an offer or welcome coupon.
    ///
    /// Per-user and total limits are enforced atomically; a welcome coupon
    /// can be redeemed once per user.
    async fn record_usage(
        &self,
        request: RecordUsageRequest,
    ) -> Result<RedemptionOutcome, CheckoutServiceError>;
}

#[cfg(test)]
mod tests {
    use jiff::SignedDuration;
    use rust_decimal::dec;
    use souq::{
        cart::{Shop, UserType},
        currency::Currency,
        rejection::RejectionKind,
        settings::PromotionSettings,
        welcome::WelcomeDiscount,
    };
    use testresult::TestResult;

    use super::*;
    use crate::{
        domain::{
            offers::{OffersService, OffersServiceError, data::NewOffer},
            settings::SettingsService,
            welcome_coupons::{WelcomeCouponsService, data::NewWelcomeCoupon},
        },
        test::{
            TestContext,
            helpers::{create_user, offer_terms, welcome_terms},
        },
    };

    fn at() -> Timestamp {
        "2026-06-01T12:00:00Z".parse().unwrap()
    }

    fn shopper(total: Decimal) -> CartContext {
        CartContext::new(Currency::Aed, total)
            .with_user("7", Some("shopper@example.com".to_string()))
            .with_user_type(UserType::New)
            .with_shop(Shop::A)
    }

    fn redeem(target: RedemptionTarget, user_id: &str) -> RecordUsageRequest {
        RecordUsageRequest {
            target,
            user_id: user_id.to_string(),
            user_email: None,
            order_total: dec!(300),
            discount_amount: dec!(30),
            currency: Currency::Aed,
            at: at(),
        }
    }

    async fn create_offer(
        ctx: &TestContext,
        tiers: &[DiscountTier],
        priority: i32,
    ) -> TestResult<OfferUuid> {
        let uuid = OfferUuid::new();
        let mut terms = offer_terms(tiers);
        terms.priority = priority;

        ctx.offers.create_offer(NewOffer { uuid, terms }).await?;

        Ok(uuid)
    }

    async fn create_coupon(
        ctx: &TestContext,
        code: &str,
    ) -> TestResult<WelcomeCouponUuid> {
        let uuid = WelcomeCouponUuid::new();
        let mut terms = welcome_terms(code);
        terms.discount = WelcomeDiscount::Percent {
            percent: dec!(50),
            maximum_discount: dec!(100),
        };

        ctx.welcome_coupons
            .create_welcome_coupon(NewWelcomeCoupon { uuid, terms })
            .await?;

        Ok(uuid)
    }

    #[tokio::test]
    async fn validate_offer_code_prices_matching_tier() -> TestResult {
        let ctx = TestContext::new().await;

        create_offer(&ctx, &[DiscountTier::Percentage(dec!(20))], 0).await?;

        let validation = ctx
            .checkout
            .validate_code(ValidateCodeRequest {
                code: " spin20abc ".to_string(),
                cart: shopper(dec!(500)),
                at: at(),
            })
            .await?;

        let CodeValidation::Accepted { matched, quote } = validation else {
            panic!("expected code to be accepted, got {validation:?}");
        };

        assert_eq!(matched.kind(), "offer");
        assert_eq!(*quote.discount.amount(), dec!(100));

        Ok(())
    }

    #[tokio::test]
    async fn validate_prefers_higher_priority_offer() -> TestResult {
        let ctx = TestContext::new().await;

        create_offer(&ctx, &[DiscountTier::Cash(dec!(50))], 1).await?;
        let preferred = create_offer(&ctx, &[DiscountTier::Cash(dec!(50))], 5).await?;

        let validation = ctx
            .checkout
            .validate_code(ValidateCodeRequest {
                code: "CASH50XYZ".to_string(),
                cart: shopper(dec!(200)),
                at: at(),
            })
            .await?;

        let CodeValidation::Accepted {
            matched: MatchedCode::Offer { offer, .. },
            ..
        } = validation
        else {
            panic!("expected an offer match, got {validation:?}");
        };

        assert_eq!(offer.uuid(), preferred);

        Ok(())
    }

    #[tokio::test]
    async fn validate_unknown_code_is_rejected() -> TestResult {
        let ctx = TestContext::new().await;

        create_offer(&ctx, &[DiscountTier::Percentage(dec!(20))], 0).await?;

        for code in ["SPIN25ABC", "WELCOMEBACK", "NOTHING"] {
            let validation = ctx
                .checkout
                .validate_code(ValidateCodeRequest {
                    code: code.to_string(),
                    cart: shopper(dec!(500)),
                    at: at(),
                })
                .await?;

            let CodeValidation::Rejected(rejection) = validation else {
                panic!("expected {code} to be rejected, got {validation:?}");
            };

            assert_eq!(rejection.kind(), RejectionKind::NotFound);
        }

        Ok(())
    }

    #[tokio::test]
    async fn validate_welcome_code_caps_discount() -> TestResult {
        let ctx = TestContext::new().await;

        create_coupon(&ctx, "WELCOME100").await?;

        let validation = ctx
            .checkout
            .validate_code(ValidateCodeRequest {
                code: "welcome100".to_string(),
                cart: shopper(dec!(300)),
                at: at(),
            })
            .await?;

        let CodeValidation::Accepted { matched, quote } = validation else {
            panic!("expected code to be accepted, got {validation:?}");
        };

        assert_eq!(matched.kind(), "welcome");
        assert_eq!(*quote.discount.amount(), dec!(100));

        Ok(())
    }

    #[tokio::test]
    async fn validate_welcome_code_as_guest_requires_login() -> TestResult {
        let ctx = TestContext::new().await;

        let validation = ctx
            .checkout
            .validate_code(ValidateCodeRequest {
                code: "WELCOME100".to_string(),
                cart: CartContext::new(Currency::Aed, dec!(300)),
                at: at(),
            })
            .await?;

        assert_eq!(validation, CodeValidation::Rejected(Rejection::LoginRequired));

        Ok(())
    }

    #[tokio::test]
    async fn validate_respects_disabled_offers() -> TestResult {
        let ctx = TestContext::new().await;

        create_offer(&ctx, &[DiscountTier::Percentage(dec!(20))], 0).await?;

        ctx.settings
            .update_settings(PromotionSettings {
                welcome_coupons_enabled: true,
                offers_enabled: false,
            })
            .await?;

        let validation = ctx
            .checkout
            .validate_code(ValidateCodeRequest {
                code: "SPIN20ABC".to_string(),
                cart: shopper(dec!(500)),
                at: at(),
            })
            .await?;

        assert_eq!(validation, CodeValidation::Rejected(Rejection::OffersDisabled));

        Ok(())
    }

    #[tokio::test]
    async fn welcome_coupon_redeems_once() -> TestResult {
        let ctx = TestContext::new().await;

        create_user(&ctx, "7", Some("shopper@example.com")).await?;
        let coupon = create_coupon(&ctx, "WELCOME100").await?;

        let first = ctx
            .checkout
            .record_usage(redeem(RedemptionTarget::WelcomeCoupon(coupon), "7"))
            .await?;

        let RedemptionOutcome::Recorded { redeemed_at, .. } = first else {
            panic!("expected first redemption to be recorded, got {first:?}");
        };

        let mut retry = redeem(RedemptionTarget::WelcomeCoupon(coupon), "7");
        retry.at = at().checked_add(SignedDuration::from_hours(1))?;

        let second = ctx.checkout.record_usage(retry).await?;

        assert_eq!(
            second,
            RedemptionOutcome::Rejected(Rejection::WelcomeCouponAlreadyRedeemed)
        );

        let redeemed_at_after: Option<jiff_sqlx::Timestamp> = sqlx::query_scalar(
            "SELECT redeemed_at FROM welcome_coupon_usages \
             WHERE user_id = $1 AND welcome_coupon_uuid = $2",
        )
        .bind("7")
        .bind(coupon.into_uuid())
        .fetch_one(ctx.db.pool())
        .await?;

        assert_eq!(
            redeemed_at_after.map(jiff_sqlx::Timestamp::to_jiff),
            Some(redeemed_at)
        );

        let validation = ctx
            .checkout
            .validate_code(ValidateCodeRequest {
                code: "WELCOME100".to_string(),
                cart: shopper(dec!(300)),
                at: at(),
            })
            .await?;

        assert_eq!(
            validation,
            CodeValidation::Rejected(Rejection::WelcomeCouponAlreadyUsed)
        );

        Ok(())
    }

    #[tokio::test]
    async fn welcome_validation_trims_user_id() -> TestResult {
        let ctx = TestContext::new().await;

        create_user(&ctx, "7", Some("shopper@example.com")).await?;
        let coupon = create_coupon(&ctx, "WELCOME100").await?;

        ctx.checkout
            .record_usage(redeem(RedemptionTarget::WelcomeCoupon(coupon), " 7 "))
            .await?;

        let validation = ctx
            .checkout
            .validate_code(ValidateCodeRequest {
                code: "WELCOME100".to_string(),
                cart: CartContext::new(Currency::Aed, dec!(300)).with_user(" 7 ", None),
                at: at(),
            })
            .await?;

        assert_eq!(
            validation,
            CodeValidation::Rejected(Rejection::WelcomeCouponAlreadyUsed)
        );

        let validation = ctx
            .checkout
            .validate_code(ValidateCodeRequest {
                code: "WELCOME100".to_string(),
                cart: CartContext::new(Currency::Aed, dec!(300)).with_user("   ", None),
                at: at(),
            })
            .await?;

        assert_eq!(validation, CodeValidation::Rejected(Rejection::LoginRequired));

        Ok(())
    }

    #[tokio::test]
    async fn welcome_redemption_without_assignment_inserts_redeemed_row() -> TestResult {
        let ctx = TestContext::new().await;

        let coupon = create_coupon(&ctx, "WELCOME10").await?;

        let outcome = ctx
            .checkout
            .record_usage(redeem(RedemptionTarget::WelcomeCoupon(coupon), "late-signup"))
            .await?;

        assert!(
            matches!(outcome, RedemptionOutcome::Recorded { .. }),
            "expected redemption to be recorded, got {outcome:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn unknown_welcome_coupon_is_rejected_on_redeem() -> TestResult {
        let ctx = TestContext::new().await;

        let outcome = ctx
            .checkout
            .record_usage(redeem(
                RedemptionTarget::WelcomeCoupon(WelcomeCouponUuid::new()),
                "7",
            ))
            .await?;

        assert_eq!(
            outcome,
            RedemptionOutcome::Rejected(Rejection::WelcomeCouponNotFound)
        );

        Ok(())
    }

    #[tokio::test]
    async fn offer_per_user_limit_is_enforced() -> TestResult {
        let ctx = TestContext::new().await;

        let offer = OfferUuid::new();
        let mut terms = offer_terms(&[DiscountTier::Percentage(dec!(10))]);
        terms.restrictions.usage_limit_per_user = Some(2);

        ctx.offers.create_offer(NewOffer { uuid: offer, terms }).await?;

        for _ in 0..2 {
            let outcome = ctx
                .checkout
                .record_usage(redeem(RedemptionTarget::Offer(offer), "7"))
                .await?;

            assert!(
                matches!(outcome, RedemptionOutcome::Recorded { .. }),
                "expected redemption to be recorded, got {outcome:?}"
            );
        }

        let outcome = ctx
            .checkout
            .record_usage(redeem(RedemptionTarget::Offer(offer), "7"))
            .await?;

        assert_eq!(
            outcome,
            RedemptionOutcome::Rejected(Rejection::PerUserLimitReached)
        );

        let usages = ctx.offers.list_offer_usages(offer).await?;

        assert_eq!(usages.len(), 1);
        assert_eq!(usages.first().map(|usage| usage.usage_count), Some(2));

        Ok(())
    }

    #[tokio::test]
    async fn offer_total_limit_blocks_every_customer() -> TestResult {
        let ctx = TestContext::new().await;

        let offer = OfferUuid::new();
        let mut terms = offer_terms(&[DiscountTier::Cash(dec!(20))]);
        terms.restrictions.total_usage_limit = Some(1);

        ctx.offers.create_offer(NewOffer { uuid: offer, terms }).await?;

        ctx.checkout
            .record_usage(redeem(RedemptionTarget::Offer(offer), "1"))
            .await?;

        let outcome = ctx
            .checkout
            .record_usage(redeem(RedemptionTarget::Offer(offer), "2"))
            .await?;

        assert_eq!(
            outcome,
            RedemptionOutcome::Rejected(Rejection::TotalLimitReached)
        );

        let validation = ctx
            .checkout
            .validate_code(ValidateCodeRequest {
                code: "CASH20NEW".to_string(),
                cart: CartContext::new(Currency::Aed, dec!(100)).with_user("2", None),
                at: at(),
            })
            .await?;

        assert_eq!(
            validation,
            CodeValidation::Rejected(Rejection::TotalLimitReached)
        );

        let outcome = ctx
            .checkout
            .record_usage(redeem(RedemptionTarget::Offer(offer), "1"))
            .await?;

        assert_eq!(
            outcome,
            RedemptionOutcome::Rejected(Rejection::TotalLimitReached)
        );

        let usages = ctx.offers.list_offer_usages(offer).await?;

        assert_eq!(usages.first().map(|usage| usage.usage_count), Some(1));

        Ok(())
    }

    #[tokio::test]
    async fn recorded_offer_blocks_deletion() -> TestResult {
        let ctx = TestContext::new().await;

        let offer = create_offer(&ctx, &[DiscountTier::Cash(dec!(20))], 0).await?;

        ctx.checkout
            .record_usage(redeem(RedemptionTarget::Offer(offer), "7"))
            .await?;

        let result = ctx.offers.delete_offer(offer).await;

        assert!(
            matches!(result, Err(OffersServiceError::InUse)),
            "expected InUse, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn negative_amounts_are_refused() {
        let ctx = TestContext::new().await;

        let mut request = redeem(RedemptionTarget::Offer(OfferUuid::new()), "7");
        request.discount_amount = dec!(-1);

        let result = ctx.checkout.record_usage(request).await;

        assert!(
            matches!(result, Err(CheckoutServiceError::NegativeAmount)),
            "expected NegativeAmount, got {result:?}"
        );
    }
}
