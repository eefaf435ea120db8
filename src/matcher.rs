//! Code Matcher
//!
//! Classifies a submitted code and finds the welcome coupon or the
//! `(offer, tier)` pair it belongs to. Matching never touches the usage
//! ledger; eligibility is decided afterwards by [`crate::validation`].

use jiff::civil::Date;
use thiserror::Error;

use crate::{
    cart::CartContext,
    offers::{PromotionalOffer, rank_offers},
    rejection::Rejection,
    settings::PromotionSettings,
    tiers::DiscountTier,
    welcome::{WELCOME_PREFIX, WelcomeCoupon},
};

/// Errors raised while resolving a code.
#[derive(Debug, Error)]
pub enum MatchError {
    /// Business-rule failure to report to the shopper.
    #[error(transparent)]
    Rejected(#[from] Rejection),

    /// A tier produced a pattern the regex engine rejected.
    #[error("invalid tier pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// Which lookup a normalised code goes through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodeClass {
    /// Code carries the welcome prefix.
    Welcome(String),
    /// Any other code, matched against offer tiers.
    Offer(String),
}

impl CodeClass {
    /// The normalised code.
    #[must_use]
    pub fn code(&self) -> &str {
        match self {
            Self::Welcome(code) | Self::Offer(code) => code,
        }
    }
}

/// Trim and uppercase a submitted code.
#[must_use]
pub fn normalize_code(raw: &str) -> String {
    raw.trim().to_uppercase()
}

/// Normalise and classify a submitted code.
///
/// # Errors
///
/// Returns [`Rejection::MissingCode`] when the code is blank.
pub fn classify_code(raw: &str) -> Result<CodeClass, Rejection> {
    let code = normalize_code(raw);

    if code.is_empty() {
        return Err(Rejection::MissingCode);
    }

    if code.starts_with(WELCOME_PREFIX) {
        Ok(CodeClass::Welcome(code))
    } else {
        Ok(CodeClass::Offer(code))
    }
}

/// Offer and coupon snapshots a code is resolved against.
#[derive(Debug, Clone, Copy, Default)]
pub struct Catalog<'a> {
    /// Offers, in any order.
    pub offers: &'a [PromotionalOffer],
    /// Welcome coupons, in any order.
    pub welcome_coupons: &'a [WelcomeCoupon],
}

/// What a code resolved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution<'a> {
    /// An active welcome coupon.
    Welcome(&'a WelcomeCoupon),
    /// A live offer and the tier whose pattern matched.
    Offer {
        /// The winning offer.
        offer: &'a PromotionalOffer,
        /// The matched tier.
        tier: DiscountTier,
    },
}

/// Active welcome coupon with exactly this normalised code.
#[must_use]
pub fn find_welcome_coupon<'a>(code: &str, coupons: &'a [WelcomeCoupon]) -> Option<&'a WelcomeCoupon> {
    coupons
        .iter()
        .filter(|coupon| coupon.terms.is_active)
        .find(|coupon| coupon.terms.code.eq_ignore_ascii_case(code))
}

/// First `(offer, tier)` whose pattern matches, scanning live offers in rank
/// order and each offer's tiers in stored order.
///
/// # Errors
///
/// Returns an error if a tier pattern fails to compile.
pub fn find_offer_tier<'a>(
    code: &str,
    offers: &'a [PromotionalOffer],
    today: Date,
) -> Result<Option<(&'a PromotionalOffer, DiscountTier)>, regex::Error> {
    for offer in rank_offers(offers) {
        if !offer.is_live_on(today) {
            continue;
        }

        for tier in &offer.terms.tiers {
            if tier.pattern()?.is_match(code) {
                return Ok(Some((offer, *tier)));
            }
        }
    }

    Ok(None)
}

/// Resolve a submitted code for a cart.
///
/// Guests submitting a welcome code are turned away before any lookup.
///
/// # Errors
///
/// - [`MatchError::Rejected`]: blank code, guest welcome attempt, disabled
///   feature or unknown code.
/// - [`MatchError::Pattern`]: a tier pattern failed to compile.
pub fn resolve_code<'a>(
    raw: &str,
    cart: &CartContext,
    catalog: Catalog<'a>,
    settings: PromotionSettings,
    today: Date,
) -> Result<Resolution<'a>, MatchError> {
    match classify_code(raw)? {
        CodeClass::Welcome(code) => {
            if cart.is_guest() {
                return Err(Rejection::LoginRequired.into());
            }

            if !settings.welcome_coupons_enabled {
                return Err(Rejection::WelcomeCouponsDisabled.into());
            }

            find_welcome_coupon(&code, catalog.welcome_coupons)
                .map(Resolution::Welcome)
                .ok_or_else(|| Rejection::UnknownWelcomeCoupon.into())
        }
        CodeClass::Offer(code) => {
            if !settings.offers_enabled {
                return Err(Rejection::OffersDisabled.into());
            }

            find_offer_tier(&code, catalog.offers, today)?
                .map(|(offer, tier)| Resolution::Offer { offer, tier })
                .ok_or_else(|| Rejection::UnknownOfferCode.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use jiff::{Timestamp, civil::date};
    use rust_decimal::dec;
    use smallvec::smallvec;
    use uuid::Uuid;

    use super::*;
    use crate::{
        currency::{Currency, PerCurrency},
        offers::{OfferRestrictions, OfferTerms},
        welcome::{Audience, WelcomeCouponTerms, WelcomeDiscount},
    };

    fn offer(tiers: &[DiscountTier], priority: i32) -> PromotionalOffer {
        PromotionalOffer {
            uuid: Uuid::now_v7(),
            terms: OfferTerms {
                title: "Offer".to_string(),
                start_date: date(2026, 1, 1),
                end_date: date(2026, 12, 31),
                tiers: tiers.iter().copied().collect(),
                is_active: true,
                priority,
                restrictions: OfferRestrictions::default(),
            },
            created_at: Timestamp::UNIX_EPOCH,
        }
    }

    fn coupon(code: &str, is_active: bool) -> WelcomeCoupon {
        WelcomeCoupon {
            uuid: Uuid::now_v7(),
            terms: WelcomeCouponTerms {
                code: code.to_string(),
                title: "Welcome".to_string(),
                description: None,
                discount: WelcomeDiscount::Flat { amount: dec!(25) },
                minimum_purchase: PerCurrency::default(),
                audience: Audience::All,
                valid_from: None,
                valid_to: None,
                is_active,
            },
            created_at: Timestamp::UNIX_EPOCH,
        }
    }

    fn member_cart() -> CartContext {
        CartContext::new(Currency::Aed, dec!(100)).with_user("7", None)
    }

    #[test]
    fn classify_normalises_and_splits_on_prefix() {
        assert_eq!(
            classify_code("  welcome100 "),
            Ok(CodeClass::Welcome("WELCOME100".to_string()))
        );
        assert_eq!(
            classify_code("spin20ab"),
            Ok(CodeClass::Offer("SPIN20AB".to_string()))
        );
        assert_eq!(classify_code("   "), Err(Rejection::MissingCode));
    }

    #[test]
    fn welcome_lookup_ignores_inactive_coupons() {
        let coupons = [coupon("WELCOME100", false), coupon("WELCOME50", true)];

        assert!(find_welcome_coupon("WELCOME100", &coupons).is_none());
        assert!(find_welcome_coupon("WELCOME50", &coupons).is_some());
    }

    #[test]
    fn first_matching_tier_of_highest_ranked_offer_wins() -> Result<(), MatchError> {
        let low = offer(&[DiscountTier::Percentage(dec!(20))], 1);
        let high = offer(
            &[DiscountTier::Cash(dec!(50)), DiscountTier::Percentage(dec!(20))],
            5,
        );
        let offers = [low, high.clone()];

        let resolution = resolve_code(
            "spin20xyz",
            &member_cart(),
            Catalog {
                offers: &offers,
                welcome_coupons: &[],
            },
            PromotionSettings::default(),
            date(2026, 6, 1),
        )?;

        assert_eq!(
            resolution,
            Resolution::Offer {
                offer: &high,
                tier: DiscountTier::Percentage(dec!(20)),
            }
        );

        Ok(())
    }

    #[test]
    fn offers_outside_their_window_do_not_match() {
        let offers = [offer(&[DiscountTier::Cash(dec!(10))], 0)];

        let result = resolve_code(
            "CASH10A",
            &member_cart(),
            Catalog {
                offers: &offers,
                welcome_coupons: &[],
            },
            PromotionSettings::default(),
            date(2027, 1, 1),
        );

        assert!(matches!(
            result,
            Err(MatchError::Rejected(Rejection::UnknownOfferCode))
        ));
    }

    #[test]
    fn disabled_features_reject_before_lookup() {
        let settings = PromotionSettings {
            welcome_coupons_enabled: false,
            offers_enabled: false,
        };

        let welcome = resolve_code(
            "WELCOME1",
            &member_cart(),
            Catalog::default(),
            settings,
            date(2026, 6, 1),
        );
        let offer = resolve_code(
            "SPIN10A",
            &member_cart(),
            Catalog::default(),
            settings,
            date(2026, 6, 1),
        );

        assert!(matches!(
            welcome,
            Err(MatchError::Rejected(Rejection::WelcomeCouponsDisabled))
        ));
        assert!(matches!(
            offer,
            Err(MatchError::Rejected(Rejection::OffersDisabled))
        ));
    }
}
