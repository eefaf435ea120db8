//! Restriction Evaluator
//!
//! Eligibility predicates for a matched offer or welcome coupon. Checks run in
//! a fixed order and stop at the first failure, so the shopper only ever sees
//! one message per attempt.

use jiff::Timestamp;

use crate::{
    cart::CartContext,
    offers::PromotionalOffer,
    rejection::Rejection,
    welcome::{Audience, WelcomeCoupon},
};

/// Ledger counters for one offer, as seen at validation time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OfferUsageSnapshot {
    /// Redemptions by the cart's usage identifier.
    pub user_count: u32,

    /// Ledger rows recorded for the offer, one per distinct customer.
    pub total_count: u32,
}

/// Check a promotional offer's restrictions against a cart.
///
/// Order: minimum order value, maximum order value, user type, shop,
/// categories, per-user limit, total limit.
///
/// # Errors
///
/// Returns the [`Rejection`] for the first failing check.
pub fn check_offer(
    offer: &PromotionalOffer,
    cart: &CartContext,
    usage: OfferUsageSnapshot,
) -> Result<(), Rejection> {
    let restrictions = &offer.terms.restrictions;
    let total = cart.total();

    if let Some(required) = *restrictions.minimum_order_value.get(cart.currency)
        && total < required
    {
        return Err(Rejection::MinimumNotMet {
            required,
            currency: cart.currency,
        });
    }

    if let Some(limit) = *restrictions.maximum_order_value.get(cart.currency)
        && total > limit
    {
        return Err(Rejection::MaximumExceeded {
            limit,
            currency: cart.currency,
        });
    }

    if let Some(required) = restrictions.user_type
        && cart.user_type != Some(required)
    {
        return Err(Rejection::UserTypeMismatch(required));
    }

    if let Some(shop) = restrictions.shop
        && cart.shop != Some(shop)
    {
        return Err(Rejection::ShopMismatch);
    }

    if !restrictions.allowed_categories.is_empty()
        && restrictions
            .allowed_categories
            .is_disjoint(&cart.category_ids)
    {
        return Err(Rejection::CategoryNotAllowed);
    }

    if !restrictions
        .excluded_categories
        .is_disjoint(&cart.category_ids)
    {
        return Err(Rejection::CategoryExcluded);
    }

    if let Some(limit) = restrictions.usage_limit_per_user {
        if cart.usage_identifier().is_none() {
            return Err(Rejection::IdentityRequired);
        }

        if usage.user_count >= limit {
            return Err(Rejection::PerUserLimitReached);
        }
    }

    if let Some(limit) = restrictions.total_usage_limit
        && usage.total_count >= limit
    {
        return Err(Rejection::TotalLimitReached);
    }

    Ok(())
}

/// Check a welcome coupon against a cart.
///
/// Order: guest, prior redemption, validity window, audience, minimum
/// purchase. Both ends of the validity window are inclusive.
///
/// # Errors
///
/// Returns the [`Rejection`] for the first failing check.
pub fn check_welcome(
    coupon: &WelcomeCoupon,
    cart: &CartContext,
    already_redeemed: bool,
    now: Timestamp,
) -> Result<(), Rejection> {
    let terms = &coupon.terms;

    if cart.is_guest() {
        return Err(Rejection::LoginRequired);
    }

    if already_redeemed {
        return Err(Rejection::WelcomeCouponAlreadyUsed);
    }

    if terms.valid_from.is_some_and(|from| now < from) {
        return Err(Rejection::NotYetValid);
    }

    if terms.valid_to.is_some_and(|to| now > to) {
        return Err(Rejection::Expired);
    }

    if let Audience::Only(required) = terms.audience
        && cart.user_type != Some(required)
    {
        return Err(Rejection::UserTypeMismatch(required));
    }

    let required = *terms.minimum_purchase.get(cart.currency);

    if cart.total() < required {
        return Err(Rejection::MinimumNotMet {
            required,
            currency: cart.currency,
        });
    }

    Ok(())
}
