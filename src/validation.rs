//! Validation
//!
//! Runs the restriction checks for a resolved code and prices the discount.

use jiff::Timestamp;
use rusty_money::{Money, iso};
use thiserror::Error;

use crate::{
    calculator::{DiscountError, DiscountRule, calculate_discount},
    cart::CartContext,
    offers::PromotionalOffer,
    rejection::Rejection,
    restrictions::{OfferUsageSnapshot, check_offer, check_welcome},
    tiers::DiscountTier,
    welcome::WelcomeCoupon,
};

/// Errors raised while validating a resolved code.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A business rule refused the code.
    #[error(transparent)]
    Rejected(#[from] Rejection),

    /// The discount could not be calculated.
    #[error(transparent)]
    Discount(#[from] DiscountError),
}

/// An accepted code and the discount it is worth for the cart.
#[derive(Debug, Clone, PartialEq)]
pub struct Quote {
    /// Rule the discount was derived from.
    pub rule: DiscountRule,
    /// Discount amount in the cart's currency.
    pub discount: Money<'static, iso::Currency>,
}

/// Validate a welcome coupon and price it.
///
/// # Errors
///
/// Returns [`ValidationError::Rejected`] when a check fails, or
/// [`ValidationError::Discount`] when the amount cannot be computed.
pub fn quote_welcome(
    coupon: &WelcomeCoupon,
    cart: &CartContext,
    already_redeemed: bool,
    now: Timestamp,
) -> Result<Quote, ValidationError> {
    check_welcome(coupon, cart, already_redeemed, now)?;

    let rule = DiscountRule::for_welcome(&coupon.terms.discount);
    let discount = calculate_discount(&rule, &cart.order_total)?;

    Ok(Quote { rule, discount })
}

/// Validate a matched offer tier and price it.
///
/// The offer's maximum order value for the cart's currency doubles as the
/// cap on percentage tiers.
///
/// # Errors
///
/// Returns [`ValidationError::Rejected`] when a check fails, or
/// [`ValidationError::Discount`] when the amount cannot be computed.
pub fn quote_offer(
    offer: &PromotionalOffer,
    tier: &DiscountTier,
    cart: &CartContext,
    usage: OfferUsageSnapshot,
) -> Result<Quote, ValidationError> {
    check_offer(offer, cart, usage)?;

    let cap = *offer
        .terms
        .restrictions
        .maximum_order_value
        .get(cart.currency);

    let rule = DiscountRule::for_tier(tier, cap);
    let discount = calculate_discount(&rule, &cart.order_total)?;

    Ok(Quote { rule, discount })
}
