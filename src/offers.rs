//! Promotional Offers

use std::cmp::Ordering;

use jiff::{Timestamp, civil::Date};
use rust_decimal::Decimal;
use rustc_hash::FxHashSet;
use smallvec::SmallVec;
use thiserror::Error;
use uuid::Uuid;

use crate::{
    cart::{Shop, UserType},
    currency::PerCurrency,
    tiers::{DiscountTier, OfferKind, TierError},
};

/// Tier list; offers rarely carry more than a handful.
pub type Tiers = SmallVec<[DiscountTier; 4]>;

/// Offer validation errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum OfferError {
    /// The title is blank.
    #[error("offer title cannot be empty")]
    MissingTitle,

    /// The tier list is empty.
    #[error("offer must have at least one discount tier")]
    NoTiers,

    /// The end date precedes the start date.
    #[error("end date {end} is before start date {start}")]
    InvalidDateWindow {
        /// Configured start date.
        start: Date,
        /// Configured end date.
        end: Date,
    },

    /// A tier value is out of range.
    #[error("invalid discount tier: {0}")]
    Tier(#[from] TierError),

    /// An order value threshold is below zero.
    #[error("{0} cannot be negative")]
    NegativeThreshold(&'static str),

    /// A usage limit is zero.
    #[error("{0} must be greater than zero")]
    ZeroLimit(&'static str),

    /// A category is both allowed and excluded.
    #[error("category {0} is both allowed and excluded")]
    ConflictingCategory(String),
}

/// Optional eligibility restrictions on an offer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OfferRestrictions {
    /// Smallest order total accepted, per currency.
    pub minimum_order_value: PerCurrency<Option<Decimal>>,
    /// Largest order total accepted, per currency; also caps percentage tiers.
    pub maximum_order_value: PerCurrency<Option<Decimal>>,
    /// Redemptions allowed per customer.
    pub usage_limit_per_user: Option<u32>,
    /// Distinct customers allowed across the offer's lifetime.
    pub total_usage_limit: Option<u32>,
    /// Shop the offer is limited to.
    pub shop: Option<Shop>,
    /// Customer segment the offer is limited to.
    pub user_type: Option<UserType>,
    /// When non-empty, the cart needs at least one of these.
    pub allowed_categories: FxHashSet<String>,
    /// The cart may hold none of these.
    pub excluded_categories: FxHashSet<String>,
}

impl OfferRestrictions {
    /// True when any restriction field is set.
    ///
    /// Restricted offers rank ahead of unrestricted ones at equal priority.
    #[must_use]
    pub fn has_any(&self) -> bool {
        self.minimum_order_value.is_any_set()
            || self.maximum_order_value.is_any_set()
            || self.usage_limit_per_user.is_some()
            || self.total_usage_limit.is_some()
            || self.shop.is_some()
            || self.user_type.is_some()
            || !self.allowed_categories.is_empty()
            || !self.excluded_categories.is_empty()
    }

    fn validate(&self) -> Result<(), OfferError> {
        let thresholds = [
            ("minimum_order_value_aed", self.minimum_order_value.aed),
            ("minimum_order_value_inr", self.minimum_order_value.inr),
            ("maximum_order_value_aed", self.maximum_order_value.aed),
            ("maximum_order_value_inr", self.maximum_order_value.inr),
        ];

        for (name, value) in thresholds {
            if value.is_some_and(|value| value < Decimal::ZERO) {
                return Err(OfferError::NegativeThreshold(name));
            }
        }

        if self.usage_limit_per_user == Some(0) {
            return Err(OfferError::ZeroLimit("usage_limit_per_user"));
        }

        if self.total_usage_limit == Some(0) {
            return Err(OfferError::ZeroLimit("total_usage_limit"));
        }

        if let Some(category) = self
            .allowed_categories
            .intersection(&self.excluded_categories)
            .next()
        {
            return Err(OfferError::ConflictingCategory(category.clone()));
        }

        Ok(())
    }
}

/// Admin-editable part of an offer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OfferTerms {
    /// Admin-facing title.
    pub title: String,
    /// First day the offer is live.
    pub start_date: Date,
    /// Last day the offer is live.
    pub end_date: Date,
    /// Discount tiers, each with its own code pattern.
    pub tiers: Tiers,
    /// Admin on/off switch.
    pub is_active: bool,
    /// Higher priority wins when several offers match a code.
    pub priority: i32,
    /// Eligibility restrictions.
    pub restrictions: OfferRestrictions,
}

impl OfferTerms {
    /// Check the offer invariants.
    ///
    /// # Errors
    ///
    /// Returns the first violated invariant: blank title, no tiers, a tier
    /// value out of range, an inverted date window or an inconsistent
    /// restriction.
    pub fn validate(&self) -> Result<(), OfferError> {
        if self.title.trim().is_empty() {
            return Err(OfferError::MissingTitle);
        }

        if self.tiers.is_empty() {
            return Err(OfferError::NoTiers);
        }

        for tier in &self.tiers {
            tier.validate()?;
        }

        if self.end_date < self.start_date {
            return Err(OfferError::InvalidDateWindow {
                start: self.start_date,
                end: self.end_date,
            });
        }

        self.restrictions.validate()
    }

    /// Offer type derived from the tiers, `None` when there are none.
    #[must_use]
    pub fn kind(&self) -> Option<OfferKind> {
        OfferKind::from_tiers(&self.tiers)
    }
}

/// Persisted promotional offer snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromotionalOffer {
    /// Offer id.
    pub uuid: Uuid,
    /// Editable terms.
    pub terms: OfferTerms,
    /// Creation time, used to break priority ties.
    pub created_at: Timestamp,
}

impl PromotionalOffer {
    /// Active and inside its inclusive date window on `date`.
    #[must_use]
    pub fn is_live_on(&self, date: Date) -> bool {
        self.terms.is_active && self.terms.start_date <= date && date <= self.terms.end_date
    }

    /// True when any restriction is set.
    #[must_use]
    pub fn has_restrictions(&self) -> bool {
        self.terms.restrictions.has_any()
    }
}

/// Ranking used wherever offers compete for a code.
///
/// Priority descending, then restricted before unrestricted, then newest first.
#[must_use]
pub fn compare_offers(a: &PromotionalOffer, b: &PromotionalOffer) -> Ordering {
    b.terms
        .priority
        .cmp(&a.terms.priority)
        .then_with(|| b.has_restrictions().cmp(&a.has_restrictions()))
        .then_with(|| b.created_at.cmp(&a.created_at))
}

/// Offers sorted by [`compare_offers`].
#[must_use]
pub fn rank_offers(offers: &[PromotionalOffer]) -> Vec<&PromotionalOffer> {
    let mut ranked: Vec<&PromotionalOffer> = offers.iter().collect();

    ranked.sort_by(|a, b| compare_offers(a, b));

    ranked
}
