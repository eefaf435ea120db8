//! Offer Models

use std::string::ToString;

use jiff::civil::Date;
use rust_decimal::Decimal;
use rustc_hash::FxHashSet;
use salvo::{oapi::ToSchema, prelude::StatusError};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use souq::{
    currency::PerCurrency,
    offers::{OfferRestrictions, OfferTerms},
    tiers::DiscountTier,
};
use souq_app::domain::{offers::records::OfferRecord, usage::records::OfferUsageRecord};

use crate::extensions::*;

/// Tier kind; percentage tiers answer SPIN codes, cash tiers answer CASH codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub(crate) enum TierType {
    Percentage,
    Cash,
}

/// Discount Tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub(crate) struct TierPayload {
    #[serde(rename = "type")]
    pub tier_type: TierType,

    /// Percent off, or a fixed amount in the cart's currency
    #[salvo(schema(value_type = f64))]
    pub value: Decimal,
}

impl From<TierPayload> for DiscountTier {
    fn from(tier: TierPayload) -> Self {
        match tier.tier_type {
            TierType::Percentage => DiscountTier::Percentage(tier.value),
            TierType::Cash => DiscountTier::Cash(tier.value),
        }
    }
}

impl From<DiscountTier> for TierPayload {
    fn from(tier: DiscountTier) -> Self {
        let tier_type = match tier {
            DiscountTier::Percentage(_) => TierType::Percentage,
            DiscountTier::Cash(_) => TierType::Cash,
        };

        TierPayload {
            tier_type,
            value: tier.value(),
        }
    }
}

/// Offer Restrictions
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub(crate) struct RestrictionsPayload {
    #[salvo(schema(value_type = Option<f64>))]
    pub minimum_order_value_aed: Option<Decimal>,

    #[salvo(schema(value_type = Option<f64>))]
    pub minimum_order_value_inr: Option<Decimal>,

    /// Orders above this are refused; percentage discounts never exceed it
    #[salvo(schema(value_type = Option<f64>))]
    pub maximum_order_value_aed: Option<Decimal>,

    #[salvo(schema(value_type = Option<f64>))]
    pub maximum_order_value_inr: Option<Decimal>,

    pub usage_limit_per_user: Option<u32>,

    /// Distinct customers allowed to use the offer
    pub total_usage_limit: Option<u32>,

    /// `A` or `B`
    pub shop_restriction: Option<String>,

    /// `new` or `returning`
    pub user_type_restriction: Option<String>,

    pub allowed_categories: Vec<String>,

    pub excluded_categories: Vec<String>,
}

impl RestrictionsPayload {
    pub(crate) fn into_restrictions(self) -> Result<OfferRestrictions, StatusError> {
        Ok(OfferRestrictions {
            minimum_order_value: PerCurrency::new(
                self.minimum_order_value_aed,
                self.minimum_order_value_inr,
            ),
            maximum_order_value: PerCurrency::new(
                self.maximum_order_value_aed,
                self.maximum_order_value_inr,
            ),
            usage_limit_per_user: self.usage_limit_per_user,
            total_usage_limit: self.total_usage_limit,
            shop: self
                .shop_restriction
                .as_deref()
                .map(str::parse)
                .transpose()
                .or_400("invalid shop restriction")?,
            user_type: self
                .user_type_restriction
                .as_deref()
                .map(str::parse)
                .transpose()
                .or_400("invalid user type restriction")?,
            allowed_categories: self.allowed_categories.into_iter().collect(),
            excluded_categories: self.excluded_categories.into_iter().collect(),
        })
    }
}

impl From<&OfferRestrictions> for RestrictionsPayload {
    fn from(restrictions: &OfferRestrictions) -> Self {
        let sorted = |categories: &FxHashSet<String>| {
            let mut categories: Vec<String> = categories.iter().cloned().collect();
            categories.sort_unstable();
            categories
        };

        RestrictionsPayload {
            minimum_order_value_aed: restrictions.minimum_order_value.aed,
            minimum_order_value_inr: restrictions.minimum_order_value.inr,
            maximum_order_value_aed: restrictions.maximum_order_value.aed,
            maximum_order_value_inr: restrictions.maximum_order_value.inr,
            usage_limit_per_user: restrictions.usage_limit_per_user,
            total_usage_limit: restrictions.total_usage_limit,
            shop_restriction: restrictions.shop.as_ref().map(ToString::to_string),
            user_type_restriction: restrictions.user_type.as_ref().map(ToString::to_string),
            allowed_categories: sorted(&restrictions.allowed_categories),
            excluded_categories: sorted(&restrictions.excluded_categories),
        }
    }
}

const fn active_by_default() -> bool {
    true
}

/// Offer Request
///
/// Every admin-editable field of an offer.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct OfferRequest {
    pub title: String,

    /// First day the offer is live (inclusive)
    #[salvo(schema(value_type = String))]
    pub start_date: Date,

    /// Last day the offer is live (inclusive)
    #[salvo(schema(value_type = String))]
    pub end_date: Date,

    /// Discount tiers; each answers to its own code
    pub discount_tiers: Vec<TierPayload>,

    #[serde(default = "active_by_default")]
    pub is_active: bool,

    /// Higher priority offers are matched first
    #[serde(default)]
    pub priority: i32,

    #[serde(default)]
    pub restrictions: RestrictionsPayload,
}

impl OfferRequest {
    pub(crate) fn into_terms(self) -> Result<OfferTerms, StatusError> {
        Ok(OfferTerms {
            title: self.title,
            start_date: self.start_date,
            end_date: self.end_date,
            tiers: self.discount_tiers.into_iter().map(Into::into).collect(),
            is_active: self.is_active,
            priority: self.priority,
            restrictions: self.restrictions.into_restrictions()?,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct OfferResponse {
    pub uuid: Uuid,

    pub title: String,

    pub start_date: String,

    pub end_date: String,

    /// `percentage`, `cash` or `mixed`
    pub offer_type: Option<String>,

    pub discount_tiers: Vec<TierPayload>,

    /// Code stem each tier answers to, in tier order
    pub codes: Vec<String>,

    pub is_active: bool,

    pub priority: i32,

    pub restrictions: RestrictionsPayload,

    pub created_at: String,

    pub updated_at: String,
}

impl From<OfferRecord> for OfferResponse {
    fn from(record: OfferRecord) -> Self {
        let terms = &record.offer.terms;

        OfferResponse {
            uuid: record.offer.uuid,
            title: terms.title.clone(),
            start_date: terms.start_date.to_string(),
            end_date: terms.end_date.to_string(),
            offer_type: terms.kind().map(|kind| kind.to_string()),
            discount_tiers: terms.tiers.iter().copied().map(Into::into).collect(),
            codes: terms.tiers.iter().map(DiscountTier::code_stem).collect(),
            is_active: terms.is_active,
            priority: terms.priority,
            restrictions: (&terms.restrictions).into(),
            created_at: record.offer.created_at.to_string(),
            updated_at: record.updated_at.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OffersResponse {
    pub offers: Vec<OfferResponse>,
}

impl From<Vec<OfferRecord>> for OffersResponse {
    fn from(offers: Vec<OfferRecord>) -> Self {
        OffersResponse {
            offers: offers.into_iter().map(Into::into).collect(),
        }
    }
}

/// One customer's use of an offer.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct OfferUsageResponse {
    /// Customer email, or the user id when no email was given
    pub user_identifier: String,

    pub usage_count: u32,

    pub first_used_at: String,

    pub last_used_at: String,
}

impl From<OfferUsageRecord> for OfferUsageResponse {
    fn from(usage: OfferUsageRecord) -> Self {
        OfferUsageResponse {
            user_identifier: usage.user_identifier,
            usage_count: usage.usage_count,
            first_used_at: usage.first_used_at.to_string(),
            last_used_at: usage.last_used_at.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct OfferUsagesResponse {
    pub usages: Vec<OfferUsageResponse>,

    /// Sum of every customer's usage count
    pub total_redemptions: u64,
}

impl From<Vec<OfferUsageRecord>> for OfferUsagesResponse {
    fn from(usages: Vec<OfferUsageRecord>) -> Self {
        let total_redemptions = usages
            .iter()
            .map(|usage| u64::from(usage.usage_count))
            .sum();

        OfferUsagesResponse {
            usages: usages.into_iter().map(Into::into).collect(),
            total_redemptions,
        }
    }
}
