//! Welcome Coupon Models

use std::string::ToString;

use jiff::Timestamp;
use rust_decimal::Decimal;
use salvo::{oapi::ToSchema, prelude::StatusError};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use souq::{
    currency::PerCurrency,
    welcome::{WelcomeCouponTerms, WelcomeDiscount},
};
use souq_app::domain::welcome_coupons::records::WelcomeCouponRecord;

use crate::extensions::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub(crate) enum WelcomeDiscountType {
    Flat,
    Percent,
}

impl WelcomeDiscountType {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Flat => "flat",
            Self::Percent => "percent",
        }
    }
}

impl From<&WelcomeDiscount> for WelcomeDiscountType {
    fn from(discount: &WelcomeDiscount) -> Self {
        match discount {
            WelcomeDiscount::Flat { .. } => Self::Flat,
            WelcomeDiscount::Percent { .. } => Self::Percent,
        }
    }
}

const fn active_by_default() -> bool {
    true
}

fn all_customers() -> String {
    "all".to_string()
}

/// Welcome Coupon Request
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct WelcomeCouponRequest {
    /// Stored uppercase; must start with `WELCOME`
    pub code: String,

    pub title: String,

    #[serde(default)]
    pub description: Option<String>,

    pub discount_type: WelcomeDiscountType,

    /// Flat amount, or percent off for percent coupons
    #[salvo(schema(value_type = f64))]
    pub discount_value: Decimal,

    /// Required for percent coupons
    #[serde(default)]
    #[salvo(schema(value_type = Option<f64>))]
    pub maximum_discount: Option<Decimal>,

    #[serde(default)]
    #[salvo(schema(value_type = f64))]
    pub minimum_purchase_aed: Decimal,

    #[serde(default)]
    #[salvo(schema(value_type = f64))]
    pub minimum_purchase_inr: Decimal,

    /// `all`, `new` or `returning`
    #[serde(default = "all_customers")]
    pub user_type_restriction: String,

    #[serde(default)]
    #[salvo(schema(value_type = Option<String>))]
    pub valid_from: Option<Timestamp>,

    #[serde(default)]
    #[salvo(schema(value_type = Option<String>))]
    pub valid_to: Option<Timestamp>,

    #[serde(default = "active_by_default")]
    pub is_active: bool,
}

impl WelcomeCouponRequest {
    pub(crate) fn into_terms(self) -> Result<WelcomeCouponTerms, StatusError> {
        let discount = WelcomeDiscount::from_parts(
            self.discount_type.as_str(),
            self.discount_value,
            self.maximum_discount,
        )
        .or_400("percent coupons require a maximum discount")?;

        Ok(WelcomeCouponTerms {
            code: self.code,
            title: self.title,
            description: self.description,
            discount,
            minimum_purchase: PerCurrency::new(
                self.minimum_purchase_aed,
                self.minimum_purchase_inr,
            ),
            audience: self
                .user_type_restriction
                .parse()
                .or_400("invalid user type restriction")?,
            valid_from: self.valid_from,
            valid_to: self.valid_to,
            is_active: self.is_active,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct WelcomeCouponResponse {
    pub uuid: Uuid,

    pub code: String,

    pub title: String,

    pub description: Option<String>,

    pub discount_type: WelcomeDiscountType,

    #[salvo(schema(value_type = f64))]
    pub discount_value: Decimal,

    #[salvo(schema(value_type = Option<f64>))]
    pub maximum_discount: Option<Decimal>,

    #[salvo(schema(value_type = f64))]
    pub minimum_purchase_aed: Decimal,

    #[salvo(schema(value_type = f64))]
    pub minimum_purchase_inr: Decimal,

    pub user_type_restriction: String,

    pub valid_from: Option<String>,

    pub valid_to: Option<String>,

    pub is_active: bool,

    pub created_at: String,

    pub updated_at: String,
}

impl From<WelcomeCouponRecord> for WelcomeCouponResponse {
    fn from(record: WelcomeCouponRecord) -> Self {
        let terms = record.coupon.terms;

        WelcomeCouponResponse {
            uuid: record.coupon.uuid,
            discount_type: (&terms.discount).into(),
            discount_value: terms.discount.value(),
            maximum_discount: terms.discount.maximum_discount(),
            minimum_purchase_aed: terms.minimum_purchase.aed,
            minimum_purchase_inr: terms.minimum_purchase.inr,
            user_type_restriction: terms.audience.to_string(),
            valid_from: terms.valid_from.as_ref().map(ToString::to_string),
            valid_to: terms.valid_to.as_ref().map(ToString::to_string),
            is_active: terms.is_active,
            code: terms.code,
            title: terms.title,
            description: terms.description,
            created_at: record.coupon.created_at.to_string(),
            updated_at: record.updated_at.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct WelcomeCouponsResponse {
    pub welcome_coupons: Vec<WelcomeCouponResponse>,
}
