//! Discount Models

use jiff::Timestamp;
use rust_decimal::Decimal;
use salvo::{oapi::ToSchema, prelude::StatusError};
use serde::{Deserialize, Deserializer, Serialize, de::Error as _};
use serde_json::Value;
use uuid::Uuid;

use souq::{
    calculator::DiscountRule,
    cart::CartContext,
    currency::Currency,
    matcher::normalize_code,
    rejection::Rejection,
    validation::Quote,
};
use souq_app::domain::checkout::data::{
    self, MatchedCode, RecordUsageRequest, RedemptionOutcome, RedemptionTarget,
};

use crate::{extensions::*, offers::models::RestrictionsPayload};

/// Storefronts send user ids as either strings or numbers.
fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(value)) => Ok(Some(value)),
        Some(Value::Number(value)) => Ok(Some(value.to_string())),
        Some(other) => Err(D::Error::custom(format!(
            "expected a string or number user id, got {other}"
        ))),
    }
}

fn not_blank(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Validate Code Request
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ValidateCodeRequest {
    /// Code as typed by the shopper
    #[serde(default)]
    pub code: String,

    #[salvo(schema(value_type = f64))]
    pub order_total: Decimal,

    /// `AED` or `INR`
    pub currency: String,

    /// `A` or `B`
    #[serde(default)]
    pub shop_id: Option<String>,

    /// `new` or `returning`
    #[serde(default)]
    pub user_type: Option<String>,

    /// Missing for guests
    #[serde(default, deserialize_with = "string_or_number")]
    #[salvo(schema(value_type = Option<String>))]
    pub user_id: Option<String>,

    #[serde(default)]
    pub user_email: Option<String>,

    #[serde(default)]
    pub category_ids: Vec<String>,
}

impl ValidateCodeRequest {
    pub(crate) fn into_domain(self, at: Timestamp) -> Result<data::ValidateCodeRequest, StatusError> {
        if self.order_total < Decimal::ZERO {
            return Err(StatusError::bad_request().brief("Order total cannot be negative"));
        }

        let currency: Currency = self.currency.parse().or_400("unsupported currency")?;

        let mut cart = CartContext::new(currency, self.order_total)
            .with_categories(self.category_ids);

        cart.user_email = not_blank(self.user_email);
        cart.user_id = not_blank(self.user_id);

        if let Some(shop) = not_blank(self.shop_id) {
            cart = cart.with_shop(shop.parse().or_400("unknown shop")?);
        }

        if let Some(user_type) = not_blank(self.user_type) {
            cart = cart.with_user_type(user_type.parse().or_400("unknown user type")?);
        }

        Ok(data::ValidateCodeRequest {
            code: self.code,
            cart,
            at,
        })
    }
}

/// Validate Code Response
///
/// Either `valid` with the priced discount, or not `valid` with an `error`
/// message for the shopper.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ValidateCodeResponse {
    pub valid: bool,

    /// `welcome` or `offer`
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub code_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[salvo(schema(value_type = Option<f64>))]
    pub discount_amount: Option<Decimal>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// `percentage`, `cash`, `flat` or `percent`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[salvo(schema(value_type = Option<f64>))]
    pub discount_value: Option<Decimal>,

    /// Minimum order value in the cart's currency
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[salvo(schema(value_type = Option<f64>))]
    pub min_purchase: Option<Decimal>,

    /// Cap applied to percentage discounts
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[salvo(schema(value_type = Option<f64>))]
    pub max_discount: Option<Decimal>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offer_id: Option<Uuid>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub welcome_coupon_id: Option<Uuid>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub restrictions: Option<RestrictionsPayload>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Machine-readable rejection category
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<String>,

    /// Order value the shopper has to reach
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[salvo(schema(value_type = Option<f64>))]
    pub required_amount: Option<Decimal>,
}

impl ValidateCodeResponse {
    pub(crate) fn rejected(rejection: &Rejection) -> Self {
        ValidateCodeResponse {
            valid: false,
            error: Some(rejection.to_string()),
            error_kind: Some(rejection.kind().as_str().to_string()),
            required_amount: rejection.required_amount(),
            ..ValidateCodeResponse::default()
        }
    }

    pub(crate) fn accepted(
        submitted_code: &str,
        currency: Currency,
        matched: MatchedCode,
        quote: &Quote,
    ) -> Self {
        let max_discount = match quote.rule {
            DiscountRule::Percentage { cap, .. } => cap,
            DiscountRule::Fixed { .. } => None,
        };

        let accepted = ValidateCodeResponse {
            valid: true,
            code_type: Some(matched.kind().to_string()),
            discount_amount: Some(*quote.discount.amount()),
            max_discount,
            ..ValidateCodeResponse::default()
        };

        match matched {
            MatchedCode::Welcome(record) => {
                let terms = record.coupon.terms;

                ValidateCodeResponse {
                    discount_type: Some(terms.discount.type_as_str().to_string()),
                    discount_value: Some(terms.discount.value()),
                    min_purchase: Some(*terms.minimum_purchase.get(currency)),
                    welcome_coupon_id: Some(record.coupon.uuid),
                    code: Some(terms.code),
                    title: Some(terms.title),
                    ..accepted
                }
            }
            MatchedCode::Offer { offer, tier } => {
                let terms = offer.offer.terms;

                ValidateCodeResponse {
                    code: Some(normalize_code(submitted_code)),
                    discount_type: Some(tier.type_as_str().to_string()),
                    discount_value: Some(tier.value()),
                    min_purchase: *terms.restrictions.minimum_order_value.get(currency),
                    offer_id: Some(offer.offer.uuid),
                    restrictions: Some((&terms.restrictions).into()),
                    title: Some(terms.title),
                    ..accepted
                }
            }
        }
    }
}

/// Redeem Request
///
/// Sent once an order has been placed with a validated discount. Exactly one
/// of `offerId` and `welcomeCouponId` is required.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RedeemRequest {
    #[serde(default)]
    pub offer_id: Option<Uuid>,

    #[serde(default)]
    pub welcome_coupon_id: Option<Uuid>,

    #[serde(default, deserialize_with = "string_or_number")]
    #[salvo(schema(value_type = Option<String>))]
    pub user_id: Option<String>,

    #[serde(default)]
    pub user_email: Option<String>,

    #[salvo(schema(value_type = f64))]
    pub order_total: Decimal,

    #[salvo(schema(value_type = f64))]
    pub discount_amount: Decimal,

    /// `AED` or `INR`
    pub currency: String,
}

impl RedeemRequest {
    pub(crate) fn into_domain(self, at: Timestamp) -> Result<RecordUsageRequest, StatusError> {
        let target = match (self.offer_id, self.welcome_coupon_id) {
            (Some(offer), None) => RedemptionTarget::Offer(offer.into()),
            (None, Some(coupon)) => RedemptionTarget::WelcomeCoupon(coupon.into()),
            _ => {
                return Err(StatusError::bad_request()
                    .brief("exactly one of offerId or welcomeCouponId is required"));
            }
        };

        Ok(RecordUsageRequest {
            target,
            user_id: not_blank(self.user_id).unwrap_or_default(),
            user_email: not_blank(self.user_email),
            order_total: self.order_total,
            discount_amount: self.discount_amount,
            currency: self.currency.parse().or_400("unsupported currency")?,
            at,
        })
    }
}

/// Redeem Response
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RedeemResponse {
    pub success: bool,

    /// Redemption record for the order
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub record_id: Option<Uuid>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redeemed_at: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<String>,
}

impl From<RedemptionOutcome> for RedeemResponse {
    fn from(outcome: RedemptionOutcome) -> Self {
        match outcome {
            RedemptionOutcome::Recorded {
                record_uuid,
                redeemed_at,
            } => RedeemResponse {
                success: true,
                record_id: Some(record_uuid),
                redeemed_at: Some(redeemed_at.to_string()),
                ..RedeemResponse::default()
            },
            RedemptionOutcome::Rejected(rejection) => RedeemResponse {
                success: false,
                error: Some(rejection.to_string()),
                error_kind: Some(rejection.kind().as_str().to_string()),
                ..RedeemResponse::default()
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::dec;
    use serde_json::json;
    use souq::cart::{Shop, UserType};
    use testresult::TestResult;

    use super::*;

    #[test]
    fn numeric_user_ids_become_strings() -> TestResult {
        let request: ValidateCodeRequest = serde_json::from_value(json!({
            "code": "spin20",
            "orderTotal": 500,
            "currency": "AED",
            "userId": 42,
            "shopId": "B",
            "userType": "returning",
            "categoryIds": ["shoes"]
        }))?;

        let request = request.into_domain(Timestamp::UNIX_EPOCH)?;

        assert_eq!(request.cart.user_id.as_deref(), Some("42"));
        assert_eq!(request.cart.shop, Some(Shop::B));
        assert_eq!(request.cart.user_type, Some(UserType::Returning));
        assert_eq!(request.cart.total(), dec!(500));
        assert!(request.cart.category_ids.contains("shoes"));

        Ok(())
    }

    #[test]
    fn blank_user_id_is_a_guest() -> TestResult {
        let request: ValidateCodeRequest = serde_json::from_value(json!({
            "code": "WELCOME10",
            "orderTotal": 100,
            "currency": "INR",
            "userId": "  "
        }))?;

        assert!(request.into_domain(Timestamp::UNIX_EPOCH)?.cart.is_guest(), "expected a guest cart");

        Ok(())
    }

    #[test]
    fn user_ids_are_trimmed() -> TestResult {
        let request: ValidateCodeRequest = serde_json::from_value(json!({
            "code": "WELCOME10",
            "orderTotal": 100,
            "currency": "INR",
            "userId": " 7 "
        }))?;

        let request = request.into_domain(Timestamp::UNIX_EPOCH)?;

        assert_eq!(request.cart.user_id.as_deref(), Some("7"));

        Ok(())
    }

    #[test]
    fn unsupported_currency_is_a_bad_request() -> TestResult {
        let request: ValidateCodeRequest = serde_json::from_value(json!({
            "code": "SPIN20",
            "orderTotal": 100,
            "currency": "USD"
        }))?;

        assert!(
            request.into_domain(Timestamp::UNIX_EPOCH).is_err(),
            "expected USD to be rejected"
        );

        Ok(())
    }

    #[test]
    fn redeem_requires_exactly_one_target() -> TestResult {
        let both: RedeemRequest = serde_json::from_value(json!({
            "offerId": Uuid::now_v7(),
            "welcomeCouponId": Uuid::now_v7(),
            "userId": "7",
            "orderTotal": 100,
            "discountAmount": 10,
            "currency": "AED"
        }))?;

        let neither: RedeemRequest = serde_json::from_value(json!({
            "userId": "7",
            "orderTotal": 100,
            "discountAmount": 10,
            "currency": "AED"
        }))?;

        assert!(both.into_domain(Timestamp::UNIX_EPOCH).is_err(), "both targets given");
        assert!(neither.into_domain(Timestamp::UNIX_EPOCH).is_err(), "no target given");

        Ok(())
    }

    #[test]
    fn minimum_order_rejection_echoes_required_amount() {
        let response = ValidateCodeResponse::rejected(&Rejection::MinimumNotMet {
            required: dec!(150),
            currency: Currency::Aed,
        });

        assert!(!response.valid, "rejections are not valid");
        assert_eq!(response.required_amount, Some(dec!(150)));
        assert_eq!(response.error_kind.as_deref(), Some("threshold_not_met"));
        assert_eq!(
            response.error.as_deref(),
            Some("Minimum order value of AED 150 required")
        );
    }
}
