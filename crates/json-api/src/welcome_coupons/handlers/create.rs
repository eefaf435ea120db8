//! Create Welcome Coupon Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use souq_app::domain::welcome_coupons::data::NewWelcomeCoupon;

use crate::{
    extensions::*,
    state::State,
    welcome_coupons::{
        errors::into_status_error,
        models::{WelcomeCouponRequest, WelcomeCouponResponse},
    },
};

/// Create Welcome Coupon Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateWelcomeCouponRequest {
    pub uuid: Uuid,

    #[serde(flatten)]
    pub coupon: WelcomeCouponRequest,
}

/// Create Welcome Coupon Handler
///
/// The new coupon is assigned to every existing customer.
#[endpoint(
    tags("welcome-coupons"),
    summary = "Create Welcome Coupon",
    responses(
        (status_code = StatusCode::CREATED, description = "Welcome coupon created"),
        (status_code = StatusCode::CONFLICT, description = "Code already in use"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateWelcomeCouponRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<WelcomeCouponResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let request = json.into_inner();

    let coupon = NewWelcomeCoupon {
        uuid: request.uuid.into(),
        terms: request.coupon.into_terms()?,
    };

    let record = state
        .app
        .welcome_coupons
        .create_welcome_coupon(coupon)
        .await
        .map_err(into_status_error)?;

    res.add_header(
        LOCATION,
        format!("/welcome-coupons/{}", record.uuid()),
        true,
    )
    .or_500("failed to set location header")?
    .status_code(StatusCode::CREATED);

    Ok(Json(record.into()))
}
