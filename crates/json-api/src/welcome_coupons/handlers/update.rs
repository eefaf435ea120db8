//! Update Welcome Coupon Handler

use std::sync::Arc;

use salvo::{
    oapi::extract::{JsonBody, PathParam},
    prelude::*,
};
use uuid::Uuid;

use souq_app::domain::welcome_coupons::data::WelcomeCouponUpdate;

use crate::{
    extensions::*,
    state::State,
    welcome_coupons::{
        errors::into_status_error,
        models::{WelcomeCouponRequest, WelcomeCouponResponse},
    },
};

/// Update Welcome Coupon Handler
#[endpoint(
    tags("welcome-coupons"),
    summary = "Update Welcome Coupon",
    responses(
        (status_code = StatusCode::OK, description = "Welcome coupon updated"),
        (status_code = StatusCode::NOT_FOUND, description = "Welcome coupon not found"),
        (status_code = StatusCode::CONFLICT, description = "Code already in use"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
    ),
)]
pub(crate) async fn handler(
    coupon: PathParam<Uuid>,
    json: JsonBody<WelcomeCouponRequest>,
    depot: &mut Depot,
) -> Result<Json<WelcomeCouponResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let update = WelcomeCouponUpdate {
        terms: json.into_inner().into_terms()?,
    };

    let record = state
        .app
        .welcome_coupons
        .update_welcome_coupon(coupon.into_inner().into(), update)
        .await
        .map_err(into_status_error)?;

    Ok(Json(record.into()))
}
