//! Get Welcome Coupon Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    extensions::*,
    state::State,
    welcome_coupons::{errors::into_status_error, models::WelcomeCouponResponse},
};

/// Get Welcome Coupon Handler
#[endpoint(
    tags("welcome-coupons"),
    summary = "Get Welcome Coupon",
    responses(
        (status_code = StatusCode::OK, description = "Welcome coupon found"),
        (status_code = StatusCode::NOT_FOUND, description = "Welcome coupon not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
    ),
)]
pub(crate) async fn handler(
    coupon: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<WelcomeCouponResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let coupon = state
        .app
        .welcome_coupons
        .get_welcome_coupon(coupon.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(coupon.into()))
}
