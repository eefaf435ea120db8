//! Welcome Coupon Index Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    extensions::*,
    state::State,
    welcome_coupons::{errors::into_status_error, models::WelcomeCouponsResponse},
};

/// Welcome Coupon Index Handler
///
/// Returns every welcome coupon, newest first.
#[endpoint(tags("welcome-coupons"), summary = "List Welcome Coupons")]
pub(crate) async fn handler(
    depot: &mut Depot,
) -> Result<Json<WelcomeCouponsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let coupons = state
        .app
        .welcome_coupons
        .list_welcome_coupons()
        .await
        .map_err(into_status_error)?;

    Ok(Json(WelcomeCouponsResponse {
        welcome_coupons: coupons.into_iter().map(Into::into).collect(),
    }))
}
