//! Backfill Welcome Coupon Assignments Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use crate::{extensions::*, state::State, welcome_coupons::errors::into_status_error};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct BackfillResponse {
    /// Assignments added for customers who joined after a coupon was created
    pub assigned_users: u64,
}

/// Backfill Welcome Coupon Assignments Handler
#[endpoint(tags("welcome-coupons"), summary = "Backfill Welcome Coupon Assignments")]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<BackfillResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let assigned_users = state
        .app
        .welcome_coupons
        .backfill_assignments()
        .await
        .map_err(into_status_error)?;

    Ok(Json(BackfillResponse { assigned_users }))
}
