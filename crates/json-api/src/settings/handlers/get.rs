//! Get Promotion Settings Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    extensions::*,
    settings::{errors::into_status_error, models::PromotionSettingsResponse},
    state::State,
};

/// Get Promotion Settings Handler
#[endpoint(tags("settings"), summary = "Get Promotion Settings")]
pub(crate) async fn handler(
    depot: &mut Depot,
) -> Result<Json<PromotionSettingsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let settings = state
        .app
        .settings
        .get_settings()
        .await
        .map_err(into_status_error)?;

    Ok(Json(settings.into()))
}
