//! Offer Index Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    extensions::*,
    offers::{errors::into_status_error, models::OffersResponse},
    state::State,
};

/// Offer Index Handler
///
/// Returns every offer, highest priority first.
#[endpoint(tags("offers"), summary = "List Offers")]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<OffersResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let offers = state
        .app
        .offers
        .list_offers()
        .await
        .map_err(into_status_error)?;

    Ok(Json(offers.into()))
}
