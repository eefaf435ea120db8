//! Update Offer Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::extract::{JsonBody, PathParam},
    prelude::*,
};
use uuid::Uuid;

use souq_app::domain::offers::data::OfferUpdate;

use crate::{
    extensions::*,
    offers::{
        errors::into_status_error,
        models::{OfferRequest, OfferResponse},
    },
    state::State,
};

/// Update Offer Handler
///
/// Replaces every editable field of an offer.
#[endpoint(
    tags("offers"),
    summary = "Update Offer",
    responses(
        (status_code = StatusCode::OK, description = "Offer updated"),
        (status_code = StatusCode::NOT_FOUND, description = "Offer not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "offers.update",
    skip(offer, json, depot, res),
    fields(offer_uuid = tracing::field::Empty, tier_count = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    offer: PathParam<Uuid>,
    json: JsonBody<OfferRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<OfferResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let request = json.into_inner();
    let offer = offer.into_inner();

    let span = tracing::Span::current();

    span.record("offer_uuid", tracing::field::display(offer));
    span.record("tier_count", request.discount_tiers.len());

    let update = OfferUpdate {
        terms: request.into_terms()?,
    };

    let record = state
        .app
        .offers
        .update_offer(offer.into(), update)
        .await
        .map_err(into_status_error)?;

    res.add_header(LOCATION, format!("/offers/{offer}"), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::OK);

    Ok(Json(record.into()))
}
