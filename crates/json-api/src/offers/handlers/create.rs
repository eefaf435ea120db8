//! Create Offer Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use souq_app::domain::offers::data::NewOffer;

use crate::{
    extensions::*,
    offers::{
        errors::into_status_error,
        models::{OfferRequest, OfferResponse},
    },
    state::State,
};

/// Create Offer Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateOfferRequest {
    pub uuid: Uuid,

    #[serde(flatten)]
    pub offer: OfferRequest,
}

impl CreateOfferRequest {
    fn into_new_offer(self) -> Result<NewOffer, StatusError> {
        Ok(NewOffer {
            uuid: self.uuid.into(),
            terms: self.offer.into_terms()?,
        })
    }
}

/// Create Offer Handler
#[endpoint(
    tags("offers"),
    summary = "Create Offer",
    responses(
        (status_code = StatusCode::CREATED, description = "Offer created"),
        (status_code = StatusCode::CONFLICT, description = "Offer already exists"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateOfferRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<OfferResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let offer = json.into_inner().into_new_offer()?;

    let record = state
        .app
        .offers
        .create_offer(offer)
        .await
        .map_err(into_status_error)?;

    res.add_header(LOCATION, format!("/offers/{}", record.uuid()), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(record.into()))
}
