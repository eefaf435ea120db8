//! Redeem Handler

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{oapi::extract::JsonBody, prelude::*};

use souq_app::domain::checkout::data::RedemptionOutcome;

use crate::{
    discounts::{
        errors::into_status_error,
        models::{RedeemRequest, RedeemResponse},
    },
    extensions::*,
    observability::observe_redemption,
    state::State,
};

const RETRY: &str = "Failed to record usage, please try again";

/// Redeem Handler
///
/// Records that a placed order consumed an offer or welcome coupon. Limits are
/// re-checked under lock, so a code that validated earlier can still fail here.
#[endpoint(
    tags("discounts"),
    summary = "Record Discount Usage",
    responses(
        (status_code = StatusCode::OK, description = "Redemption result, recorded or not"),
        (status_code = StatusCode::BAD_REQUEST, description = "Malformed redemption"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Redemption could not be stored"),
    ),
)]
#[tracing::instrument(name = "discounts.redeem", skip(json, depot), err)]
pub(crate) async fn handler(
    json: JsonBody<RedeemRequest>,
    depot: &mut Depot,
) -> Result<Json<RedeemResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let request = json.into_inner().into_domain(Timestamp::now())?;

    let kind = request.target.kind();

    let outcome = state
        .app
        .checkout
        .record_usage(request)
        .await
        .map_err(|error| into_status_error(error, RETRY))?;

    match &outcome {
        RedemptionOutcome::Recorded { .. } => observe_redemption(kind, "recorded"),
        RedemptionOutcome::Rejected(rejection) => {
            observe_redemption(kind, rejection.kind().as_str());
        }
    }

    Ok(Json(outcome.into()))
}
