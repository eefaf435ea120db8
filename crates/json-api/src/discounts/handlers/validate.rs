//! Validate Code Handler

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{oapi::extract::JsonBody, prelude::*};
use souq::matcher::{CodeClass, classify_code};
use tracing::Span;

use souq_app::domain::checkout::data::CodeValidation;

use crate::{
    discounts::{
        errors::into_status_error,
        models::{ValidateCodeRequest, ValidateCodeResponse},
    },
    extensions::*,
    observability::observe_code_validation,
    state::State,
};

const RETRY: &str = "Failed to validate code, please try again";

/// Which family a submitted code belongs to, for metrics.
fn code_family(code: &str) -> &'static str {
    match classify_code(code) {
        Ok(CodeClass::Welcome(_)) => "welcome",
        Ok(CodeClass::Offer(_)) => "offer",
        Err(_) => "none",
    }
}

/// Validate Code Handler
///
/// Matches a code against welcome coupons and live offers, checks it against
/// the cart and prices the discount.
#[endpoint(
    tags("discounts"),
    summary = "Validate Discount Code",
    responses(
        (status_code = StatusCode::OK, description = "Validation result, valid or not"),
        (status_code = StatusCode::BAD_REQUEST, description = "Malformed cart"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Validation could not run"),
    ),
)]
#[tracing::instrument(
    name = "discounts.validate",
    skip(json, depot),
    fields(family = tracing::field::Empty, outcome = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<ValidateCodeRequest>,
    depot: &mut Depot,
) -> Result<Json<ValidateCodeResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let request = json.into_inner().into_domain(Timestamp::now())?;

    let code = request.code.clone();
    let currency = request.cart.currency;
    let family = code_family(&code);

    let validation = state
        .app
        .checkout
        .validate_code(request)
        .await
        .map_err(|error| into_status_error(error, RETRY))?;

    let (outcome, response) = match validation {
        CodeValidation::Accepted { matched, quote } => (
            "accepted",
            ValidateCodeResponse::accepted(&code, currency, matched, &quote),
        ),
        CodeValidation::Rejected(rejection) => (
            rejection.kind().as_str(),
            ValidateCodeResponse::rejected(&rejection),
        ),
    };

    let span = Span::current();

    span.record("family", family);
    span.record("outcome", outcome);

    observe_code_validation(family, outcome);

    Ok(Json(response))
}
