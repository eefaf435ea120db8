//! Active Offers Handler

use std::sync::Arc;

use salvo::{oapi::extract::QueryParam, prelude::*};

use crate::{
    extensions::*,
    offers::{errors::into_status_error, models::OffersResponse},
    state::State,
};

/// Active Offers Handler
///
/// Returns the offers live on a date (today in UTC by default), in the order
/// codes are matched against them.
#[endpoint(
    tags("offers"),
    summary = "List Active Offers",
    responses(
        (status_code = StatusCode::OK, description = "Live offers"),
        (status_code = StatusCode::BAD_REQUEST, description = "Unparseable date"),
    ),
)]
pub(crate) async fn handler(
    on: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<OffersResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let on = on.into_evaluation_date()?;

    let offers = state
        .app
        .offers
        .list_active_offers(on)
        .await
        .map_err(into_status_error)?;

    Ok(Json(offers.into()))
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use souq_app::domain::offers::{MockOffersService, records::OfferUuid};

    use crate::test_helpers::offers_service;

    use super::{super::tests::make_offer, *};

    fn make_service(offers: MockOffersService) -> Service {
        offers_service(offers, Router::with_path("offers/active").get(handler))
    }

    #[tokio::test]
    async fn test_active_uses_requested_date() -> TestResult {
        let uuid = OfferUuid::new();

        let mut offers = MockOffersService::new();

        offers
            .expect_list_active_offers()
            .once()
            .withf(|on| *on == date(2026, 6, 15))
            .return_once(move |_| Ok(vec![make_offer(uuid)]));

        let mut res = TestClient::get("http://example.com/offers/active?on=2026-06-15")
            .send(&make_service(offers))
            .await;

        let body: OffersResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(
            body.offers.iter().map(|offer| offer.uuid).collect::<Vec<_>>(),
            vec![uuid.into_uuid()]
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_active_invalid_date_returns_400() {
        let mut offers = MockOffersService::new();

        offers.expect_list_active_offers().never();

        let res = TestClient::get("http://example.com/offers/active?on=June")
            .send(&make_service(offers))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
    }
}
