//! Delete Welcome Coupon Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{extensions::*, state::State, welcome_coupons::errors::into_status_error};

/// Delete Welcome Coupon Handler
///
/// Assignments and redemption history go with the coupon.
#[endpoint(
    tags("welcome-coupons"),
    summary = "Delete Welcome Coupon",
    responses(
        (status_code = StatusCode::OK, description = "Welcome coupon deleted"),
        (status_code = StatusCode::NOT_FOUND, description = "Welcome coupon not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
    ),
)]
pub(crate) async fn handler(
    coupon: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    state
        .app
        .welcome_coupons
        .delete_welcome_coupon(coupon.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(StatusCode::OK)
}

#[cfg(test)]
mod tests {
    use salvo::test::TestClient;

    use souq_app::domain::welcome_coupons::{
        MockWelcomeCouponsService, WelcomeCouponsServiceError, records::WelcomeCouponUuid,
    };

    use crate::test_helpers::welcome_coupons_service;

    use super::*;

    fn make_service(coupons: MockWelcomeCouponsService) -> Service {
        welcome_coupons_service(
            coupons,
            Router::with_path("welcome-coupons/{coupon}").delete(handler),
        )
    }

    #[tokio::test]
    async fn test_delete_coupon_success() {
        let uuid = WelcomeCouponUuid::new();

        let mut coupons = MockWelcomeCouponsService::new();

        coupons
            .expect_delete_welcome_coupon()
            .once()
            .withf(move |coupon| *coupon == uuid)
            .return_once(|_| Ok(()));

        let res = TestClient::delete(format!("http://example.com/welcome-coupons/{uuid}"))
            .send(&make_service(coupons))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));
    }

    #[tokio::test]
    async fn test_delete_unknown_coupon_returns_404() {
        let uuid = WelcomeCouponUuid::new();

        let mut coupons = MockWelcomeCouponsService::new();

        coupons
            .expect_delete_welcome_coupon()
            .once()
            .return_once(|_| Err(WelcomeCouponsServiceError::NotFound));

        let res = TestClient::delete(format!("http://example.com/welcome-coupons/{uuid}"))
            .send(&make_service(coupons))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));
    }
}
