//! Update Promotion Settings Handler

use std::sync::Arc;

use salvo::{oapi::extract::JsonBody, prelude::*};
use tracing::info;

use crate::{
    extensions::*,
    settings::{
        errors::into_status_error,
        models::{PromotionSettingsRequest, PromotionSettingsResponse},
    },
    state::State,
};

/// Update Promotion Settings Handler
///
/// Turns welcome coupons and offers on or off for every storefront.
#[endpoint(tags("settings"), summary = "Update Promotion Settings")]
pub(crate) async fn handler(
    json: JsonBody<PromotionSettingsRequest>,
    depot: &mut Depot,
) -> Result<Json<PromotionSettingsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let request = json.into_inner();

    let settings = state
        .app
        .settings
        .update_settings(request.into())
        .await
        .map_err(into_status_error)?;

    info!(
        welcome_coupons_enabled = request.welcome_coupons_enabled,
        offers_enabled = request.offers_enabled,
        "updated promotion settings"
    );

    Ok(Json(settings.into()))
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use souq::settings::PromotionSettings;
    use testresult::TestResult;

    use souq_app::domain::settings::{MockSettingsService, records::SettingsRecord};

    use crate::test_helpers::settings_service;

    use super::*;

    #[tokio::test]
    async fn test_update_settings_success() -> TestResult {
        let expected = PromotionSettings {
            welcome_coupons_enabled: true,
            offers_enabled: false,
        };

        let mut settings = MockSettingsService::new();

        settings
            .expect_update_settings()
            .once()
            .withf(move |settings| *settings == expected)
            .return_once(move |settings| {
                Ok(SettingsRecord {
                    settings,
                    updated_at: Timestamp::UNIX_EPOCH,
                })
            });

        let mut res = TestClient::put("http://example.com/settings/promotions")
            .json(&json!({ "welcomeCouponsEnabled": true, "offersEnabled": false }))
            .send(&settings_service(
                settings,
                Router::with_path("settings/promotions").put(handler),
            ))
            .await;

        let body: PromotionSettingsResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert!(!body.offers_enabled, "offers were switched off");

        Ok(())
    }

    #[tokio::test]
    async fn test_update_settings_requires_both_flags() {
        let mut settings = MockSettingsService::new();

        settings.expect_update_settings().never();

        let res = TestClient::put("http://example.com/settings/promotions")
            .json(&json!({ "offersEnabled": false }))
            .send(&settings_service(
                settings,
                Router::with_path("settings/promotions").put(handler),
            ))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
    }
}
