//! Settings Models

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};

use souq::settings::PromotionSettings;
use souq_app::domain::settings::records::SettingsRecord;

/// Promotion Settings Request
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PromotionSettingsRequest {
    pub welcome_coupons_enabled: bool,
    pub offers_enabled: bool,
}

impl From<PromotionSettingsRequest> for PromotionSettings {
    fn from(request: PromotionSettingsRequest) -> Self {
        PromotionSettings {
            welcome_coupons_enabled: request.welcome_coupons_enabled,
            offers_enabled: request.offers_enabled,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PromotionSettingsResponse {
    /// Whether WELCOME codes are accepted
    pub welcome_coupons_enabled: bool,

    /// Whether SPIN and CASH codes are accepted
    pub offers_enabled: bool,

    pub updated_at: String,
}

impl From<SettingsRecord> for PromotionSettingsResponse {
    fn from(record: SettingsRecord) -> Self {
        PromotionSettingsResponse {
            welcome_coupons_enabled: record.settings.welcome_coupons_enabled,
            offers_enabled: record.settings.offers_enabled,
            updated_at: record.updated_at.to_string(),
        }
    }
}
