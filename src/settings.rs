//! Promotion Settings

use serde::{Deserialize, Serialize};

/// Admin feature flags, read once per evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromotionSettings {
    /// Welcome coupons can be validated and redeemed.
    pub welcome_coupons_enabled: bool,
    /// Promotional offers can be validated and redeemed.
    pub offers_enabled: bool,
}

impl Default for PromotionSettings {
    fn default() -> Self {
        Self {
            welcome_coupons_enabled: true,
            offers_enabled: true,
        }
    }
}
