//! Settings Records

use jiff::Timestamp;
use souq::settings::PromotionSettings;

/// Stored feature flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SettingsRecord {
    pub settings: PromotionSettings,
    pub updated_at: Timestamp,
}
