//! Offer Records

use jiff::Timestamp;
use souq::offers::PromotionalOffer;

use crate::uuids::TypedUuid;

/// Offer UUID
pub type OfferUuid = TypedUuid<OfferRecord>;

/// Stored promotional offer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OfferRecord {
    pub offer: PromotionalOffer,
    pub updated_at: Timestamp,
}

impl OfferRecord {
    #[must_use]
    pub fn uuid(&self) -> OfferUuid {
        OfferUuid::from_uuid(self.offer.uuid)
    }
}
