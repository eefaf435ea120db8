//! Offers Data

use souq::offers::OfferTerms;

use crate::domain::offers::records::OfferUuid;

/// New Offer Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOffer {
    pub uuid: OfferUuid,
    pub terms: OfferTerms,
}

/// Offer Update Data
///
/// Replaces every admin-editable field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OfferUpdate {
    pub terms: OfferTerms,
}
