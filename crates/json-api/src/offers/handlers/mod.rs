//! Offer Handlers

pub(crate) mod active;
pub(crate) mod create;
pub(crate) mod delete;
pub(crate) mod get;
pub(crate) mod index;
pub(crate) mod update;
pub(crate) mod usage;

#[cfg(test)]
mod tests {
    use jiff::{Timestamp, civil::date};
    use rust_decimal::dec;
    use smallvec::smallvec;
    use souq::{
        offers::{OfferRestrictions, OfferTerms, PromotionalOffer},
        tiers::DiscountTier,
    };
    use souq_app::domain::offers::records::{OfferRecord, OfferUuid};

    pub(super) fn make_terms() -> OfferTerms {
        OfferTerms {
            title: "Spin to win".to_string(),
            start_date: date(2026, 6, 1),
            end_date: date(2026, 6, 30),
            tiers: smallvec![
                DiscountTier::Percentage(dec!(10)),
                DiscountTier::Percentage(dec!(20)),
            ],
            is_active: true,
            priority: 0,
            restrictions: OfferRestrictions::default(),
        }
    }

    pub(super) fn make_offer(uuid: OfferUuid) -> OfferRecord {
        OfferRecord {
            offer: PromotionalOffer {
                uuid: uuid.into_uuid(),
                terms: make_terms(),
                created_at: Timestamp::UNIX_EPOCH,
            },
            updated_at: Timestamp::UNIX_EPOCH,
        }
    }
}
