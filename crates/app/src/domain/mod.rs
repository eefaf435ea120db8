//! Souq Domain Concerns

pub mod checkout;
pub(crate) mod columns;
pub mod offers;
pub mod settings;
pub mod usage;
pub mod welcome_coupons;
