//! Usage Ledger
//!
//! Per-customer offer counters, the offer redemption log and welcome coupon
//! assignments. Rows are only written through the checkout service.

pub mod records;
mod repository;

pub(crate) use repository::{PgUsageRepository, RedemptionAmounts};
