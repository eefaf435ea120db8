//! Souq
//!
//! Souq resolves storefront discount codes. It classifies a submitted code as a
//! welcome coupon or a promotional offer tier, checks the cart against the
//! matched entity's restrictions and computes the discount to apply.
//!
//! Everything in this crate is pure: callers load offers, coupons and usage
//! snapshots from storage and hand them in.

pub mod calculator;
pub mod cart;
pub mod currency;
pub mod matcher;
pub mod offers;
pub mod rejection;
pub mod restrictions;
pub mod settings;
pub mod tiers;
pub mod validation;
pub mod welcome;
