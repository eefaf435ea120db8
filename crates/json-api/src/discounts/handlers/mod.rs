//! Discount Handlers

pub(crate) mod redeem;
pub(crate) mod validate;
