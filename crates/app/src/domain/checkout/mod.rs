//! Checkout
//!
//! Validates submitted codes against the stored catalogue and records
//! redemptions once an order completes.

pub mod data;
pub mod errors;
pub mod service;

pub use errors::CheckoutServiceError;
pub use service::*;
