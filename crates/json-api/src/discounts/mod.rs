//! Storefront Discounts
//!
//! Code validation at checkout and redemption once an order completes.
//! Business-rule failures are answered with HTTP 200 and a message the
//! storefront can show as-is; only malformed requests and infrastructure
//! failures use error status codes.

mod errors;
mod handlers;
mod models;

pub(crate) use handlers::*;
