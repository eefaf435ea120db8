//! Welcome Coupons

pub mod data;
pub mod errors;
pub mod records;
mod repository;
pub mod service;

pub use errors::WelcomeCouponsServiceError;
pub(crate) use repository::PgWelcomeCouponsRepository;
pub use service::*;
